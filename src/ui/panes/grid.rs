//! Program grid pane
//!
//! Draws the grid padded to its full width, colors instruction classes, and
//! inverts the cell under the cursor. The view scrolls in both directions to
//! keep the cursor near the middle when the program is larger than the pane.

use super::utils::{clamp_scroll, pane_block};
use crate::grid::Grid;
use crate::interpreter::Position;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// How the cursor cell is highlighted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorStyle {
    Normal,
    /// Waiting for `&`/`~` input
    Input,
    /// The run faulted on this cell
    Fault,
}

fn cell_style(c: char) -> Style {
    match c {
        '0'..='9' => Style::default().fg(DEFAULT_THEME.number),
        '"' => Style::default().fg(DEFAULT_THEME.string),
        '>' | 'v' | '<' | '^' | '?' | '_' | '|' | '#' => Style::default()
            .fg(DEFAULT_THEME.instruction)
            .add_modifier(Modifier::BOLD),
        '@' => Style::default()
            .fg(DEFAULT_THEME.error)
            .add_modifier(Modifier::BOLD),
        'g' | 'p' | '&' | '~' | '.' | ',' => Style::default().fg(DEFAULT_THEME.secondary),
        _ => Style::default().fg(DEFAULT_THEME.fg),
    }
}

fn cursor_style(style: CursorStyle) -> Style {
    let bg = match style {
        CursorStyle::Normal => DEFAULT_THEME.cursor_bg,
        CursorStyle::Input => DEFAULT_THEME.secondary,
        CursorStyle::Fault => DEFAULT_THEME.error,
    };
    Style::default()
        .bg(bg)
        .fg(Color::Black)
        .add_modifier(Modifier::BOLD)
}

/// Render the program grid pane
pub fn render_grid_pane(
    frame: &mut Frame,
    area: Rect,
    grid: &Grid,
    cursor: Position,
    style: CursorStyle,
    is_focused: bool,
) {
    let title = format!(" Program {}x{} ", grid.width(), grid.height());
    let block = pane_block(&title, is_focused);

    if grid.is_empty() {
        let paragraph = Paragraph::new("(empty program)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    // Account for borders (2), min 1
    let visible_height = area.height.saturating_sub(2).max(1) as usize;
    let visible_width = area.width.saturating_sub(2).max(1) as usize;

    let row_offset = clamp_scroll(
        cursor.y.saturating_sub(visible_height / 2),
        grid.height(),
        visible_height,
    );
    let col_offset = clamp_scroll(
        cursor.x.saturating_sub(visible_width / 2),
        grid.width(),
        visible_width,
    );

    let lines: Vec<Line> = (row_offset..grid.height())
        .take(visible_height)
        .map(|y| {
            let spans: Vec<Span> = grid
                .padded_row(y)
                .enumerate()
                .skip(col_offset)
                .take(visible_width)
                .map(|(x, c)| {
                    if x == cursor.x && y == cursor.y {
                        Span::styled(c.to_string(), cursor_style(style))
                    } else {
                        Span::styled(c.to_string(), cell_style(c))
                    }
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, area);
}
