//! Stack pane rendering
//!
//! Lists the data stack top first. Each entry shows its depth, its integer
//! value, and the character it encodes when that character is printable.

use super::utils::{clamp_scroll, display_char, pane_block};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph},
    Frame,
};

fn stack_entry(depth: usize, value: i64) -> Line<'static> {
    let depth_style = if depth == 0 {
        Style::default()
            .fg(DEFAULT_THEME.secondary)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.comment)
    };

    let mut spans = vec![
        Span::styled(format!("{:>3} ", depth), depth_style),
        Span::styled(
            format!("{:>12}", value),
            Style::default().fg(DEFAULT_THEME.number),
        ),
    ];
    if let Some(c) = display_char(value) {
        spans.push(Span::styled(
            format!("  '{}'", c),
            Style::default().fg(DEFAULT_THEME.string),
        ));
    }
    Line::from(spans)
}

/// Render the stack pane. `stack` is bottom first, as stored.
pub fn render_stack_pane(
    frame: &mut Frame,
    area: Rect,
    stack: &[i64],
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let title = format!(" Stack ({}) ", stack.len());
    let block = pane_block(&title, is_focused);

    if stack.is_empty() {
        let paragraph = Paragraph::new("(empty)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let visible_height = area.height.saturating_sub(2).max(1) as usize;
    *scroll_offset = clamp_scroll(*scroll_offset, stack.len(), visible_height);

    let items: Vec<ListItem> = stack
        .iter()
        .rev()
        .enumerate()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(|(depth, &value)| ListItem::new(stack_entry(depth, value)))
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}
