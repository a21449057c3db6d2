//! Program output pane rendering

use super::utils::{clamp_scroll, pane_block};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, Padding, Paragraph},
    Frame,
};

/// An `&`/`~` prompt being typed into
pub struct PendingPrompt<'a> {
    pub prompt: &'a str,
    pub buffer: &'a str,
}

/// Render the output pane. `scroll_offset` of `usize::MAX` pins the view to the bottom.
pub fn render_output_pane(
    frame: &mut Frame,
    area: Rect,
    transcript: &str,
    prompt: Option<PendingPrompt<'_>>,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = pane_block(" Output ", is_focused);

    if transcript.is_empty() && prompt.is_none() {
        let paragraph = Paragraph::new("(no output)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let block = block.padding(Padding::new(1, 0, 0, 0));
    let mut all_items: Vec<ListItem> = if transcript.is_empty() {
        Vec::new()
    } else {
        transcript
            .split('\n')
            .map(|line| ListItem::new(line).style(Style::default().fg(DEFAULT_THEME.fg)))
            .collect()
    };

    if let Some(pending) = prompt {
        all_items.push(ListItem::new(Line::from(vec![
            Span::styled(
                pending.prompt,
                Style::default()
                    .fg(DEFAULT_THEME.secondary)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(pending.buffer, Style::default().fg(DEFAULT_THEME.fg)),
            Span::styled("▏", Style::default().fg(DEFAULT_THEME.secondary)),
        ])));
    }

    let visible_height = area.height.saturating_sub(2).max(1) as usize;
    *scroll_offset = clamp_scroll(*scroll_offset, all_items.len(), visible_height);

    let visible_items: Vec<ListItem> = all_items
        .into_iter()
        .skip(*scroll_offset)
        .take(visible_height)
        .collect();

    frame.render_widget(List::new(visible_items).block(block), area);
}
