//! Shared helpers for pane rendering

use crate::ui::theme::DEFAULT_THEME;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Borders};

/// Bordered block with the focus-dependent border color
pub(crate) fn pane_block(title: &str, is_focused: bool) -> Block<'_> {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style)
}

/// Printable rendering of a stack value as a character, if it has one
pub(crate) fn display_char(value: i64) -> Option<char> {
    u32::try_from(value)
        .ok()
        .and_then(char::from_u32)
        .filter(|c| !c.is_control())
}

/// Clamp `offset` so that a window of `visible` rows over `total` rows stays in range
pub(crate) fn clamp_scroll(offset: usize, total: usize, visible: usize) -> usize {
    if total > visible {
        offset.min(total - visible)
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_char() {
        assert_eq!(display_char(72), Some('H'));
        assert_eq!(display_char(10), None);
        assert_eq!(display_char(-3), None);
        assert_eq!(display_char(0xD800), None);
    }

    #[test]
    fn test_clamp_scroll() {
        assert_eq!(clamp_scroll(usize::MAX, 10, 4), 6);
        assert_eq!(clamp_scroll(3, 2, 4), 0);
        assert_eq!(clamp_scroll(1, 10, 4), 1);
    }
}
