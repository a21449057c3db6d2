//! Status bar rendering with keybindings and state indicators

use crate::interpreter::Heading;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Right-hand state badge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunIndicator {
    Playing,
    Paused,
    Input,
    Finished,
    Faulted,
}

impl RunIndicator {
    fn label(self) -> &'static str {
        match self {
            RunIndicator::Playing => " ▶ PLAYING ",
            RunIndicator::Paused => " ⏸ PAUSED ",
            RunIndicator::Input => " ⌨ INPUT ",
            RunIndicator::Finished => " END ",
            RunIndicator::Faulted => " FAULT ",
        }
    }

    fn color(self) -> Color {
        match self {
            RunIndicator::Playing | RunIndicator::Input => DEFAULT_THEME.secondary,
            RunIndicator::Paused => DEFAULT_THEME.primary,
            RunIndicator::Finished => DEFAULT_THEME.success,
            RunIndicator::Faulted => DEFAULT_THEME.error,
        }
    }
}

pub struct StatusRenderData<'a> {
    pub message: &'a str,
    pub steps: u64,
    pub heading: Heading,
    pub string_mode: bool,
    pub indicator: RunIndicator,
}

/// Render the status bar at the bottom.
pub fn render_status_bar(frame: &mut Frame, area: Rect, data: StatusRenderData<'_>) {
    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let is_fault = data.indicator == RunIndicator::Faulted;
    let bar_style = Style::default().bg(DEFAULT_THEME.status_bg);
    let sep_style = bar_style.fg(DEFAULT_THEME.comment);

    let mut left_spans = vec![
        Span::styled(
            format!(" Step {} ", data.steps),
            Style::default()
                .bg(data.indicator.color())
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!(" {} ", data.heading.arrow()), bar_style.fg(DEFAULT_THEME.fg)),
    ];
    if data.string_mode {
        left_spans.push(Span::styled(
            "\"STR\"",
            bar_style.fg(DEFAULT_THEME.string).add_modifier(Modifier::BOLD),
        ));
    }
    left_spans.push(Span::styled(" | ", sep_style));
    left_spans.push(Span::styled(
        format!(" {} ", data.message),
        bar_style.fg(if is_fault {
            DEFAULT_THEME.error
        } else {
            DEFAULT_THEME.fg
        }),
    ));

    let left_paragraph = Paragraph::new(Line::from(left_spans))
        .style(bar_style)
        .alignment(Alignment::Left);
    frame.render_widget(left_paragraph, layout[0]);

    let key_style = Style::default().bg(DEFAULT_THEME.comment).fg(Color::Black);
    let desc_style = bar_style.fg(DEFAULT_THEME.fg);

    let right_spans = vec![
        Span::styled(" → ", key_style),
        Span::styled(" step ", desc_style),
        Span::styled("│", sep_style),
        Span::styled(" ", desc_style),
        Span::styled(" ⎵ ", key_style),
        Span::styled(" play ", desc_style),
        Span::styled("│", sep_style),
        Span::styled(" ", desc_style),
        Span::styled("q", key_style),
        Span::styled(" quit ", desc_style),
        Span::styled("│", sep_style),
        Span::styled(
            data.indicator.label(),
            Style::default()
                .bg(data.indicator.color())
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ),
    ];

    let right_paragraph = Paragraph::new(Line::from(right_spans))
        .style(bar_style)
        .alignment(Alignment::Right);
    frame.render_widget(right_paragraph, layout[1]);
}
