//! Plant-wide production summary card.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::{panel, Theme};
use crate::data::format::{format_average, format_count, format_percent};
use crate::data::ProductionSummary;

/// Render totals summed over every line.
pub fn render(frame: &mut Frame, area: Rect, summary: &ProductionSummary, theme: &Theme) {
    let big = Style::default().fg(theme.primary).add_modifier(Modifier::BOLD);
    let value = Style::default().fg(theme.foreground).add_modifier(Modifier::BOLD);
    let label = theme.muted_style();

    let lines = vec![
        Line::from(Span::styled(" Total output", label)),
        Line::from(Span::styled(format!(" {}", format_count(summary.total)), big)),
        Line::from(""),
        Line::from(vec![
            Span::styled(" Weekly avg   ", label),
            Span::styled(format_average(summary.weekly_average), value),
        ]),
        Line::from(vec![
            Span::styled(" Scrap        ", label),
            Span::styled(summary.scrap.to_string(), value),
        ]),
        Line::from(vec![
            Span::styled(" Scrap avg    ", label),
            Span::styled(format_average(summary.scrap_average), value),
        ]),
        Line::from(vec![
            Span::styled(" Scrap rate   ", label),
            Span::styled(format_percent(summary.scrap_rate()), value),
        ]),
    ];

    let paragraph = Paragraph::new(lines).block(panel(" Production Summary ".to_string(), theme));
    frame.render_widget(paragraph, area);
}
