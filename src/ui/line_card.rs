//! Production line card.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::{Accent, Theme};
use crate::data::format::{format_average, format_count, format_percent};
use crate::data::ProductionLine;

/// Width of the label column inside a card.
const LABEL_WIDTH: usize = 12;

/// Render one line's figures. `selected` highlights the card border.
pub fn render(
    frame: &mut Frame,
    area: Rect,
    line: &ProductionLine,
    accent: Accent,
    selected: bool,
    theme: &Theme,
) {
    let accent_color = theme.accent(accent);
    let title = format!(" {} Line {} ", accent.glyph(), line.number);

    let block = Block::default()
        .title(Span::styled(
            title,
            Style::default().fg(accent_color).add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(if selected {
            theme.selected
        } else {
            theme.border_style()
        })
        .style(theme.base());

    let value = Style::default().fg(theme.foreground).add_modifier(Modifier::BOLD);
    let row = |label: &str, text: String, style: Style| {
        Line::from(vec![
            Span::styled(
                format!(" {:<width$}", label, width = LABEL_WIDTH),
                theme.muted_style(),
            ),
            Span::styled(text, style),
        ])
    };

    let lines = vec![
        row("Total", format_count(line.total), value.fg(accent_color)),
        row("Weekly avg", format_average(line.weekly_average), value),
        row("Scrap", line.scrap.to_string(), value),
        row("Scrap avg", format_average(line.scrap_average), value),
        row("Scrap rate", format_percent(line.scrap_rate()), value),
        row(
            "Status",
            format!("● {}", line.status.label()),
            theme.status_style(line.status),
        ),
    ];

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
