//! Detail overlay rendering.
//!
//! Displays a modal overlay with the selected line's figures and the recent
//! events that mention it.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
    Frame,
};

use crate::app::App;
use crate::data::duration::format_shift_clock;
use crate::data::format::{format_average, format_count, format_percent};
use crate::data::{Event, ProductionLine, Snapshot};

/// Minimum width required for the detail overlay to render properly.
const MIN_OVERLAY_WIDTH: u16 = 50;
/// Minimum height required for the detail overlay to render properly.
const MIN_OVERLAY_HEIGHT: u16 = 14;

/// Share of the plant's cumulative output produced by `line`, in percent.
pub fn plant_share(snapshot: &Snapshot, line: &ProductionLine) -> f64 {
    let total = snapshot.summary().total;
    if total == 0 {
        0.0
    } else {
        line.total as f64 / total as f64 * 100.0
    }
}

/// Events whose message refers to the given line number, newest first.
pub fn events_for_line(events: &[Event], number: u32) -> Vec<&Event> {
    let needle = format!("line {}", number);
    events
        .iter()
        .filter(|e| {
            let message = e.message.to_lowercase();
            message
                .match_indices(&needle)
                .any(|(i, _)| !message[i + needle.len()..].starts_with(|c: char| c.is_ascii_digit()))
        })
        .collect()
}

/// Render the line detail as a modal overlay.
pub fn render_overlay(frame: &mut Frame, app: &App, area: Rect) {
    // Skip rendering if terminal is too small for the overlay
    if area.width < MIN_OVERLAY_WIDTH || area.height < MIN_OVERLAY_HEIGHT {
        return;
    }

    let Some(ref data) = app.data else {
        return;
    };
    let Some(line) = app.selected() else {
        return;
    };
    let theme = &app.theme;

    // Width: 70% of screen, clamped to [MIN_OVERLAY_WIDTH, 90]
    let overlay_width = (area.width * 70 / 100).clamp(MIN_OVERLAY_WIDTH, 90);
    // Height: 70% of screen, clamped to [MIN_OVERLAY_HEIGHT, 30]
    let overlay_height = (area.height * 70 / 100).clamp(MIN_OVERLAY_HEIGHT, 30);

    let x = area.x + (area.width.saturating_sub(overlay_width)) / 2;
    let y = area.y + (area.height.saturating_sub(overlay_height)) / 2;
    let overlay_area = Rect::new(x, y, overlay_width, overlay_height);

    // Clear the area behind the overlay
    frame.render_widget(Clear, overlay_area);

    let chunks = Layout::vertical([
        Constraint::Length(9), // Figures
        Constraint::Min(3),    // Events
        Constraint::Length(1), // Footer
    ])
    .split(overlay_area);

    // ===== FIGURES =====
    let bold = Style::default().fg(theme.foreground).add_modifier(Modifier::BOLD);
    let label = theme.muted_style();
    let figures = vec![
        Line::from(vec![
            Span::styled(format!(" Line {} ", line.number), bold),
            Span::styled(
                format!("● {}", line.status.label()),
                theme.status_style(line.status).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled(" Total output     ", label),
            Span::styled(format_count(line.total), bold),
            Span::styled(
                format!("  ({} of plant)", format_percent(plant_share(data, line))),
                label,
            ),
        ]),
        Line::from(vec![
            Span::styled(" Weekly average   ", label),
            Span::styled(format_average(line.weekly_average), bold),
        ]),
        Line::from(vec![
            Span::styled(" Scrap            ", label),
            Span::styled(line.scrap.to_string(), bold),
            Span::styled(
                format!("  (avg {})", format_average(line.scrap_average)),
                label,
            ),
        ]),
        Line::from(vec![
            Span::styled(" Scrap rate       ", label),
            Span::styled(
                format_percent(line.scrap_rate()),
                theme.status_style(line.status),
            ),
        ]),
    ];

    let header_block = Block::default()
        .title(" Line Detail ")
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(Style::default().fg(theme.primary))
        .style(theme.base());
    frame.render_widget(Paragraph::new(figures).block(header_block), chunks[0]);

    // ===== EVENTS =====
    let related = events_for_line(&data.events, line.number);
    let items: Vec<ListItem> = if related.is_empty() {
        vec![ListItem::new(Span::styled(" No recent events", label))]
    } else {
        related
            .iter()
            .map(|e| {
                ListItem::new(Line::from(vec![
                    Span::styled(format!(" {} ", format_shift_clock(e.at_ms)), label),
                    Span::styled(
                        format!("{:<4} ", e.severity.tag()),
                        theme.severity_style(e.severity),
                    ),
                    Span::raw(e.message.clone()),
                ]))
            })
            .collect()
    };

    let events_block = Block::default()
        .title(" Recent Events ")
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(theme.border_style())
        .style(theme.base());
    frame.render_widget(List::new(items).block(events_block), chunks[1]);

    // ===== FOOTER =====
    let footer = Paragraph::new(" ←/→:switch line  Esc:close ")
        .style(theme.base().add_modifier(Modifier::DIM));
    frame.render_widget(footer, chunks[2]);
}
