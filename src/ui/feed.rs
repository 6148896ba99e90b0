//! Event feed panel.

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{List, ListItem},
    Frame,
};

use super::{panel, Theme};
use crate::data::duration::format_shift_clock;
use crate::data::Event;

/// Render events in the order given (the source keeps them newest first).
///
/// Rows that do not fit are dropped from the bottom, i.e. the oldest go first.
pub fn render(frame: &mut Frame, area: Rect, events: &[Event], theme: &Theme) {
    let items: Vec<ListItem> = events
        .iter()
        .map(|event| {
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!(" {} ", format_shift_clock(event.at_ms)),
                    theme.muted_style(),
                ),
                Span::styled(
                    format!("{:<4} ", event.severity.tag()),
                    theme.severity_style(event.severity),
                ),
                Span::raw(event.message.clone()),
            ]))
        })
        .collect();

    let title = format!(" Events ({}) ", events.len());
    let list = List::new(items).block(panel(title, theme)).style(theme.base());
    frame.render_widget(list, area);
}
