//! Daily production bar chart.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::{Bar, BarChart, BarGroup},
    Frame,
};

use super::{panel, Theme};
use crate::data::format::format_count;
use crate::data::DailyProductionPoint;

/// Render one bar per day, sized to fit the available width.
pub fn render(frame: &mut Frame, area: Rect, points: &[DailyProductionPoint], theme: &Theme) {
    let bars: Vec<Bar> = points
        .iter()
        .map(|p| {
            Bar::default()
                .value(p.output)
                .label(Line::from(p.day.clone()))
                .text_value(format_count(p.output))
                .style(Style::default().fg(theme.success))
                .value_style(
                    Style::default()
                        .fg(theme.background)
                        .bg(theme.success)
                        .add_modifier(Modifier::BOLD),
                )
        })
        .collect();

    let inner_width = area.width.saturating_sub(2);
    let count = points.len().max(1) as u16;
    let bar_width = (inner_width / count).saturating_sub(1).clamp(1, 9);

    let chart = BarChart::default()
        .block(panel(" Daily Production ".to_string(), theme))
        .style(theme.base())
        .bar_width(bar_width)
        .bar_gap(1)
        .label_style(theme.muted_style())
        .data(BarGroup::default().bars(&bars));

    frame.render_widget(chart, area);
}
