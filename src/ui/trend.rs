//! Hourly production trend chart.

use ratatui::{
    layout::Rect,
    style::Style,
    symbols::Marker,
    text::Span,
    widgets::{Axis, Chart, Dataset, GraphType, LegendPosition},
    Frame,
};

use super::{panel, Theme};
use crate::data::TrendPoint;

/// Headroom added above and below the plotted range.
const Y_PADDING: f64 = 5.0;

/// Y-axis bounds covering every actual and target value, padded.
pub fn y_bounds(points: &[TrendPoint]) -> [f64; 2] {
    let (min, max) = points
        .iter()
        .flat_map(|p| [p.actual, p.target])
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });

    if min.is_finite() && max.is_finite() {
        [(min - Y_PADDING).max(0.0), max + Y_PADDING]
    } else {
        [0.0, 1.0]
    }
}

/// Render actual output against target for each hour.
pub fn render(frame: &mut Frame, area: Rect, points: &[TrendPoint], theme: &Theme) {
    let actual: Vec<(f64, f64)> = points
        .iter()
        .enumerate()
        .map(|(i, p)| (i as f64, p.actual))
        .collect();
    let target: Vec<(f64, f64)> = points
        .iter()
        .enumerate()
        .map(|(i, p)| (i as f64, p.target))
        .collect();

    let datasets = vec![
        Dataset::default()
            .name("Actual")
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(theme.primary))
            .data(&actual),
        Dataset::default()
            .name("Target")
            .marker(Marker::Dot)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(theme.muted))
            .data(&target),
    ];

    let x_max = points.len().saturating_sub(1).max(1) as f64;
    let x_labels: Vec<Span> = match (points.first(), points.get(points.len() / 2), points.last()) {
        (Some(first), Some(mid), Some(last)) => vec![
            Span::raw(first.label.clone()),
            Span::raw(mid.label.clone()),
            Span::raw(last.label.clone()),
        ],
        _ => Vec::new(),
    };

    let [y_min, y_max] = y_bounds(points);
    let y_labels = vec![
        Span::raw(format!("{:.0}", y_min)),
        Span::raw(format!("{:.0}", (y_min + y_max) / 2.0)),
        Span::raw(format!("{:.0}", y_max)),
    ];

    let chart = Chart::new(datasets)
        .block(panel(" Production Trend ".to_string(), theme))
        .style(theme.base())
        .legend_position(Some(LegendPosition::TopRight))
        .x_axis(
            Axis::default()
                .style(theme.muted_style())
                .bounds([0.0, x_max])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .style(theme.muted_style())
                .bounds([y_min, y_max])
                .labels(y_labels),
        );

    frame.render_widget(chart, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::testing;

    fn point(label: &str, actual: f64) -> TrendPoint {
        TrendPoint {
            label: label.to_string(),
            actual,
            target: 100.0,
        }
    }

    #[test]
    fn test_y_bounds_cover_series_and_target() {
        let points = vec![point("08:00", 82.0), point("09:00", 117.0)];
        assert_eq!(y_bounds(&points), [77.0, 122.0]);
    }

    #[test]
    fn test_y_bounds_empty_series() {
        assert_eq!(y_bounds(&[]), [0.0, 1.0]);
    }

    #[test]
    fn test_chart_renders_labels() {
        let snapshot = testing::snapshot();
        let theme = Theme::dark();
        let buffer = testing::render(80, 24, |f| {
            let area = f.area();
            render(f, area, &snapshot.trend, &theme);
        });
        let text = testing::text(&buffer);

        assert!(text.contains("Production Trend"));
        assert!(text.contains("19:00"));
        assert!(text.contains("Actual"));
        assert!(text.contains("Target"));
    }
}
