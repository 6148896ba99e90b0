//! Production share per category.

use ratatui::{
    layout::{Direction, Rect},
    style::Style,
    text::Line,
    widgets::{Bar, BarChart, BarGroup},
    Frame,
};

use super::{Accent, Theme};
use crate::data::DistributionSlice;

pub fn render(frame: &mut Frame, area: Rect, slices: &[DistributionSlice], theme: &Theme) {
    let bars: Vec<Bar> = slices
        .iter()
        .enumerate()
        .map(|(i, slice)| {
            let color = theme.accent(Accent::for_index(i));
            Bar::default()
                .value(u64::from(slice.share))
                .label(Line::from(slice.label.clone()))
                .text_value(format!("{}%", slice.share))
                .style(Style::default().fg(color))
                .value_style(Style::default().fg(theme.background).bg(color))
        })
        .collect();

    let chart = BarChart::default()
        .block(super::panel(" Distribution ".to_string(), theme))
        .style(theme.base())
        .direction(Direction::Horizontal)
        .bar_width(1)
        .bar_gap(1)
        .max(100)
        .label_style(theme.muted_style())
        .data(BarGroup::default().bars(&bars));

    frame.render_widget(chart, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::testing;

    #[test]
    fn test_renders_categories_with_percentages() {
        let slices = vec![
            DistributionSlice {
                label: "Housings".to_string(),
                share: 60,
            },
            DistributionSlice {
                label: "Panels".to_string(),
                share: 40,
            },
        ];
        let theme = Theme::dark();
        let buffer = testing::render(50, 8, |f| {
            let area = f.area();
            render(f, area, &slices, &theme);
        });
        let text = testing::text(&buffer);

        assert!(text.contains("Distribution"));
        assert!(text.contains("Housings"));
        assert!(text.contains("Panels"));
        assert!(text.contains("60%"));
    }
}
