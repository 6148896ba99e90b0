//! Responsive dashboard grid and whole-frame composition.

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    widgets::{Block, Paragraph},
    Frame,
};

use super::{common, daily, detail, distribution, feed, line_card, summary, trend, Accent};
use crate::app::App;

/// Terminal width at or above which the three-column layout is used.
pub const WIDE_MIN_WIDTH: u16 = 120;
/// Minimum terminal size for a usable display.
pub const MIN_WIDTH: u16 = 80;
pub const MIN_HEIGHT: u16 = 24;

/// Height of a line card: six rows plus borders.
const CARD_HEIGHT: u16 = 8;

/// Screen regions for every panel of the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardLayout {
    pub header: Rect,
    /// One card per production line, left to right.
    pub lines: Vec<Rect>,
    pub trend: Rect,
    pub daily: Rect,
    pub summary: Rect,
    pub distribution: Rect,
    pub events: Rect,
    pub status: Rect,
}

impl DashboardLayout {
    /// Split `area` into panels for `line_count` cards.
    ///
    /// Wide terminals put trend, daily output and summary side by side with
    /// distribution and events below; narrower ones move the summary down
    /// next to distribution and events.
    pub fn compute(area: Rect, line_count: usize) -> Self {
        let [header, cards, middle, bottom, status] = Layout::vertical([
            Constraint::Length(1),           // Header bar
            Constraint::Length(CARD_HEIGHT), // Line cards
            Constraint::Fill(3),             // Charts
            Constraint::Fill(2),             // Breakdown and events
            Constraint::Length(1),           // Status bar
        ])
        .areas(area);

        let lines = if line_count == 0 {
            Vec::new()
        } else {
            let count = line_count as u32;
            Layout::horizontal((0..count).map(|_| Constraint::Ratio(1, count)))
                .split(cards)
                .to_vec()
        };

        if area.width >= WIDE_MIN_WIDTH {
            let [trend, daily, summary] = Layout::horizontal([
                Constraint::Percentage(45),
                Constraint::Percentage(30),
                Constraint::Fill(1),
            ])
            .areas(middle);
            let [distribution, events] =
                Layout::horizontal([Constraint::Percentage(45), Constraint::Fill(1)])
                    .areas(bottom);

            Self {
                header,
                lines,
                trend,
                daily,
                summary,
                distribution,
                events,
                status,
            }
        } else {
            let [trend, daily] =
                Layout::horizontal([Constraint::Percentage(60), Constraint::Fill(1)])
                    .areas(middle);
            let [summary, distribution, events] = Layout::horizontal([
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
            ])
            .areas(bottom);

            Self {
                header,
                lines,
                trend,
                daily,
                summary,
                distribution,
                events,
                status,
            }
        }
    }
}

/// Draw the whole dashboard, including any open overlays.
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let theme = &app.theme;

    frame.render_widget(Block::default().style(theme.base()), area);

    // Check for minimum terminal size
    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        let msg = format!(
            "Terminal too small: {}x{}\nMinimum: {}x{}\n\nResize to continue",
            area.width, area.height, MIN_WIDTH, MIN_HEIGHT
        );
        let paragraph = Paragraph::new(msg)
            .alignment(Alignment::Center)
            .style(theme.base().fg(theme.warning));
        let top = area.height.saturating_sub(5) / 2;
        let centered = Rect::new(area.x, area.y + top, area.width, 5.min(area.height));
        frame.render_widget(paragraph, centered);
        return;
    }

    let line_count = app.data.as_ref().map_or(0, |d| d.lines.len());
    let layout = DashboardLayout::compute(area, line_count);

    common::render_header(frame, app, layout.header);

    if let Some(ref data) = app.data {
        for (i, (line, rect)) in data.lines.iter().zip(&layout.lines).enumerate() {
            line_card::render(
                frame,
                *rect,
                line,
                Accent::for_index(i),
                i == app.selected_line,
                theme,
            );
        }
        trend::render(frame, layout.trend, &data.trend, theme);
        daily::render(frame, layout.daily, &data.daily, theme);
        summary::render(frame, layout.summary, &data.summary(), theme);
        distribution::render(frame, layout.distribution, &data.distribution, theme);
        feed::render(frame, layout.events, &data.events, theme);
    }

    common::render_status_bar(frame, app, layout.status);

    // Render detail overlay if active
    if app.show_detail_overlay {
        detail::render_overlay(frame, app, area);
    }

    // Render help overlay if active
    if app.show_help {
        common::render_help(frame, app, area);
    }
}
