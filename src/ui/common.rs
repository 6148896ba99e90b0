//! Common UI components shared across the dashboard.
//!
//! This module contains the header bar, status bar, and help overlay.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::App;
use crate::data::duration::format_shift_clock;
use crate::data::LineStatus;

/// Render the header bar with plant status overview.
///
/// Displays: status indicator, title, tick counter, theme indicator.
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let title = Span::styled(
        " OPERATIONS DASHBOARD ",
        Style::default().fg(theme.primary).add_modifier(Modifier::BOLD),
    );
    let theme_indicator = if app.dark_mode { "☾ dark" } else { "☀ light" };

    let Some(ref data) = app.data else {
        let line = Line::from(vec![title, Span::raw("│ Loading...")]);
        frame.render_widget(Paragraph::new(line).style(theme.base()), area);
        return;
    };

    // Overall status indicator
    let worst = data.worst_status().unwrap_or(LineStatus::Running);
    let (running, attention, critical) =
        data.lines
            .iter()
            .fold((0, 0, 0), |(r, a, c), line| match line.status {
                LineStatus::Running => (r + 1, a, c),
                LineStatus::Attention => (r, a + 1, c),
                LineStatus::Critical => (r, a, c + 1),
            });

    let line = Line::from(vec![
        Span::styled(" ● ", theme.status_style(worst)),
        title,
        Span::styled("│ Real-time production monitoring │ ", theme.muted_style()),
        Span::styled(format!("{}", running), Style::default().fg(theme.success)),
        Span::raw(" running "),
        Span::styled(format!("{}", attention), Style::default().fg(theme.warning)),
        Span::raw(" attention "),
        Span::styled(
            format!("{}", critical),
            Style::default().fg(theme.critical).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" critical │ "),
        Span::raw(format!("tick #{} │ ", data.sequence)),
        Span::styled(theme_indicator, theme.muted_style()),
    ]);

    frame.render_widget(Paragraph::new(line).style(theme.base()), area);
}

/// Render the status bar at the bottom.
///
/// Shows: source description, simulated shift clock, time since last update,
/// available controls. Also displays temporary status messages and errors.
pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;

    // Check for temporary status message first
    if let Some(msg) = app.get_status_message() {
        let paragraph = Paragraph::new(format!(" {} ", msg))
            .style(theme.base().fg(theme.primary));
        frame.render_widget(paragraph, area);
        return;
    }

    let status = if let Some(ref err) = app.load_error {
        format!(" Error: {} | q:quit r:retry", err)
    } else if let Some(ref data) = app.data {
        let updated = app
            .last_update
            .map(|t| format!("{:.1}s ago", t.elapsed().as_secs_f64()))
            .unwrap_or_else(|| "-".to_string());
        format!(
            " {} | Shift {} | Updated {} | ←/→:line Enter:detail t:theme e:export ?:help q:quit",
            app.source_description(),
            format_shift_clock(data.elapsed_ms),
            updated,
        )
    } else {
        " Loading... | q:quit".to_string()
    };

    let paragraph = Paragraph::new(status).style(theme.base().add_modifier(Modifier::DIM));
    frame.render_widget(paragraph, area);
}

/// Render the help overlay with keyboard shortcuts.
///
/// Displayed as a centered modal on top of the dashboard.
pub fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let help_text = vec![
        Line::from(vec![Span::styled("Keyboard Shortcuts", theme.header)]),
        Line::from(""),
        Line::from(vec![Span::styled(" Lines", bold)]),
        Line::from("  ←/→ h/l     Select line"),
        Line::from("  1-9         Jump to line"),
        Line::from("  Enter       Line detail"),
        Line::from("  Esc         Close overlay"),
        Line::from(""),
        Line::from(vec![Span::styled(" General", bold)]),
        Line::from("  t           Toggle dark/light"),
        Line::from("  r           Poll source now"),
        Line::from("  e           Export to JSON"),
        Line::from("  q           Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(Style::default().fg(theme.primary))
        .style(theme.base());

    let paragraph = Paragraph::new(help_text).block(block);

    // Center the help overlay - responsive to terminal size
    let help_width = 38u16.min(area.width.saturating_sub(4));
    let help_height = 17u16.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(help_width)) / 2;
    let y = area.y + (area.height.saturating_sub(help_height)) / 2;
    let help_area = Rect::new(x, y, help_width, help_height);

    // Clear the area behind the help
    frame.render_widget(Clear, help_area);
    frame.render_widget(paragraph, help_area);
}
