//! Terminal UI rendering using ratatui.
//!
//! Every panel is a pure render function: it borrows one slice of the current
//! [`Snapshot`](crate::data::Snapshot) plus the [`Theme`] and draws into the
//! area it is given. Panels never mutate what they are handed.
//!
//! ## Submodules
//!
//! - [`dashboard`]: Responsive grid layout and whole-frame composition
//! - [`line_card`]: Per-line throughput and scrap card
//! - [`trend`]: Hourly actual-vs-target line chart
//! - [`daily`]: Daily production bar chart
//! - [`distribution`]: Production share per category
//! - [`summary`]: Plant-wide totals card
//! - [`feed`]: Event feed, newest first
//! - [`detail`]: Modal overlay for the selected line
//! - [`common`]: Shared components (header, status bar, help overlay)
//! - [`theme`]: Light/dark palettes
//!
//! ## Rendering Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │ Header (common::render_header)               │
//! ├──────────────┬───────────────┬───────────────┤
//! │ line_card    │ line_card     │ line_card     │
//! ├──────────────┼───────────────┼───────────────┤
//! │ trend        │ daily         │ summary       │  (wide)
//! ├──────────────┴───────┬───────┴───────────────┤
//! │ distribution         │ feed                  │
//! ├──────────────────────┴───────────────────────┤
//! │ Status Bar (common::render_status_bar)       │
//! └──────────────────────────────────────────────┘
//!         ↑
//!    Overlays rendered on top:
//!    - detail::render_overlay
//!    - common::render_help
//! ```

pub mod common;
pub mod daily;
pub mod dashboard;
pub mod detail;
pub mod distribution;
pub mod feed;
pub mod line_card;
pub mod summary;
pub mod theme;
pub mod trend;

pub use theme::{Accent, Theme};

use ratatui::widgets::{Block, Borders};

/// Standard bordered panel block with a themed title.
pub(crate) fn panel<'a>(title: String, theme: &Theme) -> Block<'a> {
    Block::default()
        .title(ratatui::text::Span::styled(title, theme.header))
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(theme.border_style())
        .style(theme.base())
}
