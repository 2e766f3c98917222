//! Terminal UI rendering using ratatui.
//!
//! The page is painted from the [`DashboardView`](crate::dashboard::DashboardView)
//! held by the [`App`]; no module here computes data of its own.
//!
//! ## Submodules
//!
//! - [`common`]: Title bar, download control, status bar and help overlay
//! - [`kpi`]: "Current Reading" headline metrics
//! - [`charts`]: Concentration line chart and particle-size histogram
//! - [`table`]: Full reading table with the alert column
//! - [`theme`]: Light/dark theme support with terminal auto-detection
//!
//! ## Page Layout
//!
//! ```text
//! ┌──────────────────────────────────────┐
//! │ Title (common::render_title)         │
//! ├──────────────────────────────────────┤
//! │ Current Reading KPIs (kpi::render)   │
//! ├──────────────────┬───────────────────┤
//! │ Concentration    │ Particle Size     │
//! │ line chart       │ histogram         │
//! ├──────────────────┴───────────────────┤
//! │ All Readings table (table::render)   │
//! ├──────────────────────────────────────┤
//! │ Download control                     │
//! │ Status bar                           │
//! └──────────────────────────────────────┘
//!         ↑
//!    Overlay rendered on top: common::render_help
//! ```

pub mod charts;
pub mod common;
pub mod kpi;
pub mod table;
pub mod theme;

pub use theme::Theme;

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::Style,
    widgets::Paragraph,
    Frame,
};

use crate::app::App;

/// Minimum terminal width for a usable page.
pub const MIN_WIDTH: u16 = 60;
/// Minimum terminal height for a usable page.
pub const MIN_HEIGHT: u16 = 20;

/// Tallest the table is allowed to grow (borders and header included).
const MAX_TABLE_HEIGHT: u16 = 14;

/// Paint the whole page for the current app state.
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Check for minimum terminal size
    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        let msg = format!(
            "Terminal too small: {}x{}\nMinimum: {}x{}\n\nResize to continue",
            area.width, area.height, MIN_WIDTH, MIN_HEIGHT
        );
        let paragraph = Paragraph::new(msg)
            .alignment(Alignment::Center)
            .style(Style::default().fg(app.theme.moderate));
        let top = (area.height / 2).saturating_sub(2);
        let centered = Rect::new(area.x, area.y + top, area.width, 5.min(area.height));
        frame.render_widget(paragraph, centered);
        return;
    }

    let table_height = (app.row_count() as u16 + 3).min(MAX_TABLE_HEIGHT);

    let chunks = Layout::vertical([
        Constraint::Length(1),            // Title
        Constraint::Length(4),            // KPIs
        Constraint::Min(8),               // Charts
        Constraint::Length(table_height), // Table
        Constraint::Length(1),            // Download control
        Constraint::Length(1),            // Status bar
    ])
    .split(area);

    common::render_title(frame, app, chunks[0]);

    if let Some(ref view) = app.view {
        kpi::render(frame, app, &view.kpis, chunks[1]);

        let chart_chunks =
            Layout::horizontal([Constraint::Fill(3), Constraint::Fill(2)]).split(chunks[2]);
        charts::render_concentration(frame, app, &view.concentration, chart_chunks[0]);
        charts::render_histogram(frame, app, &view.particle_sizes, chart_chunks[1]);

        table::render(frame, app, &view.table, chunks[3]);
        common::render_download(frame, app, &view.download, chunks[4]);
    }

    common::render_status_bar(frame, app, chunks[5]);

    if app.show_help {
        common::render_help(frame, app, area);
    }
}
