//! Common UI components.
//!
//! This module contains the title bar, download control, status bar, and
//! help overlay.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::App;
use crate::dashboard::{DownloadView, TITLE};
use crate::data::Alert;

/// Render the title bar with an alert summary for the page.
///
/// Displays: worst-status indicator, title, reading counts by alert.
pub fn render_title(frame: &mut Frame, app: &App, area: Rect) {
    let title = app.view.as_ref().map_or(TITLE, |v| v.title.as_str());

    let Some(ref dataset) = app.dataset else {
        let line = Line::from(vec![
            Span::styled(format!(" {title} "), Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("| Loading..."),
        ]);
        frame.render_widget(Paragraph::new(line), area);
        return;
    };

    let (safe, moderate, high) = dataset.alert_counts();
    let worst = dataset.alerts().iter().copied().max().unwrap_or(Alert::Safe);

    let count_span = |n: usize, alert: Alert| {
        if n > 0 {
            Span::styled(n.to_string(), app.theme.alert_style(alert))
        } else {
            Span::styled("0", Style::default().add_modifier(Modifier::DIM))
        }
    };

    let line = Line::from(vec![
        Span::styled(" ● ", app.theme.alert_style(worst)),
        Span::styled(format!("{title} "), Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("│ "),
        count_span(safe, Alert::Safe),
        Span::raw(" safe "),
        count_span(moderate, Alert::Moderate),
        Span::raw(" moderate "),
        count_span(high, Alert::High),
        Span::raw(" high"),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

/// Render the CSV download control.
pub fn render_download(frame: &mut Frame, app: &App, download: &DownloadView, area: Rect) {
    let line = Line::from(vec![
        Span::raw(" "),
        Span::styled(
            format!(" ⤓ {} ", download.label),
            Style::default()
                .fg(app.theme.highlight)
                .add_modifier(Modifier::REVERSED | Modifier::BOLD),
        ),
        Span::raw(format!(" {} ", download.file_name)),
        Span::styled("[d]", Style::default().add_modifier(Modifier::DIM)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

/// Render the status bar at the bottom.
///
/// Shows: source, time since last page load, available controls.
/// Also displays temporary status messages and errors.
pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    // Check for temporary status message first
    if let Some(msg) = app.get_status_message() {
        let paragraph =
            Paragraph::new(format!(" {} ", msg)).style(Style::default().fg(app.theme.highlight));
        frame.render_widget(paragraph, area);
        return;
    }

    let status = if let Some(ref err) = app.load_error {
        format!(" Error: {} | r:retry q:quit", err)
    } else if let Some(loaded) = app.last_loaded {
        format!(
            " {} | Loaded {:.1}s ago | ↑↓:select r:rerun d:download ?:help q:quit",
            app.source_description(),
            loaded.elapsed().as_secs_f64(),
        )
    } else {
        " Loading... | q:quit".to_string()
    };

    let paragraph = Paragraph::new(status).style(Style::default().add_modifier(Modifier::DIM));
    frame.render_widget(paragraph, area);
}

/// Render the help overlay with keyboard shortcuts.
///
/// Displayed as a centered modal on top of the page.
pub fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let help_text = vec![
        Line::from(vec![Span::styled("Keyboard Shortcuts", app.theme.header)]),
        Line::from(""),
        Line::from(vec![Span::styled(
            " Table",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  ↑/↓ j/k     Select reading"),
        Line::from("  PgUp/PgDn   Jump 10 readings"),
        Line::from("  Home/End    Oldest/latest"),
        Line::from(""),
        Line::from(vec![Span::styled(
            " Page",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  r           Re-run (new readings)"),
        Line::from("  d / e       Download CSV"),
        Line::from("  q / Esc     Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    let paragraph = Paragraph::new(help_text).block(block);

    // Center the help overlay - responsive to terminal size
    let help_width = 40u16.min(area.width.saturating_sub(4));
    let help_height = 17u16.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(help_width)) / 2;
    let y = area.y + (area.height.saturating_sub(help_height)) / 2;
    let help_area = Rect::new(x, y, help_width, help_height);

    // Clear the area behind the help
    frame.render_widget(Clear, help_area);
    frame.render_widget(paragraph, help_area);
}
