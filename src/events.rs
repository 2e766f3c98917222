//! Keyboard and mouse handling.

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, MouseEvent, MouseEventKind};
use tracing::{debug, warn};

use crate::app::App;

/// Poll for events with a timeout
pub fn poll_event(timeout: Duration) -> Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Handle a key event
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    // Some terminals report releases too; act on presses only.
    if key.kind == KeyEventKind::Release {
        return;
    }
    debug!(code = ?key.code, "key");

    // If help is shown, any key closes it
    if app.show_help {
        app.show_help = false;
        return;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.quit(),

        // Table navigation
        KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::PageUp => app.select_prev_n(10),
        KeyCode::PageDown => app.select_next_n(10),
        KeyCode::Home => app.select_first(),
        KeyCode::End => app.select_last(),

        // Re-run the page
        KeyCode::Char('r') => {
            if app.reload().is_ok() {
                app.set_status_message(format!("Page reloaded (#{})", app.page_loads));
            }
        }

        // Download
        KeyCode::Char('d') | KeyCode::Char('e') => download(app),

        // Help
        KeyCode::Char('?') => app.toggle_help(),

        _ => {}
    }
}

fn download(app: &mut App) {
    match app.download_csv() {
        Ok(path) => {
            app.set_status_message(format!("Saved {}", path.display()));
        }
        Err(e) => {
            warn!("download failed: {e:#}");
            app.set_status_message(format!("Download failed: {e:#}"));
        }
    }
}

/// Handle mouse events
pub fn handle_mouse_event(app: &mut App, mouse: MouseEvent) {
    match mouse.kind {
        MouseEventKind::ScrollUp => app.select_prev(),
        MouseEventKind::ScrollDown => app.select_next(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ExportConfig, GeneratorConfig};
    use crate::data::AlertThresholds;
    use crate::source::SimulatedSensor;
    use crate::ui::Theme;
    use crossterm::event::{KeyModifiers, MouseEvent};

    fn app(export: ExportConfig) -> App {
        let source = Box::new(SimulatedSensor::seeded(GeneratorConfig::default(), Some(2)));
        let mut app = App::new(source, AlertThresholds::default(), export, Theme::dark());
        app.reload().unwrap();
        app
    }

    fn press(app: &mut App, code: KeyCode) {
        handle_key_event(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn test_quit_keys() {
        let mut a = app(ExportConfig::default());
        press(&mut a, KeyCode::Char('q'));
        assert!(!a.running);

        let mut b = app(ExportConfig::default());
        press(&mut b, KeyCode::Esc);
        assert!(!b.running);
    }

    #[test]
    fn test_help_swallows_next_key() {
        let mut a = app(ExportConfig::default());
        press(&mut a, KeyCode::Char('?'));
        assert!(a.show_help);
        press(&mut a, KeyCode::Char('q'));
        assert!(!a.show_help);
        assert!(a.running);
    }

    #[test]
    fn test_reload_key_runs_page_load() {
        let mut a = app(ExportConfig::default());
        press(&mut a, KeyCode::Char('r'));
        assert_eq!(a.page_loads, 2);
        assert_eq!(a.get_status_message(), Some("Page reloaded (#2)"));
    }

    #[test]
    fn test_navigation_keys() {
        let mut a = app(ExportConfig::default());
        press(&mut a, KeyCode::Down);
        press(&mut a, KeyCode::Char('j'));
        assert_eq!(a.selected_row, 2);
        press(&mut a, KeyCode::End);
        assert_eq!(a.selected_row, 9);
        press(&mut a, KeyCode::Char('k'));
        assert_eq!(a.selected_row, 8);
        press(&mut a, KeyCode::Home);
        assert_eq!(a.selected_row, 0);
    }

    #[test]
    fn test_download_key_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut a = app(ExportConfig {
            directory: Some(dir.path().to_path_buf()),
            ..Default::default()
        });
        press(&mut a, KeyCode::Char('d'));
        assert!(dir.path().join("microplastics.csv").exists());
        assert!(a.get_status_message().unwrap().starts_with("Saved"));
    }

    #[test]
    fn test_download_failure_reported() {
        let mut a = app(ExportConfig {
            directory: Some("/nonexistent/export/dir".into()),
            ..Default::default()
        });
        press(&mut a, KeyCode::Char('e'));
        assert!(a.get_status_message().unwrap().starts_with("Download failed"));
    }

    #[test]
    fn test_mouse_scroll_moves_selection() {
        let mut a = app(ExportConfig::default());
        let scroll = |kind| MouseEvent {
            kind,
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        };
        handle_mouse_event(&mut a, scroll(MouseEventKind::ScrollDown));
        assert_eq!(a.selected_row, 1);
        handle_mouse_event(&mut a, scroll(MouseEventKind::ScrollUp));
        assert_eq!(a.selected_row, 0);
    }
}
