//! Application state and page-load logic.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use chrono::{Local, NaiveDateTime};
use tracing::{info, warn};

use crate::config::ExportConfig;
use crate::dashboard::{self, DashboardView};
use crate::data::{AlertThresholds, Dataset};
use crate::export;
use crate::source::ReadingSource;
use crate::ui::Theme;

/// How long a status message stays visible.
const STATUS_MESSAGE_TTL: Duration = Duration::from_secs(3);

/// Main application state.
///
/// Each page load pulls fresh readings from the source, classifies them and
/// rebuilds the [`DashboardView`]; nothing else survives between loads.
pub struct App {
    pub running: bool,
    pub show_help: bool,

    // Data source
    source: Box<dyn ReadingSource>,
    pub thresholds: AlertThresholds,
    pub dataset: Option<Dataset>,
    pub view: Option<DashboardView>,
    pub load_error: Option<String>,
    pub last_loaded: Option<Instant>,
    pub page_loads: u64,

    // Download target
    pub export: ExportConfig,

    // Table selection
    pub selected_row: usize,

    // UI
    pub theme: Theme,

    // Status message (temporary feedback)
    pub status_message: Option<(String, Instant)>,
}

impl App {
    /// Create a new App. No data is loaded until [`App::reload`] is called.
    pub fn new(
        source: Box<dyn ReadingSource>,
        thresholds: AlertThresholds,
        export: ExportConfig,
        theme: Theme,
    ) -> Self {
        Self {
            running: true,
            show_help: false,
            source,
            thresholds,
            dataset: None,
            view: None,
            load_error: None,
            last_loaded: None,
            page_loads: 0,
            export,
            selected_row: 0,
            theme,
            status_message: None,
        }
    }

    /// Returns a description of the current reading source.
    pub fn source_description(&self) -> &str {
        self.source.description()
    }

    /// Set a temporary status message that will be shown for a few seconds.
    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some((message, Instant::now()));
    }

    /// Get the current status message if it hasn't expired.
    pub fn get_status_message(&self) -> Option<&str> {
        if let Some((msg, time)) = &self.status_message {
            if time.elapsed() < STATUS_MESSAGE_TTL {
                return Some(msg);
            }
        }
        None
    }

    /// Run a page load against the current local time.
    pub fn reload(&mut self) -> Result<()> {
        self.reload_at(Local::now().naive_local())
    }

    /// Run a page load: read, classify and render from scratch.
    ///
    /// On failure the previous page stays on screen and the error is kept
    /// in `load_error` for the status bar.
    pub fn reload_at(&mut self, now: NaiveDateTime) -> Result<()> {
        let readings = match self.source.load(now) {
            Ok(readings) => readings,
            Err(err) => {
                warn!(source = self.source.description(), "page load failed: {err:#}");
                self.load_error = Some(format!("{err:#}"));
                return Err(err);
            }
        };

        let dataset = Dataset::new(readings, &self.thresholds);
        let (safe, moderate, high) = dataset.alert_counts();
        let view = dashboard::render_with_file_name(&dataset, &self.export.file_name);

        self.page_loads += 1;
        info!(
            source = self.source.description(),
            readings = dataset.len(),
            safe,
            moderate,
            high,
            page = self.page_loads,
            "page loaded"
        );

        self.selected_row = self.selected_row.min(dataset.len().saturating_sub(1));
        self.dataset = Some(dataset);
        self.view = Some(view);
        self.load_error = None;
        self.last_loaded = Some(Instant::now());
        Ok(())
    }

    /// Write the current page's CSV to the download target.
    pub fn download_csv(&self) -> Result<PathBuf> {
        let Some(ref view) = self.view else {
            anyhow::bail!("No data to export");
        };

        let path = self.export.target_path();
        export::write_csv(&path, &view.download.content)
            .with_context(|| format!("downloading {}", view.download.file_name))?;
        info!(path = %path.display(), bytes = view.download.content.len(), "csv downloaded");
        Ok(path)
    }

    /// Number of rows in the current table.
    pub fn row_count(&self) -> usize {
        self.view.as_ref().map_or(0, |v| v.table.rows.len())
    }

    /// Move selection down by one row.
    pub fn select_next(&mut self) {
        self.select_next_n(1);
    }

    /// Move selection up by one row.
    pub fn select_prev(&mut self) {
        self.select_prev_n(1);
    }

    /// Move selection down by n rows.
    pub fn select_next_n(&mut self, n: usize) {
        let max = self.row_count().saturating_sub(1);
        self.selected_row = (self.selected_row + n).min(max);
    }

    /// Move selection up by n rows.
    pub fn select_prev_n(&mut self, n: usize) {
        self.selected_row = self.selected_row.saturating_sub(n);
    }

    /// Jump to the oldest reading.
    pub fn select_first(&mut self) {
        self.selected_row = 0;
    }

    /// Jump to the latest reading.
    pub fn select_last(&mut self) {
        self.selected_row = self.row_count().saturating_sub(1);
    }

    /// Toggle the help overlay.
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Signal the application to quit.
    pub fn quit(&mut self) {
        self.running = false;
    }
}
