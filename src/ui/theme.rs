//! Theme configuration for the TUI.
//!
//! Supports light and dark themes with automatic terminal detection.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::block::BorderType;

use crate::config::ThemeChoice;
use crate::data::Alert;

/// Color and style theme for the TUI.
///
/// Use [`Theme::auto_detect()`] for automatic theme selection based on
/// terminal background, or [`Theme::dark()`]/[`Theme::light()`] explicitly.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Accent color for highlights, titles and the download control.
    pub highlight: Color,
    /// Color for safe readings.
    pub safe: Color,
    /// Color for moderate readings.
    pub moderate: Color,
    /// Color for high readings.
    pub high: Color,
    /// Color for borders and separators.
    pub border: Color,
    /// Line color of the concentration series.
    pub series: Color,
    /// Bar color of the histogram.
    pub bars: Color,
    /// Style for header rows in tables.
    pub header: Style,
    /// Style for selected/highlighted rows.
    pub selected: Style,
    /// Border style (rounded, plain, etc.).
    pub border_type: BorderType,
}

impl Theme {
    /// Create a dark theme suitable for dark terminal backgrounds.
    pub fn dark() -> Self {
        Self {
            highlight: Color::Cyan,
            safe: Color::Green,
            moderate: Color::Yellow,
            high: Color::Red,
            border: Color::Gray,
            series: Color::LightBlue,
            bars: Color::Magenta,
            header: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            selected: Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD),
            border_type: BorderType::Rounded,
        }
    }

    /// Create a light theme suitable for light terminal backgrounds.
    pub fn light() -> Self {
        Self {
            highlight: Color::Blue,
            safe: Color::Green,
            moderate: Color::Yellow,
            high: Color::Red,
            border: Color::DarkGray,
            series: Color::Blue,
            bars: Color::Magenta,
            header: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            selected: Style::default().bg(Color::LightBlue).add_modifier(Modifier::BOLD),
            border_type: BorderType::Rounded,
        }
    }

    /// Auto-detect based on terminal background
    pub fn auto_detect() -> Self {
        // Use terminal-light crate to detect background luminance
        match terminal_light::luma() {
            Ok(luma) if luma > 0.5 => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Resolve a configured theme choice.
    pub fn from_choice(choice: ThemeChoice) -> Self {
        match choice {
            ThemeChoice::Auto => Self::auto_detect(),
            ThemeChoice::Dark => Self::dark(),
            ThemeChoice::Light => Self::light(),
        }
    }

    /// Foreground color for an alert level.
    pub fn alert_color(&self, alert: Alert) -> Color {
        match alert {
            Alert::Safe => self.safe,
            Alert::Moderate => self.moderate,
            Alert::High => self.high,
        }
    }

    /// Get style for an alert level
    pub fn alert_style(&self, alert: Alert) -> Style {
        match alert {
            Alert::Safe | Alert::Moderate => Style::default().fg(self.alert_color(alert)),
            Alert::High => Style::default()
                .fg(self.alert_color(alert))
                .add_modifier(Modifier::BOLD),
        }
    }
}
