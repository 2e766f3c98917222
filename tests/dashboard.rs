//! End-to-end page loads: sensor to dataset to view to terminal buffer.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use ratatui::{backend::TestBackend, Terminal};

use microplastic_dashboard::config::{ExportConfig, GeneratorConfig};
use microplastic_dashboard::export::{build_csv, parse_csv, read_csv};
use microplastic_dashboard::ui::{self, Theme};
use microplastic_dashboard::{
    render, Alert, AlertThresholds, App, CsvFileSource, Dataset, SimulatedSensor,
};

fn noon() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 6, 1)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

/// Draw the app once and return the buffer as one string per row.
fn draw(app: &App, width: u16, height: u16) -> Vec<String> {
    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    terminal.draw(|frame| ui::draw(frame, app)).unwrap();

    let buffer = terminal.backend().buffer();
    buffer
        .content()
        .chunks(buffer.area.width as usize)
        .map(|row| row.iter().map(|cell| cell.symbol()).collect())
        .collect()
}

fn screen_contains(rows: &[String], needle: &str) -> bool {
    rows.iter().any(|row| row.contains(needle))
}

#[test]
fn constant_moderate_concentration_flags_every_reading() {
    let config = GeneratorConfig {
        concentration_min: 120,
        concentration_max: 121,
        ..Default::default()
    };
    let mut sensor = SimulatedSensor::seeded(config, Some(3));
    let dataset = Dataset::new(sensor.generate(noon()).unwrap(), &AlertThresholds::default());

    assert_eq!(dataset.len(), 10);
    assert!(dataset.alerts().iter().all(|a| *a == Alert::Moderate));

    let view = render(&dataset);
    let status = &view.kpis.metrics[2];
    assert_eq!(status.alert, Some(Alert::Moderate));
    assert_eq!(status.value, Alert::Moderate.badge());
    assert_eq!(view.kpis.metrics[0].value, "120");
}

#[test]
fn seeded_page_loads_are_reproducible() {
    let sample = || {
        SimulatedSensor::seeded(GeneratorConfig::default(), Some(99))
            .generate(noon())
            .unwrap()
    };
    let first = sample();
    let second = sample();
    assert_eq!(first, second);

    let thresholds = AlertThresholds::default();
    assert_eq!(
        render(&Dataset::new(first, &thresholds)),
        render(&Dataset::new(second, &thresholds))
    );
}

#[test]
fn generated_readings_respect_ranges_and_spacing() {
    let mut sensor = SimulatedSensor::seeded(GeneratorConfig::default(), Some(11));
    let readings = sensor.generate(noon()).unwrap();

    assert_eq!(readings.len(), 10);
    assert_eq!(readings[0].timestamp, noon() - Duration::minutes(9));
    assert_eq!(readings[9].timestamp, noon());
    for pair in readings.windows(2) {
        assert_eq!(pair[1].timestamp - pair[0].timestamp, Duration::minutes(1));
    }
    for reading in &readings {
        assert!((50..200).contains(&reading.concentration));
        assert!(reading.particle_size >= 0.1 && reading.particle_size < 1.0);
        let hundredths = reading.particle_size * 100.0;
        assert!((hundredths - hundredths.round()).abs() < 1e-9);
    }
}

#[test]
fn csv_download_round_trips_ten_readings() {
    let mut sensor = SimulatedSensor::seeded(GeneratorConfig::default(), Some(5));
    let readings = sensor.generate(noon()).unwrap();
    let dataset = Dataset::new(readings.clone(), &AlertThresholds::default());

    let csv = build_csv(&dataset);
    assert!(csv.starts_with("timestamp,concentration,particle_size,Alert\n"));
    assert_eq!(csv.lines().count(), 11);

    let parsed = parse_csv(&csv).unwrap();
    assert_eq!(parsed, readings);

    let reparsed = Dataset::new(parsed, &AlertThresholds::default());
    assert_eq!(reparsed.alerts(), dataset.alerts());
}

#[test]
fn downloaded_file_replays_as_a_source() {
    let dir = tempfile::tempdir().unwrap();
    let export = ExportConfig {
        directory: Some(dir.path().to_path_buf()),
        ..Default::default()
    };

    let sensor = SimulatedSensor::seeded(GeneratorConfig::default(), Some(21));
    let mut app = App::new(
        Box::new(sensor),
        AlertThresholds::default(),
        export,
        Theme::dark(),
    );
    app.reload_at(noon()).unwrap();
    let path = app.download_csv().unwrap();
    assert_eq!(path.file_name().unwrap(), "microplastics.csv");

    let original = app.dataset.clone().unwrap();
    assert_eq!(read_csv(&path).unwrap(), original.readings());

    let mut replay = App::new(
        Box::new(CsvFileSource::new(&path)),
        AlertThresholds::default(),
        ExportConfig::default(),
        Theme::dark(),
    );
    replay.reload().unwrap();
    assert_eq!(replay.dataset.unwrap(), original);
}

#[test]
fn page_draws_every_section() {
    let sensor = SimulatedSensor::seeded(GeneratorConfig::default(), Some(42));
    let mut app = App::new(
        Box::new(sensor),
        AlertThresholds::default(),
        ExportConfig::default(),
        Theme::dark(),
    );
    app.reload_at(noon()).unwrap();

    let rows = draw(&app, 120, 40);
    for needle in [
        "Microplastic Detection Sensor Dashboard (Simulated Data)",
        "Current Reading (Latest)",
        "Concentration (particles/L)",
        "Concentration Over Time",
        "Particle Size Distribution",
        "All Readings with Alerts",
        "Download Data as CSV",
        "microplastics.csv",
    ] {
        assert!(screen_contains(&rows, needle), "missing {needle:?}");
    }
    assert!(screen_contains(&rows, "2025-06-01 12:00:00"));
}

#[test]
fn small_terminal_shows_resize_notice() {
    let sensor = SimulatedSensor::seeded(GeneratorConfig::default(), Some(1));
    let mut app = App::new(
        Box::new(sensor),
        AlertThresholds::default(),
        ExportConfig::default(),
        Theme::dark(),
    );
    app.reload_at(noon()).unwrap();

    let rows = draw(&app, 50, 12);
    assert!(screen_contains(&rows, "Terminal too small: 50x12"));
    assert!(!screen_contains(&rows, "Download Data as CSV"));
}
