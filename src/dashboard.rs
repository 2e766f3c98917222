//! Dashboard view model.
//!
//! [`render`] turns a [`Dataset`] into a [`DashboardView`]: every string,
//! series and bin the page shows, computed from scratch. It touches no
//! terminal state, so it can be tested and serialized on its own; the
//! [`ui`](crate::ui) module only paints what it returns.

use serde::Serialize;

use crate::data::{histogram, Alert, Bin, Dataset};
use crate::export::{build_csv, DEFAULT_FILE_NAME};

/// Heading shown at the top of the page.
pub const TITLE: &str = "Microplastic Detection Sensor Dashboard (Simulated Data)";

/// Extra room above and below the concentration series.
const Y_PADDING: f64 = 10.0;

/// Number of histogram bins for particle sizes.
const PARTICLE_SIZE_BINS: usize = histogram::DEFAULT_BINS;

/// Everything the page displays for one dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub title: String,
    pub kpis: KpiRow,
    pub concentration: LineChartView,
    pub particle_sizes: HistogramView,
    pub table: TableView,
    pub download: DownloadView,
}

/// Headline metrics for the latest reading.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KpiRow {
    pub heading: String,
    pub metrics: Vec<Kpi>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Kpi {
    pub label: String,
    pub value: String,
    /// Set for the status metric so it can be colored.
    pub alert: Option<Alert>,
}

/// Concentration over time, one marked point per reading.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineChartView {
    pub heading: String,
    pub title: String,
    /// (minutes since first reading, concentration)
    pub points: Vec<(f64, f64)>,
    pub alerts: Vec<Alert>,
    pub x_bounds: [f64; 2],
    pub y_bounds: [f64; 2],
    pub x_labels: Vec<String>,
    pub y_labels: Vec<String>,
}

/// Particle-size distribution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramView {
    pub heading: String,
    pub title: String,
    pub bins: Vec<Bin>,
}

/// Full reading table including the derived alert column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableView {
    pub heading: String,
    pub columns: Vec<String>,
    pub rows: Vec<TableRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRow {
    pub timestamp: String,
    pub concentration: String,
    pub particle_size: String,
    pub alert: Alert,
}

/// The CSV download control.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DownloadView {
    pub label: String,
    pub file_name: String,
    /// CSV payload written when the control is activated.
    pub content: String,
}

/// Build the view model with the default download file name.
pub fn render(dataset: &Dataset) -> DashboardView {
    render_with_file_name(dataset, DEFAULT_FILE_NAME)
}

/// Build the view model, offering the CSV under `file_name`.
pub fn render_with_file_name(dataset: &Dataset, file_name: &str) -> DashboardView {
    DashboardView {
        title: TITLE.to_string(),
        kpis: kpi_row(dataset),
        concentration: concentration_chart(dataset),
        particle_sizes: particle_size_histogram(dataset),
        table: reading_table(dataset),
        download: DownloadView {
            label: "Download Data as CSV".to_string(),
            file_name: file_name.to_string(),
            content: build_csv(dataset),
        },
    }
}

fn kpi_row(dataset: &Dataset) -> KpiRow {
    let (concentration, particle_size, status, alert) = match dataset.latest() {
        Some((reading, alert)) => (
            reading.concentration.to_string(),
            format!("{:.2}", reading.particle_size),
            alert.badge().to_string(),
            Some(alert),
        ),
        None => ("-".to_string(), "-".to_string(), "-".to_string(), None),
    };

    KpiRow {
        heading: "Current Reading (Latest)".to_string(),
        metrics: vec![
            Kpi {
                label: "Concentration (particles/L)".to_string(),
                value: concentration,
                alert: None,
            },
            Kpi {
                label: "Avg Particle Size (mm)".to_string(),
                value: particle_size,
                alert: None,
            },
            Kpi {
                label: "Status".to_string(),
                value: status,
                alert,
            },
        ],
    }
}

fn concentration_chart(dataset: &Dataset) -> LineChartView {
    let readings = dataset.readings();
    let points: Vec<(f64, f64)> = match readings.first() {
        Some(first) => readings
            .iter()
            .map(|r| {
                let minutes = (r.timestamp - first.timestamp).num_milliseconds() as f64 / 60_000.0;
                (minutes, r.concentration as f64)
            })
            .collect(),
        None => Vec::new(),
    };

    let x_max = points.last().map_or(1.0, |p| p.0.max(1.0));
    let y_min = points.iter().map(|p| p.1).fold(f64::INFINITY, f64::min);
    let y_max = points.iter().map(|p| p.1).fold(f64::NEG_INFINITY, f64::max);
    let y_bounds = if points.is_empty() {
        [0.0, 1.0]
    } else {
        [(y_min - Y_PADDING).max(0.0), y_max + Y_PADDING]
    };

    let x_labels = match (readings.first(), readings.last()) {
        (Some(first), Some(last)) => {
            let middle = &readings[readings.len() / 2];
            vec![
                first.timestamp.format("%H:%M").to_string(),
                middle.timestamp.format("%H:%M").to_string(),
                last.timestamp.format("%H:%M").to_string(),
            ]
        }
        _ => Vec::new(),
    };
    let y_labels = vec![
        format!("{:.0}", y_bounds[0]),
        format!("{:.0}", (y_bounds[0] + y_bounds[1]) / 2.0),
        format!("{:.0}", y_bounds[1]),
    ];

    LineChartView {
        heading: "Concentration Over Time".to_string(),
        title: "Microplastic Concentration Over Time".to_string(),
        points,
        alerts: dataset.alerts().to_vec(),
        x_bounds: [0.0, x_max],
        y_bounds,
        x_labels,
        y_labels,
    }
}

fn particle_size_histogram(dataset: &Dataset) -> HistogramView {
    let sizes: Vec<f64> = dataset.readings().iter().map(|r| r.particle_size).collect();
    HistogramView {
        heading: "Particle Size Distribution".to_string(),
        title: "Particle Size Distribution".to_string(),
        bins: histogram(&sizes, PARTICLE_SIZE_BINS),
    }
}

fn reading_table(dataset: &Dataset) -> TableView {
    let mut rows = Vec::with_capacity(dataset.len());
    for (reading, alert) in dataset.iter() {
        rows.push(TableRow {
            timestamp: reading.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
            concentration: reading.concentration.to_string(),
            particle_size: format!("{:.2}", reading.particle_size),
            alert,
        });
    }

    TableView {
        heading: "All Readings with Alerts".to_string(),
        columns: ["timestamp", "concentration", "particle_size", "Alert"]
            .iter()
            .map(|c| c.to_string())
            .collect(),
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{AlertThresholds, Reading};
    use chrono::{Duration, NaiveDate};

    fn dataset(concentrations: &[u32]) -> Dataset {
        let start = NaiveDate::from_ymd_opt(2025, 2, 10)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();
        let readings = concentrations
            .iter()
            .enumerate()
            .map(|(i, &c)| Reading {
                timestamp: start + Duration::minutes(i as i64),
                concentration: c,
                particle_size: 0.1 + 0.08 * i as f64,
            })
            .collect();
        Dataset::new(readings, &AlertThresholds::default())
    }

    #[test]
    fn test_kpis_show_latest_reading() {
        let view = render(&dataset(&[60, 110, 175]));
        let metrics = &view.kpis.metrics;
        assert_eq!(metrics.len(), 3);
        assert_eq!(metrics[0].value, "175");
        assert_eq!(metrics[1].value, "0.26");
        assert_eq!(metrics[2].alert, Some(Alert::High));
        assert_eq!(metrics[2].value, Alert::High.badge());
    }

    #[test]
    fn test_line_series_has_point_per_reading() {
        let view = render(&dataset(&[60, 110, 175, 90]));
        let chart = &view.concentration;
        assert_eq!(chart.points, vec![(0.0, 60.0), (1.0, 110.0), (2.0, 175.0), (3.0, 90.0)]);
        assert_eq!(chart.x_bounds, [0.0, 3.0]);
        assert_eq!(chart.y_bounds, [50.0, 185.0]);
        assert_eq!(chart.x_labels, vec!["08:00", "08:02", "08:03"]);
        assert_eq!(chart.alerts.len(), 4);
    }

    #[test]
    fn test_histogram_has_ten_bins() {
        let view = render(&dataset(&[60, 70, 80, 90, 100, 110, 120, 130, 140, 150]));
        assert_eq!(view.particle_sizes.bins.len(), 10);
        let total: u64 = view.particle_sizes.bins.iter().map(|b| b.count).sum();
        assert_eq!(total, 10);
    }

    #[test]
    fn test_table_includes_alert_column() {
        let view = render(&dataset(&[99, 100, 150]));
        assert_eq!(
            view.table.columns,
            vec!["timestamp", "concentration", "particle_size", "Alert"]
        );
        let alerts: Vec<Alert> = view.table.rows.iter().map(|r| r.alert).collect();
        assert_eq!(alerts, vec![Alert::Safe, Alert::Moderate, Alert::High]);
        assert_eq!(view.table.rows[0].timestamp, "2025-02-10 08:00:00");
    }

    #[test]
    fn test_download_uses_fixed_file_name() {
        let data = dataset(&[120]);
        let view = render(&data);
        assert_eq!(view.download.file_name, "microplastics.csv");
        assert_eq!(view.download.content, build_csv(&data));

        let custom = render_with_file_name(&data, "river.csv");
        assert_eq!(custom.download.file_name, "river.csv");
    }

    #[test]
    fn test_empty_dataset_renders_placeholders() {
        let view = render(&dataset(&[]));
        assert!(view.kpis.metrics.iter().all(|m| m.value == "-"));
        assert!(view.concentration.points.is_empty());
        assert!(view.particle_sizes.bins.is_empty());
        assert!(view.table.rows.is_empty());
    }

    #[test]
    fn test_render_is_pure() {
        let data = dataset(&[60, 130, 170]);
        assert_eq!(render(&data), render(&data));
    }

    #[test]
    fn test_view_serializes_to_json() {
        let view = render(&dataset(&[60, 130]));
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["title"], TITLE);
        assert_eq!(json["table"]["rows"][1]["alert"], "Moderate");
    }
}
