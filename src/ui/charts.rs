//! Concentration line chart and particle-size histogram.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, Dataset as ChartDataset, GraphType,
        Paragraph,
    },
    Frame,
};

use crate::app::App;
use crate::dashboard::{HistogramView, LineChartView};
use crate::data::Alert;

fn chart_block<'a>(app: &App, heading: &str) -> Block<'a> {
    Block::default()
        .title(format!(" {heading} "))
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border))
}

/// Render concentration over time as a line with a marker at each reading.
///
/// Markers are colored by the reading's alert level.
pub fn render_concentration(frame: &mut Frame, app: &App, view: &LineChartView, area: Rect) {
    let block = chart_block(app, &view.heading);

    if view.points.is_empty() {
        frame.render_widget(Paragraph::new(" No readings").block(block), area);
        return;
    }

    // One scatter series per alert level so markers carry the alert color
    let levels = [Alert::Safe, Alert::Moderate, Alert::High];
    let markers: Vec<(Alert, Vec<(f64, f64)>)> = levels
        .iter()
        .map(|&level| {
            let points = view
                .points
                .iter()
                .zip(&view.alerts)
                .filter(|(_, alert)| **alert == level)
                .map(|(point, _)| *point)
                .collect();
            (level, points)
        })
        .collect();

    let mut datasets = vec![ChartDataset::default()
        .name("concentration")
        .marker(Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(app.theme.series))
        .data(&view.points)];
    for (level, points) in &markers {
        if points.is_empty() {
            continue;
        }
        datasets.push(
            ChartDataset::default()
                .name(level.label())
                .marker(Marker::Dot)
                .graph_type(GraphType::Scatter)
                .style(app.theme.alert_style(*level))
                .data(points),
        );
    }

    let axis_style = Style::default().fg(app.theme.border);
    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .title("time")
                .style(axis_style)
                .bounds(view.x_bounds)
                .labels(view.x_labels.clone()),
        )
        .y_axis(
            Axis::default()
                .title("particles/L")
                .style(axis_style)
                .bounds(view.y_bounds)
                .labels(view.y_labels.clone()),
        );

    frame.render_widget(chart, area);
}

/// Render the particle-size distribution as a bar per bin.
pub fn render_histogram(frame: &mut Frame, app: &App, view: &HistogramView, area: Rect) {
    let block = chart_block(app, &view.heading).title_bottom(Line::from(Span::styled(
        " particle_size (mm) ",
        Style::default().fg(app.theme.border),
    )));

    if view.bins.is_empty() {
        frame.render_widget(Paragraph::new(" No readings").block(block), area);
        return;
    }

    let bars: Vec<Bar> = view
        .bins
        .iter()
        .map(|bin| {
            Bar::default()
                .value(bin.count)
                .label(Line::from(bin.label()))
                .text_value(bin.count.to_string())
        })
        .collect();

    let bar_gap = 1u16;
    let inner_width = area.width.saturating_sub(2);
    let bar_width = (inner_width / view.bins.len() as u16)
        .saturating_sub(bar_gap)
        .max(1);

    let chart = BarChart::default()
        .block(block)
        .data(BarGroup::default().bars(&bars))
        .bar_width(bar_width)
        .bar_gap(bar_gap)
        .bar_style(Style::default().fg(app.theme.bars))
        .value_style(
            Style::default()
                .fg(app.theme.bars)
                .add_modifier(Modifier::REVERSED | Modifier::BOLD),
        )
        .label_style(Style::default().add_modifier(Modifier::DIM));

    frame.render_widget(chart, area);
}
