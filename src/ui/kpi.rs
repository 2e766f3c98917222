//! "Current Reading" headline metrics.

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::dashboard::KpiRow;

/// Render the KPI row: one centered label/value cell per metric.
pub fn render(frame: &mut Frame, app: &App, kpis: &KpiRow, area: Rect) {
    let block = Block::default()
        .title(format!(" {} ", kpis.heading))
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if kpis.metrics.is_empty() {
        return;
    }

    let cells =
        Layout::horizontal(kpis.metrics.iter().map(|_| Constraint::Fill(1))).split(inner);

    for (metric, cell) in kpis.metrics.iter().zip(cells.iter()) {
        let value_style = match metric.alert {
            Some(alert) => app.theme.alert_style(alert).add_modifier(Modifier::BOLD),
            None => Style::default().add_modifier(Modifier::BOLD),
        };
        let lines = vec![
            Line::from(Span::styled(
                metric.label.clone(),
                Style::default().add_modifier(Modifier::DIM),
            )),
            Line::from(Span::styled(metric.value.clone(), value_style)),
        ];
        frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), *cell);
    }
}
