//! Reading table rendering.
//!
//! Displays every reading of the page, oldest first, with the derived
//! alert column.

use ratatui::{
    layout::{Constraint, Rect},
    style::Style,
    widgets::{Block, Borders, Cell, Row, Table, TableState},
    Frame,
};

use crate::app::App;
use crate::dashboard::TableView;

/// Render the full reading table with the selected row highlighted.
pub fn render(frame: &mut Frame, app: &App, view: &TableView, area: Rect) {
    let header = Row::new(view.columns.iter().map(|c| Cell::from(c.clone())))
        .height(1)
        .style(app.theme.header);

    let rows: Vec<Row> = view
        .rows
        .iter()
        .map(|row| {
            Row::new(vec![
                Cell::from(row.timestamp.clone()),
                Cell::from(row.concentration.clone()),
                Cell::from(row.particle_size.clone()),
                Cell::from(row.alert.badge()).style(app.theme.alert_style(row.alert)),
            ])
        })
        .collect();

    let widths = [
        Constraint::Fill(3), // timestamp
        Constraint::Fill(2), // concentration
        Constraint::Fill(2), // particle_size
        Constraint::Min(12), // Alert
    ];

    let selected = app.selected_row.min(view.rows.len().saturating_sub(1));

    // Show scroll position if there are rows
    let position_info = if !view.rows.is_empty() {
        format!(" [{}/{}]", selected + 1, view.rows.len())
    } else {
        String::new()
    };
    let title = format!(" {}{} ", view.heading, position_info);

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_type(app.theme.border_type)
                .border_style(Style::default().fg(app.theme.border)),
        )
        .row_highlight_style(app.theme.selected)
        .highlight_symbol("▶ ");

    let mut state = TableState::default();
    if !view.rows.is_empty() {
        state.select(Some(selected));
    }

    frame.render_stateful_widget(table, area, &mut state);
}
