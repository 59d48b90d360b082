//! API description tab.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Row, Table, Wrap},
};
use sales_api::{objective, ENDPOINTS};

use crate::app::App;

/// Draw the About tab.
pub fn draw_about_tab(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),  // Objective
            Constraint::Min(6),     // Endpoints
        ])
        .split(area);

    let intro = Paragraph::new(objective(app.service.forecaster().horizon()))
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(Color::White))
        .block(Block::default().borders(Borders::ALL).title(" Project Objectives "));
    frame.render_widget(intro, chunks[0]);

    let rows: Vec<Row> = ENDPOINTS
        .iter()
        .map(|ep| Row::new(vec![ep.method, ep.path, ep.detail]))
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(8),
            Constraint::Length(22),
            Constraint::Min(20),
        ],
    )
    .header(
        Row::new(vec!["Method", "Path", "Description"])
            .style(Style::default().add_modifier(Modifier::BOLD)),
    )
    .block(Block::default().borders(Borders::ALL).title(" Endpoints "));

    frame.render_widget(table, chunks[1]);
}
