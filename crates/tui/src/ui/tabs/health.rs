//! Health check tab.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Row, Table},
};
use sales_api::{Regressor, WELCOME_MESSAGE};

use crate::app::App;

/// Draw the Health tab.
pub fn draw_health_tab(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),  // Status
            Constraint::Min(5),     // Loaded models
        ])
        .split(area);

    let status_line = match &app.server_notice {
        Some(notice) => Line::from(notice.as_str()).style(Style::default().fg(Color::Red)),
        None => Line::from("Status: 200 OK").style(Style::default().fg(Color::Green)),
    };
    let status = Paragraph::new(vec![status_line, Line::from(WELCOME_MESSAGE)])
    .block(Block::default().borders(Borders::ALL).title(" /health/ "));
    frame.render_widget(status, chunks[0]);

    let forecaster = app.service.forecaster();
    let predictor = app.service.predictor();
    let rows = vec![
        model_row("National forecast", forecaster.model().as_ref()),
        model_row("Store/item prediction", predictor.model().as_ref()),
        Row::new(vec![
            "Forecast horizon".to_string(),
            format!("{} days", forecaster.horizon()),
            String::new(),
        ]),
    ];

    let table = Table::new(
        rows,
        [
            Constraint::Length(24),
            Constraint::Length(16),
            Constraint::Min(10),
        ],
    )
    .header(
        Row::new(vec!["Model", "Kind", "Features"])
            .style(Style::default().add_modifier(Modifier::BOLD)),
    )
    .block(Block::default().borders(Borders::ALL).title(" Loaded Models "));

    frame.render_widget(table, chunks[1]);
}

fn model_row(name: &str, model: &dyn Regressor) -> Row<'static> {
    Row::new(vec![
        name.to_string(),
        model.kind().to_string(),
        model.feature_names().join(", "),
    ])
}
