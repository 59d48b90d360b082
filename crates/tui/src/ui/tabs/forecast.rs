//! National sales forecast tab.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Row, Table, Wrap},
};

use super::field_style;
use crate::app::{App, InputMode};
use crate::widgets::{create_forecast_chart, forecast_points};

/// Draw the Forecast tab.
pub fn draw_forecast_tab(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // Date field
            Constraint::Min(10),    // Results
        ])
        .split(area);

    let editing = app.input_mode == InputMode::Editing;
    let input = Paragraph::new(app.forecast.date.as_str())
        .style(field_style(editing))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Enter date (YYYY-MM-DD) "),
        );
    frame.render_widget(input, chunks[0]);
    if editing {
        frame.set_cursor_position((
            chunks[0].x + 1 + app.forecast.date.chars().count() as u16,
            chunks[0].y + 1,
        ));
    }

    if let Some(error) = &app.forecast.error {
        let text = Paragraph::new(format!("Error: {error}"))
            .wrap(Wrap { trim: true })
            .style(Style::default().fg(Color::Red))
            .block(Block::default().borders(Borders::ALL).title(" /sales/national/ "));
        frame.render_widget(text, chunks[1]);
        return;
    }

    let Some(result) = &app.forecast.result else {
        let placeholder = Paragraph::new(format!(
            "Press [f] to forecast the next {} days from this date",
            app.service.forecaster().horizon()
        ))
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::ALL).title(" /sales/national/ "));
        frame.render_widget(placeholder, chunks[1]);
        return;
    };

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(28),      // Table
            Constraint::Min(30),         // Chart
            Constraint::Percentage(30),  // JSON
        ])
        .split(chunks[1]);

    let rows: Vec<Row> = result
        .points()
        .iter()
        .map(|p| Row::new(vec![p.label(), format!("{:.2}", p.value)]))
        .collect();
    let table = Table::new(rows, [Constraint::Length(12), Constraint::Min(10)])
        .header(
            Row::new(vec!["Date", "Sales"]).style(Style::default().add_modifier(Modifier::BOLD)),
        )
        .block(Block::default().borders(Borders::ALL).title(" Forecast "));
    frame.render_widget(table, columns[0]);

    let points = forecast_points(result);
    frame.render_widget(create_forecast_chart(&points, result), columns[1]);

    let json = serde_json::to_string_pretty(result).unwrap_or_default();
    let json = Paragraph::new(json)
        .style(Style::default().fg(Color::Green))
        .block(Block::default().borders(Borders::ALL).title(" JSON "));
    frame.render_widget(json, columns[2]);
}
