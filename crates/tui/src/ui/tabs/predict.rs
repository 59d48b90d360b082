//! Store-item sales forecast tab.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};

use super::field_style;
use crate::app::{App, InputMode, PredictField};

/// Draw the Predict tab.
pub fn draw_predict_tab(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // Date
            Constraint::Length(3),  // Store ID
            Constraint::Length(3),  // Item ID
            Constraint::Min(5),     // Result
        ])
        .split(area);

    let editing = app.input_mode == InputMode::Editing;
    for (field, chunk) in PredictField::all().iter().zip(chunks.iter()) {
        let focused = *field == app.predict.focus;
        let value = app.predict.field(*field);
        let title = if focused {
            format!(" > {} ", field.label())
        } else {
            format!(" {} ", field.label())
        };

        let input = Paragraph::new(value)
            .style(field_style(focused && editing))
            .block(Block::default().borders(Borders::ALL).title(title));
        frame.render_widget(input, *chunk);

        if focused && editing {
            frame.set_cursor_position((
                chunk.x + 1 + value.chars().count() as u16,
                chunk.y + 1,
            ));
        }
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" /sales/stores/items/ ");
    let result = if let Some(error) = &app.predict.error {
        Paragraph::new(format!("Error: {error}")).style(Style::default().fg(Color::Red))
    } else if let Some(prediction) = &app.predict.result {
        let json = serde_json::to_string_pretty(prediction).unwrap_or_default();
        Paragraph::new(json).style(Style::default().fg(Color::Green))
    } else {
        Paragraph::new("Fill in every field, then press [p] to predict")
            .style(Style::default().fg(Color::DarkGray))
    };
    frame.render_widget(result.wrap(Wrap { trim: true }).block(block), chunks[3]);
}
