//! Tab-specific UI modules.

mod about;
mod forecast;
mod health;
mod predict;

pub use about::draw_about_tab;
pub use forecast::draw_forecast_tab;
pub use health::draw_health_tab;
pub use predict::draw_predict_tab;

use ratatui::prelude::*;

/// Style for a form field, highlighted while it receives input.
fn field_style(active: bool) -> Style {
    if active {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::White)
    }
}
