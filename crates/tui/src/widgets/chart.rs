//! Chart widget for forecast visualization.

use ratatui::{
    prelude::*,
    symbols::Marker,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
};
use sales_api::ForecastResult;

/// Chart coordinates for a forecast, one point per day.
pub fn forecast_points(result: &ForecastResult) -> Vec<(f64, f64)> {
    result
        .values()
        .into_iter()
        .enumerate()
        .map(|(i, v)| (i as f64, v))
        .collect()
}

/// Create a line chart of a forecast; `points` comes from [`forecast_points`].
pub fn create_forecast_chart<'a>(points: &'a [(f64, f64)], result: &ForecastResult) -> Chart<'a> {
    let dataset = Dataset::default()
        .name("Forecast")
        .marker(Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Yellow))
        .data(points);

    let (y_min, y_max) = value_bounds(points);
    let x_max = (points.len().saturating_sub(1) as f64).max(1.0);

    let labels = result.labels();
    let first = labels.first().cloned().unwrap_or_default();
    let last = labels.last().cloned().unwrap_or_default();

    Chart::new(vec![dataset])
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {}-day national forecast ", result.len())),
        )
        .x_axis(
            Axis::default()
                .title("Date")
                .style(Style::default().fg(Color::Gray))
                .bounds([0.0, x_max])
                .labels(vec![Span::raw(first), Span::raw(last)]),
        )
        .y_axis(
            Axis::default()
                .title("Sales")
                .style(Style::default().fg(Color::Gray))
                .bounds([y_min, y_max])
                .labels(vec![
                    Span::raw(format!("{:.1}", y_min)),
                    Span::raw(format!("{:.1}", (y_min + y_max) / 2.0)),
                    Span::raw(format!("{:.1}", y_max)),
                ]),
        )
}

/// Y bounds padded by 5% of the range, or of the value for a flat line.
fn value_bounds(points: &[(f64, f64)]) -> (f64, f64) {
    let min = points.iter().map(|p| p.1).fold(f64::INFINITY, f64::min);
    let max = points.iter().map(|p| p.1).fold(f64::NEG_INFINITY, f64::max);
    if !min.is_finite() || !max.is_finite() {
        return (0.0, 1.0);
    }

    let span = max - min;
    let pad = if span > 0.0 {
        span * 0.05
    } else {
        (max.abs() * 0.05).max(1.0)
    };
    (min - pad, max + pad)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_forecast_points_are_indexed() {
        let mut result = ForecastResult::new();
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        result.push(start, 10.0);
        result.push(start.succ_opt().unwrap(), 12.5);

        assert_eq!(forecast_points(&result), vec![(0.0, 10.0), (1.0, 12.5)]);
    }

    #[test]
    fn test_value_bounds() {
        assert_eq!(value_bounds(&[]), (0.0, 1.0));
        assert_eq!(value_bounds(&[(0.0, 5.0), (1.0, 5.0)]), (4.0, 6.0));

        let (lo, hi) = value_bounds(&[(0.0, 100.0), (1.0, 200.0)]);
        assert_eq!((lo, hi), (95.0, 205.0));
    }
}
