//! Application state management for the dashboard.

use std::sync::mpsc::{Receiver, TryRecvError};
use std::sync::Arc;
use std::time::Instant;

use sales_api::{ForecastResult, PredictionResult, SalesService};

/// Main application state.
pub struct App {
    /// Current active tab
    pub current_tab: Tab,
    /// Whether the app should quit
    pub should_quit: bool,
    /// Current input mode
    pub input_mode: InputMode,
    /// Status message with expiry
    pub status_message: Option<(String, Instant)>,
    /// Loaded models shared with the HTTP server
    pub service: Arc<SalesService>,
    /// National forecast form and result
    pub forecast: ForecastPanel,
    /// Store/item form and result
    pub predict: PredictPanel,
    /// Last failure reported by the background API server
    pub server_notice: Option<String>,
    notices: Option<Receiver<String>>,
}

impl App {
    pub fn new(service: Arc<SalesService>) -> Self {
        Self {
            current_tab: Tab::default(),
            should_quit: false,
            input_mode: InputMode::Normal,
            status_message: None,
            service,
            forecast: ForecastPanel::new(chrono::Local::now().date_naive().to_string()),
            predict: PredictPanel::default(),
            server_notice: None,
            notices: None,
        }
    }

    /// Receive failures from a background API server.
    pub fn with_notices(mut self, notices: Receiver<String>) -> Self {
        self.notices = Some(notices);
        self
    }

    /// Drain pending server notices into the status line.
    pub fn poll_notices(&mut self) {
        let Some(notices) = &self.notices else {
            return;
        };

        let mut latest = None;
        let mut closed = false;
        loop {
            match notices.try_recv() {
                Ok(notice) => latest = Some(notice),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    closed = true;
                    break;
                }
            }
        }
        if closed {
            self.notices = None;
        }

        if let Some(notice) = latest {
            tracing::warn!("dashboard received server notice: {notice}");
            self.set_status(notice.clone());
            self.server_notice = Some(notice);
        }
    }

    /// Set a status message that will be displayed temporarily.
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some((message.into(), Instant::now()));
    }

    /// Clear expired status messages (older than 5 seconds).
    pub fn clear_expired_status(&mut self) {
        if let Some((_, instant)) = &self.status_message {
            if instant.elapsed().as_secs() > 5 {
                self.status_message = None;
            }
        }
    }

    /// Move to next tab.
    pub fn next_tab(&mut self) {
        self.current_tab = self.current_tab.next();
    }

    /// Move to previous tab.
    pub fn previous_tab(&mut self) {
        self.current_tab = self.current_tab.previous();
    }

    /// Jump to a specific tab by number (1-4).
    pub fn goto_tab(&mut self, num: u8) {
        self.current_tab = Tab::from_num(num);
    }

    /// Text field currently receiving keystrokes, if the tab has one.
    pub fn active_input(&mut self) -> Option<&mut String> {
        match self.current_tab {
            Tab::Forecast => Some(&mut self.forecast.date),
            Tab::Predict => Some(self.predict.field_mut(self.predict.focus)),
            Tab::About | Tab::Health => None,
        }
    }

    /// Run the national forecast for the date in the form.
    pub fn run_forecast(&mut self) {
        match self.service.forecast(&self.forecast.date) {
            Ok(result) => {
                self.set_status(format!("Forecast ready: {} days", result.len()));
                self.forecast.result = Some(result);
                self.forecast.error = None;
            }
            Err(err) => {
                tracing::warn!(code = err.code(), "dashboard forecast failed: {err}");
                self.set_status("Forecast failed");
                self.forecast.result = None;
                self.forecast.error = Some(err.to_string());
            }
        }
    }

    /// Run the store/item prediction once every field is filled in.
    pub fn run_prediction(&mut self) {
        if !self.predict.is_complete() {
            self.set_status("Fill in date, store id and item id first");
            return;
        }

        let form = &self.predict;
        match self.service.predict(&form.date, &form.store_id, &form.item_id) {
            Ok(prediction) => {
                self.predict.result = Some(prediction);
                self.predict.error = None;
                self.set_status("Prediction ready");
            }
            Err(err) => {
                tracing::warn!(code = err.code(), "dashboard prediction failed: {err}");
                self.predict.result = None;
                self.predict.error = Some(err.to_string());
                self.set_status("Prediction failed");
            }
        }
    }
}

/// Available tabs in the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    About,
    Health,
    Forecast,
    Predict,
}

impl Tab {
    pub fn next(self) -> Self {
        match self {
            Tab::About => Tab::Health,
            Tab::Health => Tab::Forecast,
            Tab::Forecast => Tab::Predict,
            Tab::Predict => Tab::About,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            Tab::About => Tab::Predict,
            Tab::Health => Tab::About,
            Tab::Forecast => Tab::Health,
            Tab::Predict => Tab::Forecast,
        }
    }

    pub fn from_num(num: u8) -> Self {
        match num {
            2 => Tab::Health,
            3 => Tab::Forecast,
            4 => Tab::Predict,
            _ => Tab::About,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Tab::About => 0,
            Tab::Health => 1,
            Tab::Forecast => 2,
            Tab::Predict => 3,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Tab::About => "API Description",
            Tab::Health => "Health Check",
            Tab::Forecast => "National Sales Forecast",
            Tab::Predict => "Store-Item Sales Forecast",
        }
    }

    pub fn all() -> &'static [Tab] {
        &[Tab::About, Tab::Health, Tab::Forecast, Tab::Predict]
    }
}

/// Input mode for the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    Editing,
}

/// National forecast form.
#[derive(Debug, Clone, Default)]
pub struct ForecastPanel {
    pub date: String,
    pub result: Option<ForecastResult>,
    pub error: Option<String>,
}

impl ForecastPanel {
    pub fn new(date: String) -> Self {
        Self {
            date,
            ..Self::default()
        }
    }
}

/// Store/item prediction form.
#[derive(Debug, Clone, Default)]
pub struct PredictPanel {
    pub date: String,
    pub store_id: String,
    pub item_id: String,
    pub focus: PredictField,
    pub result: Option<PredictionResult>,
    pub error: Option<String>,
}

impl PredictPanel {
    pub fn field(&self, field: PredictField) -> &str {
        match field {
            PredictField::Date => &self.date,
            PredictField::StoreId => &self.store_id,
            PredictField::ItemId => &self.item_id,
        }
    }

    pub fn field_mut(&mut self, field: PredictField) -> &mut String {
        match field {
            PredictField::Date => &mut self.date,
            PredictField::StoreId => &mut self.store_id,
            PredictField::ItemId => &mut self.item_id,
        }
    }

    pub fn is_complete(&self) -> bool {
        PredictField::all()
            .iter()
            .all(|f| !self.field(*f).trim().is_empty())
    }
}

/// Field of the store/item form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PredictField {
    #[default]
    Date,
    StoreId,
    ItemId,
}

impl PredictField {
    pub fn label(self) -> &'static str {
        match self {
            PredictField::Date => "Date (YYYY-MM-DD)",
            PredictField::StoreId => "Store ID",
            PredictField::ItemId => "Item ID",
        }
    }

    pub fn next(self) -> Self {
        match self {
            PredictField::Date => PredictField::StoreId,
            PredictField::StoreId => PredictField::ItemId,
            PredictField::ItemId => PredictField::Date,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            PredictField::Date => PredictField::ItemId,
            PredictField::StoreId => PredictField::Date,
            PredictField::ItemId => PredictField::StoreId,
        }
    }

    pub fn all() -> &'static [PredictField] {
        &[PredictField::Date, PredictField::StoreId, PredictField::ItemId]
    }
}
