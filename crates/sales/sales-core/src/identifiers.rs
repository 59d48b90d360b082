//! Store and item identifier decomposition
//!
//! Store ids look like `CA_1` (`<state>_<store>`), item ids like
//! `FOODS_1_001` (`<category>_<dept>_<item>`). The hierarchy fields the
//! predictive model uses are derived from those segments.

use sales_spi::{Result, SalesError};

pub const ITEM_ID: &str = "item_id";
pub const DEPT_ID: &str = "dept_id";
pub const CAT_ID: &str = "cat_id";
pub const STORE_ID: &str = "store_id";
pub const STATE_ID: &str = "state_id";

/// Categorical fields of the predictive model, in training order
pub const CATEGORICAL_FIELDS: [&str; 5] = [ITEM_ID, DEPT_ID, CAT_ID, STORE_ID, STATE_ID];

fn segments<'a>(
    kind: &'static str,
    raw: &'a str,
    expected: usize,
    shape: &str,
) -> Result<Vec<&'a str>> {
    let parts: Vec<&str> = raw.split('_').collect();
    if parts.len() < expected {
        return Err(SalesError::InvalidIdentifier {
            kind,
            value: raw.to_string(),
            reason: format!(
                "expected {shape} with at least {expected} '_'-separated segments, got {}",
                parts.len()
            ),
        });
    }
    if let Some(position) = parts.iter().take(expected).position(|p| p.trim().is_empty()) {
        return Err(SalesError::InvalidIdentifier {
            kind,
            value: raw.to_string(),
            reason: format!("segment {} of {shape} is empty", position + 1),
        });
    }
    Ok(parts)
}

/// Parsed store identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreId {
    raw: String,
    state: String,
}

impl StoreId {
    pub fn parse(raw: &str) -> Result<Self> {
        let raw = raw.trim();
        let parts = segments(STORE_ID, raw, 2, "<state>_<store>")?;
        Ok(Self {
            raw: raw.to_string(),
            state: parts[0].to_string(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// State code, the first segment
    pub fn state(&self) -> &str {
        &self.state
    }
}

/// Parsed item identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemId {
    raw: String,
    category: String,
    department: String,
}

impl ItemId {
    pub fn parse(raw: &str) -> Result<Self> {
        let raw = raw.trim();
        let parts = segments(ITEM_ID, raw, 3, "<category>_<dept>_<item>")?;
        Ok(Self {
            raw: raw.to_string(),
            category: parts[0].to_string(),
            department: format!("{}_{}", parts[0], parts[1]),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Category, the first segment
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Department, the first two segments joined with `_`
    pub fn department(&self) -> &str {
        &self.department
    }
}

/// Raw categorical values of one store/item pair, before encoding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoricalFields {
    pub item_id: String,
    pub dept_id: String,
    pub cat_id: String,
    pub store_id: String,
    pub state_id: String,
}

impl CategoricalFields {
    pub fn derive(store: &StoreId, item: &ItemId) -> Self {
        Self {
            item_id: item.as_str().to_string(),
            dept_id: item.department().to_string(),
            cat_id: item.category().to_string(),
            store_id: store.as_str().to_string(),
            state_id: store.state().to_string(),
        }
    }

    /// `(field, value)` pairs in training order
    pub fn pairs(&self) -> [(&'static str, &str); 5] {
        [
            (ITEM_ID, self.item_id.as_str()),
            (DEPT_ID, self.dept_id.as_str()),
            (CAT_ID, self.cat_id.as_str()),
            (STORE_ID, self.store_id.as_str()),
            (STATE_ID, self.state_id.as_str()),
        ]
    }
}
