//! Feature row model

use crate::error::{Result, SalesError};

/// Ordered mapping from feature name to numeric value
///
/// Built fresh for every request and dropped after inference.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureRow {
    entries: Vec<(String, f64)>,
}

impl FeatureRow {
    /// Create an empty row
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a feature, replacing the value if the name already exists
    pub fn push(&mut self, name: impl Into<String>, value: f64) {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Builder-style [`FeatureRow::push`]
    pub fn with(mut self, name: impl Into<String>, value: f64) -> Self {
        self.push(name, value);
        self
    }

    /// Value of a feature by name
    pub fn get(&self, name: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| *v)
    }

    /// Feature names in insertion order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    /// Iterate over `(name, value)` pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Values reordered to match `order`, the model's training order
    ///
    /// Extra features in the row are ignored; a feature named in `order`
    /// but absent from the row is a [`SalesError::FeatureMismatch`].
    pub fn aligned(&self, order: &[String]) -> Result<Vec<f64>> {
        order
            .iter()
            .map(|name| {
                self.get(name).ok_or_else(|| SalesError::FeatureMismatch {
                    feature: name.clone(),
                })
            })
            .collect()
    }
}
