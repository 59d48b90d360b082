//! Training-time categorical encoder
//!
//! Each categorical field maps its training vocabulary to integer codes.
//! The vocabulary is loaded once from a CSV export of the fitted label
//! encoders and never refitted: a class's code is its position among the
//! rows of its field, which is the `classes_` order of the fitted encoder.
//!
//! ```text
//! field,category
//! state_id,CA
//! state_id,TX
//! state_id,WI
//! cat_id,FOODS
//! ```

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use sales_spi::{Result, SalesError};

/// Immutable field → (category → code) lookup table
#[derive(Debug, Clone, Default)]
pub struct CategoryEncoder {
    vocabularies: HashMap<String, HashMap<String, u32>>,
}

impl CategoryEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a field's classes in training order.
    ///
    /// Duplicate classes keep their first code.
    pub fn with_field<I, S>(mut self, field: &str, classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let vocabulary = self.vocabularies.entry(field.to_string()).or_default();
        for class in classes {
            let next = vocabulary.len() as u32;
            vocabulary.entry(class.into()).or_insert(next);
        }
        self
    }

    /// Load the encoder export from a CSV file.
    pub fn from_csv_path(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .map_err(|e| SalesError::unavailable(path.display().to_string(), e))?;
        Self::from_csv_reader(BufReader::new(file), &path.display().to_string())
    }

    /// Load the encoder export from any CSV source; `source` names it in errors.
    pub fn from_csv_reader<R: Read>(reader: R, source: &str) -> Result<Self> {
        let mut reader = csv::Reader::from_reader(reader);

        let headers = reader
            .headers()
            .map_err(|e| SalesError::unavailable(source, e))?
            .clone();
        let field_idx = column_index(&headers, "field", source)?;
        let class_idx = column_index(&headers, "category", source)?;

        let mut vocabularies: HashMap<String, HashMap<String, u32>> = HashMap::new();
        for (line, record) in reader.records().enumerate() {
            let record = record.map_err(|e| SalesError::unavailable(source, e))?;
            let (Some(field), Some(class)) = (record.get(field_idx), record.get(class_idx)) else {
                return Err(SalesError::unavailable(
                    source,
                    format!("row {} is missing a column", line + 2),
                ));
            };

            let vocabulary = vocabularies.entry(field.trim().to_string()).or_default();
            let next = vocabulary.len() as u32;
            if vocabulary.insert(class.trim().to_string(), next).is_some() {
                return Err(SalesError::unavailable(
                    source,
                    format!("duplicate class '{}' for field '{}'", class.trim(), field.trim()),
                ));
            }
        }

        if vocabularies.is_empty() {
            return Err(SalesError::unavailable(source, "encoder file has no classes"));
        }

        Ok(Self { vocabularies })
    }

    /// Training-time code of `value` within `field`.
    pub fn encode(&self, field: &str, value: &str) -> Result<u32> {
        let vocabulary = self
            .vocabularies
            .get(field)
            .ok_or_else(|| SalesError::FeatureMismatch {
                feature: field.to_string(),
            })?;

        vocabulary
            .get(value)
            .copied()
            .ok_or_else(|| SalesError::UnknownCategory {
                field: field.to_string(),
                value: value.to_string(),
            })
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.vocabularies.contains_key(field)
    }

    /// Number of classes known for a field
    pub fn class_count(&self, field: &str) -> usize {
        self.vocabularies.get(field).map_or(0, HashMap::len)
    }

    /// Fail unless every field in `fields` has a vocabulary.
    pub fn ensure_fields(&self, fields: &[&str], source: &str) -> Result<()> {
        match fields.iter().find(|f| !self.has_field(f)) {
            Some(missing) => Err(SalesError::unavailable(
                source,
                format!("no vocabulary for field '{missing}'"),
            )),
            None => Ok(()),
        }
    }
}

fn column_index(headers: &csv::StringRecord, name: &str, source: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h.trim() == name)
        .ok_or_else(|| SalesError::unavailable(source, format!("missing '{name}' column")))
}
