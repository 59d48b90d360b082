//! Store/item sales predictor
//!
//! Combines the date fields of the request with the store/item hierarchy,
//! encodes the categorical fields with the training-time vocabulary and
//! asks the predictive model for a single value.

use std::sync::Arc;

use chrono::NaiveDate;
use sales_spi::{FeatureRow, Regressor, Result};

use crate::calendar::{parse_date, CalendarFeatures};
use crate::encoding::CategoryEncoder;
use crate::identifiers::{CategoricalFields, ItemId, StoreId};

/// Single-point predictor over the store/item model
#[derive(Clone)]
pub struct StoreItemPredictor {
    model: Arc<dyn Regressor>,
    encoder: Arc<CategoryEncoder>,
}

impl StoreItemPredictor {
    pub fn new(model: Arc<dyn Regressor>, encoder: Arc<CategoryEncoder>) -> Self {
        Self { model, encoder }
    }

    pub fn model(&self) -> &Arc<dyn Regressor> {
        &self.model
    }

    pub fn encoder(&self) -> &Arc<CategoryEncoder> {
        &self.encoder
    }

    /// Predict sales of `item_id` at `store_id` on `date`.
    pub fn predict(&self, date: &str, store_id: &str, item_id: &str) -> Result<f64> {
        let date = parse_date(date)?;
        let store = StoreId::parse(store_id)?;
        let item = ItemId::parse(item_id)?;

        let row = self.build_features(date, &store, &item)?;
        let value = self.model.predict(&row)?;
        tracing::debug!(
            %date,
            store = store.as_str(),
            item = item.as_str(),
            ?row,
            value,
            "store/item prediction"
        );
        Ok(value)
    }

    /// Encoded feature row for one (date, store, item) triple.
    pub fn build_features(
        &self,
        date: NaiveDate,
        store: &StoreId,
        item: &ItemId,
    ) -> Result<FeatureRow> {
        let mut row = FeatureRow::new();
        CalendarFeatures::from_date(date).push_date_fields(&mut row);

        let fields = CategoricalFields::derive(store, item);
        for (field, value) in fields.pairs() {
            let code = self.encoder.encode(field, value)?;
            row.push(field, f64::from(code));
        }
        Ok(row)
    }
}

impl std::fmt::Debug for StoreItemPredictor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreItemPredictor")
            .field("model", &self.model.kind())
            .field("encoder", &self.encoder)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::{DAY, DAY_OF_WEEK, MONTH, YEAR};
    use crate::identifiers::{CATEGORICAL_FIELDS, CAT_ID, DEPT_ID, ITEM_ID, STATE_ID, STORE_ID};
    use crate::models::{LinearModel, RandomForest, TreeNode};

    fn encoder() -> Arc<CategoryEncoder> {
        Arc::new(
            CategoryEncoder::new()
                .with_field(ITEM_ID, ["FOODS_1_001", "FOODS_1_002", "HOBBIES_1_001"])
                .with_field(DEPT_ID, ["FOODS_1", "HOBBIES_1"])
                .with_field(CAT_ID, ["FOODS", "HOBBIES"])
                .with_field(STORE_ID, ["CA_1", "CA_2", "TX_1"])
                .with_field(STATE_ID, ["CA", "TX"]),
        )
    }

    fn predictive_features() -> Vec<String> {
        [DAY_OF_WEEK, DAY, MONTH, YEAR]
            .iter()
            .chain(CATEGORICAL_FIELDS.iter())
            .map(|f| f.to_string())
            .collect()
    }

    /// Weights each categorical code by a distinct power of ten
    fn code_model() -> Arc<dyn Regressor> {
        let coefficients = vec![0.0, 0.0, 0.0, 0.0, 10_000.0, 1_000.0, 100.0, 10.0, 1.0];
        Arc::new(LinearModel::new(predictive_features(), coefficients, 0.0).unwrap())
    }

    #[test]
    fn test_build_features_layout() {
        let predictor = StoreItemPredictor::new(code_model(), encoder());
        let date = NaiveDate::from_ymd_opt(2016, 4, 24).unwrap();
        let row = predictor
            .build_features(
                date,
                &StoreId::parse("TX_1").unwrap(),
                &ItemId::parse("HOBBIES_1_001").unwrap(),
            )
            .unwrap();

        let names: Vec<&str> = row.names().collect();
        assert_eq!(names, predictive_features());
        assert_eq!(row.get(DAY_OF_WEEK), Some(6.0));
        assert_eq!(row.get(ITEM_ID), Some(2.0));
        assert_eq!(row.get(DEPT_ID), Some(1.0));
        assert_eq!(row.get(CAT_ID), Some(1.0));
        assert_eq!(row.get(STORE_ID), Some(2.0));
        assert_eq!(row.get(STATE_ID), Some(1.0));
    }

    #[test]
    fn test_codes_come_from_training_vocabulary() {
        let predictor = StoreItemPredictor::new(code_model(), encoder());
        // item 1, dept 0, cat 0, store 1, state 0
        let value = predictor.predict("2024-01-01", "CA_2", "FOODS_1_002").unwrap();
        assert_eq!(value, 10_010.0);
    }

    #[test]
    fn test_prediction_is_deterministic() {
        let forest = RandomForest::new(
            predictive_features(),
            vec![
                TreeNode::split(8, 0.5, TreeNode::leaf(1.25), TreeNode::leaf(4.0)),
                TreeNode::split(1, 15.0, TreeNode::leaf(2.0), TreeNode::leaf(3.0)),
            ],
        )
        .unwrap();
        let predictor = StoreItemPredictor::new(Arc::new(forest), encoder());

        let first = predictor.predict("2024-03-20", "TX_1", "FOODS_1_001").unwrap();
        assert_eq!(first, 3.5);
        for _ in 0..5 {
            assert_eq!(
                predictor.predict("2024-03-20", "TX_1", "FOODS_1_001").unwrap(),
                first
            );
        }
    }

    #[test]
    fn test_malformed_item_id() {
        let predictor = StoreItemPredictor::new(code_model(), encoder());
        let err = predictor.predict("2024-01-01", "CA_1", "FOODS").unwrap_err();
        assert_eq!(err.code(), "invalid_identifier");
    }

    #[test]
    fn test_malformed_store_id() {
        let predictor = StoreItemPredictor::new(code_model(), encoder());
        let err = predictor.predict("2024-01-01", "CA", "FOODS_1_001").unwrap_err();
        assert_eq!(err.code(), "invalid_identifier");
    }

    #[test]
    fn test_invalid_date() {
        let predictor = StoreItemPredictor::new(code_model(), encoder());
        let err = predictor.predict("someday", "CA_1", "FOODS_1_001").unwrap_err();
        assert_eq!(err.code(), "invalid_date");
    }

    #[test]
    fn test_unknown_store() {
        let predictor = StoreItemPredictor::new(code_model(), encoder());
        let err = predictor.predict("2024-01-01", "WI_3", "FOODS_1_001").unwrap_err();
        assert_eq!(err.code(), "unknown_category");
    }
}
