use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::EstimateError;

/// Textual description of a food item, as entered or scanned.
///
/// Free text may embed packaging words, printed dates, or brand names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDescriptor {
    pub name: String,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub category_hint: Option<String>,
}

impl ItemDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            brand: None,
            category_hint: None,
        }
    }

    #[must_use]
    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    #[must_use]
    pub fn with_category_hint(mut self, hint: impl Into<String>) -> Self {
        self.category_hint = Some(hint.into());
        self
    }
}

/// An estimated expiry date with its provenance.
///
/// Constructed only through [`ExpiryEstimate::project`], which guarantees
/// `expiry_date == reference + shelf_life_days`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpiryEstimate {
    expiry_date: NaiveDate,
    confidence: f64,
    method: String,
    category: String,
    shelf_life_days: u32,
}

impl ExpiryEstimate {
    /// Project `shelf_life_days` forward from `reference`.
    ///
    /// `confidence` is clamped to `[0, 1]`.
    ///
    /// # Errors
    ///
    /// Returns [`EstimateError::DateOutOfRange`] if the resulting date cannot
    /// be represented.
    pub fn project(
        reference: NaiveDate,
        shelf_life_days: u32,
        confidence: f64,
        method: impl Into<String>,
        category: impl Into<String>,
    ) -> Result<Self, EstimateError> {
        let expiry_date = reference
            .checked_add_days(Days::new(u64::from(shelf_life_days)))
            .ok_or(EstimateError::DateOutOfRange {
                reference,
                days: shelf_life_days,
            })?;
        Ok(Self {
            expiry_date,
            confidence: clamp_confidence(confidence),
            method: method.into(),
            category: category.into(),
            shelf_life_days,
        })
    }

    #[must_use]
    pub fn expiry_date(&self) -> NaiveDate {
        self.expiry_date
    }

    /// Expiry date formatted as `YYYY-MM-DD`.
    #[must_use]
    pub fn expiry_date_iso(&self) -> String {
        self.expiry_date.format("%Y-%m-%d").to_string()
    }

    #[must_use]
    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    /// Label of the strategy that produced this estimate.
    #[must_use]
    pub fn method(&self) -> &str {
        &self.method
    }

    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    #[must_use]
    pub fn shelf_life_days(&self) -> u32 {
        self.shelf_life_days
    }

    /// Returns `true` when confidence is strictly below `threshold`.
    #[must_use]
    pub fn needs_review(&self, threshold: f64) -> bool {
        self.confidence < threshold
    }
}

/// Product metadata as returned by an external product database.
///
/// Field names follow the open food-product database's JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductMetadata {
    #[serde(default)]
    pub product_name: Option<String>,
    #[serde(default)]
    pub brands: Option<String>,
    #[serde(default)]
    pub categories_tags: Vec<String>,
    #[serde(default)]
    pub expiration_date: Option<String>,
    #[serde(default)]
    pub best_before_date: Option<String>,
    #[serde(default)]
    pub use_by_date: Option<String>,
}

impl ProductMetadata {
    /// The explicit date fields in precedence order: expiration, best-before, use-by.
    pub fn explicit_dates(&self) -> impl Iterator<Item = &str> {
        [
            self.expiration_date.as_deref(),
            self.best_before_date.as_deref(),
            self.use_by_date.as_deref(),
        ]
        .into_iter()
        .flatten()
    }

    /// Parse the first explicit date field that holds a recognizable date.
    #[must_use]
    pub fn first_explicit_date(&self) -> Option<NaiveDate> {
        self.explicit_dates().find_map(parse_printed_date)
    }
}

/// Result of predicting the expiry of one receipt line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReceiptPrediction {
    pub expiry_date: NaiveDate,
    pub confidence: f64,
    pub category: String,
    pub method: String,
}

impl ReceiptPrediction {
    #[must_use]
    pub fn expiry_date_iso(&self) -> String {
        self.expiry_date.format("%Y-%m-%d").to_string()
    }

    #[must_use]
    pub fn needs_review(&self, threshold: f64) -> bool {
        self.confidence < threshold
    }
}

/// Accepted layouts for explicit date fields, tried in order.
const PRINTED_DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d.%m.%Y"];

/// Parse a date string as printed in product metadata.
///
/// Accepts ISO `YYYY-MM-DD` first, then a few common printed layouts.
/// Returns `None` for blank or unrecognized input.
#[must_use]
pub fn parse_printed_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    PRINTED_DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
}

fn clamp_confidence(confidence: f64) -> f64 {
    if confidence.is_nan() {
        0.0
    } else {
        confidence.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn project_adds_shelf_life_to_reference() {
        let est = ExpiryEstimate::project(date(2024, 1, 1), 7, 0.85, "m", "dairy").unwrap();
        assert_eq!(est.expiry_date(), date(2024, 1, 8));
        assert_eq!(est.expiry_date_iso(), "2024-01-08");
        assert_eq!(est.shelf_life_days(), 7);
    }

    #[test]
    fn project_crosses_leap_day() {
        let est = ExpiryEstimate::project(date(2024, 2, 27), 3, 0.5, "m", "c").unwrap();
        assert_eq!(est.expiry_date_iso(), "2024-03-01");
    }

    #[test]
    fn project_clamps_confidence() {
        let high = ExpiryEstimate::project(date(2024, 1, 1), 1, 1.4, "m", "c").unwrap();
        let low = ExpiryEstimate::project(date(2024, 1, 1), 1, -0.2, "m", "c").unwrap();
        let nan = ExpiryEstimate::project(date(2024, 1, 1), 1, f64::NAN, "m", "c").unwrap();
        assert!((high.confidence() - 1.0).abs() < f64::EPSILON);
        assert!(low.confidence().abs() < f64::EPSILON);
        assert!(nan.confidence().abs() < f64::EPSILON);
    }

    #[test]
    fn project_reports_out_of_range() {
        let err = ExpiryEstimate::project(NaiveDate::MAX, 1, 0.3, "m", "c").unwrap_err();
        assert_eq!(
            err,
            EstimateError::DateOutOfRange {
                reference: NaiveDate::MAX,
                days: 1
            }
        );
    }

    #[test]
    fn needs_review_below_threshold() {
        let est = ExpiryEstimate::project(date(2024, 1, 1), 14, 0.3, "m", "c").unwrap();
        assert!(est.needs_review(0.5));
        assert!(!est.needs_review(0.3));
    }

    #[test]
    fn estimate_serializes_iso_date() {
        let est = ExpiryEstimate::project(date(2024, 1, 1), 7, 0.85, "m", "dairy").unwrap();
        let json = serde_json::to_value(&est).unwrap();
        assert_eq!(json["expiry_date"], "2024-01-08");
        assert_eq!(json["shelf_life_days"], 7);
    }

    #[test]
    fn parse_printed_date_accepts_known_layouts() {
        assert_eq!(parse_printed_date("2025-03-10"), Some(date(2025, 3, 10)));
        assert_eq!(parse_printed_date(" 2025/03/10 "), Some(date(2025, 3, 10)));
        assert_eq!(parse_printed_date("03/10/2025"), Some(date(2025, 3, 10)));
        assert_eq!(parse_printed_date("10.03.2025"), Some(date(2025, 3, 10)));
    }

    #[test]
    fn parse_printed_date_rejects_garbage() {
        assert_eq!(parse_printed_date(""), None);
        assert_eq!(parse_printed_date("soon"), None);
        assert_eq!(parse_printed_date("2025-13-40"), None);
    }

    #[test]
    fn first_explicit_date_skips_unparseable_fields() {
        let meta = ProductMetadata {
            expiration_date: Some("n/a".to_string()),
            best_before_date: Some("2025-03-10".to_string()),
            use_by_date: Some("2025-04-01".to_string()),
            ..ProductMetadata::default()
        };
        assert_eq!(meta.first_explicit_date(), Some(date(2025, 3, 10)));
    }

    #[test]
    fn product_metadata_deserializes_with_missing_fields() {
        let meta: ProductMetadata =
            serde_json::from_str(r#"{"product_name": "Whole Milk"}"#).unwrap();
        assert_eq!(meta.product_name.as_deref(), Some("Whole Milk"));
        assert!(meta.categories_tags.is_empty());
        assert!(meta.first_explicit_date().is_none());
    }
}
