//! Receipt bridge: estimates for receipt lines anchored to the purchase date.

use std::sync::Arc;

use chrono::{DateTime, Days, NaiveDate};
use futures::future::join_all;
use shelflife_core::{
    ExpiryEstimate, ItemDescriptor, KeywordTables, ReceiptPrediction, UNKNOWN_CATEGORY,
};

use crate::error::ResolveError;
use crate::normalize::normalize_text;
use crate::resolver::StrategyChain;

/// Added to the chain's confidence when the suggested category agrees.
const AGREEMENT_BOOST: f64 = 0.1;
const MAX_BOOSTED_CONFIDENCE: f64 = 0.95;

const FALLBACK_METHOD: &str = "Receipt Category Lookup";
const FALLBACK_SUGGESTED_CONFIDENCE: f64 = 0.95;
const FALLBACK_CONFIDENCE: f64 = 0.85;

/// One line of a scanned receipt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptItem {
    pub name: String,
    /// `YYYY-MM-DD` or an RFC 3339 timestamp.
    pub purchase_date: String,
    pub suggested_category: Option<String>,
}

impl ReceiptItem {
    pub fn new(name: impl Into<String>, purchase_date: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            purchase_date: purchase_date.into(),
            suggested_category: None,
        }
    }

    #[must_use]
    pub fn with_suggested_category(mut self, category: impl Into<String>) -> Self {
        self.suggested_category = Some(category.into());
        self
    }
}

pub struct ReceiptBridge {
    chain: Arc<StrategyChain>,
    tables: Arc<KeywordTables>,
}

impl ReceiptBridge {
    #[must_use]
    pub fn new(chain: Arc<StrategyChain>, tables: Arc<KeywordTables>) -> Self {
        Self { chain, tables }
    }

    /// Predict the expiry of a purchased item. Never fails.
    ///
    /// The shelf life comes from the strategy chain; the date is anchored to
    /// `purchase_date` rather than today. A suggested category other than
    /// `unknown` replaces the inferred category in the output and boosts
    /// confidence when the two agree.
    ///
    /// Every estimate is re-anchored this way, including one taken from a
    /// printed date in the product database: its day count is measured from
    /// today, so with an earlier purchase date the predicted expiry lands
    /// before the printed date by the same number of days.
    pub async fn predict(
        &self,
        name: &str,
        purchase_date: &str,
        suggested_category: Option<&str>,
    ) -> ReceiptPrediction {
        let purchased = parse_purchase_date(purchase_date).unwrap_or_else(|| {
            let today = self.chain.today();
            tracing::warn!(
                item = name,
                purchase_date,
                anchor = %today,
                "unparseable purchase date; anchoring to today"
            );
            today
        });
        let suggestion = suggested_category
            .map(normalize_text)
            .filter(|s| !s.is_empty() && s != UNKNOWN_CATEGORY);

        match self.chain.resolve(&ItemDescriptor::new(name)).await {
            Ok(estimate) => from_estimate(&estimate, purchased, suggestion),
            Err(ResolveError::ContractViolation { strategy, source }) => {
                tracing::warn!(
                    item = name,
                    strategy,
                    error = %source,
                    "strategy chain failed; using receipt category lookup"
                );
                self.category_lookup(name, purchased, suggestion)
            }
        }
    }

    /// Predict every line concurrently, preserving input order.
    pub async fn predict_all(&self, items: &[ReceiptItem]) -> Vec<ReceiptPrediction> {
        join_all(items.iter().map(|item| {
            self.predict(
                &item.name,
                &item.purchase_date,
                item.suggested_category.as_deref(),
            )
        }))
        .await
    }

    /// Independent fallback over the general category table.
    fn category_lookup(
        &self,
        name: &str,
        purchased: NaiveDate,
        suggestion: Option<String>,
    ) -> ReceiptPrediction {
        let honored = suggestion
            .as_deref()
            .and_then(|s| self.tables.category_named(s));

        let (days, confidence, category) = match honored {
            Some(rule) => (rule.days, FALLBACK_SUGGESTED_CONFIDENCE, rule.name.clone()),
            None => {
                let inferred = self.tables.category_for(&normalize_text(name));
                let days = inferred.map_or(self.tables.default_days, |rule| rule.days);
                let category = suggestion.unwrap_or_else(|| {
                    inferred.map_or_else(|| UNKNOWN_CATEGORY.to_string(), |rule| rule.name.clone())
                });
                (days, FALLBACK_CONFIDENCE, category)
            }
        };

        ReceiptPrediction {
            expiry_date: anchored(purchased, days),
            confidence,
            category,
            method: FALLBACK_METHOD.to_string(),
        }
    }
}

fn from_estimate(
    estimate: &ExpiryEstimate,
    purchased: NaiveDate,
    suggestion: Option<String>,
) -> ReceiptPrediction {
    let mut confidence = estimate.confidence();
    let category = match suggestion {
        Some(suggested) => {
            if suggested.eq_ignore_ascii_case(estimate.category()) {
                confidence = (confidence + AGREEMENT_BOOST)
                    .min(MAX_BOOSTED_CONFIDENCE)
                    .max(estimate.confidence());
            }
            suggested
        }
        None => estimate.category().to_string(),
    };

    ReceiptPrediction {
        expiry_date: anchored(purchased, estimate.shelf_life_days()),
        confidence,
        category,
        method: estimate.method().to_string(),
    }
}

fn parse_purchase_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}

fn anchored(purchased: NaiveDate, days: u32) -> NaiveDate {
    purchased
        .checked_add_days(Days::new(u64::from(days)))
        .unwrap_or(NaiveDate::MAX)
}
