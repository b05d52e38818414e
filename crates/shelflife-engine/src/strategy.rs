//! Strategy interfaces for the estimation chain.
//!
//! Partial strategies may decline ("no opinion") or fail; the terminal
//! strategy is total by signature.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::error::StrategyError;
use crate::normalize::NormalizedItem;

/// A strategy's shelf-life opinion, before it is projected onto a date.
#[derive(Debug, Clone, PartialEq)]
pub struct Finding {
    pub shelf_life_days: u32,
    pub confidence: f64,
    pub method: String,
    pub category: String,
}

impl Finding {
    pub fn new(
        shelf_life_days: u32,
        confidence: f64,
        method: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            shelf_life_days,
            confidence,
            method: method.into(),
            category: category.into(),
        }
    }
}

#[async_trait]
pub trait PartialStrategy: Send + Sync {
    /// Stable identifier used in logs.
    fn name(&self) -> &'static str;

    /// Returns `Ok(None)` when the strategy has no opinion on `item`.
    ///
    /// # Errors
    ///
    /// Any error is treated by the chain exactly like `Ok(None)`.
    async fn try_estimate(
        &self,
        item: &NormalizedItem,
        today: NaiveDate,
    ) -> Result<Option<Finding>, StrategyError>;
}

pub trait TotalStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    fn estimate(&self, item: &NormalizedItem) -> Finding;
}
