use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Datelike, NaiveDate};
use shelflife_core::KeywordTables;

use super::METHOD_SEASONAL;
use crate::error::StrategyError;
use crate::modifiers::ModifierSet;
use crate::normalize::NormalizedItem;
use crate::strategy::{Finding, PartialStrategy};

const CONFIDENCE: f64 = 0.45;
const CATEGORY: &str = "produce";

/// Seasonal produce, nudged by the current season.
pub struct SeasonalAdjustment {
    tables: Arc<KeywordTables>,
}

impl SeasonalAdjustment {
    #[must_use]
    pub fn new(tables: Arc<KeywordTables>) -> Self {
        Self { tables }
    }
}

#[async_trait]
impl PartialStrategy for SeasonalAdjustment {
    fn name(&self) -> &'static str {
        "seasonal_adjustment"
    }

    async fn try_estimate(
        &self,
        item: &NormalizedItem,
        today: NaiveDate,
    ) -> Result<Option<Finding>, StrategyError> {
        let tables = self.tables.as_ref();
        let Some(seasonal) = tables.seasonal_item_for(&item.text) else {
            return Ok(None);
        };

        let modifiers = ModifierSet::new()
            .with_season(tables, today.month())
            .with_packaging(tables, &item.text);
        let days = modifiers.apply(seasonal.days);
        tracing::debug!(
            item = %item.text,
            keyword = %seasonal.keyword,
            modifiers = ?modifiers.labels(),
            days,
            "seasonal item matched"
        );

        Ok(Some(Finding::new(days, CONFIDENCE, METHOD_SEASONAL, CATEGORY)))
    }
}
