use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use shelflife_core::{CategoryRule, KeywordTables};

use super::brand::brand_rule;
use super::METHOD_KEYWORD;
use crate::error::StrategyError;
use crate::modifiers::ModifierSet;
use crate::normalize::NormalizedItem;
use crate::strategy::{Finding, PartialStrategy};

const CONFIDENCE: f64 = 0.85;
const OVERRIDE_CONFIDENCE: f64 = 0.9;

/// Deterministic keyword rules: item overrides, then the category table with
/// packaging and nutritional modifiers.
///
/// Items covered by a brand rule are left to [`super::BrandSpecificAnalysis`].
pub struct AdvancedKeywordAnalysis {
    tables: Arc<KeywordTables>,
}

impl AdvancedKeywordAnalysis {
    #[must_use]
    pub fn new(tables: Arc<KeywordTables>) -> Self {
        Self { tables }
    }

    fn category(&self, item: &NormalizedItem) -> Option<&CategoryRule> {
        self.tables.category_for(&item.text).or_else(|| {
            let hint = item.category_hint.as_deref()?;
            self.tables
                .category_named(hint)
                .or_else(|| self.tables.category_for(hint))
        })
    }
}

#[async_trait]
impl PartialStrategy for AdvancedKeywordAnalysis {
    fn name(&self) -> &'static str {
        "advanced_keyword_analysis"
    }

    async fn try_estimate(
        &self,
        item: &NormalizedItem,
        _today: NaiveDate,
    ) -> Result<Option<Finding>, StrategyError> {
        let tables = self.tables.as_ref();

        if brand_rule(tables, &item.text).is_some() {
            tracing::debug!(item = %item.text, "brand rule applies; deferring");
            return Ok(None);
        }

        if let Some(o) = tables.override_for(&item.text) {
            return Ok(Some(Finding::new(
                o.days,
                OVERRIDE_CONFIDENCE,
                METHOD_KEYWORD,
                o.category.as_str(),
            )));
        }

        let Some(rule) = self.category(item) else {
            return Ok(None);
        };

        let modifiers = ModifierSet::new()
            .with_packaging(tables, &item.text)
            .with_nutritional(tables, &item.text);
        let days = modifiers.apply(rule.days);
        tracing::debug!(
            item = %item.text,
            category = %rule.name,
            base_days = rule.days,
            modifiers = ?modifiers.labels(),
            days,
            "keyword category matched"
        );

        Ok(Some(Finding::new(
            days,
            CONFIDENCE,
            METHOD_KEYWORD,
            rule.name.as_str(),
        )))
    }
}
