use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use shelflife_core::{CategoryRule, KeywordTables, Modifier};

use super::METHOD_BRAND;
use crate::error::StrategyError;
use crate::modifiers::ModifierSet;
use crate::normalize::NormalizedItem;
use crate::strategy::{Finding, PartialStrategy};

const CONFIDENCE: f64 = 0.75;

/// The brand and brand-table category for `text`, when both are present.
pub(crate) fn brand_rule<'a>(
    tables: &'a KeywordTables,
    text: &str,
) -> Option<(&'a Modifier, &'a CategoryRule)> {
    let brand = tables.brand_for(text)?;
    let base = tables.brand_category_for(text)?;
    Some((brand, base))
}

/// Applies a known brand's factor to a base from the brand category table.
pub struct BrandSpecificAnalysis {
    tables: Arc<KeywordTables>,
}

impl BrandSpecificAnalysis {
    #[must_use]
    pub fn new(tables: Arc<KeywordTables>) -> Self {
        Self { tables }
    }
}

#[async_trait]
impl PartialStrategy for BrandSpecificAnalysis {
    fn name(&self) -> &'static str {
        "brand_specific_analysis"
    }

    async fn try_estimate(
        &self,
        item: &NormalizedItem,
        _today: NaiveDate,
    ) -> Result<Option<Finding>, StrategyError> {
        let Some((brand, base)) = brand_rule(&self.tables, &item.text) else {
            return Ok(None);
        };

        let days = ModifierSet::new().with_brand(brand).apply(base.days);
        tracing::debug!(
            item = %item.text,
            brand = %brand.keyword,
            category = %base.name,
            days,
            "brand rule matched"
        );

        Ok(Some(Finding::new(
            days,
            CONFIDENCE,
            METHOD_BRAND,
            base.name.as_str(),
        )))
    }
}
