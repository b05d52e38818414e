use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use shelflife_core::KeywordTables;

use super::METHOD_NUTRITIONAL;
use crate::error::StrategyError;
use crate::modifiers::ModifierSet;
use crate::normalize::NormalizedItem;
use crate::strategy::{Finding, PartialStrategy};

const CONFIDENCE: f64 = 0.5;
const CATEGORY: &str = "inferred";

/// Soft inference from nutritional or processing traits ("organic",
/// "cured", ...) when no food category is recognizable.
pub struct NutritionalInference {
    tables: Arc<KeywordTables>,
}

impl NutritionalInference {
    #[must_use]
    pub fn new(tables: Arc<KeywordTables>) -> Self {
        Self { tables }
    }
}

#[async_trait]
impl PartialStrategy for NutritionalInference {
    fn name(&self) -> &'static str {
        "nutritional_inference"
    }

    async fn try_estimate(
        &self,
        item: &NormalizedItem,
        _today: NaiveDate,
    ) -> Result<Option<Finding>, StrategyError> {
        let tables = self.tables.as_ref();
        let traits = ModifierSet::new().with_nutritional(tables, &item.text);
        if traits.is_empty() {
            return Ok(None);
        }

        let modifiers = traits.with_packaging(tables, &item.text);
        let days = modifiers.apply(tables.nutritional_base_days);
        tracing::debug!(
            item = %item.text,
            modifiers = ?modifiers.labels(),
            days,
            "nutritional traits matched"
        );

        Ok(Some(Finding::new(
            days,
            CONFIDENCE,
            METHOD_NUTRITIONAL,
            CATEGORY,
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn run(name: &str) -> Option<Finding> {
        NutritionalInference::new(Arc::new(KeywordTables::builtin()))
            .try_estimate(
                &NormalizedItem::from_name(name),
                NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            )
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn single_trait_scales_base() {
        let finding = run("organic quinoa bowl").await.unwrap();
        assert_eq!(finding.shelf_life_days, 8);
        assert_eq!(finding.category, CATEGORY);
    }

    #[tokio::test]
    async fn traits_and_packaging_compose() {
        // 10 * 3.0 (cured) * 2.0 (smoked)
        let finding = run("smoked cured jerky").await.unwrap();
        assert_eq!(finding.shelf_life_days, 60);
    }

    #[tokio::test]
    async fn packaging_alone_is_not_enough() {
        assert!(run("frozen zzqx").await.is_none());
    }
}
