use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use shelflife_core::{CategoryRule, KeywordTables, ProductMetadata, UNKNOWN_CATEGORY};
use shelflife_openfood::OpenFoodClient;

use super::{METHOD_PRINTED_DATE, METHOD_PRODUCT_DATABASE};
use crate::error::StrategyError;
use crate::normalize::{normalize_text, NormalizedItem};
use crate::strategy::{Finding, PartialStrategy};

const PRINTED_DATE_CONFIDENCE: f64 = 0.95;
const CATEGORY_TAG_CONFIDENCE: f64 = 0.8;

/// Searches the external product database by item name.
///
/// A candidate's printed date beats any category tag; otherwise the first
/// candidate whose tags hit the category table decides. Without a client the
/// strategy never has an opinion.
pub struct ProductDatabaseLookup {
    client: Option<OpenFoodClient>,
    tables: Arc<KeywordTables>,
}

impl ProductDatabaseLookup {
    #[must_use]
    pub fn new(client: OpenFoodClient, tables: Arc<KeywordTables>) -> Self {
        Self {
            client: Some(client),
            tables,
        }
    }

    #[must_use]
    pub fn disabled(tables: Arc<KeywordTables>) -> Self {
        Self {
            client: None,
            tables,
        }
    }
}

#[async_trait]
impl PartialStrategy for ProductDatabaseLookup {
    fn name(&self) -> &'static str {
        "product_database_lookup"
    }

    async fn try_estimate(
        &self,
        item: &NormalizedItem,
        today: NaiveDate,
    ) -> Result<Option<Finding>, StrategyError> {
        let Some(client) = &self.client else {
            return Ok(None);
        };
        let products = client.search_products(&item.name).await?;
        Ok(finding_from_products(&self.tables, &products, today))
    }
}

pub(crate) fn finding_from_products(
    tables: &KeywordTables,
    products: &[ProductMetadata],
    today: NaiveDate,
) -> Option<Finding> {
    let printed = products
        .iter()
        .find_map(|p| p.first_explicit_date().map(|date| (p, date)));

    if let Some((product, date)) = printed {
        // Already-past printed dates project to today.
        let days = date.signed_duration_since(today).num_days().max(0);
        let days = u32::try_from(days).unwrap_or(u32::MAX);
        let category = category_from_tags(tables, &product.categories_tags)
            .map_or(UNKNOWN_CATEGORY, |c| c.name.as_str());
        return Some(Finding::new(
            days,
            PRINTED_DATE_CONFIDENCE,
            METHOD_PRINTED_DATE,
            category,
        ));
    }

    products
        .iter()
        .find_map(|p| category_from_tags(tables, &p.categories_tags))
        .map(|rule| {
            Finding::new(
                rule.days,
                CATEGORY_TAG_CONFIDENCE,
                METHOD_PRODUCT_DATABASE,
                rule.name.as_str(),
            )
        })
}

fn category_from_tags<'a>(tables: &'a KeywordTables, tags: &[String]) -> Option<&'a CategoryRule> {
    tags.iter()
        .find_map(|tag| tables.category_for(&normalize_text(tag)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
    }

    fn product(tags: &[&str], best_before: Option<&str>) -> ProductMetadata {
        ProductMetadata {
            product_name: Some("Whole Milk".to_string()),
            categories_tags: tags.iter().map(|t| (*t).to_string()).collect(),
            best_before_date: best_before.map(str::to_string),
            ..ProductMetadata::default()
        }
    }

    #[test]
    fn printed_date_wins_over_tags() {
        let tables = KeywordTables::builtin();
        let products = vec![
            product(&["en:meats"], None),
            product(&["en:dairies"], Some("2025-03-10")),
        ];
        let finding = finding_from_products(&tables, &products, today()).unwrap();
        assert_eq!(finding.method, METHOD_PRINTED_DATE);
        assert_eq!(finding.shelf_life_days, 9);
        assert_eq!(finding.category, "dairy");
    }

    #[test]
    fn past_printed_date_clamps_to_zero() {
        let tables = KeywordTables::builtin();
        let products = vec![product(&[], Some("2025-02-01"))];
        let finding = finding_from_products(&tables, &products, today()).unwrap();
        assert_eq!(finding.shelf_life_days, 0);
        assert_eq!(finding.category, UNKNOWN_CATEGORY);
    }

    #[test]
    fn category_tags_used_without_printed_date() {
        let tables = KeywordTables::builtin();
        let products = vec![product(&["en:beverages", "en:milks"], None)];
        let finding = finding_from_products(&tables, &products, today()).unwrap();
        assert_eq!(finding.method, METHOD_PRODUCT_DATABASE);
        assert_eq!(finding.category, "beverages");
        assert_eq!(finding.shelf_life_days, 30);
    }

    #[test]
    fn no_usable_candidate_is_no_opinion() {
        let tables = KeywordTables::builtin();
        let products = vec![product(&["en:zzqx"], None)];
        assert!(finding_from_products(&tables, &products, today()).is_none());
        assert!(finding_from_products(&tables, &[], today()).is_none());
    }

    #[tokio::test]
    async fn disabled_lookup_has_no_opinion() {
        let strategy = ProductDatabaseLookup::disabled(Arc::new(KeywordTables::builtin()));
        let result = strategy
            .try_estimate(&NormalizedItem::from_name("milk"), today())
            .await
            .unwrap();
        assert!(result.is_none());
    }
}
