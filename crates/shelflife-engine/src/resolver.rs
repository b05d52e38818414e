//! Strategy chain resolver.
//!
//! Strategies run in fixed priority order and the first opinion wins. A
//! partial strategy that errors, panics, or exceeds the per-strategy timeout
//! counts as "no opinion" and the chain moves on.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use futures::future::join_all;
use futures::FutureExt;
use shelflife_core::{EstimateError, ExpiryEstimate, ItemDescriptor, KeywordTables};
use shelflife_openfood::OpenFoodClient;

use crate::clock::Clock;
use crate::error::{ResolveError, StrategyError};
use crate::normalize::NormalizedItem;
use crate::strategies::{
    AdvancedKeywordAnalysis, BrandSpecificAnalysis, EnhancedFallback, NutritionalInference,
    ProductDatabaseLookup, SeasonalAdjustment,
};
use crate::strategy::{Finding, PartialStrategy, TotalStrategy};

/// Applied to every partial strategy unless overridden.
pub const DEFAULT_STRATEGY_TIMEOUT: Duration = Duration::from_secs(4);

pub struct StrategyChain {
    partials: Vec<Box<dyn PartialStrategy>>,
    terminal: Box<dyn TotalStrategy>,
    clock: Arc<dyn Clock>,
    strategy_timeout: Duration,
}

impl StrategyChain {
    /// A chain over arbitrary strategies, evaluated in the given order.
    #[must_use]
    pub fn new(
        partials: Vec<Box<dyn PartialStrategy>>,
        terminal: Box<dyn TotalStrategy>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            partials,
            terminal,
            clock,
            strategy_timeout: DEFAULT_STRATEGY_TIMEOUT,
        }
    }

    /// The standard six-strategy chain.
    ///
    /// Without `lookup` the product-database strategy never has an opinion.
    #[must_use]
    pub fn standard(
        tables: Arc<KeywordTables>,
        lookup: Option<OpenFoodClient>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let product_lookup = match lookup {
            Some(client) => ProductDatabaseLookup::new(client, Arc::clone(&tables)),
            None => ProductDatabaseLookup::disabled(Arc::clone(&tables)),
        };
        let partials: Vec<Box<dyn PartialStrategy>> = vec![
            Box::new(product_lookup),
            Box::new(AdvancedKeywordAnalysis::new(Arc::clone(&tables))),
            Box::new(BrandSpecificAnalysis::new(Arc::clone(&tables))),
            Box::new(NutritionalInference::new(Arc::clone(&tables))),
            Box::new(SeasonalAdjustment::new(Arc::clone(&tables))),
        ];
        Self::new(partials, Box::new(EnhancedFallback::new(tables)), clock)
    }

    #[must_use]
    pub fn with_strategy_timeout(mut self, timeout: Duration) -> Self {
        self.strategy_timeout = timeout;
        self
    }

    /// Strategy names in evaluation order, terminal last.
    #[must_use]
    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.partials
            .iter()
            .map(|s| s.name())
            .chain(std::iter::once(self.terminal.name()))
            .collect()
    }

    #[must_use]
    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Estimate expiry from the first strategy with an opinion.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::ContractViolation`] only if the terminal
    /// strategy's finding cannot be projected from today, which indicates a
    /// bug or a clock at the edge of the date range.
    pub async fn resolve(&self, descriptor: &ItemDescriptor) -> Result<ExpiryEstimate, ResolveError> {
        let item = NormalizedItem::from_descriptor(descriptor);
        let today = self.clock.today();

        for strategy in &self.partials {
            let Some(finding) = self.run_partial(strategy.as_ref(), &item, today).await else {
                continue;
            };
            match project(today, finding) {
                Ok(estimate) => return Ok(estimate),
                Err(e) => {
                    tracing::warn!(
                        strategy = strategy.name(),
                        item = %item.text,
                        error = %e,
                        "strategy finding could not be projected; continuing"
                    );
                }
            }
        }

        let finding = self.terminal.estimate(&item);
        project(today, finding).map_err(|source| {
            tracing::error!(
                strategy = self.terminal.name(),
                item = %item.text,
                error = %source,
                "terminal strategy failed to produce an estimate"
            );
            ResolveError::ContractViolation {
                strategy: self.terminal.name(),
                source,
            }
        })
    }

    /// Convenience for [`StrategyChain::resolve`] with a bare item name.
    ///
    /// # Errors
    ///
    /// See [`StrategyChain::resolve`].
    pub async fn resolve_name(&self, name: &str) -> Result<ExpiryEstimate, ResolveError> {
        self.resolve(&ItemDescriptor::new(name)).await
    }

    /// Every partial strategy's estimate, in priority order.
    ///
    /// Strategies run concurrently; those with no opinion are omitted. The
    /// terminal fallback is never included.
    pub async fn resolve_all(&self, descriptor: &ItemDescriptor) -> Vec<ExpiryEstimate> {
        let item = NormalizedItem::from_descriptor(descriptor);
        let today = self.clock.today();

        let findings = join_all(
            self.partials
                .iter()
                .map(|s| self.run_partial(s.as_ref(), &item, today)),
        )
        .await;

        findings
            .into_iter()
            .flatten()
            .filter_map(|finding| project(today, finding).ok())
            .collect()
    }

    /// Runs one partial strategy with timeout and panic isolation.
    async fn run_partial(
        &self,
        strategy: &dyn PartialStrategy,
        item: &NormalizedItem,
        today: NaiveDate,
    ) -> Option<Finding> {
        let attempt = AssertUnwindSafe(strategy.try_estimate(item, today)).catch_unwind();
        let outcome = match tokio::time::timeout(self.strategy_timeout, attempt).await {
            Err(_) => Err(StrategyError::Timeout(self.strategy_timeout)),
            Ok(Err(panic)) => Err(StrategyError::Panicked(panic_message(panic.as_ref()))),
            Ok(Ok(result)) => result,
        };

        match outcome {
            Ok(Some(finding)) => {
                tracing::debug!(
                    strategy = strategy.name(),
                    item = %item.text,
                    method = %finding.method,
                    days = finding.shelf_life_days,
                    confidence = finding.confidence,
                    "strategy produced an estimate"
                );
                Some(finding)
            }
            Ok(None) => {
                tracing::debug!(strategy = strategy.name(), item = %item.text, "no opinion");
                None
            }
            Err(e) => {
                tracing::warn!(
                    strategy = strategy.name(),
                    item = %item.text,
                    error = %e,
                    "strategy failed; treating as no opinion"
                );
                None
            }
        }
    }
}

fn project(today: NaiveDate, finding: Finding) -> Result<ExpiryEstimate, EstimateError> {
    ExpiryEstimate::project(
        today,
        finding.shelf_life_days,
        finding.confidence,
        finding.method,
        finding.category,
    )
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| (*s).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "non-string panic payload".to_string())
}

#[cfg(test)]
#[path = "resolver_test.rs"]
mod tests;
