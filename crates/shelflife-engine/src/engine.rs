//! The engine facade: everything wired together from [`EngineConfig`].

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use shelflife_core::{
    load_tables, EngineConfig, ExpiryEstimate, ItemDescriptor, KeywordTables, ProductMetadata,
    ReceiptPrediction,
};
use shelflife_openfood::OpenFoodClient;

use crate::clock::{Clock, SystemClock};
use crate::error::{EngineError, ResolveError};
use crate::extractor::ExplicitDateExtractor;
use crate::receipt::{ReceiptBridge, ReceiptItem};
use crate::resolver::StrategyChain;

pub struct ExpiryEngine {
    tables: Arc<KeywordTables>,
    chain: Arc<StrategyChain>,
    extractor: ExplicitDateExtractor,
    receipts: ReceiptBridge,
    review_threshold: f64,
}

impl ExpiryEngine {
    /// Build an engine using the system clock.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Config`] if the configured tables file cannot be
    /// loaded, or [`EngineError::Lookup`] if the product search client cannot
    /// be built.
    pub fn from_config(config: &EngineConfig) -> Result<Self, EngineError> {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Build an engine with an injected clock.
    ///
    /// # Errors
    ///
    /// See [`ExpiryEngine::from_config`].
    pub fn with_clock(config: &EngineConfig, clock: Arc<dyn Clock>) -> Result<Self, EngineError> {
        let tables = match &config.tables_path {
            Some(path) => load_tables(path)?,
            None => KeywordTables::builtin(),
        };
        let tables = Arc::new(tables);
        tracing::info!(
            env = %config.env,
            tables_version = %tables.version,
            product_lookup = config.product_lookup_enabled,
            "expiry engine configured"
        );

        let lookup = if config.product_lookup_enabled {
            Some(OpenFoodClient::with_base_url(
                &config.off_base_url,
                config.lookup_timeout_secs,
                &config.off_user_agent,
                config.search_page_size,
            )?)
        } else {
            None
        };

        let chain = StrategyChain::standard(Arc::clone(&tables), lookup, Arc::clone(&clock))
            .with_strategy_timeout(Duration::from_secs(config.lookup_timeout_secs));
        let chain = Arc::new(chain);

        Ok(Self {
            extractor: ExplicitDateExtractor::new(Arc::clone(&tables), clock),
            receipts: ReceiptBridge::new(Arc::clone(&chain), Arc::clone(&tables)),
            tables,
            chain,
            review_threshold: config.review_threshold,
        })
    }

    /// Estimate expiry for a bare item name.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::ContractViolation`] only on a defect in the
    /// terminal strategy.
    pub async fn resolve(&self, name: &str) -> Result<ExpiryEstimate, ResolveError> {
        self.chain.resolve_name(name).await
    }

    /// # Errors
    ///
    /// See [`ExpiryEngine::resolve`].
    pub async fn resolve_descriptor(
        &self,
        descriptor: &ItemDescriptor,
    ) -> Result<ExpiryEstimate, ResolveError> {
        self.chain.resolve(descriptor).await
    }

    /// Every partial strategy's opinion on `name`, in priority order.
    pub async fn resolve_all(&self, name: &str) -> Vec<ExpiryEstimate> {
        self.chain.resolve_all(&ItemDescriptor::new(name)).await
    }

    #[must_use]
    pub fn estimate_from_metadata(&self, metadata: &ProductMetadata) -> NaiveDate {
        self.extractor.estimate(metadata)
    }

    pub async fn predict(
        &self,
        name: &str,
        purchase_date: &str,
        suggested_category: Option<&str>,
    ) -> ReceiptPrediction {
        self.receipts
            .predict(name, purchase_date, suggested_category)
            .await
    }

    pub async fn predict_all(&self, items: &[ReceiptItem]) -> Vec<ReceiptPrediction> {
        self.receipts.predict_all(items).await
    }

    /// Whether `estimate` falls below the configured review threshold.
    #[must_use]
    pub fn needs_review(&self, estimate: &ExpiryEstimate) -> bool {
        estimate.needs_review(self.review_threshold)
    }

    #[must_use]
    pub fn review_threshold(&self) -> f64 {
        self.review_threshold
    }

    #[must_use]
    pub fn tables(&self) -> &KeywordTables {
        &self.tables
    }

    #[must_use]
    pub fn chain(&self) -> &StrategyChain {
        &self.chain
    }
}
