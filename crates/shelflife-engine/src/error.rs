use std::time::Duration;

use shelflife_core::{ConfigError, EstimateError};
use shelflife_openfood::OpenFoodError;
use thiserror::Error;

/// Failure inside a single partial strategy.
///
/// Never leaves the strategy chain: the resolver logs it and moves on.
#[derive(Debug, Error)]
pub enum StrategyError {
    #[error("product lookup failed: {0}")]
    Lookup(#[from] OpenFoodError),

    #[error("strategy timed out after {0:?}")]
    Timeout(Duration),

    #[error("strategy panicked: {0}")]
    Panicked(String),
}

/// The strategy chain could not produce an estimate.
///
/// Only raised when the terminal strategy's result cannot be projected into
/// a date. This is a defect, not an expected runtime condition.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("contract violation: terminal strategy {strategy} produced no usable estimate: {source}")]
    ContractViolation {
        strategy: &'static str,
        #[source]
        source: EstimateError,
    },
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("product lookup client error: {0}")]
    Lookup(#[from] OpenFoodError),
}
