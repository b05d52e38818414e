//! Expiry estimation engine.
//!
//! Turns a textual food-item descriptor into an estimated expiry date with a
//! confidence score and the label of the method that produced it. Estimation
//! runs an ordered chain of strategies (printed-date lookup, keyword rules,
//! brand rules, nutritional and seasonal heuristics) and stops at the first
//! one with an opinion; a total fallback guarantees an answer.

pub mod clock;
pub mod engine;
pub mod error;
pub mod extractor;
pub mod modifiers;
pub mod normalize;
pub mod receipt;
pub mod resolver;
pub mod strategies;
pub mod strategy;

pub use clock::{Clock, FixedClock, SystemClock};
pub use engine::ExpiryEngine;
pub use error::{EngineError, ResolveError, StrategyError};
pub use extractor::ExplicitDateExtractor;
pub use normalize::{normalize_text, NormalizedItem};
pub use receipt::{ReceiptBridge, ReceiptItem};
pub use resolver::StrategyChain;
pub use strategy::{Finding, PartialStrategy, TotalStrategy};
