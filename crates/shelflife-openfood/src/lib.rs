//! Client for the open food-product database search API.
//!
//! Used as a best-effort source of printed dates and category tags. Callers
//! are expected to treat every error as "no data".

pub mod client;
pub mod error;
pub mod types;

pub use client::OpenFoodClient;
pub use error::OpenFoodError;
pub use types::{OffProduct, SearchResponse};
