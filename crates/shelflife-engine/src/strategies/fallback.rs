use std::sync::Arc;

use shelflife_core::{KeywordTables, UNKNOWN_CATEGORY};

use super::METHOD_FALLBACK;
use crate::normalize::NormalizedItem;
use crate::strategy::{Finding, TotalStrategy};

const CONFIDENCE: f64 = 0.3;

/// Terminal strategy: the tables' default shelf life, always.
pub struct EnhancedFallback {
    tables: Arc<KeywordTables>,
}

impl EnhancedFallback {
    #[must_use]
    pub fn new(tables: Arc<KeywordTables>) -> Self {
        Self { tables }
    }
}

impl TotalStrategy for EnhancedFallback {
    fn name(&self) -> &'static str {
        "enhanced_fallback"
    }

    fn estimate(&self, item: &NormalizedItem) -> Finding {
        tracing::debug!(item = %item.text, "no strategy matched; using default shelf life");
        Finding::new(
            self.tables.default_days,
            CONFIDENCE,
            METHOD_FALLBACK,
            UNKNOWN_CATEGORY,
        )
    }
}
