use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub env: Environment,
    pub log_level: String,
    /// Replaces the built-in keyword tables when set.
    pub tables_path: Option<PathBuf>,
    pub product_lookup_enabled: bool,
    pub off_base_url: String,
    pub off_user_agent: String,
    /// Upper bound on the network-backed strategy, in seconds.
    pub lookup_timeout_secs: u64,
    pub search_page_size: u32,
    /// Estimates below this confidence are flagged for user review.
    pub review_threshold: f64,
}
