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

/// Connection settings for the record store. Absent from [`AppConfig`] when
/// no store API key is configured, in which case persistence is disabled.
#[derive(Clone)]
pub struct StoreConfig {
    pub api_key: String,
    pub base_id: String,
    pub base_url: String,
    pub table: String,
}

impl std::fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreConfig")
            .field("api_key", &"[redacted]")
            .field("base_id", &self.base_id)
            .field("base_url", &self.base_url)
            .field("table", &self.table)
            .finish()
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub enrich_api_key: String,
    pub enrich_base_url: String,
    pub llm_api_key: String,
    pub llm_base_url: String,
    pub llm_model: String,
    pub store: Option<StoreConfig>,
    pub inter_item_delay_ms: u64,
    pub chunk_size: usize,
    pub inter_chunk_delay_ms: u64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("enrich_api_key", &"[redacted]")
            .field("enrich_base_url", &self.enrich_base_url)
            .field("llm_api_key", &"[redacted]")
            .field("llm_base_url", &self.llm_base_url)
            .field("llm_model", &self.llm_model)
            .field("store", &self.store)
            .field("inter_item_delay_ms", &self.inter_item_delay_ms)
            .field("chunk_size", &self.chunk_size)
            .field("inter_chunk_delay_ms", &self.inter_chunk_delay_ms)
            .finish()
    }
}
