use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    pub llm_base_url: String,
    pub llm_model: String,

    /// When false the keyword rules run unconditionally and no model call
    /// is ever made, even if an API key is available.
    pub enable_ai: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    pub analyzer: AnalyzerConfig,

    // Secrets are stored outside this struct at rest.
    #[serde(default)]
    pub llm_api_key_present: bool,
}
