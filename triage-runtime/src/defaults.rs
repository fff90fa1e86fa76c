use triage_core::config::{AnalyzerConfig, AppConfig};

pub fn default_analyzer_config() -> AnalyzerConfig {
    AnalyzerConfig {
        llm_base_url: "https://api.openai.com/v1".into(),
        llm_model: "gpt-4o-mini".into(),
        enable_ai: true,
    }
}

pub fn default_app_config() -> AppConfig {
    AppConfig {
        analyzer: default_analyzer_config(),
        llm_api_key_present: false,
    }
}
