use std::sync::Arc;

use triage_core::config::AppConfig;
use triage_engine::engine::{EngineConfig, TriageEngine};

use crate::extract::FileTextExtractor;
use crate::llm::OpenAiCompatibleReplyModel;

/// Env var carrying the model API key. Secrets never live in the config
/// file at rest.
pub const LLM_API_KEY_ENV: &str = "LLM_API_KEY";

/// Build a runnable engine from config + environment.
///
/// This keeps the server/CLI layer thin.
pub fn build_engine_from_config(cfg: AppConfig) -> TriageEngine {
    let llm_api_key = std::env::var(LLM_API_KEY_ENV).unwrap_or_default();

    let model = Arc::new(OpenAiCompatibleReplyModel::new(llm_api_key.clone()));

    let engine_cfg = EngineConfig {
        analyzer: cfg.analyzer,
        // Keep the key in the engine config so the pipeline can decide
        // whether a model call is possible. The provider still owns the
        // secret at runtime.
        llm_api_key,
    };

    TriageEngine::new(engine_cfg, Arc::new(FileTextExtractor::new()), model)
}
