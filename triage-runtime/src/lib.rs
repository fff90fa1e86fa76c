pub mod config_store;
pub mod defaults;
pub mod extract;
pub mod history;
pub mod llm;
pub mod runtime_engine;
