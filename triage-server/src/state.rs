use std::sync::Arc;
use triage_engine::engine::TriageEngine;

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<TriageEngine>,
}

impl AppState {
    pub fn new(engine: Arc<TriageEngine>) -> Self {
        Self { engine }
    }
}
