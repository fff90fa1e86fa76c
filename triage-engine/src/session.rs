use crate::traits::ModelCompletion;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use triage_core::types::{Analysis, SubmissionId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnalysisStage {
    Extracting,
    Normalizing,
    Classifying,
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassifierKind {
    /// Verdict came from the reply model.
    Model,
    /// Verdict came from the keyword rules.
    Rules,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AnalysisTimings {
    pub extraction_ms: Option<u64>,
    pub classification_ms: Option<u64>,
}

/// Everything that happened to one submission. Failures (empty input,
/// unreadable upload) surface as errors from the engine instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    pub id: SubmissionId,
    pub stage: AnalysisStage,

    // A stable string label for progress display.
    // This is intentionally not derived from `Debug`.
    pub stage_label: Option<String>,

    pub raw_text: String,
    pub cleaned_text: String,
    pub analysis: Option<Analysis>,
    pub classifier: Option<ClassifierKind>,
    pub completion: Option<ModelCompletion>,

    /// Why the rules ran instead of the model, when that happened.
    pub model_error: Option<String>,

    pub timings: AnalysisTimings,
}

impl AnalysisRecord {
    pub fn started(id: SubmissionId) -> Self {
        Self {
            id,
            stage: AnalysisStage::Extracting,
            stage_label: Some("extracting".into()),
            raw_text: String::new(),
            cleaned_text: String::new(),
            analysis: None,
            classifier: None,
            completion: None,
            model_error: None,
            timings: AnalysisTimings::default(),
        }
    }
}

pub fn ms(d: Duration) -> u64 {
    d.as_millis().try_into().unwrap_or(u64::MAX)
}
