use crate::session::{AnalysisRecord, AnalysisStage, ClassifierKind, ms};
use crate::traits::{DocumentExtractor, ReplyModel, SubmissionInput};
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use triage_core::classify::rule_based_analysis;
use triage_core::config::AnalyzerConfig;
use triage_core::prompt::{build_triage_prompt, parse_model_verdict};
use triage_core::text::normalize_email_text;
use triage_core::types::SubmissionId;

const STAGE_EXTRACTING: &str = "extracting";
const STAGE_NORMALIZING: &str = "normalizing";
const STAGE_CLASSIFYING: &str = "classifying";
const STAGE_DONE: &str = "done";

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Provide email text or upload a file (.txt or .eml).")]
    EmptySubmission,
}

#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub analyzer: AnalyzerConfig,

    // Auth is global; the model provider owns the secret at runtime.
    pub llm_api_key: String,
}

impl EngineConfig {
    fn model_available(&self) -> bool {
        self.analyzer.enable_ai && !self.llm_api_key.trim().is_empty()
    }
}

pub struct TriageEngine {
    cfg: EngineConfig,
    extractor: Arc<dyn DocumentExtractor>,
    model: Arc<dyn ReplyModel>,
}

impl TriageEngine {
    pub fn new(
        cfg: EngineConfig,
        extractor: Arc<dyn DocumentExtractor>,
        model: Arc<dyn ReplyModel>,
    ) -> Self {
        Self {
            cfg,
            extractor,
            model,
        }
    }

    /// Runs the full pipeline (extract -> normalize -> classify).
    pub async fn run_analysis(&self, input: SubmissionInput) -> anyhow::Result<AnalysisRecord> {
        self.run_analysis_with_hook(input, |_stage| async {}).await
    }

    /// Same as `run_analysis`, but emits a stage hook as the pipeline
    /// progresses. The hook is intended for progress display and must be
    /// fast.
    pub async fn run_analysis_with_hook<F, Fut>(
        &self,
        input: SubmissionInput,
        on_stage: F,
    ) -> anyhow::Result<AnalysisRecord>
    where
        F: Fn(&'static str) -> Fut,
        Fut: Future<Output = ()>,
    {
        if input.is_empty() {
            return Err(EngineError::EmptySubmission.into());
        }

        let mut record = AnalysisRecord::started(SubmissionId::new());

        // 1) Resolve raw text. The file wins when both sources are present.
        record.stage = AnalysisStage::Extracting;
        record.stage_label = Some(STAGE_EXTRACTING.into());
        on_stage(STAGE_EXTRACTING).await;

        let raw_text = match &input.file {
            Some(doc) => {
                let t0 = Instant::now();
                let text = self.extractor.extract_text(doc).await?;
                record.timings.extraction_ms = Some(ms(t0.elapsed()));
                text
            }
            None => input.email_text.as_deref().unwrap_or_default().trim().to_string(),
        };

        if raw_text.trim().is_empty() {
            return Err(EngineError::EmptySubmission.into());
        }
        record.raw_text = raw_text;

        // 2) Normalize
        record.stage = AnalysisStage::Normalizing;
        record.stage_label = Some(STAGE_NORMALIZING.into());
        on_stage(STAGE_NORMALIZING).await;

        record.cleaned_text = normalize_email_text(&record.raw_text);

        // 3) Classify
        record.stage = AnalysisStage::Classifying;
        record.stage_label = Some(STAGE_CLASSIFYING.into());
        on_stage(STAGE_CLASSIFYING).await;

        if self.cfg.model_available() {
            let built = build_triage_prompt(&record.cleaned_text);

            let t0 = Instant::now();
            match self
                .model
                .complete(
                    &self.cfg.analyzer.llm_base_url,
                    &self.cfg.llm_api_key,
                    &self.cfg.analyzer.llm_model,
                    &built.system_message,
                    &built.user_message,
                )
                .await
            {
                Ok(completion) => {
                    record.timings.classification_ms = Some(ms(t0.elapsed()));
                    record.analysis = Some(parse_model_verdict(&completion.text));
                    record.classifier = Some(ClassifierKind::Model);
                    record.completion = Some(completion);
                }
                Err(e) => {
                    // A model outage never fails the submission; fall back
                    // to the keyword rules and record why.
                    record.model_error = Some(format!("{e:#}"));
                    record.analysis = Some(rule_based_analysis(&record.cleaned_text));
                    record.classifier = Some(ClassifierKind::Rules);
                }
            }
        } else {
            record.analysis = Some(rule_based_analysis(&record.cleaned_text));
            record.classifier = Some(ClassifierKind::Rules);
        }

        record.stage = AnalysisStage::Done;
        record.stage_label = Some(STAGE_DONE.into());
        on_stage(STAGE_DONE).await;

        Ok(record)
    }
}
