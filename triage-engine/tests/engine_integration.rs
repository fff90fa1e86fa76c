use std::sync::Arc;
use triage_core::config::AnalyzerConfig;
use triage_core::types::Category;
use triage_engine::engine::{EngineConfig, TriageEngine};
use triage_engine::session::ClassifierKind;
use triage_engine::traits::{
    DocumentExtractor, EmailDocument, ModelCompletion, ReplyModel, SubmissionInput,
};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct PassthroughExtractor;

#[async_trait::async_trait]
impl DocumentExtractor for PassthroughExtractor {
    async fn extract_text(&self, doc: &EmailDocument) -> anyhow::Result<String> {
        Ok(String::from_utf8_lossy(&doc.bytes).to_string())
    }
}

struct OpenAiCompatibleModel;

#[async_trait::async_trait]
impl ReplyModel for OpenAiCompatibleModel {
    async fn complete(
        &self,
        base_url: &str,
        api_key: &str,
        model: &str,
        system_message: &str,
        user_message: &str,
    ) -> anyhow::Result<ModelCompletion> {
        let cfg = triage_providers::openai_compatible::OpenAiCompatibleChatConfig {
            base_url: base_url.to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
        };

        let messages = vec![
            triage_providers::openai_compatible::ChatMessage {
                role: "system".into(),
                content: system_message.to_string(),
            },
            triage_providers::openai_compatible::ChatMessage {
                role: "user".into(),
                content: user_message.to_string(),
            },
        ];

        let req = triage_providers::openai_compatible::build_chat_completions_request(
            &cfg, &messages,
        );
        let resp = triage_providers::runtime::execute(&req).await?;
        if !(200..=299).contains(&resp.status) {
            return Err(anyhow::anyhow!("bad status {}", resp.status));
        }

        let text = triage_providers::parse::parse_openai_chat_completion(&resp.body)?;
        Ok(ModelCompletion {
            text,
            provider: "openai-compatible".into(),
            model: model.into(),
        })
    }
}

fn engine_for(base_url: String, api_key: &str) -> TriageEngine {
    TriageEngine::new(
        EngineConfig {
            analyzer: AnalyzerConfig {
                llm_base_url: base_url,
                llm_model: "gpt-4o-mini".into(),
                enable_ai: true,
            },
            llm_api_key: api_key.into(),
        },
        Arc::new(PassthroughExtractor),
        Arc::new(OpenAiCompatibleModel),
    )
}

#[tokio::test]
async fn model_verdict_flows_through_the_pipeline() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{"choices":[{"message":{"content":"{\"category\": \"Productive\", \"confidence\": 0.91, \"reply\": \"We are on it.\"}"}}]}"#,
            "application/json",
        ))
        .mount(&server)
        .await;

    let engine = engine_for(server.uri(), "k");
    let record = engine
        .run_analysis(SubmissionInput::from_text(
            "What is the status of invoice 4411?",
        ))
        .await
        .unwrap();

    assert_eq!(record.classifier, Some(ClassifierKind::Model));
    let analysis = record.analysis.unwrap();
    assert_eq!(analysis.category, Category::Productive);
    assert_eq!(analysis.confidence, 0.91);
    assert_eq!(analysis.reply, "We are on it.");
    assert_eq!(record.cleaned_text, "what is the status of invoice 4411");
    assert!(record.timings.classification_ms.is_some());
}

#[tokio::test]
async fn model_failure_falls_back_to_rules() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let engine = engine_for(server.uri(), "k");
    let record = engine
        .run_analysis(SubmissionInput::from_text(
            "Please check the status of my refund.",
        ))
        .await
        .unwrap();

    assert_eq!(record.classifier, Some(ClassifierKind::Rules));
    assert!(record.model_error.is_some());
    assert_eq!(record.analysis.unwrap().category, Category::Productive);
}

#[tokio::test]
async fn missing_api_key_skips_the_model_entirely() {
    // No mock server mounted: a request would fail loudly.
    let engine = engine_for("http://127.0.0.1:9".into(), "");
    let record = engine
        .run_analysis(SubmissionInput::from_text("Happy new year to everyone!"))
        .await
        .unwrap();

    assert_eq!(record.classifier, Some(ClassifierKind::Rules));
    assert!(record.model_error.is_none());
    assert_eq!(record.analysis.unwrap().category, Category::Unproductive);
}

#[tokio::test]
async fn empty_submission_is_rejected_before_any_work() {
    let engine = engine_for("http://127.0.0.1:9".into(), "");
    let err = engine
        .run_analysis(SubmissionInput::from_text("   "))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("Provide email text"));
}

#[tokio::test]
async fn file_wins_over_inline_text() {
    let engine = engine_for("http://127.0.0.1:9".into(), "");
    let input = SubmissionInput {
        email_text: Some("inline text".into()),
        file: Some(EmailDocument {
            filename: "mail.txt".into(),
            mime_type: "text/plain".into(),
            bytes: b"There is a problem with my card.".to_vec(),
        }),
    };

    let record = engine.run_analysis(input).await.unwrap();
    assert_eq!(record.raw_text, "There is a problem with my card.");
    assert_eq!(record.analysis.unwrap().category, Category::Productive);
}
