use axum::{
    Json,
    extract::{Multipart, State},
    http::StatusCode,
};
use serde::Serialize;
use serde_json::{Value, json};
use triage_core::types::Category;
use triage_engine::traits::{EmailDocument, SubmissionInput};

use crate::state::AppState;

pub async fn root() -> Json<Value> {
    Json(json!({ "message": "Email triage API is up." }))
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum AnalyzeResponse {
    Failure {
        error: String,
    },
    Success {
        original_text: String,
        cleaned_text: String,
        category: Category,
        confidence: f64,
        reply: String,
    },
}

/// `POST /analyze-email`: multipart with optional `email_text` and `file`
/// parts, in any order. Unknown parts are ignored. Pipeline failures keep
/// status 200 and report through the `error` field.
pub async fn analyze_email(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AnalyzeResponse>, (StatusCode, String)> {
    let mut email_text: Option<String> = None;
    let mut file: Option<EmailDocument> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "email_text" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;
                email_text = Some(text);
            }
            "file" => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let mime_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;

                // Some form clients send an empty `file` part when no file
                // was chosen; only a named part counts as an upload.
                if !filename.is_empty() {
                    file = Some(EmailDocument {
                        filename,
                        mime_type,
                        bytes: bytes.to_vec(),
                    });
                }
            }
            _ => {}
        }
    }

    let input = SubmissionInput { email_text, file };

    let response = match state.engine.run_analysis(input).await {
        Ok(record) => {
            let analysis = record.analysis.ok_or_else(|| {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "analysis record missing verdict".to_string(),
                )
            })?;
            AnalyzeResponse::Success {
                original_text: record.raw_text,
                cleaned_text: record.cleaned_text,
                category: analysis.category,
                confidence: analysis.confidence,
                reply: analysis.reply,
            }
        }
        Err(e) => AnalyzeResponse::Failure {
            error: e.to_string(),
        },
    };

    Ok(Json(response))
}
