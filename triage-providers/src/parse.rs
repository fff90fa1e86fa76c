use anyhow::{Context, anyhow};
use serde::Deserialize;

/// The analysis fields as they travel on the wire. Category stays a plain
/// string here: the client displays whatever the server sent.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WireAnalysis {
    pub category: String,
    pub confidence: f64,
    pub reply: String,
}

/// A decoded `/analyze-email` response body.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalyzeReply {
    Analysis(WireAnalysis),
    Error(String),
}

#[derive(Debug, Deserialize)]
struct RawAnalyzeResponse {
    error: Option<String>,
    category: Option<String>,
    confidence: Option<f64>,
    reply: Option<String>,
}

/// Decodes an analyze response. A non-empty `error` field wins over any
/// other content; extra fields (`original_text`, `cleaned_text`) are
/// ignored.
pub fn parse_analyze_response(body: &[u8]) -> anyhow::Result<AnalyzeReply> {
    let raw: RawAnalyzeResponse =
        serde_json::from_slice(body).context("decode analyze-email JSON")?;

    if let Some(error) = raw.error.filter(|e| !e.is_empty()) {
        return Ok(AnalyzeReply::Error(error));
    }

    let category = raw
        .category
        .ok_or_else(|| anyhow!("analyze response missing category"))?;
    let confidence = raw
        .confidence
        .ok_or_else(|| anyhow!("analyze response missing confidence"))?;
    let reply = raw
        .reply
        .ok_or_else(|| anyhow!("analyze response missing reply"))?;

    Ok(AnalyzeReply::Analysis(WireAnalysis {
        category,
        confidence,
        reply,
    }))
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

pub fn parse_openai_chat_completion(body: &[u8]) -> anyhow::Result<String> {
    let resp: ChatCompletionResponse =
        serde_json::from_slice(body).context("decode chat completion JSON")?;
    resp.choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .ok_or_else(|| anyhow!("no content in chat completion response"))
}
