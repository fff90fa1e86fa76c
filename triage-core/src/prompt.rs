use crate::types::{Analysis, Category};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LlmMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltPrompt {
    pub system_message: String,
    pub user_message: String,
    pub messages: Vec<LlmMessage>,
}

const TRIAGE_SYSTEM_PROMPT: &str = "<SYSTEM_INSTRUCTIONS>\n\
You are an assistant for a financial services support team.\n\
\n\
You will receive the text of a customer email inside <EMAIL> tags and must:\n\
\n\
1. Classify the email into exactly ONE category:\n\
   - Productive: requires action, a reply, or follow-up from the team.\n\
   - Unproductive: requires no action (congratulations, simple thanks, generic messages).\n\
\n\
2. Draft a professional reply in English matching the category:\n\
   - If Productive: be cordial, acknowledge the request, ask for any missing \
details, and state the next step (turnaround time, responsible department).\n\
   - If Unproductive: thank the sender politely and close cordially.\n\
\n\
IMPORTANT: answer ONLY with a valid JSON object in exactly this shape:\n\
\n\
{\"category\": \"Productive\" or \"Unproductive\", \"confidence\": number between 0 and 1, \"reply\": \"reply text\"}\n\
</SYSTEM_INSTRUCTIONS>";

/// Builds the chat messages for a triage request.
pub fn build_triage_prompt(email_text: &str) -> BuiltPrompt {
    let system = TRIAGE_SYSTEM_PROMPT.to_string();
    let user = format!("<EMAIL>\n{}\n</EMAIL>", email_text);

    let messages = vec![
        LlmMessage {
            role: "system".into(),
            content: system.clone(),
        },
        LlmMessage {
            role: "user".into(),
            content: user.clone(),
        },
    ];

    BuiltPrompt {
        system_message: system,
        user_message: user,
        messages,
    }
}

fn reasoning_block_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?s)<thinking>.*?</thinking>|<think>.*?</think>|<reasoning>.*?</reasoning>")
            .expect("valid reasoning regex")
    })
}

// Raw shape the model is asked to produce. Fields are optional so a
// partially well-formed verdict still yields an Analysis.
#[derive(Debug, Deserialize)]
struct RawVerdict {
    category: Option<String>,
    confidence: Option<f64>,
    reply: Option<String>,
}

/// Interprets a model completion as an `Analysis`.
///
/// Reasoning blocks and markdown code fences are stripped before the JSON
/// decode. When the completion is not JSON at all, the whole text becomes
/// the suggested reply and the email is treated as Productive.
pub fn parse_model_verdict(completion: &str) -> Analysis {
    let cleaned = reasoning_block_re().replace_all(completion, "");
    let cleaned = strip_code_fence(cleaned.trim());

    match serde_json::from_str::<RawVerdict>(cleaned) {
        Ok(raw) => Analysis::new(
            Category::from_model_label(raw.category.as_deref().unwrap_or("Productive")),
            raw.confidence.unwrap_or(0.9),
            raw.reply.unwrap_or_default(),
        ),
        Err(_) => Analysis::new(Category::Productive, 0.8, cleaned.trim()),
    }
}

fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };

    // Drop the info string ("json") on the opening fence line.
    let rest = match rest.split_once('\n') {
        Some((_, body)) => body,
        None => rest,
    };

    rest.trim_end().trim_end_matches("```").trim()
}
