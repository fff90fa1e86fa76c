use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// An uploaded email file as received at the API boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailDocument {
    pub filename: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// One submission worth of input. The pipeline rejects it when both
/// sources are absent.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SubmissionInput {
    pub email_text: Option<String>,
    pub file: Option<EmailDocument>,
}

impl SubmissionInput {
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            email_text: Some(text.into()),
            file: None,
        }
    }

    pub fn from_file(file: EmailDocument) -> Self {
        Self {
            email_text: None,
            file: Some(file),
        }
    }

    /// Whitespace-only text counts as absent.
    pub fn is_empty(&self) -> bool {
        self.file.is_none()
            && self
                .email_text
                .as_deref()
                .is_none_or(|t| t.trim().is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelCompletion {
    pub text: String,
    pub provider: String,
    pub model: String,
}

#[async_trait]
pub trait DocumentExtractor: Send + Sync {
    async fn extract_text(&self, doc: &EmailDocument) -> anyhow::Result<String>;
}

#[async_trait]
pub trait ReplyModel: Send + Sync {
    async fn complete(
        &self,
        base_url: &str,
        api_key: &str,
        model: &str,
        system_message: &str,
        user_message: &str,
    ) -> anyhow::Result<ModelCompletion>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_only_text_counts_as_empty() {
        assert!(SubmissionInput::default().is_empty());
        assert!(SubmissionInput::from_text("   \n\t").is_empty());
        assert!(!SubmissionInput::from_text("hello").is_empty());
        assert!(
            !SubmissionInput::from_file(EmailDocument {
                filename: "a.txt".into(),
                mime_type: "text/plain".into(),
                bytes: vec![],
            })
            .is_empty()
        );
    }
}
