use triage_providers::analyze::EmailUpload;

/// One user-triggered attempt to send email content for analysis.
///
/// Built fresh per submit and discarded afterwards; there is no identity
/// beyond the single request/response pair.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Submission {
    pub email_text: Option<String>,
    pub email_file: Option<EmailUpload>,
}

impl Submission {
    /// Captures the current input values. Text is trimmed and a
    /// whitespace-only value counts as absent.
    pub fn from_inputs(text: &str, file: Option<EmailUpload>) -> Self {
        let trimmed = text.trim();
        Self {
            email_text: (!trimmed.is_empty()).then(|| trimmed.to_string()),
            email_file: file,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.email_text.is_none() && self.email_file.is_none()
    }

    /// Short label for history/log lines.
    pub fn source_label(&self) -> String {
        match &self.email_file {
            Some(f) => f.filename.clone(),
            None => "inline text".into(),
        }
    }
}
