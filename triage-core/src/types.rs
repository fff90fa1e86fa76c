use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubmissionId(pub Uuid);

impl SubmissionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SubmissionId {
    fn default() -> Self {
        Self::new()
    }
}

/// Triage category for an incoming email.
///
/// `Productive` means the message needs action or a follow-up from the
/// support team; `Unproductive` means a courtesy message that needs none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    Productive,
    Unproductive,
}

impl Category {
    pub fn label(self) -> &'static str {
        match self {
            Category::Productive => "Productive",
            Category::Unproductive => "Unproductive",
        }
    }

    /// Interprets a category label coming back from a model.
    ///
    /// Anything unrecognized counts as `Productive` so a garbled verdict
    /// still gets a human look instead of being silently closed.
    pub fn from_model_label(label: &str) -> Self {
        if label.trim().eq_ignore_ascii_case("unproductive") {
            Category::Unproductive
        } else {
            Category::Productive
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub category: Category,
    pub confidence: f64,
    pub reply: String,
}

impl Analysis {
    /// Confidence coming from model output is untrusted; clamp into [0, 1].
    pub fn new(category: Category, confidence: f64, reply: impl Into<String>) -> Self {
        Self {
            category,
            confidence: confidence.clamp(0.0, 1.0),
            reply: reply.into(),
        }
    }

    pub fn confidence_pct(&self) -> String {
        format_confidence(self.confidence)
    }
}

/// Renders a 0.0–1.0 confidence as a percentage with one decimal place.
pub fn format_confidence(confidence: f64) -> String {
    format!("{:.1}%", confidence * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_confidence_with_one_decimal() {
        assert_eq!(format_confidence(0.873), "87.3%");
        assert_eq!(format_confidence(1.0), "100.0%");
        assert_eq!(format_confidence(0.0), "0.0%");
    }

    #[test]
    fn model_label_parsing_is_case_insensitive() {
        assert_eq!(
            Category::from_model_label("unproductive"),
            Category::Unproductive
        );
        assert_eq!(
            Category::from_model_label("  UNPRODUCTIVE "),
            Category::Unproductive
        );
        assert_eq!(Category::from_model_label("Productive"), Category::Productive);
        assert_eq!(Category::from_model_label("spam???"), Category::Productive);
    }

    #[test]
    fn analysis_clamps_confidence() {
        assert_eq!(Analysis::new(Category::Productive, 1.7, "r").confidence, 1.0);
        assert_eq!(Analysis::new(Category::Productive, -0.2, "r").confidence, 0.0);
    }

    #[test]
    fn category_serializes_as_plain_string() {
        assert_eq!(
            serde_json::to_string(&Category::Unproductive).unwrap(),
            "\"Unproductive\""
        );
    }
}
