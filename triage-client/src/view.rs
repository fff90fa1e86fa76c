use triage_core::types::format_confidence;
use triage_providers::parse::WireAnalysis;

/// The three analysis fields, already formatted for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisDisplay {
    pub category: String,
    pub confidence_pct: String,
    pub reply: String,
}

impl AnalysisDisplay {
    pub fn from_wire(analysis: &WireAnalysis) -> Self {
        Self {
            category: analysis.category.clone(),
            confidence_pct: format_confidence(analysis.confidence),
            reply: analysis.reply.clone(),
        }
    }
}

/// The page surface the handler projects onto.
///
/// `notify` is a blocking notice (validation problems, server errors,
/// unreachable backend); `show_analysis` reveals the result area and fills
/// it in. A failed submission never reaches `show_analysis`.
pub trait ResultView {
    fn notify(&self, message: &str);
    fn show_analysis(&self, display: &AnalysisDisplay);
}
