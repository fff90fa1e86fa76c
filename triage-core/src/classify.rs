use crate::types::{Analysis, Category};

// Support/billing vocabulary that marks an email as needing action.
// Matched as substrings of the normalized text, so "cancellations" and
// "refunds" hit too.
const PRODUCTIVE_KEYWORDS: &[&str] = &[
    "status",
    "invoice",
    "statement",
    "charge",
    "billing",
    "refund",
    "chargeback",
    "support",
    "error",
    "problem",
    "complaint",
    "cancellation",
    "deadline",
    "request",
    "ticket",
    "help",
    "debit",
    "credit",
    "account",
    "transaction",
    "card",
    "limit",
];

const PRODUCTIVE_REPLY: &str = "Hello! Thank you for reaching out.\n\n\
Your message requires review by our team. It has been forwarded to the \
responsible department and you will receive a follow-up shortly. If \
possible, include any supporting details (account number, invoice id, or \
ticket reference) through our official and secure channels.\n\n\
Best regards,\nSupport Team";

const UNPRODUCTIVE_REPLY: &str = "Hello! Thank you very much for your message.\n\n\
We appreciate you getting in touch. If you ever need support or have \
questions about our products or services, we are available through our \
official channels.\n\n\
Best regards,\nSupport Team";

const EMPTY_CONTENT_REPLY: &str = "We could not identify the content of this email.";

/// Deterministic keyword classification, used when no model is configured
/// or the model call fails. Input is expected to be normalized already.
pub fn rule_based_analysis(normalized_text: &str) -> Analysis {
    if normalized_text.trim().is_empty() {
        return Analysis::new(Category::Unproductive, 0.5, EMPTY_CONTENT_REPLY);
    }

    let is_productive = PRODUCTIVE_KEYWORDS
        .iter()
        .any(|keyword| normalized_text.contains(keyword));

    if is_productive {
        Analysis::new(Category::Productive, 0.75, PRODUCTIVE_REPLY)
    } else {
        Analysis::new(Category::Unproductive, 0.7, UNPRODUCTIVE_REPLY)
    }
}
