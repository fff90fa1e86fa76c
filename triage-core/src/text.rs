use regex::Regex;
use std::sync::OnceLock;

fn noise_chars_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        // Keep letters (any script), digits, and whitespace; everything else
        // (punctuation, symbols, control chars) becomes a space so words
        // stay separated.
        Regex::new(r"[^\p{L}\p{N}\s]").expect("valid noise chars regex")
    })
}

fn whitespace_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("valid whitespace regex"))
}

/// Normalizes raw email text before classification:
/// lowercase, strip punctuation/symbols, collapse whitespace runs.
pub fn normalize_email_text(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let lowered = text.to_lowercase();
    let stripped = noise_chars_re().replace_all(&lowered, " ");
    let collapsed = whitespace_re().replace_all(&stripped, " ");

    collapsed.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_strips_punctuation() {
        assert_eq!(
            normalize_email_text("Hello, World! Ticket #123."),
            "hello world ticket 123"
        );
    }

    #[test]
    fn collapses_whitespace_runs() {
        assert_eq!(normalize_email_text("a   b\n\n\tc"), "a b c");
    }

    #[test]
    fn keeps_accented_letters() {
        assert_eq!(normalize_email_text("Olá, você!"), "olá você");
    }

    #[test]
    fn empty_input_stays_empty() {
        assert_eq!(normalize_email_text(""), "");
        assert_eq!(normalize_email_text("  \n "), "");
    }
}
