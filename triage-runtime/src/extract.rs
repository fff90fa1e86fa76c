use anyhow::Context;
use mailparse::{MailHeaderMap, ParsedMail, parse_mail};
use thiserror::Error;
use triage_engine::traits::{DocumentExtractor, EmailDocument};

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("unsupported file type: {0}")]
    UnsupportedFileType(String),
    #[error("no text part in message")]
    NoTextPart,
}

/// Routes uploads to a text decoder by filename extension.
///
/// `.txt` decodes as UTF-8 with a Latin-1 fallback so legacy mailbox
/// exports still yield text; `.eml` walks the MIME tree for the first
/// `text/*` part.
#[derive(Debug, Clone, Default)]
pub struct FileTextExtractor;

impl FileTextExtractor {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl DocumentExtractor for FileTextExtractor {
    async fn extract_text(&self, doc: &EmailDocument) -> anyhow::Result<String> {
        match extension(&doc.filename).as_deref() {
            Some("txt") => Ok(decode_text_bytes(&doc.bytes)),
            Some("eml") => extract_eml_text(&doc.bytes),
            Some(other) => Err(ExtractError::UnsupportedFileType(other.to_string()).into()),
            None => Err(ExtractError::UnsupportedFileType("<none>".to_string()).into()),
        }
    }
}

fn extension(filename: &str) -> Option<String> {
    let (_, ext) = filename.rsplit_once('.')?;
    Some(ext.to_ascii_lowercase())
}

fn decode_text_bytes(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        // Latin-1: every byte maps directly to the code point of the same
        // value, so this cannot fail.
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}

fn extract_eml_text(bytes: &[u8]) -> anyhow::Result<String> {
    let parsed = parse_mail(bytes).context("parse .eml message")?;
    find_text_part(&parsed).ok_or_else(|| ExtractError::NoTextPart.into())
}

// Depth-first: the first text/* part is the message body. Messages with
// no Content-Type header default to text/plain per RFC 2045.
fn find_text_part(part: &ParsedMail) -> Option<String> {
    let content_type = part
        .headers
        .get_first_value("Content-Type")
        .unwrap_or_else(|| "text/plain".to_string());

    if content_type.starts_with("text/") {
        return part.get_body().ok();
    }

    part.subparts.iter().find_map(find_text_part)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(filename: &str, bytes: &[u8]) -> EmailDocument {
        EmailDocument {
            filename: filename.into(),
            mime_type: "application/octet-stream".into(),
            bytes: bytes.to_vec(),
        }
    }

    #[tokio::test]
    async fn decodes_utf8_txt() {
        let text = FileTextExtractor::new()
            .extract_text(&doc("mail.txt", "olá, suporte".as_bytes()))
            .await
            .unwrap();
        assert_eq!(text, "olá, suporte");
    }

    #[tokio::test]
    async fn falls_back_to_latin1_for_invalid_utf8() {
        let text = FileTextExtractor::new()
            .extract_text(&doc("legacy.TXT", b"caf\xe9"))
            .await
            .unwrap();
        assert_eq!(text, "café");
    }

    #[tokio::test]
    async fn extracts_plain_eml_body() {
        let raw = concat!(
            "From: customer@example.com\r\n",
            "To: support@example.com\r\n",
            "Subject: Card limit\r\n",
            "Content-Type: text/plain; charset=utf-8\r\n",
            "\r\n",
            "What is my card limit?\r\n",
        );
        let text = FileTextExtractor::new()
            .extract_text(&doc("mail.eml", raw.as_bytes()))
            .await
            .unwrap();
        assert_eq!(text.trim(), "What is my card limit?");
    }

    #[tokio::test]
    async fn extracts_first_text_part_of_multipart_eml() {
        let raw = concat!(
            "From: customer@example.com\r\n",
            "Subject: Refund\r\n",
            "Content-Type: multipart/alternative; boundary=\"b1\"\r\n",
            "\r\n",
            "--b1\r\n",
            "Content-Type: text/plain; charset=utf-8\r\n",
            "\r\n",
            "Where is my refund?\r\n",
            "--b1\r\n",
            "Content-Type: text/html; charset=utf-8\r\n",
            "\r\n",
            "<p>Where is my refund?</p>\r\n",
            "--b1--\r\n",
        );
        let text = FileTextExtractor::new()
            .extract_text(&doc("mail.eml", raw.as_bytes()))
            .await
            .unwrap();
        assert_eq!(text.trim(), "Where is my refund?");
    }

    #[tokio::test]
    async fn rejects_unsupported_extensions() {
        let err = FileTextExtractor::new()
            .extract_text(&doc("mail.pdf", b"%PDF-1.4"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "unsupported file type: pdf");

        let err = FileTextExtractor::new()
            .extract_text(&doc("README", b"hi"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "unsupported file type: <none>");
    }
}
