use crate::request::{Body, HttpRequest};

/// Where the analysis API lives. The default matches a locally running
/// `triage serve`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzeEndpoint {
    pub url: String,
}

impl AnalyzeEndpoint {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

/// An email file attached to a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailUpload {
    pub filename: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

pub fn mime_type_for(filename: &str) -> &'static str {
    match filename.rsplit('.').next().map(str::to_ascii_lowercase).as_deref() {
        Some("txt") => "text/plain",
        Some("eml") => "message/rfc822",
        _ => "application/octet-stream",
    }
}

/// Builds the multipart POST for `/analyze-email`.
///
/// Only present inputs become parts: `email_text` for inline text, `file`
/// for an upload. The caller validates that at least one is present.
pub fn build_analyze_email_request(
    endpoint: &AnalyzeEndpoint,
    email_text: Option<&str>,
    file: Option<&EmailUpload>,
) -> HttpRequest {
    let boundary = format!("Boundary-{}", uuid::Uuid::new_v4());

    let mut body: Vec<u8> = Vec::new();

    if let Some(text) = email_text {
        append_field(&mut body, &boundary, "email_text", text);
    }
    if let Some(upload) = file {
        append_file(
            &mut body,
            &boundary,
            "file",
            &upload.filename,
            &upload.mime_type,
            &upload.bytes,
        );
    }

    body.extend_from_slice(format!("--{}--\r\n", boundary).as_bytes());

    HttpRequest {
        method: "POST".into(),
        url: endpoint.url.clone(),
        headers: vec![
            (
                "Content-Type".into(),
                format!("multipart/form-data; boundary={}", boundary),
            ),
            ("Accept".into(), "application/json".into()),
        ],
        body: Body::MultipartFormData { boundary, bytes: body },
    }
}

fn append_field(body: &mut Vec<u8>, boundary: &str, name: &str, value: &str) {
    body.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());
    body.extend_from_slice(
        format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name).as_bytes(),
    );
    body.extend_from_slice(value.as_bytes());
    body.extend_from_slice(b"\r\n");
}

fn append_file(
    body: &mut Vec<u8>,
    boundary: &str,
    name: &str,
    filename: &str,
    mime_type: &str,
    bytes: &[u8],
) {
    body.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
            name, filename
        )
        .as_bytes(),
    );
    body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", mime_type).as_bytes());
    body.extend_from_slice(bytes);
    body.extend_from_slice(b"\r\n");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoint() -> AnalyzeEndpoint {
        AnalyzeEndpoint::new("http://127.0.0.1:8000/analyze-email")
    }

    fn body_text(req: &HttpRequest) -> String {
        match &req.body {
            Body::MultipartFormData { bytes, .. } => String::from_utf8_lossy(bytes).to_string(),
            other => panic!("expected multipart, got {other:?}"),
        }
    }

    #[test]
    fn includes_both_parts_when_both_present() {
        let upload = EmailUpload {
            filename: "mail.eml".into(),
            mime_type: "message/rfc822".into(),
            bytes: b"raw message".to_vec(),
        };
        let req =
            build_analyze_email_request(&endpoint(), Some("what is my card limit?"), Some(&upload));

        assert_eq!(req.method, "POST");
        assert!(req.url.ends_with("/analyze-email"));
        assert!(req.header("content-type").unwrap().starts_with("multipart/form-data"));

        let body = body_text(&req);
        assert!(body.contains("name=\"email_text\""));
        assert!(body.contains("what is my card limit?"));
        assert!(body.contains("name=\"file\"; filename=\"mail.eml\""));
        assert!(body.contains("Content-Type: message/rfc822"));
        assert!(body.contains("raw message"));
    }

    #[test]
    fn omits_file_part_for_text_only_submission() {
        let req = build_analyze_email_request(&endpoint(), Some("hello"), None);
        let body = body_text(&req);
        assert!(body.contains("name=\"email_text\""));
        assert!(!body.contains("name=\"file\""));
    }

    #[test]
    fn omits_text_part_for_file_only_submission() {
        let upload = EmailUpload {
            filename: "mail.txt".into(),
            mime_type: "text/plain".into(),
            bytes: b"hi".to_vec(),
        };
        let req = build_analyze_email_request(&endpoint(), None, Some(&upload));
        let body = body_text(&req);
        assert!(!body.contains("name=\"email_text\""));
        assert!(body.contains("name=\"file\"; filename=\"mail.txt\""));
    }

    #[test]
    fn body_closes_with_final_boundary() {
        let req = build_analyze_email_request(&endpoint(), Some("x"), None);
        let boundary = match &req.body {
            Body::MultipartFormData { boundary, .. } => boundary.clone(),
            _ => unreachable!(),
        };
        assert!(body_text(&req).ends_with(&format!("--{}--\r\n", boundary)));
    }

    #[test]
    fn guesses_mime_type_from_extension() {
        assert_eq!(mime_type_for("a.txt"), "text/plain");
        assert_eq!(mime_type_for("a.EML"), "message/rfc822");
        assert_eq!(mime_type_for("a.pdf"), "application/octet-stream");
        assert_eq!(mime_type_for("noext"), "application/octet-stream");
    }
}
