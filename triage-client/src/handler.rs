use crate::submission::Submission;
use crate::view::{AnalysisDisplay, ResultView};
use async_trait::async_trait;
use triage_providers::analyze::{AnalyzeEndpoint, build_analyze_email_request};
use triage_providers::parse::{AnalyzeReply, WireAnalysis, parse_analyze_response};
use triage_providers::request::HttpRequest;
use triage_providers::runtime::{HttpResponse, execute};

/// Where submissions go when nothing else is configured; matches a locally
/// running `triage serve`.
pub const DEFAULT_ANALYZE_URL: &str = "http://127.0.0.1:8000/analyze-email";

pub const EMPTY_SUBMISSION_NOTICE: &str = "Provide email text or upload a file.";
pub const UNREACHABLE_NOTICE: &str =
    "Could not reach the analysis API. Check that the server is running.";

/// Transport seam so the handler is testable without a network.
#[async_trait]
pub trait AnalyzeTransport: Send + Sync {
    async fn send(&self, req: &HttpRequest) -> anyhow::Result<HttpResponse>;
}

#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport;

#[async_trait]
impl AnalyzeTransport for ReqwestTransport {
    async fn send(&self, req: &HttpRequest) -> anyhow::Result<HttpResponse> {
        execute(req).await
    }
}

/// How one submission ended.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Validation failed; no request was sent.
    Rejected,
    /// The API answered with its error shape.
    ServerError(String),
    /// The request or the response decode failed.
    TransportFailed,
    Analyzed(WireAnalysis),
}

/// Intercepts a submission and drives it to completion.
///
/// Each call is stateless relative to prior calls. Overlapping submissions
/// are not guarded; the last response to resolve wins the view.
pub struct SubmissionHandler<T = ReqwestTransport> {
    endpoint: AnalyzeEndpoint,
    transport: T,
}

impl SubmissionHandler<ReqwestTransport> {
    pub fn new(endpoint_url: impl Into<String>) -> Self {
        Self::with_transport(endpoint_url, ReqwestTransport)
    }
}

impl<T: AnalyzeTransport> SubmissionHandler<T> {
    pub fn with_transport(endpoint_url: impl Into<String>, transport: T) -> Self {
        Self {
            endpoint: AnalyzeEndpoint::new(endpoint_url),
            transport,
        }
    }

    pub async fn submit(&self, submission: &Submission, view: &dyn ResultView) -> SubmitOutcome {
        if submission.is_empty() {
            view.notify(EMPTY_SUBMISSION_NOTICE);
            return SubmitOutcome::Rejected;
        }

        let req = build_analyze_email_request(
            &self.endpoint,
            submission.email_text.as_deref(),
            submission.email_file.as_ref(),
        );

        match self.round_trip(&req).await {
            Ok(AnalyzeReply::Error(message)) => {
                view.notify(&message);
                SubmitOutcome::ServerError(message)
            }
            Ok(AnalyzeReply::Analysis(analysis)) => {
                view.show_analysis(&AnalysisDisplay::from_wire(&analysis));
                SubmitOutcome::Analyzed(analysis)
            }
            Err(e) => {
                tracing::error!("analyze request failed: {e:#}");
                view.notify(UNREACHABLE_NOTICE);
                SubmitOutcome::TransportFailed
            }
        }
    }

    async fn round_trip(&self, req: &HttpRequest) -> anyhow::Result<AnalyzeReply> {
        let resp = self.transport.send(req).await?;
        parse_analyze_response(&resp.body)
    }
}
