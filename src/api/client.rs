//! HTTP client for the college admissions API
//!
//! An application goes out as a single multipart POST. The draft id rides
//! along as an `Idempotency-Key` so a retried request can be recognised.

use super::error::ApiError;
use super::submission::{server_error_message, AdmissionSubmission, SubmissionReceipt, DATA_PART};
use crate::config::TuiConfig;
use anyhow::Result;
use reqwest::multipart::{Form, Part};

pub const IDEMPOTENCY_HEADER: &str = "Idempotency-Key";

/// Client for posting applications to the admissions server
pub struct AdmissionClient {
    http: reqwest::Client,
    endpoint: String,
    auth_token: Option<String>,
}

impl AdmissionClient {
    /// Create a new client from the loaded configuration
    pub fn new(config: &TuiConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .user_agent(concat!("admission-tui/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            endpoint: config.endpoint(),
            auth_token: config.auth_token().map(str::to_string),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn build_form(submission: AdmissionSubmission) -> Result<Form, ApiError> {
        let mut form = Form::new().text(DATA_PART, submission.data);
        for file in submission.files {
            let part = Part::bytes(file.bytes)
                .file_name(file.file_name)
                .mime_str(file.mime_type)?;
            form = form.part(file.part_name, part);
        }
        Ok(form)
    }

    /// Post one application and read the server's receipt
    pub async fn submit_application(
        &self,
        submission: AdmissionSubmission,
    ) -> Result<SubmissionReceipt, ApiError> {
        let draft_id = submission.draft_id;
        let file_count = submission.files.len();
        let form = Self::build_form(submission)?;

        let mut request = self
            .http
            .post(&self.endpoint)
            .header(IDEMPOTENCY_HEADER, draft_id.to_string())
            .multipart(form);
        if let Some(token) = &self.auth_token {
            request = request.bearer_auth(token);
        }

        tracing::info!(%draft_id, files = file_count, endpoint = %self.endpoint, "submitting application");
        let response = request.send().await.map_err(|e| {
            tracing::error!(%draft_id, error = %e, "submission request failed");
            ApiError::Network(e)
        })?;

        let status = response.status();
        let body = response.text().await?;

        if status.is_success() {
            let receipt = SubmissionReceipt::from_body(&body);
            tracing::info!(
                %draft_id,
                status = status.as_u16(),
                application_id = receipt.application_id.as_deref().unwrap_or("-"),
                "application accepted"
            );
            Ok(receipt)
        } else {
            let message =
                server_error_message(status.as_u16(), status.canonical_reason(), &body);
            tracing::error!(%draft_id, status = status.as_u16(), %message, "application rejected");
            Err(ApiError::Server {
                status: status.as_u16(),
                message,
            })
        }
    }
}
