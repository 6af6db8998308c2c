//! Trait abstraction for the admissions client to enable mocking in tests

use super::client::AdmissionClient;
use super::error::ApiError;
use super::submission::{AdmissionSubmission, SubmissionReceipt};
use async_trait::async_trait;

/// Operations the app needs from the admissions server
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AdmissionClientTrait: Send + Sync {
    /// Send a complete application
    async fn submit_application(
        &self,
        submission: AdmissionSubmission,
    ) -> Result<SubmissionReceipt, ApiError>;
}

#[async_trait]
impl AdmissionClientTrait for AdmissionClient {
    async fn submit_application(
        &self,
        submission: AdmissionSubmission,
    ) -> Result<SubmissionReceipt, ApiError> {
        AdmissionClient::submit_application(self, submission).await
    }
}
