//! Admissions API module for HTTP communication

mod client;
mod error;
mod submission;
mod traits;

pub use client::AdmissionClient;
pub use submission::{AdmissionSubmission, SubmissionReceipt};
pub use traits::AdmissionClientTrait;

#[cfg(test)]
pub use error::ApiError;
#[cfg(test)]
pub use traits::MockAdmissionClientTrait;
