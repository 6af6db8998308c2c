//! Submission payload and server receipt
//!
//! The draft is packed into one request: a `data` part holding the JSON of
//! every non-file field, plus one part per attached file.

use super::error::ApiError;
use crate::state::ApplicationDraft;
use serde_json::Value;
use uuid::Uuid;

/// Multipart part name of the JSON body
pub const DATA_PART: &str = "data";

/// One file part of the multipart body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePart {
    pub part_name: &'static str,
    pub file_name: String,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

/// Everything needed to send one application
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdmissionSubmission {
    /// Sent as the idempotency key
    pub draft_id: Uuid,
    /// JSON of all non-file fields
    pub data: String,
    pub files: Vec<FilePart>,
}

impl AdmissionSubmission {
    pub fn from_draft(draft: &ApplicationDraft) -> Result<Self, ApiError> {
        let data = serde_json::to_string(draft)?;
        let files = draft
            .attachments()
            .map(|a| FilePart {
                part_name: a.slot.part_name(),
                file_name: a.file_name.clone(),
                mime_type: a.mime_type,
                bytes: a.bytes.clone(),
            })
            .collect();
        Ok(Self {
            draft_id: draft.draft_id,
            data,
            files,
        })
    }
}

#[cfg(test)]
impl AdmissionSubmission {
    /// Parsed view of the `data` part
    pub fn data_json(&self) -> Result<Value, ApiError> {
        Ok(serde_json::from_str(&self.data)?)
    }

    pub fn file(&self, part_name: &str) -> Option<&FilePart> {
        self.files.iter().find(|f| f.part_name == part_name)
    }
}

/// What the server told us after accepting an application
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionReceipt {
    pub message: Option<String>,
    pub application_id: Option<String>,
}

impl SubmissionReceipt {
    /// Read a success body leniently; non-JSON bodies give an empty receipt
    pub fn from_body(body: &str) -> Self {
        let Ok(json) = serde_json::from_str::<Value>(body) else {
            return Self::default();
        };
        let application_id = [
            json.pointer("/data/applicationId"),
            json.pointer("/data/id"),
            json.get("applicationId"),
            json.get("id"),
        ]
        .into_iter()
        .flatten()
        .find_map(value_to_string);

        Self {
            message: json.get("message").and_then(value_to_string),
            application_id,
        }
    }
}

/// Best message for a failed response: the body's `message` or `error`,
/// falling back to the status text
pub fn server_error_message(status: u16, reason: Option<&str>, body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|json| {
            ["message", "error"]
                .iter()
                .filter_map(|key| json.get(key).and_then(value_to_string))
                .find(|m| !m.trim().is_empty())
        })
        .unwrap_or_else(|| match reason {
            Some(reason) => format!("Submission failed: {status} {reason}"),
            None => format!("Submission failed with status {status}"),
        })
}

fn value_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::fixtures::valid_draft;
    use crate::state::{AdmissionType, AttachmentSlot};

    mod from_draft {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_data_holds_non_file_fields() {
            let draft = valid_draft(AdmissionType::InterFirstYear);
            let submission = AdmissionSubmission::from_draft(&draft).unwrap();
            let json = submission.data_json().unwrap();

            assert_eq!(json["admissionType"], "inter_first_year");
            assert_eq!(json["nameEnglish"], "Rahim Uddin");
            assert_eq!(json["ssc"]["gpa"], "5.00");
            assert_eq!(json["draftId"], draft.draft_id.to_string());
            assert!(json.get("attachments").is_none());
        }

        #[test]
        fn test_one_part_per_attachment() {
            let draft = valid_draft(AdmissionType::HonoursFirstYear);
            let submission = AdmissionSubmission::from_draft(&draft).unwrap();

            let mut names: Vec<_> = submission.files.iter().map(|f| f.part_name).collect();
            names.sort();
            assert_eq!(names, vec!["hscMarksheet", "profilePicture", "sscMarksheet"]);

            let photo = submission
                .file(AttachmentSlot::ProfilePicture.part_name())
                .unwrap();
            assert_eq!(photo.file_name, "photo.jpg");
            assert_eq!(photo.mime_type, "image/jpeg");
            assert_eq!(photo.bytes.len(), 32);
        }

        #[test]
        fn test_draft_id_carried_over() {
            let draft = valid_draft(AdmissionType::DegreeFirstYear);
            let submission = AdmissionSubmission::from_draft(&draft).unwrap();
            assert_eq!(submission.draft_id, draft.draft_id);
        }
    }

    mod receipt {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_nested_application_id() {
            let body = r#"{"message":"Application received","data":{"applicationId":"ADM-2026-0042"}}"#;
            assert_eq!(
                SubmissionReceipt::from_body(body),
                SubmissionReceipt {
                    message: Some("Application received".to_string()),
                    application_id: Some("ADM-2026-0042".to_string()),
                }
            );
        }

        #[test]
        fn test_numeric_top_level_id() {
            let receipt = SubmissionReceipt::from_body(r#"{"id": 42}"#);
            assert_eq!(receipt.application_id.as_deref(), Some("42"));
            assert!(receipt.message.is_none());
        }

        #[test]
        fn test_non_json_body() {
            assert_eq!(SubmissionReceipt::from_body("OK"), SubmissionReceipt::default());
        }
    }

    mod error_message {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_prefers_message_field() {
            let body = r#"{"success":false,"message":"SSC roll already used"}"#;
            assert_eq!(
                server_error_message(409, Some("Conflict"), body),
                "SSC roll already used"
            );
        }

        #[test]
        fn test_falls_back_to_error_field() {
            let body = r#"{"error":"Unauthorized"}"#;
            assert_eq!(server_error_message(401, None, body), "Unauthorized");
        }

        #[test]
        fn test_structured_message_falls_through_to_error() {
            let body = r#"{"message":{"sscRoll":["taken"]},"error":"Validation failed"}"#;
            assert_eq!(
                server_error_message(422, Some("Unprocessable Entity"), body),
                "Validation failed"
            );
        }

        #[test]
        fn test_falls_back_to_status() {
            assert_eq!(
                server_error_message(502, Some("Bad Gateway"), "<html>"),
                "Submission failed: 502 Bad Gateway"
            );
            assert_eq!(
                server_error_message(599, None, r#"{"message":""}"#),
                "Submission failed with status 599"
            );
        }
    }
}
