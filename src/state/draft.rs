//! The in-progress admission application

use super::attachment::{Attachment, AttachmentSlot};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Applicant tier; decides which academic records are mandatory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdmissionType {
    InterFirstYear,
    HonoursFirstYear,
    DegreeFirstYear,
}

impl AdmissionType {
    pub const ALL: [AdmissionType; 3] = [
        Self::InterFirstYear,
        Self::HonoursFirstYear,
        Self::DegreeFirstYear,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::InterFirstYear => "Inter 1st Year",
            Self::HonoursFirstYear => "Honours 1st Year",
            Self::DegreeFirstYear => "Degree 1st Year",
        }
    }

    /// Higher-secondary results are needed for every tier above inter
    pub fn requires_hsc(self) -> bool {
        !matches!(self, Self::InterFirstYear)
    }

    /// Inter applicants pick a group; the others pick a subject
    pub fn uses_group(self) -> bool {
        matches!(self, Self::InterFirstYear)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub village: String,
    pub post_office: String,
    pub upazila: String,
    pub district: String,
    pub postal_code: String,
}

/// Exam metadata for one tier (SSC or HSC)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcademicRecord {
    pub board: String,
    pub roll: String,
    pub registration: String,
    pub passing_year: String,
    pub gpa: String,
}

/// All form fields for one application.
///
/// Attachments are kept out of the JSON body; they travel as their own
/// multipart parts.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationDraft {
    pub draft_id: Uuid,

    // Personal
    pub name_english: String,
    pub name_bangla: String,
    pub father_name: String,
    pub mother_name: String,
    pub date_of_birth: String,
    pub gender: String,
    pub religion: String,
    pub nationality: String,
    pub blood_group: String,
    pub nid_number: String,
    pub birth_registration_number: String,
    admission_type: Option<AdmissionType>,
    pub group: String,
    pub subject: String,

    // Contact
    pub phone: String,
    pub alternative_phone: String,
    pub email: String,
    present_address: Address,
    permanent_address: Address,
    same_as_present: bool,

    // Academic
    pub ssc: AcademicRecord,
    pub hsc: AcademicRecord,

    // Guardian
    pub guardian_name: String,
    pub guardian_relation: String,
    pub guardian_phone: String,
    pub guardian_occupation: String,
    pub guardian_monthly_income: String,

    #[serde(skip)]
    attachments: BTreeMap<AttachmentSlot, Attachment>,
}

impl ApplicationDraft {
    pub fn new() -> Self {
        Self {
            draft_id: Uuid::new_v4(),
            name_english: String::new(),
            name_bangla: String::new(),
            father_name: String::new(),
            mother_name: String::new(),
            date_of_birth: String::new(),
            gender: String::new(),
            religion: String::new(),
            nationality: "Bangladeshi".to_string(),
            blood_group: String::new(),
            nid_number: String::new(),
            birth_registration_number: String::new(),
            admission_type: None,
            group: String::new(),
            subject: String::new(),
            phone: String::new(),
            alternative_phone: String::new(),
            email: String::new(),
            present_address: Address::default(),
            permanent_address: Address::default(),
            same_as_present: false,
            ssc: AcademicRecord::default(),
            hsc: AcademicRecord::default(),
            guardian_name: String::new(),
            guardian_relation: String::new(),
            guardian_phone: String::new(),
            guardian_occupation: String::new(),
            guardian_monthly_income: String::new(),
            attachments: BTreeMap::new(),
        }
    }

    pub fn admission_type(&self) -> Option<AdmissionType> {
        self.admission_type
    }

    /// Set the admission tier and clear the preference field it rules out
    pub fn set_admission_type(&mut self, admission_type: Option<AdmissionType>) {
        self.admission_type = admission_type;
        match admission_type {
            Some(t) if t.uses_group() => self.subject.clear(),
            Some(_) => self.group.clear(),
            None => {}
        }
    }

    pub fn requires_hsc(&self) -> bool {
        self.admission_type.is_some_and(AdmissionType::requires_hsc)
    }

    pub fn present_address(&self) -> &Address {
        &self.present_address
    }

    pub fn permanent_address(&self) -> &Address {
        &self.permanent_address
    }

    pub fn same_as_present(&self) -> bool {
        self.same_as_present
    }

    /// Toggle mirroring of the present address into the permanent one.
    ///
    /// Turning it on copies the present address; turning it off keeps the
    /// copied values so they can be edited independently.
    pub fn set_same_as_present(&mut self, same: bool) {
        self.same_as_present = same;
        if same {
            self.permanent_address = self.present_address.clone();
        }
    }

    /// Edit the present address, keeping the permanent copy in sync
    pub fn update_present_address(&mut self, edit: impl FnOnce(&mut Address)) {
        edit(&mut self.present_address);
        if self.same_as_present {
            self.permanent_address = self.present_address.clone();
        }
    }

    /// Edit the permanent address. Returns false while it mirrors the present one.
    pub fn update_permanent_address(&mut self, edit: impl FnOnce(&mut Address)) -> bool {
        if self.same_as_present {
            return false;
        }
        edit(&mut self.permanent_address);
        true
    }

    pub fn attachment(&self, slot: AttachmentSlot) -> Option<&Attachment> {
        self.attachments.get(&slot)
    }

    pub fn attachments(&self) -> impl Iterator<Item = &Attachment> {
        self.attachments.values()
    }

    pub fn attach(&mut self, attachment: Attachment) {
        self.attachments.insert(attachment.slot, attachment);
    }

    pub fn detach(&mut self, slot: AttachmentSlot) -> Option<Attachment> {
        self.attachments.remove(&slot)
    }
}

impl Default for ApplicationDraft {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_present(draft: &mut ApplicationDraft) {
        draft.update_present_address(|a| {
            a.village = "Kazipara".to_string();
            a.post_office = "Mirpur".to_string();
            a.upazila = "Mirpur".to_string();
            a.district = "Dhaka".to_string();
            a.postal_code = "1216".to_string();
        });
    }

    mod admission_type {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_serializes_snake_case() {
            let json = serde_json::to_string(&AdmissionType::InterFirstYear).unwrap();
            assert_eq!(json, "\"inter_first_year\"");
            let json = serde_json::to_string(&AdmissionType::HonoursFirstYear).unwrap();
            assert_eq!(json, "\"honours_first_year\"");
        }

        #[test]
        fn test_only_inter_skips_hsc() {
            assert!(!AdmissionType::InterFirstYear.requires_hsc());
            assert!(AdmissionType::HonoursFirstYear.requires_hsc());
            assert!(AdmissionType::DegreeFirstYear.requires_hsc());
        }

        #[test]
        fn test_switching_to_inter_clears_subject() {
            let mut draft = ApplicationDraft::new();
            draft.set_admission_type(Some(AdmissionType::HonoursFirstYear));
            draft.subject = "Physics".to_string();
            draft.set_admission_type(Some(AdmissionType::InterFirstYear));
            assert!(draft.subject.is_empty());
        }

        #[test]
        fn test_switching_to_degree_clears_group() {
            let mut draft = ApplicationDraft::new();
            draft.set_admission_type(Some(AdmissionType::InterFirstYear));
            draft.group = "Science".to_string();
            draft.set_admission_type(Some(AdmissionType::DegreeFirstYear));
            assert!(draft.group.is_empty());
        }

        #[test]
        fn test_requires_hsc_false_when_unset() {
            assert!(!ApplicationDraft::new().requires_hsc());
        }
    }

    mod same_address {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_setting_flag_copies_present() {
            let mut draft = ApplicationDraft::new();
            filled_present(&mut draft);
            draft.set_same_as_present(true);
            assert_eq!(draft.permanent_address(), draft.present_address());
        }

        #[test]
        fn test_permanent_read_only_while_flag_set() {
            let mut draft = ApplicationDraft::new();
            filled_present(&mut draft);
            draft.set_same_as_present(true);
            let changed = draft.update_permanent_address(|a| a.district = "Khulna".to_string());
            assert!(!changed);
            assert_eq!(draft.permanent_address().district, "Dhaka");
        }

        #[test]
        fn test_present_edits_mirror_while_flag_set() {
            let mut draft = ApplicationDraft::new();
            filled_present(&mut draft);
            draft.set_same_as_present(true);
            draft.update_present_address(|a| a.district = "Gazipur".to_string());
            assert_eq!(draft.permanent_address().district, "Gazipur");
        }

        #[test]
        fn test_unsetting_keeps_values_and_restores_editing() {
            let mut draft = ApplicationDraft::new();
            filled_present(&mut draft);
            draft.set_same_as_present(true);
            draft.set_same_as_present(false);
            assert_eq!(draft.permanent_address().village, "Kazipara");

            assert!(draft.update_permanent_address(|a| a.village = "Banani".to_string()));
            assert_eq!(draft.permanent_address().village, "Banani");
            assert_eq!(draft.present_address().village, "Kazipara");
        }
    }

    mod serialization {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_json_uses_camel_case_keys() {
            let mut draft = ApplicationDraft::new();
            draft.name_english = "Rahim Uddin".to_string();
            draft.set_admission_type(Some(AdmissionType::InterFirstYear));
            filled_present(&mut draft);

            let value = serde_json::to_value(&draft).unwrap();
            assert_eq!(value["nameEnglish"], "Rahim Uddin");
            assert_eq!(value["admissionType"], "inter_first_year");
            assert_eq!(value["presentAddress"]["postOffice"], "Mirpur");
            assert_eq!(value["sameAsPresent"], false);
            assert!(value["ssc"]["passingYear"].is_string());
        }

        #[test]
        fn test_attachments_not_serialized() {
            let mut draft = ApplicationDraft::new();
            draft.attach(
                Attachment::from_bytes(AttachmentSlot::ProfilePicture, "me.png", vec![1])
                    .unwrap(),
            );
            let value = serde_json::to_value(&draft).unwrap();
            assert!(value.get("attachments").is_none());
        }
    }

    #[test]
    fn test_new_drafts_get_distinct_ids() {
        assert_ne!(ApplicationDraft::new().draft_id, ApplicationDraft::new().draft_id);
    }

    #[test]
    fn test_attach_replaces_same_slot() {
        let mut draft = ApplicationDraft::new();
        draft.attach(
            Attachment::from_bytes(AttachmentSlot::SscMarksheet, "a.pdf", vec![1]).unwrap(),
        );
        draft.attach(
            Attachment::from_bytes(AttachmentSlot::SscMarksheet, "b.pdf", vec![2]).unwrap(),
        );
        assert_eq!(draft.attachments().count(), 1);
        assert_eq!(
            draft.attachment(AttachmentSlot::SscMarksheet).unwrap().file_name,
            "b.pdf"
        );
    }
}
