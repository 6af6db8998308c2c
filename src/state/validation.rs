//! Per-step validation of the application draft
//!
//! Validation is pure: it reads the draft and the current date and returns
//! every problem it finds for one step. It never touches the draft.

use super::attachment::{AttachmentSlot, MAX_ATTACHMENT_BYTES};
use super::draft::{AcademicRecord, Address, ApplicationDraft};
use super::step::WizardStep;
use chrono::{Datelike, NaiveDate};

/// Highest GPA on the national scale
pub const MAX_GPA: f64 = 5.0;

/// One problem with one field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Outcome of validating one step
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    errors: Vec<FieldError>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// All messages joined for display in a single dialog
    pub fn summary(&self) -> String {
        self.errors
            .iter()
            .map(|e| e.message.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(FieldError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Record an error if the value is blank. Returns true when present.
    fn require(&mut self, field: &str, label: &str, value: &str) -> bool {
        if value.trim().is_empty() {
            self.push(field, format!("{label} is required"));
            false
        } else {
            true
        }
    }
}

#[cfg(test)]
impl ValidationResult {
    pub fn has_error_for(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }
}

/// Validate the fields belonging to `step`
pub fn validate_step(
    draft: &ApplicationDraft,
    step: WizardStep,
    today: NaiveDate,
) -> ValidationResult {
    let mut result = ValidationResult::default();
    match step {
        WizardStep::Personal => validate_personal(draft, today, &mut result),
        WizardStep::Contact => validate_contact(draft, &mut result),
        WizardStep::Academic => validate_academic(draft, today, &mut result),
        WizardStep::Guardian => validate_guardian(draft, &mut result),
        WizardStep::Documents => validate_documents(draft, &mut result),
    }
    result
}

fn validate_personal(draft: &ApplicationDraft, today: NaiveDate, result: &mut ValidationResult) {
    result.require("nameEnglish", "Name (English)", &draft.name_english);
    result.require("nameBangla", "Name (Bangla)", &draft.name_bangla);
    result.require("fatherName", "Father's name", &draft.father_name);
    result.require("motherName", "Mother's name", &draft.mother_name);
    result.require("gender", "Gender", &draft.gender);
    result.require("religion", "Religion", &draft.religion);
    result.require("nationality", "Nationality", &draft.nationality);

    if result.require("dateOfBirth", "Date of birth", &draft.date_of_birth) {
        match parse_date(&draft.date_of_birth) {
            Some(dob) if dob >= today => {
                result.push("dateOfBirth", "Date of birth must be in the past")
            }
            Some(_) => {}
            None => result.push("dateOfBirth", "Date of birth must be in YYYY-MM-DD format"),
        }
    }

    let nid = draft.nid_number.trim();
    let birth_reg = draft.birth_registration_number.trim();
    if nid.is_empty() && birth_reg.is_empty() {
        result.push(
            "nidNumber",
            "Either NID number or birth registration number is required",
        );
    }
    if !nid.is_empty() && !is_digits(nid) {
        result.push("nidNumber", "NID number must contain digits only");
    }
    if !birth_reg.is_empty() && !is_digits(birth_reg) {
        result.push(
            "birthRegistrationNumber",
            "Birth registration number must contain digits only",
        );
    }

    match draft.admission_type() {
        None => result.push("admissionType", "Admission type is required"),
        Some(t) if t.uses_group() => {
            result.require("group", "Group", &draft.group);
            if !draft.subject.trim().is_empty() {
                result.push("subject", "Subject applies only to honours and degree admission");
            }
        }
        Some(_) => {
            result.require("subject", "Subject", &draft.subject);
            if !draft.group.trim().is_empty() {
                result.push("group", "Group applies only to inter admission");
            }
        }
    }
}

fn validate_contact(draft: &ApplicationDraft, result: &mut ValidationResult) {
    if result.require("phone", "Phone number", &draft.phone) && !is_phone(&draft.phone) {
        result.push("phone", "Phone number must have 10 to 14 digits");
    }
    if !draft.alternative_phone.trim().is_empty() && !is_phone(&draft.alternative_phone) {
        result.push(
            "alternativePhone",
            "Alternative phone number must have 10 to 14 digits",
        );
    }
    if !draft.email.trim().is_empty() && !is_email(&draft.email) {
        result.push("email", "Email address is not valid");
    }

    validate_address("presentAddress", "Present address", draft.present_address(), result);
    if draft.same_as_present() {
        if draft.permanent_address() != draft.present_address() {
            result.push(
                "permanentAddress",
                "Permanent address must match present address",
            );
        }
    } else {
        validate_address(
            "permanentAddress",
            "Permanent address",
            draft.permanent_address(),
            result,
        );
    }
}

fn validate_address(prefix: &str, label: &str, address: &Address, result: &mut ValidationResult) {
    let parts = [
        ("village", "village/road", &address.village),
        ("postOffice", "post office", &address.post_office),
        ("upazila", "upazila/thana", &address.upazila),
        ("district", "district", &address.district),
    ];
    for (key, name, value) in parts {
        result.require(&format!("{prefix}.{key}"), &format!("{label} {name}"), value);
    }

    let postal = address.postal_code.trim();
    if !postal.is_empty() && !(postal.len() == 4 && is_digits(postal)) {
        result.push(
            format!("{prefix}.postalCode"),
            format!("{label} postal code must be 4 digits"),
        );
    }
}

fn validate_academic(draft: &ApplicationDraft, today: NaiveDate, result: &mut ValidationResult) {
    let birth_year = parse_date(&draft.date_of_birth).map(|d| d.year());
    let ssc_year = validate_record("ssc", "SSC", &draft.ssc, birth_year, today, result);

    if draft.requires_hsc() {
        let hsc_year = validate_record("hsc", "HSC", &draft.hsc, birth_year, today, result);
        if let (Some(ssc), Some(hsc)) = (ssc_year, hsc_year) {
            if hsc <= ssc {
                result.push("hsc.passingYear", "HSC passing year must be after SSC passing year");
            }
        }
    }
}

/// Validate one exam record; returns the passing year when it is usable
fn validate_record(
    prefix: &str,
    exam: &str,
    record: &AcademicRecord,
    birth_year: Option<i32>,
    today: NaiveDate,
    result: &mut ValidationResult,
) -> Option<i32> {
    result.require(&format!("{prefix}.board"), &format!("{exam} board"), &record.board);
    result.require(&format!("{prefix}.roll"), &format!("{exam} roll"), &record.roll);
    result.require(
        &format!("{prefix}.registration"),
        &format!("{exam} registration number"),
        &record.registration,
    );

    let gpa_field = format!("{prefix}.gpa");
    if result.require(&gpa_field, &format!("{exam} GPA"), &record.gpa)
        && parse_gpa(&record.gpa).is_none()
    {
        result.push(gpa_field, format!("{exam} GPA must be between 0 and 5"));
    }

    let year_field = format!("{prefix}.passingYear");
    if !result.require(&year_field, &format!("{exam} passing year"), &record.passing_year) {
        return None;
    }
    let Some(year) = parse_year(&record.passing_year) else {
        result.push(year_field, format!("{exam} passing year must be a 4-digit year"));
        return None;
    };
    if year > today.year() {
        result.push(year_field, format!("{exam} passing year cannot be in the future"));
        return None;
    }
    if birth_year.is_some_and(|b| year <= b) {
        result.push(year_field, format!("{exam} passing year must be after the year of birth"));
        return None;
    }
    Some(year)
}

fn validate_guardian(draft: &ApplicationDraft, result: &mut ValidationResult) {
    result.require("guardianName", "Guardian's name", &draft.guardian_name);
    result.require("guardianRelation", "Relation with guardian", &draft.guardian_relation);
    if result.require("guardianPhone", "Guardian's phone", &draft.guardian_phone)
        && !is_phone(&draft.guardian_phone)
    {
        result.push("guardianPhone", "Guardian's phone must have 10 to 14 digits");
    }

    let income = draft.guardian_monthly_income.trim();
    if !income.is_empty() && !income.parse::<f64>().is_ok_and(|v| v.is_finite() && v >= 0.0) {
        result.push(
            "guardianMonthlyIncome",
            "Monthly income must be a non-negative number",
        );
    }
}

fn validate_documents(draft: &ApplicationDraft, result: &mut ValidationResult) {
    let required = [
        (AttachmentSlot::ProfilePicture, true),
        (AttachmentSlot::SscMarksheet, true),
        (AttachmentSlot::HscMarksheet, draft.requires_hsc()),
    ];
    for (slot, is_required) in required {
        if is_required && draft.attachment(slot).is_none() {
            result.push(slot.part_name(), format!("{} is required", slot.label()));
        }
    }

    for attachment in draft.attachments() {
        if attachment.size() > MAX_ATTACHMENT_BYTES {
            result.push(
                attachment.slot.part_name(),
                format!("{} must be 5 MB or smaller", attachment.slot.label()),
            );
        }
    }
}

/// GPA within [0, 5], or None
pub fn parse_gpa(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|g| g.is_finite() && (0.0..=MAX_GPA).contains(g))
}

fn parse_year(raw: &str) -> Option<i32> {
    let raw = raw.trim();
    if raw.len() == 4 && is_digits(raw) {
        raw.parse().ok()
    } else {
        None
    }
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

fn is_digits(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|c| c.is_ascii_digit())
}

fn is_phone(raw: &str) -> bool {
    let raw = raw.trim();
    let digits = raw.strip_prefix('+').unwrap_or(raw);
    is_digits(digits) && (10..=14).contains(&digits.len())
}

fn is_email(raw: &str) -> bool {
    let raw = raw.trim();
    match raw.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !raw.contains(char::is_whitespace)
                && domain
                    .split_once('.')
                    .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
        }
        None => false,
    }
}
