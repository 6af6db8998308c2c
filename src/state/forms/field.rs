//! Form field identifiers and how each one reads and writes the draft

use crate::state::attachment::AttachmentSlot;
use crate::state::draft::{AcademicRecord, Address, AdmissionType, ApplicationDraft};
use crate::state::step::WizardStep;

pub const GENDERS: &[&str] = &["Male", "Female", "Other"];
pub const RELIGIONS: &[&str] = &["Islam", "Hinduism", "Buddhism", "Christianity", "Other"];
pub const BLOOD_GROUPS: &[&str] = &["A+", "A-", "B+", "B-", "AB+", "AB-", "O+", "O-"];
pub const GROUPS: &[&str] = &["Science", "Humanities", "Business Studies"];

/// How a field accepts input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    /// ASCII digits only
    Digits,
    /// Digits and a single decimal point
    Decimal,
    /// Digits with an optional leading '+'
    Phone,
    /// YYYY-MM-DD, digits and dashes
    Date,
    Choice(&'static [&'static str]),
    AdmissionType,
    Toggle,
    File(AttachmentSlot),
}

impl FieldKind {
    /// Whether `c` may be typed into a field of this kind with `current` content
    pub fn accepts(&self, c: char, current: &str) -> bool {
        match self {
            Self::Text => !c.is_control(),
            Self::Digits => c.is_ascii_digit(),
            Self::Decimal => c.is_ascii_digit() || (c == '.' && !current.contains('.')),
            Self::Phone => c.is_ascii_digit() || (c == '+' && current.is_empty()),
            Self::Date => c.is_ascii_digit() || c == '-',
            Self::File(_) => !c.is_control(),
            Self::Choice(_) | Self::AdmissionType | Self::Toggle => false,
        }
    }

    pub fn is_file(&self) -> bool {
        matches!(self, Self::File(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressPart {
    Village,
    PostOffice,
    Upazila,
    District,
    PostalCode,
}

impl AddressPart {
    pub const ALL: [AddressPart; 5] = [
        Self::Village,
        Self::PostOffice,
        Self::Upazila,
        Self::District,
        Self::PostalCode,
    ];

    fn label(&self) -> &'static str {
        match self {
            Self::Village => "Village/Road",
            Self::PostOffice => "Post Office",
            Self::Upazila => "Upazila/Thana",
            Self::District => "District",
            Self::PostalCode => "Postal Code",
        }
    }

    fn get<'a>(&self, address: &'a Address) -> &'a String {
        match self {
            Self::Village => &address.village,
            Self::PostOffice => &address.post_office,
            Self::Upazila => &address.upazila,
            Self::District => &address.district,
            Self::PostalCode => &address.postal_code,
        }
    }

    fn get_mut<'a>(&self, address: &'a mut Address) -> &'a mut String {
        match self {
            Self::Village => &mut address.village,
            Self::PostOffice => &mut address.post_office,
            Self::Upazila => &mut address.upazila,
            Self::District => &mut address.district,
            Self::PostalCode => &mut address.postal_code,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordPart {
    Board,
    Roll,
    Registration,
    PassingYear,
    Gpa,
}

impl RecordPart {
    pub const ALL: [RecordPart; 5] = [
        Self::Board,
        Self::Roll,
        Self::Registration,
        Self::PassingYear,
        Self::Gpa,
    ];

    fn label(&self) -> &'static str {
        match self {
            Self::Board => "Board",
            Self::Roll => "Roll",
            Self::Registration => "Registration No.",
            Self::PassingYear => "Passing Year",
            Self::Gpa => "GPA (0-5)",
        }
    }

    fn get<'a>(&self, record: &'a AcademicRecord) -> &'a String {
        match self {
            Self::Board => &record.board,
            Self::Roll => &record.roll,
            Self::Registration => &record.registration,
            Self::PassingYear => &record.passing_year,
            Self::Gpa => &record.gpa,
        }
    }

    fn get_mut<'a>(&self, record: &'a mut AcademicRecord) -> &'a mut String {
        match self {
            Self::Board => &mut record.board,
            Self::Roll => &mut record.roll,
            Self::Registration => &mut record.registration,
            Self::PassingYear => &mut record.passing_year,
            Self::Gpa => &mut record.gpa,
        }
    }
}

/// Every editable field in the wizard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldId {
    NameEnglish,
    NameBangla,
    FatherName,
    MotherName,
    DateOfBirth,
    Gender,
    Religion,
    Nationality,
    BloodGroup,
    NidNumber,
    BirthRegistrationNumber,
    AdmissionType,
    Group,
    Subject,

    Phone,
    AlternativePhone,
    Email,
    Present(AddressPart),
    SameAsPresent,
    Permanent(AddressPart),

    Ssc(RecordPart),
    Hsc(RecordPart),

    GuardianName,
    GuardianRelation,
    GuardianPhone,
    GuardianOccupation,
    GuardianMonthlyIncome,

    Attachment(AttachmentSlot),
}

impl FieldId {
    /// Fields shown on `step`, given what the draft currently selects
    pub fn for_step(step: WizardStep, draft: &ApplicationDraft) -> Vec<FieldId> {
        match step {
            WizardStep::Personal => {
                let mut fields = vec![
                    Self::NameEnglish,
                    Self::NameBangla,
                    Self::FatherName,
                    Self::MotherName,
                    Self::DateOfBirth,
                    Self::Gender,
                    Self::Religion,
                    Self::Nationality,
                    Self::BloodGroup,
                    Self::NidNumber,
                    Self::BirthRegistrationNumber,
                    Self::AdmissionType,
                ];
                match draft.admission_type() {
                    Some(t) if t.uses_group() => fields.push(Self::Group),
                    Some(_) => fields.push(Self::Subject),
                    None => {}
                }
                fields
            }
            WizardStep::Contact => {
                let mut fields = vec![Self::Phone, Self::AlternativePhone, Self::Email];
                fields.extend(AddressPart::ALL.iter().map(|p| Self::Present(*p)));
                fields.push(Self::SameAsPresent);
                fields.extend(AddressPart::ALL.iter().map(|p| Self::Permanent(*p)));
                fields
            }
            WizardStep::Academic => {
                let mut fields: Vec<_> = RecordPart::ALL.iter().map(|p| Self::Ssc(*p)).collect();
                if draft.requires_hsc() {
                    fields.extend(RecordPart::ALL.iter().map(|p| Self::Hsc(*p)));
                }
                fields
            }
            WizardStep::Guardian => vec![
                Self::GuardianName,
                Self::GuardianRelation,
                Self::GuardianPhone,
                Self::GuardianOccupation,
                Self::GuardianMonthlyIncome,
            ],
            WizardStep::Documents => AttachmentSlot::ALL
                .iter()
                .map(|s| Self::Attachment(*s))
                .collect(),
        }
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            Self::DateOfBirth => FieldKind::Date,
            Self::Gender => FieldKind::Choice(GENDERS),
            Self::Religion => FieldKind::Choice(RELIGIONS),
            Self::BloodGroup => FieldKind::Choice(BLOOD_GROUPS),
            Self::Group => FieldKind::Choice(GROUPS),
            Self::AdmissionType => FieldKind::AdmissionType,
            Self::NidNumber | Self::BirthRegistrationNumber => FieldKind::Digits,
            Self::Phone | Self::AlternativePhone | Self::GuardianPhone => FieldKind::Phone,
            Self::Present(AddressPart::PostalCode) | Self::Permanent(AddressPart::PostalCode) => {
                FieldKind::Digits
            }
            Self::SameAsPresent => FieldKind::Toggle,
            Self::Ssc(part) | Self::Hsc(part) => match part {
                RecordPart::Gpa => FieldKind::Decimal,
                RecordPart::PassingYear | RecordPart::Roll | RecordPart::Registration => {
                    FieldKind::Digits
                }
                RecordPart::Board => FieldKind::Text,
            },
            Self::GuardianMonthlyIncome => FieldKind::Decimal,
            Self::Attachment(slot) => FieldKind::File(*slot),
            _ => FieldKind::Text,
        }
    }

    pub fn label(&self) -> String {
        match self {
            Self::NameEnglish => "Name (English)".to_string(),
            Self::NameBangla => "Name (Bangla)".to_string(),
            Self::FatherName => "Father's Name".to_string(),
            Self::MotherName => "Mother's Name".to_string(),
            Self::DateOfBirth => "Date of Birth (YYYY-MM-DD)".to_string(),
            Self::Gender => "Gender".to_string(),
            Self::Religion => "Religion".to_string(),
            Self::Nationality => "Nationality".to_string(),
            Self::BloodGroup => "Blood Group".to_string(),
            Self::NidNumber => "NID Number".to_string(),
            Self::BirthRegistrationNumber => "Birth Registration Number".to_string(),
            Self::AdmissionType => "Admission Type".to_string(),
            Self::Group => "Group".to_string(),
            Self::Subject => "Subject".to_string(),
            Self::Phone => "Phone".to_string(),
            Self::AlternativePhone => "Alternative Phone".to_string(),
            Self::Email => "Email".to_string(),
            Self::Present(part) => format!("Present Address: {}", part.label()),
            Self::SameAsPresent => "Permanent address same as present".to_string(),
            Self::Permanent(part) => format!("Permanent Address: {}", part.label()),
            Self::Ssc(part) => format!("SSC {}", part.label()),
            Self::Hsc(part) => format!("HSC {}", part.label()),
            Self::GuardianName => "Guardian's Name".to_string(),
            Self::GuardianRelation => "Relation with Guardian".to_string(),
            Self::GuardianPhone => "Guardian's Phone".to_string(),
            Self::GuardianOccupation => "Guardian's Occupation".to_string(),
            Self::GuardianMonthlyIncome => "Guardian's Monthly Income".to_string(),
            Self::Attachment(slot) => format!("{} (path, Enter to attach)", slot.label()),
        }
    }

    /// Whether the field must be filled for its step to validate
    pub fn is_required(&self, draft: &ApplicationDraft) -> bool {
        match self {
            Self::BloodGroup
            | Self::NidNumber
            | Self::BirthRegistrationNumber
            | Self::AlternativePhone
            | Self::Email
            | Self::SameAsPresent
            | Self::GuardianOccupation
            | Self::GuardianMonthlyIncome
            | Self::Present(AddressPart::PostalCode)
            | Self::Permanent(AddressPart::PostalCode) => false,
            Self::Attachment(AttachmentSlot::BirthCertificate) => false,
            Self::Attachment(AttachmentSlot::HscMarksheet) => draft.requires_hsc(),
            _ => true,
        }
    }

    /// Permanent address mirrors the present one while the toggle is on
    pub fn is_read_only(&self, draft: &ApplicationDraft) -> bool {
        matches!(self, Self::Permanent(_)) && draft.same_as_present()
    }

    /// Current value as shown in the form. File fields are rendered by the form.
    pub fn value(&self, draft: &ApplicationDraft) -> String {
        match self {
            Self::AdmissionType => draft
                .admission_type()
                .map(|t| t.label().to_string())
                .unwrap_or_default(),
            Self::SameAsPresent => {
                if draft.same_as_present() {
                    "[x] Yes".to_string()
                } else {
                    "[ ] No".to_string()
                }
            }
            Self::Present(part) => part.get(draft.present_address()).clone(),
            Self::Permanent(part) => part.get(draft.permanent_address()).clone(),
            Self::Attachment(slot) => draft
                .attachment(*slot)
                .map(|a| format!("{} ({})", a.file_name, a.size_label()))
                .unwrap_or_default(),
            _ => self.text_ref(draft).cloned().unwrap_or_default(),
        }
    }

    fn text_ref<'a>(&self, draft: &'a ApplicationDraft) -> Option<&'a String> {
        Some(match self {
            Self::NameEnglish => &draft.name_english,
            Self::NameBangla => &draft.name_bangla,
            Self::FatherName => &draft.father_name,
            Self::MotherName => &draft.mother_name,
            Self::DateOfBirth => &draft.date_of_birth,
            Self::Gender => &draft.gender,
            Self::Religion => &draft.religion,
            Self::Nationality => &draft.nationality,
            Self::BloodGroup => &draft.blood_group,
            Self::NidNumber => &draft.nid_number,
            Self::BirthRegistrationNumber => &draft.birth_registration_number,
            Self::Group => &draft.group,
            Self::Subject => &draft.subject,
            Self::Phone => &draft.phone,
            Self::AlternativePhone => &draft.alternative_phone,
            Self::Email => &draft.email,
            Self::Ssc(part) => part.get(&draft.ssc),
            Self::Hsc(part) => part.get(&draft.hsc),
            Self::GuardianName => &draft.guardian_name,
            Self::GuardianRelation => &draft.guardian_relation,
            Self::GuardianPhone => &draft.guardian_phone,
            Self::GuardianOccupation => &draft.guardian_occupation,
            Self::GuardianMonthlyIncome => &draft.guardian_monthly_income,
            Self::AdmissionType
            | Self::Present(_)
            | Self::SameAsPresent
            | Self::Permanent(_)
            | Self::Attachment(_) => return None,
        })
    }

    /// Plain string storage behind simple text and choice fields
    fn text_mut<'a>(&self, draft: &'a mut ApplicationDraft) -> Option<&'a mut String> {
        Some(match self {
            Self::NameEnglish => &mut draft.name_english,
            Self::NameBangla => &mut draft.name_bangla,
            Self::FatherName => &mut draft.father_name,
            Self::MotherName => &mut draft.mother_name,
            Self::DateOfBirth => &mut draft.date_of_birth,
            Self::Gender => &mut draft.gender,
            Self::Religion => &mut draft.religion,
            Self::Nationality => &mut draft.nationality,
            Self::BloodGroup => &mut draft.blood_group,
            Self::NidNumber => &mut draft.nid_number,
            Self::BirthRegistrationNumber => &mut draft.birth_registration_number,
            Self::Group => &mut draft.group,
            Self::Subject => &mut draft.subject,
            Self::Phone => &mut draft.phone,
            Self::AlternativePhone => &mut draft.alternative_phone,
            Self::Email => &mut draft.email,
            Self::Ssc(part) => part.get_mut(&mut draft.ssc),
            Self::Hsc(part) => part.get_mut(&mut draft.hsc),
            Self::GuardianName => &mut draft.guardian_name,
            Self::GuardianRelation => &mut draft.guardian_relation,
            Self::GuardianPhone => &mut draft.guardian_phone,
            Self::GuardianOccupation => &mut draft.guardian_occupation,
            Self::GuardianMonthlyIncome => &mut draft.guardian_monthly_income,
            Self::AdmissionType
            | Self::Present(_)
            | Self::SameAsPresent
            | Self::Permanent(_)
            | Self::Attachment(_) => return None,
        })
    }

    /// Apply `edit` to the field's string value. Returns true if anything changed.
    fn edit_text(
        &self,
        draft: &mut ApplicationDraft,
        edit: impl FnOnce(&mut String) -> bool,
    ) -> bool {
        match self {
            Self::Present(part) => {
                let mut changed = false;
                draft.update_present_address(|a| changed = edit(part.get_mut(a)));
                changed
            }
            Self::Permanent(part) => {
                let mut changed = false;
                draft.update_permanent_address(|a| changed = edit(part.get_mut(a)));
                changed
            }
            _ => self.text_mut(draft).is_some_and(edit),
        }
    }

    /// Type one character. Rejected characters leave the draft untouched.
    pub fn input_char(&self, draft: &mut ApplicationDraft, c: char) -> bool {
        let kind = self.kind();
        if kind.is_file() {
            return false;
        }
        self.edit_text(draft, |value| {
            if kind.accepts(c, value) {
                value.push(c);
                true
            } else {
                false
            }
        })
    }

    /// Delete the last character, or clear a choice
    pub fn backspace(&self, draft: &mut ApplicationDraft) -> bool {
        match self.kind() {
            FieldKind::AdmissionType => {
                let had_value = draft.admission_type().is_some();
                draft.set_admission_type(None);
                had_value
            }
            FieldKind::Choice(_) => self.edit_text(draft, |value| {
                let had_value = !value.is_empty();
                value.clear();
                had_value
            }),
            FieldKind::Toggle | FieldKind::File(_) => false,
            _ => self.edit_text(draft, |value| value.pop().is_some()),
        }
    }

    /// Step a choice or toggle field forwards or backwards
    pub fn cycle(&self, draft: &mut ApplicationDraft, forward: bool) -> bool {
        match self.kind() {
            FieldKind::Choice(options) => self.edit_text(draft, |value| {
                *value = cycle_option(options, value, forward).to_string();
                true
            }),
            FieldKind::AdmissionType => {
                let options = AdmissionType::ALL;
                let index = draft
                    .admission_type()
                    .and_then(|t| options.iter().position(|o| *o == t));
                let next = cycle_index(options.len(), index, forward);
                draft.set_admission_type(Some(options[next]));
                true
            }
            FieldKind::Toggle => self.toggle(draft),
            _ => false,
        }
    }

    /// Flip a toggle field
    pub fn toggle(&self, draft: &mut ApplicationDraft) -> bool {
        match self {
            Self::SameAsPresent => {
                draft.set_same_as_present(!draft.same_as_present());
                true
            }
            _ => false,
        }
    }
}

fn cycle_index(len: usize, current: Option<usize>, forward: bool) -> usize {
    match (current, forward) {
        (None, true) => 0,
        (None, false) => len - 1,
        (Some(i), true) => (i + 1) % len,
        (Some(0), false) => len - 1,
        (Some(i), false) => i - 1,
    }
}

fn cycle_option(options: &'static [&'static str], current: &str, forward: bool) -> &'static str {
    let index = options.iter().position(|o| *o == current);
    options[cycle_index(options.len(), index, forward)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::draft::AdmissionType;

    mod kinds {
        use super::*;

        #[test]
        fn test_digits_reject_letters() {
            assert!(FieldKind::Digits.accepts('7', ""));
            assert!(!FieldKind::Digits.accepts('a', ""));
        }

        #[test]
        fn test_decimal_allows_one_point() {
            assert!(FieldKind::Decimal.accepts('.', "4"));
            assert!(!FieldKind::Decimal.accepts('.', "4.5"));
            assert!(!FieldKind::Decimal.accepts('-', ""));
        }

        #[test]
        fn test_phone_plus_only_first() {
            assert!(FieldKind::Phone.accepts('+', ""));
            assert!(!FieldKind::Phone.accepts('+', "01"));
        }

        #[test]
        fn test_gpa_is_decimal() {
            assert_eq!(FieldId::Ssc(RecordPart::Gpa).kind(), FieldKind::Decimal);
            assert_eq!(FieldId::Hsc(RecordPart::Gpa).kind(), FieldKind::Decimal);
        }
    }

    mod layout {
        use super::*;

        #[test]
        fn test_personal_shows_group_for_inter() {
            let mut draft = ApplicationDraft::new();
            draft.set_admission_type(Some(AdmissionType::InterFirstYear));
            let fields = FieldId::for_step(WizardStep::Personal, &draft);
            assert!(fields.contains(&FieldId::Group));
            assert!(!fields.contains(&FieldId::Subject));
        }

        #[test]
        fn test_personal_shows_subject_for_honours() {
            let mut draft = ApplicationDraft::new();
            draft.set_admission_type(Some(AdmissionType::HonoursFirstYear));
            let fields = FieldId::for_step(WizardStep::Personal, &draft);
            assert!(fields.contains(&FieldId::Subject));
            assert!(!fields.contains(&FieldId::Group));
        }

        #[test]
        fn test_academic_hides_hsc_for_inter() {
            let mut draft = ApplicationDraft::new();
            draft.set_admission_type(Some(AdmissionType::InterFirstYear));
            assert_eq!(FieldId::for_step(WizardStep::Academic, &draft).len(), 5);
            draft.set_admission_type(Some(AdmissionType::DegreeFirstYear));
            assert_eq!(FieldId::for_step(WizardStep::Academic, &draft).len(), 10);
        }

        #[test]
        fn test_documents_lists_every_slot() {
            let draft = ApplicationDraft::new();
            let fields = FieldId::for_step(WizardStep::Documents, &draft);
            assert_eq!(fields.len(), AttachmentSlot::ALL.len());
        }
    }

    mod editing {
        use super::*;

        #[test]
        fn test_input_and_backspace() {
            let mut draft = ApplicationDraft::new();
            assert!(FieldId::NameEnglish.input_char(&mut draft, 'R'));
            assert!(FieldId::NameEnglish.input_char(&mut draft, 'a'));
            assert_eq!(draft.name_english, "Ra");
            assert!(FieldId::NameEnglish.backspace(&mut draft));
            assert_eq!(FieldId::NameEnglish.value(&draft), "R");
        }

        #[test]
        fn test_gpa_input_filters_letters() {
            let mut draft = ApplicationDraft::new();
            let gpa = FieldId::Ssc(RecordPart::Gpa);
            for c in "4x.5.0".chars() {
                gpa.input_char(&mut draft, c);
            }
            assert_eq!(draft.ssc.gpa, "4.50");
        }

        #[test]
        fn test_present_edits_mirror_into_permanent() {
            let mut draft = ApplicationDraft::new();
            FieldId::SameAsPresent.toggle(&mut draft);
            FieldId::Present(AddressPart::District).input_char(&mut draft, 'D');
            assert_eq!(FieldId::Permanent(AddressPart::District).value(&draft), "D");
        }

        #[test]
        fn test_permanent_is_read_only_while_mirrored() {
            let mut draft = ApplicationDraft::new();
            FieldId::SameAsPresent.toggle(&mut draft);
            let field = FieldId::Permanent(AddressPart::Village);
            assert!(field.is_read_only(&draft));
            assert!(!field.input_char(&mut draft, 'x'));

            FieldId::SameAsPresent.toggle(&mut draft);
            assert!(!field.is_read_only(&draft));
            assert!(field.input_char(&mut draft, 'x'));
        }

        #[test]
        fn test_choice_cycles_and_wraps() {
            let mut draft = ApplicationDraft::new();
            FieldId::Gender.cycle(&mut draft, true);
            assert_eq!(draft.gender, "Male");
            FieldId::Gender.cycle(&mut draft, false);
            assert_eq!(draft.gender, "Other");
            assert!(FieldId::Gender.backspace(&mut draft));
            assert!(draft.gender.is_empty());
        }

        #[test]
        fn test_choice_ignores_typing() {
            let mut draft = ApplicationDraft::new();
            assert!(!FieldId::Gender.input_char(&mut draft, 'M'));
            assert!(draft.gender.is_empty());
        }

        #[test]
        fn test_admission_type_cycle_clears_exclusive_field() {
            let mut draft = ApplicationDraft::new();
            FieldId::AdmissionType.cycle(&mut draft, true);
            assert_eq!(draft.admission_type(), Some(AdmissionType::InterFirstYear));
            FieldId::Group.cycle(&mut draft, true);
            assert_eq!(draft.group, "Science");

            FieldId::AdmissionType.cycle(&mut draft, true);
            assert_eq!(draft.admission_type(), Some(AdmissionType::HonoursFirstYear));
            assert!(draft.group.is_empty());
        }

        #[test]
        fn test_file_fields_do_not_take_text() {
            let mut draft = ApplicationDraft::new();
            let field = FieldId::Attachment(AttachmentSlot::ProfilePicture);
            assert!(!field.input_char(&mut draft, 'a'));
            assert!(field.value(&draft).is_empty());
        }
    }

    #[test]
    fn test_hsc_marksheet_required_only_above_inter() {
        let mut draft = ApplicationDraft::new();
        let field = FieldId::Attachment(AttachmentSlot::HscMarksheet);
        draft.set_admission_type(Some(AdmissionType::InterFirstYear));
        assert!(!field.is_required(&draft));
        draft.set_admission_type(Some(AdmissionType::HonoursFirstYear));
        assert!(field.is_required(&draft));
    }
}
