//! Wizard steps and the controller that moves between them

use super::draft::ApplicationDraft;
use super::validation::{validate_step, ValidationResult};
use chrono::NaiveDate;

/// One page of the admission wizard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WizardStep {
    #[default]
    Personal,
    Contact,
    Academic,
    Guardian,
    Documents,
}

impl WizardStep {
    pub const ALL: [WizardStep; 5] = [
        Self::Personal,
        Self::Contact,
        Self::Academic,
        Self::Guardian,
        Self::Documents,
    ];

    /// 1-based position shown to the user
    pub fn number(&self) -> u8 {
        match self {
            Self::Personal => 1,
            Self::Contact => 2,
            Self::Academic => 3,
            Self::Guardian => 4,
            Self::Documents => 5,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Personal => "Personal Information",
            Self::Contact => "Contact & Address",
            Self::Academic => "Academic Records",
            Self::Guardian => "Guardian Information",
            Self::Documents => "Documents",
        }
    }

    pub fn next(&self) -> Option<Self> {
        match self {
            Self::Personal => Some(Self::Contact),
            Self::Contact => Some(Self::Academic),
            Self::Academic => Some(Self::Guardian),
            Self::Guardian => Some(Self::Documents),
            Self::Documents => None,
        }
    }

    pub fn prev(&self) -> Option<Self> {
        match self {
            Self::Personal => None,
            Self::Contact => Some(Self::Personal),
            Self::Academic => Some(Self::Contact),
            Self::Guardian => Some(Self::Academic),
            Self::Documents => Some(Self::Guardian),
        }
    }

    pub fn is_last(&self) -> bool {
        self.next().is_none()
    }
}

/// Result of an advance attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    /// Validation passed and the wizard moved to this step
    Moved(WizardStep),
    /// The final step validated; the draft can be submitted
    ReadyToSubmit,
    /// Validation failed; nothing changed
    Blocked(ValidationResult),
}

/// Current step plus whether the whole wizard has validated
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepState {
    step: WizardStep,
    all_passed: bool,
}

impl StepState {
    pub fn step(&self) -> WizardStep {
        self.step
    }

    /// True once the final step has validated and nothing was edited since
    pub fn all_passed(&self) -> bool {
        self.all_passed
    }

    /// Validate the current step and move forward when it passes
    pub fn advance(&mut self, draft: &ApplicationDraft, today: NaiveDate) -> Advance {
        let result = validate_step(draft, self.step, today);
        if !result.is_valid() {
            tracing::debug!(
                step = self.step.number(),
                errors = result.errors().len(),
                "step validation failed"
            );
            return Advance::Blocked(result);
        }

        match self.step.next() {
            Some(next) => {
                tracing::debug!(from = self.step.number(), to = next.number(), "advancing");
                self.step = next;
                Advance::Moved(next)
            }
            None => {
                self.all_passed = true;
                Advance::ReadyToSubmit
            }
        }
    }

    /// Step back without validating. Stays on the first step.
    pub fn retreat(&mut self) -> WizardStep {
        self.all_passed = false;
        if let Some(prev) = self.step.prev() {
            self.step = prev;
        }
        self.step
    }

    /// Forget a previous full pass (the draft changed)
    pub fn invalidate(&mut self) {
        self.all_passed = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::draft::AdmissionType;
    use crate::state::validation::fixtures::{today, valid_draft};

    mod wizard_step {
        use super::*;

        #[test]
        fn test_numbers_run_one_to_five() {
            let numbers: Vec<u8> = WizardStep::ALL.iter().map(|s| s.number()).collect();
            assert_eq!(numbers, vec![1, 2, 3, 4, 5]);
        }

        #[test]
        fn test_next_and_prev_are_inverse() {
            for step in WizardStep::ALL {
                if let Some(next) = step.next() {
                    assert_eq!(next.prev(), Some(step));
                }
            }
        }

        #[test]
        fn test_only_documents_is_last() {
            assert!(WizardStep::Documents.is_last());
            assert!(!WizardStep::Guardian.is_last());
        }
    }

    mod advance {
        use super::*;

        #[test]
        fn test_blank_draft_blocks_every_step() {
            let draft = ApplicationDraft::new();
            for step in WizardStep::ALL {
                let mut state = StepState {
                    step,
                    all_passed: false,
                };
                let outcome = state.advance(&draft, today());
                assert!(matches!(outcome, Advance::Blocked(_)), "{step:?} advanced");
                assert_eq!(state.step(), step);
            }
        }

        #[test]
        fn test_valid_draft_walks_to_submit() {
            let draft = valid_draft(AdmissionType::InterFirstYear);
            let mut state = StepState::default();
            for expected in &WizardStep::ALL[1..] {
                assert_eq!(state.advance(&draft, today()), Advance::Moved(*expected));
            }
            assert!(!state.all_passed());
            assert_eq!(state.advance(&draft, today()), Advance::ReadyToSubmit);
            assert_eq!(state.step(), WizardStep::Documents);
            assert!(state.all_passed());
        }

        #[test]
        fn test_blocked_result_carries_messages() {
            let mut draft = valid_draft(AdmissionType::InterFirstYear);
            draft.phone.clear();
            let mut state = StepState {
                step: WizardStep::Contact,
                all_passed: false,
            };
            match state.advance(&draft, today()) {
                Advance::Blocked(result) => assert!(result.has_error_for("phone")),
                other => panic!("expected Blocked, got {other:?}"),
            }
        }
    }

    mod retreat {
        use super::*;

        #[test]
        fn test_retreat_stops_at_first_step() {
            let mut state = StepState::default();
            assert_eq!(state.retreat(), WizardStep::Personal);
        }

        #[test]
        fn test_retreat_skips_validation_and_clears_pass() {
            let draft = valid_draft(AdmissionType::InterFirstYear);
            let mut state = StepState {
                step: WizardStep::Documents,
                all_passed: false,
            };
            state.advance(&draft, today());
            assert!(state.all_passed());
            assert_eq!(state.retreat(), WizardStep::Guardian);
            assert!(!state.all_passed());
        }
    }

    #[test]
    fn test_invalidate_clears_pass() {
        let mut state = StepState {
            step: WizardStep::Documents,
            all_passed: true,
        };
        state.invalidate();
        assert!(!state.all_passed());
        assert_eq!(state.step(), WizardStep::Documents);
    }
}
