//! Wizard form state: the draft, the step controller, and field focus

use super::field::{FieldId, FieldKind};
use crate::state::attachment::{Attachment, AttachmentError, AttachmentSlot};
use crate::state::draft::ApplicationDraft;
use crate::state::step::{Advance, StepState, WizardStep};
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Trait for common form operations
pub trait Form {
    fn field_count(&self) -> usize;
    fn active_field(&self) -> usize;
    fn set_active_field(&mut self, index: usize);
    fn next_field(&mut self) {
        let count = self.field_count();
        if count == 0 {
            return;
        }
        let current = self.active_field();
        self.set_active_field((current + 1) % count);
    }
    fn prev_field(&mut self) {
        let count = self.field_count();
        if count == 0 {
            return;
        }
        let current = self.active_field();
        if current == 0 {
            self.set_active_field(count - 1);
        } else {
            self.set_active_field(current - 1);
        }
    }
}

/// The admission wizard for one draft
#[derive(Debug, Clone)]
pub struct WizardForm {
    pub draft: ApplicationDraft,
    steps: StepState,
    active_field_index: usize,
    /// Index of the first field in the viewport
    scroll_offset: usize,
    /// How many fields fit on screen
    viewport_fields: usize,
    /// Paths typed into file fields but not yet attached
    path_inputs: BTreeMap<AttachmentSlot, String>,
}

impl WizardForm {
    pub fn new() -> Self {
        Self {
            draft: ApplicationDraft::new(),
            steps: StepState::default(),
            active_field_index: 0,
            scroll_offset: 0,
            viewport_fields: usize::MAX,
            path_inputs: BTreeMap::new(),
        }
    }

    pub fn step(&self) -> WizardStep {
        self.steps.step()
    }

    pub fn is_ready_to_submit(&self) -> bool {
        self.steps.all_passed()
    }

    /// Fields visible on the current step
    pub fn fields(&self) -> Vec<FieldId> {
        FieldId::for_step(self.step(), &self.draft)
    }

    pub fn active_field_id(&self) -> Option<FieldId> {
        self.fields().get(self.active_field_index).copied()
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    /// Tell the form how many fields the screen can show
    pub fn set_viewport(&mut self, fields: usize) {
        self.viewport_fields = fields.max(1);
        self.keep_active_visible();
    }

    /// Text shown for a field; file fields show the attachment or the typed path
    pub fn display_value(&self, field: FieldId) -> String {
        match field.kind() {
            FieldKind::File(slot) => match self.draft.attachment(slot) {
                Some(_) => field.value(&self.draft),
                None => self.path_input(slot).to_string(),
            },
            _ => field.value(&self.draft),
        }
    }

    pub fn path_input(&self, slot: AttachmentSlot) -> &str {
        self.path_inputs.get(&slot).map(String::as_str).unwrap_or("")
    }

    /// Type into the active field
    pub fn input_char(&mut self, c: char) {
        let Some(field) = self.active_field_id() else {
            return;
        };
        let changed = match field.kind() {
            FieldKind::File(slot) => {
                let input = self.path_inputs.entry(slot).or_default();
                if field.kind().accepts(c, input) {
                    input.push(c);
                }
                false
            }
            _ => field.input_char(&mut self.draft, c),
        };
        self.after_edit(changed);
    }

    pub fn backspace(&mut self) {
        let Some(field) = self.active_field_id() else {
            return;
        };
        let changed = match field.kind() {
            FieldKind::File(slot) => {
                if let Some(input) = self.path_inputs.get_mut(&slot) {
                    input.pop();
                }
                false
            }
            _ => field.backspace(&mut self.draft),
        };
        self.after_edit(changed);
    }

    /// Left/Right on a choice or toggle field
    pub fn cycle(&mut self, forward: bool) {
        if let Some(field) = self.active_field_id() {
            let changed = field.cycle(&mut self.draft, forward);
            self.after_edit(changed);
        }
    }

    /// Space on a toggle field. Returns false when the active field is not a toggle.
    pub fn toggle(&mut self) -> bool {
        let Some(field) = self.active_field_id() else {
            return false;
        };
        let changed = field.toggle(&mut self.draft);
        self.after_edit(changed);
        changed
    }

    /// Slot of the active field if it is a file field
    pub fn active_file_slot(&self) -> Option<AttachmentSlot> {
        match self.active_field_id()?.kind() {
            FieldKind::File(slot) => Some(slot),
            _ => None,
        }
    }

    /// Load the typed path into the active file slot.
    ///
    /// On error the slot keeps whatever it held before.
    pub fn attach_active(&mut self) -> Result<Option<&Attachment>, AttachmentError> {
        let Some(slot) = self.active_file_slot() else {
            return Ok(None);
        };
        let attachment = Attachment::load(slot, self.path_input(slot))?;
        self.draft.attach(attachment);
        self.path_inputs.remove(&slot);
        self.steps.invalidate();
        Ok(self.draft.attachment(slot))
    }

    /// Remove whatever is attached to the active file slot
    pub fn detach_active(&mut self) -> Option<Attachment> {
        let slot = self.active_file_slot()?;
        let removed = self.draft.detach(slot);
        self.after_edit(removed.is_some());
        removed
    }

    /// Validate the current step and move forward on success
    pub fn advance(&mut self, today: NaiveDate) -> Advance {
        let outcome = self.steps.advance(&self.draft, today);
        if matches!(outcome, Advance::Moved(_)) {
            self.scroll_to_top();
        }
        outcome
    }

    /// Go back one step without validating
    pub fn retreat(&mut self) -> WizardStep {
        let before = self.step();
        let step = self.steps.retreat();
        if step != before {
            self.scroll_to_top();
        }
        step
    }

    fn scroll_to_top(&mut self) {
        self.active_field_index = 0;
        self.scroll_offset = 0;
    }

    fn after_edit(&mut self, changed: bool) {
        if changed {
            self.steps.invalidate();
            // Visible fields can change (admission type hides/shows fields)
            let count = self.field_count();
            if self.active_field_index >= count {
                self.active_field_index = count.saturating_sub(1);
            }
            self.keep_active_visible();
        }
    }

    fn keep_active_visible(&mut self) {
        if self.active_field_index < self.scroll_offset {
            self.scroll_offset = self.active_field_index;
        } else if self.active_field_index >= self.scroll_offset.saturating_add(self.viewport_fields)
        {
            self.scroll_offset = self.active_field_index + 1 - self.viewport_fields;
        }
    }
}

impl Default for WizardForm {
    fn default() -> Self {
        Self::new()
    }
}

impl Form for WizardForm {
    fn field_count(&self) -> usize {
        self.fields().len()
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(self.field_count().saturating_sub(1));
        self.keep_active_visible();
    }
}
