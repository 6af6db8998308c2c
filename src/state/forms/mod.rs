//! Form domain layer
//!
//! Field identifiers for every wizard input and the form state that binds
//! them to the application draft.

mod field;
mod form_state;

pub use field::{FieldId, FieldKind};
pub use form_state::{Form, WizardForm};

#[cfg(test)]
pub use field::{AddressPart, RecordPart};
