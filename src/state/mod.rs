//! Application state module

mod app_state;
mod attachment;
mod draft;
mod forms;
mod step;
mod validation;

pub use app_state::*;
pub use draft::*;
pub use forms::*;
pub use step::*;

#[cfg(test)]
pub use attachment::AttachmentSlot;
#[cfg(test)]
pub(crate) use validation::fixtures;
