//! Installation checklist wizard: draft state, derivation rules, step
//! sequencing and submission.

pub mod draft;
pub mod session;
pub mod steps;
pub mod submission;

pub use draft::{ChecklistDraft, DraftCommand, MachineSnapshot};
pub use session::{DraftSession, DraftView};
pub use steps::{Advance, WizardStep};
pub use submission::{build_record, submit, ChecklistSink};
