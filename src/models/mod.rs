//! Data models for Amiste

pub mod checklist;
pub mod enums;
pub mod history;
pub mod machine;
pub mod money;
pub mod policy;
pub mod portfolio;
pub mod profile;
pub mod recipe;
pub mod stock;
pub mod supply;
pub mod wiki;

// Re-export commonly used types
pub use checklist::{Checklist, ChecklistShort, MachineUnit, NewChecklist};
pub use enums::{ChecklistStatus, InstallType, PortfolioStatus, SubmitStatus, YesNo};
pub use history::HistoryEntry;
pub use machine::{Machine, MachineSpecs, MachineVariant};
pub use policy::{Action, Capabilities, Resource, Role};
pub use portfolio::Portfolio;
pub use profile::{Profile, Session};
