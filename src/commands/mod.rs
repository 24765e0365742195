//! Command handlers behind the `langm` binary.
//!
//! Each handler takes the registry (and link, where needed) explicitly and
//! returns an outcome value whose `Display` is the text printed to the user.
//! Argument parsing and process exit codes stay in `src/bin/langm.rs`.

pub mod add;
pub mod current;
pub mod list;
pub mod picker;
pub mod switch;

pub use add::{AddOutcome, AddRequest, add};
pub use current::{CurrentStatus, Drift, current};
pub use list::{CapabilityGroup, ListRow, ListView, list};
pub use picker::{DialoguerPicker, NamedPicker, RuntimePicker};
pub use switch::{SwitchOutcome, switch};
