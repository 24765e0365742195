//! `langm use`: pick a registered runtime and make it active.
//!
//! The registry is written before the link is touched. If the link switch
//! then fails, the previous `current` is written back so the document keeps
//! naming whatever the link last pointed at.

use super::list::write_empty_hint;
use super::picker::RuntimePicker;
use crate::capability::{Capability, join_capabilities};
use crate::error::{LangmError, Result};
use crate::link::ActiveLink;
use crate::registry::{RegistryStore, RuntimeEntry};
use std::fmt;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SwitchOutcome {
    Switched {
        entry: RuntimeEntry,
        bin_dir: PathBuf,
    },
    /// The picker returned no selection; nothing was changed.
    Cancelled,
    /// No candidates matched the filter.
    NothingToDo { filter: Option<Capability> },
}

pub fn switch(
    store: &mut RegistryStore,
    link: &ActiveLink,
    filter: Option<Capability>,
    picker: &dyn RuntimePicker,
) -> Result<SwitchOutcome> {
    let candidates: Vec<RuntimeEntry> = store
        .registry()
        .runtimes_matching(filter)
        .into_iter()
        .cloned()
        .collect();
    if candidates.is_empty() {
        return Ok(SwitchOutcome::NothingToDo { filter });
    }

    let previous = store.registry().current.clone();
    let Some(index) = picker.pick(&candidates, store.registry().current_name())? else {
        tracing::debug!("selection cancelled");
        return Ok(SwitchOutcome::Cancelled);
    };
    let selected = candidates
        .get(index)
        .cloned()
        .ok_or_else(|| LangmError::RuntimeNotFound(format!("selection #{index}")))?;

    store.set_current(selected.name.clone())?;
    if let Err(err) = link.switch_to(Path::new(&selected.path)) {
        if let Err(restore_err) = store.set_current(previous.clone()) {
            tracing::warn!(
                previous = %previous,
                error = %restore_err,
                "could not restore previous current after failed switch"
            );
        }
        return Err(err);
    }

    Ok(SwitchOutcome::Switched {
        entry: selected,
        bin_dir: link.path().join("bin"),
    })
}

impl fmt::Display for SwitchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SwitchOutcome::Switched { entry, bin_dir } => {
                writeln!(f, "✓ switched to: {}", entry.name)?;
                writeln!(f, "  path: {}", entry.path)?;
                writeln!(
                    f,
                    "  capabilities: {}",
                    join_capabilities(&entry.capabilities)
                )?;
                writeln!(f)?;
                write!(
                    f,
                    "hint: make sure {} is on your PATH",
                    bin_dir.display()
                )?;
                if cfg!(not(windows)) {
                    writeln!(f)?;
                    writeln!(f, "      e.g. add to ~/.bashrc or ~/.zshrc:")?;
                    write!(f, "      export PATH=\"{}:$PATH\"", bin_dir.display())?;
                }
                Ok(())
            }
            SwitchOutcome::Cancelled => write!(f, "cancelled"),
            SwitchOutcome::NothingToDo { filter } => write_empty_hint(f, *filter),
        }
    }
}
