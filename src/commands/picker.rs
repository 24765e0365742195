//! Selection seam for `langm use`.
//!
//! The switch logic only needs "which of these candidates, or none". The
//! terminal menu and the scripted `--name` lookup both implement
//! [`RuntimePicker`].

use crate::capability::join_capabilities;
use crate::error::{LangmError, Result};
use crate::registry::RuntimeEntry;
use dialoguer::Select;
use dialoguer::theme::ColorfulTheme;
use std::io;

pub trait RuntimePicker {
    /// Index into `candidates`, or `None` when the user cancels.
    fn pick(&self, candidates: &[RuntimeEntry], current: Option<&str>) -> Result<Option<usize>>;
}

/// Interactive arrow-key menu. Esc or `q` cancels.
#[derive(Clone, Copy, Debug, Default)]
pub struct DialoguerPicker;

impl RuntimePicker for DialoguerPicker {
    fn pick(&self, candidates: &[RuntimeEntry], current: Option<&str>) -> Result<Option<usize>> {
        let labels: Vec<String> = candidates
            .iter()
            .map(|entry| menu_label(entry, current))
            .collect();
        let default = current
            .and_then(|name| candidates.iter().position(|entry| entry.name == name))
            .unwrap_or(0);

        Select::with_theme(&ColorfulTheme::default())
            .with_prompt("Select the runtime to use")
            .items(&labels)
            .default(default)
            .interact_opt()
            .map_err(|err| LangmError::io("reading selection", io::Error::other(err)))
    }
}

/// Non-interactive selection by exact entry name.
#[derive(Clone, Debug)]
pub struct NamedPicker {
    name: String,
}

impl NamedPicker {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl RuntimePicker for NamedPicker {
    fn pick(&self, candidates: &[RuntimeEntry], _current: Option<&str>) -> Result<Option<usize>> {
        candidates
            .iter()
            .position(|entry| entry.name == self.name)
            .map(Some)
            .ok_or_else(|| LangmError::RuntimeNotFound(self.name.clone()))
    }
}

fn menu_label(entry: &RuntimeEntry, current: Option<&str>) -> String {
    let marker = if current == Some(entry.name.as_str()) {
        " *"
    } else {
        ""
    };
    format!(
        "{}{} ({}) [{}]",
        entry.name,
        marker,
        entry.path,
        join_capabilities(&entry.capabilities)
    )
}
