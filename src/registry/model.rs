//! In-memory registry: runtime entries plus the name of the active one.
//!
//! Nothing here touches the filesystem; [`super::RegistryStore`] owns
//! persistence. Entries are append-only and name uniqueness is the only
//! invariant enforced on insert.

use crate::capability::Capability;
use crate::error::{LangmError, Result};
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeEntry {
    pub name: String,
    pub path: String,
    #[serde(default)]
    pub capabilities: Vec<Capability>,
}

impl RuntimeEntry {
    pub fn new(
        name: impl Into<String>,
        path: impl Into<String>,
        capabilities: Vec<Capability>,
    ) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            capabilities,
        }
    }

    pub fn has_capability(&self, capability: Capability) -> bool {
        self.capabilities.contains(&capability)
    }
}

/// Persisted document shape: `{"current": "...", "runtimes": [...]}`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registry {
    /// Name of the active entry; empty when nothing is selected. Advisory:
    /// it is not checked against `runtimes`.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub current: String,
    #[serde(default)]
    pub runtimes: Vec<RuntimeEntry>,
}

impl Registry {
    /// Append `entry`, rejecting a name that is already registered.
    ///
    /// Comparison is exact and case-sensitive. On rejection the registry is
    /// left untouched.
    pub fn insert(&mut self, entry: RuntimeEntry) -> Result<()> {
        if self.runtime_by_name(&entry.name).is_some() {
            return Err(LangmError::DuplicateName(entry.name));
        }
        self.runtimes.push(entry);
        Ok(())
    }

    pub fn all_runtimes(&self) -> &[RuntimeEntry] {
        &self.runtimes
    }

    /// Entries carrying `capability`, in registration order.
    pub fn runtimes_by_capability(&self, capability: Capability) -> Vec<&RuntimeEntry> {
        self.runtimes
            .iter()
            .filter(|entry| entry.has_capability(capability))
            .collect()
    }

    pub fn runtime_by_name(&self, name: &str) -> Option<&RuntimeEntry> {
        self.runtimes.iter().find(|entry| entry.name == name)
    }

    /// Entries matching an optional capability filter.
    pub fn runtimes_matching(&self, filter: Option<Capability>) -> Vec<&RuntimeEntry> {
        match filter {
            Some(capability) => self.runtimes_by_capability(capability),
            None => self.runtimes.iter().collect(),
        }
    }

    /// The name recorded as active, if any.
    pub fn current_name(&self) -> Option<&str> {
        if self.current.is_empty() {
            None
        } else {
            Some(self.current.as_str())
        }
    }

    /// The entry `current` names, when it still exists.
    pub fn current_runtime(&self) -> Option<&RuntimeEntry> {
        self.current_name().and_then(|name| self.runtime_by_name(name))
    }

    pub fn set_current(&mut self, name: impl Into<String>) {
        self.current = name.into();
    }

    pub fn is_current(&self, entry: &RuntimeEntry) -> bool {
        self.current_name() == Some(entry.name.as_str())
    }
}

// Older documents store `"current": null` for "nothing selected".
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
