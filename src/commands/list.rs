//! `langm list`: registered runtimes grouped by capability.

use crate::capability::Capability;
use crate::registry::{Registry, RuntimeEntry};
use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListRow {
    pub name: String,
    pub path: String,
    pub active: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CapabilityGroup {
    pub capability: Capability,
    pub rows: Vec<ListRow>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListView {
    pub filter: Option<Capability>,
    pub groups: Vec<CapabilityGroup>,
}

impl ListView {
    pub fn is_empty(&self) -> bool {
        self.groups.iter().all(|group| group.rows.is_empty())
    }
}

/// Build the listing. Without a filter an entry appears once under each of
/// its capabilities; groups are ordered by first appearance in the registry.
pub fn list(registry: &Registry, filter: Option<Capability>) -> ListView {
    let entries = registry.runtimes_matching(filter);
    let groups = match filter {
        Some(capability) => {
            let rows = entries
                .iter()
                .map(|entry| row(registry, entry))
                .collect::<Vec<_>>();
            if rows.is_empty() {
                Vec::new()
            } else {
                vec![CapabilityGroup { capability, rows }]
            }
        }
        None => group_by_capability(registry, &entries),
    };
    ListView { filter, groups }
}

fn group_by_capability(registry: &Registry, entries: &[&RuntimeEntry]) -> Vec<CapabilityGroup> {
    let mut groups: Vec<CapabilityGroup> = Vec::new();
    for entry in entries {
        for capability in &entry.capabilities {
            let index = match groups
                .iter()
                .position(|group| group.capability == *capability)
            {
                Some(index) => index,
                None => {
                    groups.push(CapabilityGroup {
                        capability: *capability,
                        rows: Vec::new(),
                    });
                    groups.len() - 1
                }
            };
            let rows = &mut groups[index].rows;
            if !rows.iter().any(|existing| existing.name == entry.name) {
                rows.push(row(registry, entry));
            }
        }
    }
    groups
}

fn row(registry: &Registry, entry: &RuntimeEntry) -> ListRow {
    ListRow {
        name: entry.name.clone(),
        path: entry.path.clone(),
        active: registry.is_current(entry),
    }
}

pub(crate) fn write_empty_hint(
    f: &mut fmt::Formatter<'_>,
    filter: Option<Capability>,
) -> fmt::Result {
    match filter {
        Some(capability) => writeln!(f, "no runtimes with the {capability} capability found")?,
        None => writeln!(f, "no runtimes registered")?,
    }
    write!(f, "use `langm add <path>` to register one")
}

impl fmt::Display for ListView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write_empty_hint(f, self.filter);
        }
        let mut first = true;
        for group in &self.groups {
            if !first {
                writeln!(f)?;
            }
            first = false;
            write!(f, "{}:", group.capability)?;
            for row in &group.rows {
                let marker = if row.active { " *" } else { "" };
                write!(f, "\n  {}{}\n    {}", row.name, marker, row.path)?;
            }
        }
        Ok(())
    }
}
