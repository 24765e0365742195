//! `langm current`: report the active runtime and check that the registry
//! and the link agree.
//!
//! The two are updated separately, so they can drift (an interrupted switch,
//! a hand-edited config, a deleted runtime directory). This view surfaces the
//! drift; `langm use` repairs it.

use crate::error::Result;
use crate::link::ActiveLink;
use crate::registry::Registry;
use std::fmt;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CurrentStatus {
    /// Name recorded in the registry, if any.
    pub name: Option<String>,
    /// Path registered under `name`; `None` when the name is dangling.
    pub registered_path: Option<String>,
    pub link: PathBuf,
    pub link_exists: bool,
    pub link_target: Option<PathBuf>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Drift {
    /// `current` names an entry that is not registered.
    UnknownName(String),
    /// A registry name is set but no link exists.
    MissingLink,
    /// A link exists but the registry names nothing.
    UnrecordedLink,
    /// Link and registry point at different directories.
    TargetMismatch { registered: String, target: PathBuf },
    /// The link exists but its target directory is gone.
    BrokenLink(PathBuf),
    /// Something other than a link occupies the link location.
    NotALink,
}

pub fn current(registry: &Registry, link: &ActiveLink) -> Result<CurrentStatus> {
    let name = registry.current_name().map(str::to_string);
    let registered_path = registry.current_runtime().map(|entry| entry.path.clone());
    Ok(CurrentStatus {
        name,
        registered_path,
        link: link.path().to_path_buf(),
        link_exists: link.exists(),
        link_target: link.current_target()?,
    })
}

impl CurrentStatus {
    pub fn drift(&self) -> Vec<Drift> {
        let mut drift = Vec::new();
        if let Some(name) = &self.name {
            if self.registered_path.is_none() {
                drift.push(Drift::UnknownName(name.clone()));
            }
            if !self.link_exists {
                drift.push(Drift::MissingLink);
            }
        } else if self.link_exists {
            drift.push(Drift::UnrecordedLink);
        }

        if let (Some(registered), Some(target)) = (&self.registered_path, &self.link_target) {
            if Path::new(registered) != target.as_path() {
                drift.push(Drift::TargetMismatch {
                    registered: registered.clone(),
                    target: target.clone(),
                });
            }
        }
        if self.link_exists && self.link_target.is_none() {
            drift.push(Drift::NotALink);
        }
        if let Some(target) = &self.link_target {
            if !self.link.is_dir() {
                drift.push(Drift::BrokenLink(target.clone()));
            }
        }
        drift
    }

    pub fn is_consistent(&self) -> bool {
        self.drift().is_empty()
    }
}

impl fmt::Display for Drift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Drift::UnknownName(name) => write!(f, "\"{name}\" is not a registered runtime"),
            Drift::MissingLink => write!(f, "the active link does not exist"),
            Drift::UnrecordedLink => write!(
                f,
                "the active link exists but no runtime is recorded as current"
            ),
            Drift::TargetMismatch { registered, target } => write!(
                f,
                "the active link points at {} but the registry expects {registered}",
                target.display()
            ),
            Drift::NotALink => write!(
                f,
                "the active link location holds a file or directory, not a link"
            ),
            Drift::BrokenLink(target) => {
                write!(f, "the active link target {} no longer exists", target.display())
            }
        }
    }
}

impl fmt::Display for CurrentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "current: {name}")?,
            None => write!(f, "current: (none)")?,
        }
        if let Some(path) = &self.registered_path {
            write!(f, "\n  path: {path}")?;
        }
        match &self.link_target {
            Some(target) => write!(f, "\n  link: {} -> {}", self.link.display(), target.display())?,
            None => write!(f, "\n  link: {} (absent)", self.link.display())?,
        }
        let drift = self.drift();
        for item in &drift {
            write!(f, "\nwarning: {item}")?;
        }
        if !drift.is_empty() {
            write!(f, "\nrun `langm use` to repair")?;
        }
        Ok(())
    }
}
