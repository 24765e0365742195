//! `langm add`: register a runtime directory.

use crate::capability::{self, Capability, join_capabilities};
use crate::detector;
use crate::error::{LangmError, Result};
use crate::registry::{RegistryStore, RuntimeEntry};
use std::fmt;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

#[derive(Clone, Debug, Default)]
pub struct AddRequest {
    pub path: PathBuf,
    /// Force the `node` capability instead of detecting.
    pub node: bool,
    /// Force the `java` capability instead of detecting.
    pub java: bool,
    /// Entry name; defaults to the directory's last path segment.
    pub name: Option<String>,
}

impl AddRequest {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    fn explicit_capabilities(&self) -> Vec<Capability> {
        let mut caps = Vec::new();
        if self.node {
            caps.push(Capability::Node);
        }
        if self.java {
            caps.push(Capability::Java);
        }
        caps
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AddOutcome {
    pub entry: RuntimeEntry,
    /// False when capabilities came from `--node`/`--java`.
    pub detected: bool,
}

/// Validate the directory, settle its capabilities, and persist a new entry.
///
/// Explicit flags skip detection entirely. Nothing is written when the
/// directory is missing, its path is not UTF-8, no capability can be
/// determined, or the name is taken.
pub fn add(store: &mut RegistryStore, request: &AddRequest) -> Result<AddOutcome> {
    let dir = absolute_dir(&request.path)?;
    let path = dir
        .to_str()
        .ok_or_else(|| LangmError::NonUtf8Path(dir.clone()))?
        .to_string();

    let explicit = request.explicit_capabilities();
    let detected = explicit.is_empty();
    let capabilities = if detected {
        let found = detector::detect(&dir)?;
        if found.is_empty() {
            return Err(LangmError::UndetectableCapability {
                path: dir,
                markers: capability::marker_hint(),
            });
        }
        found
    } else {
        explicit
    };

    let name = match &request.name {
        Some(name) => name.clone(),
        None => default_name(&dir),
    };
    let entry = RuntimeEntry::new(name, path, capabilities);
    store.add_runtime(entry.clone())?;
    Ok(AddOutcome { entry, detected })
}

/// Make `path` absolute without resolving symlinks, so an alias such as
/// `/opt/java-lts` is registered under its own name and path.
fn absolute_dir(path: &Path) -> Result<PathBuf> {
    let absolute = std::path::absolute(path)
        .map(|abs| normalize(&abs))
        .map_err(|err| LangmError::io(format!("resolving {}", path.display()), err))?;
    match fs::metadata(&absolute) {
        Ok(meta) if meta.is_dir() => Ok(absolute),
        Ok(_) => Err(LangmError::DirectoryNotFound(absolute)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            Err(LangmError::DirectoryNotFound(absolute))
        }
        Err(err) => Err(LangmError::io(
            format!("inspecting {}", absolute.display()),
            err,
        )),
    }
}

// Fold `.` and `..` lexically.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push(component);
                }
            }
            other => out.push(other),
        }
    }
    out
}

fn default_name(dir: &Path) -> String {
    dir.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "unknown".to_string())
}

impl fmt::Display for AddOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "✓ registered runtime: {}", self.entry.name)?;
        writeln!(f, "  path: {}", self.entry.path)?;
        write!(
            f,
            "  capabilities: {}",
            join_capabilities(&self.entry.capabilities)
        )
    }
}
