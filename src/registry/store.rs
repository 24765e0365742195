//! JSON persistence for the registry.
//!
//! One load per invocation, one write per mutation. The document is
//! overwritten in place; there is no locking, so concurrent invocations may
//! race.

use super::model::{Registry, RuntimeEntry};
use crate::capability::Capability;
use crate::error::{LangmError, Result};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub struct RegistryStore {
    path: PathBuf,
    registry: Registry,
}

impl RegistryStore {
    /// Load the registry at `path`.
    ///
    /// A missing document is created with empty defaults and written
    /// immediately, so a fresh environment needs no separate init step.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let data = match fs::read_to_string(&path) {
            Ok(data) => data,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "creating empty registry");
                let store = Self {
                    path,
                    registry: Registry::default(),
                };
                store.save()?;
                return Ok(store);
            }
            Err(err) => {
                return Err(LangmError::io(
                    format!("reading config file {}", path.display()),
                    err,
                ));
            }
        };

        let registry: Registry =
            serde_json::from_str(&data).map_err(|source| LangmError::ConfigCorrupt {
                path: path.clone(),
                source,
            })?;
        tracing::debug!(
            path = %path.display(),
            runtimes = registry.runtimes.len(),
            "registry loaded"
        );
        Ok(Self { path, registry })
    }

    /// Write the registry, creating the parent directory when needed.
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|err| {
                LangmError::io(format!("creating directory {}", parent.display()), err)
            })?;
        }
        let json = serde_json::to_string_pretty(&self.registry).map_err(|err| {
            LangmError::io("serializing registry", io::Error::other(err))
        })?;
        fs::write(&self.path, json).map_err(|err| {
            LangmError::io(format!("writing config file {}", self.path.display()), err)
        })?;
        tracing::debug!(path = %self.path.display(), "registry saved");
        Ok(())
    }

    /// Register `entry` and persist. Duplicate names fail before anything is
    /// written.
    pub fn add_runtime(&mut self, entry: RuntimeEntry) -> Result<()> {
        let name = entry.name.clone();
        self.registry.insert(entry)?;
        self.save()?;
        tracing::info!(name = %name, "runtime registered");
        Ok(())
    }

    /// Record `name` as active and persist. The name is not validated.
    pub fn set_current(&mut self, name: impl Into<String>) -> Result<()> {
        self.registry.set_current(name);
        self.save()
    }

    pub fn all_runtimes(&self) -> &[RuntimeEntry] {
        self.registry.all_runtimes()
    }

    pub fn runtimes_by_capability(&self, capability: Capability) -> Vec<&RuntimeEntry> {
        self.registry.runtimes_by_capability(capability)
    }

    pub fn runtime_by_name(&self, name: &str) -> Option<&RuntimeEntry> {
        self.registry.runtime_by_name(name)
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn into_registry(self) -> Registry {
        self.registry
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn graal() -> RuntimeEntry {
        RuntimeEntry::new(
            "graalvm-21",
            "/opt/graalvm-21",
            vec![Capability::Java, Capability::Node],
        )
    }

    #[test]
    fn fresh_environment_is_created_on_load() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested/.langm/config.json");
        let store = RegistryStore::load(&path).unwrap();
        assert_eq!(store.registry(), &Registry::default());
        assert!(path.is_file());

        let on_disk: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(on_disk, serde_json::json!({"current": "", "runtimes": []}));
    }

    #[test]
    fn save_then_load_round_trips() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.json");
        let mut store = RegistryStore::load(&path).unwrap();
        store
            .add_runtime(RuntimeEntry::new("node20", "/opt/node20", vec![Capability::Node]))
            .unwrap();
        store.add_runtime(graal()).unwrap();
        store.set_current("graalvm-21").unwrap();
        let expected = store.registry().clone();

        let reloaded = RegistryStore::load(&path).unwrap();
        assert_eq!(reloaded.into_registry(), expected);
    }

    #[test]
    fn duplicate_add_leaves_document_untouched() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.json");
        let mut store = RegistryStore::load(&path).unwrap();
        store.add_runtime(graal()).unwrap();
        let before = fs::read_to_string(&path).unwrap();

        let err = store
            .add_runtime(RuntimeEntry::new("graalvm-21", "/other", vec![Capability::Node]))
            .unwrap_err();
        assert!(matches!(err, LangmError::DuplicateName(_)));
        assert_eq!(fs::read_to_string(&path).unwrap(), before);
        assert_eq!(store.all_runtimes().len(), 1);
    }

    #[test]
    fn corrupt_document_is_reported() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();
        let err = RegistryStore::load(&path).unwrap_err();
        assert!(matches!(err, LangmError::ConfigCorrupt { .. }));
        assert_eq!(fs::read_to_string(&path).unwrap(), "{ not json");
    }

    #[test]
    fn unknown_capability_in_document_is_corrupt() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.json");
        fs::write(
            &path,
            r#"{"current":"","runtimes":[{"name":"py","path":"/opt/py","capabilities":["python"]}]}"#,
        )
        .unwrap();
        assert!(matches!(
            RegistryStore::load(&path),
            Err(LangmError::ConfigCorrupt { .. })
        ));
    }

    #[test]
    fn scenario_from_empty_environment() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.json");

        let mut store = RegistryStore::load(&path).unwrap();
        assert!(store.registry().current.is_empty());
        assert!(store.all_runtimes().is_empty());

        store
            .add_runtime(RuntimeEntry::new("node20", "/opt/node20", vec![Capability::Node]))
            .unwrap();
        assert!(matches!(
            store.add_runtime(RuntimeEntry::new("node20", "/opt/node20", vec![Capability::Node])),
            Err(LangmError::DuplicateName(_))
        ));
        assert!(store.runtimes_by_capability(Capability::Java).is_empty());

        store.set_current("node20").unwrap();
        let reloaded = RegistryStore::load(&path).unwrap();
        assert_eq!(reloaded.registry().current, "node20");
        assert!(reloaded.runtime_by_name("node20").is_some());
        assert_eq!(reloaded.path(), path.as_path());
    }
}
