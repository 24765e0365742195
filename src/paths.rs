//! Locations of the managing directory, the registry document, and the
//! active link.
//!
//! Resolution order:
//! 1. `LANGM_HOME` (the managing directory itself) when set and non-empty
//! 2. `<home>/.langm`

use crate::error::{LangmError, Result};
use std::env;
use std::ffi::OsString;
use std::path::PathBuf;

pub const ENV_LANGM_HOME: &str = "LANGM_HOME";

const LANGM_DIR_NAME: &str = ".langm";
const CONFIG_FILE_NAME: &str = "config.json";
const CURRENT_LINK_NAME: &str = "current";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LangmPaths {
    pub root: PathBuf,
    pub config_file: PathBuf,
    pub current_link: PathBuf,
}

impl LangmPaths {
    pub fn resolve() -> Result<Self> {
        Self::resolve_with(env::var_os(ENV_LANGM_HOME), dirs::home_dir())
    }

    pub fn from_root(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            config_file: root.join(CONFIG_FILE_NAME),
            current_link: root.join(CURRENT_LINK_NAME),
            root,
        }
    }

    /// Directory users put on `PATH`; it follows whichever runtime is active.
    pub fn bin_dir(&self) -> PathBuf {
        self.current_link.join("bin")
    }

    fn resolve_with(env_root: Option<OsString>, home: Option<PathBuf>) -> Result<Self> {
        if let Some(root) = env_root.filter(|value| !value.is_empty()) {
            tracing::debug!(root = ?root, "using {ENV_LANGM_HOME}");
            return Ok(Self::from_root(PathBuf::from(root)));
        }
        let home = home.ok_or(LangmError::NoHomeDir)?;
        Ok(Self::from_root(home.join(LANGM_DIR_NAME)))
    }
}
