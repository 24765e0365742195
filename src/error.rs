//! Error taxonomy shared by the registry, detector, and link manager.
//!
//! Library code returns [`LangmError`]; the `langm` binary wraps it in
//! `anyhow` at the command boundary and prints the rendered chain.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Shorthand used across the crate.
pub type Result<T, E = LangmError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum LangmError {
    /// Registration target does not exist or is not a directory.
    #[error("directory does not exist: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    /// Registry paths are stored as strings; this directory has no UTF-8 form.
    #[error("path is not valid UTF-8: {}", .0.display())]
    NonUtf8Path(PathBuf),

    /// No registered entry (within the candidate set) has this name.
    #[error("no registered runtime named \"{0}\"")]
    RuntimeNotFound(String),

    /// Another entry already uses this name.
    #[error("runtime \"{0}\" is already registered")]
    DuplicateName(String),

    /// Auto-detection found no marker executable.
    #[error(
        "unable to detect the runtime type of {}\nno {} found in that directory\nuse --node or --java to choose one explicitly:\n  langm add {} --node",
        .path.display(),
        .markers,
        .path.display()
    )]
    UndetectableCapability { path: PathBuf, markers: String },

    #[error("unknown capability '{0}', expected node or java")]
    UnknownCapability(String),

    /// The registry document exists but does not parse.
    #[error("config file is corrupt or invalid: {}", .path.display())]
    ConfigCorrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Link creation was refused by the platform.
    #[error(
        "failed to create link {}: insufficient privileges\ntry one of the following:\n  1. enable Developer Mode (Windows) or unprivileged symlinks\n  2. run the terminal as administrator",
        .link.display()
    )]
    PermissionDenied {
        link: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{context}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },

    #[error("cannot determine home directory; set LANGM_HOME")]
    NoHomeDir,
}

impl LangmError {
    pub(crate) fn io(context: impl Into<String>, source: io::Error) -> Self {
        LangmError::Io {
            context: context.into(),
            source,
        }
    }
}
