//! Active-link management.
//!
//! A single link at `<langm home>/current` points at the active runtime
//! directory; PATH-based tools find executables through `current/bin`. The
//! link is replaced, not updated: the old pointer is removed and a new one is
//! created. There is no rollback, so a failed create leaves no link behind.
//!
//! The old pointer may be a symbolic link or a directory-style link (a
//! junction on Windows, or a plain directory left by other tools). Removal
//! walks [`REMOVAL_STEPS`] in order: the precise unlink first, then a
//! recursive removal.

use crate::error::{LangmError, Result};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

// ERROR_PRIVILEGE_NOT_HELD
#[cfg(windows)]
const WINDOWS_PRIVILEGE_NOT_HELD: i32 = 1314;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RemovalStep {
    /// Remove the link itself without following it.
    Unlink,
    /// Recursively remove whatever occupies the link location.
    RemoveTree,
}

impl RemovalStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            RemovalStep::Unlink => "unlink",
            RemovalStep::RemoveTree => "remove-tree",
        }
    }

    fn apply(&self, path: &Path) -> io::Result<()> {
        match self {
            RemovalStep::Unlink => unlink(path),
            RemovalStep::RemoveTree => fs::remove_dir_all(path),
        }
    }
}

pub const REMOVAL_STEPS: &[RemovalStep] = &[RemovalStep::Unlink, RemovalStep::RemoveTree];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerRemoval {
    /// Nothing occupied the link location.
    Absent,
    /// The pointer was removed by the given step.
    Removed(RemovalStep),
}

#[derive(Clone, Debug)]
pub struct ActiveLink {
    link: PathBuf,
}

impl ActiveLink {
    pub fn new(link: impl Into<PathBuf>) -> Self {
        Self { link: link.into() }
    }

    pub fn path(&self) -> &Path {
        &self.link
    }

    /// Point the active link at `target`, replacing any existing pointer.
    pub fn switch_to(&self, target: &Path) -> Result<()> {
        if let Some(parent) = self.link.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|err| {
                LangmError::io(format!("creating directory {}", parent.display()), err)
            })?;
        }

        let removal = self.remove_active_pointer()?;
        tracing::debug!(link = %self.link.display(), ?removal, "previous pointer cleared");

        create_dir_link(target, &self.link).map_err(|err| link_error(&self.link, target, err))?;
        tracing::info!(
            link = %self.link.display(),
            target = %target.display(),
            "active link switched"
        );
        Ok(())
    }

    /// Remove whatever occupies the link location.
    ///
    /// A step failing with anything other than "not found" hands over to the
    /// next step; the last step's failure is returned.
    pub fn remove_active_pointer(&self) -> Result<PointerRemoval> {
        let mut last_err = None;
        for step in REMOVAL_STEPS {
            match step.apply(&self.link) {
                Ok(()) => return Ok(PointerRemoval::Removed(*step)),
                Err(err) if err.kind() == io::ErrorKind::NotFound => {
                    return Ok(PointerRemoval::Absent);
                }
                Err(err) => {
                    tracing::debug!(
                        link = %self.link.display(),
                        step = step.as_str(),
                        error = %err,
                        "pointer removal step failed"
                    );
                    last_err = Some(err);
                }
            }
        }
        match last_err {
            Some(err) => Err(LangmError::io(
                format!("removing {}", self.link.display()),
                err,
            )),
            None => Ok(PointerRemoval::Absent),
        }
    }

    /// Where the link points, or `None` when no link exists or the location
    /// holds something that is not a link.
    pub fn current_target(&self) -> Result<Option<PathBuf>> {
        match fs::read_link(&self.link) {
            Ok(target) => Ok(Some(target)),
            Err(err)
                if matches!(
                    err.kind(),
                    io::ErrorKind::NotFound | io::ErrorKind::InvalidInput
                ) =>
            {
                Ok(None)
            }
            Err(err) => Err(LangmError::io(
                format!("reading link {}", self.link.display()),
                err,
            )),
        }
    }

    /// True when something occupies the link location. Does not follow the
    /// link, so a dangling link still counts.
    pub fn exists(&self) -> bool {
        fs::symlink_metadata(&self.link).is_ok()
    }
}

#[cfg(unix)]
fn unlink(path: &Path) -> io::Result<()> {
    fs::remove_file(path)
}

// Directory symlinks and junctions are directory entries on Windows;
// remove_dir drops the link without touching the target.
#[cfg(windows)]
fn unlink(path: &Path) -> io::Result<()> {
    fs::remove_dir(path).or_else(|_| fs::remove_file(path))
}

#[cfg(unix)]
fn create_dir_link(target: &Path, link: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

#[cfg(windows)]
fn create_dir_link(target: &Path, link: &Path) -> io::Result<()> {
    std::os::windows::fs::symlink_dir(target, link)
}

/// Classify a failed link creation; privilege failures carry remediation text.
fn link_error(link: &Path, target: &Path, err: io::Error) -> LangmError {
    if is_permission_error(&err) {
        LangmError::PermissionDenied {
            link: link.to_path_buf(),
            source: err,
        }
    } else {
        LangmError::io(
            format!("creating link {} -> {}", link.display(), target.display()),
            err,
        )
    }
}

fn is_permission_error(err: &io::Error) -> bool {
    if err.kind() == io::ErrorKind::PermissionDenied {
        return true;
    }
    #[cfg(windows)]
    {
        err.raw_os_error() == Some(WINDOWS_PRIVILEGE_NOT_HELD)
    }
    #[cfg(not(windows))]
    {
        false
    }
}

#[cfg(test)]
mod link_error_tests {
    use super::*;

    fn classify(err: io::Error) -> LangmError {
        link_error(Path::new("home/.langm/current"), Path::new("opt/jdk17"), err)
    }

    #[test]
    fn permission_denied_carries_remediation() {
        let err = classify(io::Error::from(io::ErrorKind::PermissionDenied));
        assert!(matches!(
            &err,
            LangmError::PermissionDenied { link, .. } if link == Path::new("home/.langm/current")
        ));
        assert!(err.to_string().contains("Developer Mode"));
    }

    #[test]
    fn other_failures_stay_io_errors() {
        let err = classify(io::Error::from(io::ErrorKind::AlreadyExists));
        match err {
            LangmError::Io { context, source } => {
                assert!(context.contains("creating link"));
                assert_eq!(source.kind(), io::ErrorKind::AlreadyExists);
            }
            other => panic!("expected Io, got {other:?}"),
        }
    }

    #[cfg(windows)]
    #[test]
    fn privilege_not_held_is_permission_denied() {
        let err = classify(io::Error::from_raw_os_error(WINDOWS_PRIVILEGE_NOT_HELD));
        assert!(matches!(err, LangmError::PermissionDenied { .. }));
    }
}
