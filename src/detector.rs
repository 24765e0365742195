//! Read-only probe that reports which capabilities a directory satisfies.
//!
//! Detection is an existence check on each capability's marker executable:
//! nothing is executed and no version is probed. Missing markers are not an
//! error; only unexpected filesystem failures (for example a permission error
//! while stat-ing `bin/`) are surfaced.

use crate::capability::Capability;
use crate::error::{LangmError, Result};
use std::fs;
use std::io;
use std::path::Path;

/// Capabilities present under `dir`, in canonical order.
///
/// A directory that does not exist yields an empty list; callers validate the
/// directory before detecting.
pub fn detect(dir: &Path) -> Result<Vec<Capability>> {
    let mut found = Vec::new();
    for capability in Capability::ALL {
        let marker = dir.join(capability.marker_relative_path());
        if marker_present(&marker)? {
            tracing::debug!(capability = %capability, marker = %marker.display(), "marker found");
            found.push(capability);
        }
    }
    Ok(found)
}

fn marker_present(marker: &Path) -> Result<bool> {
    match fs::metadata(marker) {
        Ok(meta) => Ok(meta.is_file()),
        Err(err) if is_absent(&err) => Ok(false),
        Err(err) => Err(LangmError::io(
            format!("inspecting {}", marker.display()),
            err,
        )),
    }
}

fn is_absent(err: &io::Error) -> bool {
    // NotADirectory: some path component (e.g. `bin`) is a regular file.
    matches!(
        err.kind(),
        io::ErrorKind::NotFound | io::ErrorKind::NotADirectory
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch_marker(root: &Path, capability: Capability) {
        let marker = root.join(capability.marker_relative_path());
        fs::create_dir_all(marker.parent().unwrap()).unwrap();
        fs::write(&marker, "").unwrap();
    }

    #[test]
    fn empty_directory_has_no_capabilities() {
        let temp = TempDir::new().unwrap();
        assert!(detect(temp.path()).unwrap().is_empty());
    }

    #[test]
    fn detects_single_markers() {
        let node = TempDir::new().unwrap();
        touch_marker(node.path(), Capability::Node);
        assert_eq!(detect(node.path()).unwrap(), vec![Capability::Node]);

        let java = TempDir::new().unwrap();
        touch_marker(java.path(), Capability::Java);
        assert_eq!(detect(java.path()).unwrap(), vec![Capability::Java]);
    }

    #[test]
    fn one_directory_can_satisfy_both() {
        let graal = TempDir::new().unwrap();
        touch_marker(graal.path(), Capability::Java);
        touch_marker(graal.path(), Capability::Node);
        assert_eq!(
            detect(graal.path()).unwrap(),
            vec![Capability::Node, Capability::Java]
        );
    }

    #[test]
    fn marker_directory_does_not_count() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join(Capability::Node.marker_relative_path())).unwrap();
        assert!(detect(temp.path()).unwrap().is_empty());
    }

    #[test]
    fn bin_as_file_means_absent() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("bin"), "not a directory").unwrap();
        assert!(detect(temp.path()).unwrap().is_empty());
    }

    #[test]
    fn missing_directory_reports_nothing() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("gone");
        assert!(detect(&missing).unwrap().is_empty());
    }
}
