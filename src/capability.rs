//! Capability tags and the marker executables that prove them.
//!
//! A capability names a language interface a runtime directory provides. One
//! directory may carry several (GraalVM ships both `bin/java` and `bin/node`),
//! so everything downstream treats capabilities as a set keyed by this enum.

use crate::error::{LangmError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Capability {
    Node,
    Java,
}

impl Capability {
    /// Every known capability in canonical order.
    pub const ALL: [Capability; 2] = [Capability::Node, Capability::Java];

    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::Node => "node",
            Capability::Java => "java",
        }
    }

    fn executable(&self) -> &'static str {
        match self {
            Capability::Node => "node",
            Capability::Java => "java",
        }
    }

    /// Marker executable, relative to the runtime directory.
    pub fn marker_relative_path(&self) -> PathBuf {
        PathBuf::from("bin").join(exe_name(self.executable()))
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Capability {
    type Error = LangmError;

    fn try_from(value: &str) -> Result<Self> {
        Capability::ALL
            .into_iter()
            .find(|cap| cap.as_str() == value)
            .ok_or_else(|| LangmError::UnknownCapability(value.to_string()))
    }
}

impl FromStr for Capability {
    type Err = LangmError;

    fn from_str(s: &str) -> Result<Self> {
        Capability::try_from(s)
    }
}

/// Human description of the markers auto-detection looks for, e.g.
/// `bin/node or bin/java`.
pub fn marker_hint() -> String {
    Capability::ALL
        .iter()
        .map(|cap| cap.marker_relative_path().to_string_lossy().replace('\\', "/"))
        .collect::<Vec<_>>()
        .join(" or ")
}

/// Render a capability list as `node, java`.
pub fn join_capabilities(capabilities: &[Capability]) -> String {
    capabilities
        .iter()
        .map(Capability::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

fn exe_name(name: &str) -> String {
    if cfg!(windows) {
        format!("{name}.exe")
    } else {
        name.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_parse_and_render() {
        assert_eq!(Capability::try_from("node").unwrap(), Capability::Node);
        assert_eq!("java".parse::<Capability>().unwrap(), Capability::Java);
        assert_eq!(Capability::Java.to_string(), "java");
        assert!(matches!(
            Capability::try_from("python"),
            Err(LangmError::UnknownCapability(tag)) if tag == "python"
        ));
    }

    #[test]
    fn tags_are_case_sensitive() {
        assert!(Capability::try_from("Node").is_err());
    }

    #[test]
    fn serializes_lowercase() {
        let json = serde_json::to_string(&vec![Capability::Node, Capability::Java]).unwrap();
        assert_eq!(json, r#"["node","java"]"#);
    }

    #[test]
    fn markers_live_under_bin() {
        let marker = Capability::Node.marker_relative_path();
        assert!(marker.starts_with("bin"));
        if cfg!(windows) {
            assert!(marker.ends_with("node.exe"));
        } else {
            assert!(marker.ends_with("node"));
        }
        assert!(marker_hint().contains(" or "));
    }

    #[test]
    fn joins_for_display() {
        assert_eq!(
            join_capabilities(&[Capability::Node, Capability::Java]),
            "node, java"
        );
        assert_eq!(join_capabilities(&[]), "");
    }
}
