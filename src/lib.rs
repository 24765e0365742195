//! Capability-based runtime manager.
//!
//! Runtime directories (Node.js, JDK, GraalVM, ...) are registered by name in
//! `<langm home>/config.json` together with the capabilities they provide. One
//! of them is active at a time: `<langm home>/current` links to it, and
//! `current/bin` on `PATH` exposes whichever executables it ships. Because the
//! link is capability-agnostic, a single GraalVM entry can serve both `java`
//! and `node`.

pub mod capability;
pub mod commands;
pub mod detector;
pub mod error;
pub mod link;
pub mod paths;
pub mod registry;

pub use capability::Capability;
pub use error::{LangmError, Result};
pub use link::{ActiveLink, PointerRemoval, RemovalStep};
pub use paths::LangmPaths;
pub use registry::{Registry, RegistryStore, RuntimeEntry};
