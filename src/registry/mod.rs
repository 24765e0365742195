//! Runtime registry: the named entries users register and the name of the
//! active one, persisted as `config.json` under the managing directory.
//!
//! `Registry` is the plain value; `RegistryStore` pairs it with its document
//! path and persists after every mutation.

pub mod model;
pub mod store;

pub use model::{Registry, RuntimeEntry};
pub use store::RegistryStore;
