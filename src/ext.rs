//! Collaborator contracts for services reached through a pipeline.
//!
//! The crate exposes traits without concrete clients so applications can bind their own
//! identity service and token authority while reusing the pipeline configuration for
//! transport.

pub mod authority;
pub mod identity;

pub use authority::*;
pub use identity::*;
