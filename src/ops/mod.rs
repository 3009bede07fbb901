//! High-level operations behind the CLI commands.

pub mod quay_init;
pub mod quay_resolve;

pub use quay_init::init_descriptor;
pub use quay_resolve::{ResolveRequest, Session};
