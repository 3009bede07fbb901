//! Quay - build descriptor resolution for Flutter Android apps
//!
//! This crate reads a `Quay.toml` build descriptor, resolves the values it
//! takes from the framework, validates the result and produces the
//! effective build plan handed to the external builder.

pub mod core;
pub mod framework;
pub mod ops;
pub mod plan;
pub mod resolver;
pub mod util;

pub use core::descriptor::Descriptor;
pub use framework::{FlutterProvider, VersionProvider};
pub use plan::EffectiveBuildPlan;
pub use resolver::{ConfigError, Resolver};
pub use util::context::GlobalContext;
