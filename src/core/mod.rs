//! Core data structures for Quay.
//!
//! This module contains the descriptor schema:
//! - Literal-or-reference settings
//! - Compile options and language levels
//! - Build variants and signing configs
//! - Dependency declarations

pub mod compile;
pub mod dependency;
pub mod descriptor;
pub mod setting;
pub mod signing;
pub mod variant;

pub use compile::{CompileOptions, JavaVersion, KotlinOptions};
pub use dependency::{Coordinate, DependencyDeclaration, Scope};
pub use descriptor::{Descriptor, PluginReference, DESCRIPTOR_NAME};
pub use setting::Setting;
pub use signing::{SigningConfig, SigningRegistry};
pub use variant::{BuildVariant, ResolvedVariant, VariantSet};
