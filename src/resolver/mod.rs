//! Build descriptor resolution.
//!
//! Turns a [`Descriptor`](crate::core::Descriptor) plus framework-provided
//! values into one [`EffectiveBuildPlan`](crate::plan::EffectiveBuildPlan),
//! or a list of named configuration errors.

pub mod errors;
pub mod flatten;
pub mod resolve;

pub use errors::ConfigError;
pub use flatten::flatten;
pub use resolve::{resolve, ResolveOptions, Resolver};
