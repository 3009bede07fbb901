//! Resolution error types and diagnostics.

use miette::Diagnostic as MietteDiagnostic;
use thiserror::Error;

use crate::util::diagnostic::{suggestions, Diagnostic};

/// A descriptor that cannot produce an effective build plan.
///
/// Every kind names the offending field or config so the invoking tool can
/// print a precise message. None of them is recoverable by retrying.
#[derive(Debug, Clone, PartialEq, Eq, Error, MietteDiagnostic)]
pub enum ConfigError {
    #[error("`{field}` references `{reference}`, which the framework does not provide")]
    #[diagnostic(code(quay::resolve::unresolved_reference))]
    UnresolvedReference {
        field: String,
        reference: String,
        candidates: Vec<String>,
    },

    #[error("`{field}` references `{reference}`, which resolved to unusable value {value}")]
    #[diagnostic(code(quay::resolve::invalid_reference_value))]
    InvalidReferenceValue {
        field: String,
        reference: String,
        value: String,
    },

    #[error("SDK levels must satisfy minSdk <= targetSdk <= compileSdk (got {min}, {target}, {compile})")]
    #[diagnostic(code(quay::resolve::invalid_sdk_ordering))]
    InvalidSdkOrdering { min: u32, target: u32, compile: u32 },

    #[error("core library desugaring is enabled but no desugaring library is declared")]
    #[diagnostic(
        code(quay::resolve::missing_desugar),
        help("add com.android.tools:desugar_jdk_libs to the dependencies")
    )]
    MissingDesugarLibrary,

    #[error("build type `{variant}` uses unknown signing config `{name}`")]
    #[diagnostic(code(quay::resolve::unknown_signing_config))]
    UnknownSigningConfig {
        variant: String,
        name: String,
        available: Vec<String>,
    },

    #[error("unknown build type `{name}`")]
    #[diagnostic(code(quay::resolve::unknown_variant))]
    UnknownVariant { name: String, available: Vec<String> },

    #[error("build type `{variant}` shrinks resources without minifying code")]
    #[diagnostic(
        code(quay::resolve::shrink_without_minify),
        help("set isMinifyEnabled = true or isShrinkResources = false")
    )]
    ShrinkWithoutMinify { variant: String },

    #[error("non-debuggable build type `{variant}` is signed with the debug key")]
    #[diagnostic(
        code(quay::resolve::debug_signing_for_release),
        help("declare a release signing config, or set allowDebugSigningForRelease = true")
    )]
    DebugSigningForRelease { variant: String },
}

impl ConfigError {
    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            ConfigError::UnresolvedReference {
                field,
                reference,
                candidates,
            } => {
                let mut diag = Diagnostic::error(format!(
                    "unresolved reference `{}` for `{}`",
                    reference, field
                ));

                if !candidates.is_empty() {
                    diag = diag.with_context(format!("did you mean: {}?", candidates.join(", ")));
                }

                diag.with_suggestion(format!("Write `{}` as a literal value", field))
                    .with_suggestion(suggestions::UNRESOLVED_REFERENCE)
            }

            ConfigError::InvalidReferenceValue {
                field,
                reference,
                value,
            } => Diagnostic::error(format!("invalid value for `{}`", field))
                .with_context(format!("`{}` = {}", reference, value))
                .with_suggestion(format!("Provide a value of the right type for `{}`", reference)),

            ConfigError::InvalidSdkOrdering {
                min,
                target,
                compile,
            } => {
                let mut diag = Diagnostic::error("SDK levels are out of order")
                    .with_context(format!("minSdk = {}", min))
                    .with_context(format!("targetSdk = {}", target))
                    .with_context(format!("compileSdk = {}", compile));

                if min > target {
                    diag = diag.with_suggestion("Lower minSdk to at most targetSdk");
                }
                if target > compile {
                    diag = diag.with_suggestion("Raise compileSdk to at least targetSdk");
                }
                diag
            }

            ConfigError::MissingDesugarLibrary => Diagnostic::error(
                "core library desugaring is enabled but no desugaring library is declared",
            )
            .with_context("isCoreLibraryDesugaringEnabled = true")
            .with_suggestion(suggestions::MISSING_DESUGAR)
            .with_suggestion("Set isCoreLibraryDesugaringEnabled = false"),

            ConfigError::UnknownSigningConfig {
                variant,
                name,
                available,
            } => Diagnostic::error(format!(
                "build type `{}` references signing config `{}`, which does not exist",
                variant, name
            ))
            .with_context(format!("available signing configs: {}", available.join(", ")))
            .with_suggestion(format!("Declare a signing config named `{}`", name)),

            ConfigError::UnknownVariant { name, available } => {
                Diagnostic::error(format!("unknown build type `{}`", name))
                    .with_context(format!("available build types: {}", available.join(", ")))
                    .with_suggestion(format!("Declare a build type named `{}`", name))
            }

            ConfigError::ShrinkWithoutMinify { variant } => Diagnostic::error(format!(
                "build type `{}` removes unused resources but does not shrink code",
                variant
            ))
            .with_context("isShrinkResources = true")
            .with_context("isMinifyEnabled = false")
            .with_suggestion("Set isMinifyEnabled = true")
            .with_suggestion("Set isShrinkResources = false"),

            ConfigError::DebugSigningForRelease { variant } => Diagnostic::error(format!(
                "build type `{}` would ship signed with the debug key",
                variant
            ))
            .with_suggestion("Declare a release signing config and reference it")
            .with_suggestion("Set allowDebugSigningForRelease = true to opt in explicitly"),
        }
    }
}
