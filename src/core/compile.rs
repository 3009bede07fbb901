//! Java/Kotlin compilation options.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Java language level, spelled the way the builder expects
/// (`JavaVersion.VERSION_1_8` is written `"VERSION_1_8"`).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub enum JavaVersion {
    #[serde(rename = "VERSION_1_7")]
    Version1_7,
    #[default]
    #[serde(rename = "VERSION_1_8")]
    Version1_8,
    #[serde(rename = "VERSION_11")]
    Version11,
    #[serde(rename = "VERSION_17")]
    Version17,
    #[serde(rename = "VERSION_21")]
    Version21,
}

impl JavaVersion {
    /// The builder enum name, e.g. `VERSION_1_8`.
    pub fn as_str(&self) -> &'static str {
        match self {
            JavaVersion::Version1_7 => "VERSION_1_7",
            JavaVersion::Version1_8 => "VERSION_1_8",
            JavaVersion::Version11 => "VERSION_11",
            JavaVersion::Version17 => "VERSION_17",
            JavaVersion::Version21 => "VERSION_21",
        }
    }

    /// The JVM target string (`JavaVersion.toString()`), e.g. `1.8` or `17`.
    pub fn jvm_target(&self) -> &'static str {
        match self {
            JavaVersion::Version1_7 => "1.7",
            JavaVersion::Version1_8 => "1.8",
            JavaVersion::Version11 => "11",
            JavaVersion::Version17 => "17",
            JavaVersion::Version21 => "21",
        }
    }
}

impl fmt::Display for JavaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `compileOptions { ... }` block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompileOptions {
    #[serde(default)]
    pub source_compatibility: JavaVersion,

    #[serde(default)]
    pub target_compatibility: JavaVersion,

    /// Backport newer standard-library APIs to older runtimes.
    /// Requires a desugaring library among the dependencies.
    #[serde(default)]
    pub is_core_library_desugaring_enabled: bool,
}

/// `kotlinOptions { ... }` block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KotlinOptions {
    /// Defaults to the target compatibility's JVM target.
    #[serde(default)]
    pub jvm_target: Option<String>,
}

/// Compile options after resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedCompileOptions {
    pub source_compatibility: JavaVersion,
    pub target_compatibility: JavaVersion,
    pub is_core_library_desugaring_enabled: bool,
    pub jvm_target: String,
}

impl ResolvedCompileOptions {
    pub fn new(compile: &CompileOptions, kotlin: &KotlinOptions) -> Self {
        let jvm_target = kotlin
            .jvm_target
            .clone()
            .unwrap_or_else(|| compile.target_compatibility.jvm_target().to_string());

        ResolvedCompileOptions {
            source_compatibility: compile.source_compatibility,
            target_compatibility: compile.target_compatibility,
            is_core_library_desugaring_enabled: compile.is_core_library_desugaring_enabled,
            jvm_target,
        }
    }
}
