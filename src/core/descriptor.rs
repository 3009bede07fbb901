//! Quay.toml descriptor parsing and schema.
//!
//! The descriptor is the declarative input to resolution. Field names are
//! kept exactly as the external builder spells them (`applicationId`,
//! `minSdk`, `isMinifyEnabled`, ...).

use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::compile::{CompileOptions, KotlinOptions};
use crate::core::dependency::DependencyDeclaration;
use crate::core::setting::Setting;
use crate::core::signing::SigningConfig;
use crate::core::variant::BuildVariant;

/// Canonical descriptor file name.
pub const DESCRIPTOR_NAME: &str = "Quay.toml";

/// No descriptor in the directory tree.
#[derive(Debug, Error)]
#[error("could not find `{}` in `{}` or any parent directory", DESCRIPTOR_NAME, .dir.display())]
pub struct DescriptorNotFound {
    pub dir: PathBuf,
}

/// Return the descriptor path in `dir`, if one exists.
pub fn descriptor_in(dir: &Path) -> Option<PathBuf> {
    let path = dir.join(DESCRIPTOR_NAME);
    path.is_file().then_some(path)
}

/// A build-time plugin to apply. Order in the descriptor is significant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PluginReference(String);

impl PluginReference {
    pub fn new(id: impl Into<String>) -> Self {
        PluginReference(id.into())
    }

    pub fn id(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PluginReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// `defaultConfig { ... }` block.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DefaultConfig {
    pub application_id: String,
    pub min_sdk: Setting<u32>,
    pub target_sdk: Setting<u32>,
    pub version_code: Setting<u32>,
    pub version_name: Setting<String>,
}

/// `android { ... }` block.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AndroidBlock {
    pub namespace: String,

    pub compile_sdk: Setting<u32>,

    #[serde(default)]
    pub ndk_version: Option<Setting<String>>,

    #[serde(default)]
    pub compile_options: CompileOptions,

    #[serde(default)]
    pub kotlin_options: KotlinOptions,

    pub default_config: DefaultConfig,

    #[serde(default)]
    pub build_types: Vec<BuildVariant>,

    #[serde(default)]
    pub signing_configs: Vec<SigningConfig>,

    /// Explicit opt-in for signing a non-debuggable variant with the
    /// debug key.
    #[serde(default)]
    pub allow_debug_signing_for_release: bool,
}

/// `flutter { ... }` block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameworkBlock {
    /// Path to the framework project root, relative to the descriptor.
    pub source: String,
}

/// The parsed Quay.toml descriptor.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Descriptor {
    #[serde(default)]
    pub plugins: Vec<PluginReference>,

    pub android: AndroidBlock,

    #[serde(default)]
    pub flutter: Option<FrameworkBlock>,

    #[serde(default)]
    pub dependencies: Vec<DependencyDeclaration>,

    /// The directory containing this descriptor
    #[serde(skip)]
    pub descriptor_dir: PathBuf,
}

impl Descriptor {
    /// Load a descriptor from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read descriptor: {}", path.display()))?;

        Self::parse(&content, path)
    }

    /// Parse descriptor content.
    pub fn parse(content: &str, path: &Path) -> Result<Self> {
        let mut descriptor: Descriptor = toml::from_str(content)
            .with_context(|| format!("failed to parse {}", path.display()))?;

        descriptor.descriptor_dir = path.parent().unwrap_or(Path::new(".")).to_path_buf();

        tracing::debug!(
            "parsed descriptor `{}`: {} plugins, {} build types, {} dependencies",
            descriptor.android.namespace,
            descriptor.plugins.len(),
            descriptor.android.build_types.len(),
            descriptor.dependencies.len()
        );

        Ok(descriptor)
    }
}

/// Generate a starter Quay.toml for a Flutter Android app.
pub fn generate_default_descriptor(namespace: &str) -> String {
    format!(
        r#"plugins = ["com.android.application", "kotlin-android", "dev.flutter.flutter-gradle-plugin"]

[android]
namespace = "{namespace}"
compileSdk = {{ ref = "flutter.compileSdkVersion" }}
ndkVersion = {{ ref = "flutter.ndkVersion" }}

[android.compileOptions]
sourceCompatibility = "VERSION_1_8"
targetCompatibility = "VERSION_1_8"

[android.defaultConfig]
applicationId = "{namespace}"
minSdk = {{ ref = "flutter.minSdkVersion" }}
targetSdk = {{ ref = "flutter.targetSdkVersion" }}
versionCode = {{ ref = "flutter.versionCode" }}
versionName = {{ ref = "flutter.versionName" }}

[[android.buildTypes]]
name = "release"
signingConfig = "debug"

[flutter]
source = "../.."
"#
    )
}
