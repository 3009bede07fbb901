//! Configuration file support for Quay.
//!
//! Quay supports two configuration file locations:
//! - Global: `~/.quay/config.toml` - User-wide defaults
//! - Project: `.quay/config.toml` - Project-specific overrides
//!
//! Project config takes precedence over global config.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Quay configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Resolution settings
    pub resolve: ResolveConfig,

    /// Framework value overrides
    pub framework: FrameworkConfig,
}

/// Resolution-related configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolveConfig {
    /// Variant to resolve when none is given on the command line
    pub default_variant: Option<String>,

    /// Treat debug signing of a non-debuggable variant as an error.
    /// Unset means "inherit"; an explicit `false` overrides a lower layer.
    pub deny_debug_signing: Option<bool>,
}

/// Framework provider configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameworkConfig {
    /// Path to the framework SDK (overrides `flutter.sdk` from local.properties)
    pub sdk: Option<PathBuf>,

    /// Values that override framework-provided references,
    /// e.g. `"flutter.minSdkVersion" = 23`
    pub values: BTreeMap<String, toml::Value>,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        if other.resolve.default_variant.is_some() {
            self.resolve.default_variant = other.resolve.default_variant;
        }
        if other.resolve.deny_debug_signing.is_some() {
            self.resolve.deny_debug_signing = other.resolve.deny_debug_signing;
        }

        if other.framework.sdk.is_some() {
            self.framework.sdk = other.framework.sdk;
        }
        self.framework.values.extend(other.framework.values);
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.quay/config.toml)
/// 2. Global config (~/.quay/config.toml)
/// 3. Defaults
///
/// A file that exists but cannot be read or parsed is an error.
pub fn load_config(global_path: &Path, project_path: &Path) -> Result<Config> {
    let mut config = Config::default();

    if global_path.exists() {
        config.merge(Config::load(global_path)?);
    }

    if project_path.exists() {
        config.merge(Config::load(project_path)?);
    }

    tracing::debug!(
        "config: default_variant={:?}, deny_debug_signing={:?}",
        config.resolve.default_variant,
        config.resolve.deny_debug_signing
    );

    Ok(config)
}

/// Path of the project config for a project rooted at `project_root`.
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(".quay").join("config.toml")
}

/// Get the global quay config directory (~/.quay).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".quay"))
}
