//! Flutter-style framework provider.
//!
//! Values come from three layers, later layers winning:
//! 1. Built-in defaults shipped with the framework's Gradle plugin
//! 2. `local.properties` in the Android project directory
//! 3. `[framework]` overrides from Quay configuration

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Result;

use crate::framework::{ProvidedValue, VersionProvider};
use crate::util::config::FrameworkConfig;
use crate::util::properties;

/// Default `flutter.compileSdkVersion`.
pub const DEFAULT_COMPILE_SDK: i64 = 34;

/// Default `flutter.targetSdkVersion`.
pub const DEFAULT_TARGET_SDK: i64 = 34;

/// Default `flutter.minSdkVersion`.
pub const DEFAULT_MIN_SDK: i64 = 21;

/// Default `flutter.ndkVersion`.
pub const DEFAULT_NDK: &str = "26.3.11579264";

/// Name of the properties file written by the framework tooling.
pub const LOCAL_PROPERTIES: &str = "local.properties";

/// Provider for `flutter.*` references.
#[derive(Debug, Clone)]
pub struct FlutterProvider {
    values: BTreeMap<String, ProvidedValue>,
}

impl FlutterProvider {
    /// Provider with only the built-in defaults.
    pub fn with_defaults() -> Self {
        let mut values = BTreeMap::new();
        values.insert(
            "flutter.compileSdkVersion".to_string(),
            ProvidedValue::Integer(DEFAULT_COMPILE_SDK),
        );
        values.insert(
            "flutter.targetSdkVersion".to_string(),
            ProvidedValue::Integer(DEFAULT_TARGET_SDK),
        );
        values.insert(
            "flutter.minSdkVersion".to_string(),
            ProvidedValue::Integer(DEFAULT_MIN_SDK),
        );
        values.insert(
            "flutter.ndkVersion".to_string(),
            ProvidedValue::Text(DEFAULT_NDK.to_string()),
        );
        // The Gradle plugin falls back to these when pubspec has no version.
        values.insert("flutter.versionCode".to_string(), ProvidedValue::Integer(1));
        values.insert(
            "flutter.versionName".to_string(),
            ProvidedValue::Text("1.0".to_string()),
        );

        FlutterProvider { values }
    }

    /// Load the provider for an Android project directory.
    pub fn load(project_dir: &Path, config: &FrameworkConfig) -> Result<Self> {
        let mut provider = Self::with_defaults();

        let props_path = project_dir.join(LOCAL_PROPERTIES);
        if props_path.exists() {
            let props = properties::load(&props_path)?;
            tracing::debug!(
                "loaded {} entries from {}",
                props.len(),
                props_path.display()
            );
            provider.apply_properties(props);
        }

        provider.apply_config(config);
        Ok(provider)
    }

    /// Apply `local.properties` entries.
    ///
    /// Properties are untyped; integers are recognised so that
    /// `flutter.versionCode=7` behaves like a numeric value.
    pub fn apply_properties(&mut self, props: BTreeMap<String, String>) {
        for (key, value) in props {
            let value = match value.parse::<i64>() {
                Ok(i) => ProvidedValue::Integer(i),
                Err(_) => ProvidedValue::Text(value),
            };
            self.values.insert(key, value);
        }
    }

    /// Apply configuration overrides.
    pub fn apply_config(&mut self, config: &FrameworkConfig) {
        if let Some(ref sdk) = config.sdk {
            self.values.insert(
                "flutter.sdk".to_string(),
                ProvidedValue::Text(sdk.display().to_string()),
            );
        }

        for (key, value) in &config.values {
            match ProvidedValue::from_toml(value) {
                Some(v) => {
                    self.values.insert(key.clone(), v);
                }
                None => tracing::warn!(
                    "ignoring framework override `{}`: expected an integer or a string",
                    key
                ),
            }
        }
    }
}

impl VersionProvider for FlutterProvider {
    fn lookup(&self, key: &str) -> Option<ProvidedValue> {
        self.values.get(key).cloned()
    }

    fn keys(&self) -> Vec<String> {
        self.values.keys().cloned().collect()
    }
}
