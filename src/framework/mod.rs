//! Framework version providers.
//!
//! Descriptor fields such as `minSdk` may be written as a reference
//! (`{ ref = "flutter.minSdkVersion" }`) instead of a literal. A
//! [`VersionProvider`] supplies the concrete values for those references.
//! Providers are consulted once, at the start of resolution.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

pub mod flutter;

pub use flutter::FlutterProvider;

/// A concrete value supplied for a reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProvidedValue {
    Integer(i64),
    Text(String),
}

impl ProvidedValue {
    /// Convert a TOML value, if it has a supported shape.
    pub fn from_toml(value: &toml::Value) -> Option<Self> {
        match value {
            toml::Value::Integer(i) => Some(ProvidedValue::Integer(*i)),
            toml::Value::String(s) => Some(ProvidedValue::Text(s.clone())),
            _ => None,
        }
    }
}

impl fmt::Display for ProvidedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProvidedValue::Integer(i) => write!(f, "{}", i),
            ProvidedValue::Text(s) => write!(f, "\"{}\"", s),
        }
    }
}

impl From<i64> for ProvidedValue {
    fn from(value: i64) -> Self {
        ProvidedValue::Integer(value)
    }
}

impl From<i32> for ProvidedValue {
    fn from(value: i32) -> Self {
        ProvidedValue::Integer(i64::from(value))
    }
}

impl From<u32> for ProvidedValue {
    fn from(value: u32) -> Self {
        ProvidedValue::Integer(i64::from(value))
    }
}

impl From<String> for ProvidedValue {
    fn from(value: String) -> Self {
        ProvidedValue::Text(value)
    }
}

impl From<&str> for ProvidedValue {
    fn from(value: &str) -> Self {
        ProvidedValue::Text(value.to_string())
    }
}

/// Source of values for external references.
pub trait VersionProvider {
    /// Look up the value for a reference key.
    fn lookup(&self, key: &str) -> Option<ProvidedValue>;

    /// Keys this provider knows, for "did you mean" hints.
    fn keys(&self) -> Vec<String> {
        Vec::new()
    }
}

/// A provider backed by a fixed map.
#[derive(Debug, Clone, Default)]
pub struct MapProvider {
    values: BTreeMap<String, ProvidedValue>,
}

impl MapProvider {
    /// Create an empty provider.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a value.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ProvidedValue>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }
}

impl VersionProvider for MapProvider {
    fn lookup(&self, key: &str) -> Option<ProvidedValue> {
        self.values.get(key).cloned()
    }

    fn keys(&self) -> Vec<String> {
        self.values.keys().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_provider_lookup() {
        let provider = MapProvider::new()
            .with("flutter.minSdkVersion", 21)
            .with("flutter.versionName", "1.0.0");

        assert_eq!(
            provider.lookup("flutter.minSdkVersion"),
            Some(ProvidedValue::Integer(21))
        );
        assert_eq!(
            provider.lookup("flutter.versionName"),
            Some(ProvidedValue::Text("1.0.0".to_string()))
        );
        assert_eq!(provider.lookup("flutter.unknown"), None);
        assert_eq!(provider.keys().len(), 2);
    }

    #[test]
    fn test_from_toml() {
        assert_eq!(
            ProvidedValue::from_toml(&toml::Value::Integer(34)),
            Some(ProvidedValue::Integer(34))
        );
        assert_eq!(ProvidedValue::from_toml(&toml::Value::Boolean(true)), None);
    }
}
