//! Literal-or-reference descriptor values.

use serde::{Deserialize, Serialize};

use crate::framework::{ProvidedValue, VersionProvider};
use crate::resolver::errors::ConfigError;

/// A descriptor value that is either written literally or taken from the
/// framework provider.
///
/// ```toml
/// minSdk = 21
/// targetSdk = { ref = "flutter.targetSdkVersion" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Setting<T> {
    /// Value supplied by the framework provider under `key`.
    Reference {
        #[serde(rename = "ref")]
        key: String,
    },
    /// Value written in the descriptor.
    Literal(T),
}

impl<T> Setting<T> {
    /// Shorthand for a reference setting.
    pub fn reference(key: impl Into<String>) -> Self {
        Setting::Reference { key: key.into() }
    }

    /// The reference key, if this is a reference.
    pub fn reference_key(&self) -> Option<&str> {
        match self {
            Setting::Reference { key } => Some(key),
            Setting::Literal(_) => None,
        }
    }
}

impl<T: FromProvided + Clone> Setting<T> {
    /// Resolve to a concrete value.
    ///
    /// `field` is the descriptor field name, reported verbatim on failure.
    pub fn resolve(&self, field: &str, provider: &dyn VersionProvider) -> Result<T, ConfigError> {
        match self {
            Setting::Literal(value) => Ok(value.clone()),
            Setting::Reference { key } => {
                let provided =
                    provider
                        .lookup(key)
                        .ok_or_else(|| ConfigError::UnresolvedReference {
                            field: field.to_string(),
                            reference: key.clone(),
                            candidates: similar_keys(key, &provider.keys()),
                        })?;

                T::from_provided(&provided).ok_or_else(|| ConfigError::InvalidReferenceValue {
                    field: field.to_string(),
                    reference: key.clone(),
                    value: provided.to_string(),
                })
            }
        }
    }
}

/// Conversion from a provider value into a typed setting.
pub trait FromProvided: Sized {
    fn from_provided(value: &ProvidedValue) -> Option<Self>;
}

impl FromProvided for u32 {
    fn from_provided(value: &ProvidedValue) -> Option<Self> {
        match value {
            ProvidedValue::Integer(i) => u32::try_from(*i).ok(),
            ProvidedValue::Text(s) => s.trim().parse().ok(),
        }
    }
}

impl FromProvided for String {
    fn from_provided(value: &ProvidedValue) -> Option<Self> {
        match value {
            ProvidedValue::Integer(i) => Some(i.to_string()),
            ProvidedValue::Text(s) => Some(s.clone()),
        }
    }
}

/// Known keys that look like a misspelling of `key`.
fn similar_keys(key: &str, known: &[String]) -> Vec<String> {
    let leaf = key.rsplit('.').next().unwrap_or(key).to_lowercase();
    if leaf.is_empty() {
        return Vec::new();
    }

    known
        .iter()
        .filter(|k| {
            let known_leaf = k.rsplit('.').next().unwrap_or(k).to_lowercase();
            known_leaf.contains(&leaf) || leaf.contains(&known_leaf)
        })
        .cloned()
        .collect()
}
