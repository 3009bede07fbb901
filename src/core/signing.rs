//! Signing config references.
//!
//! Signing configs are opaque to the resolver: only their names are
//! checked. Credentials are looked up by name in the external signing
//! store when the artifact is signed.

use std::collections::BTreeMap;

use serde::Deserialize;

/// The signing config that always exists.
pub const DEBUG_SIGNING_CONFIG: &str = "debug";

/// A `signingConfigs` entry. Fields other than `name` are carried but never
/// interpreted.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SigningConfig {
    pub name: String,

    #[serde(flatten)]
    pub properties: BTreeMap<String, toml::Value>,
}

/// Names of every signing config available to variants.
#[derive(Debug, Clone)]
pub struct SigningRegistry {
    names: Vec<String>,
}

impl SigningRegistry {
    /// Registry with the debug config plus the declared ones.
    pub fn from_declared(declared: &[SigningConfig]) -> Self {
        let mut names = vec![DEBUG_SIGNING_CONFIG.to_string()];
        for config in declared {
            if !names.contains(&config.name) {
                names.push(config.name.clone());
            }
        }
        SigningRegistry { names }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }
}
