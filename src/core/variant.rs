//! Build variants (build types) and their override merging.
//!
//! A declared variant overrides only the fields it sets. Everything else is
//! inherited from the framework defaults for that variant name. `debug` and
//! `release` always exist even when not declared.

use serde::{Deserialize, Serialize};

use crate::core::signing::DEBUG_SIGNING_CONFIG;

/// Built-in debug variant name.
pub const DEBUG: &str = "debug";

/// Built-in release variant name.
pub const RELEASE: &str = "release";

/// A `buildTypes` entry as declared in the descriptor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildVariant {
    /// Variant name (e.g. "release")
    pub name: String,

    /// Enable code shrinking/obfuscation
    #[serde(default)]
    pub is_minify_enabled: Option<bool>,

    /// Remove unused resources (requires minification)
    #[serde(default)]
    pub is_shrink_resources: Option<bool>,

    #[serde(default)]
    pub is_debuggable: Option<bool>,

    /// Name of the signing config to use
    #[serde(default)]
    pub signing_config: Option<String>,

    #[serde(default)]
    pub application_id_suffix: Option<String>,

    #[serde(default)]
    pub version_name_suffix: Option<String>,

    /// Shrinker rule files
    #[serde(default)]
    pub proguard_files: Option<Vec<String>>,
}

impl BuildVariant {
    /// Create a variant that declares nothing but its name.
    pub fn named(name: impl Into<String>) -> Self {
        BuildVariant {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Overlay the declared fields onto `base`.
    pub fn apply_to(&self, base: &mut ResolvedVariant) {
        if let Some(minify) = self.is_minify_enabled {
            base.is_minify_enabled = minify;
        }
        if let Some(shrink) = self.is_shrink_resources {
            base.is_shrink_resources = shrink;
        }
        if let Some(debuggable) = self.is_debuggable {
            base.is_debuggable = debuggable;
        }
        if self.signing_config.is_some() {
            base.signing_config = self.signing_config.clone();
        }
        if self.application_id_suffix.is_some() {
            base.application_id_suffix = self.application_id_suffix.clone();
        }
        if self.version_name_suffix.is_some() {
            base.version_name_suffix = self.version_name_suffix.clone();
        }
        if let Some(ref files) = self.proguard_files {
            base.proguard_files = files.clone();
        }
    }
}

/// A variant with every field concrete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedVariant {
    pub name: String,
    pub is_minify_enabled: bool,
    pub is_shrink_resources: bool,
    pub is_debuggable: bool,
    pub signing_config: Option<String>,
    pub application_id_suffix: Option<String>,
    pub version_name_suffix: Option<String>,
    pub proguard_files: Vec<String>,
}

impl ResolvedVariant {
    /// Framework defaults for a variant name.
    ///
    /// `debug` is debuggable and signed with the debug key. Every other
    /// variant starts non-debuggable and unsigned. Minification and
    /// resource shrinking are off unless a variant turns them on.
    pub fn defaults_for(name: &str) -> Self {
        let is_debug = name == DEBUG;
        ResolvedVariant {
            name: name.to_string(),
            is_minify_enabled: false,
            is_shrink_resources: false,
            is_debuggable: is_debug,
            signing_config: is_debug.then(|| DEBUG_SIGNING_CONFIG.to_string()),
            application_id_suffix: None,
            version_name_suffix: None,
            proguard_files: Vec::new(),
        }
    }

    /// Whether this variant is signed with the debug key.
    pub fn uses_debug_signing(&self) -> bool {
        self.signing_config.as_deref() == Some(DEBUG_SIGNING_CONFIG)
    }
}

/// All variants of a descriptor after merging.
#[derive(Debug, Clone, Default)]
pub struct VariantSet {
    /// Merged variants, built-ins first, then declared order
    variants: Vec<ResolvedVariant>,
}

impl VariantSet {
    /// Merge declared variants over the built-in ones.
    ///
    /// When a name is declared more than once, the last declaration wins
    /// as a whole; earlier declarations for that name are discarded.
    pub fn from_declared(declared: &[BuildVariant]) -> Self {
        let mut variants = vec![
            ResolvedVariant::defaults_for(DEBUG),
            ResolvedVariant::defaults_for(RELEASE),
        ];
        let mut last: Vec<&BuildVariant> = Vec::new();

        for variant in declared {
            if let Some(pos) = last.iter().position(|v| v.name == variant.name) {
                tracing::warn!(
                    "build type `{}` is declared more than once; the last declaration wins",
                    variant.name
                );
                last[pos] = variant;
            } else {
                last.push(variant);
            }
        }

        for variant in last {
            let mut resolved = ResolvedVariant::defaults_for(&variant.name);
            variant.apply_to(&mut resolved);

            match variants.iter_mut().find(|v| v.name == variant.name) {
                Some(existing) => *existing = resolved,
                None => variants.push(resolved),
            }
        }

        VariantSet { variants }
    }

    /// Look up a variant by name.
    pub fn get(&self, name: &str) -> Option<&ResolvedVariant> {
        self.variants.iter().find(|v| v.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResolvedVariant> {
        self.variants.iter()
    }

    pub fn names(&self) -> Vec<String> {
        self.variants.iter().map(|v| v.name.clone()).collect()
    }
}
