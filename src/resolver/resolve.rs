//! Descriptor resolution.
//!
//! Resolution is a pure transformation: the same descriptor, provider
//! values and options always give the same plan or the same errors.
//! Validation runs in a fixed order:
//!
//! 1. external references resolve
//! 2. `minSdk <= targetSdk <= compileSdk`
//! 3. desugaring has its backport library
//! 4. signing config references exist
//! 5. the selected variant exists
//! 6. the selected variant does not shrink resources without minifying
//! 7. debug signing of a non-debuggable variant is opted into

use crate::core::compile::ResolvedCompileOptions;
use crate::core::descriptor::{Descriptor, PluginReference};
use crate::core::signing::SigningRegistry;
use crate::core::variant::{VariantSet, DEBUG};
use crate::framework::VersionProvider;
use crate::plan::{EffectiveBuildPlan, ResolvedIdentity};
use crate::resolver::errors::ConfigError;
use crate::resolver::flatten::flatten;

/// Options chosen by the invoking build command.
#[derive(Debug, Clone)]
pub struct ResolveOptions {
    /// Variant to produce a plan for
    pub variant: String,

    /// Reject debug signing of a non-debuggable variant instead of warning
    pub deny_debug_signing: bool,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        ResolveOptions {
            variant: DEBUG.to_string(),
            deny_debug_signing: false,
        }
    }
}

impl ResolveOptions {
    pub fn for_variant(variant: impl Into<String>) -> Self {
        ResolveOptions {
            variant: variant.into(),
            ..Default::default()
        }
    }
}

/// Resolves descriptors against a framework provider.
pub struct Resolver<'a> {
    provider: &'a dyn VersionProvider,
    options: ResolveOptions,
}

impl<'a> Resolver<'a> {
    pub fn new(provider: &'a dyn VersionProvider, options: ResolveOptions) -> Self {
        Resolver { provider, options }
    }

    /// Produce the effective plan, or the first validation failure.
    pub fn resolve(&self, descriptor: &Descriptor) -> Result<EffectiveBuildPlan, ConfigError> {
        // `evaluate` only fails with at least one error.
        self.evaluate(descriptor).map_err(|mut errors| errors.remove(0))
    }

    /// Report every validation failure instead of stopping at the first.
    pub fn check(&self, descriptor: &Descriptor) -> Vec<ConfigError> {
        self.evaluate(descriptor).err().unwrap_or_default()
    }

    fn evaluate(&self, descriptor: &Descriptor) -> Result<EffectiveBuildPlan, Vec<ConfigError>> {
        let android = &descriptor.android;
        let defaults = &android.default_config;
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        tracing::debug!(
            "resolving `{}` for build type `{}`",
            android.namespace,
            self.options.variant
        );

        // 1. External references
        let provider = self.provider;
        let min_sdk = collect(defaults.min_sdk.resolve("minSdk", provider), &mut errors);
        let target_sdk = collect(defaults.target_sdk.resolve("targetSdk", provider), &mut errors);
        let compile_sdk = collect(android.compile_sdk.resolve("compileSdk", provider), &mut errors);
        let version_code =
            collect(defaults.version_code.resolve("versionCode", provider), &mut errors);
        let version_name =
            collect(defaults.version_name.resolve("versionName", provider), &mut errors);
        let ndk_version = match android.ndk_version {
            Some(ref setting) => collect(setting.resolve("ndkVersion", provider), &mut errors),
            None => None,
        };

        // 2. SDK ordering, only when all three levels are known
        if let (Some(min), Some(target), Some(compile)) = (min_sdk, target_sdk, compile_sdk) {
            if min > target || target > compile {
                errors.push(ConfigError::InvalidSdkOrdering {
                    min,
                    target,
                    compile,
                });
            }
        }

        // 3. Desugaring library
        let has_desugar_library = descriptor
            .dependencies
            .iter()
            .any(|dep| dep.coordinate.is_desugar_library());
        if android.compile_options.is_core_library_desugaring_enabled && !has_desugar_library {
            errors.push(ConfigError::MissingDesugarLibrary);
        } else if !android.compile_options.is_core_library_desugaring_enabled
            && has_desugar_library
        {
            warnings.push(
                "a desugaring library is declared but isCoreLibraryDesugaringEnabled is false"
                    .to_string(),
            );
        }

        // 4. Signing config references
        let variants = VariantSet::from_declared(&android.build_types);
        let registry = SigningRegistry::from_declared(&android.signing_configs);
        for variant in variants.iter() {
            if let Some(ref name) = variant.signing_config {
                if !registry.contains(name) {
                    errors.push(ConfigError::UnknownSigningConfig {
                        variant: variant.name.clone(),
                        name: name.clone(),
                        available: registry.names().to_vec(),
                    });
                }
            }
        }

        // 5. Selected variant
        let selected = variants.get(&self.options.variant).cloned();
        if selected.is_none() {
            errors.push(ConfigError::UnknownVariant {
                name: self.options.variant.clone(),
                available: variants.names(),
            });
        }

        // 6. Resource shrinking needs code shrinking
        if let Some(ref variant) = selected {
            if variant.is_shrink_resources && !variant.is_minify_enabled {
                errors.push(ConfigError::ShrinkWithoutMinify {
                    variant: variant.name.clone(),
                });
            }
        }

        // 7. Release-like variants
        if let Some(ref variant) = selected {
            if !variant.is_debuggable && variant.uses_debug_signing() {
                if android.allow_debug_signing_for_release {
                    tracing::debug!(
                        "build type `{}` signs with the debug key (explicitly allowed)",
                        variant.name
                    );
                } else if self.options.deny_debug_signing {
                    errors.push(ConfigError::DebugSigningForRelease {
                        variant: variant.name.clone(),
                    });
                } else {
                    warnings.push(format!(
                        "build type `{}` is not debuggable but is signed with the debug key; \
                         set allowDebugSigningForRelease = true if this is intended",
                        variant.name
                    ));
                }
            }

            if !variant.is_debuggable && !variant.is_minify_enabled {
                warnings.push(format!(
                    "build type `{}` is not debuggable but code minification is disabled",
                    variant.name
                ));
            }
        }

        if !errors.is_empty() {
            tracing::debug!("resolution failed with {} error(s)", errors.len());
            return Err(errors);
        }

        let (
            Some(min_sdk),
            Some(target_sdk),
            Some(compile_sdk),
            Some(version_code),
            Some(version_name),
            Some(variant),
        ) = (
            min_sdk,
            target_sdk,
            compile_sdk,
            version_code,
            version_name,
            selected,
        )
        else {
            unreachable!("every unresolved value records an error");
        };

        for warning in &warnings {
            tracing::debug!("plan warning: {}", warning);
        }

        Ok(EffectiveBuildPlan {
            plugins: ordered_plugins(&descriptor.plugins),
            identity: ResolvedIdentity {
                namespace: android.namespace.clone(),
                application_id: defaults.application_id.clone(),
                min_sdk,
                target_sdk,
                compile_sdk,
                version_code,
                version_name,
                ndk_version,
            },
            compile_options: ResolvedCompileOptions::new(
                &android.compile_options,
                &android.kotlin_options,
            ),
            variant,
            dependencies: flatten(&descriptor.dependencies),
            flutter: descriptor.flutter.clone(),
            warnings,
        })
    }
}

/// Resolve a descriptor against `provider`.
pub fn resolve(
    descriptor: &Descriptor,
    provider: &dyn VersionProvider,
    options: ResolveOptions,
) -> Result<EffectiveBuildPlan, ConfigError> {
    Resolver::new(provider, options).resolve(descriptor)
}

fn collect<T>(result: Result<T, ConfigError>, errors: &mut Vec<ConfigError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            errors.push(err);
            None
        }
    }
}

/// Plugin ids in declaration order. A repeated id keeps its first position.
fn ordered_plugins(plugins: &[PluginReference]) -> Vec<String> {
    let mut ordered: Vec<String> = Vec::with_capacity(plugins.len());
    for plugin in plugins {
        if ordered.iter().any(|p| p == plugin.id()) {
            tracing::warn!("plugin `{}` is applied more than once", plugin);
            continue;
        }
        ordered.push(plugin.id().to_string());
    }
    ordered
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    use crate::core::compile::JavaVersion;
    use crate::core::dependency::Scope;
    use crate::core::variant::ResolvedVariant;
    use crate::framework::MapProvider;

    fn provider() -> MapProvider {
        MapProvider::new()
            .with("flutter.minSdkVersion", 21)
            .with("flutter.targetSdkVersion", 34)
            .with("flutter.compileSdkVersion", 34)
            .with("flutter.versionCode", 1)
            .with("flutter.versionName", "1.0.0")
    }

    fn descriptor(body: &str) -> Descriptor {
        let content = format!(
            r#"
plugins = ["com.android.application", "kotlin-android", "dev.flutter.flutter-gradle-plugin"]

[android]
namespace = "com.example.health_app"
compileSdk = {{ ref = "flutter.compileSdkVersion" }}

[android.defaultConfig]
applicationId = "com.example.health_app"
minSdk = {{ ref = "flutter.minSdkVersion" }}
targetSdk = {{ ref = "flutter.targetSdkVersion" }}
versionCode = {{ ref = "flutter.versionCode" }}
versionName = {{ ref = "flutter.versionName" }}
{body}
"#
        );
        Descriptor::parse(&content, Path::new("Quay.toml")).unwrap()
    }

    const HEALTH_APP: &str = r#"
[android.compileOptions]
sourceCompatibility = "VERSION_1_8"
targetCompatibility = "VERSION_1_8"
isCoreLibraryDesugaringEnabled = true

[[android.buildTypes]]
name = "release"
isMinifyEnabled = false
isShrinkResources = false
signingConfig = "debug"

[[dependencies]]
scope = "compileLibrary"
notation = "com.android.tools:desugar_jdk_libs:2.1.4"
"#;

    fn release() -> ResolveOptions {
        ResolveOptions::for_variant("release")
    }

    #[test]
    fn test_end_to_end_release() {
        let d = descriptor(HEALTH_APP);
        let plan = resolve(&d, &provider(), release()).unwrap();

        assert_eq!(plan.identity.min_sdk, 21);
        assert_eq!(plan.identity.target_sdk, 34);
        assert_eq!(plan.identity.compile_sdk, 34);
        assert!(plan.compile_options.is_core_library_desugaring_enabled);
        assert_eq!(plan.compile_options.source_compatibility, JavaVersion::Version1_8);
        assert_eq!(plan.variant.name, "release");
        assert!(!plan.variant.is_minify_enabled);
        assert!(!plan.variant.is_shrink_resources);
        assert_eq!(plan.variant.signing_config.as_deref(), Some("debug"));
        assert_eq!(plan.dependencies.len(), 1);
        assert_eq!(plan.dependencies[0].scope, Scope::CompileLibrary);
        assert_eq!(
            plan.dependencies[0].coordinate.to_string(),
            "com.android.tools:desugar_jdk_libs"
        );
        assert_eq!(plan.dependencies[0].version, "2.1.4");
        assert_eq!(plan.plugins.len(), 3);
    }

    #[test]
    fn test_debug_signed_release_is_surfaced_as_warning() {
        let d = descriptor(HEALTH_APP);
        let plan = resolve(&d, &provider(), release()).unwrap();

        assert!(plan.warnings.iter().any(|w| w.contains("debug key")));
        assert!(plan.warnings.iter().any(|w| w.contains("minification")));
    }

    #[test]
    fn test_missing_desugar_library() {
        let body = HEALTH_APP.split("[[dependencies]]").next().unwrap();
        let d = descriptor(body);

        let err = resolve(&d, &provider(), release()).unwrap_err();
        assert_eq!(err, ConfigError::MissingDesugarLibrary);
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let d = descriptor(HEALTH_APP);
        let p = provider();

        let first = resolve(&d, &p, release()).unwrap();
        let second = resolve(&d, &p, release()).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.to_json().unwrap(), second.to_json().unwrap());
        assert_eq!(first.fingerprint(), second.fingerprint());
    }

    #[test]
    fn test_min_above_target() {
        let d = descriptor("");
        let p = provider().with("flutter.minSdkVersion", 35);

        let err = resolve(&d, &p, ResolveOptions::default()).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidSdkOrdering {
                min: 35,
                target: 34,
                compile: 34
            }
        );
    }

    #[test]
    fn test_target_above_compile() {
        let d = descriptor("");
        let p = provider().with("flutter.targetSdkVersion", 35);

        let err = resolve(&d, &p, ResolveOptions::default()).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidSdkOrdering { .. }));
    }

    #[test]
    fn test_equal_levels_are_valid() {
        let d = descriptor("");
        let p = provider()
            .with("flutter.minSdkVersion", 34)
            .with("flutter.targetSdkVersion", 34);

        assert!(resolve(&d, &p, ResolveOptions::default()).is_ok());
    }

    #[test]
    fn test_unresolved_reference_comes_first() {
        // minSdk unresolved and desugaring broken: references are checked first.
        let body = HEALTH_APP.split("[[dependencies]]").next().unwrap();
        let d = descriptor(body);
        let p = MapProvider::new()
            .with("flutter.targetSdkVersion", 34)
            .with("flutter.compileSdkVersion", 34)
            .with("flutter.versionCode", 1)
            .with("flutter.versionName", "1.0.0");

        let err = resolve(&d, &p, release()).unwrap_err();
        match err {
            ConfigError::UnresolvedReference { field, .. } => assert_eq!(field, "minSdk"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_check_collects_every_error() {
        let body = r#"
[android.compileOptions]
isCoreLibraryDesugaringEnabled = true

[[android.buildTypes]]
name = "release"
signingConfig = "upload"
"#;
        let d = descriptor(body);
        let p = MapProvider::new()
            .with("flutter.targetSdkVersion", 34)
            .with("flutter.compileSdkVersion", 34)
            .with("flutter.versionCode", 1)
            .with("flutter.versionName", "1.0.0");

        let errors = Resolver::new(&p, release()).check(&d);
        assert_eq!(errors.len(), 3);
        assert!(matches!(errors[0], ConfigError::UnresolvedReference { .. }));
        assert_eq!(errors[1], ConfigError::MissingDesugarLibrary);
        assert!(matches!(
            errors[2],
            ConfigError::UnknownSigningConfig { ref name, .. } if name == "upload"
        ));
    }

    #[test]
    fn test_check_on_valid_descriptor_is_empty() {
        let d = descriptor(HEALTH_APP);
        assert!(Resolver::new(&provider(), release()).check(&d).is_empty());
    }

    #[test]
    fn test_declared_signing_config_is_accepted() {
        let body = r#"
[[android.signingConfigs]]
name = "upload"
storeFile = "upload.jks"

[[android.buildTypes]]
name = "release"
isMinifyEnabled = true
signingConfig = "upload"
"#;
        let d = descriptor(body);
        let plan = resolve(&d, &provider(), release()).unwrap();

        assert_eq!(plan.variant.signing_config.as_deref(), Some("upload"));
        assert!(plan.warnings.is_empty());
    }

    #[test]
    fn test_shallow_override_keeps_default_shrink() {
        let body = r#"
[[android.buildTypes]]
name = "release"
isMinifyEnabled = false
"#;
        let d = descriptor(body);
        let plan = resolve(&d, &provider(), release()).unwrap();

        assert!(!plan.variant.is_minify_enabled);
        assert_eq!(
            plan.variant.is_shrink_resources,
            ResolvedVariant::defaults_for("release").is_shrink_resources
        );
        assert_eq!(plan.variant.signing_config, None);
    }

    #[test]
    fn test_unknown_variant() {
        let d = descriptor("");
        let err = resolve(&d, &provider(), ResolveOptions::for_variant("staging")).unwrap_err();

        match err {
            ConfigError::UnknownVariant { name, available } => {
                assert_eq!(name, "staging");
                assert_eq!(available, vec!["debug", "release"]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_shrink_without_minify() {
        let body = r#"
[[android.buildTypes]]
name = "release"
isShrinkResources = true
"#;
        let d = descriptor(body);
        let err = resolve(&d, &provider(), release()).unwrap_err();
        assert_eq!(
            err,
            ConfigError::ShrinkWithoutMinify {
                variant: "release".to_string()
            }
        );
    }

    #[test]
    fn test_shrink_on_other_variant_does_not_block() {
        let body = r#"
[[android.buildTypes]]
name = "release"
isShrinkResources = true
"#;
        let d = descriptor(body);
        let plan = resolve(&d, &provider(), ResolveOptions::default()).unwrap();
        assert_eq!(plan.variant.name, "debug");
        assert!(Resolver::new(&provider(), ResolveOptions::default())
            .check(&d)
            .is_empty());
    }

    #[test]
    fn test_deny_debug_signing() {
        let d = descriptor(HEALTH_APP);
        let options = ResolveOptions {
            variant: "release".to_string(),
            deny_debug_signing: true,
        };

        let err = resolve(&d, &provider(), options).unwrap_err();
        assert!(matches!(err, ConfigError::DebugSigningForRelease { .. }));
    }

    #[test]
    fn test_explicit_opt_in_allows_debug_signing() {
        let mut d = descriptor(HEALTH_APP);
        d.android.allow_debug_signing_for_release = true;

        let options = ResolveOptions {
            variant: "release".to_string(),
            deny_debug_signing: true,
        };
        let plan = resolve(&d, &provider(), options).unwrap();
        assert!(!plan.warnings.iter().any(|w| w.contains("debug key")));
    }

    #[test]
    fn test_debug_variant_has_no_release_warnings() {
        let d = descriptor(HEALTH_APP);
        let plan = resolve(&d, &provider(), ResolveOptions::default()).unwrap();

        assert!(plan.variant.is_debuggable);
        assert!(plan.warnings.is_empty());
    }

    #[test]
    fn test_duplicate_plugins_keep_first_position() {
        let plugins = vec![
            PluginReference::new("a"),
            PluginReference::new("b"),
            PluginReference::new("a"),
        ];
        assert_eq!(ordered_plugins(&plugins), vec!["a", "b"]);
    }

    #[test]
    fn test_literal_values_need_no_provider() {
        let content = r#"
[android]
namespace = "com.example"
compileSdk = 34
ndkVersion = "27.0.12077973"

[android.defaultConfig]
applicationId = "com.example"
minSdk = 24
targetSdk = 34
versionCode = 5
versionName = "2.0"
"#;
        let d = Descriptor::parse(content, Path::new("Quay.toml")).unwrap();
        let plan = resolve(&d, &MapProvider::new(), ResolveOptions::default()).unwrap();

        assert_eq!(plan.identity.min_sdk, 24);
        assert_eq!(plan.identity.version_code, 5);
        assert_eq!(plan.identity.ndk_version.as_deref(), Some("27.0.12077973"));
        assert!(plan.plugins.is_empty());
    }
}
