//! The effective build plan.
//!
//! A plan is the fully resolved, validated output of resolution. It is
//! handed to the external builder as JSON and never modified afterwards.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::compile::ResolvedCompileOptions;
use crate::core::dependency::DependencyDeclaration;
use crate::core::descriptor::FrameworkBlock;
use crate::core::variant::ResolvedVariant;
use crate::util::hash::Fingerprint;

/// Identity settings with every reference replaced by its value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedIdentity {
    pub namespace: String,
    pub application_id: String,
    pub min_sdk: u32,
    pub target_sdk: u32,
    pub compile_sdk: u32,
    pub version_code: u32,
    pub version_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ndk_version: Option<String>,
}

/// The single resolved plan for one build invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EffectiveBuildPlan {
    /// Plugins in application order
    pub plugins: Vec<String>,

    pub identity: ResolvedIdentity,

    pub compile_options: ResolvedCompileOptions,

    /// The variant selected by the invoking build command
    pub variant: ResolvedVariant,

    /// Flattened dependencies, one entry per (scope, coordinate)
    pub dependencies: Vec<DependencyDeclaration>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flutter: Option<FrameworkBlock>,

    /// Legal but suspicious settings worth surfacing
    #[serde(default)]
    pub warnings: Vec<String>,
}

impl EffectiveBuildPlan {
    /// Application ID with the variant suffix applied.
    pub fn effective_application_id(&self) -> String {
        match self.variant.application_id_suffix {
            Some(ref suffix) => format!("{}{}", self.identity.application_id, suffix),
            None => self.identity.application_id.clone(),
        }
    }

    /// Version name with the variant suffix applied.
    pub fn effective_version_name(&self) -> String {
        match self.variant.version_name_suffix {
            Some(ref suffix) => format!("{}{}", self.identity.version_name, suffix),
            None => self.identity.version_name.clone(),
        }
    }

    /// Content fingerprint. Equal plans always have equal fingerprints.
    pub fn fingerprint(&self) -> String {
        let mut fp = Fingerprint::new();

        fp.update_strs(self.plugins.iter().map(String::as_str));

        let id = &self.identity;
        fp.update_str(&id.namespace)
            .update_str(&id.application_id)
            .update_u32(id.min_sdk)
            .update_u32(id.target_sdk)
            .update_u32(id.compile_sdk)
            .update_u32(id.version_code)
            .update_str(&id.version_name)
            .update_opt(id.ndk_version.as_deref());

        let opts = &self.compile_options;
        fp.update_str(opts.source_compatibility.as_str())
            .update_str(opts.target_compatibility.as_str())
            .update_bool(opts.is_core_library_desugaring_enabled)
            .update_str(&opts.jvm_target);

        let v = &self.variant;
        fp.update_str(&v.name)
            .update_bool(v.is_minify_enabled)
            .update_bool(v.is_shrink_resources)
            .update_bool(v.is_debuggable)
            .update_opt(v.signing_config.as_deref())
            .update_opt(v.application_id_suffix.as_deref())
            .update_opt(v.version_name_suffix.as_deref())
            .update_strs(v.proguard_files.iter().map(String::as_str));

        for dep in &self.dependencies {
            fp.update_str(dep.scope.as_str()).update_str(&dep.notation());
        }

        fp.update_opt(self.flutter.as_ref().map(|f| f.source.as_str()));

        fp.finish_short()
    }

    /// Serialize for the external builder.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("failed to serialize build plan")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::compile::JavaVersion;
    use crate::core::dependency::Scope;

    fn sample_plan() -> EffectiveBuildPlan {
        EffectiveBuildPlan {
            plugins: vec!["com.android.application".to_string()],
            identity: ResolvedIdentity {
                namespace: "com.example.app".to_string(),
                application_id: "com.example.app".to_string(),
                min_sdk: 21,
                target_sdk: 34,
                compile_sdk: 34,
                version_code: 3,
                version_name: "1.2.0".to_string(),
                ndk_version: None,
            },
            compile_options: ResolvedCompileOptions {
                source_compatibility: JavaVersion::Version1_8,
                target_compatibility: JavaVersion::Version1_8,
                is_core_library_desugaring_enabled: false,
                jvm_target: "1.8".to_string(),
            },
            variant: ResolvedVariant::defaults_for("debug"),
            dependencies: vec![DependencyDeclaration::from_notation(
                Scope::CompileLibrary,
                "androidx.core:core-ktx:1.15.0",
            )
            .unwrap()],
            flutter: None,
            warnings: Vec::new(),
        }
    }

    #[test]
    fn test_json_uses_builder_field_names() {
        let json: serde_json::Value =
            serde_json::from_str(&sample_plan().to_json().unwrap()).unwrap();

        assert_eq!(json["identity"]["applicationId"], "com.example.app");
        assert_eq!(json["identity"]["minSdk"], 21);
        assert_eq!(json["compileOptions"]["sourceCompatibility"], "VERSION_1_8");
        assert_eq!(json["variant"]["isMinifyEnabled"], false);
        assert_eq!(json["variant"]["signingConfig"], "debug");
        assert_eq!(json["dependencies"][0]["coordinate"], "androidx.core:core-ktx");
        assert!(json["identity"].get("ndkVersion").is_none());
    }

    #[test]
    fn test_json_round_trips() {
        let plan = sample_plan();
        let back: EffectiveBuildPlan = serde_json::from_str(&plan.to_json().unwrap()).unwrap();
        assert_eq!(back, plan);
    }

    #[test]
    fn test_fingerprint_tracks_content() {
        let plan = sample_plan();
        assert_eq!(plan.fingerprint(), sample_plan().fingerprint());

        let mut changed = sample_plan();
        changed.dependencies[0].version = "1.16.0".to_string();
        assert_ne!(plan.fingerprint(), changed.fingerprint());
    }

    #[test]
    fn test_suffixes() {
        let mut plan = sample_plan();
        plan.variant.application_id_suffix = Some(".debug".to_string());
        plan.variant.version_name_suffix = Some("-dev".to_string());

        assert_eq!(plan.effective_application_id(), "com.example.app.debug");
        assert_eq!(plan.effective_version_name(), "1.2.0-dev");
    }
}
