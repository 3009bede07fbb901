//! Implementation of `quay resolve`, `quay check` and `quay deps`.
//!
//! Loads everything resolution needs from disk (descriptor, configuration,
//! framework values) and hands it to the pure resolver.

use std::path::PathBuf;

use anyhow::Result;

use crate::core::variant::DEBUG;
use crate::core::Descriptor;
use crate::framework::FlutterProvider;
use crate::plan::EffectiveBuildPlan;
use crate::resolver::{ConfigError, ResolveOptions, Resolver};
use crate::util::config::{load_config, project_config_path};
use crate::util::GlobalContext;

/// What the invoking command asked for.
#[derive(Debug, Clone, Default)]
pub struct ResolveRequest {
    /// Descriptor to load
    pub descriptor_path: PathBuf,

    /// Variant to resolve (falls back to config, then `debug`)
    pub variant: Option<String>,

    /// Treat debug signing of a release variant as an error
    pub deny_debug_signing: bool,
}

/// A loaded descriptor with its provider and options, ready to resolve.
#[derive(Debug)]
pub struct Session {
    pub descriptor: Descriptor,
    pub provider: FlutterProvider,
    pub options: ResolveOptions,
}

impl Session {
    /// Load the descriptor, configuration and framework values.
    pub fn load(ctx: &GlobalContext, request: &ResolveRequest) -> Result<Self> {
        let descriptor = Descriptor::load(&request.descriptor_path)?;

        let config = load_config(
            &ctx.config_path(),
            &project_config_path(&descriptor.descriptor_dir),
        )?;

        let provider = FlutterProvider::load(&descriptor.descriptor_dir, &config.framework)?;

        // CLI > config > built-in default
        let variant = request
            .variant
            .clone()
            .or(config.resolve.default_variant)
            .unwrap_or_else(|| DEBUG.to_string());

        let options = ResolveOptions {
            variant,
            deny_debug_signing: request.deny_debug_signing
                || config.resolve.deny_debug_signing.unwrap_or(false),
        };

        Ok(Session {
            descriptor,
            provider,
            options,
        })
    }

    fn resolver(&self) -> Resolver<'_> {
        Resolver::new(&self.provider, self.options.clone())
    }

    /// Resolve to a plan or the first configuration error.
    pub fn resolve(&self) -> Result<EffectiveBuildPlan, ConfigError> {
        self.resolver().resolve(&self.descriptor)
    }

    /// Every configuration error in the descriptor.
    pub fn check(&self) -> Vec<ConfigError> {
        self.resolver().check(&self.descriptor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::descriptor::DESCRIPTOR_NAME;
    use crate::framework::flutter::LOCAL_PROPERTIES;
    use tempfile::TempDir;

    const DESCRIPTOR: &str = r#"
[android]
namespace = "com.example.app"
compileSdk = { ref = "flutter.compileSdkVersion" }

[android.defaultConfig]
applicationId = "com.example.app"
minSdk = { ref = "flutter.minSdkVersion" }
targetSdk = { ref = "flutter.targetSdkVersion" }
versionCode = { ref = "flutter.versionCode" }
versionName = { ref = "flutter.versionName" }

[[android.buildTypes]]
name = "release"
signingConfig = "debug"
"#;

    fn setup() -> (TempDir, GlobalContext, ResolveRequest) {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join(DESCRIPTOR_NAME), DESCRIPTOR).unwrap();

        let ctx = GlobalContext::with_cwd(tmp.path().to_path_buf())
            .unwrap()
            .with_home(tmp.path().join("home"));
        let request = ResolveRequest {
            descriptor_path: tmp.path().join(DESCRIPTOR_NAME),
            ..Default::default()
        };
        (tmp, ctx, request)
    }

    #[test]
    fn test_defaults_to_debug_variant() {
        let (_tmp, ctx, request) = setup();
        let session = Session::load(&ctx, &request).unwrap();

        let plan = session.resolve().unwrap();
        assert_eq!(plan.variant.name, "debug");
        assert_eq!(plan.identity.version_name, "1.0");
    }

    #[test]
    fn test_local_properties_feed_references() {
        let (tmp, ctx, request) = setup();
        std::fs::write(
            tmp.path().join(LOCAL_PROPERTIES),
            "flutter.versionName=3.1.4\nflutter.versionCode=31\n",
        )
        .unwrap();

        let plan = Session::load(&ctx, &request).unwrap().resolve().unwrap();
        assert_eq!(plan.identity.version_name, "3.1.4");
        assert_eq!(plan.identity.version_code, 31);
    }

    #[test]
    fn test_project_config_sets_variant_and_strictness() {
        let (tmp, ctx, request) = setup();
        std::fs::create_dir_all(tmp.path().join(".quay")).unwrap();
        std::fs::write(
            tmp.path().join(".quay").join("config.toml"),
            "[resolve]\ndefault_variant = \"release\"\ndeny_debug_signing = true\n",
        )
        .unwrap();

        let session = Session::load(&ctx, &request).unwrap();
        assert_eq!(session.options.variant, "release");

        let err = session.resolve().unwrap_err();
        assert!(matches!(err, ConfigError::DebugSigningForRelease { .. }));
    }

    #[test]
    fn test_request_variant_beats_config() {
        let (tmp, ctx, mut request) = setup();
        std::fs::create_dir_all(tmp.path().join(".quay")).unwrap();
        std::fs::write(
            tmp.path().join(".quay").join("config.toml"),
            "[resolve]\ndefault_variant = \"release\"\n",
        )
        .unwrap();
        request.variant = Some("debug".to_string());

        let session = Session::load(&ctx, &request).unwrap();
        assert_eq!(session.options.variant, "debug");
        assert!(session.check().is_empty());
    }

    #[test]
    fn test_malformed_project_config_fails_load() {
        let (tmp, ctx, mut request) = setup();
        std::fs::create_dir_all(tmp.path().join(".quay")).unwrap();
        std::fs::write(
            tmp.path().join(".quay").join("config.toml"),
            "[resolve]\ndeny_debug_signing = true\ndefault_variant = \n",
        )
        .unwrap();
        request.variant = Some("release".to_string());

        let err = Session::load(&ctx, &request).unwrap_err();
        assert!(err.to_string().contains("failed to parse config file"));
    }

    #[test]
    fn test_missing_descriptor() {
        let tmp = TempDir::new().unwrap();
        let ctx = GlobalContext::with_cwd(tmp.path().to_path_buf()).unwrap();
        let request = ResolveRequest {
            descriptor_path: tmp.path().join(DESCRIPTOR_NAME),
            ..Default::default()
        };

        let err = Session::load(&ctx, &request).unwrap_err();
        assert!(err.to_string().contains("failed to read descriptor"));
    }
}
