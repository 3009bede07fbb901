//! `quay resolve` command

use anyhow::Result;

use super::resolve_request;
use crate::cli::ResolveArgs;
use quay::ops::Session;
use quay::util::diagnostic::{self, Diagnostic};
use quay::{EffectiveBuildPlan, GlobalContext};

pub fn execute(args: ResolveArgs, ctx: &GlobalContext) -> Result<()> {
    let request = resolve_request(ctx, &args.descriptor)?;
    let session = Session::load(ctx, &request)?;

    let plan = session.resolve()?;

    for warning in &plan.warnings {
        let diag = Diagnostic::warning(warning).with_location(&request.descriptor_path);
        diagnostic::emit(&diag, ctx.color());
    }

    if args.json {
        println!("{}", plan.to_json()?);
    } else {
        print_plan(&plan);
    }

    Ok(())
}

fn print_plan(plan: &EffectiveBuildPlan) {
    let id = &plan.identity;
    let opts = &plan.compile_options;
    let variant = &plan.variant;

    println!("Build plan for `{}` ({})", id.namespace, variant.name);
    println!();

    if !plan.plugins.is_empty() {
        println!("Plugins:");
        for plugin in &plan.plugins {
            println!("  {}", plugin);
        }
        println!();
    }

    println!("Identity:");
    println!("  applicationId: {}", plan.effective_application_id());
    println!(
        "  version:       {} ({})",
        plan.effective_version_name(),
        id.version_code
    );
    println!(
        "  sdk:           min {}, target {}, compile {}",
        id.min_sdk, id.target_sdk, id.compile_sdk
    );
    if let Some(ref ndk) = id.ndk_version {
        println!("  ndk:           {}", ndk);
    }
    println!();

    println!("Compile options:");
    println!(
        "  java:          {} -> {}",
        opts.source_compatibility, opts.target_compatibility
    );
    println!("  jvmTarget:     {}", opts.jvm_target);
    println!(
        "  desugaring:    {}",
        if opts.is_core_library_desugaring_enabled {
            "enabled"
        } else {
            "disabled"
        }
    );
    println!();

    println!("Variant `{}`:", variant.name);
    println!("  minify:        {}", variant.is_minify_enabled);
    println!("  shrink:        {}", variant.is_shrink_resources);
    println!("  debuggable:    {}", variant.is_debuggable);
    println!(
        "  signing:       {}",
        variant.signing_config.as_deref().unwrap_or("(unsigned)")
    );
    for file in &variant.proguard_files {
        println!("  proguard:      {}", file);
    }
    println!();

    if !plan.dependencies.is_empty() {
        println!("Dependencies:");
        for dep in &plan.dependencies {
            println!("  {} {}", dep.scope, dep.notation());
        }
        println!();
    }

    println!("Fingerprint: {}", plan.fingerprint());
}
