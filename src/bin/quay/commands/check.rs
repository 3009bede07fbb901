//! `quay check` command

use anyhow::{bail, Result};

use super::resolve_request;
use crate::cli::CheckArgs;
use quay::ops::Session;
use quay::util::diagnostic;
use quay::GlobalContext;

pub fn execute(args: CheckArgs, ctx: &GlobalContext) -> Result<()> {
    let request = resolve_request(ctx, &args.descriptor)?;
    let session = Session::load(ctx, &request)?;

    let errors = session.check();
    if errors.is_empty() {
        eprintln!(
            "     Checked {} ({}): no problems found",
            request.descriptor_path.display(),
            session.options.variant
        );
        return Ok(());
    }

    for err in &errors {
        let diag = err.to_diagnostic().with_location(&request.descriptor_path);
        diagnostic::emit(&diag, ctx.color());
    }

    bail!("found {} configuration error(s)", errors.len())
}

#[cfg(test)]
mod tests {
    use crate::cli::CheckArgs;
    use clap::Parser;
    use std::path::PathBuf;

    fn parse_check_args(args: &[&str]) -> CheckArgs {
        #[derive(Parser)]
        struct TestCli {
            #[command(flatten)]
            check: CheckArgs,
        }
        TestCli::parse_from(args).check
    }

    #[test]
    fn test_check_args_defaults() {
        let args = parse_check_args(&["test"]);
        assert!(args.descriptor.manifest_path.is_none());
        assert!(args.descriptor.variant.is_none());
        assert!(!args.descriptor.deny_debug_signing);
    }

    #[test]
    fn test_check_args_all_options() {
        let args = parse_check_args(&[
            "test",
            "--manifest-path",
            "android/app/Quay.toml",
            "--variant",
            "release",
            "--deny-debug-signing",
        ]);
        assert_eq!(
            args.descriptor.manifest_path,
            Some(PathBuf::from("android/app/Quay.toml"))
        );
        assert_eq!(args.descriptor.variant.as_deref(), Some("release"));
        assert!(args.descriptor.deny_debug_signing);
    }
}
