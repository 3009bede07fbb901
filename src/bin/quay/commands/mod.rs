//! Command implementations

pub mod check;
pub mod completions;
pub mod deps;
pub mod init;
pub mod resolve;

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::cli::DescriptorArgs;
use quay::ops::ResolveRequest;
use quay::util::diagnostic::suggestions;
use quay::GlobalContext;

/// Locate the descriptor: an explicit path wins, otherwise search upward.
pub fn locate_descriptor(ctx: &GlobalContext, manifest_path: Option<&Path>) -> Result<PathBuf> {
    match manifest_path {
        Some(path) => Ok(ctx.cwd().join(path)),
        None => ctx
            .find_descriptor()
            .map_err(|e| anyhow::anyhow!("{}\n{}", e, suggestions::NO_DESCRIPTOR)),
    }
}

/// Build the ops-level request from command-line arguments.
pub fn resolve_request(ctx: &GlobalContext, args: &DescriptorArgs) -> Result<ResolveRequest> {
    Ok(ResolveRequest {
        descriptor_path: locate_descriptor(ctx, args.manifest_path.as_deref())?,
        variant: args.variant.clone(),
        deny_debug_signing: args.deny_debug_signing,
    })
}
