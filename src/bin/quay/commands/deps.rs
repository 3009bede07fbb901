//! `quay deps` command

use anyhow::Result;

use super::locate_descriptor;
use crate::cli::DepsArgs;
use quay::core::dependency::DependencyDeclaration;
use quay::resolver::flatten;
use quay::{Descriptor, GlobalContext};

pub fn execute(args: DepsArgs, ctx: &GlobalContext) -> Result<()> {
    let path = locate_descriptor(ctx, args.manifest_path.as_deref())?;
    let descriptor = Descriptor::load(&path)?;

    let deps: Vec<DependencyDeclaration> = flatten(&descriptor.dependencies)
        .into_iter()
        .filter(|d| args.scope.map_or(true, |scope| d.scope == scope))
        .collect();

    if deps.is_empty() {
        eprintln!("No dependencies");
        return Ok(());
    }

    let width = deps.iter().map(|d| d.scope.as_str().len()).max().unwrap_or(0);
    for dep in &deps {
        println!("{:<width$}  {}", dep.scope.as_str(), dep.notation(), width = width);
    }

    Ok(())
}
