//! `quay init` command

use std::path::PathBuf;

use anyhow::Result;

use crate::cli::InitArgs;
use quay::ops::init_descriptor;
use quay::GlobalContext;

pub fn execute(args: InitArgs, ctx: &GlobalContext) -> Result<()> {
    let dir = match args.path {
        Some(path) => ctx.cwd().join(path),
        None => PathBuf::from(ctx.cwd()),
    };

    let path = init_descriptor(&dir, &args.namespace)?;
    eprintln!("     Created {} for `{}`", path.display(), args.namespace);

    Ok(())
}
