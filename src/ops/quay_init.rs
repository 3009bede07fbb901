//! Implementation of `quay init`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use crate::core::descriptor::{generate_default_descriptor, DESCRIPTOR_NAME};

/// Write a starter descriptor into `dir`, creating the directory if needed.
///
/// Returns the path of the new descriptor.
pub fn init_descriptor(dir: &Path, namespace: &str) -> Result<PathBuf> {
    validate_namespace(namespace)?;

    if !dir.exists() {
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create directory: {}", dir.display()))?;
    }

    let path = dir.join(DESCRIPTOR_NAME);
    if path.exists() {
        bail!("`{}` already exists in `{}`", DESCRIPTOR_NAME, dir.display());
    }

    fs::write(&path, generate_default_descriptor(namespace))
        .with_context(|| format!("failed to write {}", path.display()))?;

    Ok(path)
}

/// Check that `namespace` is a dotted Java package name.
pub fn validate_namespace(namespace: &str) -> Result<()> {
    let valid = !namespace.is_empty()
        && namespace.contains('.')
        && namespace.split('.').all(|segment| {
            let mut chars = segment.chars();
            matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        });

    if !valid {
        bail!(
            "invalid namespace `{}`; expected a dotted package name like `com.example.app`",
            namespace
        );
    }
    Ok(())
}
