//! Global context for Quay operations.
//!
//! Provides centralized access to configuration paths and the working
//! directory the descriptor is searched from.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::core::descriptor::{descriptor_in, DescriptorNotFound};
use crate::util::config::global_config_dir;

/// Global context containing configuration and paths.
#[derive(Debug, Clone)]
pub struct GlobalContext {
    /// Current working directory
    cwd: PathBuf,

    /// Home directory for global Quay data (~/.quay/)
    home: PathBuf,

    /// Whether to use colors in output
    color: bool,
}

impl GlobalContext {
    /// Create a new GlobalContext with defaults.
    pub fn new() -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to get current directory")?;
        let home = global_config_dir().unwrap_or_else(|| PathBuf::from(".quay"));

        Ok(GlobalContext {
            cwd,
            home,
            color: true,
        })
    }

    /// Create a GlobalContext with a specific working directory.
    pub fn with_cwd(cwd: PathBuf) -> Result<Self> {
        let mut ctx = Self::new()?;
        ctx.cwd = cwd;
        Ok(ctx)
    }

    /// Use a specific home directory instead of `~/.quay`.
    pub fn with_home(mut self, home: PathBuf) -> Self {
        self.home = home;
        self
    }

    /// Set color output.
    pub fn set_color(&mut self, color: bool) {
        self.color = color;
    }

    /// Get the current working directory.
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Get the global configuration file path.
    pub fn config_path(&self) -> PathBuf {
        self.home.join("config.toml")
    }

    /// Check if color output is enabled.
    pub fn color(&self) -> bool {
        self.color
    }

    /// Find the descriptor file starting from cwd and searching upward.
    pub fn find_descriptor(&self) -> Result<PathBuf, DescriptorNotFound> {
        let mut current = self.cwd.clone();
        loop {
            if let Some(path) = descriptor_in(&current) {
                return Ok(path);
            }
            if !current.pop() {
                return Err(DescriptorNotFound {
                    dir: self.cwd.clone(),
                });
            }
        }
    }
}
