//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use quay::core::dependency::Scope;

/// Quay - build descriptor resolution for Flutter Android apps
#[derive(Parser)]
#[command(name = "quay")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a starter Quay.toml
    Init(InitArgs),

    /// Resolve the descriptor and print the effective build plan
    Resolve(ResolveArgs),

    /// Report every configuration error in the descriptor
    Check(CheckArgs),

    /// Print the flattened dependency list
    Deps(DepsArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args)]
pub struct InitArgs {
    /// Directory to initialize (defaults to current directory)
    pub path: Option<PathBuf>,

    /// Android namespace, also used as the application ID
    #[arg(long, default_value = "com.example.app")]
    pub namespace: String,
}

/// Arguments shared by every command that reads a descriptor.
#[derive(Args, Debug, Clone, Default)]
pub struct DescriptorArgs {
    /// Path to Quay.toml (searched upward from the current directory by default)
    #[arg(long, value_name = "PATH")]
    pub manifest_path: Option<PathBuf>,

    /// Build variant to resolve
    #[arg(long)]
    pub variant: Option<String>,

    /// Fail when a non-debuggable variant is signed with the debug key
    #[arg(long)]
    pub deny_debug_signing: bool,
}

#[derive(Args)]
pub struct ResolveArgs {
    #[command(flatten)]
    pub descriptor: DescriptorArgs,

    /// Emit the plan as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct CheckArgs {
    #[command(flatten)]
    pub descriptor: DescriptorArgs,
}

#[derive(Args)]
pub struct DepsArgs {
    /// Path to Quay.toml (searched upward from the current directory by default)
    #[arg(long, value_name = "PATH")]
    pub manifest_path: Option<PathBuf>,

    /// Only show dependencies in this scope
    #[arg(long)]
    pub scope: Option<Scope>,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
