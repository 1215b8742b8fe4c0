//! CLI argument parsing for stackgen.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Stackgen: static generator for AI agent stack templates and demos.
///
/// From a specification table of agent descriptors, stackgen emits a
/// code stub, an interactive demo page, and a metadata record per
/// descriptor, plus utilities for repairing previously generated pages
/// and rebuilding the top-level catalog manifest from disk.
#[derive(Parser, Debug)]
#[command(name = "stackgen")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for stackgen.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate all stack artifacts from the specification table.
    ///
    /// Every run is a full, deterministic rebuild: each artifact
    /// unconditionally overwrites whatever existed at its path.
    Generate(GenerateArgs),

    /// Overwrite demo pages with the conversational template.
    ///
    /// Replaces each stack's demo page with the scripted-conversation
    /// variant, leaving code stubs and metadata untouched.
    UpdateDemos(UpdateDemosArgs),

    /// Repair template-escaping corruption in generated demo pages.
    ///
    /// Scans demo pages for known corrupted quoting patterns and
    /// rewrites them to canonical form. Safe to run repeatedly; a clean
    /// tree is a no-op.
    Repair(RepairArgs),

    /// Rebuild the catalog manifest from the output tree.
    ///
    /// Walks the agents/ and agent_stacks/ subtrees on disk and writes
    /// manifest.json plus agents/index.json.
    Manifest(ManifestArgs),
}

/// Arguments for the `generate` command.
#[derive(Parser, Debug)]
pub struct GenerateArgs {
    /// Output root directory.
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// Specification table to use instead of the built-in one.
    #[arg(long)]
    pub spec: Option<PathBuf>,

    /// Emit the conversational demo variant instead of the form variant.
    #[arg(long)]
    pub chat: bool,
}

/// Arguments for the `update-demos` command.
#[derive(Parser, Debug)]
pub struct UpdateDemosArgs {
    /// Output root directory.
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// Specification table to use instead of the built-in one.
    #[arg(long)]
    pub spec: Option<PathBuf>,
}

/// Arguments for the `repair` command.
#[derive(Parser, Debug)]
pub struct RepairArgs {
    /// Root of the tree to scan for demo pages.
    #[arg(long, default_value = ".")]
    pub root: PathBuf,
}

/// Arguments for the `manifest` command.
#[derive(Parser, Debug)]
pub struct ManifestArgs {
    /// Root of the output tree to index.
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// Repository (owner/name) used to build raw download URLs.
    #[arg(long, default_value = "kody-w/AI-Agent-Templates")]
    pub repository: String,

    /// Branch used to build raw download URLs.
    #[arg(long, default_value = "main")]
    pub branch: String,
}

impl Cli {
    /// Parse command line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
