//! `continuity init` command
//!
//! Writes a fresh knowledge base for a project.
//!
//! # Usage
//! ```bash
//! continuity init /path/to/project
//! continuity init /path/to/project -o kb.yaml --versioning filename
//! ```

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Args;

use crate::config::Config;
use crate::core::knowledge::{init_knowledge_base, VersioningPreference};
use crate::core::storage::save_knowledge_base;

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Project root path
    pub project_path: String,

    /// Output filename (default: from config, conversation-knowledge.yaml)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Versioning preference (default: from config)
    #[arg(long, value_enum)]
    pub versioning: Option<VersioningPreference>,
}

pub fn run(args: InitArgs, config: &Config) -> Result<()> {
    let output = args.output.unwrap_or_else(|| config.store.file_name.clone());
    let versioning = args.versioning.unwrap_or(config.store.versioning);

    let kb = init_knowledge_base(args.project_path, versioning);

    if !save_knowledge_base(&kb, &output) {
        bail!("Failed to create knowledge base");
    }

    println!("Knowledge base initialized: {}", output.display());
    Ok(())
}
