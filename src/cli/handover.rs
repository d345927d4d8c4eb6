//! `continuity handover` command
//!
//! Prints (or writes) the frontmatter block for a handover document.
//!
//! # Usage
//! ```bash
//! continuity handover 45 20 --project demo
//! continuity handover 45 20 --project demo -o HANDOVER.md --knowledge-base kb.yaml
//! ```

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;

use crate::config::Config;
use crate::core::handover::create_handover_frontmatter;
use crate::core::storage::{load_knowledge_base, save_knowledge_base};

#[derive(Args, Debug)]
pub struct HandoverArgs {
    /// Message count
    pub messages: u64,

    /// Tool call count
    pub tool_calls: u64,

    /// Project name
    #[arg(short, long)]
    pub project: String,

    /// Author name (overrides config)
    #[arg(long)]
    pub author: Option<String>,

    /// Author email (overrides config)
    #[arg(long)]
    pub email: Option<String>,

    /// Write the document here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Count the handover in this knowledge base
    #[arg(short = 'k', long)]
    pub knowledge_base: Option<PathBuf>,
}

pub fn run(args: HandoverArgs, config: &Config) -> Result<()> {
    let mut author = config.author();
    if let Some(name) = args.author {
        author.name = name;
    }
    if let Some(email) = args.email {
        author.email = email;
    }

    let frontmatter =
        create_handover_frontmatter(args.messages, args.tool_calls, args.project, &author);
    let document = frontmatter
        .to_markdown()
        .context("Failed to encode handover frontmatter")?;

    // The knowledge base must load before the document is written
    let knowledge_base = match &args.knowledge_base {
        Some(path) => match load_knowledge_base(path) {
            Some(kb) => Some((path, kb)),
            None => bail!("Could not load knowledge base: {}", path.display()),
        },
        None => None,
    };

    match &args.output {
        Some(path) => {
            fs::write(path, &document)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("Handover written: {}", path.display());
        }
        None => print!("{}", document),
    }

    if let Some((path, mut kb)) = knowledge_base {
        kb.record_handover(frontmatter.handover_date);
        if !save_knowledge_base(&kb, path) {
            bail!("Failed to save knowledge base: {}", path.display());
        }
        tracing::info!(
            total_handovers = kb.statistics.total_handovers,
            "Recorded handover in {}",
            path.display()
        );
    }

    Ok(())
}
