//! `continuity validate` command

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Args;
use colored::Colorize;

use crate::core::storage::load_document;
use crate::core::validate::validate_knowledge_base;

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Path to knowledge base file
    pub filepath: PathBuf,
}

pub fn run(args: ValidateArgs) -> Result<()> {
    let Some(document) = load_document(&args.filepath) else {
        bail!("Could not load knowledge base: {}", args.filepath.display());
    };

    let errors = validate_knowledge_base(&document);
    if !errors.is_empty() {
        println!("Validation errors:");
        for error in &errors {
            println!("  - {}", error);
        }
        bail!("{} validation error(s) in {}", errors.len(), args.filepath.display());
    }

    println!("{}", "Knowledge base is valid".green());
    Ok(())
}
