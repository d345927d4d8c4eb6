//! CLI module - Command definitions and handlers

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub mod add;
pub mod handover;
pub mod init;
pub mod score;
pub mod stats;
pub mod validate;

/// continuity - Conversation knowledge base and memory pressure tracking
///
/// Keeps decisions, answered questions and context snapshots across
/// conversations, and tells you when it is time to hand over.
#[derive(Parser, Debug)]
#[command(name = "continuity")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file path
    #[arg(short, long, global = true, env = "CONTINUITY_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Calculate memory score
    Score(score::ScoreArgs),

    /// Initialize knowledge base
    Init(init::InitArgs),

    /// Validate knowledge base
    Validate(validate::ValidateArgs),

    /// Append a question, decision or snapshot
    Add(add::AddArgs),

    /// Generate handover frontmatter
    Handover(handover::HandoverArgs),

    /// Show knowledge base statistics
    Stats(stats::StatsArgs),
}
