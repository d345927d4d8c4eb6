//! `continuity add` command
//!
//! Appends an entry to an existing knowledge base.
//!
//! # Usage
//! ```bash
//! continuity add question "Which shell?" "bash" --category env
//! continuity add decision "Use YAML" "Readable diffs" --scope permanent --confidence high
//! continuity add snapshot 30 10 --task "Write parser" --context "Lexer done"
//! continuity add -f other.yaml question ...
//! ```

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Args, Subcommand};

use crate::cli::score::paint;
use crate::config::Config;
use crate::core::knowledge::{Confidence, KnowledgeBase, Scope, SnapshotType};
use crate::core::score::get_memory_status;
use crate::core::storage::{load_knowledge_base, save_knowledge_base};

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Knowledge base file (default: from config)
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: AddCommand,
}

#[derive(Subcommand, Debug)]
pub enum AddCommand {
    /// Record an answered question
    Question {
        question: String,
        answer: String,

        #[arg(short, long, default_value = "general")]
        category: String,
    },

    /// Record a decision
    Decision {
        decision: String,
        rationale: String,

        #[arg(short, long, default_value = "general")]
        category: String,

        #[arg(short, long, value_enum, default_value_t = Scope::Project)]
        scope: Scope,

        #[arg(long, value_enum, default_value_t = Confidence::Medium)]
        confidence: Confidence,
    },

    /// Record a context snapshot
    Snapshot {
        /// Message count
        messages: u64,

        /// Tool call count
        tool_calls: u64,

        #[arg(short = 't', long = "type", value_enum, default_value_t = SnapshotType::Periodic)]
        snapshot_type: SnapshotType,

        /// Current task
        #[arg(long, default_value = "")]
        task: String,

        /// Essential context
        #[arg(long, default_value = "")]
        context: String,
    },
}

pub fn run(args: AddArgs, config: &Config) -> Result<()> {
    let path = args.file.unwrap_or_else(|| config.store.file_name.clone());

    let Some(mut kb) = load_knowledge_base(&path) else {
        bail!(
            "Could not load knowledge base: {}. Run 'continuity init' first.",
            path.display()
        );
    };

    let id = apply(&mut kb, args.command)?;

    if !save_knowledge_base(&kb, &path) {
        bail!("Failed to save knowledge base: {}", path.display());
    }

    println!("Added {} to {}", id, path.display());

    if let Some(snapshot) = kb.context_snapshots.iter().find(|s| s.id == id) {
        let status = get_memory_status(snapshot.memory_score);
        println!(
            "   Memory Score: {} ({})",
            snapshot.memory_score,
            paint(status, status.status())
        );
    }

    Ok(())
}

/// Apply the command and return the new entry's ID
fn apply(kb: &mut KnowledgeBase, command: AddCommand) -> Result<String> {
    let id = match command {
        AddCommand::Question {
            question,
            answer,
            category,
        } => {
            kb.add_question(question, answer, category);
            kb.questions_answered.last().map(|q| q.id.clone())
        }
        AddCommand::Decision {
            decision,
            rationale,
            category,
            scope,
            confidence,
        } => {
            kb.add_decision(decision, rationale, category, scope, confidence);
            kb.decisions.last().map(|d| d.id.clone())
        }
        AddCommand::Snapshot {
            messages,
            tool_calls,
            snapshot_type,
            task,
            context,
        } => {
            kb.add_snapshot(snapshot_type, messages, tool_calls, task, context);
            kb.context_snapshots.last().map(|s| s.id.clone())
        }
    };

    id.ok_or_else(|| anyhow::anyhow!("Entry was not appended"))
}
