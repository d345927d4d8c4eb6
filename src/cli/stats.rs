//! Stats command - Show knowledge base statistics

use std::path::PathBuf;

use anyhow::bail;
use clap::Args;
use colored::Colorize;
use tabled::{settings::Style, Table, Tabled};

use crate::cli::score::paint;
use crate::config::Config;
use crate::core::knowledge::KnowledgeBase;
use crate::core::score::get_memory_status;
use crate::core::storage::load_knowledge_base;

/// Stats command arguments
#[derive(Args, Debug)]
pub struct StatsArgs {
    /// Knowledge base file (default: from config)
    pub filepath: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Tabled)]
struct CounterRow {
    #[tabled(rename = "Counter")]
    name: &'static str,
    #[tabled(rename = "Total")]
    total: u64,
}

fn counter_rows(kb: &KnowledgeBase) -> Vec<CounterRow> {
    let stats = &kb.statistics;
    vec![
        CounterRow { name: "conversations", total: stats.total_conversations },
        CounterRow { name: "questions", total: stats.total_questions },
        CounterRow { name: "decisions", total: stats.total_decisions },
        CounterRow { name: "conflicts", total: stats.total_conflicts },
        CounterRow { name: "snapshots", total: stats.total_snapshots },
        CounterRow { name: "handovers", total: stats.total_handovers },
    ]
}

/// Execute stats command
pub fn execute(args: StatsArgs, config: &Config) -> anyhow::Result<()> {
    let path = args.filepath.unwrap_or_else(|| config.store.file_name.clone());
    let Some(kb) = load_knowledge_base(&path) else {
        bail!("Could not load knowledge base: {}", path.display());
    };

    let latest = kb.latest_snapshot();

    if args.json {
        let json = serde_json::json!({
            "project_path": kb.project_path,
            "last_updated": kb.last_updated,
            "statistics": kb.statistics,
            "latest_memory_score": latest.map(|s| s.memory_score),
            "latest_memory_status": latest.map(|s| get_memory_status(s.memory_score)),
        });
        println!("{}", serde_json::to_string_pretty(&json)?);
        return Ok(());
    }

    println!("{}\n", "Knowledge Base Statistics".bold());
    println!("  Project:      {}", kb.project_path);
    println!("  Last updated: {}", kb.last_updated.to_rfc3339());
    println!();
    println!("{}", Table::new(counter_rows(&kb)).with(Style::rounded()));

    match latest {
        Some(snapshot) => {
            let status = get_memory_status(snapshot.memory_score);
            println!(
                "\nLatest snapshot {} ({}): score {} {}",
                snapshot.id,
                snapshot.snapshot_type,
                snapshot.memory_score,
                paint(status, status.status())
            );
            println!("  Task: {}", snapshot.active_task);
        }
        None => println!("\nNo snapshots yet."),
    }

    if let Some(last) = kb.statistics.last_handover {
        println!("Last handover: {}", last.to_rfc3339());
    }

    println!("\n📁 Knowledge base: {}", path.display());

    Ok(())
}
