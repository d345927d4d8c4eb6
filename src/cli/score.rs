//! `continuity score` command
//!
//! # Usage
//! ```bash
//! continuity score 30 10          # Memory Score: 50, warning
//! continuity score 30 10 --json
//! ```

use anyhow::Result;
use clap::Args;
use colored::{ColoredString, Colorize};

use crate::core::score::{MemoryReport, MemoryStatus};

#[derive(Args, Debug)]
pub struct ScoreArgs {
    /// Message count
    pub messages: u64,

    /// Tool call count
    pub tool_calls: u64,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: ScoreArgs) -> Result<()> {
    let report = MemoryReport::new(args.messages, args.tool_calls);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Memory Score: {}", report.score);
    println!(
        "Status: {} ({})",
        paint(report.status, report.status.status()),
        report.level
    );
    println!("Recommendation: {}", report.recommendation);

    if report.status.needs_handover() {
        println!(
            "\nRun `continuity handover {} {} --project <name>` to start one.",
            args.messages, args.tool_calls
        );
    }

    Ok(())
}

/// Color text by memory status level
pub fn paint(status: MemoryStatus, text: &str) -> ColoredString {
    match status {
        MemoryStatus::Healthy => text.green(),
        MemoryStatus::Warning => text.yellow(),
        MemoryStatus::Critical => text.red().bold(),
    }
}
