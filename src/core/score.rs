//! Memory pressure scoring
//!
//! A heuristic for how much conversational context has piled up.
//!
//! # Formula
//! `messages * 1 + tool_calls * 2`
//!
//! # Bands
//! - `< 50` healthy (green)
//! - `50..70` warning (yellow)
//! - `>= 70` critical (red)

use serde::{Deserialize, Serialize};

/// Weight of a single message
pub const MESSAGE_WEIGHT: u64 = 1;

/// Weight of a single tool call
pub const TOOL_CALL_WEIGHT: u64 = 2;

/// First score in the warning band
pub const WARNING_THRESHOLD: u64 = 50;

/// First score in the critical band
pub const CRITICAL_THRESHOLD: u64 = 70;

/// Calculate the memory pressure score. Saturates at `u64::MAX`.
pub fn calculate_memory_score(message_count: u64, tool_call_count: u64) -> u64 {
    message_count
        .saturating_mul(MESSAGE_WEIGHT)
        .saturating_add(tool_call_count.saturating_mul(TOOL_CALL_WEIGHT))
}

/// Classify a score into its band
pub fn get_memory_status(score: u64) -> MemoryStatus {
    MemoryStatus::from_score(score)
}

/// Memory pressure band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemoryStatus {
    Healthy,
    Warning,
    Critical,
}

impl MemoryStatus {
    pub fn from_score(score: u64) -> Self {
        if score < WARNING_THRESHOLD {
            MemoryStatus::Healthy
        } else if score < CRITICAL_THRESHOLD {
            MemoryStatus::Warning
        } else {
            MemoryStatus::Critical
        }
    }

    /// Status name (`healthy`, `warning`, `critical`)
    pub fn status(&self) -> &'static str {
        match self {
            MemoryStatus::Healthy => "healthy",
            MemoryStatus::Warning => "warning",
            MemoryStatus::Critical => "critical",
        }
    }

    /// Traffic-light level (`green`, `yellow`, `red`)
    pub fn level(&self) -> &'static str {
        match self {
            MemoryStatus::Healthy => "green",
            MemoryStatus::Warning => "yellow",
            MemoryStatus::Critical => "red",
        }
    }

    pub fn recommendation(&self) -> &'static str {
        match self {
            MemoryStatus::Healthy => "Continue normally",
            MemoryStatus::Warning => "Consider preparing handover soon",
            MemoryStatus::Critical => "Prepare handover immediately",
        }
    }

    /// Whether a handover should be prepared now
    pub fn needs_handover(&self) -> bool {
        matches!(self, MemoryStatus::Critical)
    }
}

impl std::fmt::Display for MemoryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.status())
    }
}

/// Score plus its classification, as reported by `continuity score --json`
#[derive(Debug, Clone, Serialize)]
pub struct MemoryReport {
    pub score: u64,
    pub status: MemoryStatus,
    pub level: &'static str,
    pub recommendation: &'static str,
}

impl MemoryReport {
    pub fn new(message_count: u64, tool_call_count: u64) -> Self {
        let score = calculate_memory_score(message_count, tool_call_count);
        let status = get_memory_status(score);
        Self {
            score,
            status,
            level: status.level(),
            recommendation: status.recommendation(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_formula() {
        assert_eq!(calculate_memory_score(0, 0), 0);
        assert_eq!(calculate_memory_score(10, 0), 10);
        assert_eq!(calculate_memory_score(0, 10), 20);
        assert_eq!(calculate_memory_score(30, 10), 50);
    }

    #[test]
    fn test_score_matches_formula_over_range() {
        for m in 0..40u64 {
            for t in 0..40u64 {
                assert_eq!(calculate_memory_score(m, t), m + 2 * t);
            }
        }
    }

    #[test]
    fn test_score_unbounded() {
        assert_eq!(calculate_memory_score(1_000, 1_000), 3_000);
    }

    #[test]
    fn test_score_saturates() {
        assert_eq!(calculate_memory_score(0, u64::MAX / 2 + 1), u64::MAX);
        assert_eq!(calculate_memory_score(u64::MAX, 1), u64::MAX);
        assert_eq!(calculate_memory_score(u64::MAX, u64::MAX), u64::MAX);
        assert_eq!(calculate_memory_score(0, u64::MAX / 2), u64::MAX - 1);
        assert_eq!(
            get_memory_status(calculate_memory_score(0, u64::MAX / 2 + 1)),
            MemoryStatus::Critical
        );
    }

    #[test]
    fn test_status_boundaries() {
        assert_eq!(get_memory_status(0), MemoryStatus::Healthy);
        assert_eq!(get_memory_status(49), MemoryStatus::Healthy);
        assert_eq!(get_memory_status(50), MemoryStatus::Warning);
        assert_eq!(get_memory_status(69), MemoryStatus::Warning);
        assert_eq!(get_memory_status(70), MemoryStatus::Critical);
        assert_eq!(get_memory_status(500), MemoryStatus::Critical);
    }

    #[test]
    fn test_status_labels() {
        let healthy = get_memory_status(10);
        assert_eq!(healthy.status(), "healthy");
        assert_eq!(healthy.level(), "green");
        assert_eq!(healthy.recommendation(), "Continue normally");

        let warning = get_memory_status(55);
        assert_eq!(warning.status(), "warning");
        assert_eq!(warning.level(), "yellow");
        assert_eq!(warning.recommendation(), "Consider preparing handover soon");

        let critical = get_memory_status(90);
        assert_eq!(critical.status(), "critical");
        assert_eq!(critical.level(), "red");
        assert_eq!(critical.recommendation(), "Prepare handover immediately");
    }

    #[test]
    fn test_needs_handover() {
        assert!(!MemoryStatus::Healthy.needs_handover());
        assert!(!MemoryStatus::Warning.needs_handover());
        assert!(MemoryStatus::Critical.needs_handover());
    }

    #[test]
    fn test_report_json() {
        let report = MemoryReport::new(40, 15);
        assert_eq!(report.score, 70);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["status"], "critical");
        assert_eq!(json["level"], "red");
        assert_eq!(json["recommendation"], "Prepare handover immediately");
    }
}
