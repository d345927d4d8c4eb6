//! Knowledge base - Core data structure
//!
//! The persisted record of questions, decisions and context snapshots
//! accumulated for a project across conversations.
//!
//! # Key Properties
//! - **Append-only**: mutators never remove or reorder entries
//! - **Sequential IDs**: `q001`, `d001`, `s001`, derived from list length
//! - **Counters**: every `statistics.total_*` counter tracks its list length
//!
//! Field declaration order is the on-disk key order.

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use super::score::calculate_memory_score;

/// Schema version written into new knowledge bases
pub const SCHEMA_VERSION: &str = "1.0.0";

/// How handover documents are versioned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum VersioningPreference {
    /// Version lives inside the document
    #[default]
    Internal,
    /// Version is encoded in the file name
    Filename,
}

impl std::fmt::Display for VersioningPreference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VersioningPreference::Internal => write!(f, "internal"),
            VersioningPreference::Filename => write!(f, "filename"),
        }
    }
}

/// Lifetime of a decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    #[default]
    Project,
    Conversation,
    Permanent,
}

impl std::fmt::Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Scope::Project => write!(f, "project"),
            Scope::Conversation => write!(f, "conversation"),
            Scope::Permanent => write!(f, "permanent"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Low,
    #[default]
    Medium,
    High,
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Confidence::Low => write!(f, "low"),
            Confidence::Medium => write!(f, "medium"),
            Confidence::High => write!(f, "high"),
        }
    }
}

/// Decision status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DecisionStatus {
    /// Active and current
    #[default]
    Active,
    /// Replaced by a later decision
    Superseded,
    /// Marked as deprecated
    Deprecated,
}

/// Why a snapshot was taken
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum SnapshotType {
    #[default]
    Periodic,
    #[value(name = "pre_handover", alias = "pre-handover")]
    PreHandover,
    Milestone,
}

impl std::fmt::Display for SnapshotType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SnapshotType::Periodic => write!(f, "periodic"),
            SnapshotType::PreHandover => write!(f, "pre_handover"),
            SnapshotType::Milestone => write!(f, "milestone"),
        }
    }
}

/// Completion state of the task captured in a snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    InProgress,
    Blocked,
    Completed,
}

/// A question that has been asked and answered
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Question {
    /// Sequential ID (`q001`)
    pub id: String,
    pub question: String,
    pub answer: String,
    pub category: String,
    pub first_asked: DateTime<Utc>,
    pub last_asked: DateTime<Utc>,
    /// How often the question came up
    pub times_asked: u32,
    /// Alternative phrasings of the same question
    pub variations: Vec<String>,
    pub related_decisions: Vec<String>,
    pub tags: Vec<String>,
}

/// A decision and why it was made
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Decision {
    /// Sequential ID (`d001`)
    pub id: String,
    pub decision: String,
    pub rationale: String,
    pub date: DateTime<Utc>,
    pub category: String,
    pub scope: Scope,
    pub confidence: Confidence,
    /// ID of the decision this one replaces
    pub supersedes: Option<String>,
    pub related_questions: Vec<String>,
    pub impact: String,
    pub status: DecisionStatus,
    pub tags: Vec<String>,
}

/// Point-in-time capture of the conversation state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Snapshot {
    /// Sequential ID (`s001`)
    pub id: String,
    pub date: DateTime<Utc>,
    pub snapshot_type: SnapshotType,
    pub message_count: u64,
    pub tool_call_count: u64,
    /// Score at capture time, never recomputed
    pub memory_score: u64,
    pub active_task: String,
    pub task_status: TaskStatus,
    pub completion_percentage: u8,
    pub filesystem_state: Vec<String>,
    pub workspace_state: Vec<String>,
    pub key_context: String,
    pub open_questions: Vec<String>,
    pub next_steps: Vec<String>,
    pub blockers: Vec<String>,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct FilesystemAccess {
    pub project_directory: String,
    pub workspace_directory: String,
    pub access_level: String,
}

/// What the assistant environment can do
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Capabilities {
    pub last_checked: DateTime<Utc>,
    pub tools_available: Vec<String>,
    pub extensions_available: Vec<String>,
    pub workspace_type: String,
    #[serde(default)]
    pub filesystem_access: FilesystemAccess,
    #[serde(default)]
    pub mcp_servers: Vec<String>,
    #[serde(default)]
    pub known_limitations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct HealthMetrics {
    pub knowledge_growth_rate: f64,
    pub question_repeat_rate: f64,
    pub conflict_rate: f64,
    pub handover_frequency: f64,
}

/// Running counters and aggregates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Statistics {
    pub total_conversations: u64,
    pub total_questions: u64,
    pub total_decisions: u64,
    pub total_conflicts: u64,
    #[serde(default)]
    pub total_snapshots: u64,
    #[serde(default)]
    pub total_handovers: u64,
    #[serde(default)]
    pub most_asked_questions: Vec<String>,
    #[serde(default)]
    pub most_active_categories: Vec<String>,
    #[serde(default)]
    pub average_conversation_length: f64,
    #[serde(default)]
    pub average_tool_calls: f64,
    #[serde(default)]
    pub last_handover: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_conflict: Option<DateTime<Utc>>,
    #[serde(default)]
    pub health_metrics: HealthMetrics,
}

/// The knowledge base record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeBase {
    pub version: String,
    pub last_updated: DateTime<Utc>,
    pub versioning_preference: VersioningPreference,
    pub created_date: DateTime<Utc>,
    pub project_path: String,
    #[serde(default)]
    pub first_run_message_shown: bool,

    pub questions_answered: Vec<Question>,
    pub decisions: Vec<Decision>,

    pub capabilities: Capabilities,

    /// Conflict resolutions, recorded by hand
    pub conflicts_resolved: Vec<serde_yaml::Value>,
    pub context_snapshots: Vec<Snapshot>,

    pub statistics: Statistics,
}

/// Workspace directory recorded for new knowledge bases
const DEFAULT_WORKSPACE_DIRECTORY: &str = "/home/claude";

/// Build a fresh knowledge base
pub fn init_knowledge_base(
    project_path: impl Into<String>,
    versioning_preference: VersioningPreference,
) -> KnowledgeBase {
    KnowledgeBase::new(project_path, versioning_preference)
}

/// Format a sequential ID: `prefix` + 1-based position, zero-padded to 3 digits
fn sequential_id(prefix: char, existing: usize) -> String {
    format!("{}{:03}", prefix, existing + 1)
}

impl KnowledgeBase {
    /// Create an empty knowledge base stamped with the current time
    pub fn new(project_path: impl Into<String>, versioning_preference: VersioningPreference) -> Self {
        let now = Utc::now();
        let project_path = project_path.into();

        Self {
            version: SCHEMA_VERSION.to_string(),
            last_updated: now,
            versioning_preference,
            created_date: now,
            project_path: project_path.clone(),
            first_run_message_shown: false,
            questions_answered: Vec::new(),
            decisions: Vec::new(),
            capabilities: Capabilities {
                last_checked: now,
                tools_available: Vec::new(),
                extensions_available: Vec::new(),
                workspace_type: "unknown".to_string(),
                filesystem_access: FilesystemAccess {
                    project_directory: project_path,
                    workspace_directory: DEFAULT_WORKSPACE_DIRECTORY.to_string(),
                    access_level: "unknown".to_string(),
                },
                mcp_servers: Vec::new(),
                known_limitations: Vec::new(),
            },
            conflicts_resolved: Vec::new(),
            context_snapshots: Vec::new(),
            statistics: Statistics::default(),
        }
    }

    /// Append an answered question
    pub fn add_question(
        &mut self,
        question: impl Into<String>,
        answer: impl Into<String>,
        category: impl Into<String>,
    ) -> &mut Self {
        let now = Utc::now();
        let entry = Question {
            id: sequential_id('q', self.questions_answered.len()),
            question: question.into(),
            answer: answer.into(),
            category: category.into(),
            first_asked: now,
            last_asked: now,
            times_asked: 1,
            variations: Vec::new(),
            related_decisions: Vec::new(),
            tags: Vec::new(),
        };

        self.questions_answered.push(entry);
        self.statistics.total_questions += 1;
        self.last_updated = now;
        self
    }

    /// Append a decision. It starts out active and supersedes nothing.
    pub fn add_decision(
        &mut self,
        decision: impl Into<String>,
        rationale: impl Into<String>,
        category: impl Into<String>,
        scope: Scope,
        confidence: Confidence,
    ) -> &mut Self {
        let now = Utc::now();
        let entry = Decision {
            id: sequential_id('d', self.decisions.len()),
            decision: decision.into(),
            rationale: rationale.into(),
            date: now,
            category: category.into(),
            scope,
            confidence,
            supersedes: None,
            related_questions: Vec::new(),
            impact: String::new(),
            status: DecisionStatus::Active,
            tags: Vec::new(),
        };

        self.decisions.push(entry);
        self.statistics.total_decisions += 1;
        self.last_updated = now;
        self
    }

    /// Append a context snapshot with its memory score at this moment
    pub fn add_snapshot(
        &mut self,
        snapshot_type: SnapshotType,
        message_count: u64,
        tool_call_count: u64,
        active_task: impl Into<String>,
        key_context: impl Into<String>,
    ) -> &mut Self {
        let now = Utc::now();
        let entry = Snapshot {
            id: sequential_id('s', self.context_snapshots.len()),
            date: now,
            snapshot_type,
            message_count,
            tool_call_count,
            memory_score: calculate_memory_score(message_count, tool_call_count),
            active_task: active_task.into(),
            task_status: TaskStatus::InProgress,
            completion_percentage: 0,
            filesystem_state: Vec::new(),
            workspace_state: Vec::new(),
            key_context: key_context.into(),
            open_questions: Vec::new(),
            next_steps: Vec::new(),
            blockers: Vec::new(),
            tags: Vec::new(),
        };

        self.context_snapshots.push(entry);
        self.statistics.total_snapshots += 1;
        self.last_updated = now;
        self
    }

    /// Count a handover written at `date`
    pub fn record_handover(&mut self, date: DateTime<Utc>) -> &mut Self {
        self.statistics.total_handovers += 1;
        self.statistics.last_handover = Some(date);
        self.last_updated = Utc::now();
        self
    }

    /// Most recent snapshot, if any
    pub fn latest_snapshot(&self) -> Option<&Snapshot> {
        self.context_snapshots.last()
    }

    /// Run the key-presence validator against this record's serialized form
    pub fn validate(&self) -> Vec<String> {
        match serde_yaml::to_value(self) {
            Ok(document) => super::validate::validate_knowledge_base(&document),
            Err(e) => vec![format!("Failed to encode knowledge base: {}", e)],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fresh() -> KnowledgeBase {
        init_knowledge_base("/projects/demo", VersioningPreference::Internal)
    }

    #[test]
    fn test_init_defaults() {
        let kb = fresh();

        assert_eq!(kb.version, "1.0.0");
        assert_eq!(kb.project_path, "/projects/demo");
        assert_eq!(kb.versioning_preference, VersioningPreference::Internal);
        assert_eq!(kb.created_date, kb.last_updated);
        assert_eq!(kb.capabilities.last_checked, kb.created_date);
        assert_eq!(kb.capabilities.workspace_type, "unknown");
        assert_eq!(kb.capabilities.filesystem_access.project_directory, "/projects/demo");
        assert!(!kb.first_run_message_shown);
        assert!(kb.questions_answered.is_empty());
        assert!(kb.decisions.is_empty());
        assert!(kb.conflicts_resolved.is_empty());
        assert!(kb.context_snapshots.is_empty());
        assert_eq!(kb.statistics, Statistics::default());
    }

    #[test]
    fn test_init_passes_validation() {
        assert!(fresh().validate().is_empty());

        let filename = init_knowledge_base("/p", VersioningPreference::Filename);
        assert!(filename.validate().is_empty());
    }

    #[test]
    fn test_timestamps_end_with_z() {
        let kb = fresh();
        let value = serde_yaml::to_value(&kb).unwrap();
        let created = value["created_date"].as_str().unwrap();
        assert!(created.ends_with('Z'), "{}", created);
    }

    #[test]
    fn test_add_question_sequential_ids() {
        let mut kb = fresh();
        kb.add_question("Q1?", "A1", "setup")
            .add_question("Q2?", "A2", "setup")
            .add_question("Q3?", "A3", "build");

        assert_eq!(kb.questions_answered[0].id, "q001");
        assert_eq!(kb.questions_answered[2].id, "q003");
        assert_eq!(kb.statistics.total_questions, 3);

        let third = &kb.questions_answered[2];
        assert_eq!(third.times_asked, 1);
        assert_eq!(third.first_asked, third.last_asked);
        assert_eq!(third.category, "build");
    }

    #[test]
    fn test_add_question_refreshes_last_updated() {
        let mut kb = fresh();
        let before = kb.last_updated;
        kb.add_question("Q?", "A", "misc");
        assert!(kb.last_updated >= before);
        assert_eq!(kb.last_updated, kb.questions_answered[0].first_asked);
    }

    #[test]
    fn test_add_decision() {
        let mut kb = fresh();
        kb.add_decision(
            "Use YAML",
            "Human readable",
            "format",
            Scope::default(),
            Confidence::default(),
        );

        assert_eq!(kb.statistics.total_decisions, 1);
        let decision = &kb.decisions[0];
        assert_eq!(decision.id, "d001");
        assert_eq!(decision.status, DecisionStatus::Active);
        assert!(decision.supersedes.is_none());
        assert_eq!(decision.scope, Scope::Project);
        assert_eq!(decision.confidence, Confidence::Medium);
    }

    #[test]
    fn test_add_snapshot_embeds_score() {
        let mut kb = fresh();
        kb.add_snapshot(SnapshotType::Periodic, 30, 10, "task", "ctx");

        let snapshot = kb.latest_snapshot().unwrap();
        assert_eq!(snapshot.id, "s001");
        assert_eq!(snapshot.memory_score, 50);
        assert_eq!(snapshot.task_status, TaskStatus::InProgress);
        assert_eq!(snapshot.completion_percentage, 0);
        assert_eq!(kb.statistics.total_snapshots, 1);
    }

    #[test]
    fn test_counters_track_lists() {
        let mut kb = fresh();
        kb.add_question("Q?", "A", "c")
            .add_decision("D", "R", "c", Scope::Permanent, Confidence::High)
            .add_snapshot(SnapshotType::Milestone, 1, 1, "t", "k")
            .add_snapshot(SnapshotType::PreHandover, 2, 2, "t", "k");

        assert_eq!(kb.statistics.total_questions as usize, kb.questions_answered.len());
        assert_eq!(kb.statistics.total_decisions as usize, kb.decisions.len());
        assert_eq!(kb.statistics.total_snapshots as usize, kb.context_snapshots.len());
        assert_eq!(kb.context_snapshots[1].id, "s002");
    }

    #[test]
    fn test_record_handover() {
        let mut kb = fresh();
        let at = Utc::now();
        kb.record_handover(at);

        assert_eq!(kb.statistics.total_handovers, 1);
        assert_eq!(kb.statistics.last_handover, Some(at));
    }

    #[test]
    fn test_enum_cli_values() {
        assert_eq!(VersioningPreference::from_str("internal", false).unwrap(), VersioningPreference::Internal);
        assert_eq!(VersioningPreference::from_str("FILENAME", true).unwrap(), VersioningPreference::Filename);
        assert!(VersioningPreference::from_str("git", true).is_err());

        assert_eq!(Scope::from_str("conversation", false).unwrap(), Scope::Conversation);
        assert!(Scope::from_str("global", false).is_err());

        assert_eq!(Confidence::from_str("high", false).unwrap(), Confidence::High);
        assert!(Confidence::from_str("certain", false).is_err());

        assert_eq!(SnapshotType::from_str("pre-handover", false).unwrap(), SnapshotType::PreHandover);
        assert_eq!(SnapshotType::from_str("pre_handover", false).unwrap(), SnapshotType::PreHandover);
        assert!(SnapshotType::from_str("hourly", false).is_err());
    }

    #[test]
    fn test_load_validator_minimal_document() {
        let yaml = r#"
version: "1.0.0"
last_updated: "2025-01-01T00:00:00Z"
versioning_preference: internal
created_date: "2025-01-01T00:00:00Z"
project_path: /projects/demo
questions_answered:
- question: Which shell?
decisions:
- decision: Use YAML
context_snapshots:
- memory_score: 12
capabilities:
  last_checked: "2025-01-01T00:00:00Z"
  tools_available: []
  extensions_available: []
  workspace_type: unknown
conflicts_resolved: []
statistics:
  total_conversations: 0
  total_questions: 1
  total_decisions: 1
  total_conflicts: 0
  health_metrics:
    conflict_rate: 0.5
"#;
        let document: serde_yaml::Value = serde_yaml::from_str(yaml).unwrap();
        assert!(crate::core::validate::validate_knowledge_base(&document).is_empty());

        let kb: KnowledgeBase = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(kb.capabilities.filesystem_access, FilesystemAccess::default());
        assert_eq!(kb.questions_answered[0].question, "Which shell?");
        assert_eq!(kb.questions_answered[0].times_asked, 0);
        assert_eq!(kb.decisions[0].status, DecisionStatus::Active);
        assert_eq!(kb.context_snapshots[0].task_status, TaskStatus::InProgress);
        assert_eq!(kb.statistics.health_metrics.conflict_rate, 0.5);
        assert_eq!(kb.statistics.total_snapshots, 0);
    }

    #[test]
    fn test_enum_serialization() {
        assert_eq!(serde_json::to_string(&SnapshotType::PreHandover).unwrap(), "\"pre_handover\"");
        assert_eq!(serde_json::to_string(&TaskStatus::InProgress).unwrap(), "\"in_progress\"");
        assert_eq!(serde_json::to_string(&DecisionStatus::Active).unwrap(), "\"active\"");
        assert_eq!(format!("{}", SnapshotType::PreHandover), "pre_handover");
    }
}
