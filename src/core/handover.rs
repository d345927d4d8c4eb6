//! Handover frontmatter
//!
//! Metadata block that prefixes a human-written handover document.
//! Nothing here is persisted; the caller decides where the block goes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::score::calculate_memory_score;

/// Format version of the frontmatter block
pub const FRONTMATTER_VERSION: &str = "1.0.0";

/// Who wrote the handover
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Author {
    pub name: String,
    pub email: String,
}

impl Author {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandoverFrontmatter {
    pub handover_date: DateTime<Utc>,
    /// Filled in by hand
    pub conversation_duration: Option<String>,
    pub message_count: u64,
    pub tool_call_count: u64,
    pub memory_score: u64,
    pub version: String,
    pub author: String,
    pub email: String,
    pub project: String,
    /// Filled in by hand
    pub previous_handover: Option<String>,
    pub next_conversation_priority: String,
}

/// Build the frontmatter for a handover happening now
pub fn create_handover_frontmatter(
    message_count: u64,
    tool_call_count: u64,
    project: impl Into<String>,
    author: &Author,
) -> HandoverFrontmatter {
    HandoverFrontmatter::new(message_count, tool_call_count, project, author)
}

impl HandoverFrontmatter {
    pub fn new(
        message_count: u64,
        tool_call_count: u64,
        project: impl Into<String>,
        author: &Author,
    ) -> Self {
        Self {
            handover_date: Utc::now(),
            conversation_duration: None,
            message_count,
            tool_call_count,
            memory_score: calculate_memory_score(message_count, tool_call_count),
            version: FRONTMATTER_VERSION.to_string(),
            author: author.name.clone(),
            email: author.email.clone(),
            project: project.into(),
            previous_handover: None,
            next_conversation_priority: "high".to_string(),
        }
    }

    /// Render as a `---` delimited YAML block followed by a title heading
    pub fn to_markdown(&self) -> Result<String, serde_yaml::Error> {
        let yaml = serde_yaml::to_string(self)?;
        Ok(format!(
            "---\n{}---\n\n# Conversation Handover: {}\n",
            yaml, self.project
        ))
    }
}
