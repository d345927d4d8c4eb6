//! continuity - Conversation knowledge base
//!
//! Tracks what was asked, decided and worked on across conversations, and
//! scores memory pressure so you know when to hand over to a fresh session.
//!
//! ## Key Concepts
//!
//! - **Memory score**: `messages + 2 * tool_calls`, warn at 50, critical at 70
//! - **Knowledge base**: YAML record of questions, decisions and snapshots
//! - **Append-only**: entries get sequential IDs (`q001`, `d001`, `s001`)
//! - **Handover**: frontmatter block that starts a handover document

pub mod cli;
pub mod config;
pub mod core;

pub use self::core::error::StoreError;
pub use self::core::handover::{create_handover_frontmatter, Author, HandoverFrontmatter};
pub use self::core::knowledge::{init_knowledge_base, KnowledgeBase};
pub use self::core::score::{calculate_memory_score, get_memory_status, MemoryStatus};
pub use self::core::storage::{load_knowledge_base, save_knowledge_base};
pub use self::core::validate::validate_knowledge_base;
