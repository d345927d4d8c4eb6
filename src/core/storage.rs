//! Storage - YAML file backend
//!
//! One knowledge base per file, written in block style with keys in
//! declaration order.
//!
//! # Key Points
//! - `read_*` / `write_*` return typed [`StoreError`]s
//! - `load_*` / `save_*` log the error and return `None` / `false`
//! - Writes go to a sibling `.tmp` file that is renamed over the target
//! - No locking: the last writer wins

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde_yaml::Value;
use tracing::{debug, error};

use super::error::{StoreError, StoreResult};
use super::knowledge::KnowledgeBase;

/// Save a knowledge base. Failures are logged, never raised.
pub fn save_knowledge_base(kb: &KnowledgeBase, path: &Path) -> bool {
    match write_knowledge_base(kb, path) {
        Ok(()) => true,
        Err(e) => {
            error!("{}", e);
            false
        }
    }
}

/// Load a knowledge base. Missing or malformed files yield `None`.
pub fn load_knowledge_base(path: &Path) -> Option<KnowledgeBase> {
    match read_knowledge_base(path) {
        Ok(kb) => Some(kb),
        Err(e) => {
            error!("{}", e);
            None
        }
    }
}

/// Load a file as an untyped document, for validation
pub fn load_document(path: &Path) -> Option<Value> {
    match read_document(path) {
        Ok(doc) => Some(doc),
        Err(e) => {
            error!("{}", e);
            None
        }
    }
}

/// Serialize and write a knowledge base
pub fn write_knowledge_base(kb: &KnowledgeBase, path: &Path) -> StoreResult<()> {
    let content = serde_yaml::to_string(kb).map_err(StoreError::Encode)?;

    let write_err = |source| StoreError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_err)?;
    }

    let tmp = temp_path(path);
    fs::write(&tmp, content).map_err(write_err)?;
    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(write_err(e));
    }

    debug!(
        path = %path.display(),
        questions = kb.questions_answered.len(),
        decisions = kb.decisions.len(),
        snapshots = kb.context_snapshots.len(),
        "Saved knowledge base"
    );
    Ok(())
}

/// Read and decode a knowledge base
pub fn read_knowledge_base(path: &Path) -> StoreResult<KnowledgeBase> {
    let content = read_file(path)?;
    let kb = serde_yaml::from_str(&content).map_err(|source| StoreError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), "Loaded knowledge base");
    Ok(kb)
}

/// Read a file as an untyped YAML document
pub fn read_document(path: &Path) -> StoreResult<Value> {
    let content = read_file(path)?;
    serde_yaml::from_str(&content).map_err(|source| StoreError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn read_file(path: &Path) -> StoreResult<String> {
    fs::read_to_string(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => StoreError::NotFound(path.to_path_buf()),
        _ => StoreError::Read {
            path: path.to_path_buf(),
            source,
        },
    })
}

/// `conversation-knowledge.yaml` -> `conversation-knowledge.yaml.tmp`
fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
