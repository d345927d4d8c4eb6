//! Store errors

use std::path::PathBuf;

use thiserror::Error;

/// Failures at the persistence boundary
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Knowledge base not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Error reading {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Error parsing {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Error encoding knowledge base: {0}")]
    Encode(#[source] serde_yaml::Error),

    #[error("Error writing {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type StoreResult<T> = Result<T, StoreError>;
