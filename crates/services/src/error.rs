//! Shared error types for the services crate.

use std::path::PathBuf;

use thiserror::Error;

use curriculum_core::model::CourseSetError;
use storage::repository::StorageError;

/// Errors emitted by `ProgressService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProgressError {
    #[error("failed to read stored progress: {0}")]
    Read(#[source] StorageError),
    #[error("stored progress is corrupted: {0}")]
    Corrupted(#[source] serde_json::Error),
    #[error("failed to serialize progress: {0}")]
    Serialize(#[source] serde_json::Error),
    #[error("failed to write progress: {0}")]
    Write(#[source] StorageError),
}

/// Errors emitted while loading a course catalog.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid catalog: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Errors emitted by `CurriculumService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CurriculumError {
    #[error(transparent)]
    CourseSet(#[from] CourseSetError),
    #[error(transparent)]
    Progress(#[from] ProgressError),
}
