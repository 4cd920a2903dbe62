use std::sync::Arc;

use curriculum_core::model::{CourseSet, PersistedProgress};
use storage::repository::KeyValueStore;

use crate::error::ProgressError;

/// Storage key used when none is configured.
pub const DEFAULT_PROGRESS_KEY: &str = "curriculumProgress";

/// Reads and writes the completion-flag blob for one curriculum.
#[derive(Clone)]
pub struct ProgressService {
    store: Arc<dyn KeyValueStore>,
    key: String,
}

impl ProgressService {
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_key(store, DEFAULT_PROGRESS_KEY)
    }

    #[must_use]
    pub fn with_key(store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Seed completion flags of `courses` from the store.
    ///
    /// Returns `Ok(None)` when nothing is stored, otherwise the number of
    /// courses whose flag was restored. Stored names that are not in
    /// `courses` are ignored.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::Read` if the store fails and
    /// `ProgressError::Corrupted` if the blob is not a name → bool object.
    /// `courses` is left untouched on error.
    pub async fn load(&self, courses: &mut CourseSet) -> Result<Option<usize>, ProgressError> {
        let Some(raw) = self.store.get(&self.key).await.map_err(ProgressError::Read)? else {
            return Ok(None);
        };
        let progress: PersistedProgress =
            serde_json::from_str(&raw).map_err(ProgressError::Corrupted)?;
        let applied = courses.apply_progress(&progress);
        tracing::info!(key = %self.key, applied, stored = progress.len(), "Progress loaded");
        Ok(Some(applied))
    }

    /// Like [`ProgressService::load`], but any failure is logged and treated as
    /// "no stored progress"; `courses` keeps its defaults.
    pub async fn load_or_default(&self, courses: &mut CourseSet) -> Option<usize> {
        match self.load(courses).await {
            Ok(applied) => applied,
            Err(err) => {
                tracing::warn!(key = %self.key, error = %err, "Ignoring stored progress");
                None
            }
        }
    }

    /// Overwrite the stored blob with the completion flags of `courses`.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::Write` if the store rejects the value.
    pub async fn save(&self, courses: &CourseSet) -> Result<(), ProgressError> {
        self.save_progress(&courses.progress()).await
    }

    /// Overwrite the stored blob with an already-taken snapshot.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::Write` if the store rejects the value.
    pub async fn save_progress(&self, progress: &PersistedProgress) -> Result<(), ProgressError> {
        let raw = serde_json::to_string(progress).map_err(ProgressError::Serialize)?;
        self.store
            .set(&self.key, &raw)
            .await
            .map_err(ProgressError::Write)?;
        tracing::info!(key = %self.key, courses = progress.len(), "Progress saved");
        Ok(())
    }
}
