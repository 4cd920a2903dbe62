use std::sync::Arc;

use curriculum_core::model::{
    CourseDescriptor, CourseSet, Eligibility, PersistedProgress, ToggleOutcome,
};
use storage::repository::KeyValueStore;

use crate::error::CurriculumError;
use crate::progress_service::ProgressService;

/// Drives the click → recompute → persist cycle for one curriculum.
///
/// The service owns no course state; callers hold the `CourseSet` and pass
/// it in, so the presentation layer decides where state lives.
///
/// Callers that let several clicks overlap should not hold a copy of the set
/// across the save: apply the click with [`CurriculumService::apply`] on the
/// shared set, then hand a snapshot to [`CurriculumService::persist`] and run
/// persists one after another.
#[derive(Clone)]
pub struct CurriculumService {
    progress: ProgressService,
}

impl CurriculumService {
    #[must_use]
    pub fn new(progress: ProgressService) -> Self {
        Self { progress }
    }

    /// Convenience constructor using the default progress key.
    #[must_use]
    pub fn with_store(store: Arc<dyn KeyValueStore>) -> Self {
        Self::new(ProgressService::new(store))
    }

    #[must_use]
    pub fn progress(&self) -> &ProgressService {
        &self.progress
    }

    /// Build the course set and seed it from stored progress.
    ///
    /// Dangling prerequisites are logged. Unreadable or corrupted progress is
    /// logged and ignored, leaving every course incomplete.
    ///
    /// # Errors
    ///
    /// Returns `CurriculumError::CourseSet` if the descriptors contain an
    /// empty or duplicate name.
    pub async fn open<I>(&self, descriptors: I) -> Result<CourseSet, CurriculumError>
    where
        I: IntoIterator<Item = CourseDescriptor>,
    {
        let mut courses = CourseSet::build(descriptors)?;

        for dangling in courses.dangling_prerequisites() {
            tracing::warn!(
                course = dangling.course,
                prerequisite = dangling.prerequisite,
                "Prerequisite does not exist; course stays locked"
            );
        }

        self.progress.load_or_default(&mut courses).await;
        tracing::debug!(
            courses = courses.len(),
            completed = courses.completed_count(),
            "Curriculum opened"
        );
        Ok(courses)
    }

    /// Apply a click on `name` in memory only.
    ///
    /// # Errors
    ///
    /// Returns `CurriculumError::CourseSet` for an unknown course; nothing
    /// changes in that case.
    pub fn apply(
        &self,
        courses: &mut CourseSet,
        name: &str,
    ) -> Result<ToggleOutcome, CurriculumError> {
        let outcome = courses.toggle(name)?;
        tracing::debug!(
            course = name,
            state = courses.eligibility_of(name).map_or("unknown", Eligibility::as_str),
            completion_changed = outcome.completion_changed,
            expanded = outcome.expanded,
            "Course toggled"
        );
        Ok(outcome)
    }

    /// Write a progress snapshot to the store.
    ///
    /// # Errors
    ///
    /// Returns `CurriculumError::Progress` if the store rejects the value.
    pub async fn persist(&self, progress: &PersistedProgress) -> Result<(), CurriculumError> {
        self.progress.save_progress(progress).await?;
        Ok(())
    }

    /// Apply a click on `name` and persist if a completion flag changed.
    ///
    /// # Errors
    ///
    /// Returns `CurriculumError::CourseSet` for an unknown course (nothing
    /// changes) and `CurriculumError::Progress` if persisting fails. In the
    /// latter case the in-memory toggle is kept.
    pub async fn toggle(
        &self,
        courses: &mut CourseSet,
        name: &str,
    ) -> Result<ToggleOutcome, CurriculumError> {
        let outcome = self.apply(courses, name)?;
        if outcome.completion_changed {
            self.persist(&courses.progress()).await?;
        }
        Ok(outcome)
    }
}
