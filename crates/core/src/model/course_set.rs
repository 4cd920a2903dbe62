use std::collections::HashMap;

use thiserror::Error;

use crate::model::course::Course;
use crate::model::descriptor::CourseDescriptor;
use crate::model::eligibility::Eligibility;
use crate::model::progress::PersistedProgress;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CourseSetError {
    #[error("course name cannot be empty")]
    EmptyName,

    #[error("duplicate course name: {0}")]
    DuplicateName(String),

    #[error("unknown course: {0}")]
    UnknownCourse(String),
}

//
// ─── SUPPORT TYPES ─────────────────────────────────────────────────────────────
//

/// Eligibility of every course, keyed by name.
pub type EligibilityMap = HashMap<String, Eligibility>;

/// What a single click on a course changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleOutcome {
    /// The completion flag flipped; the set must be persisted.
    pub completion_changed: bool,
    /// The clicked course's detail view is open after the click.
    pub expanded: bool,
}

/// A prerequisite reference that names no course in the set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DanglingPrerequisite<'a> {
    pub course: &'a str,
    pub prerequisite: &'a str,
}

//
// ─── COURSE SET ────────────────────────────────────────────────────────────────
//

/// The full curriculum: every course, its completion flag, and the single
/// expanded detail slot.
///
/// Built once from descriptors; courses are never added or removed afterwards.
/// Display order follows the descriptor order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseSet {
    courses: Vec<Course>,
    index: HashMap<String, usize>,
    expanded: Option<usize>,
}

impl CourseSet {
    /// Builds a set with every course incomplete and no detail view open.
    ///
    /// Prerequisites naming unknown courses are accepted; such courses stay
    /// locked until they are completed by other means (loaded progress).
    ///
    /// # Errors
    ///
    /// Returns `CourseSetError::EmptyName` for a blank name and
    /// `CourseSetError::DuplicateName` if two descriptors share a name.
    pub fn build<I>(descriptors: I) -> Result<Self, CourseSetError>
    where
        I: IntoIterator<Item = CourseDescriptor>,
    {
        let mut courses = Vec::new();
        let mut index = HashMap::new();

        for descriptor in descriptors {
            let (name, prerequisites) = descriptor.into_parts();
            if name.is_empty() {
                return Err(CourseSetError::EmptyName);
            }
            if index.contains_key(&name) {
                return Err(CourseSetError::DuplicateName(name));
            }
            index.insert(name.clone(), courses.len());
            courses.push(Course::new(name, prerequisites));
        }

        Ok(Self {
            courses,
            index,
            expanded: None,
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.courses.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    /// Courses in display order.
    pub fn iter(&self) -> impl Iterator<Item = &Course> {
        self.courses.iter()
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Course> {
        self.index.get(name).map(|&idx| &self.courses[idx])
    }

    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.courses.iter().filter(|c| c.is_completed()).count()
    }

    // Eligibility

    /// Eligibility of one course, or `None` if the name is unknown.
    #[must_use]
    pub fn eligibility_of(&self, name: &str) -> Option<Eligibility> {
        self.index.get(name).map(|&idx| self.eligibility_at(idx))
    }

    /// Recomputes eligibility for every course from the current flags.
    #[must_use]
    pub fn eligibility(&self) -> EligibilityMap {
        self.courses
            .iter()
            .enumerate()
            .map(|(idx, course)| (course.name().to_owned(), self.eligibility_at(idx)))
            .collect()
    }

    fn eligibility_at(&self, idx: usize) -> Eligibility {
        let course = &self.courses[idx];
        if course.is_completed() {
            return Eligibility::Completed;
        }
        let all_met = course
            .prerequisites()
            .iter()
            .all(|prereq| self.get(prereq).is_some_and(Course::is_completed));
        if all_met {
            Eligibility::Unlocked
        } else {
            Eligibility::Locked
        }
    }

    /// Prerequisite references that can never be satisfied.
    #[must_use]
    pub fn dangling_prerequisites(&self) -> Vec<DanglingPrerequisite<'_>> {
        self.courses
            .iter()
            .flat_map(|course| {
                course
                    .prerequisites()
                    .iter()
                    .filter(|prereq| !self.index.contains_key(prereq.as_str()))
                    .map(move |prereq| DanglingPrerequisite {
                        course: course.name(),
                        prerequisite: prereq,
                    })
            })
            .collect()
    }

    // Interaction

    /// Handles a click on `name`.
    ///
    /// Flips the completion flag unless the course is locked, toggles the
    /// course's detail view and closes any other open detail view.
    ///
    /// # Errors
    ///
    /// Returns `CourseSetError::UnknownCourse` if `name` is not in the set;
    /// nothing is changed in that case.
    pub fn toggle(&mut self, name: &str) -> Result<ToggleOutcome, CourseSetError> {
        let idx = *self
            .index
            .get(name)
            .ok_or_else(|| CourseSetError::UnknownCourse(name.to_owned()))?;

        let completion_changed = self.eligibility_at(idx).is_interactive();
        if completion_changed {
            let course = &mut self.courses[idx];
            let completed = !course.is_completed();
            course.set_completed(completed);
        }

        self.expanded = if self.expanded == Some(idx) {
            None
        } else {
            Some(idx)
        };

        Ok(ToggleOutcome {
            completion_changed,
            expanded: self.expanded.is_some(),
        })
    }

    /// The course whose detail view is open, if any.
    #[must_use]
    pub fn expanded(&self) -> Option<&Course> {
        self.expanded.map(|idx| &self.courses[idx])
    }

    #[must_use]
    pub fn is_expanded(&self, name: &str) -> bool {
        self.expanded()
            .is_some_and(|course| course.name() == name)
    }

    // Persistence projection

    /// Projects completion flags of every course.
    #[must_use]
    pub fn progress(&self) -> PersistedProgress {
        self.courses
            .iter()
            .map(|c| (c.name(), c.is_completed()))
            .collect()
    }

    /// Overwrites completion flags from stored progress.
    ///
    /// Names not present in the set are ignored. Returns the number of
    /// courses whose flag was taken from `progress`.
    pub fn apply_progress(&mut self, progress: &PersistedProgress) -> usize {
        let mut applied = 0;
        for (name, completed) in progress.iter() {
            if let Some(&idx) = self.index.get(name) {
                self.courses[idx].set_completed(completed);
                applied += 1;
            }
        }
        applied
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
