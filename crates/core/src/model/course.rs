/// A single node of the curriculum.
///
/// The only mutable field is the completion flag; eligibility is derived by
/// the owning `CourseSet`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    name: String,
    prerequisites: Vec<String>,
    completed: bool,
}

impl Course {
    pub(crate) fn new(name: String, prerequisites: Vec<String>) -> Self {
        Self {
            name,
            prerequisites,
            completed: false,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Direct prerequisites, in catalog order. Names may be dangling.
    #[must_use]
    pub fn prerequisites(&self) -> &[String] {
        &self.prerequisites
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub(crate) fn set_completed(&mut self, completed: bool) {
        self.completed = completed;
    }
}
