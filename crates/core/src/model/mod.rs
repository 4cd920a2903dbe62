mod course;
mod course_set;
mod descriptor;
mod eligibility;
mod progress;

pub use course::Course;
pub use course_set::{CourseSet, CourseSetError, DanglingPrerequisite, EligibilityMap, ToggleOutcome};
pub use descriptor::{CourseDescriptor, parse_prerequisites};
pub use eligibility::Eligibility;
pub use progress::PersistedProgress;
