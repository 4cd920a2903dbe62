mod course_vm;

pub use course_vm::{CourseNodeVm, CourseStateVm, ProgressSummaryVm, map_course_nodes};
