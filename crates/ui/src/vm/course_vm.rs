use curriculum_core::model::{CourseSet, Eligibility};

/// Visual state of a course node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CourseStateVm {
    Locked,
    Unlocked,
    Completed,
}

impl CourseStateVm {
    /// CSS class applied to the node.
    #[must_use]
    pub fn class(self) -> &'static str {
        match self {
            Self::Locked => "course disabled",
            Self::Unlocked => "course",
            Self::Completed => "course completed",
        }
    }

    #[must_use]
    pub fn cursor(self) -> &'static str {
        match self {
            Self::Locked => "not-allowed",
            Self::Unlocked | Self::Completed => "pointer",
        }
    }
}

impl From<Eligibility> for CourseStateVm {
    fn from(value: Eligibility) -> Self {
        match value {
            Eligibility::Locked => Self::Locked,
            Eligibility::Unlocked => Self::Unlocked,
            Eligibility::Completed => Self::Completed,
        }
    }
}

/// UI-ready representation of one course node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CourseNodeVm {
    pub name: String,
    pub prerequisites: Vec<String>,
    pub state: CourseStateVm,
    pub expanded: bool,
}

impl CourseNodeVm {
    #[must_use]
    pub fn class(&self) -> String {
        if self.expanded {
            format!("{} active", self.state.class())
        } else {
            self.state.class().to_owned()
        }
    }

    #[must_use]
    pub fn style(&self) -> String {
        format!("cursor: {};", self.state.cursor())
    }

    /// Text shown in the detail panel.
    #[must_use]
    pub fn prerequisites_label(&self) -> String {
        if self.prerequisites.is_empty() {
            "No prerequisites".to_owned()
        } else {
            format!("Prerequisites: {}", self.prerequisites.join(", "))
        }
    }
}

/// Completed / total counter for the header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProgressSummaryVm {
    pub completed: usize,
    pub total: usize,
}

impl ProgressSummaryVm {
    #[must_use]
    pub fn from_courses(courses: &CourseSet) -> Self {
        Self {
            completed: courses.completed_count(),
            total: courses.len(),
        }
    }

    #[must_use]
    pub fn label(self) -> String {
        format!("{} / {} completed", self.completed, self.total)
    }
}

/// Map the course set into nodes, in catalog order.
#[must_use]
pub fn map_course_nodes(courses: &CourseSet) -> Vec<CourseNodeVm> {
    let eligibility = courses.eligibility();
    courses
        .iter()
        .map(|course| CourseNodeVm {
            name: course.name().to_owned(),
            prerequisites: course.prerequisites().to_vec(),
            state: eligibility
                .get(course.name())
                .copied()
                .map_or(CourseStateVm::Locked, CourseStateVm::from),
            expanded: courses.is_expanded(course.name()),
        })
        .collect()
}
