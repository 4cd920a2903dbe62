use std::fmt;

/// Derived interaction state of a course.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Eligibility {
    /// Not completed and at least one prerequisite is missing or incomplete.
    Locked,
    /// Not completed and every prerequisite is completed.
    Unlocked,
    Completed,
}

impl Eligibility {
    /// Whether the completion flag may be toggled from this state.
    #[must_use]
    pub fn is_interactive(self) -> bool {
        !matches!(self, Self::Locked)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Locked => "locked",
            Self::Unlocked => "unlocked",
            Self::Completed => "completed",
        }
    }
}

impl fmt::Display for Eligibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
