/// Static input describing one course node, as read from the catalog.
///
/// Descriptors carry no state; they are turned into a `CourseSet` once at
/// startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseDescriptor {
    name: String,
    prerequisites: Vec<String>,
}

impl CourseDescriptor {
    /// Creates a descriptor from an already-split prerequisite list.
    ///
    /// Names are trimmed and empty prerequisite entries are dropped.
    #[must_use]
    pub fn new<I, S>(name: impl Into<String>, prerequisites: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let name = name.into().trim().to_owned();
        let prerequisites = prerequisites
            .into_iter()
            .map(|p| p.into().trim().to_owned())
            .filter(|p| !p.is_empty())
            .collect();
        Self {
            name,
            prerequisites,
        }
    }

    /// Creates a descriptor from a title and a raw comma-separated
    /// prerequisite attribute. A missing attribute means no prerequisites.
    #[must_use]
    pub fn from_raw(name: impl Into<String>, prereq: Option<&str>) -> Self {
        let prerequisites = prereq.map(parse_prerequisites).unwrap_or_default();
        Self::new(name, prerequisites)
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn prerequisites(&self) -> &[String] {
        &self.prerequisites
    }

    pub(crate) fn into_parts(self) -> (String, Vec<String>) {
        (self.name, self.prerequisites)
    }
}

/// Splits a comma-separated prerequisite attribute into trimmed names.
///
/// Empty entries (e.g. from `"A,,B"` or a trailing comma) are dropped.
#[must_use]
pub fn parse_prerequisites(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_owned)
        .collect()
}
