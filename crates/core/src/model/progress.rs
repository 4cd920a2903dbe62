use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Stored projection of completion flags, keyed by course name.
///
/// Serializes as a flat JSON object: `{"Calculus I": true, "Physics I": false}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersistedProgress(BTreeMap<String, bool>);

impl PersistedProgress {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, completed: bool) {
        self.0.insert(name.into(), completed);
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<bool> {
        self.0.get(name).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.0.iter().map(|(name, completed)| (name.as_str(), *completed))
    }
}

impl<S: Into<String>> FromIterator<(S, bool)> for PersistedProgress {
    fn from_iter<T: IntoIterator<Item = (S, bool)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}
