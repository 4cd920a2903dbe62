//! Course catalog input.
//!
//! A catalog is a JSON array of course nodes in display order:
//!
//! ```json
//! [
//!   { "name": "Calculus I" },
//!   { "name": "Calculus II", "prereq": "Calculus I" },
//!   { "name": "Mechanics", "prereq": "Calculus I, Physics I" }
//! ]
//! ```
//!
//! `prereq` is the raw comma-separated attribute; it may be absent or empty.

use std::path::Path;

use curriculum_core::model::CourseDescriptor;
use serde::Deserialize;

use crate::error::CatalogError;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogRecord {
    name: String,
    #[serde(default)]
    prereq: Option<String>,
}

impl CatalogRecord {
    fn into_descriptor(self) -> CourseDescriptor {
        CourseDescriptor::from_raw(self.name, self.prereq.as_deref())
    }
}

/// Parse catalog JSON into descriptors.
///
/// # Errors
///
/// Returns `CatalogError::Parse` if the input is not a catalog array.
pub fn load_catalog_str(json: &str) -> Result<Vec<CourseDescriptor>, CatalogError> {
    let records: Vec<CatalogRecord> = serde_json::from_str(json)?;
    Ok(records.into_iter().map(CatalogRecord::into_descriptor).collect())
}

/// Read and parse a catalog file.
///
/// # Errors
///
/// Returns `CatalogError::Io` if the file cannot be read and
/// `CatalogError::Parse` if its content is invalid.
pub fn load_catalog_file(path: impl AsRef<Path>) -> Result<Vec<CourseDescriptor>, CatalogError> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_catalog_str(&json)
}
