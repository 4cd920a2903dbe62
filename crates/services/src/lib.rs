#![forbid(unsafe_code)]

pub mod catalog;
pub mod curriculum_service;
pub mod error;
pub mod progress_service;

pub use catalog::{load_catalog_file, load_catalog_str};
pub use curriculum_service::CurriculumService;
pub use error::{CatalogError, CurriculumError, ProgressError};
pub use progress_service::{DEFAULT_PROGRESS_KEY, ProgressService};
