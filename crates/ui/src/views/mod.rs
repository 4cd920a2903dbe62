mod curriculum;
mod curriculum_state;
mod state;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use curriculum::CurriculumView;
pub use curriculum_state::{CurriculumState, use_curriculum_state};
pub use state::{ViewError, ViewState, view_state_from_resource};
