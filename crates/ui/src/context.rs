use std::sync::Arc;

use curriculum_core::model::CourseDescriptor;
use services::CurriculumService;

pub trait UiApp: Send + Sync {
    fn title(&self) -> String;
    fn descriptors(&self) -> Vec<CourseDescriptor>;
    fn curriculum(&self) -> Arc<CurriculumService>;
}

#[derive(Clone)]
pub struct AppContext {
    title: String,
    descriptors: Arc<[CourseDescriptor]>,
    curriculum: Arc<CurriculumService>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            title: app.title(),
            descriptors: app.descriptors().into(),
            curriculum: app.curriculum(),
        }
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Static catalog the curriculum is built from.
    #[must_use]
    pub fn descriptors(&self) -> Vec<CourseDescriptor> {
        self.descriptors.to_vec()
    }

    #[must_use]
    pub fn curriculum(&self) -> Arc<CurriculumService> {
        Arc::clone(&self.curriculum)
    }
}

// This context is provided by the application composition root (e.g. `crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
