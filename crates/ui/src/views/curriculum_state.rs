use dioxus::prelude::*;
use futures::StreamExt;

use curriculum_core::model::CourseSet;

use crate::context::AppContext;
use crate::views::ViewError;

/// Reactive handles behind the curriculum view.
#[derive(Clone)]
pub struct CurriculumState {
    pub title: String,
    pub courses: Signal<Option<CourseSet>>,
    pub notice: Signal<Option<ViewError>>,
    pub loaded: Resource<Result<(), ViewError>>,
    pub toggle: Callback<String>,
}

/// Open the curriculum and wire up click handling.
///
/// A click is applied to `courses` synchronously, so the next click always
/// sees its result. Saves go through a single queue and each one writes the
/// flags current at the time it runs, so the last save always holds the
/// latest state.
pub fn use_curriculum_state(ctx: &AppContext) -> CurriculumState {
    let curriculum = ctx.curriculum();
    let courses = use_signal(|| None::<CourseSet>);
    let notice = use_signal(|| None::<ViewError>);

    let descriptors = ctx.descriptors();
    let curriculum_for_load = curriculum.clone();
    let loaded = use_resource(move || {
        let curriculum = curriculum_for_load.clone();
        let descriptors = descriptors.clone();
        let mut courses = courses;

        async move {
            let opened = curriculum.open(descriptors).await.map_err(|err| {
                tracing::error!(error = %err, "Failed to open curriculum");
                ViewError::InvalidCatalog
            })?;
            courses.set(Some(opened));
            Ok::<_, ViewError>(())
        }
    });

    let curriculum_for_save = curriculum.clone();
    let saver = use_coroutine(move |mut requests: UnboundedReceiver<()>| {
        let curriculum = curriculum_for_save.clone();
        let mut notice = notice;

        async move {
            while requests.next().await.is_some() {
                let Some(snapshot) = courses.peek().as_ref().map(CourseSet::progress) else {
                    continue;
                };
                match curriculum.persist(&snapshot).await {
                    Ok(()) => notice.set(None),
                    Err(err) => {
                        tracing::warn!(error = %err, "Failed to save progress");
                        notice.set(Some(ViewError::SaveFailed));
                    }
                }
            }
        }
    });

    let toggle = use_callback(move |name: String| {
        let mut courses = courses;
        let mut notice = notice;

        let result = {
            let mut guard = courses.write();
            let Some(set) = (*guard).as_mut() else {
                return;
            };
            curriculum.apply(set, &name)
        };

        match result {
            Ok(outcome) if outcome.completion_changed => saver.send(()),
            Ok(_) => {}
            Err(err) => {
                tracing::warn!(course = %name, error = %err, "Toggle failed");
                notice.set(Some(ViewError::Unknown));
            }
        }
    });

    CurriculumState {
        title: ctx.title().to_owned(),
        courses,
        notice,
        loaded,
        toggle,
    }
}
