use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use curriculum_core::model::CourseDescriptor;
use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use services::CurriculumService;
use storage::repository::{KeyValueStore, Storage};

use crate::context::{UiApp, build_app_context};
use crate::views::use_curriculum_state;

use super::curriculum::render_curriculum;

#[derive(Clone)]
struct TestApp {
    descriptors: Vec<CourseDescriptor>,
    curriculum: Arc<CurriculumService>,
}

impl UiApp for TestApp {
    fn title(&self) -> String {
        "Test Curriculum".to_owned()
    }

    fn descriptors(&self) -> Vec<CourseDescriptor> {
        self.descriptors.clone()
    }

    fn curriculum(&self) -> Arc<CurriculumService> {
        Arc::clone(&self.curriculum)
    }
}

#[derive(Clone, Default)]
struct HarnessHandles {
    toggle: Rc<RefCell<Option<Callback<String>>>>,
}

impl HarnessHandles {
    fn toggle(&self) -> Callback<String> {
        (*self.toggle.borrow()).expect("toggle registered")
    }
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    handles: HarnessHandles,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for ViewHarnessProps {}

#[component]
fn ViewHarnessRoot(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    let ctx = use_context_provider(|| build_app_context(&app));
    let state = use_curriculum_state(&ctx);
    let mut registered = use_signal(|| false);
    if !registered() {
        registered.set(true);
        *props.handles.toggle.borrow_mut() = Some(state.toggle);
    }
    render_curriculum(&state)
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub store: Arc<dyn KeyValueStore>,
    handles: HarnessHandles,
}

impl ViewHarness {
    /// Click the node named `name`.
    pub fn click(&mut self, name: &str) {
        self.handles.toggle().call(name.to_owned());
        drive_dom(&mut self.dom);
    }

    /// Let pending loads and saves finish.
    pub async fn settle(&mut self) {
        for _ in 0..4 {
            self.drive_async().await;
        }
    }

    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn setup_view_harness(descriptors: Vec<CourseDescriptor>) -> ViewHarness {
    setup_view_harness_with_storage(descriptors, Storage::in_memory())
}

pub fn setup_view_harness_with_storage(
    descriptors: Vec<CourseDescriptor>,
    storage: Storage,
) -> ViewHarness {
    let curriculum = Arc::new(CurriculumService::with_store(Arc::clone(&storage.kv)));
    let app = Arc::new(TestApp {
        descriptors,
        curriculum,
    });
    let handles = HarnessHandles::default();
    let dom = VirtualDom::new_with_props(
        ViewHarnessRoot,
        ViewHarnessProps {
            app,
            handles: handles.clone(),
        },
    );

    ViewHarness {
        dom,
        store: storage.kv,
        handles,
    }
}

/// Class attribute of the course node whose heading is `name`.
pub fn node_class<'a>(html: &'a str, name: &str) -> Option<&'a str> {
    let heading = html.find(&format!("<h3>{name}</h3>"))?;
    let before = &html[..heading];
    let start = before.rfind("class=\"")? + "class=\"".len();
    let end = start + before[start..].find('"')?;
    Some(&before[start..end])
}
