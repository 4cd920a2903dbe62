use dioxus::prelude::*;

use crate::context::AppContext;
use crate::views::{CurriculumState, ViewState, use_curriculum_state, view_state_from_resource};
use crate::vm::{CourseNodeVm, ProgressSummaryVm, map_course_nodes};

#[component]
pub fn CurriculumView() -> Element {
    let ctx = use_context::<AppContext>();
    let state = use_curriculum_state(&ctx);
    render_curriculum(&state)
}

pub(crate) fn render_curriculum(state: &CurriculumState) -> Element {
    let title = state.title.clone();
    let on_toggle = state.toggle;
    let view_state = view_state_from_resource(&state.loaded);
    let summary = state
        .courses
        .read()
        .as_ref()
        .map(ProgressSummaryVm::from_courses);
    let nodes = state
        .courses
        .read()
        .as_ref()
        .map(map_course_nodes)
        .unwrap_or_default();
    let notice_message = (state.notice)();

    rsx! {
        div { class: "page curriculum",
            header { class: "curriculum-header",
                h2 { "{title}" }
                if let Some(summary) = summary {
                    p { class: "curriculum-progress", "{summary.label()}" }
                }
            }

            if let Some(err) = notice_message {
                p { class: "notice", "{err.message()}" }
            }

            match view_state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(()) => rsx! {
                    if nodes.is_empty() {
                        p { "No courses in this curriculum." }
                    } else {
                        div { class: "course-grid",
                            for node in nodes {
                                CourseNode { node, on_toggle }
                            }
                        }
                    }
                },
                ViewState::Error(err) => rsx! {
                    p { class: "error", "{err.message()}" }
                },
            }
        }
    }
}

#[component]
fn CourseNode(node: CourseNodeVm, on_toggle: EventHandler<String>) -> Element {
    let class = node.class();
    let style = node.style();
    let label = node.prerequisites_label();
    let name = node.name.clone();

    rsx! {
        div {
            class: "{class}",
            style: "{style}",
            onclick: move |_| on_toggle.call(name.clone()),
            h3 { "{node.name}" }
            if node.expanded {
                div { class: "course-info",
                    p { "{label}" }
                }
            }
        }
    }
}
