use std::rc::Rc;

use dioxus::prelude::*;
use dioxus_logger::tracing::info;

use crate::editor::{use_editor_provider, ProjectStorage};
use crate::page_config::{refresh_page_configs, use_page_config, PageConfigService, PageConfigState};
use crate::renderer::{Answer, BlockCallbacks, DynamicBlockRenderer};
use crate::settings::EditorSettings;
use crate::visual_editor::VisualEditor;

#[derive(Routable, Clone, PartialEq)]
pub enum Route {
    #[route("/")]
    Editor {},
    #[route("/preview/:page_id")]
    Preview { page_id: String },
}

#[cfg(feature = "web")]
fn project_storage(settings: &EditorSettings) -> Rc<dyn ProjectStorage> {
    Rc::new(crate::editor::LocalProjectStorage::new(
        settings.project_storage_key.clone(),
    ))
}

#[cfg(not(feature = "web"))]
fn project_storage(_settings: &EditorSettings) -> Rc<dyn ProjectStorage> {
    Rc::new(crate::editor::MemoryProjectStorage::new())
}

#[component]
pub fn App() -> Element {
    let settings = use_context_provider(EditorSettings::load);
    let storage = use_hook(|| project_storage(&settings));
    use_editor_provider(storage, settings.autosave, settings.autosave_interval_ms);
    use_context_provider(|| PageConfigService::new(settings.clone()));

    rsx! {
        Router::<Route> {}
    }
}

#[component]
fn Editor() -> Element {
    rsx! {
        VisualEditor {}
    }
}

/// Live page assembled from the page-config API.
#[component]
fn Preview(page_id: String) -> Element {
    let service = use_context::<PageConfigService>();
    let config = use_page_config(page_id.clone());
    let callbacks = BlockCallbacks {
        on_answer: Some(EventHandler::new(|answer: Answer| {
            info!("Answered {}: {:?}", answer.block_id, answer.selected);
        })),
        on_click: Some(EventHandler::new(|block_id: String| {
            info!("Clicked {}", block_id);
        })),
        on_start: Some(EventHandler::new(|name: String| {
            info!("Quiz started by {}", name);
        })),
    };

    rsx! {
        div { style: "max-width: 720px; margin: 0 auto; padding: 24px; font-family: system-ui;",
            div { style: "display: flex; justify-content: space-between; margin-bottom: 16px;",
                Link { to: Route::Editor {}, "← Back to editor" }
                button {
                    onclick: move |_| refresh_page_configs(&service),
                    "Refresh"
                }
            }
            {match config.state() {
                PageConfigState::Loading => rsx! { p { "Loading page..." } },
                PageConfigState::Failed(message) => rsx! {
                    p { style: "color: #c62828;", "Could not load {page_id}: {message}" }
                },
                PageConfigState::Ready(config) => rsx! {
                    div { style: "{config.styles.to_css()}",
                        h1 { style: "font-size: 14px; color: #999;", "{config.page_name} · v{config.version}" }
                        for block_id in config.root_block_ids() {
                            DynamicBlockRenderer {
                                key: "{block_id}",
                                page_id: page_id.clone(),
                                block_id: block_id.clone(),
                                callbacks: callbacks.clone(),
                            }
                        }
                    }
                },
            }}
        }
    }
}
