use dioxus::prelude::*;

use super::registry::builtin_registry;
use super::resolve::{resolve_block, ResolvedBlock};
use super::view::{BlockCallbacks, NotConfigured, ResolvedBlockView};
use crate::page_config::{use_page_config, PageConfigState};
use crate::settings::EditorSettings;

/// Renders one block of a remotely configured page. Unconfigured ids show
/// `fallback`, or a placeholder when none is given.
#[component]
pub fn DynamicBlockRenderer(
    page_id: String,
    block_id: String,
    fallback: Option<Element>,
    #[props(default)] class: String,
    #[props(default)] style: String,
    #[props(default)] callbacks: BlockCallbacks,
) -> Element {
    let settings = use_context::<EditorSettings>();
    let config = use_page_config(page_id);

    let resolved = match config.state() {
        PageConfigState::Loading => {
            return rsx! {
                div { class: "{class}", style: "{style}; min-height: 24px; opacity: 0.5;", "Loading..." }
            };
        }
        PageConfigState::Failed(message) => {
            return rsx! {
                div {
                    class: "{class}",
                    style: "{style}; color: #b71c1c; font-size: 13px;",
                    "Could not load page config: {message}"
                }
            };
        }
        PageConfigState::Ready(config) => {
            resolve_block(&config, &block_id, builtin_registry(), settings.render_limits())
        }
    };

    rsx! {
        div { class: "dynamic-block {class}", style: "{style}",
            {match resolved {
                ResolvedBlock::NotConfigured { block_id } => match fallback {
                    Some(fallback) => fallback,
                    None => rsx! { NotConfigured { block_id } },
                },
                resolved => rsx! { ResolvedBlockView { block: resolved, callbacks } },
            }}
        }
    }
}
