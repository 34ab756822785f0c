use dioxus::prelude::*;

use super::pages::PageList;
use super::properties::PropertiesPanel;
use crate::app::Route;
use crate::editor::{use_editor, NoticeKind};
use crate::page_config::{PageConfig, PageConfigService};
use crate::renderer::{builtin_registry, resolve_page, ResolvedBlockView};
use crate::schema::BlockCategory;
use crate::settings::EditorSettings;
use crate::templates::ProjectTemplate;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EditorMode {
    Editor,
    Preview,
}

/// Pointer and view state that never belongs in the saved project.
#[derive(Clone, Debug)]
pub struct EditorUi {
    pub mode: EditorMode,
    pub dragging_id: Option<String>,
    pub drop_index: Option<usize>,
    pub transfer: Option<TransferDialog>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum TransferDialog {
    Export(String),
    Import(String),
}

impl Default for EditorUi {
    fn default() -> Self {
        Self {
            mode: EditorMode::Editor,
            dragging_id: None,
            drop_index: None,
            transfer: None,
        }
    }
}

pub static EDITOR_UI: GlobalSignal<EditorUi> = Signal::global(EditorUi::default);

#[component]
pub fn VisualEditor() -> Element {
    let store = use_editor();
    let state = store.state();
    let mode = EDITOR_UI.read().mode;
    let editor_style = mode_button_style(mode == EditorMode::Editor);
    let preview_style = mode_button_style(mode == EditorMode::Preview);
    let (project_name, dirty) = {
        let state = state.read();
        (
            state.current_project.as_ref().map(|p| p.name.clone()).unwrap_or_default(),
            state.is_dirty,
        )
    };

    rsx! {
        div {
            class: "visual-editor",
            style: "display: flex; height: 100vh; font-family: system-ui;",

            div {
                class: "toolbox",
                style: "width: 240px; padding: 16px; overflow-y: auto; border-right: 1px solid #ddd;",
                h2 { style: "margin: 0 0 4px 0; font-size: 18px;", "{project_name}" }
                if dirty {
                    div { style: "font-size: 11px; color: #e65100; margin-bottom: 8px;", "Unsaved changes" }
                }

                div {
                    class: "mode-toggle",
                    style: "margin: 12px 0 16px 0; display: flex; gap: 8px;",
                    button {
                        onclick: move |_| set_mode(EditorMode::Editor),
                        style: "{editor_style}",
                        "Editor"
                    }
                    button {
                        onclick: move |_| set_mode(EditorMode::Preview),
                        style: "{preview_style}",
                        "Preview"
                    }
                }

                Toolbar {}
                PageList {}

                if mode == EditorMode::Editor {
                    Palette {}
                }
            }

            div {
                class: "canvas-wrapper",
                style: "flex: 1; background: #f0f0f0; overflow: hidden; position: relative;",

                if mode == EditorMode::Editor {
                    Canvas {}
                } else {
                    PreviewCanvas {}
                }
            }

            if mode == EditorMode::Editor {
                div {
                    class: "properties",
                    style: "width: 300px; overflow-y: auto; border-left: 1px solid #ddd;",
                    PropertiesPanel {}
                }
            }

            TransferModal {}
            NoticeToast {}
        }
    }
}

#[component]
fn Toolbar() -> Element {
    let store = use_editor();
    let mut template = use_signal(|| ProjectTemplate::QuizFunnel);

    let service = use_context::<PageConfigService>();
    let current_page_id = store.state().read().current_page_id.clone();

    let save = store.clone();
    let load = store.clone();
    let export = store.clone();
    let create = store.clone();
    let publish = store.clone();

    rsx! {
        div {
            class: "toolbar",
            style: "display: flex; flex-wrap: wrap; gap: 6px; margin-bottom: 16px;",
            button { onclick: move |_| save.save_project(), "Save" }
            button { onclick: move |_| load.load_project(), "Load" }
            button {
                onclick: move |_| {
                    if let Some(json) = export.export_project() {
                        EDITOR_UI.write().transfer = Some(TransferDialog::Export(json));
                    }
                },
                "Export"
            }
            button {
                onclick: move |_| EDITOR_UI.write().transfer = Some(TransferDialog::Import(String::new())),
                "Import"
            }
            button {
                title: "Send the current page to the page-config API",
                onclick: move |_| {
                    let Some(config) = publish.state().read().current_page().map(PageConfig::from_page) else {
                        return;
                    };
                    let service = service.clone();
                    let store = publish.clone();
                    spawn(async move {
                        if service.save_page_config(&config).await {
                            store.notify(NoticeKind::Info, format!("Published {}", config.page_name));
                        } else {
                            store.notify(NoticeKind::Error, "Publishing failed");
                        }
                    });
                },
                "Publish"
            }
            if let Some(page_id) = current_page_id {
                Link { to: Route::Preview { page_id }, "Live preview" }
            }
            div { style: "display: flex; gap: 6px; width: 100%;",
                select {
                    style: "flex: 1;",
                    onchange: move |e| {
                        let chosen = ProjectTemplate::ALL
                            .into_iter()
                            .find(|t| t.label() == e.value());
                        if let Some(chosen) = chosen {
                            template.set(chosen);
                        }
                    },
                    for choice in ProjectTemplate::ALL {
                        option {
                            value: "{choice.label()}",
                            selected: choice == template(),
                            "{choice.label()}"
                        }
                    }
                }
                button { onclick: move |_| create.new_project(template()), "New" }
            }
        }
    }
}

#[component]
fn Palette() -> Element {
    let store = use_editor();
    let registry = builtin_registry();

    rsx! {
        div {
            class: "component-buttons",
            style: "display: flex; flex-direction: column; gap: 8px;",
            for category in BlockCategory::ALL {
                h3 { style: "margin: 12px 0 4px 0; font-size: 13px; color: #666;", "{category.label()}" }
                for definition in registry.definitions_in(category) {
                    {
                        let store = store.clone();
                        let block_type = definition.block_type;
                        rsx! {
                            button {
                                key: "{block_type}",
                                title: "{definition.icon}",
                                onclick: move |_| store.add_block(block_type),
                                "{definition.name}"
                            }
                        }
                    }
                }
            }

            div { style: "margin-top: 24px;",
                h3 { style: "margin: 0 0 8px 0; font-size: 14px;", "Instructions" }
                p { style: "font-size: 12px; color: #666; line-height: 1.4;",
                    "Click blocks to select"
                    br {}
                    "Drag blocks to reorder"
                    br {}
                    "Cards draw other blocks by id"
                }
            }
        }
    }
}

#[component]
fn Canvas() -> Element {
    let store = use_editor();
    let state = store.state();
    let block_ids: Vec<String> = state
        .read()
        .current_page()
        .map(|page| page.blocks.iter().map(|b| b.id.clone()).collect())
        .unwrap_or_default();
    let has_page = state.read().current_page().is_some();
    let deselect = store.clone();

    rsx! {
        div {
            class: "canvas",
            style: "width: 100%; height: 100%; overflow-y: auto; padding: 24px; box-sizing: border-box;",
            onclick: move |_| deselect.deselect_block(),

            if !has_page {
                div { style: "color: #999; text-align: center; padding: 32px;", "Add a page to start" }
            } else if block_ids.is_empty() {
                div { style: "color: #999; text-align: center; padding: 32px;", "Pick a block from the left" }
            }

            for (index, id) in block_ids.into_iter().enumerate() {
                BlockBox { key: "{id}", block_id: id.clone(), index }
            }
        }
    }
}

#[component]
fn BlockBox(block_id: String, index: usize) -> Element {
    let store = use_editor();
    let state = store.state();
    let Some((type_name, summary, category)) = state.read().current_page().and_then(|page| {
        let block = page.block(&block_id)?;
        let definition = builtin_registry().definition(&block.block_type);
        let summary = ["text", "title", "question", "content", "label"]
            .iter()
            .find_map(|key| block.text(key))
            .unwrap_or_default()
            .to_string();
        Some((
            definition.map(|d| d.name.to_string()).unwrap_or_else(|| block.block_type.clone()),
            summary,
            definition.map(|d| d.category),
        ))
    }) else {
        return rsx! {};
    };
    let is_selected = state.read().selected_block_id.as_deref() == Some(block_id.as_str());
    let is_drop_target = EDITOR_UI.read().drop_index == Some(index);

    let type_color = match category {
        Some(BlockCategory::Content) => "#2196F3",
        Some(BlockCategory::Layout) => "#4CAF50",
        Some(BlockCategory::Quiz) => "#9C27B0",
        Some(BlockCategory::Result) => "#FF9800",
        Some(BlockCategory::Offer) => "#795548",
        None => "#9E9E9E",
    };
    let border_color = if is_selected { "#f44336" } else { "#333" };
    let border_width = if is_selected { "3px" } else { "2px" };
    let drop_line = if is_drop_target { "4px solid #9C27B0" } else { "4px solid transparent" };

    let drag_id = block_id.clone();
    let select_id = block_id.clone();
    let drop_store = store.clone();

    rsx! {
        div {
            class: "component-box",
            draggable: "true",
            style: "
                margin-bottom: 12px;
                border-top: {drop_line};
                background: {type_color};
                border: {border_width} solid {border_color};
                border-radius: 8px;
                padding: 12px;
                cursor: grab;
                user-select: none;
                box-shadow: 0 2px 8px rgba(0,0,0,0.2);
            ",
            ondragstart: move |_| start_dragging(drag_id.clone()),
            ondragover: move |e| {
                e.prevent_default();
                EDITOR_UI.write().drop_index = Some(index);
            },
            ondrop: move |e| {
                e.prevent_default();
                if let Some(id) = stop_dragging() {
                    drop_store.move_block(&id, index);
                }
            },
            ondragend: move |_| {
                stop_dragging();
            },
            onclick: move |e| {
                e.stop_propagation();
                store.select_block(&select_id);
            },

            div {
                style: "font-weight: bold; color: white; font-size: 14px; margin-bottom: 4px;",
                "{type_name}"
            }
            if !summary.is_empty() {
                div {
                    style: "color: rgba(255,255,255,0.9); font-size: 12px;
                            overflow: hidden; text-overflow: ellipsis; white-space: nowrap;",
                    "{summary}"
                }
            }
        }
    }
}

#[component]
fn PreviewCanvas() -> Element {
    let store = use_editor();
    let settings = use_context::<EditorSettings>();
    let state = store.state();
    let Some(config) = state.read().current_page().map(PageConfig::from_page) else {
        return rsx! {
            div { style: "padding: 32px; color: #999;", "No page selected" }
        };
    };
    let blocks = resolve_page(&config, builtin_registry(), settings.render_limits());
    let page_style = config.styles.to_css();

    rsx! {
        div {
            style: "width: 100%; height: 100%; background: white; padding: 32px; overflow-y: auto; box-sizing: border-box; {page_style}",
            for block in blocks {
                ResolvedBlockView { key: "{block.block_id()}", block: block.clone() }
            }
        }
    }
}

#[component]
fn TransferModal() -> Element {
    let store = use_editor();
    let Some(dialog) = EDITOR_UI.read().transfer.clone() else {
        return rsx! {};
    };

    let (title, text, importing) = match &dialog {
        TransferDialog::Export(json) => ("Export project", json.clone(), false),
        TransferDialog::Import(draft) => ("Import project", draft.clone(), true),
    };
    let draft = text.clone();

    rsx! {
        div {
            style: "position: fixed; inset: 0; background: rgba(0,0,0,0.4); display: flex; align-items: center; justify-content: center;",
            div {
                style: "background: white; border-radius: 8px; padding: 16px; width: 600px; max-width: 90vw;",
                h3 { style: "margin-top: 0;", "{title}" }
                textarea {
                    style: "width: 100%; height: 320px; font-family: monospace; font-size: 12px;",
                    readonly: !importing,
                    value: "{text}",
                    oninput: move |e| {
                        if importing {
                            EDITOR_UI.write().transfer = Some(TransferDialog::Import(e.value()));
                        }
                    },
                }
                div { style: "display: flex; gap: 8px; justify-content: flex-end; margin-top: 8px;",
                    if importing {
                        button {
                            onclick: move |_| {
                                if store.import_project(&draft).is_ok() {
                                    EDITOR_UI.write().transfer = None;
                                }
                            },
                            "Import"
                        }
                    }
                    button { onclick: move |_| EDITOR_UI.write().transfer = None, "Close" }
                }
            }
        }
    }
}

#[component]
fn NoticeToast() -> Element {
    let store = use_editor();
    let Some(notice) = store.notice() else {
        return rsx! {};
    };
    let background = match notice.kind {
        NoticeKind::Info => "#323232",
        NoticeKind::Error => "#c62828",
    };

    rsx! {
        div {
            class: "notice",
            style: "position: fixed; bottom: 16px; right: 16px; background: {background}; color: white; padding: 12px 16px; border-radius: 6px; display: flex; gap: 12px;",
            span { "{notice.message}" }
            button {
                style: "background: none; border: none; color: white; cursor: pointer;",
                onclick: move |_| store.dismiss_notice(),
                "✕"
            }
        }
    }
}

fn mode_button_style(active: bool) -> String {
    let (background, color) = if active { ("#B89B7A", "white") } else { ("#f5eee6", "#432818") };
    format!("background: {background}; color: {color}; border: 1px solid #B89B7A; border-radius: 4px; padding: 4px 12px;")
}

fn set_mode(mode: EditorMode) {
    EDITOR_UI.write().mode = mode;
}

fn start_dragging(id: String) {
    EDITOR_UI.write().dragging_id = Some(id);
}

/// Ends the drag, returning the id that was being dragged.
fn stop_dragging() -> Option<String> {
    let mut ui = EDITOR_UI.write();
    ui.drop_index = None;
    ui.dragging_id.take()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_buttons_use_concrete_colours() {
        let active = mode_button_style(true);
        let idle = mode_button_style(false);
        assert_ne!(active, idle);
        for style in [&active, &idle] {
            assert!(!style.contains("var("));
            assert!(style.contains("background: #"));
        }
    }
}
