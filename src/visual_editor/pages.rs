use dioxus::prelude::*;

use crate::editor::use_editor;

#[component]
pub fn PageList() -> Element {
    let store = use_editor();
    let state = store.state();
    let (pages, current) = {
        let state = state.read();
        let pages: Vec<(String, String, usize)> = state
            .current_project
            .as_ref()
            .map(|project| {
                project
                    .pages
                    .iter()
                    .map(|p| (p.id.clone(), p.title.clone(), p.blocks.len()))
                    .collect()
            })
            .unwrap_or_default();
        (pages, state.current_page_id.clone())
    };
    let mut renaming = use_signal(|| None::<String>);
    let add = store.clone();

    rsx! {
        div { class: "page-list", style: "margin-bottom: 16px;",
            div { style: "display: flex; justify-content: space-between; align-items: center;",
                h3 { style: "margin: 0; font-size: 14px;", "Pages" }
                button { onclick: move |_| add.add_page(), "+ Page" }
            }
            for (id, title, count) in pages {
                {
                    let is_current = current.as_deref() == Some(id.as_str());
                    let background = if is_current { "#e3f2fd" } else { "transparent" };
                    let is_renaming = renaming.read().as_deref() == Some(id.as_str());
                    let switch = store.clone();
                    let rename = store.clone();
                    let delete = store.clone();
                    let switch_id = id.clone();
                    let rename_id = id.clone();
                    let edit_id = id.clone();
                    let delete_id = id.clone();
                    rsx! {
                        div {
                            key: "{id}",
                            style: "display: flex; align-items: center; gap: 4px; padding: 4px; background: {background}; border-radius: 4px; cursor: pointer;",
                            onclick: move |_| switch.switch_page(&switch_id),
                            if is_renaming {
                                input {
                                    style: "flex: 1; min-width: 0;",
                                    value: "{title}",
                                    autofocus: true,
                                    onclick: move |e| e.stop_propagation(),
                                    onchange: move |e| {
                                        let title = e.value().trim().to_string();
                                        if !title.is_empty() {
                                            rename.rename_page(&rename_id, title);
                                        }
                                        renaming.set(None);
                                    },
                                }
                            } else {
                                span {
                                    style: "flex: 1; font-size: 13px;",
                                    ondoubleclick: move |_| renaming.set(Some(edit_id.clone())),
                                    "{title}"
                                }
                                span { style: "font-size: 11px; color: #999;", "{count}" }
                            }
                            button {
                                title: "Delete page",
                                onclick: move |e| {
                                    e.stop_propagation();
                                    delete.delete_page(&delete_id);
                                },
                                "✕"
                            }
                        }
                    }
                }
            }
        }
    }
}
