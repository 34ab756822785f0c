use std::collections::HashMap;

use dioxus::prelude::*;

use crate::editor::{use_editor, BlockUpdate};
use crate::model::Styles;

// Unsaved style rows per block, in display order
pub static STYLE_EDIT_BUFFER: GlobalSignal<HashMap<String, Vec<(String, String)>>> =
    Signal::global(HashMap::new);

/// Update that turns `saved` into the edited `rows`. Properties that were
/// dropped are sent with an empty value so the merge removes them; blank
/// names are skipped and a repeated name keeps its last value.
pub fn styles_diff(saved: Option<&Styles>, rows: &[(String, String)]) -> Styles {
    let mut next = Styles::new();
    for (property, value) in rows {
        let property = property.trim();
        if !property.is_empty() {
            next.insert(property.to_string(), value.trim().to_string());
        }
    }
    if let Some(saved) = saved {
        for property in saved.keys() {
            next.entry(property.clone()).or_default();
        }
    }
    next
}

fn unused_property_name(rows: &[(String, String)]) -> String {
    let mut name = "new-property".to_string();
    let mut counter = 1;
    while rows.iter().any(|(k, _)| k == &name) {
        name = format!("new-property-{}", counter);
        counter += 1;
    }
    name
}

#[component]
pub fn StyleInput(block_id: String) -> Element {
    let store = use_editor();
    let state = store.state();
    let Some(saved) = state.read().selected_block().map(|b| b.styles.clone()) else {
        return rsx!(div { "Block not found" });
    };

    {
        let mut buf = STYLE_EDIT_BUFFER.write();
        buf.entry(block_id.clone()).or_insert_with(|| {
            saved
                .iter()
                .flatten()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect()
        });
    }

    let rows = STYLE_EDIT_BUFFER
        .read()
        .get(&block_id)
        .cloned()
        .unwrap_or_default();

    let add_id = block_id.clone();
    let save_id = block_id.clone();
    let cancel_id = block_id.clone();

    rsx! {
        div {
            class: "styles-editor",
            style: "padding-inline: 12px;",
            for (i, (key, value)) in rows.iter().enumerate() {
                {
                    let key_id = block_id.clone();
                    let value_id = block_id.clone();
                    let remove_id = block_id.clone();
                    rsx! {
                        div { style: "display: flex; gap: 4px; margin-bottom: 4px;",
                            input {
                                style: "flex: 1; min-width: 0;",
                                value: "{key}",
                                oninput: move |e| {
                                    if let Some(rows) = STYLE_EDIT_BUFFER.write().get_mut(&key_id) {
                                        if let Some(row) = rows.get_mut(i) {
                                            row.0 = e.value();
                                        }
                                    }
                                }
                            }
                            input {
                                style: "flex: 1; min-width: 0;",
                                value: "{value}",
                                oninput: move |e| {
                                    if let Some(rows) = STYLE_EDIT_BUFFER.write().get_mut(&value_id) {
                                        if let Some(row) = rows.get_mut(i) {
                                            row.1 = e.value();
                                        }
                                    }
                                }
                            }
                            button {
                                onclick: move |_| {
                                    if let Some(rows) = STYLE_EDIT_BUFFER.write().get_mut(&remove_id) {
                                        if i < rows.len() {
                                            rows.remove(i);
                                        }
                                    }
                                },
                                "X"
                            }
                        }
                    }
                }
            }

            div { style: "margin-top: 8px; display:flex; gap:8px;",
                button {
                    onclick: move |_| {
                        let mut buf = STYLE_EDIT_BUFFER.write();
                        let rows = buf.entry(add_id.clone()).or_default();
                        let name = unused_property_name(rows);
                        rows.push((name, String::new()));
                    },
                    "Add style"
                }

                button {
                    onclick: move |_| {
                        let rows = STYLE_EDIT_BUFFER.write().remove(&save_id).unwrap_or_default();
                        let saved = state
                            .read()
                            .current_page()
                            .and_then(|page| page.block(&save_id))
                            .and_then(|block| block.styles.clone());
                        store.update_block(&save_id, BlockUpdate::styles(styles_diff(saved.as_ref(), &rows)));
                    },
                    "Save"
                }

                button {
                    onclick: move |_| {
                        STYLE_EDIT_BUFFER.write().remove(&cancel_id);
                    },
                    "Cancel"
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn dropped_properties_are_cleared() {
        let mut saved = Styles::new();
        saved.insert("color".to_string(), "red".to_string());
        saved.insert("margin".to_string(), "0".to_string());

        let diff = styles_diff(Some(&saved), &rows(&[("color", "blue")]));
        assert_eq!(diff["color"], "blue");
        assert_eq!(diff["margin"], "");
    }

    #[test]
    fn blank_names_are_skipped_and_last_duplicate_wins() {
        let diff = styles_diff(None, &rows(&[("", "x"), ("padding", "1px"), ("padding", "2px")]));
        assert_eq!(diff.len(), 1);
        assert_eq!(diff["padding"], "2px");
    }

    #[test]
    fn placeholder_names_do_not_collide() {
        let taken = rows(&[("new-property", ""), ("new-property-1", "")]);
        assert_eq!(unused_property_name(&taken), "new-property-2");
    }
}
