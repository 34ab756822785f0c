use dioxus::prelude::*;
use serde_json::{Number, Value};

use super::styles_editor::StyleInput;
use crate::editor::{use_editor, BlockUpdate};
use crate::renderer::builtin_registry;
use crate::schema::{PropertyKind, PropertySchema};

const MUTED_TEXT: &str = "#64748b";

/// Converts the raw text of an input into the JSON value stored for `kind`.
pub fn parse_field(kind: PropertyKind, raw: &str) -> Result<Value, String> {
    match kind {
        PropertyKind::Number | PropertyKind::Range => {
            let number: f64 = raw
                .trim()
                .parse()
                .map_err(|_| format!("`{raw}` is not a number"))?;
            // numeric props are integers, so fractions are rounded here
            if !number.is_finite() || number.abs() >= i64::MAX as f64 {
                return Err(format!("`{raw}` is out of range"));
            }
            Ok(Value::Number(Number::from(number.round() as i64)))
        }
        PropertyKind::Boolean => Ok(Value::Bool(raw == "true")),
        PropertyKind::List => match serde_json::from_str(raw) {
            Ok(Value::Array(items)) => Ok(Value::Array(items)),
            Ok(_) => Err("expected a JSON list".to_string()),
            Err(e) => Err(e.to_string()),
        },
        PropertyKind::Json => serde_json::from_str(raw).map_err(|e| e.to_string()),
        _ => Ok(Value::String(raw.to_string())),
    }
}

/// Text shown in the input for a stored value.
pub fn display_field(kind: PropertyKind, value: Option<&Value>) -> String {
    match (kind, value) {
        (_, None) => String::new(),
        (PropertyKind::List | PropertyKind::Json, Some(value)) => {
            serde_json::to_string_pretty(value).unwrap_or_default()
        }
        (_, Some(Value::String(s))) => s.clone(),
        (_, Some(value)) => value.to_string(),
    }
}

#[component]
pub fn PropertiesPanel() -> Element {
    let store = use_editor();
    let state = store.state();
    let Some(block) = state.read().selected_block().cloned() else {
        return rsx! {
            div {
                style: "color: {MUTED_TEXT}; text-align: center; padding: 32px;",
                "Select a block"
            }
        };
    };

    let definition = builtin_registry().definition(&block.block_type);
    let title = definition
        .map(|d| d.name.to_string())
        .unwrap_or_else(|| block.block_type.clone());
    let fields: Vec<PropertySchema> = definition
        .map(|d| d.properties_schema.clone())
        .unwrap_or_default();

    let duplicate = store.clone();
    let delete = store.clone();
    let duplicate_id = block.id.clone();
    let delete_id = block.id.clone();

    rsx! {
        div { class: "properties-panel",
            h1 { style: "color: {MUTED_TEXT}; text-align: center; margin: 24px 0 4px 0; font-size: 18px;", "{title}" }
            div { style: "text-align:center; font-size: 11px; color: #999; margin-bottom: 12px;", "{block.id}" }

            div {
                style: "display:flex;flex-direction:column;gap:12px;padding-inline:12px;",
                if fields.is_empty() {
                    RawContentEditor { block_id: block.id.clone(), content: Value::Object(block.content.clone()) }
                }
                for field in fields {
                    FieldEditor {
                        key: "{block.id}-{field.key}",
                        block_id: block.id.clone(),
                        value: block.content.get(field.key).cloned(),
                        field: field.clone(),
                    }
                }
            }

            h1 { style: "color: {MUTED_TEXT}; text-align: center; margin: 24px 0 12px 0; font-size: 18px;", "Styles" }

            StyleInput { block_id: block.id.clone() }

            div { style: "margin-top: 24px; padding-inline: 12px; display: flex; flex-direction: column; gap: 8px;",
                button {
                    onclick: move |_| duplicate.duplicate_block(&duplicate_id),
                    style: "width: 100%; padding: 8px; cursor: pointer;",
                    "Duplicate Block"
                }
                button {
                    onclick: move |_| delete.delete_block(&delete_id),
                    style: "width: 100%; padding: 8px; cursor: pointer;
                            background: #f44336; color: white; border: none; border-radius: 4px;",
                    "Delete Block"
                }
            }
        }
    }
}

#[component]
fn FieldEditor(block_id: String, field: PropertySchema, value: Option<Value>) -> Element {
    let store = use_editor();
    let mut error = use_signal(|| None::<String>);
    let current = display_field(field.kind, value.as_ref());
    let kind = field.kind;
    let key = field.key;

    let commit = move |raw: String| match parse_field(kind, &raw) {
        Ok(parsed) => {
            error.set(None);
            store.update_block(&block_id, BlockUpdate::field(key, parsed));
        }
        Err(message) => error.set(Some(message)),
    };

    let input = match field.kind {
        PropertyKind::Textarea | PropertyKind::List | PropertyKind::Json => {
            let rows = field.rows.unwrap_or(if kind == PropertyKind::Textarea { 3 } else { 6 });
            let font = if kind == PropertyKind::Textarea { "inherit" } else { "monospace" };
            let mut commit = commit.clone();
            rsx! {
                textarea {
                    rows: "{rows}",
                    style: "font-family: {font}; font-size: 12px;",
                    placeholder: field.placeholder.unwrap_or_default(),
                    value: "{current}",
                    onchange: move |e| commit(e.value()),
                }
            }
        }
        PropertyKind::Boolean => {
            let mut commit = commit.clone();
            rsx! {
                input {
                    r#type: "checkbox",
                    checked: value.as_ref().and_then(Value::as_bool).unwrap_or(false),
                    onchange: move |e| commit(e.checked().to_string()),
                }
            }
        }
        PropertyKind::Select => {
            let mut commit = commit.clone();
            rsx! {
                select {
                    onchange: move |e| commit(e.value()),
                    for choice in field.options.iter() {
                        option {
                            value: choice.value,
                            selected: choice.value == current,
                            "{choice.label}"
                        }
                    }
                }
            }
        }
        other => {
            let input_type = match other {
                PropertyKind::Number => "number",
                PropertyKind::Range => "range",
                PropertyKind::Color => "color",
                PropertyKind::Url | PropertyKind::Image => "url",
                _ => "text",
            };
            let min = field.min.map(|m| m.to_string()).unwrap_or_default();
            let max = field.max.map(|m| m.to_string()).unwrap_or_default();
            let mut commit = commit.clone();
            rsx! {
                input {
                    r#type: input_type,
                    value: "{current}",
                    min: "{min}",
                    max: "{max}",
                    placeholder: field.placeholder.unwrap_or_default(),
                    oninput: move |e| commit(e.value()),
                }
            }
        }
    };

    rsx! {
        div { style: "display: flex; flex-direction: column; gap: 4px;",
            label { style: "font-size: 12px; font-weight: 600;", "{field.label}" }
            {input}
            if let Some(help) = field.help_text {
                span { style: "font-size: 11px; color: #888;", "{help}" }
            }
            if let Some(message) = error() {
                span { style: "font-size: 11px; color: #c62828;", "{message}" }
            }
        }
    }
}

/// Plain JSON editing for blocks of unregistered types.
#[component]
fn RawContentEditor(block_id: String, content: Value) -> Element {
    let store = use_editor();
    let mut error = use_signal(|| None::<String>);
    let text = serde_json::to_string_pretty(&content).unwrap_or_default();

    rsx! {
        div { style: "display: flex; flex-direction: column; gap: 4px;",
            label { style: "font-size: 12px; font-weight: 600;", "Content (JSON)" }
            textarea {
                rows: "10",
                style: "font-family: monospace; font-size: 12px;",
                value: "{text}",
                onchange: move |e| match serde_json::from_str::<Value>(&e.value()) {
                    Ok(Value::Object(map)) => {
                        error.set(None);
                        store.update_block(&block_id, BlockUpdate::content(map));
                    }
                    Ok(_) => error.set(Some("expected a JSON object".to_string())),
                    Err(e) => error.set(Some(e.to_string())),
                },
            }
            if let Some(message) = error() {
                span { style: "font-size: 11px; color: #c62828;", "{message}" }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn numbers_are_stored_as_integers() {
        assert_eq!(parse_field(PropertyKind::Number, "60").unwrap(), json!(60));
        assert_eq!(parse_field(PropertyKind::Range, " 12.5 ").unwrap(), json!(13));
        assert_eq!(parse_field(PropertyKind::Range, "12.4").unwrap(), json!(12));
        assert!(parse_field(PropertyKind::Number, "sixty").is_err());
        assert!(parse_field(PropertyKind::Number, "1e30").is_err());
    }

    #[test]
    fn lists_must_be_json_arrays() {
        assert_eq!(
            parse_field(PropertyKind::List, r#"["a", "b"]"#).unwrap(),
            json!(["a", "b"])
        );
        assert!(parse_field(PropertyKind::List, r#"{"a": 1}"#).is_err());
        assert!(parse_field(PropertyKind::List, "[").is_err());
    }

    #[test]
    fn text_kinds_store_strings_verbatim() {
        assert_eq!(
            parse_field(PropertyKind::Color, "#ff0000").unwrap(),
            json!("#ff0000")
        );
        assert_eq!(parse_field(PropertyKind::Boolean, "true").unwrap(), json!(true));
    }

    #[test]
    fn display_pretty_prints_structured_values() {
        let shown = display_field(PropertyKind::List, Some(&json!([1])));
        assert_eq!(shown, "[\n  1\n]");
        assert_eq!(display_field(PropertyKind::Text, Some(&json!("hi"))), "hi");
        assert_eq!(display_field(PropertyKind::Number, Some(&json!(3))), "3");
        assert_eq!(display_field(PropertyKind::Text, None), "");
    }
}
