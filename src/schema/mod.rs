//! Block prop schema: typed props per block kind plus the editable-field
//! descriptors the property panel is built from.
//!
//! Defaults live only in each props struct's `Default`; `BlockDefinition`
//! serializes them on demand, so the palette, the property panel and the
//! dispatcher always agree.

mod content;
mod offer;
mod props;
mod quiz;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::PropIssue;
use crate::model::Content;

pub use content::*;
pub use offer::*;
pub use props::*;
pub use quiz::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PropertyKind {
    Text,
    Textarea,
    Number,
    Range,
    Boolean,
    Color,
    Select,
    Url,
    Image,
    List,
    Json,
}

impl PropertyKind {
    fn expected(self) -> &'static str {
        match self {
            PropertyKind::Text
            | PropertyKind::Textarea
            | PropertyKind::Color
            | PropertyKind::Select
            | PropertyKind::Url
            | PropertyKind::Image => "a string",
            PropertyKind::Number | PropertyKind::Range => "a whole number",
            PropertyKind::Boolean => "a boolean",
            PropertyKind::List => "a list",
            PropertyKind::Json => "any JSON value",
        }
    }

    fn accepts(self, value: &Value) -> bool {
        match self {
            // every numeric prop is an integer field
            PropertyKind::Number | PropertyKind::Range => value.is_i64() || value.is_u64(),
            PropertyKind::Boolean => value.is_boolean(),
            PropertyKind::List => value.is_array(),
            PropertyKind::Json => true,
            _ => value.is_string(),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    pub label: &'static str,
    pub value: &'static str,
}

/// One editable field of a block kind.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertySchema {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: PropertyKind,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<SelectOption>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub rows: Option<u32>,
    pub placeholder: Option<&'static str>,
    pub help_text: Option<&'static str>,
    /// Older names for this key, read when the key itself is absent.
    #[serde(skip)]
    pub legacy_keys: &'static [&'static str],
}

impl PropertySchema {
    pub fn new(key: &'static str, label: &'static str, kind: PropertyKind) -> Self {
        Self {
            key,
            label,
            kind,
            options: Vec::new(),
            min: None,
            max: None,
            rows: None,
            placeholder: None,
            help_text: None,
            legacy_keys: &[],
        }
    }

    pub fn text(key: &'static str, label: &'static str) -> Self {
        Self::new(key, label, PropertyKind::Text)
    }

    pub fn textarea(key: &'static str, label: &'static str, rows: u32) -> Self {
        Self {
            rows: Some(rows),
            ..Self::new(key, label, PropertyKind::Textarea)
        }
    }

    pub fn select(key: &'static str, label: &'static str, options: &[(&'static str, &'static str)]) -> Self {
        Self {
            options: options
                .iter()
                .map(|&(label, value)| SelectOption { label, value })
                .collect(),
            ..Self::new(key, label, PropertyKind::Select)
        }
    }

    pub fn number(key: &'static str, label: &'static str, min: f64, max: f64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
            ..Self::new(key, label, PropertyKind::Number)
        }
    }

    pub fn placeholder(mut self, placeholder: &'static str) -> Self {
        self.placeholder = Some(placeholder);
        self
    }

    pub fn help(mut self, help_text: &'static str) -> Self {
        self.help_text = Some(help_text);
        self
    }

    pub fn legacy(mut self, keys: &'static [&'static str]) -> Self {
        self.legacy_keys = keys;
        self
    }

    /// Checks one value against this field's kind, options and range.
    pub fn check(&self, value: &Value) -> Result<(), PropIssue> {
        if !self.kind.accepts(value) {
            return Err(PropIssue::WrongType {
                key: self.key.to_string(),
                expected: self.kind.expected(),
                found: json_kind(value),
            });
        }

        if self.kind == PropertyKind::Select && !self.options.is_empty() {
            let chosen = value.as_str().unwrap_or_default();
            if !self.options.iter().any(|o| o.value == chosen) {
                return Err(PropIssue::UnknownOption {
                    key: self.key.to_string(),
                    value: chosen.to_string(),
                });
            }
        }

        if let Some(number) = value.as_f64() {
            let min = self.min.unwrap_or(f64::MIN);
            let max = self.max.unwrap_or(f64::MAX);
            if number < min || number > max {
                return Err(PropIssue::OutOfRange {
                    key: self.key.to_string(),
                    value: number,
                    min,
                    max,
                });
            }
        }

        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockCategory {
    Content,
    Layout,
    Quiz,
    Result,
    Offer,
}

impl BlockCategory {
    pub const ALL: [BlockCategory; 5] = [
        BlockCategory::Content,
        BlockCategory::Layout,
        BlockCategory::Quiz,
        BlockCategory::Result,
        BlockCategory::Offer,
    ];

    pub fn label(self) -> &'static str {
        match self {
            BlockCategory::Content => "Content",
            BlockCategory::Layout => "Layout",
            BlockCategory::Quiz => "Quiz",
            BlockCategory::Result => "Result",
            BlockCategory::Offer => "Sales offer",
        }
    }
}

/// Static catalog entry describing a block kind for the editor UI.
#[derive(Clone, Debug)]
pub struct BlockDefinition {
    pub block_type: &'static str,
    pub name: &'static str,
    pub icon: &'static str,
    pub category: BlockCategory,
    pub aliases: &'static [&'static str],
    pub properties_schema: Vec<PropertySchema>,
    default_content: fn() -> Content,
}

impl BlockDefinition {
    pub fn default_content(&self) -> Content {
        (self.default_content)()
    }

    pub fn field(&self, key: &str) -> Option<&PropertySchema> {
        self.properties_schema.iter().find(|f| f.key == key)
    }

    /// Splits `props` into the values that match the schema and the issues
    /// found in the rest. Legacy keys are renamed to their current key first.
    /// Keys the schema does not describe pass through.
    pub fn validate(&self, props: &Content) -> (Content, Vec<PropIssue>) {
        let mut accepted = Content::new();
        let mut issues = Vec::new();
        let props = self.rename_legacy_keys(props, &mut issues);

        for (key, value) in &props {
            match self.field(key).map(|field| field.check(value)) {
                Some(Err(issue)) => issues.push(issue),
                Some(Ok(())) | None => {
                    accepted.insert(key.clone(), value.clone());
                }
            }
        }

        (accepted, issues)
    }

    /// The first legacy key present stands in for a missing current key; any
    /// other legacy key is dropped with a [`PropIssue::Superseded`].
    fn rename_legacy_keys(&self, props: &Content, issues: &mut Vec<PropIssue>) -> Content {
        let mut props = props.clone();
        for field in &self.properties_schema {
            for &legacy in field.legacy_keys {
                let Some(value) = props.remove(legacy) else {
                    continue;
                };
                if props.contains_key(field.key) {
                    issues.push(PropIssue::Superseded {
                        key: legacy.to_string(),
                        by: field.key.to_string(),
                    });
                } else {
                    props.insert(field.key.to_string(), value);
                }
            }
        }
        props
    }
}

/// A strongly typed block kind that can be registered with the dispatcher.
pub trait BlockKind: Default + Serialize + DeserializeOwned + Into<BlockProps> {
    const TYPE: &'static str;
    const NAME: &'static str;
    const ICON: &'static str;
    const CATEGORY: BlockCategory;
    const ALIASES: &'static [&'static str] = &[];

    fn fields() -> Vec<PropertySchema>;
}

pub fn definition_of<T: BlockKind>() -> BlockDefinition {
    BlockDefinition {
        block_type: T::TYPE,
        name: T::NAME,
        icon: T::ICON,
        category: T::CATEGORY,
        aliases: T::ALIASES,
        properties_schema: T::fields(),
        default_content: default_content_of::<T>,
    }
}

fn default_content_of<T: BlockKind>() -> Content {
    match serde_json::to_value(T::default()) {
        Ok(Value::Object(map)) => map,
        _ => Content::new(),
    }
}
