//! Project → page → block tree edited by the visual editor.

use std::collections::{BTreeMap, HashSet};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::error::ImportError;

/// Free-form, type-specific block properties.
pub type Content = Map<String, Value>;
/// CSS property → value overrides.
pub type Styles = BTreeMap<String, String>;

pub fn new_block_id() -> String {
    format!("block-{}", Uuid::now_v7())
}

pub fn new_page_id() -> String {
    format!("page-{}", Uuid::now_v7())
}

pub fn new_project_id() -> String {
    format!("project-{}", Uuid::now_v7())
}

/// Returns a timestamp strictly after `previous`, even when the clock has not moved.
pub fn next_timestamp(previous: Option<DateTime<Utc>>) -> DateTime<Utc> {
    let now = Utc::now();
    match previous {
        Some(previous) if now <= previous => previous + Duration::microseconds(1),
        _ => now,
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub pages: Vec<Page>,
    #[serde(default)]
    pub settings: Map<String, Value>,
}

impl Project {
    pub fn blank(name: impl Into<String>) -> Self {
        Self {
            id: new_project_id(),
            name: name.into(),
            pages: Vec::new(),
            settings: Map::new(),
        }
    }

    pub fn page(&self, page_id: &str) -> Option<&Page> {
        self.pages.iter().find(|p| p.id == page_id)
    }

    pub fn page_mut(&mut self, page_id: &str) -> Option<&mut Page> {
        self.pages.iter_mut().find(|p| p.id == page_id)
    }

    /// Checks id uniqueness for pages and for blocks within each page.
    pub fn validate(&self) -> Result<(), ImportError> {
        let mut page_ids = HashSet::new();
        for page in &self.pages {
            if !page_ids.insert(page.id.as_str()) {
                return Err(ImportError::DuplicatePage(page.id.clone()));
            }
            let mut block_ids = HashSet::new();
            for block in &page.blocks {
                if !block_ids.insert(block.id.as_str()) {
                    return Err(ImportError::DuplicateBlock {
                        page_id: page.id.clone(),
                        block_id: block.id.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub blocks: Vec<Block>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<Map<String, Value>>,
}

impl Page {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            blocks: Vec::new(),
            settings: None,
        }
    }

    pub fn block(&self, block_id: &str) -> Option<&Block> {
        self.blocks.iter().find(|b| b.id == block_id)
    }

    pub fn block_mut(&mut self, block_id: &str) -> Option<&mut Block> {
        self.blocks.iter_mut().find(|b| b.id == block_id)
    }

    pub fn position(&self, block_id: &str) -> Option<usize> {
        self.blocks.iter().position(|b| b.id == block_id)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    pub id: String,
    #[serde(rename = "type")]
    pub block_type: String,
    #[serde(default, alias = "props")]
    pub content: Content,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub styles: Option<Styles>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<BlockMetadata>,
}

impl Block {
    pub fn new(block_type: impl Into<String>, content: Content) -> Self {
        let now = Utc::now();
        Self {
            id: new_block_id(),
            block_type: block_type.into(),
            content,
            styles: None,
            metadata: Some(BlockMetadata {
                created_at: now,
                updated_at: now,
            }),
        }
    }

    /// Copy with a fresh id and fresh metadata.
    pub fn duplicate(&self) -> Self {
        let mut copy = Block::new(self.block_type.clone(), self.content.clone());
        copy.styles = self.styles.clone();
        copy
    }

    /// Stamps `updated_at`, creating metadata for blocks imported without it.
    pub fn touch(&mut self) {
        match self.metadata.as_mut() {
            Some(metadata) => metadata.updated_at = next_timestamp(Some(metadata.updated_at)),
            None => {
                let now = Utc::now();
                self.metadata = Some(BlockMetadata {
                    created_at: now,
                    updated_at: now,
                });
            }
        }
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.metadata.as_ref().map(|m| m.updated_at)
    }

    pub fn text(&self, key: &str) -> Option<&str> {
        self.content.get(key).and_then(Value::as_str)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockMetadata {
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Ephemeral editor cursor over a project.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EditorState {
    pub current_project: Option<Project>,
    pub current_page_id: Option<String>,
    pub selected_block_id: Option<String>,
    pub is_editing: bool,
    pub is_dirty: bool,
}

impl EditorState {
    pub fn with_project(project: Project) -> Self {
        let current_page_id = project.pages.first().map(|p| p.id.clone());
        Self {
            current_project: Some(project),
            current_page_id,
            ..Self::default()
        }
    }

    pub fn current_page(&self) -> Option<&Page> {
        let page_id = self.current_page_id.as_deref()?;
        self.current_project.as_ref()?.page(page_id)
    }

    pub fn selected_block(&self) -> Option<&Block> {
        let block_id = self.selected_block_id.as_deref()?;
        self.current_page()?.block(block_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn next_timestamp_is_strictly_increasing() {
        let future = Utc::now() + Duration::seconds(60);
        let next = next_timestamp(Some(future));
        assert!(next > future);
    }

    #[test]
    fn block_serializes_type_key_and_camel_case_metadata() {
        let block = Block::new("heading", json!({ "text": "Hi" }).as_object().cloned().unwrap());
        let value = serde_json::to_value(&block).unwrap();
        assert_eq!(value["type"], "heading");
        assert!(value["metadata"]["updatedAt"].is_string());
        assert!(value.get("styles").is_none());
    }

    #[test]
    fn block_accepts_props_alias() {
        let block: Block = serde_json::from_value(json!({
            "id": "b1",
            "type": "text",
            "props": { "content": "hello" }
        }))
        .unwrap();
        assert_eq!(block.text("content"), Some("hello"));
        assert!(block.metadata.is_none());
    }

    #[test]
    fn touch_creates_missing_metadata() {
        let mut block: Block =
            serde_json::from_value(json!({ "id": "b1", "type": "text" })).unwrap();
        block.touch();
        assert!(block.updated_at().is_some());
    }

    #[test]
    fn duplicate_block_ids_fail_validation() {
        let mut page = Page::new("p1", "Intro");
        let block = Block::new("text", Content::new());
        page.blocks.push(block.clone());
        page.blocks.push(block);
        let mut project = Project::blank("Funnel");
        project.pages.push(page);

        let err = project.validate().expect_err("duplicate block must fail");
        assert!(matches!(err, ImportError::DuplicateBlock { .. }));
    }

    #[test]
    fn editor_state_resolves_selected_block() {
        let mut page = Page::new("p1", "Intro");
        let block = Block::new("text", Content::new());
        let block_id = block.id.clone();
        page.blocks.push(block);
        let mut project = Project::blank("Funnel");
        project.pages.push(page);

        let mut state = EditorState::with_project(project);
        assert_eq!(state.current_page_id.as_deref(), Some("p1"));
        state.selected_block_id = Some(block_id.clone());
        assert_eq!(state.selected_block().map(|b| b.id.as_str()), Some(block_id.as_str()));
    }
}
