use crate::model::{Block, Content, Project, Styles};

/// Partial block change. `content` and `styles` merge key by key; an empty
/// style value removes that property.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BlockUpdate {
    pub block_type: Option<String>,
    pub content: Option<Content>,
    pub styles: Option<Styles>,
}

impl BlockUpdate {
    pub fn content(content: Content) -> Self {
        Self {
            content: Some(content),
            ..Self::default()
        }
    }

    pub fn field(key: impl Into<String>, value: serde_json::Value) -> Self {
        let mut content = Content::new();
        content.insert(key.into(), value);
        Self::content(content)
    }

    pub fn styles(styles: Styles) -> Self {
        Self {
            styles: Some(styles),
            ..Self::default()
        }
    }

    pub(crate) fn apply_to(self, block: &mut Block) {
        if let Some(block_type) = self.block_type {
            block.block_type = block_type;
        }
        if let Some(content) = self.content {
            block.content.extend(content);
        }
        if let Some(styles) = self.styles {
            let target = block.styles.get_or_insert_with(Styles::new);
            for (property, value) in styles {
                if value.is_empty() {
                    target.remove(&property);
                } else {
                    target.insert(property, value);
                }
            }
            if target.is_empty() {
                block.styles = None;
            }
        }
        block.touch();
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum EditorAction {
    SetProject(Project),
    SetCurrentPage(String),
    SelectBlock(String),
    DeselectBlock,
    AddBlock {
        block_type: String,
        content: Option<Content>,
    },
    UpdateBlock {
        id: String,
        updates: BlockUpdate,
    },
    DeleteBlock(String),
    /// Moves a block of the current page; `to_index` is clamped to the page.
    MoveBlock {
        id: String,
        to_index: usize,
    },
    DuplicateBlock(String),
    AddPage,
    DeletePage(String),
    RenamePage {
        id: String,
        title: String,
    },
    SetDirty(bool),
}

impl EditorAction {
    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            EditorAction::SetProject(_) => "SetProject",
            EditorAction::SetCurrentPage(_) => "SetCurrentPage",
            EditorAction::SelectBlock(_) => "SelectBlock",
            EditorAction::DeselectBlock => "DeselectBlock",
            EditorAction::AddBlock { .. } => "AddBlock",
            EditorAction::UpdateBlock { .. } => "UpdateBlock",
            EditorAction::DeleteBlock(_) => "DeleteBlock",
            EditorAction::MoveBlock { .. } => "MoveBlock",
            EditorAction::DuplicateBlock(_) => "DuplicateBlock",
            EditorAction::AddPage => "AddPage",
            EditorAction::DeletePage(_) => "DeletePage",
            EditorAction::RenamePage { .. } => "RenamePage",
            EditorAction::SetDirty(_) => "SetDirty",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn block() -> Block {
        let mut block = Block::new("text", json!({ "bar": 2 }).as_object().cloned().unwrap());
        let mut styles = Styles::new();
        styles.insert("color".to_string(), "red".to_string());
        block.styles = Some(styles);
        block
    }

    #[test]
    fn content_is_shallow_merged() {
        let mut block = block();
        BlockUpdate::field("foo", json!(1)).apply_to(&mut block);
        assert_eq!(block.content["bar"], 2);
        assert_eq!(block.content["foo"], 1);
    }

    #[test]
    fn empty_style_value_removes_property() {
        let mut block = block();
        let mut styles = Styles::new();
        styles.insert("color".to_string(), String::new());
        BlockUpdate::styles(styles).apply_to(&mut block);
        assert!(block.styles.is_none());
    }

    #[test]
    fn type_change_keeps_content() {
        let mut block = block();
        BlockUpdate {
            block_type: Some("heading".to_string()),
            ..BlockUpdate::default()
        }
        .apply_to(&mut block);
        assert_eq!(block.block_type, "heading");
        assert_eq!(block.content["bar"], 2);
    }
}
