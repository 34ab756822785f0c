use dioxus_logger::tracing::{debug, warn};

use super::action::EditorAction;
use crate::error::EditorError;
use crate::model::{new_page_id, Block, EditorState, Page, Project};
use crate::templates::starter_content;

/// Pure state transition. Actions that cannot apply return an error and
/// leave `state` untouched.
pub fn reduce(state: &EditorState, action: EditorAction) -> Result<EditorState, EditorError> {
    let mut next = state.clone();

    match action {
        EditorAction::SetProject(project) => {
            next = EditorState::with_project(project);
        }
        EditorAction::SetCurrentPage(page_id) => {
            let project = next.current_project.as_ref().ok_or(EditorError::NoProject)?;
            if project.page(&page_id).is_none() {
                return Err(EditorError::PageNotFound(page_id));
            }
            next.current_page_id = Some(page_id);
            next.selected_block_id = None;
            next.is_editing = false;
        }
        EditorAction::SelectBlock(block_id) => {
            let page = current_page(&next)?;
            if page.block(&block_id).is_none() {
                return Err(EditorError::BlockNotFound(block_id));
            }
            next.selected_block_id = Some(block_id);
            next.is_editing = true;
        }
        EditorAction::DeselectBlock => {
            next.selected_block_id = None;
            next.is_editing = false;
        }
        EditorAction::AddBlock {
            block_type,
            content,
        } => {
            let content = content.unwrap_or_else(|| starter_content(&block_type));
            let block = Block::new(block_type, content);
            let block_id = block.id.clone();
            current_page_mut(&mut next)?.blocks.push(block);
            next.selected_block_id = Some(block_id);
            next.is_editing = true;
            next.is_dirty = true;
        }
        EditorAction::UpdateBlock { id, updates } => {
            let block = current_page_mut(&mut next)?
                .block_mut(&id)
                .ok_or(EditorError::BlockNotFound(id))?;
            updates.apply_to(block);
            next.is_dirty = true;
        }
        EditorAction::DeleteBlock(block_id) => {
            let page = current_page_mut(&mut next)?;
            let position = page
                .position(&block_id)
                .ok_or_else(|| EditorError::BlockNotFound(block_id.clone()))?;
            page.blocks.remove(position);
            if next.selected_block_id.as_deref() == Some(block_id.as_str()) {
                next.selected_block_id = None;
                next.is_editing = false;
            }
            next.is_dirty = true;
        }
        EditorAction::MoveBlock { id, to_index } => {
            let page = current_page_mut(&mut next)?;
            let from = page
                .position(&id)
                .ok_or(EditorError::BlockNotFound(id))?;
            let block = page.blocks.remove(from);
            let to = to_index.min(page.blocks.len());
            page.blocks.insert(to, block);
            next.is_dirty = true;
        }
        EditorAction::DuplicateBlock(block_id) => {
            let page = current_page_mut(&mut next)?;
            let position = page
                .position(&block_id)
                .ok_or(EditorError::BlockNotFound(block_id))?;
            let copy = page.blocks[position].duplicate();
            let copy_id = copy.id.clone();
            page.blocks.insert(position + 1, copy);
            next.selected_block_id = Some(copy_id);
            next.is_editing = true;
            next.is_dirty = true;
        }
        EditorAction::AddPage => {
            let project = next.current_project.as_mut().ok_or(EditorError::NoProject)?;
            let page = Page::new(new_page_id(), format!("Page {}", project.pages.len() + 1));
            next.current_page_id = Some(page.id.clone());
            project.pages.push(page);
            next.selected_block_id = None;
            next.is_editing = false;
            next.is_dirty = true;
        }
        EditorAction::DeletePage(page_id) => {
            let project = next.current_project.as_mut().ok_or(EditorError::NoProject)?;
            let position = project
                .pages
                .iter()
                .position(|p| p.id == page_id)
                .ok_or_else(|| EditorError::PageNotFound(page_id.clone()))?;
            project.pages.remove(position);
            if next.current_page_id.as_deref() == Some(page_id.as_str()) {
                next.current_page_id = project.pages.first().map(|p| p.id.clone());
            }
            next.selected_block_id = None;
            next.is_editing = false;
            next.is_dirty = true;
        }
        EditorAction::RenamePage { id, title } => {
            let page = project_mut(&mut next)?
                .page_mut(&id)
                .ok_or(EditorError::PageNotFound(id))?;
            page.title = title;
            next.is_dirty = true;
        }
        EditorAction::SetDirty(dirty) => {
            next.is_dirty = dirty;
        }
    }

    Ok(next)
}

impl EditorState {
    /// Applies `action`, logging and keeping the current state if it is
    /// rejected.
    pub fn apply(&self, action: EditorAction) -> EditorState {
        let name = action.name();
        match reduce(self, action) {
            Ok(next) => {
                debug!("Applied {}", name);
                next
            }
            Err(e) => {
                warn!("Ignoring {}: {}", name, e);
                self.clone()
            }
        }
    }
}

fn project_mut(state: &mut EditorState) -> Result<&mut Project, EditorError> {
    state.current_project.as_mut().ok_or(EditorError::NoProject)
}

fn current_page(state: &EditorState) -> Result<&Page, EditorError> {
    let project = state.current_project.as_ref().ok_or(EditorError::NoProject)?;
    let page_id = state
        .current_page_id
        .as_deref()
        .ok_or(EditorError::NoCurrentPage)?;
    project.page(page_id).ok_or(EditorError::NoCurrentPage)
}

fn current_page_mut(state: &mut EditorState) -> Result<&mut Page, EditorError> {
    let project = state.current_project.as_mut().ok_or(EditorError::NoProject)?;
    let page_id = state
        .current_page_id
        .as_deref()
        .ok_or(EditorError::NoCurrentPage)?;
    project.page_mut(page_id).ok_or(EditorError::NoCurrentPage)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::BlockUpdate;
    use crate::model::Content;
    use serde_json::{json, Value};

    fn content(value: Value) -> Content {
        value.as_object().cloned().unwrap_or_default()
    }

    fn with_page() -> EditorState {
        let state = EditorState::default().apply(EditorAction::SetProject(Project::blank("Quiz")));
        state.apply(EditorAction::AddPage)
    }

    fn add(state: &EditorState, block_type: &str, value: Value) -> (EditorState, String) {
        let next = state.apply(EditorAction::AddBlock {
            block_type: block_type.to_string(),
            content: Some(content(value)),
        });
        let id = next.selected_block_id.clone().unwrap();
        (next, id)
    }

    #[test]
    fn add_block_without_project_is_rejected() {
        let state = EditorState::default();
        let err = reduce(
            &state,
            EditorAction::AddBlock {
                block_type: "heading".to_string(),
                content: None,
            },
        )
        .unwrap_err();
        assert_eq!(err, EditorError::NoProject);
        assert_eq!(
            state.apply(EditorAction::AddBlock {
                block_type: "heading".to_string(),
                content: None,
            }),
            state
        );
    }

    #[test]
    fn add_block_without_page_keeps_dirty_flag() {
        let state = EditorState::default().apply(EditorAction::SetProject(Project::blank("Quiz")));
        let err = reduce(
            &state,
            EditorAction::AddBlock {
                block_type: "text".to_string(),
                content: None,
            },
        )
        .unwrap_err();
        assert_eq!(err, EditorError::NoCurrentPage);
        assert!(!state.is_dirty);
    }

    #[test]
    fn add_block_uses_kind_defaults_when_content_missing() {
        let state = with_page().apply(EditorAction::AddBlock {
            block_type: "question".to_string(),
            content: None,
        });
        let block = state.selected_block().unwrap();
        assert_eq!(block.content["multipleSelection"], false);
        assert_eq!(block.content["maxSelections"], 1);
    }

    #[test]
    fn update_after_delete_does_not_recreate() {
        let (state, id) = add(&with_page(), "text", json!({ "content": "x" }));
        let state = state.apply(EditorAction::DeleteBlock(id.clone()));
        assert!(state.selected_block_id.is_none());

        let err = reduce(
            &state,
            EditorAction::UpdateBlock {
                id: id.clone(),
                updates: BlockUpdate::field("content", json!("y")),
            },
        )
        .unwrap_err();
        assert_eq!(err, EditorError::BlockNotFound(id));
        assert!(state.current_page().unwrap().blocks.is_empty());
    }

    #[test]
    fn select_block_is_idempotent() {
        let (state, id) = add(&with_page(), "text", json!({}));
        let state = state.apply(EditorAction::DeselectBlock);
        let once = state.apply(EditorAction::SelectBlock(id.clone()));
        let twice = once.apply(EditorAction::SelectBlock(id));
        assert_eq!(once, twice);
        assert!(once.is_editing);
    }

    #[test]
    fn selecting_unknown_block_is_rejected() {
        let state = with_page();
        assert!(matches!(
            reduce(&state, EditorAction::SelectBlock("ghost".to_string())),
            Err(EditorError::BlockNotFound(_))
        ));
    }

    #[test]
    fn update_merges_content_and_advances_timestamp() {
        let (state, id) = add(&with_page(), "text", json!({ "bar": 2 }));
        let before = state.selected_block().unwrap().updated_at().unwrap();

        let state = state.apply(EditorAction::UpdateBlock {
            id,
            updates: BlockUpdate::field("foo", json!(1)),
        });
        let block = state.selected_block().unwrap();
        assert_eq!(Value::Object(block.content.clone()), json!({ "bar": 2, "foo": 1 }));
        assert!(block.updated_at().unwrap() > before);
    }

    #[test]
    fn move_block_reorders_and_clamps() {
        let state = with_page();
        let (state, a) = add(&state, "text", json!({}));
        let (state, b) = add(&state, "text", json!({}));
        let (state, c) = add(&state, "text", json!({}));

        let state = state.apply(EditorAction::MoveBlock {
            id: a.clone(),
            to_index: 99,
        });
        let order: Vec<&str> = state
            .current_page()
            .unwrap()
            .blocks
            .iter()
            .map(|b| b.id.as_str())
            .collect();
        assert_eq!(order, vec![b.as_str(), c.as_str(), a.as_str()]);
    }

    #[test]
    fn duplicate_inserts_after_source_and_selects_copy() {
        let (state, id) = add(&with_page(), "heading", json!({ "text": "Hi" }));
        let state = state.apply(EditorAction::DuplicateBlock(id.clone()));
        let page = state.current_page().unwrap();
        assert_eq!(page.blocks.len(), 2);
        assert_eq!(page.blocks[0].id, id);
        assert_ne!(page.blocks[1].id, id);
        assert_eq!(page.blocks[1].content["text"], "Hi");
        assert_eq!(state.selected_block_id.as_deref(), Some(page.blocks[1].id.as_str()));
    }

    #[test]
    fn pages_are_numbered_and_deleting_current_falls_back() {
        let state = with_page().apply(EditorAction::AddPage);
        let project = state.current_project.as_ref().unwrap();
        assert_eq!(project.pages[1].title, "Page 2");
        let first = project.pages[0].id.clone();
        let second = project.pages[1].id.clone();
        assert_eq!(state.current_page_id.as_deref(), Some(second.as_str()));

        let state = state.apply(EditorAction::DeletePage(second));
        assert_eq!(state.current_page_id, Some(first));
    }

    #[test]
    fn set_project_clears_dirty_and_selects_first_page() {
        let (state, _) = add(&with_page(), "text", json!({}));
        assert!(state.is_dirty);
        let project = state.current_project.clone().unwrap();
        let state = state.apply(EditorAction::SetProject(project.clone()));
        assert!(!state.is_dirty);
        assert!(state.selected_block_id.is_none());
        assert_eq!(state.current_page_id.as_deref(), Some(project.pages[0].id.as_str()));
    }

    #[test]
    fn switching_pages_clears_selection() {
        let (state, _) = add(&with_page(), "text", json!({}));
        let first = state.current_page_id.clone().unwrap();
        let state = state.apply(EditorAction::AddPage);
        let state = state.apply(EditorAction::SetCurrentPage(first.clone()));
        assert_eq!(state.current_page_id, Some(first));
        assert!(state.selected_block_id.is_none());

        assert!(matches!(
            reduce(&state, EditorAction::SetCurrentPage("nope".to_string())),
            Err(EditorError::PageNotFound(_))
        ));
    }

    #[test]
    fn rename_page_marks_dirty() {
        let state = with_page().apply(EditorAction::SetDirty(false));
        let id = state.current_page_id.clone().unwrap();
        let state = state.apply(EditorAction::RenamePage {
            id,
            title: "Intro".to_string(),
        });
        assert_eq!(state.current_page().unwrap().title, "Intro");
        assert!(state.is_dirty);
    }
}
