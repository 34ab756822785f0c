use quiz_funnel_editor::editor::{
    export_project, import_project, reduce, BlockUpdate, EditorAction, MemoryProjectStorage,
    ProjectStorage,
};
use quiz_funnel_editor::error::{EditorError, ImportError};
use quiz_funnel_editor::model::{Content, EditorState, Project};
use serde_json::{json, Value};

fn content(value: Value) -> Content {
    value.as_object().cloned().expect("object literal")
}

fn empty_project() -> EditorState {
    EditorState::default().apply(EditorAction::SetProject(Project::blank("Scenario")))
}

#[test]
fn page_lifecycle_from_empty_project() {
    let state = empty_project();
    assert!(state.current_project.as_ref().unwrap().pages.is_empty());
    assert!(state.current_page_id.is_none());

    let state = state.apply(EditorAction::AddPage);
    let pages = &state.current_project.as_ref().unwrap().pages;
    assert_eq!(pages.len(), 1);
    let page_id = pages[0].id.clone();
    assert_eq!(state.current_page_id.as_deref(), Some(page_id.as_str()));

    let state = state.apply(EditorAction::AddBlock {
        block_type: "heading".to_string(),
        content: Some(content(json!({ "text": "Hi" }))),
    });
    let page = state.current_page().unwrap();
    assert_eq!(page.blocks.len(), 1);
    assert_eq!(page.blocks[0].block_type, "heading");
    assert_eq!(page.blocks[0].content["text"], "Hi");
    assert_eq!(state.selected_block_id.as_deref(), Some(page.blocks[0].id.as_str()));

    let state = state.apply(EditorAction::DeletePage(page_id));
    assert!(state.current_project.as_ref().unwrap().pages.is_empty());
    assert!(state.current_page_id.is_none());
    assert!(state.selected_block_id.is_none());
}

#[test]
fn update_block_shallow_merges_and_restamps() {
    let state = empty_project().apply(EditorAction::AddPage).apply(EditorAction::AddBlock {
        block_type: "text".to_string(),
        content: Some(content(json!({ "bar": 2 }))),
    });
    let id = state.selected_block_id.clone().unwrap();
    let before = state.selected_block().unwrap().updated_at().unwrap();

    let state = reduce(
        &state,
        EditorAction::UpdateBlock {
            id,
            updates: BlockUpdate::content(content(json!({ "foo": 1 }))),
        },
    )
    .expect("block exists");

    let block = state.selected_block().unwrap();
    assert_eq!(Value::Object(block.content.clone()), json!({ "bar": 2, "foo": 1 }));
    assert!(block.updated_at().unwrap() > before);
    assert!(state.is_dirty);
}

#[test]
fn mutations_without_a_page_leave_state_untouched() {
    let no_project = EditorState::default();
    let add = EditorAction::AddBlock {
        block_type: "heading".to_string(),
        content: None,
    };
    assert_eq!(reduce(&no_project, add.clone()), Err(EditorError::NoProject));
    assert_eq!(no_project.apply(add.clone()), no_project);

    let no_page = empty_project();
    assert_eq!(reduce(&no_page, add.clone()), Err(EditorError::NoCurrentPage));
    let after = no_page.apply(add);
    assert_eq!(after, no_page);
    assert!(!after.is_dirty);
}

#[test]
fn deleted_blocks_stay_deleted() {
    let state = empty_project().apply(EditorAction::AddPage).apply(EditorAction::AddBlock {
        block_type: "button".to_string(),
        content: None,
    });
    let id = state.selected_block_id.clone().unwrap();
    let state = state
        .apply(EditorAction::DeleteBlock(id.clone()))
        .apply(EditorAction::UpdateBlock {
            id,
            updates: BlockUpdate::field("text", json!("Back again?")),
        });
    assert!(state.current_page().unwrap().blocks.is_empty());
}

#[test]
fn export_and_reload_reconstructs_the_project() {
    let state = EditorState::default()
        .apply(EditorAction::SetProject(Project::quiz_funnel("Round trip")));
    let project = state.current_project.clone().unwrap();

    let json = export_project(&project).unwrap();
    let reloaded = EditorState::default().apply(EditorAction::SetProject(import_project(&json).unwrap()));
    assert_eq!(reloaded.current_project, Some(project.clone()));

    let storage = MemoryProjectStorage::new();
    storage.save(&project).unwrap();
    assert_eq!(storage.load().unwrap(), Some(project));
}

#[test]
fn bad_imports_are_rejected() {
    assert!(matches!(import_project("[1, 2"), Err(ImportError::Malformed(_))));

    let duplicate_blocks = json!({
        "id": "p",
        "name": "Dupes",
        "pages": [{
            "id": "page-1",
            "title": "One",
            "blocks": [
                { "id": "b", "type": "text", "content": {} },
                { "id": "b", "type": "text", "content": {} }
            ]
        }]
    });
    assert!(matches!(
        import_project(&duplicate_blocks.to_string()),
        Err(ImportError::DuplicateBlock { block_id, .. }) if block_id == "b"
    ));
}

#[test]
fn imports_accept_props_as_content_alias() {
    let json = json!({
        "id": "p",
        "name": "Legacy",
        "pages": [{
            "id": "page-1",
            "title": "One",
            "blocks": [{ "id": "b", "type": "heading", "props": { "text": "Old" } }]
        }]
    });
    let project = import_project(&json.to_string()).unwrap();
    assert_eq!(project.pages[0].blocks[0].content["text"], "Old");
    assert!(project.pages[0].blocks[0].metadata.is_none());
}
