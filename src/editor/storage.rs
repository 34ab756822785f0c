use std::cell::RefCell;
use std::rc::Rc;

use crate::error::{ImportError, StorageError};
use crate::model::Project;
use crate::storage;

/// Where the editor keeps the working project between sessions.
pub trait ProjectStorage {
    fn save(&self, project: &Project) -> Result<(), StorageError>;
    fn load(&self) -> Result<Option<Project>, StorageError>;
    fn clear(&self);
}

/// In-process storage for tests and hosts without a browser.
#[derive(Clone, Default)]
pub struct MemoryProjectStorage {
    saved: Rc<RefCell<Option<String>>>,
}

impl MemoryProjectStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raw(&self) -> Option<String> {
        self.saved.borrow().clone()
    }
}

impl ProjectStorage for MemoryProjectStorage {
    fn save(&self, project: &Project) -> Result<(), StorageError> {
        *self.saved.borrow_mut() = Some(serde_json::to_string(project)?);
        Ok(())
    }

    fn load(&self) -> Result<Option<Project>, StorageError> {
        match self.saved.borrow().as_deref() {
            Some(raw) => Ok(Some(serde_json::from_str(raw)?)),
            None => Ok(None),
        }
    }

    fn clear(&self) {
        self.saved.borrow_mut().take();
    }
}

/// Browser local storage under a fixed key.
#[derive(Clone)]
pub struct LocalProjectStorage {
    key: String,
}

impl LocalProjectStorage {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

impl ProjectStorage for LocalProjectStorage {
    fn save(&self, project: &Project) -> Result<(), StorageError> {
        storage::write_json(&self.key, project)
    }

    fn load(&self) -> Result<Option<Project>, StorageError> {
        storage::read_json(&self.key)
    }

    fn clear(&self) {
        storage::remove(&self.key);
    }
}

pub fn export_project(project: &Project) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(project)
}

/// Parses exported JSON and checks that page and block ids are unique.
pub fn import_project(json: &str) -> Result<Project, ImportError> {
    let project: Project = serde_json::from_str(json)?;
    project.validate()?;
    Ok(project)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Block, Page};
    use serde_json::json;

    fn sample() -> Project {
        let mut project = Project::blank("Funnel");
        let mut page = Page::new("page-1", "Intro");
        page.blocks.push(Block::new(
            "heading",
            json!({ "text": "Hi", "nested": { "a": [1, 2] } })
                .as_object()
                .cloned()
                .unwrap(),
        ));
        project.pages.push(page);
        project
    }

    #[test]
    fn memory_storage_round_trips() {
        let storage = MemoryProjectStorage::new();
        assert!(storage.load().unwrap().is_none());

        let project = sample();
        storage.save(&project).unwrap();
        assert_eq!(storage.load().unwrap(), Some(project));

        storage.clear();
        assert!(storage.raw().is_none());
    }

    #[test]
    fn export_then_import_is_lossless() {
        let project = sample();
        let json = export_project(&project).unwrap();
        assert_eq!(import_project(&json).unwrap(), project);
    }

    #[test]
    fn import_rejects_malformed_json() {
        assert!(matches!(
            import_project("{ not json"),
            Err(ImportError::Malformed(_))
        ));
    }

    #[test]
    fn import_rejects_duplicate_pages() {
        let mut project = sample();
        project.pages.push(project.pages[0].clone());
        let json = export_project(&project).unwrap();
        assert!(matches!(
            import_project(&json),
            Err(ImportError::DuplicatePage(id)) if id == "page-1"
        ));
    }
}
