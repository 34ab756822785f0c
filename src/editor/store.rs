use std::rc::Rc;

use dioxus::prelude::*;
use dioxus_logger::tracing::{error, info, warn};

use super::action::{BlockUpdate, EditorAction};
use super::autosave::{self, AutosaveDebounce};
use super::storage::{export_project, import_project, ProjectStorage};
use crate::error::ImportError;
use crate::model::{EditorState, Project};
use crate::templates::ProjectTemplate;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

/// Transient message shown as a toast.
#[derive(Clone, Debug, PartialEq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

/// Shared handle to the editor state. Every change goes through
/// [`EditorStore::dispatch`].
#[derive(Clone)]
pub struct EditorStore {
    state: Signal<EditorState>,
    notice: Signal<Option<Notice>>,
    storage: Rc<dyn ProjectStorage>,
}

impl EditorStore {
    pub fn state(&self) -> Signal<EditorState> {
        self.state
    }

    pub fn notice(&self) -> Option<Notice> {
        self.notice.read().clone()
    }

    pub fn dismiss_notice(&self) {
        let mut notice = self.notice;
        notice.set(None);
    }

    pub fn dispatch(&self, action: EditorAction) {
        let mut state = self.state;
        let next = state.read().apply(action);
        state.set(next);
    }

    pub fn add_block(&self, block_type: &str) {
        self.dispatch(EditorAction::AddBlock {
            block_type: block_type.to_string(),
            content: None,
        });
    }

    pub fn update_block(&self, id: &str, updates: BlockUpdate) {
        self.dispatch(EditorAction::UpdateBlock {
            id: id.to_string(),
            updates,
        });
    }

    pub fn delete_block(&self, id: &str) {
        self.dispatch(EditorAction::DeleteBlock(id.to_string()));
    }

    pub fn move_block(&self, id: &str, to_index: usize) {
        self.dispatch(EditorAction::MoveBlock {
            id: id.to_string(),
            to_index,
        });
    }

    pub fn duplicate_block(&self, id: &str) {
        self.dispatch(EditorAction::DuplicateBlock(id.to_string()));
    }

    pub fn select_block(&self, id: &str) {
        self.dispatch(EditorAction::SelectBlock(id.to_string()));
    }

    pub fn deselect_block(&self) {
        self.dispatch(EditorAction::DeselectBlock);
    }

    pub fn add_page(&self) {
        self.dispatch(EditorAction::AddPage);
    }

    pub fn delete_page(&self, id: &str) {
        self.dispatch(EditorAction::DeletePage(id.to_string()));
    }

    pub fn rename_page(&self, id: &str, title: String) {
        self.dispatch(EditorAction::RenamePage {
            id: id.to_string(),
            title,
        });
    }

    pub fn switch_page(&self, id: &str) {
        self.dispatch(EditorAction::SetCurrentPage(id.to_string()));
    }

    pub fn new_project(&self, template: ProjectTemplate) {
        self.dispatch(EditorAction::SetProject(template.build("Untitled quiz")));
        self.notify(NoticeKind::Info, format!("Started a new {}", template.label().to_lowercase()));
    }

    pub fn save_project(&self) {
        let Some(project) = self.state.read().current_project.clone() else {
            self.notify(NoticeKind::Error, "Nothing to save");
            return;
        };
        match self.storage.save(&project) {
            Ok(()) => {
                info!("Saved project `{}`", project.name);
                self.dispatch(EditorAction::SetDirty(false));
                self.notify(NoticeKind::Info, "Project saved");
            }
            Err(e) => {
                error!("Failed to save project: {}", e);
                self.notify(NoticeKind::Error, format!("Could not save: {e}"));
            }
        }
    }

    pub fn load_project(&self) {
        match self.storage.load() {
            Ok(Some(project)) => match project.validate() {
                Ok(()) => {
                    info!("Loaded project `{}`", project.name);
                    self.dispatch(EditorAction::SetProject(project));
                }
                Err(e) => self.notify(NoticeKind::Error, format!("Saved project is invalid: {e}")),
            },
            Ok(None) => self.notify(NoticeKind::Info, "No saved project found"),
            Err(e) => {
                warn!("Failed to load project: {}", e);
                self.notify(NoticeKind::Error, format!("Could not load: {e}"));
            }
        }
    }

    pub fn export_project(&self) -> Option<String> {
        let state = self.state.read();
        let project = state.current_project.as_ref()?;
        match export_project(project) {
            Ok(json) => Some(json),
            Err(e) => {
                error!("Failed to export project: {}", e);
                None
            }
        }
    }

    /// Replaces the project with `json` when it parses and validates;
    /// otherwise shows the error and keeps the current state.
    pub fn import_project(&self, json: &str) -> Result<(), ImportError> {
        match import_project(json) {
            Ok(project) => {
                info!("Imported project `{}`", project.name);
                self.dispatch(EditorAction::SetProject(project));
                self.notify(NoticeKind::Info, "Project imported");
                Ok(())
            }
            Err(e) => {
                warn!("Rejected import: {}", e);
                self.notify(NoticeKind::Error, format!("Import failed: {e}"));
                Err(e)
            }
        }
    }

    pub fn notify(&self, kind: NoticeKind, message: impl Into<String>) {
        let mut notice = self.notice;
        notice.set(Some(Notice {
            kind,
            message: message.into(),
        }));
    }
}

fn initial_project(storage: &dyn ProjectStorage) -> Project {
    match storage.load() {
        Ok(Some(project)) if project.validate().is_ok() => project,
        Ok(_) => Project::quiz_funnel("Style quiz"),
        Err(e) => {
            warn!("Ignoring saved project: {}", e);
            Project::quiz_funnel("Style quiz")
        }
    }
}

/// Creates the store, restoring the saved project if there is one, and
/// provides it to descendants. With `autosave` the project is written back
/// once edits have been quiet for `autosave_interval_ms`.
pub fn use_editor_provider(
    storage: Rc<dyn ProjectStorage>,
    autosave: bool,
    autosave_interval_ms: u32,
) -> EditorStore {
    let initial = storage.clone();
    let state = use_signal(move || EditorState::with_project(initial_project(initial.as_ref())));
    let notice = use_signal(|| None);
    let debounce = use_hook(|| Rc::new(AutosaveDebounce::default()));

    let autosave_target = storage.clone();
    use_effect(move || {
        let state = state.read();
        // any change, saved or not, cancels the pending write
        let ticket = debounce.schedule();
        if !autosave || !state.is_dirty {
            return;
        }
        let Some(project) = state.current_project.clone() else {
            return;
        };
        let debounce = debounce.clone();
        let target = autosave_target.clone();
        spawn(async move {
            autosave::wait(autosave_interval_ms).await;
            if !debounce.is_current(ticket) {
                return;
            }
            if let Err(e) = target.save(&project) {
                warn!("Autosave failed: {}", e);
            }
        });
    });

    use_context_provider(move || EditorStore {
        state,
        notice,
        storage,
    })
}

pub fn use_editor() -> EditorStore {
    use_context::<EditorStore>()
}
