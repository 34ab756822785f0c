//! Reducer-driven editor state and its persistence.

mod action;
mod autosave;
mod reducer;
mod storage;
mod store;

pub use action::{BlockUpdate, EditorAction};
pub use autosave::{AutosaveDebounce, AutosaveTicket};
pub use reducer::reduce;
pub use storage::{
    export_project, import_project, LocalProjectStorage, MemoryProjectStorage, ProjectStorage,
};
pub use store::{use_editor, use_editor_provider, EditorStore, Notice, NoticeKind};
