mod component;
mod pages;
mod properties;
mod styles_editor;

pub use component::{EditorMode, VisualEditor, EDITOR_UI};
pub use properties::{display_field, parse_field};
pub use styles_editor::styles_diff;
