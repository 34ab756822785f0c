//! Visual editor for multi-step quiz funnels whose pages are assembled from
//! JSON-configured blocks.

pub mod app;
pub mod editor;
pub mod error;
pub mod model;
pub mod page_config;
pub mod renderer;
pub mod schema;
pub mod settings;
pub mod storage;
pub mod templates;
pub mod visual_editor;

pub use app::App;
