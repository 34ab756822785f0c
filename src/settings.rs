use chrono::Duration;
use dioxus_logger::tracing::warn;
use serde::{Deserialize, Serialize};

use crate::error::StorageError;
use crate::renderer::RenderLimits;
use crate::storage;

pub const DEFAULT_API_URL: &str = "http://localhost:3001/api";
const SETTINGS_KEY: &str = "quiz-editor-settings";

/// Editor-wide settings. The API URL is baked in at build time from
/// `QUIZ_EDITOR_API_URL`; anything can be overridden per browser through
/// local storage.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorSettings {
    pub api_base_url: String,
    pub project_storage_key: String,
    pub autosave: bool,
    pub autosave_interval_ms: u32,
    pub max_render_depth: usize,
    pub page_config_cache_ttl_secs: i64,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            api_base_url: option_env!("QUIZ_EDITOR_API_URL")
                .unwrap_or(DEFAULT_API_URL)
                .to_string(),
            project_storage_key: "quiz-editor-project".to_string(),
            autosave: true,
            autosave_interval_ms: 2_000,
            max_render_depth: RenderLimits::default().max_depth,
            page_config_cache_ttl_secs: 60 * 60,
        }
    }
}

impl EditorSettings {
    pub fn load() -> Self {
        match storage::read_json::<EditorSettings>(SETTINGS_KEY) {
            Ok(Some(settings)) => settings,
            Ok(None) | Err(StorageError::Unavailable) => Self::default(),
            Err(e) => {
                warn!("Ignoring stored editor settings: {}", e);
                Self::default()
            }
        }
    }

    pub fn render_limits(&self) -> RenderLimits {
        RenderLimits {
            max_depth: self.max_render_depth.max(1),
        }
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::seconds(self.page_config_cache_ttl_secs.max(0))
    }

    /// `base_url` joined with `path`, without doubled slashes.
    pub fn api_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.api_base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_settings_fill_in_defaults() {
        let settings: EditorSettings =
            serde_json::from_str(r#"{ "autosave": false, "maxRenderDepth": 3 }"#).unwrap();
        assert!(!settings.autosave);
        assert_eq!(settings.autosave_interval_ms, 2_000);
        assert_eq!(settings.render_limits().max_depth, 3);
        assert_eq!(settings.project_storage_key, "quiz-editor-project");
    }

    #[test]
    fn api_url_joins_cleanly() {
        let settings = EditorSettings {
            api_base_url: "https://example.test/api/".to_string(),
            ..EditorSettings::default()
        };
        assert_eq!(
            settings.api_url("/page-configs/intro"),
            "https://example.test/api/page-configs/intro"
        );
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn load_without_browser_storage_uses_defaults() {
        assert_eq!(EditorSettings::load(), EditorSettings::default());
    }

    #[test]
    fn zero_depth_is_raised_to_one() {
        let settings = EditorSettings {
            max_render_depth: 0,
            ..EditorSettings::default()
        };
        assert_eq!(settings.render_limits().max_depth, 1);
    }
}
