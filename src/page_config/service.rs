use std::cell::RefCell;
use std::rc::Rc;

use chrono::Utc;
use dioxus_logger::tracing::{error, warn};
use gloo_net::http::Request;

use super::in_flight::InFlight;
use super::{default_page_config, PageConfig, PageConfigCache};
use crate::error::ConfigError;
use crate::settings::EditorSettings;
use crate::storage;

fn local_key(page_id: &str) -> String {
    format!("page-config-{page_id}")
}

type Loaded = Result<PageConfig, Rc<ConfigError>>;

/// Client for the page-config API with a short-lived cache and a
/// local-storage fallback. Concurrent requests for one page share a fetch.
#[derive(Clone)]
pub struct PageConfigService {
    settings: EditorSettings,
    cache: Rc<RefCell<PageConfigCache>>,
    in_flight: Rc<InFlight<Loaded>>,
}

impl PageConfigService {
    pub fn new(settings: EditorSettings) -> Self {
        let cache = PageConfigCache::new(settings.cache_ttl());
        Self {
            settings,
            cache: Rc::new(RefCell::new(cache)),
            in_flight: Rc::new(InFlight::new()),
        }
    }

    /// Cached config if fresh, otherwise the API's. A 404 or an unreachable
    /// API yields the locally saved copy or the default config; only a
    /// malformed response body is an error.
    pub async fn get_page_config(&self, page_id: &str) -> Loaded {
        if let Some(cached) = self.cache.borrow().get_fresh(page_id, Utc::now()) {
            return Ok(cached.clone());
        }

        let service = self.clone();
        let id = page_id.to_string();
        self.in_flight
            .run(page_id, move || async move { service.load(&id).await.map_err(Rc::new) })
            .await
    }

    async fn load(&self, page_id: &str) -> Result<PageConfig, ConfigError> {
        match self.fetch(page_id).await {
            Ok(Some(config)) => {
                self.cache.borrow_mut().insert(config.clone(), Utc::now());
                Ok(config)
            }
            Ok(None) => Ok(self.offline_config(page_id)),
            Err(e @ ConfigError::Decode(_)) => Err(e),
            Err(e) => {
                warn!("Fetching page config `{}` failed, using fallback: {}", page_id, e);
                Ok(self.offline_config(page_id))
            }
        }
    }

    /// Pushes the next version of `config`. Falls back to local storage when
    /// the API rejects it; `false` only when both fail.
    pub async fn save_page_config(&self, config: &PageConfig) -> bool {
        let mut next = config.clone();
        next.version += 1;
        next.last_modified = Utc::now();

        match self.put(&next).await {
            Ok(()) => {
                self.cache.borrow_mut().insert(next, Utc::now());
                true
            }
            Err(e) => {
                warn!("Saving page config `{}` failed, storing locally: {}", next.page_id, e);
                match storage::write_json(&local_key(&next.page_id), &next) {
                    Ok(()) => {
                        self.cache.borrow_mut().insert(next, Utc::now());
                        true
                    }
                    Err(e) => {
                        error!("Failed to save page config locally: {}", e);
                        false
                    }
                }
            }
        }
    }

    /// Drops cached configs and running fetches, so the next request for any
    /// page goes to the API.
    pub fn clear_cache(&self) {
        self.cache.borrow_mut().clear();
        self.in_flight.clear();
    }

    fn offline_config(&self, page_id: &str) -> PageConfig {
        match storage::read_json::<PageConfig>(&local_key(page_id)) {
            Ok(Some(config)) => config,
            Ok(None) => default_page_config(page_id),
            Err(e) => {
                warn!("Ignoring locally stored page config `{}`: {}", page_id, e);
                default_page_config(page_id)
            }
        }
    }

    async fn fetch(&self, page_id: &str) -> Result<Option<PageConfig>, ConfigError> {
        let url = self.settings.api_url(&format!("page-configs/{page_id}"));
        let response = Request::get(&url).send().await?;

        if response.status() == 404 {
            return Ok(None);
        }
        if !response.ok() {
            return Err(ConfigError::Status {
                status: response.status(),
                status_text: response.status_text(),
            });
        }

        let body = response.text().await?;
        Ok(Some(serde_json::from_str(&body)?))
    }

    async fn put(&self, config: &PageConfig) -> Result<(), ConfigError> {
        let url = self.settings.api_url(&format!("page-configs/{}", config.page_id));
        let response = Request::put(&url).json(config)?.send().await?;

        if !response.ok() {
            return Err(ConfigError::Status {
                status: response.status(),
                status_text: response.status_text(),
            });
        }
        Ok(())
    }
}
