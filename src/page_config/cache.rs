use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};

use super::PageConfig;

/// Page configs keyed by page id, served only while younger than `ttl`
/// counted from when they were stored.
#[derive(Clone, Debug)]
pub struct PageConfigCache {
    entries: HashMap<String, (DateTime<Utc>, PageConfig)>,
    ttl: Duration,
}

impl PageConfigCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            ttl,
        }
    }

    pub fn get_fresh(&self, page_id: &str, now: DateTime<Utc>) -> Option<&PageConfig> {
        self.entries
            .get(page_id)
            .filter(|(stored_at, _)| now - *stored_at < self.ttl)
            .map(|(_, config)| config)
    }

    pub fn insert(&mut self, config: PageConfig, now: DateTime<Utc>) {
        self.entries.insert(config.page_id.clone(), (now, config));
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn configs(&self) -> impl Iterator<Item = &PageConfig> {
        self.entries.values().map(|(_, config)| config)
    }
}

impl Default for PageConfigCache {
    fn default() -> Self {
        Self::new(Duration::hours(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page_config::default_page_config;

    #[test]
    fn stale_entries_are_not_served() {
        let mut cache = PageConfigCache::default();
        cache.insert(default_page_config("quiz-1"), Utc::now() - Duration::hours(2));

        assert!(cache.get_fresh("quiz-1", Utc::now()).is_none());
        assert_eq!(cache.configs().count(), 1);
    }

    #[test]
    fn freshness_counts_from_storage_not_modification() {
        let mut cache = PageConfigCache::new(Duration::minutes(5));
        let mut config = default_page_config("quiz-1");
        config.last_modified = Utc::now() - Duration::days(30);
        cache.insert(config, Utc::now());

        assert!(cache.get_fresh("quiz-1", Utc::now()).is_some());
    }

    #[test]
    fn fresh_entries_are_served_until_cleared() {
        let mut cache = PageConfigCache::new(Duration::minutes(5));
        let now = Utc::now();
        cache.insert(default_page_config("quiz-1"), now);
        assert!(cache.get_fresh("quiz-1", now + Duration::minutes(4)).is_some());
        assert!(cache.get_fresh("quiz-1", now + Duration::minutes(6)).is_none());

        cache.clear();
        assert!(cache.get_fresh("quiz-1", now).is_none());
    }
}
