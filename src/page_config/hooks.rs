use dioxus::prelude::*;

use super::{PageConfig, PageConfigService};

/// Bumped to make every mounted page-config resource fetch again.
static REFRESH_GENERATION: GlobalSignal<u64> = Signal::global(|| 0);

#[derive(Clone, Debug, PartialEq)]
pub enum PageConfigState {
    Loading,
    Ready(PageConfig),
    Failed(String),
}

/// Handle to the page config request of one component.
#[derive(Clone, Copy)]
pub struct PageConfigHandle {
    resource: Resource<Result<PageConfig, String>>,
}

impl PageConfigHandle {
    pub fn state(&self) -> PageConfigState {
        match &*self.resource.read() {
            None => PageConfigState::Loading,
            Some(Ok(config)) => PageConfigState::Ready(config.clone()),
            Some(Err(message)) => PageConfigState::Failed(message.clone()),
        }
    }
}

/// Loads the config for `page_id` through the [`PageConfigService`] in
/// context, refetching whenever `page_id` changes or
/// [`refresh_page_configs`] runs. Components showing the same page share
/// one request.
pub fn use_page_config(page_id: String) -> PageConfigHandle {
    let service = use_context::<PageConfigService>();
    let resource = use_resource(use_reactive((&page_id,), move |(page_id,)| {
        let service = service.clone();
        async move {
            let _generation = REFRESH_GENERATION();
            service
                .get_page_config(&page_id)
                .await
                .map_err(|e| e.to_string())
        }
    }));
    PageConfigHandle { resource }
}

/// Drops cached configs and reloads every mounted page-config resource, so a
/// page and all of its blocks switch to the new config together.
pub fn refresh_page_configs(service: &PageConfigService) {
    service.clear_cache();
    *REFRESH_GENERATION.write() += 1;
}
