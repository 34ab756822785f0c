//! Page configuration supplied by the external page-config API, and the
//! lookups the dynamic renderer performs on it.

mod cache;
mod hooks;
mod in_flight;
mod service;

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::{Content, Page, Styles};

pub use cache::PageConfigCache;
pub use hooks::{refresh_page_configs, use_page_config, PageConfigHandle, PageConfigState};
pub use service::PageConfigService;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigBlock {
    pub id: String,
    #[serde(rename = "type")]
    pub block_type: String,
    #[serde(default)]
    pub props: Content,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub styles: Option<Styles>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<Content>,
}

impl ConfigBlock {
    pub fn class_name(&self) -> &str {
        self.settings
            .as_ref()
            .and_then(|s| s.get("className"))
            .and_then(Value::as_str)
            .unwrap_or_default()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PageStyles {
    pub background_color: Option<String>,
    pub text_color: Option<String>,
    pub font_family: Option<String>,
    #[serde(rename = "customCSS")]
    pub custom_css: Option<String>,
}

impl PageStyles {
    pub fn to_css(&self) -> String {
        let mut css = String::new();
        if let Some(color) = &self.background_color {
            css.push_str(&format!("background-color: {color}; "));
        }
        if let Some(color) = &self.text_color {
            css.push_str(&format!("color: {color}; "));
        }
        if let Some(font) = &self.font_family {
            css.push_str(&format!("font-family: {font}; "));
        }
        css
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PageMetadata {
    pub title: String,
    pub description: String,
    pub keywords: Vec<String>,
    pub og_image: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PageSettings {
    pub show_progress: bool,
    pub progress_value: u8,
    pub ab_test_variant: String,
    pub custom_scripts: Vec<String>,
}

impl Default for PageSettings {
    fn default() -> Self {
        Self {
            show_progress: false,
            progress_value: 0,
            ab_test_variant: "A".to_string(),
            custom_scripts: Vec::new(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageConfig {
    pub page_id: String,
    pub page_name: String,
    #[serde(default)]
    pub blocks: Vec<ConfigBlock>,
    #[serde(default)]
    pub styles: PageStyles,
    #[serde(default)]
    pub metadata: PageMetadata,
    #[serde(default)]
    pub settings: PageSettings,
    pub last_modified: DateTime<Utc>,
    #[serde(default = "first_version")]
    pub version: u32,
}

fn first_version() -> u32 {
    1
}

impl PageConfig {
    pub fn block(&self, block_id: &str) -> Option<&ConfigBlock> {
        self.blocks.iter().find(|b| b.id == block_id)
    }

    /// Blocks no card on this page claims as a child, in page order. Blocks
    /// that are claimed only from inside a closed loop of cards are roots
    /// too, so the loop is resolved and reported instead of vanishing.
    pub fn root_block_ids(&self) -> Vec<String> {
        let claimed: HashSet<&str> = self.blocks.iter().flat_map(child_refs).collect();
        let is_root = |block: &&ConfigBlock| !claimed.contains(block.id.as_str());

        let mut reached = HashSet::new();
        for block in self.blocks.iter().filter(is_root) {
            self.mark_reachable(&block.id, &mut reached);
        }

        let mut roots = Vec::new();
        for block in &self.blocks {
            if is_root(&block) {
                roots.push(block.id.clone());
            } else if !reached.contains(block.id.as_str()) {
                self.mark_reachable(&block.id, &mut reached);
                roots.push(block.id.clone());
            }
        }
        roots
    }

    fn mark_reachable<'a>(&'a self, from: &'a str, reached: &mut HashSet<&'a str>) {
        let mut stack = vec![from];
        while let Some(id) = stack.pop() {
            if !reached.insert(id) {
                continue;
            }
            if let Some(block) = self.block(id) {
                stack.extend(child_refs(block));
            }
        }
    }

    /// Builds the render-side view of an editor page.
    pub fn from_page(page: &Page) -> Self {
        let setting = |key: &str| {
            page.settings
                .as_ref()
                .and_then(|s| s.get(key))
                .and_then(Value::as_str)
                .map(str::to_string)
        };

        Self {
            page_id: page.id.clone(),
            page_name: page.title.clone(),
            blocks: page
                .blocks
                .iter()
                .map(|block| ConfigBlock {
                    id: block.id.clone(),
                    block_type: block.block_type.clone(),
                    props: block.content.clone(),
                    styles: block.styles.clone(),
                    settings: None,
                })
                .collect(),
            styles: PageStyles {
                background_color: setting("backgroundColor"),
                text_color: setting("textColor"),
                font_family: setting("fontFamily"),
                custom_css: setting("customCSS"),
            },
            metadata: PageMetadata {
                title: page.title.clone(),
                ..PageMetadata::default()
            },
            settings: PageSettings::default(),
            last_modified: Utc::now(),
            version: 1,
        }
    }
}

/// Configuration served when the API has nothing for `page_id`.
pub fn default_page_config(page_id: &str) -> PageConfig {
    let (page_name, background) = match page_id {
        "step-20-result" => ("Result page", "#fffaf7"),
        "step-21-offer" => ("Offer page", "#FFFBF7"),
        _ => ("Page", "#ffffff"),
    };
    let branded = background != "#ffffff";

    PageConfig {
        page_id: page_id.to_string(),
        page_name: page_name.to_string(),
        blocks: Vec::new(),
        styles: PageStyles {
            background_color: Some(background.to_string()),
            text_color: Some((if branded { "#432818" } else { "#000000" }).to_string()),
            font_family: Some(
                (if branded { "Inter, sans-serif" } else { "Arial, sans-serif" }).to_string(),
            ),
            custom_css: None,
        },
        metadata: PageMetadata::default(),
        settings: PageSettings::default(),
        last_modified: Utc::now(),
        version: 1,
    }
}

/// Child ids a block lists in its `children` prop, as bare ids or `{ "id": .. }`.
fn child_refs(block: &ConfigBlock) -> impl Iterator<Item = &str> {
    block
        .props
        .get("children")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(|child| child.as_str().or_else(|| child.get("id")?.as_str()))
}

/// What the dynamic renderer knows about one block id.
#[derive(Clone, Debug, PartialEq)]
pub struct BlockLookup<'a> {
    pub component_type: String,
    pub props: Content,
    pub is_configured: bool,
    pub raw_block: Option<&'a ConfigBlock>,
}

pub fn lookup_block<'a>(config: &'a PageConfig, block_id: &str) -> BlockLookup<'a> {
    let Some(block) = config.block(block_id) else {
        return BlockLookup {
            component_type: "div".to_string(),
            props: Content::new(),
            is_configured: false,
            raw_block: None,
        };
    };

    let mut props = block.props.clone();
    let class_name = block.class_name();
    if !class_name.is_empty() {
        props
            .entry("className")
            .or_insert_with(|| Value::String(class_name.to_string()));
    }

    BlockLookup {
        component_type: block.block_type.clone(),
        props,
        is_configured: true,
        raw_block: Some(block),
    }
}
