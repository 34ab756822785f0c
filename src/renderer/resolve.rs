use dioxus_logger::tracing::warn;

use super::registry::BlockRegistry;
use crate::error::{PropIssue, RenderError};
use crate::model::Styles;
use crate::page_config::{lookup_block, PageConfig};
use crate::schema::BlockProps;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderLimits {
    pub max_depth: usize,
}

impl Default for RenderLimits {
    fn default() -> Self {
        Self { max_depth: 8 }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RenderedBlock {
    pub id: String,
    pub component_type: String,
    pub props: BlockProps,
    pub issues: Vec<PropIssue>,
    pub styles: Option<Styles>,
    pub class_name: String,
    pub children: Vec<ResolvedBlock>,
}

/// A block id resolved against a page config, children included.
#[derive(Clone, Debug, PartialEq)]
pub enum ResolvedBlock {
    Rendered(RenderedBlock),
    NotConfigured { block_id: String },
    Failed { block_id: String, error: RenderError },
}

impl ResolvedBlock {
    pub fn block_id(&self) -> &str {
        match self {
            ResolvedBlock::Rendered(block) => &block.id,
            ResolvedBlock::NotConfigured { block_id } | ResolvedBlock::Failed { block_id, .. } => {
                block_id
            }
        }
    }
}

pub fn resolve_block(
    config: &PageConfig,
    block_id: &str,
    registry: &BlockRegistry,
    limits: RenderLimits,
) -> ResolvedBlock {
    let mut path = Vec::new();
    resolve_at(config, block_id, registry, limits, &mut path)
}

/// Resolves every block not nested inside a card, in page order.
pub fn resolve_page(
    config: &PageConfig,
    registry: &BlockRegistry,
    limits: RenderLimits,
) -> Vec<ResolvedBlock> {
    config
        .root_block_ids()
        .iter()
        .map(|id| resolve_block(config, id, registry, limits))
        .collect()
}

fn resolve_at(
    config: &PageConfig,
    block_id: &str,
    registry: &BlockRegistry,
    limits: RenderLimits,
    path: &mut Vec<String>,
) -> ResolvedBlock {
    if path.iter().any(|seen| seen == block_id) {
        let mut cycle = path.clone();
        cycle.push(block_id.to_string());
        warn!("Refusing to render block cycle: {}", cycle.join(" -> "));
        return ResolvedBlock::Failed {
            block_id: block_id.to_string(),
            error: RenderError::Cycle {
                block_id: block_id.to_string(),
                path: cycle,
            },
        };
    }
    if path.len() >= limits.max_depth {
        return ResolvedBlock::Failed {
            block_id: block_id.to_string(),
            error: RenderError::TooDeep {
                block_id: block_id.to_string(),
                max_depth: limits.max_depth,
            },
        };
    }

    let lookup = lookup_block(config, block_id);
    let Some(raw) = lookup.raw_block else {
        return ResolvedBlock::NotConfigured {
            block_id: block_id.to_string(),
        };
    };

    let dispatched = registry.dispatch(&lookup.component_type, &lookup.props);

    path.push(block_id.to_string());
    let children = dispatched
        .props
        .child_ids()
        .iter()
        .map(|child| resolve_at(config, child, registry, limits, path))
        .collect();
    path.pop();

    ResolvedBlock::Rendered(RenderedBlock {
        id: block_id.to_string(),
        component_type: lookup.component_type,
        props: dispatched.props,
        issues: dispatched.issues,
        styles: raw.styles.clone(),
        class_name: raw.class_name().to_string(),
        children,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn config(blocks: Value) -> PageConfig {
        serde_json::from_value(json!({
            "pageId": "p",
            "pageName": "P",
            "blocks": blocks,
            "lastModified": "2026-01-01T00:00:00Z"
        }))
        .unwrap()
    }

    fn registry() -> BlockRegistry {
        BlockRegistry::builtin()
    }

    #[test]
    fn card_children_resolve_in_order() {
        let config = config(json!([
            { "id": "card", "type": "Card", "props": { "children": ["t", "missing"] } },
            { "id": "t", "type": "text", "props": { "content": "Inside" } }
        ]));
        let ResolvedBlock::Rendered(card) =
            resolve_block(&config, "card", &registry(), RenderLimits::default())
        else {
            panic!("card should render");
        };
        assert_eq!(card.children.len(), 2);
        assert!(matches!(&card.children[0], ResolvedBlock::Rendered(b) if b.id == "t"));
        assert_eq!(
            card.children[1],
            ResolvedBlock::NotConfigured {
                block_id: "missing".to_string()
            }
        );
    }

    #[test]
    fn self_referencing_card_fails_fast() {
        let config = config(json!([
            { "id": "loop", "type": "card", "props": { "children": ["loop"] } }
        ]));
        let ResolvedBlock::Rendered(card) =
            resolve_block(&config, "loop", &registry(), RenderLimits::default())
        else {
            panic!("outer card should render");
        };
        match &card.children[0] {
            ResolvedBlock::Failed {
                error: RenderError::Cycle { path, .. },
                ..
            } => assert_eq!(path, &vec!["loop".to_string(), "loop".to_string()]),
            other => panic!("expected cycle, got {other:?}"),
        }
    }

    #[test]
    fn indirect_cycles_are_detected() {
        let config = config(json!([
            { "id": "a", "type": "card", "props": { "children": ["b"] } },
            { "id": "b", "type": "card", "props": { "children": ["a"] } }
        ]));
        let resolved = resolve_block(&config, "a", &registry(), RenderLimits::default());
        let ResolvedBlock::Rendered(a) = resolved else {
            panic!("a should render");
        };
        let ResolvedBlock::Rendered(b) = &a.children[0] else {
            panic!("b should render");
        };
        assert!(matches!(
            &b.children[0],
            ResolvedBlock::Failed { error: RenderError::Cycle { .. }, .. }
        ));
    }

    #[test]
    fn depth_limit_stops_long_chains() {
        let config = config(json!([
            { "id": "c1", "type": "card", "props": { "children": ["c2"] } },
            { "id": "c2", "type": "card", "props": { "children": ["c3"] } },
            { "id": "c3", "type": "card", "props": { "children": [] } }
        ]));
        let resolved = resolve_block(&config, "c1", &registry(), RenderLimits { max_depth: 2 });
        let ResolvedBlock::Rendered(c1) = resolved else {
            panic!("c1 should render");
        };
        let ResolvedBlock::Rendered(c2) = &c1.children[0] else {
            panic!("c2 should render");
        };
        assert!(matches!(
            &c2.children[0],
            ResolvedBlock::Failed { error: RenderError::TooDeep { max_depth: 2, .. }, .. }
        ));
    }

    #[test]
    fn page_resolution_skips_nested_blocks() {
        let config = config(json!([
            { "id": "card", "type": "card", "props": { "children": ["t"] } },
            { "id": "t", "type": "text" },
            { "id": "mystery", "type": "hologram", "props": { "title": "?" } }
        ]));
        let roots = resolve_page(&config, &registry(), RenderLimits::default());
        let ids: Vec<&str> = roots.iter().map(ResolvedBlock::block_id).collect();
        assert_eq!(ids, vec!["card", "mystery"]);
        assert!(matches!(&roots[1], ResolvedBlock::Rendered(b) if b.props.is_generic()));
    }

    #[test]
    fn class_name_and_styles_are_carried() {
        let config = config(json!([{
            "id": "h",
            "type": "heading",
            "styles": { "color": "red" },
            "settings": { "className": "hero" }
        }]));
        let ResolvedBlock::Rendered(h) =
            resolve_block(&config, "h", &registry(), RenderLimits::default())
        else {
            panic!("heading should render");
        };
        assert_eq!(h.class_name, "hero");
        assert_eq!(h.styles.unwrap()["color"], "red");
    }
}
