//! Starter projects offered by "New project".

use serde_json::json;

use crate::model::{new_page_id, Block, Content, Page, Project};
use crate::renderer::builtin_registry;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProjectTemplate {
    Blank,
    QuizFunnel,
}

impl ProjectTemplate {
    pub const ALL: [ProjectTemplate; 2] = [ProjectTemplate::Blank, ProjectTemplate::QuizFunnel];

    pub fn label(self) -> &'static str {
        match self {
            ProjectTemplate::Blank => "Blank project",
            ProjectTemplate::QuizFunnel => "Style quiz funnel",
        }
    }

    pub fn build(self, name: &str) -> Project {
        match self {
            ProjectTemplate::Blank => Project::blank(name),
            ProjectTemplate::QuizFunnel => Project::quiz_funnel(name),
        }
    }
}

fn block(block_type: &str) -> Block {
    let content = builtin_registry()
        .definition(block_type)
        .map(|definition| definition.default_content())
        .unwrap_or_default();
    Block::new(block_type, content)
}

fn block_with(block_type: &str, overrides: serde_json::Value) -> Block {
    let mut block = block(block_type);
    if let serde_json::Value::Object(overrides) = overrides {
        block.content.extend(overrides);
    }
    block
}

fn page(title: &str, blocks: Vec<Block>) -> Page {
    let mut page = Page::new(new_page_id(), title);
    page.blocks = blocks;
    page
}

impl Project {
    /// Five-stage funnel: intro, question, transition, result and offer.
    pub fn quiz_funnel(name: impl Into<String>) -> Self {
        let mut project = Project::blank(name);
        project.pages = vec![
            page("Intro", vec![block("quiz-intro")]),
            page(
                "Question 1",
                vec![
                    block("header"),
                    block_with("question", json!({ "progressPercent": 10 })),
                ],
            ),
            page("Transition", vec![block("transition")]),
            page(
                "Result",
                vec![
                    block("header"),
                    block("style-result"),
                    block("secondary-styles"),
                    block_with("button", json!({ "text": "See my offer", "fullWidth": true })),
                ],
            ),
            page(
                "Offer",
                vec![
                    block("section-title"),
                    block("countdown"),
                    block("pricing"),
                    block("bonus"),
                    block("testimonials"),
                    block("guarantee"),
                    block("faq"),
                    block_with("button", json!({ "text": "Get instant access", "fullWidth": true })),
                    block("secure-purchase"),
                ],
            ),
        ];
        project
            .settings
            .insert("template".to_string(), json!("quiz-funnel"));
        project
    }
}

/// Content a freshly added `block_type` starts with.
pub fn starter_content(block_type: &str) -> Content {
    block(block_type).content
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn funnel_has_five_valid_stages() {
        let project = Project::quiz_funnel("Style quiz");
        let titles: Vec<&str> = project.pages.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["Intro", "Question 1", "Transition", "Result", "Offer"]);
        assert!(project.validate().is_ok());
    }

    #[test]
    fn funnel_blocks_are_all_registered_kinds() {
        let registry = builtin_registry();
        let project = ProjectTemplate::QuizFunnel.build("Quiz");
        for block in project.pages.iter().flat_map(|p| &p.blocks) {
            let dispatched = registry.dispatch(&block.block_type, &block.content);
            assert!(!dispatched.props.is_generic(), "{} is unknown", block.block_type);
            assert!(dispatched.issues.is_empty(), "{:?}", dispatched.issues);
        }
    }

    #[test]
    fn overrides_apply_on_top_of_defaults() {
        let project = Project::quiz_funnel("Quiz");
        let question = &project.pages[1].blocks[1];
        assert_eq!(question.content["progressPercent"], 10);
        assert!(question.content["options"].is_array());
    }
}
