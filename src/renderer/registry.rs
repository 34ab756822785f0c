use std::collections::HashMap;
use std::sync::OnceLock;

use dioxus_logger::tracing::{error, warn};
use serde_json::Value;

use crate::error::{PropIssue, RegistryError};
use crate::model::Content;
use crate::schema::*;

type BuildFn = fn(Content) -> Result<BlockProps, serde_json::Error>;

fn build_props<T: BlockKind>(content: Content) -> Result<BlockProps, serde_json::Error> {
    serde_json::from_value::<T>(Value::Object(content)).map(Into::into)
}

fn default_props<T: BlockKind>() -> BlockProps {
    T::default().into()
}

/// A registered block kind: its catalog definition plus the typed parser.
pub struct BlockEntry {
    definition: BlockDefinition,
    build: BuildFn,
    fallback: fn() -> BlockProps,
}

impl BlockEntry {
    pub fn of<T: BlockKind>() -> Self {
        Self {
            definition: definition_of::<T>(),
            build: build_props::<T>,
            fallback: default_props::<T>,
        }
    }

    pub fn definition(&self) -> &BlockDefinition {
        &self.definition
    }

    /// Validates `props` against the schema, then parses what survived.
    pub fn build(&self, props: &Content) -> Dispatched {
        let (accepted, mut issues) = self.definition.validate(props);
        let props = match (self.build)(accepted) {
            Ok(props) => props,
            Err(e) => {
                issues.push(PropIssue::Unparseable {
                    block_type: self.definition.block_type.to_string(),
                    reason: e.to_string(),
                });
                (self.fallback)()
            }
        };
        Dispatched { props, issues }
    }
}

/// Outcome of dispatching one block: typed props plus any schema mismatches.
#[derive(Clone, Debug, PartialEq)]
pub struct Dispatched {
    pub props: BlockProps,
    pub issues: Vec<PropIssue>,
}

/// Lookup table from block type strings (canonical names and aliases) to kinds.
#[derive(Default)]
pub struct BlockRegistry {
    entries: Vec<BlockEntry>,
    index: HashMap<String, usize>,
}

impl BlockRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builtin() -> Self {
        let mut registry = Self::new();
        let entries = [
            BlockEntry::of::<HeadingProps>(),
            BlockEntry::of::<TextProps>(),
            BlockEntry::of::<ImageProps>(),
            BlockEntry::of::<ButtonProps>(),
            BlockEntry::of::<HeaderProps>(),
            BlockEntry::of::<CardProps>(),
            BlockEntry::of::<SectionTitleProps>(),
            BlockEntry::of::<QuizIntroProps>(),
            BlockEntry::of::<QuestionProps>(),
            BlockEntry::of::<TransitionProps>(),
            BlockEntry::of::<StyleResultProps>(),
            BlockEntry::of::<SecondaryStylesProps>(),
            BlockEntry::of::<CountdownProps>(),
            BlockEntry::of::<PricingProps>(),
            BlockEntry::of::<FaqProps>(),
            BlockEntry::of::<TestimonialsProps>(),
            BlockEntry::of::<GuaranteeProps>(),
            BlockEntry::of::<BonusProps>(),
            BlockEntry::of::<MentorProps>(),
            BlockEntry::of::<MotivationProps>(),
            BlockEntry::of::<BeforeAfterProps>(),
            BlockEntry::of::<SecurePurchaseProps>(),
        ];
        for entry in entries {
            if let Err(e) = registry.register(entry) {
                error!("Skipping built-in block kind: {}", e);
            }
        }
        registry
    }

    /// Adds a kind under its canonical type and every alias. Nothing is
    /// registered if any of those keys is already taken.
    pub fn register(&mut self, entry: BlockEntry) -> Result<(), RegistryError> {
        let definition = entry.definition();
        let keys: Vec<&str> = std::iter::once(definition.block_type)
            .chain(definition.aliases.iter().copied())
            .collect();

        if let Some(taken) = keys.iter().find(|key| self.index.contains_key(**key)) {
            return Err(RegistryError::Duplicate(taken.to_string()));
        }

        let slot = self.entries.len();
        for key in keys {
            self.index.insert(key.to_string(), slot);
        }
        self.entries.push(entry);
        Ok(())
    }

    pub fn get(&self, block_type: &str) -> Option<&BlockEntry> {
        self.index.get(block_type).map(|&slot| &self.entries[slot])
    }

    pub fn definition(&self, block_type: &str) -> Option<&BlockDefinition> {
        self.get(block_type).map(BlockEntry::definition)
    }

    /// Definitions in registration order.
    pub fn definitions(&self) -> impl Iterator<Item = &BlockDefinition> {
        self.entries.iter().map(BlockEntry::definition)
    }

    pub fn definitions_in(&self, category: BlockCategory) -> Vec<&BlockDefinition> {
        self.definitions()
            .filter(|d| d.category == category)
            .collect()
    }

    /// Maps a block type and its raw props to typed props. Unknown types get
    /// the generic fallback; this never fails.
    pub fn dispatch(&self, block_type: &str, props: &Content) -> Dispatched {
        let Some(entry) = self.get(block_type) else {
            return Dispatched {
                props: BlockProps::Generic(GenericProps::from_content(block_type, props)),
                issues: Vec::new(),
            };
        };

        let dispatched = entry.build(props);
        for issue in &dispatched.issues {
            warn!("Block `{}` prop mismatch: {}", block_type, issue);
        }
        dispatched
    }
}

/// Registry with every built-in kind, created on first use.
pub fn builtin_registry() -> &'static BlockRegistry {
    static REGISTRY: OnceLock<BlockRegistry> = OnceLock::new();
    REGISTRY.get_or_init(BlockRegistry::builtin)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn content(value: Value) -> Content {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn unknown_types_fall_back_to_generic() {
        let registry = BlockRegistry::builtin();
        for block_type in ["", "div", "NotAThing", "heading ", "💥"] {
            let dispatched = registry.dispatch(block_type, &content(json!({ "title": "T" })));
            match dispatched.props {
                BlockProps::Generic(generic) => {
                    assert_eq!(generic.type_name, block_type);
                    assert_eq!(generic.title.as_deref(), Some("T"));
                }
                other => panic!("expected generic fallback, got {other:?}"),
            }
        }
    }

    #[test]
    fn aliases_resolve_to_the_same_kind() {
        let registry = BlockRegistry::builtin();
        for alias in ["question", "QuestionBlock", "question-strategic", "quiz-question"] {
            let dispatched = registry.dispatch(alias, &Content::new());
            assert!(matches!(dispatched.props, BlockProps::Question(_)), "{alias}");
        }
    }

    #[test]
    fn duplicate_keys_are_rejected() {
        let mut registry = BlockRegistry::builtin();
        let err = registry
            .register(BlockEntry::of::<TextProps>())
            .expect_err("text is already registered");
        assert_eq!(err, RegistryError::Duplicate("text".to_string()));
    }

    #[test]
    fn question_defaults_apply_per_field() {
        let registry = BlockRegistry::builtin();
        let dispatched = registry.dispatch(
            "QuestionBlock",
            &content(json!({ "question": "Favourite colour?", "options": [] })),
        );
        let BlockProps::Question(question) = dispatched.props else {
            panic!("expected question props");
        };
        assert_eq!(question.question, "Favourite colour?");
        assert!(question.options.is_empty());
        assert!(!question.multiple_selection);
        assert_eq!(question.max_selections, 1);
        assert!(dispatched.issues.is_empty());
    }

    #[test]
    fn wrong_prop_type_is_reported_and_defaulted() {
        let registry = BlockRegistry::builtin();
        let dispatched = registry.dispatch(
            "question",
            &content(json!({ "maxSelections": "three", "question": "Q" })),
        );
        let BlockProps::Question(question) = dispatched.props else {
            panic!("expected question props");
        };
        assert_eq!(question.max_selections, 1);
        assert_eq!(question.question, "Q");
        assert_eq!(dispatched.issues.len(), 1);
    }

    #[test]
    fn unparseable_props_use_kind_default() {
        let registry = BlockRegistry::builtin();
        let dispatched = registry.dispatch(
            "faq",
            &content(json!({ "items": [{ "question": 1 }] })),
        );
        assert_eq!(dispatched.props, BlockProps::Faq(FaqProps::default()));
        assert!(matches!(
            dispatched.issues.as_slice(),
            [PropIssue::Unparseable { .. }]
        ));
    }

    #[test]
    fn every_default_content_round_trips_into_its_kind() {
        let registry = BlockRegistry::builtin();
        for definition in registry.definitions() {
            let dispatched = registry.dispatch(definition.block_type, &definition.default_content());
            assert!(!dispatched.props.is_generic(), "{}", definition.block_type);
            assert!(dispatched.issues.is_empty(), "{}: {:?}", definition.block_type, dispatched.issues);
        }
    }

    #[test]
    fn categories_cover_every_definition() {
        let registry = BlockRegistry::builtin();
        let grouped: usize = BlockCategory::ALL
            .iter()
            .map(|c| registry.definitions_in(*c).len())
            .sum();
        assert_eq!(grouped, registry.definitions().count());
    }
}
