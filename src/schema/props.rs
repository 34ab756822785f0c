use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::*;
use crate::model::Content;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    Left,
    #[default]
    Center,
    Right,
}

impl Alignment {
    pub const OPTIONS: &'static [(&'static str, &'static str)] =
        &[("Left", "left"), ("Center", "center"), ("Right", "right")];

    pub fn css(self) -> &'static str {
        match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Size {
    Small,
    #[default]
    Medium,
    Large,
}

impl Size {
    pub const OPTIONS: &'static [(&'static str, &'static str)] =
        &[("Small", "small"), ("Medium", "medium"), ("Large", "large")];
}

/// Every renderable block, one variant per registered kind.
#[derive(Clone, Debug, PartialEq)]
pub enum BlockProps {
    Header(HeaderProps),
    Heading(HeadingProps),
    Text(TextProps),
    Image(ImageProps),
    Button(ButtonProps),
    Card(CardProps),
    SectionTitle(SectionTitleProps),
    QuizIntro(QuizIntroProps),
    Question(QuestionProps),
    Transition(TransitionProps),
    StyleResult(StyleResultProps),
    SecondaryStyles(SecondaryStylesProps),
    Countdown(CountdownProps),
    Pricing(PricingProps),
    Faq(FaqProps),
    Testimonials(TestimonialsProps),
    Guarantee(GuaranteeProps),
    Bonus(BonusProps),
    Mentor(MentorProps),
    Motivation(MotivationProps),
    BeforeAfter(BeforeAfterProps),
    SecurePurchase(SecurePurchaseProps),
    Generic(GenericProps),
}

macro_rules! block_props_from {
    ($($variant:ident($props:ty)),* $(,)?) => {
        $(
            impl From<$props> for BlockProps {
                fn from(props: $props) -> Self {
                    BlockProps::$variant(props)
                }
            }
        )*
    };
}

block_props_from! {
    Header(HeaderProps),
    Heading(HeadingProps),
    Text(TextProps),
    Image(ImageProps),
    Button(ButtonProps),
    Card(CardProps),
    SectionTitle(SectionTitleProps),
    QuizIntro(QuizIntroProps),
    Question(QuestionProps),
    Transition(TransitionProps),
    StyleResult(StyleResultProps),
    SecondaryStyles(SecondaryStylesProps),
    Countdown(CountdownProps),
    Pricing(PricingProps),
    Faq(FaqProps),
    Testimonials(TestimonialsProps),
    Guarantee(GuaranteeProps),
    Bonus(BonusProps),
    Mentor(MentorProps),
    Motivation(MotivationProps),
    BeforeAfter(BeforeAfterProps),
    SecurePurchase(SecurePurchaseProps),
    Generic(GenericProps),
}

impl BlockProps {
    pub fn is_generic(&self) -> bool {
        matches!(self, BlockProps::Generic(_))
    }

    /// Child block ids this block asks the renderer to draw inside it.
    pub fn child_ids(&self) -> &[String] {
        match self {
            BlockProps::Card(card) => &card.children,
            _ => &[],
        }
    }
}

/// Fallback for types missing from the registry.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GenericProps {
    pub type_name: String,
    pub title: Option<String>,
    pub content: Option<String>,
    pub text: Option<String>,
}

impl GenericProps {
    pub fn from_content(type_name: &str, props: &Content) -> Self {
        let string = |key: &str| {
            props
                .get(key)
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };
        Self {
            type_name: type_name.to_string(),
            title: string("title"),
            content: string("content"),
            text: string("text"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn generic_props_pick_string_fields_only() {
        let props = json!({ "title": "Hello", "content": 3, "text": "" });
        let generic = GenericProps::from_content("Mystery", props.as_object().unwrap());
        assert_eq!(generic.type_name, "Mystery");
        assert_eq!(generic.title.as_deref(), Some("Hello"));
        assert!(generic.content.is_none());
        assert!(generic.text.is_none());
    }

    #[test]
    fn only_cards_declare_children() {
        let card = BlockProps::Card(CardProps {
            children: vec!["a".into(), "b".into()],
            ..CardProps::default()
        });
        assert_eq!(card.child_ids().len(), 2);
        assert!(BlockProps::Text(TextProps::default()).child_ids().is_empty());
    }
}
