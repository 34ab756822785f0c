use serde::{Deserialize, Deserializer, Serialize};

use super::*;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HeaderProps {
    pub logo: String,
    pub logo_alt: String,
    pub logo_height: u32,
    pub user_name: String,
    pub primary_style: String,
}

impl Default for HeaderProps {
    fn default() -> Self {
        Self {
            logo: "/assets/logo.webp".to_string(),
            logo_alt: "Logo".to_string(),
            logo_height: 60,
            user_name: String::new(),
            primary_style: "dynamic".to_string(),
        }
    }
}

impl BlockKind for HeaderProps {
    const TYPE: &'static str = "header";
    const NAME: &'static str = "Brand header";
    const ICON: &'static str = "crown";
    const CATEGORY: BlockCategory = BlockCategory::Layout;
    const ALIASES: &'static [&'static str] = &["Header", "header-component-real"];

    fn fields() -> Vec<PropertySchema> {
        vec![
            PropertySchema::new("logo", "Logo", PropertyKind::Image),
            PropertySchema::text("logoAlt", "Logo alt text"),
            PropertySchema::number("logoHeight", "Logo height (px)", 16.0, 240.0),
            PropertySchema::text("userName", "Visitor name").help("Filled in from the intro step"),
            PropertySchema::text("primaryStyle", "Primary style"),
        ]
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HeadingProps {
    pub text: String,
    pub subtitle: String,
    pub alignment: Alignment,
    pub title_size: Size,
}

impl Default for HeadingProps {
    fn default() -> Self {
        Self {
            text: "Heading".to_string(),
            subtitle: String::new(),
            alignment: Alignment::Center,
            title_size: Size::Large,
        }
    }
}

impl BlockKind for HeadingProps {
    const TYPE: &'static str = "heading";
    const NAME: &'static str = "Heading";
    const ICON: &'static str = "type";
    const CATEGORY: BlockCategory = BlockCategory::Content;
    const ALIASES: &'static [&'static str] = &["HeaderBlock", "title"];

    fn fields() -> Vec<PropertySchema> {
        vec![
            PropertySchema::text("text", "Text").legacy(&["title"]),
            PropertySchema::text("subtitle", "Subtitle"),
            PropertySchema::select("alignment", "Alignment", Alignment::OPTIONS),
            PropertySchema::select("titleSize", "Size", Size::OPTIONS),
        ]
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TextProps {
    pub content: String,
    pub alignment: Alignment,
    pub font_size: Size,
}

impl Default for TextProps {
    fn default() -> Self {
        Self {
            content: "Paragraph text".to_string(),
            alignment: Alignment::Left,
            font_size: Size::Medium,
        }
    }
}

impl BlockKind for TextProps {
    const TYPE: &'static str = "text";
    const NAME: &'static str = "Paragraph";
    const ICON: &'static str = "align-left";
    const CATEGORY: BlockCategory = BlockCategory::Content;
    const ALIASES: &'static [&'static str] = &["TextBlock", "paragraph", "text-inline"];

    fn fields() -> Vec<PropertySchema> {
        vec![
            PropertySchema::textarea("content", "Text", 4).legacy(&["text"]),
            PropertySchema::select("alignment", "Alignment", Alignment::OPTIONS),
            PropertySchema::select("fontSize", "Font size", Size::OPTIONS),
        ]
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ImageProps {
    pub src: String,
    pub alt: String,
    pub width: String,
    pub alignment: Alignment,
}

impl Default for ImageProps {
    fn default() -> Self {
        Self {
            src: "https://via.placeholder.com/400x300?text=Image".to_string(),
            alt: "Image".to_string(),
            width: "100%".to_string(),
            alignment: Alignment::Center,
        }
    }
}

impl BlockKind for ImageProps {
    const TYPE: &'static str = "image";
    const NAME: &'static str = "Image";
    const ICON: &'static str = "image";
    const CATEGORY: BlockCategory = BlockCategory::Content;
    const ALIASES: &'static [&'static str] = &[
        "ImageBlock",
        "FixedIntroImage",
        "fixed-intro-image-component-real",
        "image-display-inline",
    ];

    fn fields() -> Vec<PropertySchema> {
        vec![
            PropertySchema::new("src", "Image URL", PropertyKind::Image).legacy(&["imageUrl"]),
            PropertySchema::text("alt", "Alt text").legacy(&["imageAlt"]),
            PropertySchema::text("width", "Width").placeholder("100%"),
            PropertySchema::select("alignment", "Alignment", Alignment::OPTIONS),
        ]
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonVariant {
    #[default]
    Primary,
    Secondary,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ButtonProps {
    pub text: String,
    pub url: String,
    pub size: Size,
    pub full_width: bool,
    pub variant: ButtonVariant,
}

impl Default for ButtonProps {
    fn default() -> Self {
        Self {
            text: "Click here".to_string(),
            url: String::new(),
            size: Size::Medium,
            full_width: false,
            variant: ButtonVariant::Primary,
        }
    }
}

impl BlockKind for ButtonProps {
    const TYPE: &'static str = "button";
    const NAME: &'static str = "Button";
    const ICON: &'static str = "mouse-pointer";
    const CATEGORY: BlockCategory = BlockCategory::Content;
    const ALIASES: &'static [&'static str] =
        &["Button", "ButtonBlock", "button-component-real", "button-inline"];

    fn fields() -> Vec<PropertySchema> {
        vec![
            PropertySchema::text("text", "Label").legacy(&["children", "buttonText"]),
            PropertySchema::new("url", "Link", PropertyKind::Url).legacy(&["buttonUrl"]),
            PropertySchema::select("size", "Size", Size::OPTIONS),
            PropertySchema::new("fullWidth", "Full width", PropertyKind::Boolean),
            PropertySchema::select(
                "variant",
                "Style",
                &[("Primary", "primary"), ("Secondary", "secondary")],
            ),
        ]
    }
}

/// Container that renders other blocks of the same page by id.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CardProps {
    #[serde(deserialize_with = "child_ids")]
    pub children: Vec<String>,
    pub class_name: String,
}

impl BlockKind for CardProps {
    const TYPE: &'static str = "card";
    const NAME: &'static str = "Card";
    const ICON: &'static str = "square";
    const CATEGORY: BlockCategory = BlockCategory::Layout;
    const ALIASES: &'static [&'static str] = &["Card", "card-component-real"];

    fn fields() -> Vec<PropertySchema> {
        vec![
            PropertySchema::new("children", "Child block ids", PropertyKind::List)
                .help("Blocks of this page drawn inside the card, in order"),
            PropertySchema::text("className", "CSS class"),
        ]
    }
}

/// Accepts children either as bare ids or as `{ "id": .. }` objects.
fn child_ids<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum ChildRef {
        Id(String),
        Block { id: String },
    }

    let refs = Vec::<ChildRef>::deserialize(deserializer)?;
    Ok(refs
        .into_iter()
        .map(|child| match child {
            ChildRef::Id(id) | ChildRef::Block { id } => id,
        })
        .collect())
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SectionTitleProps {
    pub badge: String,
    pub title: String,
    pub subtitle: String,
}

impl Default for SectionTitleProps {
    fn default() -> Self {
        Self {
            badge: "3000+ happy customers".to_string(),
            title: "Discover your predominant style".to_string(),
            subtitle: "Finally own a wardrobe that works for you".to_string(),
        }
    }
}

impl BlockKind for SectionTitleProps {
    const TYPE: &'static str = "section-title";
    const NAME: &'static str = "Section title";
    const ICON: &'static str = "award";
    const CATEGORY: BlockCategory = BlockCategory::Layout;
    const ALIASES: &'static [&'static str] = &["SectionTitle"];

    fn fields() -> Vec<PropertySchema> {
        vec![
            PropertySchema::text("badge", "Badge"),
            PropertySchema::text("title", "Title"),
            PropertySchema::textarea("subtitle", "Subtitle", 2),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[test]
    fn card_children_accept_ids_and_objects() {
        let card: CardProps = serde_json::from_value(json!({
            "children": ["intro-text", { "id": "cta", "type": "button" }]
        }))
        .unwrap();
        assert_eq!(card.children, vec!["intro-text", "cta"]);
    }

    #[test]
    fn heading_reads_legacy_title() {
        let (accepted, _) =
            definition_of::<HeadingProps>().validate(json!({ "title": "Welcome" }).as_object().unwrap());
        let heading: HeadingProps = serde_json::from_value(Value::Object(accepted)).unwrap();
        assert_eq!(heading.text, "Welcome");
        assert_eq!(heading.title_size, Size::Large);
    }
}
