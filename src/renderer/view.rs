use dioxus::prelude::*;

use super::resolve::{RenderedBlock, ResolvedBlock};
use crate::model::Styles;
use crate::schema::*;

/// A visitor's answer to a question block.
#[derive(Clone, Debug, PartialEq)]
pub struct Answer {
    pub block_id: String,
    pub selected: Vec<String>,
}

/// Interaction hooks forwarded to leaf blocks. The renderer never calls
/// these itself.
#[derive(Clone, Default, PartialEq)]
pub struct BlockCallbacks {
    pub on_answer: Option<EventHandler<Answer>>,
    /// Receives the id of the clicked button block.
    pub on_click: Option<EventHandler<String>>,
    /// Receives the name typed into a quiz intro.
    pub on_start: Option<EventHandler<String>>,
}

pub fn style_string(styles: Option<&Styles>) -> String {
    styles
        .map(|styles| {
            styles
                .iter()
                .map(|(k, v)| format!("{}: {};", k, v))
                .collect::<Vec<_>>()
                .join(" ")
        })
        .unwrap_or_default()
}

#[component]
pub fn ResolvedBlockView(block: ResolvedBlock, #[props(default)] callbacks: BlockCallbacks) -> Element {
    match block {
        ResolvedBlock::Rendered(rendered) => rsx! {
            RenderedBlockView { block: rendered, callbacks }
        },
        ResolvedBlock::NotConfigured { block_id } => rsx! {
            NotConfigured { block_id }
        },
        ResolvedBlock::Failed { block_id, error } => rsx! {
            div {
                class: "block-error",
                "data-block-id": "{block_id}",
                style: "border: 2px solid #f44336; color: #b71c1c; padding: 12px; border-radius: 4px; font-size: 13px;",
                "{error}"
            }
        },
    }
}

#[component]
fn RenderedBlockView(block: RenderedBlock, callbacks: BlockCallbacks) -> Element {
    let style = style_string(block.styles.as_ref());
    let class = format!("block block-{} {}", block.component_type, block.class_name);

    rsx! {
        div {
            class: "{class}",
            style: "{style}",
            "data-block-id": "{block.id}",
            if let BlockProps::Card(_) = &block.props {
                div {
                    class: "card",
                    style: "background: white; border-radius: 8px; padding: 16px; box-shadow: 0 2px 8px rgba(0,0,0,0.1);",
                    for child in block.children.iter() {
                        ResolvedBlockView {
                            key: "{child.block_id()}",
                            block: child.clone(),
                            callbacks: callbacks.clone(),
                        }
                    }
                }
            } else {
                BlockPropsView { block_id: block.id.clone(), props: block.props.clone(), callbacks: callbacks.clone() }
            }
        }
    }
}

/// Dashed box shown where a block id has no configuration.
#[component]
pub fn NotConfigured(block_id: String) -> Element {
    rsx! {
        div {
            class: "block-not-configured",
            style: "border: 2px dashed #ccc; padding: 16px; text-align: center; color: #999; font-size: 13px;",
            "Block not configured: {block_id}"
        }
    }
}

/// Leaf rendering of one typed block.
#[component]
pub fn BlockPropsView(block_id: String, props: BlockProps, #[props(default)] callbacks: BlockCallbacks) -> Element {
    match props {
        BlockProps::Header(b) => rsx! {
            header {
                style: "display: flex; flex-direction: column; align-items: center; gap: 8px; padding: 16px;",
                img { src: "{b.logo}", alt: "{b.logo_alt}", style: "height: {b.logo_height}px;" }
                if !b.user_name.is_empty() {
                    p { style: "margin: 0;", "Hello, {b.user_name}" }
                }
            }
        },
        BlockProps::Heading(b) => {
            let size = match b.title_size {
                Size::Small => "20px",
                Size::Medium => "28px",
                Size::Large => "36px",
            };
            rsx! {
                div { style: "text-align: {b.alignment.css()};",
                    h1 { style: "font-size: {size}; margin: 0 0 8px 0;", "{b.text}" }
                    if !b.subtitle.is_empty() {
                        p { style: "color: #666; margin: 0;", "{b.subtitle}" }
                    }
                }
            }
        }
        BlockProps::Text(b) => {
            let size = match b.font_size {
                Size::Small => "14px",
                Size::Medium => "16px",
                Size::Large => "20px",
            };
            rsx! {
                p { style: "text-align: {b.alignment.css()}; font-size: {size}; line-height: 1.5;", "{b.content}" }
            }
        }
        BlockProps::Image(b) => rsx! {
            div { style: "text-align: {b.alignment.css()};",
                img { src: "{b.src}", alt: "{b.alt}", style: "width: {b.width}; max-width: 100%;" }
            }
        },
        BlockProps::Button(b) => {
            let (background, color) = match b.variant {
                ButtonVariant::Primary => ("#B89B7A", "white"),
                ButtonVariant::Secondary => ("white", "#432818"),
            };
            let padding = match b.size {
                Size::Small => "8px 16px",
                Size::Medium => "12px 24px",
                Size::Large => "16px 32px",
            };
            let width = if b.full_width { "100%" } else { "auto" };
            rsx! {
                button {
                    style: "background: {background}; color: {color}; padding: {padding}; width: {width}; border: 1px solid #B89B7A; border-radius: 6px; cursor: pointer;",
                    onclick: move |_| {
                        if let Some(handler) = callbacks.on_click {
                            handler.call(block_id.clone());
                        }
                    },
                    "{b.text}"
                }
            }
        }
        BlockProps::Card(_) => rsx! {
            div { class: "card" }
        },
        BlockProps::SectionTitle(b) => rsx! {
            div { style: "text-align: center; padding: 16px;",
                span { style: "display: inline-block; background: #f5eee6; border-radius: 999px; padding: 4px 12px; font-size: 12px;", "{b.badge}" }
                h2 { style: "margin: 12px 0 4px 0;", "{b.title}" }
                p { style: "color: #666; margin: 0;", "{b.subtitle}" }
            }
        },
        BlockProps::QuizIntro(b) => rsx! {
            QuizIntroView { block: b, on_start: callbacks.on_start }
        },
        BlockProps::Question(b) => rsx! {
            QuestionView { block_id, props: b, on_answer: callbacks.on_answer }
        },
        BlockProps::Transition(b) => rsx! {
            div { style: "text-align: center; padding: 32px;",
                if b.show_spinner {
                    div { class: "spinner", style: "margin: 0 auto 16px auto; width: 32px; height: 32px; border: 3px solid #eee; border-top-color: #B89B7A; border-radius: 50%;" }
                }
                h2 { style: "margin: 0 0 8px 0;", "{b.title}" }
                p { style: "color: #666;", "{b.message}" }
            }
        },
        BlockProps::StyleResult(b) => rsx! {
            div { style: "padding: 16px;",
                h2 { style: "margin: 0 0 8px 0;", "Your style: {b.style_name}" }
                div { style: "background: #eee; border-radius: 4px; height: 8px;",
                    div { style: "background: #B89B7A; border-radius: 4px; height: 8px; width: {b.percentage}%;" }
                }
                p { style: "font-size: 12px; color: #666;", "{b.percentage}%" }
                if !b.image_url.is_empty() {
                    img { src: "{b.image_url}", alt: "{b.style_name}", style: "max-width: 100%;" }
                }
                p { "{b.description}" }
            }
        },
        BlockProps::SecondaryStyles(b) => rsx! {
            div { style: "padding: 16px;",
                h3 { style: "margin: 0 0 8px 0;", "{b.title}" }
                for share in b.secondary_styles.iter() {
                    div { style: "display: flex; justify-content: space-between; font-size: 14px;",
                        span { "{share.category}" }
                        span { "{share.percentage}%" }
                    }
                }
            }
        },
        BlockProps::Countdown(b) => {
            let [hours, minutes, seconds] = b.digits();
            rsx! {
                div { style: "text-align: center; padding: 12px;",
                    p { style: "margin: 0 0 4px 0;", "{b.label}" }
                    strong { style: "font-size: 28px; font-variant-numeric: tabular-nums;", "{hours}:{minutes}:{seconds}" }
                }
            }
        }
        BlockProps::Pricing(b) => rsx! {
            div { style: "text-align: center; padding: 16px; border: 1px solid #eee; border-radius: 8px;",
                h3 { style: "margin: 0;", "{b.title}" }
                span { style: "color: #2e7d32; font-weight: bold;", "{b.savings}" }
                p { style: "font-size: 28px; margin: 8px 0;", "{b.installments}" }
                p { style: "color: #666; margin: 0;", "or {b.full_price} upfront" }
            }
        },
        BlockProps::Faq(b) => rsx! {
            div { style: "padding: 16px;",
                h3 { "{b.title}" }
                for item in b.items.iter() {
                    details { style: "border-bottom: 1px solid #eee; padding: 8px 0;",
                        summary { style: "cursor: pointer;", "{item.question}" }
                        p { style: "color: #555;", "{item.answer}" }
                    }
                }
            }
        },
        BlockProps::Testimonials(b) => rsx! {
            div { style: "padding: 16px;",
                h3 { "{b.title}" }
                for item in b.items.iter() {
                    blockquote { style: "margin: 8px 0; padding: 8px 12px; border-left: 3px solid #B89B7A;",
                        p { style: "margin: 0;", "{item.quote}" }
                        footer { style: "font-size: 12px; color: #666;", "{item.name} · {item.rating}/5" }
                    }
                }
            }
        },
        BlockProps::Guarantee(b) => rsx! {
            div { style: "text-align: center; padding: 16px;",
                h3 { style: "margin: 0;", "{b.title}" }
                strong { "{b.days} days" }
                p { "{b.text}" }
            }
        },
        BlockProps::Bonus(b) => rsx! {
            div { style: "padding: 16px;",
                h3 { "{b.title}" }
                ul {
                    for item in b.items.iter() {
                        li { "{item}" }
                    }
                }
            }
        },
        BlockProps::Mentor(b) => rsx! {
            div { style: "display: flex; gap: 16px; padding: 16px; align-items: center;",
                if !b.image_url.is_empty() {
                    img { src: "{b.image_url}", alt: "{b.name}", style: "width: 96px; height: 96px; border-radius: 50%; object-fit: cover;" }
                }
                div {
                    h3 { style: "margin: 0;", "{b.name}" }
                    p { style: "color: #555;", "{b.bio}" }
                }
            }
        },
        BlockProps::Motivation(b) => rsx! {
            div { style: "padding: 16px;",
                h3 { "{b.title}" }
                p { "{b.text}" }
            }
        },
        BlockProps::BeforeAfter(b) => rsx! {
            div { style: "padding: 16px;",
                h3 { "{b.title}" }
                for item in b.items.iter() {
                    figure { style: "display: flex; gap: 8px; margin: 8px 0;",
                        img { src: "{item.before_image}", alt: "Before", style: "width: 50%;" }
                        img { src: "{item.after_image}", alt: "After", style: "width: 50%;" }
                        figcaption { "{item.caption}" }
                    }
                }
            }
        },
        BlockProps::SecurePurchase(b) => rsx! {
            p { style: "text-align: center; font-size: 12px; color: #666;", "🔒 {b.text}" }
        },
        BlockProps::Generic(b) => rsx! {
            GenericBlock { block: b }
        },
    }
}

/// Labelled box for block types the registry does not know.
#[component]
fn GenericBlock(block: GenericProps) -> Element {
    let body = block.title.clone().or(block.content.clone()).or(block.text.clone());
    rsx! {
        div {
            class: "block-generic",
            style: "border: 1px solid #ddd; border-radius: 4px; padding: 12px; background: #fafafa;",
            div { style: "font-size: 11px; text-transform: uppercase; color: #999; margin-bottom: 4px;", "{block.type_name}" }
            {match body {
                Some(body) => rsx! { div { "{body}" } },
                None => rsx! { div { style: "color: #999;", "{block.type_name}" } },
            }}
        }
    }
}

#[component]
fn QuizIntroView(block: QuizIntroProps, on_start: Option<EventHandler<String>>) -> Element {
    let mut name = use_signal(String::new);

    rsx! {
        form {
            style: "display: flex; flex-direction: column; align-items: center; gap: 12px; padding: 24px;",
            onsubmit: move |evt| {
                evt.prevent_default();
                let typed = name.read().trim().to_string();
                if typed.is_empty() {
                    return;
                }
                if let Some(handler) = on_start {
                    handler.call(typed);
                }
            },
            img { src: "{block.logo_url}", alt: "Logo", style: "height: 48px;" }
            h1 { style: "text-align: center; margin: 0;", "{block.title}" }
            p { style: "text-align: center; color: #666; margin: 0;", "{block.subtitle}" }
            img { src: "{block.image_url}", alt: "", style: "max-width: 100%;" }
            label { r#for: "quiz-intro-name", "{block.name_label}" }
            input {
                id: "quiz-intro-name",
                r#type: "text",
                placeholder: "{block.name_placeholder}",
                value: "{name}",
                oninput: move |e| name.set(e.value()),
            }
            button {
                r#type: "submit",
                disabled: name.read().trim().is_empty(),
                "{block.button_text}"
            }
        }
    }
}

#[component]
fn QuestionView(block_id: String, props: QuestionProps, on_answer: Option<EventHandler<Answer>>) -> Element {
    let mut selected = use_signal(Vec::<String>::new);
    let layout = match props.option_layout {
        OptionLayout::Vertical => "display: flex; flex-direction: column; gap: 8px;",
        OptionLayout::Horizontal => "display: flex; flex-wrap: wrap; gap: 8px;",
        OptionLayout::Grid => "display: grid; grid-template-columns: repeat(2, 1fr); gap: 8px;",
    };
    let required = props.required_selections();
    let ready = selected.read().len() >= required;

    rsx! {
        div { style: "padding: 16px;",
            if props.progress_percent > 0 {
                div { style: "background: #eee; height: 4px; margin-bottom: 12px;",
                    div { style: "background: #B89B7A; height: 4px; width: {props.progress_percent}%;" }
                }
            }
            h2 { style: "margin: 0 0 12px 0;", "{props.question}" }
            if props.multiple_selection {
                p { style: "font-size: 12px; color: #666;", "Pick {required} to continue" }
            }
            div { style: "{layout}",
                for option in props.options.iter().cloned() {
                    {
                        let is_selected = selected.read().contains(&option.id);
                        let border = if is_selected { "#B89B7A" } else { "#ddd" };
                        let image = option.image_url.clone().filter(|_| props.show_images);
                        let question = props.clone();
                        let option_id = option.id.clone();
                        rsx! {
                            button {
                                key: "{option.id}",
                                style: "border: 2px solid {border}; background: white; border-radius: 6px; padding: 12px; cursor: pointer; text-align: left;",
                                onclick: move |_| question.toggle(&mut selected.write(), &option_id),
                                if let Some(url) = image {
                                    img { src: "{url}", alt: "{option.text}", style: "width: 100%;" }
                                }
                                "{option.text}"
                            }
                        }
                    }
                }
            }
            button {
                style: "margin-top: 12px;",
                disabled: !ready,
                onclick: move |_| {
                    if let Some(handler) = on_answer {
                        handler.call(Answer {
                            block_id: block_id.clone(),
                            selected: selected.read().clone(),
                        });
                    }
                },
                "Continue"
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn style_string_joins_declarations() {
        let mut styles = Styles::new();
        styles.insert("color".to_string(), "red".to_string());
        styles.insert("margin".to_string(), "0".to_string());
        assert_eq!(style_string(Some(&styles)), "color: red; margin: 0;");
        assert_eq!(style_string(None), "");
    }
}
