use serde::{Deserialize, Serialize};

use super::*;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CountdownProps {
    pub label: String,
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
}

impl Default for CountdownProps {
    fn default() -> Self {
        Self {
            label: "This offer expires in:".to_string(),
            hours: 1,
            minutes: 59,
            seconds: 42,
        }
    }
}

impl CountdownProps {
    pub fn digits(&self) -> [String; 3] {
        [self.hours, self.minutes.min(59), self.seconds.min(59)].map(|n| format!("{n:02}"))
    }
}

impl BlockKind for CountdownProps {
    const TYPE: &'static str = "countdown";
    const NAME: &'static str = "Countdown";
    const ICON: &'static str = "clock";
    const CATEGORY: BlockCategory = BlockCategory::Offer;
    const ALIASES: &'static [&'static str] = &["CountdownTimer", "countdown-timer-component-real"];

    fn fields() -> Vec<PropertySchema> {
        vec![
            PropertySchema::text("label", "Label"),
            PropertySchema::number("hours", "Hours", 0.0, 99.0),
            PropertySchema::number("minutes", "Minutes", 0.0, 59.0),
            PropertySchema::number("seconds", "Seconds", 0.0, 59.0),
        ]
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PricingProps {
    pub title: String,
    pub installments: String,
    pub full_price: String,
    pub savings: String,
}

impl Default for PricingProps {
    fn default() -> Self {
        Self {
            title: "Limited time offer".to_string(),
            installments: "5x $8.83".to_string(),
            full_price: "$39.90".to_string(),
            savings: "77% OFF".to_string(),
        }
    }
}

impl BlockKind for PricingProps {
    const TYPE: &'static str = "pricing";
    const NAME: &'static str = "Pricing";
    const ICON: &'static str = "tag";
    const CATEGORY: BlockCategory = BlockCategory::Offer;
    const ALIASES: &'static [&'static str] = &["PricingSection", "pricing-section-component-real"];

    fn fields() -> Vec<PropertySchema> {
        vec![
            PropertySchema::text("title", "Title"),
            PropertySchema::text("installments", "Installments"),
            PropertySchema::text("fullPrice", "Full price"),
            PropertySchema::text("savings", "Savings"),
        ]
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FaqItem {
    pub question: String,
    pub answer: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FaqProps {
    pub title: String,
    pub items: Vec<FaqItem>,
}

impl Default for FaqProps {
    fn default() -> Self {
        let item = |question: &str, answer: &str| FaqItem {
            question: question.to_string(),
            answer: answer.to_string(),
        };
        Self {
            title: "Frequently asked questions".to_string(),
            items: vec![
                item(
                    "How does the quiz work?",
                    "Answer a few questions about your preferences and get a personalised result.",
                ),
                item("How long does it take?", "About five minutes."),
                item("Is the material digital?", "Yes, everything is emailed right after purchase."),
            ],
        }
    }
}

impl BlockKind for FaqProps {
    const TYPE: &'static str = "faq";
    const NAME: &'static str = "FAQ";
    const ICON: &'static str = "message-circle";
    const CATEGORY: BlockCategory = BlockCategory::Offer;
    const ALIASES: &'static [&'static str] = &["FaqSectionNew", "faq-section-component-real"];

    fn fields() -> Vec<PropertySchema> {
        vec![
            PropertySchema::text("title", "Title"),
            PropertySchema::new("items", "Questions", PropertyKind::List)
                .help("Objects with question and answer"),
        ]
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Testimonial {
    pub name: String,
    pub quote: String,
    pub rating: u8,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TestimonialsProps {
    pub title: String,
    pub items: Vec<Testimonial>,
}

impl Default for TestimonialsProps {
    fn default() -> Self {
        Self {
            title: "What our customers say".to_string(),
            items: vec![Testimonial {
                name: "Mariangela".to_string(),
                quote: "I finally understand what works for me.".to_string(),
                rating: 5,
            }],
        }
    }
}

impl BlockKind for TestimonialsProps {
    const TYPE: &'static str = "testimonials";
    const NAME: &'static str = "Testimonials";
    const ICON: &'static str = "star";
    const CATEGORY: BlockCategory = BlockCategory::Offer;
    const ALIASES: &'static [&'static str] = &["Testimonials", "testimonials-component-real"];

    fn fields() -> Vec<PropertySchema> {
        vec![
            PropertySchema::text("title", "Title"),
            PropertySchema::new("items", "Testimonials", PropertyKind::List)
                .help("Objects with name, quote and rating"),
        ]
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuaranteeProps {
    pub title: String,
    pub days: u32,
    pub text: String,
}

impl Default for GuaranteeProps {
    fn default() -> Self {
        Self {
            title: "Risk-free guarantee".to_string(),
            days: 7,
            text: "If you are not satisfied, we refund every cent.".to_string(),
        }
    }
}

impl BlockKind for GuaranteeProps {
    const TYPE: &'static str = "guarantee";
    const NAME: &'static str = "Guarantee";
    const ICON: &'static str = "shield";
    const CATEGORY: BlockCategory = BlockCategory::Offer;
    const ALIASES: &'static [&'static str] = &["GuaranteeSection", "guarantee-component-real"];

    fn fields() -> Vec<PropertySchema> {
        vec![
            PropertySchema::text("title", "Title"),
            PropertySchema::number("days", "Days", 1.0, 365.0),
            PropertySchema::textarea("text", "Text", 3),
        ]
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BonusProps {
    pub title: String,
    pub items: Vec<String>,
}

impl Default for BonusProps {
    fn default() -> Self {
        Self {
            title: "Exclusive bonuses".to_string(),
            items: vec![
                "Visagism guide".to_string(),
                "Capsule wardrobe checklist".to_string(),
            ],
        }
    }
}

impl BlockKind for BonusProps {
    const TYPE: &'static str = "bonus";
    const NAME: &'static str = "Bonus";
    const ICON: &'static str = "gift";
    const CATEGORY: BlockCategory = BlockCategory::Offer;
    const ALIASES: &'static [&'static str] = &["BonusSection"];

    fn fields() -> Vec<PropertySchema> {
        vec![
            PropertySchema::text("title", "Title"),
            PropertySchema::new("items", "Bonus items", PropertyKind::List),
        ]
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MentorProps {
    pub name: String,
    pub bio: String,
    pub image_url: String,
}

impl Default for MentorProps {
    fn default() -> Self {
        Self {
            name: "Your mentor".to_string(),
            bio: "Image consultant with more than ten years of experience.".to_string(),
            image_url: String::new(),
        }
    }
}

impl BlockKind for MentorProps {
    const TYPE: &'static str = "mentor";
    const NAME: &'static str = "Mentor";
    const ICON: &'static str = "user";
    const CATEGORY: BlockCategory = BlockCategory::Offer;
    const ALIASES: &'static [&'static str] = &["MentorSection"];

    fn fields() -> Vec<PropertySchema> {
        vec![
            PropertySchema::text("name", "Name"),
            PropertySchema::textarea("bio", "Bio", 3),
            PropertySchema::new("imageUrl", "Photo", PropertyKind::Image),
        ]
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotivationProps {
    pub title: String,
    pub text: String,
}

impl Default for MotivationProps {
    fn default() -> Self {
        Self {
            title: "Why knowing your style matters".to_string(),
            text: "Dressing with intention saves time, money and builds confidence.".to_string(),
        }
    }
}

impl BlockKind for MotivationProps {
    const TYPE: &'static str = "motivation";
    const NAME: &'static str = "Motivation";
    const ICON: &'static str = "heart";
    const CATEGORY: BlockCategory = BlockCategory::Offer;
    const ALIASES: &'static [&'static str] = &["MotivationSection"];

    fn fields() -> Vec<PropertySchema> {
        vec![
            PropertySchema::text("title", "Title"),
            PropertySchema::textarea("text", "Text", 3),
        ]
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Transformation {
    pub before_image: String,
    pub after_image: String,
    pub caption: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BeforeAfterProps {
    pub title: String,
    pub items: Vec<Transformation>,
}

impl Default for BeforeAfterProps {
    fn default() -> Self {
        Self {
            title: "Real transformations".to_string(),
            items: Vec::new(),
        }
    }
}

impl BlockKind for BeforeAfterProps {
    const TYPE: &'static str = "before-after";
    const NAME: &'static str = "Before and after";
    const ICON: &'static str = "repeat";
    const CATEGORY: BlockCategory = BlockCategory::Offer;
    const ALIASES: &'static [&'static str] = &["BeforeAfterTransformation"];

    fn fields() -> Vec<PropertySchema> {
        vec![
            PropertySchema::text("title", "Title"),
            PropertySchema::new("items", "Transformations", PropertyKind::List)
                .help("Objects with beforeImage, afterImage and caption"),
        ]
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurePurchaseProps {
    pub text: String,
}

impl Default for SecurePurchaseProps {
    fn default() -> Self {
        Self {
            text: "Secure purchase. Your data is protected.".to_string(),
        }
    }
}

impl BlockKind for SecurePurchaseProps {
    const TYPE: &'static str = "secure-purchase";
    const NAME: &'static str = "Secure purchase";
    const ICON: &'static str = "lock";
    const CATEGORY: BlockCategory = BlockCategory::Offer;
    const ALIASES: &'static [&'static str] = &["SecurePurchaseElement"];

    fn fields() -> Vec<PropertySchema> {
        vec![PropertySchema::text("text", "Text")]
    }
}
