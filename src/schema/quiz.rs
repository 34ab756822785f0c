use serde::{Deserialize, Serialize};

use super::*;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct QuizIntroProps {
    pub logo_url: String,
    pub title: String,
    pub subtitle: String,
    pub image_url: String,
    pub name_label: String,
    pub name_placeholder: String,
    pub button_text: String,
}

impl Default for QuizIntroProps {
    fn default() -> Self {
        Self {
            logo_url: "/assets/logo.webp".to_string(),
            title: "Discover your personal style in 2 minutes".to_string(),
            subtitle: "Answer a few quick questions and find the style that suits you best"
                .to_string(),
            image_url: "/assets/intro.jpg".to_string(),
            name_label: "What is your name?".to_string(),
            name_placeholder: "Type your first name".to_string(),
            button_text: "Start the quiz".to_string(),
        }
    }
}

impl BlockKind for QuizIntroProps {
    const TYPE: &'static str = "quiz-intro";
    const NAME: &'static str = "Quiz intro";
    const ICON: &'static str = "play";
    const CATEGORY: BlockCategory = BlockCategory::Quiz;
    const ALIASES: &'static [&'static str] = &["QuizIntro", "quiz-intro-header"];

    fn fields() -> Vec<PropertySchema> {
        vec![
            PropertySchema::new("logoUrl", "Logo", PropertyKind::Image),
            PropertySchema::text("title", "Title"),
            PropertySchema::textarea("subtitle", "Subtitle", 2),
            PropertySchema::new("imageUrl", "Hero image", PropertyKind::Image),
            PropertySchema::text("nameLabel", "Name label"),
            PropertySchema::text("namePlaceholder", "Name placeholder"),
            PropertySchema::text("buttonText", "Start button"),
        ]
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct QuestionOption {
    pub id: String,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Style category this option scores for.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl QuestionOption {
    fn new(id: &str, text: &str, category: &str) -> Self {
        Self {
            id: id.to_string(),
            text: text.to_string(),
            image_url: None,
            category: Some(category.to_string()),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionLayout {
    #[default]
    Vertical,
    Horizontal,
    Grid,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct QuestionProps {
    pub question: String,
    pub options: Vec<QuestionOption>,
    pub multiple_selection: bool,
    pub min_selections: u32,
    pub max_selections: u32,
    pub show_images: bool,
    pub option_layout: OptionLayout,
    pub progress_percent: u8,
}

impl Default for QuestionProps {
    fn default() -> Self {
        Self {
            question: "Which clothes do you feel best in?".to_string(),
            options: vec![
                QuestionOption::new("a", "Comfortable and practical", "natural"),
                QuestionOption::new("b", "Timeless and discreet", "classic"),
                QuestionOption::new("c", "Delicate and feminine", "romantic"),
                QuestionOption::new("d", "Striking and bold", "dramatic"),
            ],
            multiple_selection: false,
            min_selections: 1,
            max_selections: 1,
            show_images: false,
            option_layout: OptionLayout::Vertical,
            progress_percent: 0,
        }
    }
}

impl QuestionProps {
    /// Number of picks the visitor must make before the answer is complete.
    pub fn required_selections(&self) -> usize {
        if self.multiple_selection {
            self.min_selections.max(1) as usize
        } else {
            1
        }
    }

    /// Toggles `option_id` in `selected`, honouring the selection limits.
    pub fn toggle(&self, selected: &mut Vec<String>, option_id: &str) {
        if let Some(pos) = selected.iter().position(|id| id == option_id) {
            selected.remove(pos);
            return;
        }
        if !self.multiple_selection {
            selected.clear();
        } else if selected.len() >= self.max_selections.max(1) as usize {
            return;
        }
        selected.push(option_id.to_string());
    }
}

impl BlockKind for QuestionProps {
    const TYPE: &'static str = "question";
    const NAME: &'static str = "Question";
    const ICON: &'static str = "help-circle";
    const CATEGORY: BlockCategory = BlockCategory::Quiz;
    const ALIASES: &'static [&'static str] = &[
        "QuestionBlock",
        "StrategicQuestionBlock",
        "question-multiple",
        "question-strategic",
        "quiz-question",
    ];

    fn fields() -> Vec<PropertySchema> {
        vec![
            PropertySchema::textarea("question", "Question", 2).legacy(&["title"]),
            PropertySchema::new("options", "Options", PropertyKind::List)
                .help("Objects with id, text, optional imageUrl and category"),
            PropertySchema::new("multipleSelection", "Multiple selection", PropertyKind::Boolean),
            PropertySchema::number("minSelections", "Minimum selections", 1.0, 10.0),
            PropertySchema::number("maxSelections", "Maximum selections", 1.0, 10.0),
            PropertySchema::new("showImages", "Show option images", PropertyKind::Boolean),
            PropertySchema::select(
                "optionLayout",
                "Layout",
                &[("Vertical", "vertical"), ("Horizontal", "horizontal"), ("Grid", "grid")],
            ),
            PropertySchema {
                min: Some(0.0),
                max: Some(100.0),
                ..PropertySchema::new("progressPercent", "Progress (%)", PropertyKind::Range)
            },
        ]
    }
}

/// Interstitial shown between quiz stages.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TransitionProps {
    pub title: String,
    pub message: String,
    pub duration_ms: u32,
    pub show_spinner: bool,
}

impl Default for TransitionProps {
    fn default() -> Self {
        Self {
            title: "Great, we are almost there!".to_string(),
            message: "Now a few questions to fine-tune your result.".to_string(),
            duration_ms: 3000,
            show_spinner: true,
        }
    }
}

impl BlockKind for TransitionProps {
    const TYPE: &'static str = "transition";
    const NAME: &'static str = "Transition";
    const ICON: &'static str = "loader";
    const CATEGORY: BlockCategory = BlockCategory::Quiz;
    const ALIASES: &'static [&'static str] = &["ProcessingStep", "loader"];

    fn fields() -> Vec<PropertySchema> {
        vec![
            PropertySchema::text("title", "Title"),
            PropertySchema::textarea("message", "Message", 2),
            PropertySchema::number("durationMs", "Duration (ms)", 0.0, 30000.0),
            PropertySchema::new("showSpinner", "Show spinner", PropertyKind::Boolean),
        ]
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StyleResultProps {
    pub style_name: String,
    pub percentage: u8,
    pub description: String,
    pub image_url: String,
}

impl Default for StyleResultProps {
    fn default() -> Self {
        Self {
            style_name: "Natural".to_string(),
            percentage: 78,
            description: "You have an authentic, uncomplicated style that values comfort \
                          without giving up elegance."
                .to_string(),
            image_url: String::new(),
        }
    }
}

impl BlockKind for StyleResultProps {
    const TYPE: &'static str = "style-result";
    const NAME: &'static str = "Primary style";
    const ICON: &'static str = "sparkles";
    const CATEGORY: BlockCategory = BlockCategory::Result;
    const ALIASES: &'static [&'static str] =
        &["PrimaryStyleDisplay", "styleResult", "result-main-boxflex-inline"];

    fn fields() -> Vec<PropertySchema> {
        vec![
            PropertySchema::select(
                "styleName",
                "Style",
                &[
                    ("Natural", "Natural"),
                    ("Classic", "Classic"),
                    ("Romantic", "Romantic"),
                    ("Modern", "Modern"),
                    ("Dramatic", "Dramatic"),
                ],
            ),
            PropertySchema::number("percentage", "Percentage", 0.0, 100.0),
            PropertySchema::textarea("description", "Description", 3),
            PropertySchema::new("imageUrl", "Image", PropertyKind::Image),
        ]
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StyleShare {
    pub category: String,
    pub percentage: u8,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SecondaryStylesProps {
    pub title: String,
    pub secondary_styles: Vec<StyleShare>,
}

impl Default for SecondaryStylesProps {
    fn default() -> Self {
        Self {
            title: "Your secondary styles".to_string(),
            secondary_styles: vec![
                StyleShare {
                    category: "Classic".to_string(),
                    percentage: 14,
                },
                StyleShare {
                    category: "Romantic".to_string(),
                    percentage: 8,
                },
            ],
        }
    }
}

impl BlockKind for SecondaryStylesProps {
    const TYPE: &'static str = "secondary-styles";
    const NAME: &'static str = "Secondary styles";
    const ICON: &'static str = "bar-chart";
    const CATEGORY: BlockCategory = BlockCategory::Result;
    const ALIASES: &'static [&'static str] = &["SecondaryStylesSection"];

    fn fields() -> Vec<PropertySchema> {
        vec![
            PropertySchema::text("title", "Title"),
            PropertySchema::new("secondaryStyles", "Styles", PropertyKind::List)
                .help("Objects with category and percentage"),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_selection_replaces_previous_pick() {
        let question = QuestionProps::default();
        let mut selected = Vec::new();
        question.toggle(&mut selected, "a");
        question.toggle(&mut selected, "b");
        assert_eq!(selected, vec!["b"]);
    }

    #[test]
    fn multiple_selection_stops_at_max() {
        let question = QuestionProps {
            multiple_selection: true,
            min_selections: 2,
            max_selections: 2,
            ..QuestionProps::default()
        };
        let mut selected = Vec::new();
        for id in ["a", "b", "c"] {
            question.toggle(&mut selected, id);
        }
        assert_eq!(selected, vec!["a", "b"]);
        assert_eq!(question.required_selections(), 2);

        question.toggle(&mut selected, "a");
        assert_eq!(selected, vec!["b"]);
    }
}
