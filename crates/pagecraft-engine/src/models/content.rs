//! Kind-specific block content.
//!
//! Every text-bearing field is stored twice: the primary (Arabic) value in a
//! `fooAr` key and an optional English override in `fooEn`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::models::{BlockKind, Language, language::resolve};

/// Resolve a stored bilingual pair for display.
pub fn text<'a>(primary: &'a str, secondary: &'a Option<String>, language: Language) -> &'a str {
    resolve(primary, secondary.as_deref(), language)
}

/// Largest column count a `columns` or `grid` block can hold.
pub const MAX_COLUMNS: usize = u8::MAX as usize;

fn default_columns() -> u8 {
    2
}

/// Shared by `columns` and `grid`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ColumnsContent {
    #[serde(default = "default_columns")]
    pub columns: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gap: Option<String>,
}

impl Default for ColumnsContent {
    fn default() -> Self {
        Self {
            columns: default_columns(),
            gap: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormContainerContent {
    pub title_ar: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title_en: Option<String>,
    pub description_ar: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description_en: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submit_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    pub success_message_ar: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success_message_en: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HeadingContent {
    pub eyebrow_ar: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eyebrow_en: Option<String>,
    pub title_ar: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title_en: Option<String>,
    pub description_ar: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description_en: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub align: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RichTextContent {
    /// Markdown source
    pub body_ar: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_en: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HeroBasicContent {
    pub eyebrow_ar: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eyebrow_en: Option<String>,
    pub title_ar: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title_en: Option<String>,
    pub subtitle_ar: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle_en: Option<String>,
    pub cta_label_ar: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cta_label_en: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cta_href: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub align: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CtaStripContent {
    pub title_ar: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title_en: Option<String>,
    pub text_ar: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_en: Option<String>,
    pub cta_label_ar: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cta_label_en: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cta_href: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StatItem {
    pub id: String,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
    pub label_ar: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_en: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StatsContent {
    pub items: Vec<StatItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FaqItem {
    pub id: String,
    pub question_ar: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question_en: Option<String>,
    pub answer_ar: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer_en: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FaqAccordionContent {
    pub items: Vec<FaqItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImageContent {
    pub url: String,
    pub alt_ar: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt_en: Option<String>,
    pub caption_ar: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption_en: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VideoEmbedContent {
    pub url: String,
    pub title_ar: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title_en: Option<String>,
    pub caption_ar: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption_en: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DividerContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Pixels
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thickness: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SpacerContent {
    /// Pixels
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CustomHtmlContent {
    pub html: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormInputContent {
    pub label_ar: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_en: Option<String>,
    pub name: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub input_type: Option<String>,
    pub placeholder_ar: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder_en: Option<String>,
    pub helper_text_ar: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub helper_text_en: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub required: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormTextareaContent {
    pub label_ar: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_en: Option<String>,
    pub name: String,
    pub placeholder_ar: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder_en: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows: Option<u32>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub required: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormOption {
    pub value: String,
    pub label_ar: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_en: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormSelectContent {
    pub label_ar: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_en: Option<String>,
    pub name: String,
    pub options: Vec<FormOption>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub required: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormCheckboxContent {
    pub label_ar: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_en: Option<String>,
    pub name: String,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub required: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub checked: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormButtonContent {
    pub text_ar: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_en: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub button_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub full_width: bool,
}

/// A block whose kind is not recognized, or whose content no longer decodes.
///
/// The whole raw JSON object is kept so the block survives a load/save cycle
/// untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct UnknownBlock {
    pub kind: String,
    pub raw: Map<String, Value>,
}

macro_rules! block_contents {
    ($($variant:ident($ty:ty)),+ $(,)?) => {
        /// Typed content of a block; the variant is the block's kind.
        #[derive(Debug, Clone, PartialEq)]
        pub enum BlockContent {
            $($variant($ty),)+
            Unknown(UnknownBlock),
        }

        impl BlockContent {
            /// The recognized kind, or `None` for unknown blocks.
            pub fn kind(&self) -> Option<BlockKind> {
                match self {
                    $(BlockContent::$variant(_) => Some(BlockKind::$variant),)+
                    BlockContent::Unknown(_) => None,
                }
            }

            /// Empty content for a freshly created block.
            pub fn default_for(kind: BlockKind) -> Self {
                match kind {
                    $(BlockKind::$variant => BlockContent::$variant(<$ty>::default()),)+
                }
            }

            /// Decode the `content` object of a persisted block.
            pub fn from_json(kind: BlockKind, content: Value) -> Result<Self, serde_json::Error> {
                Ok(match kind {
                    $(BlockKind::$variant => BlockContent::$variant(serde_json::from_value(content)?),)+
                })
            }

            /// Encode as the persisted `content` object.
            pub fn to_json(&self) -> Value {
                let encoded = match self {
                    $(BlockContent::$variant(inner) => serde_json::to_value(inner),)+
                    BlockContent::Unknown(unknown) => {
                        return unknown.raw.get("content").cloned().unwrap_or(Value::Null);
                    }
                };
                // Content structs hold only strings, numbers, bools and lists of them
                encoded.unwrap_or_else(|_| Value::Object(Map::new()))
            }
        }
    };
}

block_contents! {
    Columns(ColumnsContent),
    Grid(ColumnsContent),
    FormContainer(FormContainerContent),
    Heading(HeadingContent),
    RichText(RichTextContent),
    HeroBasic(HeroBasicContent),
    CtaStrip(CtaStripContent),
    Stats(StatsContent),
    FaqAccordion(FaqAccordionContent),
    Image(ImageContent),
    VideoEmbed(VideoEmbedContent),
    Divider(DividerContent),
    Spacer(SpacerContent),
    CustomHtml(CustomHtmlContent),
    FormInput(FormInputContent),
    FormTextarea(FormTextareaContent),
    FormSelect(FormSelectContent),
    FormCheckbox(FormCheckboxContent),
    FormButton(FormButtonContent),
}

impl BlockContent {
    /// The persisted kind tag, including unrecognized ones.
    pub fn kind_name(&self) -> &str {
        match self {
            BlockContent::Unknown(unknown) => &unknown.kind,
            known => known.kind().map(BlockKind::as_str).unwrap_or_default(),
        }
    }

    /// Configured column count of a columns/grid block.
    pub fn column_count(&self) -> Option<usize> {
        match self {
            BlockContent::Columns(c) | BlockContent::Grid(c) => Some(c.columns as usize),
            _ => None,
        }
    }

    /// Give every stat and FAQ item a new id, so copies never share item
    /// ids with their source.
    pub(crate) fn regenerate_item_ids(&mut self) {
        let fresh = || uuid::Uuid::new_v4().to_string();
        match self {
            BlockContent::Stats(c) => c.items.iter_mut().for_each(|item| item.id = fresh()),
            BlockContent::FaqAccordion(c) => {
                c.items.iter_mut().for_each(|item| item.id = fresh())
            }
            _ => {}
        }
    }

    pub(crate) fn set_column_count(&mut self, count: usize) {
        if let BlockContent::Columns(c) | BlockContent::Grid(c) = self {
            c.columns = u8::try_from(count.min(MAX_COLUMNS)).unwrap_or(u8::MAX);
        }
    }

    /// One-line human summary for outlines and pickers.
    pub fn summary(&self, language: Language) -> String {
        let summary = match self {
            BlockContent::Columns(c) | BlockContent::Grid(c) => {
                return format!("{} columns", c.columns);
            }
            BlockContent::FormContainer(c) => text(&c.title_ar, &c.title_en, language),
            BlockContent::Heading(c) => text(&c.title_ar, &c.title_en, language),
            BlockContent::RichText(c) => text(&c.body_ar, &c.body_en, language),
            BlockContent::HeroBasic(c) => text(&c.title_ar, &c.title_en, language),
            BlockContent::CtaStrip(c) => text(&c.title_ar, &c.title_en, language),
            BlockContent::Stats(c) => return format!("{} items", c.items.len()),
            BlockContent::FaqAccordion(c) => return format!("{} questions", c.items.len()),
            BlockContent::Image(c) => {
                let alt = text(&c.alt_ar, &c.alt_en, language);
                if alt.is_empty() { &c.url } else { alt }
            }
            BlockContent::VideoEmbed(c) => &c.url,
            BlockContent::Divider(_) | BlockContent::Spacer(_) => "",
            BlockContent::CustomHtml(c) => &c.html,
            BlockContent::FormInput(c) => text(&c.label_ar, &c.label_en, language),
            BlockContent::FormTextarea(c) => text(&c.label_ar, &c.label_en, language),
            BlockContent::FormSelect(c) => text(&c.label_ar, &c.label_en, language),
            BlockContent::FormCheckbox(c) => text(&c.label_ar, &c.label_en, language),
            BlockContent::FormButton(c) => text(&c.text_ar, &c.text_en, language),
            BlockContent::Unknown(_) => "",
        };
        first_line(summary, 60)
    }
}

fn first_line(text: &str, max_chars: usize) -> String {
    let line = text.lines().next().unwrap_or_default().trim();
    if line.chars().count() > max_chars {
        let mut truncated: String = line.chars().take(max_chars).collect();
        truncated.push('…');
        truncated
    } else {
        line.to_string()
    }
}
