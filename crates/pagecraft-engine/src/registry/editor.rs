//! Editor forms: the fields an editor shows for one block.
//!
//! Each kind declares its fields once in a static table. Bilingual fields are
//! declared by base name and shown only for the editing language, so an
//! Arabic session edits `titleAr` and an English one edits `titleEn`.

use log::debug;
use serde_json::{Map, Value};

use crate::models::{Block, BlockId, BlockKind, Containment, Language};
use InputKind::*;

/// Input widget for a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Text,
    Textarea,
    Url,
    Number,
    Toggle,
    Select(&'static [&'static str]),
    /// A list of structured items edited as a whole
    Items,
}

/// One field of an editor form, with its current value.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    /// Content key the field writes, e.g. `titleEn`
    pub key: String,
    pub label: &'static str,
    pub input: InputKind,
    pub value: Value,
}

/// Nested blocks of one container slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotSummary {
    pub index: usize,
    pub label: String,
    pub blocks: Vec<(BlockId, String)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EditorForm {
    pub block_id: BlockId,
    pub kind: String,
    pub language: Language,
    pub fields: Vec<FieldSpec>,
    pub slots: Vec<SlotSummary>,
}

impl EditorForm {
    /// A form with no fields, used for blocks nobody can edit.
    pub fn empty(block: &Block, language: Language) -> Self {
        Self {
            block_id: block.id.clone(),
            kind: block.kind_name().to_string(),
            language,
            fields: Vec::new(),
            slots: Vec::new(),
        }
    }

    pub fn field(&self, key: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|field| field.key == key)
    }

    /// Content patch setting `key` to `value`, for `update_content`.
    ///
    /// Keys that are not fields of this form produce an empty patch.
    pub fn patch(&self, key: &str, value: Value) -> Map<String, Value> {
        let mut patch = Map::new();
        if self.field(key).is_some() {
            patch.insert(key.to_string(), value);
        } else {
            debug!("{} form has no field {key}", self.kind);
        }
        patch
    }
}

struct Field {
    name: &'static str,
    label: &'static str,
    input: InputKind,
    bilingual: bool,
}

const fn plain(name: &'static str, label: &'static str, input: InputKind) -> Field {
    Field {
        name,
        label,
        input,
        bilingual: false,
    }
}

const fn bi(name: &'static str, label: &'static str, input: InputKind) -> Field {
    Field {
        name,
        label,
        input,
        bilingual: true,
    }
}

const ALIGN: InputKind = Select(&["start", "center", "end"]);

const COLUMNS: &[Field] = &[
    plain("columns", "Columns", Number),
    plain("gap", "Gap", Select(&["sm", "md", "lg"])),
];
const FORM_CONTAINER: &[Field] = &[
    bi("title", "Title", Text),
    bi("description", "Description", Textarea),
    plain("submitUrl", "Submit URL", Url),
    plain("method", "Method", Select(&["POST", "GET"])),
    bi("successMessage", "Success message", Text),
];
const HEADING: &[Field] = &[
    bi("eyebrow", "Eyebrow", Text),
    bi("title", "Title", Text),
    bi("description", "Description", Textarea),
    plain("level", "Level", Number),
    plain("align", "Alignment", ALIGN),
];
const RICH_TEXT: &[Field] = &[bi("body", "Body", Textarea)];
const HERO_BASIC: &[Field] = &[
    bi("eyebrow", "Eyebrow", Text),
    bi("title", "Title", Text),
    bi("subtitle", "Subtitle", Textarea),
    bi("ctaLabel", "Button label", Text),
    plain("ctaHref", "Button link", Url),
    plain("imageUrl", "Image", Url),
    plain("align", "Alignment", ALIGN),
];
const CTA_STRIP: &[Field] = &[
    bi("title", "Title", Text),
    bi("text", "Text", Textarea),
    bi("ctaLabel", "Button label", Text),
    plain("ctaHref", "Button link", Url),
    plain("variant", "Variant", Select(&["primary", "secondary", "dark"])),
];
const STATS: &[Field] = &[plain("items", "Statistics", Items)];
const FAQ_ACCORDION: &[Field] = &[plain("items", "Questions", Items)];
const IMAGE: &[Field] = &[
    plain("url", "Image", Url),
    bi("alt", "Alt text", Text),
    bi("caption", "Caption", Text),
    plain("href", "Link", Url),
];
const VIDEO_EMBED: &[Field] = &[
    plain("url", "Video URL", Url),
    bi("title", "Title", Text),
    bi("caption", "Caption", Text),
];
const DIVIDER: &[Field] = &[
    plain("style", "Line style", Select(&["solid", "dashed", "dotted"])),
    plain("color", "Color", Text),
    plain("thickness", "Thickness", Number),
];
const SPACER: &[Field] = &[plain("height", "Height", Number)];
const CUSTOM_HTML: &[Field] = &[plain("html", "HTML", Textarea)];
const FORM_INPUT: &[Field] = &[
    bi("label", "Label", Text),
    plain("name", "Field name", Text),
    plain("type", "Type", Select(&["text", "email", "tel", "number", "date", "url"])),
    bi("placeholder", "Placeholder", Text),
    bi("helperText", "Helper text", Text),
    plain("required", "Required", Toggle),
];
const FORM_TEXTAREA: &[Field] = &[
    bi("label", "Label", Text),
    plain("name", "Field name", Text),
    bi("placeholder", "Placeholder", Text),
    plain("rows", "Rows", Number),
    plain("required", "Required", Toggle),
];
const FORM_SELECT: &[Field] = &[
    bi("label", "Label", Text),
    plain("name", "Field name", Text),
    plain("options", "Options", Items),
    plain("required", "Required", Toggle),
];
const FORM_CHECKBOX: &[Field] = &[
    bi("label", "Label", Text),
    plain("name", "Field name", Text),
    plain("required", "Required", Toggle),
    plain("checked", "Checked by default", Toggle),
];
const FORM_BUTTON: &[Field] = &[
    bi("text", "Text", Text),
    plain("type", "Type", Select(&["submit", "button", "reset"])),
    plain("variant", "Variant", Select(&["primary", "secondary", "outline"])),
    plain("fullWidth", "Full width", Toggle),
];

fn fields_of(kind: BlockKind) -> &'static [Field] {
    match kind {
        BlockKind::Columns | BlockKind::Grid => COLUMNS,
        BlockKind::FormContainer => FORM_CONTAINER,
        BlockKind::Heading => HEADING,
        BlockKind::RichText => RICH_TEXT,
        BlockKind::HeroBasic => HERO_BASIC,
        BlockKind::CtaStrip => CTA_STRIP,
        BlockKind::Stats => STATS,
        BlockKind::FaqAccordion => FAQ_ACCORDION,
        BlockKind::Image => IMAGE,
        BlockKind::VideoEmbed => VIDEO_EMBED,
        BlockKind::Divider => DIVIDER,
        BlockKind::Spacer => SPACER,
        BlockKind::CustomHtml => CUSTOM_HTML,
        BlockKind::FormInput => FORM_INPUT,
        BlockKind::FormTextarea => FORM_TEXTAREA,
        BlockKind::FormSelect => FORM_SELECT,
        BlockKind::FormCheckbox => FORM_CHECKBOX,
        BlockKind::FormButton => FORM_BUTTON,
    }
}

/// Editor for every built-in kind.
pub fn form_for(block: &Block, language: Language) -> EditorForm {
    let mut form = EditorForm::empty(block, language);
    let Some(kind) = block.kind() else {
        return form;
    };

    let content = match block.content.to_json() {
        Value::Object(content) => content,
        _ => Map::new(),
    };
    form.fields = fields_of(kind)
        .iter()
        .map(|field| {
            let key = if field.bilingual {
                format!("{}{}", field.name, language.key_suffix())
            } else {
                field.name.to_string()
            };
            let value = content.get(&key).cloned().unwrap_or(Value::Null);
            FieldSpec {
                key,
                label: field.label,
                input: field.input,
                value,
            }
        })
        .collect();

    form.slots = block
        .slots
        .iter()
        .enumerate()
        .map(|(index, slot)| SlotSummary {
            index,
            label: match kind.containment() {
                Containment::ColumnSlots => format!("Column {}", index + 1),
                _ => "Fields".to_string(),
            },
            blocks: slot
                .iter()
                .map(|child| (child.id.clone(), child.kind_name().to_string()))
                .collect(),
        })
        .collect();
    form
}
