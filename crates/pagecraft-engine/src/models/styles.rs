//! Per-block style overrides.
//!
//! Every block kind accepts the same [`BlockStyles`] record. Values that look
//! like utility classes of the site theme are emitted as classes; everything
//! else becomes inline CSS.

use serde::{Deserialize, Deserializer, Serialize};

/// Entrance animation applied when the block scrolls into view.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BlockAnimation {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delay: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BlockStyles {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_align: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding_top: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding_bottom: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin_top: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin_bottom: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_width: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shadow: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_width: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_height: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    /// Element id; required for hover rules to be emitted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hover_background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hover_text_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hover_border_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hover_shadow: Option<String>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "string_or_number"
    )]
    pub hover_scale: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hover_transition: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub animation: Option<BlockAnimation>,
}

/// Attributes derived from a [`BlockStyles`] record, ready for a view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleAttrs {
    pub id: Option<String>,
    pub class: String,
    pub style: String,
    pub hover_css: Option<String>,
    pub animation: Option<(String, Option<String>, Option<String>)>,
}

impl StyleAttrs {
    pub fn is_empty(&self) -> bool {
        self.id.is_none()
            && self.class.is_empty()
            && self.style.is_empty()
            && self.hover_css.is_none()
            && self.animation.is_none()
    }
}

const PALETTE_BACKGROUNDS: &[&str] = &["white", "transparent", "primary", "secondary", "accent"];
const PALETTE_TEXT: &[&str] = &[
    "slate-900",
    "slate-700",
    "slate-600",
    "slate-400",
    "white",
    "primary",
    "emerald-600",
    "blue-600",
];

const DEFAULT_TRANSITION: &str = "0.3s ease";
const UTILITY_HOVER_SHADOW: &str = "0 10px 15px -3px rgba(0, 0, 0, 0.1)";

impl BlockStyles {
    pub fn is_empty(&self) -> bool {
        self == &BlockStyles::default()
    }

    pub fn to_attrs(&self) -> StyleAttrs {
        let mut classes: Vec<String> = Vec::new();
        let mut style = CssDecls::default();

        if let Some(bg) = non_empty(&self.background_color) {
            if bg.starts_with("bg-") {
                classes.push(bg.to_string());
            } else if PALETTE_BACKGROUNDS.contains(&bg) {
                classes.push(format!("bg-{bg}"));
            } else {
                style.push("background-color", bg);
            }
        }

        if let Some(image) = non_empty(&self.background_image) {
            style.push("background-image", image);
            style.push("background-size", "cover");
            style.push("background-position", "center");
        }

        if let Some(color) = non_empty(&self.text_color) {
            if color.starts_with("text-") {
                classes.push(color.to_string());
            } else if PALETTE_TEXT.contains(&color) {
                classes.push(format!("text-{color}"));
            } else {
                style.push("color", color);
            }
        }

        style.push_opt("font-size", &self.font_size);
        style.push_opt("font-weight", &self.font_weight);
        style.push_opt("text-align", &self.text_align);

        style.push_opt("padding", &self.padding);
        style.push_opt("padding-top", &self.padding_top);
        style.push_opt("padding-bottom", &self.padding_bottom);
        style.push_opt("margin", &self.margin);
        style.push_opt("margin-top", &self.margin_top);
        style.push_opt("margin-bottom", &self.margin_bottom);

        if let Some(radius) = non_empty(&self.border_radius) {
            if radius.starts_with("rounded-") {
                classes.push(radius.to_string());
            } else {
                style.push("border-radius", radius);
            }
        }

        if let Some(width) = non_empty(&self.border_width) {
            if width.starts_with("border-") || width == "border" {
                classes.push(width.to_string());
            } else {
                style.push("border-width", width);
            }
        }

        style.push_opt("border-color", &self.border_color);

        if let Some(shadow) = non_empty(&self.shadow) {
            if shadow.starts_with("shadow-") {
                classes.push(shadow.to_string());
            } else {
                style.push("box-shadow", shadow);
            }
        }

        style.push_opt("max-width", &self.max_width);
        style.push_opt("width", &self.width);
        style.push_opt("height", &self.height);
        style.push_opt("min-height", &self.min_height);

        let has_hover_transition = non_empty(&self.hover_transition).is_some()
            || non_empty(&self.hover_scale).is_some()
            || non_empty(&self.hover_background_color).is_some()
            || non_empty(&self.hover_text_color).is_some();
        if has_hover_transition {
            let transition = non_empty(&self.hover_transition).unwrap_or(DEFAULT_TRANSITION);
            style.push("transition", transition);
        }

        if let Some(class_name) = non_empty(&self.class_name) {
            classes.push(class_name.to_string());
        }

        let custom_id = non_empty(&self.custom_id).map(str::to_string);
        let hover_css = custom_id.as_deref().and_then(|id| self.hover_rule(id));

        let animation = self.animation.as_ref().and_then(|a| {
            non_empty(&a.kind).map(|kind| (kind.to_string(), a.duration.clone(), a.delay.clone()))
        });

        StyleAttrs {
            id: custom_id,
            class: classes.join(" "),
            style: style.finish(),
            hover_css,
            animation,
        }
    }

    fn hover_rule(&self, custom_id: &str) -> Option<String> {
        let mut rules = Vec::new();
        if let Some(bg) = non_empty(&self.hover_background_color) {
            rules.push(format!("background-color: {bg} !important"));
        }
        if let Some(color) = non_empty(&self.hover_text_color) {
            rules.push(format!("color: {color} !important"));
        }
        if let Some(border) = non_empty(&self.hover_border_color) {
            rules.push(format!("border-color: {border} !important"));
        }
        if let Some(shadow) = non_empty(&self.hover_shadow) {
            // Utility shadow classes have no inline equivalent
            let shadow = if shadow.starts_with("shadow-") {
                UTILITY_HOVER_SHADOW
            } else {
                shadow
            };
            rules.push(format!("box-shadow: {shadow} !important"));
        }
        if let Some(scale) = non_empty(&self.hover_scale) {
            rules.push(format!("transform: scale({scale})"));
        }

        if rules.is_empty() {
            None
        } else {
            Some(format!("#{custom_id}:hover {{ {} }}", rules.join("; ")))
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

#[derive(Default)]
struct CssDecls(Vec<String>);

impl CssDecls {
    fn push(&mut self, property: &str, value: &str) {
        self.0.push(format!("{property}: {value}"));
    }

    fn push_opt(&mut self, property: &str, value: &Option<String>) {
        if let Some(value) = non_empty(value) {
            self.push(property, value);
        }
    }

    fn finish(self) -> String {
        self.0.join("; ")
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn styles(value: serde_json::Value) -> BlockStyles {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_empty_styles_produce_empty_attrs() {
        assert!(BlockStyles::default().to_attrs().is_empty());
    }

    #[test]
    fn test_utility_values_become_classes() {
        let attrs = styles(json!({
            "backgroundColor": "primary",
            "textColor": "text-white",
            "borderRadius": "rounded-xl",
            "borderWidth": "border",
            "shadow": "shadow-lg",
            "className": "hero"
        }))
        .to_attrs();

        assert_eq!(
            attrs.class,
            "bg-primary text-white rounded-xl border shadow-lg hero"
        );
        assert_eq!(attrs.style, "");
    }

    #[test]
    fn test_raw_values_become_inline_css() {
        let attrs = styles(json!({
            "backgroundColor": "#ff0000",
            "textColor": "rgb(1, 2, 3)",
            "paddingTop": "2rem",
            "borderRadius": "12px"
        }))
        .to_attrs();

        assert_eq!(
            attrs.style,
            "background-color: #ff0000; color: rgb(1, 2, 3); padding-top: 2rem; border-radius: 12px"
        );
        assert_eq!(attrs.class, "");
    }

    #[test]
    fn test_hover_rules_need_custom_id() {
        let without_id = styles(json!({ "hoverBackgroundColor": "#000" })).to_attrs();
        assert_eq!(without_id.hover_css, None);
        assert_eq!(without_id.style, "transition: 0.3s ease");

        let with_id = styles(json!({
            "customId": "cta",
            "hoverBackgroundColor": "#000",
            "hoverShadow": "shadow-md",
            "hoverScale": 1.05
        }))
        .to_attrs();
        assert_eq!(with_id.id.as_deref(), Some("cta"));
        assert_eq!(
            with_id.hover_css.as_deref(),
            Some(
                "#cta:hover { background-color: #000 !important; box-shadow: 0 10px 15px -3px rgba(0, 0, 0, 0.1) !important; transform: scale(1.05) }"
            )
        );
    }

    #[test]
    fn test_background_image_sets_cover() {
        let attrs = styles(json!({ "backgroundImage": "url(/a.jpg)" })).to_attrs();
        assert_eq!(
            attrs.style,
            "background-image: url(/a.jpg); background-size: cover; background-position: center"
        );
    }

    #[test]
    fn test_animation_is_carried() {
        let attrs = styles(json!({
            "animation": { "type": "fade-up", "duration": "0.6s" }
        }))
        .to_attrs();
        assert_eq!(
            attrs.animation,
            Some(("fade-up".to_string(), Some("0.6s".to_string()), None))
        );
    }

    #[test]
    fn test_serialization_skips_unset_fields() {
        let value = serde_json::to_value(styles(json!({ "padding": "1rem" }))).unwrap();
        assert_eq!(value, json!({ "padding": "1rem" }));
    }
}
