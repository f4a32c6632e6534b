//! Read-only HTML rendering of block trees.
//!
//! A view is a pure function of a block and a [`RenderContext`]; the active
//! language is passed in, never read from ambient state. Every rendered block
//! is wrapped in an element carrying its `data-block-id` and the attributes
//! derived from its style overrides.

mod forms;
mod layout;
mod media;
pub mod outline;
pub mod sanitize;
mod text;

use std::borrow::Cow;
use std::fmt::Write;

use crate::models::{Block, BlockKind, Language, Page, language::resolve};
use crate::registry::{Registry, ViewFn};

pub use outline::{OutlineLine, outline};

#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub language: Language,
    pub registry: &'a Registry,
}

impl<'a> RenderContext<'a> {
    pub fn new(language: Language, registry: &'a Registry) -> Self {
        Self { language, registry }
    }

    /// Bilingual field for the active language, with fallback to the
    /// primary value.
    pub fn text<'t>(&self, primary: &'t str, secondary: &'t Option<String>) -> &'t str {
        resolve(primary, secondary.as_deref(), self.language)
    }
}

/// Built-in view of `kind`.
pub fn builtin_view(kind: BlockKind) -> ViewFn {
    match kind {
        BlockKind::Columns => layout::columns,
        BlockKind::Grid => layout::grid,
        BlockKind::FormContainer => forms::form_container,
        BlockKind::Heading => text::heading,
        BlockKind::RichText => text::rich_text,
        BlockKind::HeroBasic => text::hero_basic,
        BlockKind::CtaStrip => text::cta_strip,
        BlockKind::Stats => text::stats,
        BlockKind::FaqAccordion => text::faq_accordion,
        BlockKind::Image => media::image,
        BlockKind::VideoEmbed => media::video_embed,
        BlockKind::Divider => layout::divider,
        BlockKind::Spacer => layout::spacer,
        BlockKind::CustomHtml => media::custom_html,
        BlockKind::FormInput => forms::input,
        BlockKind::FormTextarea => forms::textarea,
        BlockKind::FormSelect => forms::select,
        BlockKind::FormCheckbox => forms::checkbox,
        BlockKind::FormButton => forms::button,
    }
}

/// Render one block through the registry. Blocks whose view yields nothing
/// (unknown kinds, empty content) are omitted entirely.
pub fn render_block(block: &Block, ctx: &RenderContext) -> String {
    let view = ctx.registry.view_for(block);
    let inner = view(block, ctx);
    if inner.is_empty() {
        return inner;
    }
    wrap(block, &inner)
}

pub fn render_blocks(blocks: &[Block], ctx: &RenderContext) -> String {
    blocks.iter().map(|block| render_block(block, ctx)).collect()
}

/// Render the tree `page` shows for `language`.
pub fn render_page(page: &Page, language: Language, registry: &Registry) -> String {
    let ctx = RenderContext::new(language, registry);
    let mut out = String::new();
    let _ = write!(
        out,
        r#"<main dir="{}" lang="{language}" data-page-id="{}">"#,
        if language.is_rtl() { "rtl" } else { "ltr" },
        attr(&page.id)
    );
    if let Some(css) = page.custom_css.as_deref().filter(|css| !css.trim().is_empty()) {
        let _ = write!(out, "<style>{}</style>", style_text(css));
    }
    out.push_str(&render_blocks(page.blocks_for(language), &ctx));
    out.push_str("</main>");
    out
}

fn wrap(block: &Block, inner: &str) -> String {
    let attrs = block
        .styles
        .as_ref()
        .map(|styles| styles.to_attrs())
        .unwrap_or_default();

    let mut out = String::new();
    if let Some(css) = &attrs.hover_css {
        let _ = write!(out, "<style>{}</style>", style_text(css));
    }
    let _ = write!(
        out,
        r#"<div data-block-id="{}" data-kind="{}""#,
        attr(block.id.as_str()),
        block.kind_name()
    );
    if let Some(id) = &attrs.id {
        let _ = write!(out, r#" id="{}""#, attr(id));
    }
    if !attrs.class.is_empty() {
        let _ = write!(out, r#" class="{}""#, attr(&attrs.class));
    }
    if !attrs.style.is_empty() {
        let _ = write!(out, r#" style="{}""#, attr(&attrs.style));
    }
    if let Some((animation, duration, delay)) = &attrs.animation {
        let _ = write!(out, r#" data-animation="{}""#, attr(animation));
        if let Some(duration) = duration {
            let _ = write!(out, r#" data-animation-duration="{}""#, attr(duration));
        }
        if let Some(delay) = delay {
            let _ = write!(out, r#" data-animation-delay="{}""#, attr(delay));
        }
    }
    out.push('>');
    out.push_str(inner);
    out.push_str("</div>");
    out
}

pub(crate) fn esc(text: &str) -> Cow<'_, str> {
    html_escape::encode_text(text)
}

pub(crate) fn attr(text: &str) -> Cow<'_, str> {
    html_escape::encode_double_quoted_attribute(text)
}

/// CSS placed inside a `<style>` element must not be able to close it.
fn style_text(css: &str) -> String {
    css.replace('<', "")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BlockStyles;
    use crate::normalize::decode_blocks;
    use crate::tests::{heading, sample_page};
    use serde_json::json;

    #[test]
    fn test_heading_falls_back_to_arabic_in_english() {
        let registry = Registry::builtin();
        let ctx = RenderContext::new(Language::En, &registry);
        let html = render_block(&heading("h", "عنوان"), &ctx);
        assert!(html.contains("عنوان"));
        assert!(html.starts_with(r#"<div data-block-id="h" data-kind="heading">"#));
    }

    #[test]
    fn test_wrapper_carries_style_attrs() {
        let registry = Registry::builtin();
        let ctx = RenderContext::new(Language::Ar, &registry);
        let mut block = heading("h", "عنوان");
        block.styles = Some(BlockStyles {
            background_color: Some("primary".into()),
            padding: Some("2rem".into()),
            custom_id: Some("intro".into()),
            hover_text_color: Some("red".into()),
            ..Default::default()
        });

        let html = render_block(&block, &ctx);
        assert!(html.starts_with("<style>#intro:hover { color: red !important }</style>"));
        assert!(html.contains(r#" id="intro""#));
        assert!(html.contains(r#" class="bg-primary""#));
        assert!(html.contains(r#" style="padding: 2rem; transition: 0.3s ease""#));
    }

    #[test]
    fn test_unknown_and_holes_render_nothing() {
        let registry = Registry::builtin();
        let ctx = RenderContext::new(Language::Ar, &registry);
        let blocks = decode_blocks(Some(&json!([null, { "kind": "testimonials" }])));
        assert_eq!(render_blocks(&blocks, &ctx), "");
    }

    #[test]
    fn test_render_page_direction_and_css() {
        let registry = Registry::builtin();
        let mut page = sample_page();
        page.custom_css = Some(".x { color: red }</style><script>".into());

        let ar = render_page(&page, Language::Ar, &registry);
        assert!(ar.starts_with(r#"<main dir="rtl" lang="ar" data-page-id="home">"#));
        assert!(ar.contains("<style>.x { color: red }/style>script></style>"));
        assert!(ar.ends_with("</main>"));

        let en = render_page(&page, Language::En, &registry);
        assert!(en.starts_with(r#"<main dir="ltr" lang="en""#));
    }

    #[test]
    fn test_text_escapes_markup() {
        let registry = Registry::builtin();
        let ctx = RenderContext::new(Language::Ar, &registry);
        let html = render_block(&heading("h", "<b>bold</b>"), &ctx);
        assert!(html.contains("&lt;b&gt;bold&lt;/b&gt;"));
    }
}
