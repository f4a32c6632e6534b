use std::fmt::Write;

use super::{RenderContext, attr, esc, sanitize};
use crate::models::{Block, BlockContent};

fn align_class(align: Option<&str>) -> &'static str {
    match align {
        Some("center") => "text-center",
        Some("end" | "right") => "text-end",
        _ => "text-start",
    }
}

/// `<tag class>text</tag>`, or nothing when `text` is empty.
fn element(out: &mut String, tag: &str, class: &str, text: &str) {
    if !text.is_empty() {
        let _ = write!(out, r#"<{tag} class="{class}">{}</{tag}>"#, esc(text));
    }
}

fn link_button(out: &mut String, class: &str, label: &str, href: Option<&str>) {
    if let Some(href) = href.filter(|href| !href.is_empty()) {
        if !label.is_empty() {
            let _ = write!(out, r#"<a class="{class}" href="{}">{}</a>"#, attr(href), esc(label));
        }
    }
}

pub(super) fn heading(block: &Block, ctx: &RenderContext) -> String {
    let BlockContent::Heading(c) = &block.content else {
        return String::new();
    };
    let eyebrow = ctx.text(&c.eyebrow_ar, &c.eyebrow_en);
    let title = ctx.text(&c.title_ar, &c.title_en);
    let description = ctx.text(&c.description_ar, &c.description_en);
    if eyebrow.is_empty() && title.is_empty() && description.is_empty() {
        return String::new();
    }

    let level = c.level.unwrap_or(2).clamp(1, 6);
    let mut out = format!(r#"<header class="mb-8 {}">"#, align_class(c.align.as_deref()));
    element(
        &mut out,
        "p",
        "mb-2 text-sm font-semibold uppercase tracking-wide text-emerald-600",
        eyebrow,
    );
    element(&mut out, &format!("h{level}"), "text-3xl font-bold", title);
    element(&mut out, "p", "mt-3 max-w-2xl text-slate-600", description);
    out.push_str("</header>");
    out
}

pub(super) fn rich_text(block: &Block, ctx: &RenderContext) -> String {
    let BlockContent::RichText(c) = &block.content else {
        return String::new();
    };
    let body = ctx.text(&c.body_ar, &c.body_en);
    if body.trim().is_empty() {
        return String::new();
    }
    format!(
        r#"<div class="prose max-w-none">{}</div>"#,
        sanitize::markdown_to_html(body)
    )
}

pub(super) fn hero_basic(block: &Block, ctx: &RenderContext) -> String {
    let BlockContent::HeroBasic(c) = &block.content else {
        return String::new();
    };
    let centered = c.align.as_deref() == Some("center");
    let mut out = format!(
        r#"<section class="grid items-center gap-10 md:grid-cols-2{}" dir="{}"><div>"#,
        if centered { " text-center" } else { "" },
        if ctx.language.is_rtl() { "rtl" } else { "ltr" }
    );
    element(
        &mut out,
        "p",
        "mb-2 text-sm font-semibold text-emerald-600",
        ctx.text(&c.eyebrow_ar, &c.eyebrow_en),
    );
    element(
        &mut out,
        "h1",
        "mb-3 text-4xl font-bold",
        ctx.text(&c.title_ar, &c.title_en),
    );
    element(
        &mut out,
        "p",
        "mb-6 max-w-xl text-lg text-slate-600",
        ctx.text(&c.subtitle_ar, &c.subtitle_en),
    );
    link_button(
        &mut out,
        "btn btn-primary",
        ctx.text(&c.cta_label_ar, &c.cta_label_en),
        c.cta_href.as_deref(),
    );
    out.push_str("</div>");
    if let Some(image) = c.image_url.as_deref().filter(|url| !url.is_empty()) {
        let _ = write!(
            out,
            r#"<img class="w-full rounded-2xl object-cover" src="{}" alt="">"#,
            attr(image)
        );
    }
    out.push_str("</section>");
    out
}

pub(super) fn cta_strip(block: &Block, ctx: &RenderContext) -> String {
    let BlockContent::CtaStrip(c) = &block.content else {
        return String::new();
    };
    let variant = match c.variant.as_deref() {
        Some("secondary") => "bg-secondary text-white",
        Some("dark") => "bg-slate-900 text-white",
        _ => "bg-primary text-white",
    };
    let mut out = format!(
        r#"<section class="rounded-2xl px-6 py-10 text-center {variant}">"#
    );
    element(&mut out, "h2", "mb-2 text-2xl font-bold", ctx.text(&c.title_ar, &c.title_en));
    element(&mut out, "p", "mb-6 opacity-90", ctx.text(&c.text_ar, &c.text_en));
    link_button(
        &mut out,
        "btn btn-light",
        ctx.text(&c.cta_label_ar, &c.cta_label_en),
        c.cta_href.as_deref(),
    );
    out.push_str("</section>");
    out
}

pub(super) fn stats(block: &Block, ctx: &RenderContext) -> String {
    let BlockContent::Stats(c) = &block.content else {
        return String::new();
    };
    if c.items.is_empty() {
        return String::new();
    }
    let mut out = String::from(r#"<dl class="grid gap-6 sm:grid-cols-2 lg:grid-cols-4">"#);
    for item in &c.items {
        let _ = write!(
            out,
            r#"<div class="text-center"><dt class="text-sm text-slate-600">{}</dt><dd class="text-3xl font-bold">{}{}</dd></div>"#,
            esc(ctx.text(&item.label_ar, &item.label_en)),
            esc(&item.value),
            esc(item.suffix.as_deref().unwrap_or_default())
        );
    }
    out.push_str("</dl>");
    out
}

pub(super) fn faq_accordion(block: &Block, ctx: &RenderContext) -> String {
    let BlockContent::FaqAccordion(c) = &block.content else {
        return String::new();
    };
    if c.items.is_empty() {
        return String::new();
    }
    let mut out = String::from(r#"<div class="mx-auto max-w-3xl space-y-4">"#);
    for item in &c.items {
        let _ = write!(
            out,
            r#"<details class="rounded-lg border p-4"><summary class="font-semibold">{}</summary><p class="mt-2 text-slate-600">{}</p></details>"#,
            esc(ctx.text(&item.question_ar, &item.question_en)),
            esc(ctx.text(&item.answer_ar, &item.answer_en))
        );
    }
    out.push_str("</div>");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FaqAccordionContent, FaqItem, HeadingContent, Language, RichTextContent};
    use crate::registry::Registry;

    fn render(content: BlockContent, language: Language, view: fn(&Block, &RenderContext) -> String) -> String {
        let registry = Registry::builtin();
        let ctx = RenderContext::new(language, &registry);
        view(&Block::with_content(content), &ctx)
    }

    #[test]
    fn test_heading_markup() {
        let html = render(
            BlockContent::Heading(HeadingContent {
                title_ar: "من نحن".into(),
                title_en: Some("About us".into()),
                level: Some(3),
                align: Some("center".into()),
                ..Default::default()
            }),
            Language::En,
            heading,
        );
        insta::assert_snapshot!(
            html,
            @r#"<header class="mb-8 text-center"><h3 class="text-3xl font-bold">About us</h3></header>"#
        );
    }

    #[test]
    fn test_empty_heading_renders_nothing() {
        let html = render(
            BlockContent::Heading(HeadingContent::default()),
            Language::Ar,
            heading,
        );
        assert_eq!(html, "");
    }

    #[test]
    fn test_rich_text_falls_back_and_renders_markdown() {
        let html = render(
            BlockContent::RichText(RichTextContent {
                body_ar: "**مرحبا**".into(),
                body_en: Some(String::new()),
            }),
            Language::En,
            rich_text,
        );
        assert!(html.contains("<strong>مرحبا</strong>"));
    }

    #[test]
    fn test_faq_items_resolve_per_item() {
        let html = render(
            BlockContent::FaqAccordion(FaqAccordionContent {
                items: vec![FaqItem {
                    id: "q1".into(),
                    question_ar: "سؤال".into(),
                    question_en: Some("Question".into()),
                    answer_ar: "جواب".into(),
                    answer_en: None,
                }],
            }),
            Language::En,
            faq_accordion,
        );
        assert!(html.contains("<summary class=\"font-semibold\">Question</summary>"));
        assert!(html.contains("جواب"));
    }
}
