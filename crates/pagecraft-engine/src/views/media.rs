use std::fmt::Write;

use super::{RenderContext, attr, esc, sanitize};
use crate::models::{Block, BlockContent};

fn is_web_url(url: &str) -> bool {
    url.starts_with("https://") || url.starts_with("http://")
}

pub(super) fn image(block: &Block, ctx: &RenderContext) -> String {
    let BlockContent::Image(c) = &block.content else {
        return String::new();
    };
    if c.url.is_empty() {
        return String::new();
    }
    let img = format!(
        r#"<img class="w-full rounded-xl object-cover" src="{}" alt="{}" loading="lazy">"#,
        attr(&c.url),
        attr(ctx.text(&c.alt_ar, &c.alt_en))
    );
    let mut out = String::from("<figure>");
    match c.href.as_deref().filter(|href| !href.is_empty()) {
        Some(href) => {
            let _ = write!(out, r#"<a href="{}">{img}</a>"#, attr(href));
        }
        None => out.push_str(&img),
    }
    let caption = ctx.text(&c.caption_ar, &c.caption_en);
    if !caption.is_empty() {
        let _ = write!(
            out,
            r#"<figcaption class="mt-2 text-sm text-slate-500">{}</figcaption>"#,
            esc(caption)
        );
    }
    out.push_str("</figure>");
    out
}

pub(super) fn video_embed(block: &Block, ctx: &RenderContext) -> String {
    let BlockContent::VideoEmbed(c) = &block.content else {
        return String::new();
    };
    if !is_web_url(&c.url) {
        return String::new();
    }
    let title = ctx.text(&c.title_ar, &c.title_en);
    let mut out = format!(
        r#"<figure><div class="aspect-video overflow-hidden rounded-xl"><iframe class="h-full w-full" src="{}" title="{}" allowfullscreen></iframe></div>"#,
        attr(&c.url),
        attr(title)
    );
    let caption = ctx.text(&c.caption_ar, &c.caption_en);
    if !caption.is_empty() {
        let _ = write!(
            out,
            r#"<figcaption class="mt-2 text-sm text-slate-500">{}</figcaption>"#,
            esc(caption)
        );
    }
    out.push_str("</figure>");
    out
}

pub(super) fn custom_html(block: &Block, _ctx: &RenderContext) -> String {
    let BlockContent::CustomHtml(c) = &block.content else {
        return String::new();
    };
    let html = sanitize::sanitize_html(&c.html);
    if html.trim().is_empty() {
        return String::new();
    }
    format!(r#"<div class="custom-html">{html}</div>"#)
}
