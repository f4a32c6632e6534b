use std::fmt::Write;

use super::{RenderContext, attr, esc, render_blocks};
use crate::models::{Block, BlockContent};

const FIELD_CLASS: &str = "w-full rounded-md border border-slate-300 px-3 py-2";

fn label(out: &mut String, name: &str, text: &str, required: bool) {
    if text.is_empty() {
        return;
    }
    let _ = write!(
        out,
        r#"<label class="mb-1 block text-sm font-medium" for="{}">{}{}</label>"#,
        attr(name),
        esc(text),
        if required { r#" <span class="text-red-500">*</span>"# } else { "" }
    );
}

fn helper(out: &mut String, text: &str) {
    if !text.is_empty() {
        let _ = write!(out, r#"<p class="mt-1 text-xs text-slate-500">{}</p>"#, esc(text));
    }
}

fn required_attr(required: bool) -> &'static str {
    if required { " required" } else { "" }
}

/// The form element itself; its fields are the container's children.
pub(super) fn form_container(block: &Block, ctx: &RenderContext) -> String {
    let BlockContent::FormContainer(c) = &block.content else {
        return String::new();
    };
    let method = match c.method.as_deref() {
        Some(method) if method.eq_ignore_ascii_case("get") => "get",
        _ => "post",
    };
    let mut out = String::from(r#"<div class="rounded-2xl border bg-white p-6 shadow-sm">"#);
    let title = ctx.text(&c.title_ar, &c.title_en);
    if !title.is_empty() {
        let _ = write!(out, r#"<h3 class="mb-2 text-xl font-bold">{}</h3>"#, esc(title));
    }
    let description = ctx.text(&c.description_ar, &c.description_en);
    if !description.is_empty() {
        let _ = write!(out, r#"<p class="mb-6 text-slate-600">{}</p>"#, esc(description));
    }
    let _ = write!(out, r#"<form class="space-y-4" method="{method}""#);
    if let Some(action) = c.submit_url.as_deref().filter(|url| !url.is_empty()) {
        let _ = write!(out, r#" action="{}""#, attr(action));
    }
    let success = ctx.text(&c.success_message_ar, &c.success_message_en);
    if !success.is_empty() {
        let _ = write!(out, r#" data-success-message="{}""#, attr(success));
    }
    out.push('>');
    if let Some(fields) = block.slots.first() {
        out.push_str(&render_blocks(fields, ctx));
    }
    out.push_str("</form></div>");
    out
}

pub(super) fn input(block: &Block, ctx: &RenderContext) -> String {
    let BlockContent::FormInput(c) = &block.content else {
        return String::new();
    };
    let mut out = String::from("<div>");
    label(&mut out, &c.name, ctx.text(&c.label_ar, &c.label_en), c.required);
    let _ = write!(
        out,
        r#"<input class="{FIELD_CLASS}" id="{name}" name="{name}" type="{}" placeholder="{}"{}>"#,
        attr(c.input_type.as_deref().unwrap_or("text")),
        attr(ctx.text(&c.placeholder_ar, &c.placeholder_en)),
        required_attr(c.required),
        name = attr(&c.name),
    );
    helper(&mut out, ctx.text(&c.helper_text_ar, &c.helper_text_en));
    out.push_str("</div>");
    out
}

pub(super) fn textarea(block: &Block, ctx: &RenderContext) -> String {
    let BlockContent::FormTextarea(c) = &block.content else {
        return String::new();
    };
    let mut out = String::from("<div>");
    label(&mut out, &c.name, ctx.text(&c.label_ar, &c.label_en), c.required);
    let _ = write!(
        out,
        r#"<textarea class="{FIELD_CLASS}" id="{name}" name="{name}" rows="{}" placeholder="{}"{}></textarea>"#,
        c.rows.unwrap_or(4),
        attr(ctx.text(&c.placeholder_ar, &c.placeholder_en)),
        required_attr(c.required),
        name = attr(&c.name),
    );
    out.push_str("</div>");
    out
}

pub(super) fn select(block: &Block, ctx: &RenderContext) -> String {
    let BlockContent::FormSelect(c) = &block.content else {
        return String::new();
    };
    let mut out = String::from("<div>");
    label(&mut out, &c.name, ctx.text(&c.label_ar, &c.label_en), c.required);
    let _ = write!(
        out,
        r#"<select class="{FIELD_CLASS}" id="{name}" name="{name}"{}>"#,
        required_attr(c.required),
        name = attr(&c.name),
    );
    for option in &c.options {
        let _ = write!(
            out,
            r#"<option value="{}">{}</option>"#,
            attr(&option.value),
            esc(ctx.text(&option.label_ar, &option.label_en))
        );
    }
    out.push_str("</select></div>");
    out
}

pub(super) fn checkbox(block: &Block, ctx: &RenderContext) -> String {
    let BlockContent::FormCheckbox(c) = &block.content else {
        return String::new();
    };
    format!(
        r#"<label class="flex items-center gap-2"><input type="checkbox" name="{}"{}{}><span>{}</span></label>"#,
        attr(&c.name),
        if c.checked { " checked" } else { "" },
        required_attr(c.required),
        esc(ctx.text(&c.label_ar, &c.label_en))
    )
}

pub(super) fn button(block: &Block, ctx: &RenderContext) -> String {
    let BlockContent::FormButton(c) = &block.content else {
        return String::new();
    };
    let button_type = match c.button_type.as_deref() {
        Some("button") => "button",
        Some("reset") => "reset",
        _ => "submit",
    };
    let variant = match c.variant.as_deref() {
        Some("secondary") => "btn-secondary",
        Some("outline") => "btn-outline",
        _ => "btn-primary",
    };
    format!(
        r#"<button type="{button_type}" class="btn {variant}{}">{}</button>"#,
        if c.full_width { " w-full" } else { "" },
        esc(ctx.text(&c.text_ar, &c.text_en))
    )
}
