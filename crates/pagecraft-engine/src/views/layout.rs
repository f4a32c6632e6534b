use std::fmt::Write;

use super::{RenderContext, attr, render_block};
use crate::models::{Block, BlockContent, ColumnsContent};

pub(super) fn gap_class(gap: Option<&str>) -> &'static str {
    match gap {
        Some("sm") => "gap-4",
        Some("lg") => "gap-10",
        _ => "gap-6",
    }
}

fn columns_class(columns: u8) -> &'static str {
    match columns {
        1 => "md:grid-cols-1",
        2 => "md:grid-cols-2",
        3 => "md:grid-cols-3",
        _ => "md:grid-cols-4",
    }
}

fn render_slots(block: &Block, content: &ColumnsContent, ctx: &RenderContext, card: bool) -> String {
    let mut out = format!(
        r#"<div class="grid {} {}">"#,
        columns_class(content.columns),
        gap_class(content.gap.as_deref())
    );
    for (index, slot) in block.slots.iter().enumerate() {
        let _ = write!(out, r#"<div class="space-y-4" data-slot="{index}">"#);
        for child in slot {
            let html = render_block(child, ctx);
            if html.is_empty() {
                continue;
            }
            if card {
                let _ = write!(
                    out,
                    r#"<div class="rounded-lg border border-slate-200 bg-white p-4 shadow-sm">{html}</div>"#
                );
            } else {
                out.push_str(&html);
            }
        }
        out.push_str("</div>");
    }
    out.push_str("</div>");
    out
}

pub(super) fn columns(block: &Block, ctx: &RenderContext) -> String {
    match &block.content {
        BlockContent::Columns(content) => render_slots(block, content, ctx, false),
        _ => String::new(),
    }
}

/// Like columns, but every nested block sits on its own card.
pub(super) fn grid(block: &Block, ctx: &RenderContext) -> String {
    match &block.content {
        BlockContent::Grid(content) => render_slots(block, content, ctx, true),
        _ => String::new(),
    }
}

pub(super) fn divider(block: &Block, _ctx: &RenderContext) -> String {
    let BlockContent::Divider(content) = &block.content else {
        return String::new();
    };
    format!(
        r#"<div class="py-6"><hr style="border-style: {}; border-color: {}; border-width: {}px 0 0 0"></div>"#,
        attr(content.style.as_deref().unwrap_or("solid")),
        attr(content.color.as_deref().unwrap_or("#ccc")),
        content.thickness.filter(|t| *t > 0).unwrap_or(1)
    )
}

pub(super) fn spacer(block: &Block, _ctx: &RenderContext) -> String {
    let BlockContent::Spacer(content) = &block.content else {
        return String::new();
    };
    let height = content.height.filter(|h| *h > 0).unwrap_or(50);
    format!(r#"<div aria-hidden="true" style="height: {height}px"></div>"#)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BlockKind, Language};
    use crate::registry::Registry;
    use crate::tests::sample_tree;
    use rstest::rstest;

    #[rstest]
    #[case(Some("sm"), "gap-4")]
    #[case(Some("md"), "gap-6")]
    #[case(Some("lg"), "gap-10")]
    #[case(None, "gap-6")]
    #[case(Some("xl"), "gap-6")]
    fn test_gap_class(#[case] gap: Option<&str>, #[case] expected: &str) {
        assert_eq!(gap_class(gap), expected);
    }

    #[test]
    fn test_columns_render_each_slot_in_order() {
        let registry = Registry::builtin();
        let ctx = RenderContext::new(Language::Ar, &registry);
        let tree = sample_tree();
        let html = columns(&tree[1], &ctx);

        assert!(html.starts_with(r#"<div class="grid md:grid-cols-2 gap-6">"#));
        let first = html.find(r#"data-block-id="in-col-0""#).unwrap();
        let second = html.find(r#"data-block-id="in-col-1""#).unwrap();
        assert!(first < second);
        assert!(html.contains(r#"data-slot="1""#));
    }

    #[test]
    fn test_grid_wraps_children_in_cards() {
        let registry = Registry::builtin();
        let ctx = RenderContext::new(Language::Ar, &registry);
        let mut grid_block = Block::new(BlockKind::Grid);
        grid_block.slots[0].push(Block::new(BlockKind::Spacer));
        let html = grid(&grid_block, &ctx);
        assert!(html.contains("rounded-lg border border-slate-200"));
    }

    #[test]
    fn test_spacer_and_divider_defaults() {
        let registry = Registry::builtin();
        let ctx = RenderContext::new(Language::Ar, &registry);
        insta::assert_snapshot!(
            spacer(&Block::new(BlockKind::Spacer), &ctx),
            @r#"<div aria-hidden="true" style="height: 50px"></div>"#
        );
        insta::assert_snapshot!(
            divider(&Block::new(BlockKind::Divider), &ctx),
            @r##"<div class="py-6"><hr style="border-style: solid; border-color: #ccc; border-width: 1px 0 0 0"></div>"##
        );
    }
}
