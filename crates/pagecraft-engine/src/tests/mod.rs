//! Shared fixtures for unit tests.

use crate::models::{
    Block, BlockContent, BlockId, BlockKind, FormInputContent, HeadingContent, Page, reindex,
};

pub fn block_with_id(id: &str, kind: BlockKind) -> Block {
    let mut block = Block::new(kind);
    block.id = BlockId::from(id);
    block
}

pub fn heading(id: &str, title_ar: &str) -> Block {
    let mut block = Block::with_content(BlockContent::Heading(HeadingContent {
        title_ar: title_ar.to_string(),
        ..Default::default()
    }));
    block.id = BlockId::from(id);
    block
}

/// `top` heading, a two-column `cols` block with one heading per column
/// (`in-col-0`, `in-col-1`), and a `form` container holding `in-form`.
pub fn sample_tree() -> Vec<Block> {
    let mut columns = block_with_id("cols", BlockKind::Columns);
    columns.slots[0].push(heading("in-col-0", "العمود الأول"));
    columns.slots[1].push(heading("in-col-1", "العمود الثاني"));

    let mut form = block_with_id("form", BlockKind::FormContainer);
    let mut input = Block::with_content(BlockContent::FormInput(FormInputContent {
        label_ar: "الاسم".into(),
        name: "name".into(),
        ..Default::default()
    }));
    input.id = BlockId::from("in-form");
    form.slots[0].push(input);

    let mut tree = vec![heading("top", "مرحبا"), columns, form];
    reindex(&mut tree);
    tree
}

pub fn sample_page() -> Page {
    let mut page = Page::new("home", "home", "الرئيسية");
    page.title_en = Some("Home".into());
    page.blocks = sample_tree();
    page
}

pub fn create_test_pages_dir() -> tempfile::TempDir {
    tempfile::TempDir::new().expect("Failed to create temp dir")
}
