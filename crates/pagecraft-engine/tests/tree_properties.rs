use std::collections::HashSet;

use pagecraft_engine::editing::{
    Direction, InsertAt, change_column_count, duplicate_block, find_block, insert_block,
    move_block, update_content,
};
use pagecraft_engine::models::{
    Block, BlockContent, BlockId, BlockKind, HeadingContent, ImageContent, Language, language,
    reindex,
};
use pagecraft_engine::normalize::{check_invariants, normalize_blocks, normalize_column_slots};
use pagecraft_engine::views::{RenderContext, render_block};
use pagecraft_engine::{MemoryPageStore, Page, PageStore, Registry};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{Map, Value, json};

fn heading(id: &str, title_ar: &str) -> Block {
    let mut block = Block::with_content(BlockContent::Heading(HeadingContent {
        title_ar: title_ar.to_string(),
        ..Default::default()
    }));
    block.id = BlockId::from(id);
    block
}

fn columns(id: &str, slots: Vec<Vec<Block>>) -> Block {
    let mut block = Block::new(BlockKind::Columns);
    block.id = BlockId::from(id);
    block.set_column_count(slots.len());
    block.slots = slots;
    for slot in &mut block.slots {
        reindex(slot);
    }
    block
}

fn ids(blocks: &[Block]) -> Vec<&str> {
    blocks.iter().map(|block| block.id.as_str()).collect()
}

fn orders(blocks: &[Block]) -> Vec<usize> {
    blocks.iter().map(|block| block.order).collect()
}

#[rstest]
#[case(json!([{ "id": "a" }, { "id": "b" }]))]
#[case(json!({ "0": { "id": "a" }, "2": { "id": "c" } }))]
#[case(json!({ "__isNestedArray": true, "1": { "id": "b" }, "0": { "id": "a" } }))]
#[case(json!("[{\"id\":\"a\"}]"))]
#[case(json!("not json"))]
#[case(json!(42))]
#[case(Value::Null)]
fn normalizing_blocks_is_idempotent(#[case] input: Value) {
    let once = normalize_blocks(Some(&input));
    let twice = normalize_blocks(Some(&Value::Array(once.clone())));
    assert_eq!(twice, once);
}

#[rstest]
#[case(json!([[{ "id": "a" }], []]))]
#[case(json!({ "1": [{ "id": "b" }], "0": { "0": { "id": "a" } } }))]
#[case(json!({ "__isNestedArray": true, "0": "[]", "2": [] }))]
#[case(json!([null, "junk", { "0": { "id": "a" } }]))]
fn normalizing_column_slots_is_idempotent(#[case] input: Value) {
    let once = normalize_column_slots(Some(&input));
    let canonical = Value::Array(once.iter().cloned().map(Value::Array).collect());
    assert_eq!(normalize_column_slots(Some(&canonical)), once);
}

#[rstest]
#[case(vec![json!({ "id": "a" })])]
#[case(vec![json!({ "id": "a" }), json!({ "id": "b" }), json!({ "id": "c" })])]
#[case(vec![json!({ "id": "a" }), Value::Null, json!({ "id": "c" })])]
fn object_encoded_arrays_are_recovered(#[case] source: Vec<Value>) {
    let encoded: Map<String, Value> = source
        .iter()
        .enumerate()
        .filter(|(_, item)| !item.is_null())
        .map(|(index, item)| (index.to_string(), item.clone()))
        .collect();
    assert_eq!(normalize_blocks(Some(&Value::Object(encoded))), source);
}

#[test]
fn moving_keeps_orders_contiguous() {
    for n in 2..6 {
        let mut list: Vec<Block> = (0..n).map(|i| heading(&format!("b{i}"), "x")).collect();
        reindex(&mut list);
        for i in 0..n {
            let id = list[i].id.clone();
            for direction in [Direction::Up, Direction::Down] {
                let moved = move_block(&list, &id, direction);
                assert_eq!(orders(&moved), (0..n).collect::<Vec<_>>());
                assert_eq!(moved.len(), n);
            }
        }
    }
}

#[test]
fn duplicate_uses_fresh_ids_throughout() {
    let tree = vec![columns(
        "cols",
        vec![vec![heading("h1", "أ")], vec![heading("h2", "ب")]],
    )];
    let next = duplicate_block(&tree, &BlockId::from("cols"));

    assert_eq!(next.len(), 2);
    let original: HashSet<&BlockId> = next[0].subtree_ids().into_iter().collect();
    let copy: HashSet<&BlockId> = next[1].subtree_ids().into_iter().collect();
    assert_eq!(copy.len(), 3);
    assert!(original.is_disjoint(&copy));
    assert!(check_invariants(&next).is_empty());
}

#[test]
fn update_targets_exactly_one_block() {
    let mut form = Block::new(BlockKind::FormContainer);
    form.id = BlockId::from("form");
    form.slots[0].push(heading("a", "أ"));
    let mut tree = vec![form, columns("cols", vec![vec![heading("b", "ب")], vec![]])];
    reindex(&mut tree);

    let patch = json!({ "titleEn": "Bee" });
    let next = update_content(
        &tree,
        &BlockId::from("b"),
        patch.as_object().unwrap(),
        &Map::new(),
    );

    assert_eq!(next[0], tree[0]);
    let updated = find_block(&next, &BlockId::from("b")).unwrap();
    assert_eq!(updated.content.summary(Language::En), "Bee");
    let mut expected = tree[1].clone();
    expected.slots[0][0] = updated.clone();
    assert_eq!(next[1], expected);
}

#[test]
fn english_falls_back_to_arabic() {
    assert_eq!(language::resolve("عنوان", None, Language::En), "عنوان");
    assert_eq!(language::resolve("عنوان", Some(""), Language::En), "عنوان");

    let registry = Registry::builtin();
    let ctx = RenderContext::new(Language::En, &registry);
    let html = render_block(&heading("h", "عنوان"), &ctx);
    assert!(html.contains("عنوان"));
}

#[test]
fn resizing_columns_preserves_surviving_slots() {
    let tree = vec![columns(
        "cols",
        vec![
            vec![heading("a", "أ")],
            vec![heading("b", "ب")],
            vec![heading("c", "ج")],
        ],
    )];
    let id = BlockId::from("cols");

    let shrunk = change_column_count(&tree, &id, 2);
    assert_eq!(shrunk[0].slots.len(), 2);
    assert_eq!(shrunk[0].content.column_count(), Some(2));
    assert_eq!(shrunk[0].slots[..], tree[0].slots[..2]);

    let grown = change_column_count(&shrunk, &id, 4);
    assert_eq!(grown[0].content.column_count(), Some(4));
    assert_eq!(grown[0].slots[..2], shrunk[0].slots[..]);
    assert!(grown[0].slots[2].is_empty());
    assert!(grown[0].slots[3].is_empty());
}

#[test]
fn columns_survive_a_mangling_store_round_trip() {
    let mut tree: Vec<Block> = Vec::new();
    tree = insert_block(&tree, InsertAt::End, Block::new(BlockKind::Columns));
    let container = tree[0].id.clone();
    assert_eq!(tree[0].content.column_count(), Some(2));

    let title = heading("title", "عنوان");
    let image = Block::with_content(BlockContent::Image(ImageContent {
        url: "/a.jpg".into(),
        ..Default::default()
    }));
    let image_id = image.id.clone();
    tree = insert_block(
        &tree,
        InsertAt::Slot {
            container: container.clone(),
            slot: 0,
        },
        title,
    );
    tree = insert_block(
        &tree,
        InsertAt::Slot {
            container: container.clone(),
            slot: 1,
        },
        image,
    );

    let mut store = MemoryPageStore::mangling();
    let mut page = Page::new("p", "p", "صفحة");
    page.blocks = tree;
    store.save_page(&page).unwrap();

    let raw_slots = &store.raw("p").unwrap()["blocks"][0]["columnSlots"];
    assert!(raw_slots.is_object());

    let reloaded = store.get_page("p").unwrap().unwrap();
    assert_eq!(reloaded.blocks.len(), 1);
    let columns = &reloaded.blocks[0];
    assert_eq!(columns.id, container);
    assert_eq!(columns.slots.len(), 2);
    assert_eq!(ids(&columns.slots[0]), vec!["title"]);
    assert_eq!(ids(&columns.slots[1]), vec![image_id.as_str()]);
    assert_eq!(columns.slots[1][0].kind(), Some(BlockKind::Image));
    assert!(check_invariants(&reloaded.blocks).is_empty());
}
