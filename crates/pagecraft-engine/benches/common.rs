// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
use serde_json::{Value, json};

/// A page-sized tree: `sections` column blocks, each holding `per_slot`
/// headings in both of its slots, separated by rich-text blocks.
#[allow(dead_code)]
pub fn generate_tree(sections: usize, per_slot: usize) -> Value {
    let blocks: Vec<Value> = (0..sections)
        .flat_map(|section| {
            let slot = |column: usize| -> Vec<Value> {
                (0..per_slot)
                    .map(|i| {
                        json!({
                            "id": format!("h-{section}-{column}-{i}"),
                            "kind": "heading",
                            "order": i,
                            "content": { "titleAr": "عنوان", "titleEn": "Title" }
                        })
                    })
                    .collect()
            };
            [
                json!({
                    "id": format!("text-{section}"),
                    "kind": "rich-text",
                    "content": { "bodyAr": "فقرة **مهمة**", "bodyEn": "An **important** paragraph" }
                }),
                json!({
                    "id": format!("cols-{section}"),
                    "kind": "columns",
                    "content": { "columns": 2, "gap": "md" },
                    "columnSlots": [slot(0), slot(1)]
                }),
            ]
        })
        .collect();
    Value::Array(blocks)
}
