use serde_json::{Map, Value};

use super::NESTED_ARRAY_MARKER;

/// Rewrite a document the way the document store persists it.
///
/// Arrays nested directly inside arrays, and block lists stored under
/// `children` or `columnSlots`, become objects keyed by index and tagged
/// with [`NESTED_ARRAY_MARKER`]. Top-level arrays are left alone.
pub fn mangle_nested_arrays(value: &Value) -> Value {
    mangle(value, false)
}

fn mangle(value: &Value, nested: bool) -> Value {
    match value {
        Value::Array(items) => {
            let items = items.iter().map(|item| mangle(item, true));
            if !nested {
                return Value::Array(items.collect());
            }
            let mut object: Map<String, Value> = items
                .enumerate()
                .map(|(index, item)| (index.to_string(), item))
                .collect();
            object.insert(NESTED_ARRAY_MARKER.into(), Value::Bool(true));
            Value::Object(object)
        }
        Value::Object(object) => Value::Object(
            object
                .iter()
                .map(|(key, item)| {
                    let nested = key == "children" || key == "columnSlots";
                    (key.clone(), mangle(item, nested))
                })
                .collect(),
        ),
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::{decode_blocks, encode_blocks};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_mangles_column_slots_both_levels() {
        let doc = json!({
            "blocks": [{
                "kind": "columns",
                "columnSlots": [[{ "kind": "heading" }], []]
            }]
        });
        let mangled = mangle_nested_arrays(&doc);
        assert_eq!(
            mangled,
            json!({
                "blocks": [{
                    "kind": "columns",
                    "columnSlots": {
                        "0": { "0": { "kind": "heading" }, "__isNestedArray": true },
                        "1": { "__isNestedArray": true },
                        "__isNestedArray": true
                    }
                }]
            })
        );
    }

    #[test]
    fn test_scalar_lists_inside_content_are_untouched() {
        let doc = json!([{ "kind": "stats", "content": { "items": [{ "value": "1" }] } }]);
        assert_eq!(mangle_nested_arrays(&doc), doc);
    }

    #[test]
    fn test_decode_undoes_mangling() {
        let doc = json!([{
            "id": "f",
            "kind": "form-container",
            "children": [{ "id": "a", "kind": "form-input" }, { "id": "b", "kind": "form-button" }]
        }]);
        let blocks = decode_blocks(Some(&doc));
        let restored = decode_blocks(Some(&mangle_nested_arrays(&encode_blocks(&blocks))));
        assert_eq!(restored, blocks);
    }
}
