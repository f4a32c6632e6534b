//! Repair of block collections mangled by the document store.
//!
//! The store cannot hold arrays nested inside arrays, so nested block lists
//! come back in one of several shapes: a proper array, a JSON string, or an
//! object keyed by index (optionally tagged with [`NESTED_ARRAY_MARKER`]).
//! The functions here turn any of them back into an ordered list. They never
//! fail: an unrecognized shape is an empty list.
//!
//! Restored lists may contain holes (`Value::Null`) where the source skipped
//! an index. Holes are kept so indices line up with the stored document;
//! the typed [`codec`] drops them when building blocks.

pub mod codec;
pub mod invariants;
pub mod mangle;

pub use codec::{decode_block, decode_blocks, encode_block, encode_blocks};
pub use invariants::{InvariantViolation, check_invariants};
pub use mangle::mangle_nested_arrays;

use log::warn;
use serde_json::{Map, Value};

/// Key the store writer adds to objects that stand in for arrays.
pub const NESTED_ARRAY_MARKER: &str = "__isNestedArray";

/// Largest index restored from an object-encoded array.
///
/// Keys beyond this are dropped rather than allocating a huge sparse list.
pub const MAX_RESTORED_INDEX: usize = 10_000;

/// Restore one block list (a container's children, or one column slot).
pub fn normalize_blocks(value: Option<&Value>) -> Vec<Value> {
    match value {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items.clone(),
        Some(Value::String(text)) => match serde_json::from_str(text) {
            Ok(Value::Array(items)) => items,
            _ => Vec::new(),
        },
        Some(Value::Object(map)) => restore_indexed(map),
        Some(_) => Vec::new(),
    }
}

/// Restore a `columnSlots` value: first the outer list of slots, then each
/// slot. Holes in the outer list become empty slots.
pub fn normalize_column_slots(value: Option<&Value>) -> Vec<Vec<Value>> {
    let slots = match value {
        Some(Value::Array(items)) => items.clone(),
        Some(Value::Object(map)) => restore_indexed(map),
        _ => return Vec::new(),
    };
    slots
        .iter()
        .map(|slot| normalize_blocks(Some(slot)))
        .collect()
}

/// Rebuild an array from an object keyed by index.
///
/// Keys are visited the way the store's original writer enumerated them:
/// canonical index keys in ascending order, then every other key. A key is
/// read as its leading integer (`"2"`, `" 2"`, `"2abc"` all mean 2), so a
/// later non-canonical key overwrites an earlier canonical one.
fn restore_indexed(map: &Map<String, Value>) -> Vec<Value> {
    let mut canonical: Vec<(usize, &Value)> = Vec::new();
    let mut others: Vec<(&str, &Value)> = Vec::new();
    for (key, value) in map {
        if key == NESTED_ARRAY_MARKER {
            continue;
        }
        match canonical_index(key) {
            Some(index) => canonical.push((index, value)),
            None => others.push((key, value)),
        }
    }
    canonical.sort_by_key(|(index, _)| *index);

    let mut restored: Vec<Value> = Vec::new();
    let assignments = canonical.into_iter().chain(
        others
            .into_iter()
            .filter_map(|(key, value)| parse_leading_index(key).map(|index| (index, value))),
    );
    for (index, value) in assignments {
        if index > MAX_RESTORED_INDEX {
            warn!("Dropping block at index {index}: exceeds {MAX_RESTORED_INDEX}");
            continue;
        }
        if restored.len() <= index {
            restored.resize(index + 1, Value::Null);
        }
        restored[index] = value.clone();
    }
    restored
}

/// `Some(i)` when `key` is exactly the decimal form of an array index.
fn canonical_index(key: &str) -> Option<usize> {
    let index: u32 = key.parse().ok()?;
    (index != u32::MAX && index.to_string() == key).then_some(index as usize)
}

/// Leading base-10 integer of `key`, ignoring leading whitespace.
///
/// Negative numbers and keys with no leading digits yield `None`. Values too
/// large to be an index saturate so they are rejected by the index limit.
fn parse_leading_index(key: &str) -> Option<usize> {
    let rest = key.trim_start();
    let (negative, rest) = match rest.as_bytes().first() {
        Some(b'-') => (true, &rest[1..]),
        Some(b'+') => (false, &rest[1..]),
        _ => (false, rest),
    };
    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    let value = rest[..digits]
        .bytes()
        .fold(0usize, |acc, d| acc.saturating_mul(10).saturating_add((d - b'0') as usize));
    if negative && value != 0 {
        return None;
    }
    Some(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(None)]
    #[case(Some(json!(null)))]
    #[case(Some(json!(false)))]
    #[case(Some(json!(0)))]
    #[case(Some(json!("")))]
    #[case(Some(json!(true)))]
    #[case(Some(json!(42)))]
    fn test_non_collections_are_empty(#[case] value: Option<Value>) {
        assert_eq!(normalize_blocks(value.as_ref()), Vec::<Value>::new());
    }

    #[test]
    fn test_array_is_returned_unchanged() {
        let value = json!([{ "id": "a" }, null, { "id": "b" }]);
        assert_eq!(
            normalize_blocks(Some(&value)),
            vec![json!({ "id": "a" }), Value::Null, json!({ "id": "b" })]
        );
    }

    #[rstest]
    #[case(r#"[{"id":"a"}]"#, vec![json!({ "id": "a" })])]
    #[case(r#"{"0":{"id":"a"}}"#, vec![])]
    #[case("not json", vec![])]
    #[case("[", vec![])]
    fn test_json_string(#[case] text: &str, #[case] expected: Vec<Value>) {
        assert_eq!(normalize_blocks(Some(&json!(text))), expected);
    }

    #[test]
    fn test_object_with_marker_is_restored_in_index_order() {
        let value = json!({
            "1": { "id": "b" },
            "__isNestedArray": true,
            "0": { "id": "a" },
        });
        assert_eq!(
            normalize_blocks(Some(&value)),
            vec![json!({ "id": "a" }), json!({ "id": "b" })]
        );
    }

    #[test]
    fn test_object_sorts_indices_numerically() {
        let value = json!({ "10": "k", "2": "c", "0": "a" });
        let restored = normalize_blocks(Some(&value));
        assert_eq!(restored.len(), 11);
        assert_eq!(restored[0], json!("a"));
        assert_eq!(restored[2], json!("c"));
        assert_eq!(restored[10], json!("k"));
    }

    #[test]
    fn test_object_gaps_become_holes() {
        let value = json!({ "0": "a", "2": "c" });
        assert_eq!(
            normalize_blocks(Some(&value)),
            vec![json!("a"), Value::Null, json!("c")]
        );
    }

    #[test]
    fn test_non_numeric_and_negative_keys_are_dropped() {
        let value = json!({ "0": "a", "title": "x", "-1": "y" });
        assert_eq!(normalize_blocks(Some(&value)), vec![json!("a")]);
    }

    #[test]
    fn test_loose_keys_use_leading_integer_and_win() {
        let value = json!({ "1": "canonical", "1abc": "loose", " 0": "padded" });
        assert_eq!(
            normalize_blocks(Some(&value)),
            vec![json!("padded"), json!("loose")]
        );
    }

    #[test]
    fn test_oversized_index_is_dropped() {
        let value = json!({ "0": "a", "99999999": "far" });
        assert_eq!(normalize_blocks(Some(&value)), vec![json!("a")]);
    }

    #[rstest]
    #[case("0", Some(0))]
    #[case("12", Some(12))]
    #[case("  7", Some(7))]
    #[case("+3", Some(3))]
    #[case("-0", Some(0))]
    #[case("-4", None)]
    #[case("4.5", Some(4))]
    #[case("x1", None)]
    #[case("", None)]
    fn test_parse_leading_index(#[case] key: &str, #[case] expected: Option<usize>) {
        assert_eq!(parse_leading_index(key), expected);
    }

    #[rstest]
    #[case("0", Some(0))]
    #[case("15", Some(15))]
    #[case("015", None)]
    #[case("+1", None)]
    #[case("1.0", None)]
    fn test_canonical_index(#[case] key: &str, #[case] expected: Option<usize>) {
        assert_eq!(canonical_index(key), expected);
    }

    #[test]
    fn test_column_slots_object_outer_and_inner() {
        let value = json!({
            "__isNestedArray": true,
            "0": { "__isNestedArray": true, "0": { "id": "h" } },
            "1": [{ "id": "i" }],
        });
        assert_eq!(
            normalize_column_slots(Some(&value)),
            vec![vec![json!({ "id": "h" })], vec![json!({ "id": "i" })]]
        );
    }

    #[test]
    fn test_column_slots_outer_hole_is_empty_slot() {
        let value = json!({ "0": [{ "id": "a" }], "2": [] });
        assert_eq!(
            normalize_column_slots(Some(&value)),
            vec![vec![json!({ "id": "a" })], vec![], vec![]]
        );
    }

    #[rstest]
    #[case(json!(null))]
    #[case(json!("[[]]"))]
    #[case(json!(3))]
    fn test_column_slots_other_shapes_are_empty(#[case] value: Value) {
        assert_eq!(normalize_column_slots(Some(&value)), Vec::<Vec<Value>>::new());
    }

    #[test]
    fn test_normalization_is_idempotent() {
        let value = json!({ "0": [{ "id": "a" }], "1": { "1": { "id": "b" } } });
        let once = normalize_column_slots(Some(&value));
        let as_value = Value::Array(once.iter().cloned().map(Value::Array).collect());
        let twice = normalize_column_slots(Some(&as_value));
        assert_eq!(once, twice);
    }
}
