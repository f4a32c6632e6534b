//! Conversion between the persisted block JSON and typed [`Block`]s.
//!
//! Persisted shape: `{ id, kind, content, styles?, children? | columnSlots?, order }`.
//! Decoding always runs the normalizer first, so every reader of stored
//! pages (editor, views, stores) sees the same tree.

use std::str::FromStr;

use log::{debug, warn};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use super::{normalize_blocks, normalize_column_slots};
use crate::models::{
    Block, BlockContent, BlockId, BlockKind, BlockStyles, Containment, MAX_COLUMNS, UnknownBlock,
    reindex,
};

/// Decode one persisted block.
///
/// Returns `None` only for entries that are not objects (holes, stray
/// scalars). Objects with an unknown kind or undecodable content become
/// [`BlockContent::Unknown`] and keep their raw JSON.
pub fn decode_block(value: &Value) -> Option<Block> {
    let Value::Object(object) = value else {
        if !value.is_null() {
            debug!("Skipping non-object block entry: {value}");
        }
        return None;
    };

    let id = decode_id(object.get("id"));
    let kind_name = object.get("kind").and_then(Value::as_str).unwrap_or_default();

    let Ok(kind) = BlockKind::from_str(kind_name) else {
        debug!("Block {id} has unknown kind {kind_name:?}, keeping it verbatim");
        return Some(unknown_block(id, kind_name, object));
    };

    let content = match object.get("content") {
        None | Some(Value::Null) => Value::Object(Map::new()),
        Some(content) => content.clone(),
    };
    let content = match BlockContent::from_json(kind, content) {
        Ok(content) => content,
        Err(e) => {
            warn!("Block {id} ({kind}) content does not decode, keeping it verbatim: {e}");
            return Some(unknown_block(id, kind_name, object));
        }
    };

    let mut block = Block {
        id,
        order: 0,
        content,
        styles: decode_styles(object),
        slots: Vec::new(),
    };

    match kind.containment() {
        Containment::None => {
            if has_nested(object) {
                debug!("Dropping nested blocks of leaf block {} ({kind})", block.id);
            }
        }
        Containment::Children => {
            block.slots = vec![decode_blocks(object.get("children"))];
        }
        Containment::ColumnSlots => {
            let mut slots: Vec<Vec<Block>> = normalize_column_slots(object.get("columnSlots"))
                .into_iter()
                .map(decode_list)
                .collect();
            if slots.is_empty() && object.contains_key("children") {
                debug!("Moving legacy children of {} into its first column", block.id);
                slots.push(decode_blocks(object.get("children")));
            }
            if slots.len() > MAX_COLUMNS {
                let dropped: usize = slots.iter().skip(MAX_COLUMNS).map(Vec::len).sum();
                warn!(
                    "Block {} stores {} slots, keeping the first {MAX_COLUMNS} and dropping {dropped} blocks",
                    block.id,
                    slots.len()
                );
                slots.truncate(MAX_COLUMNS);
            }
            let columns = block.content.column_count().unwrap_or(0);
            let target = columns.max(slots.len()).max(1);
            if slots.len() > columns {
                debug!(
                    "Block {} stores {} slots for {columns} columns, widening",
                    block.id,
                    slots.len()
                );
            }
            slots.resize_with(target, Vec::new);
            block.slots = slots;
            block.content.set_column_count(target);
        }
    }

    Some(block)
}

/// Decode a stored block list of any shape; holes are skipped.
pub fn decode_blocks(value: Option<&Value>) -> Vec<Block> {
    decode_list(normalize_blocks(value))
}

fn decode_list(values: Vec<Value>) -> Vec<Block> {
    let mut blocks: Vec<Block> = values.iter().filter_map(decode_block).collect();
    reindex(&mut blocks);
    blocks
}

fn decode_id(value: Option<&Value>) -> BlockId {
    match value {
        Some(Value::String(id)) if !id.is_empty() => BlockId::from(id.as_str()),
        Some(Value::Number(id)) => BlockId::from(id.to_string()),
        _ => BlockId::generate(),
    }
}

fn decode_styles(object: &Map<String, Value>) -> Option<BlockStyles> {
    let raw = match object.get("styles") {
        Some(Value::Null) | None => object.get("blockStyles")?,
        Some(styles) => styles,
    };
    match BlockStyles::deserialize(raw) {
        Ok(styles) if !styles.is_empty() => Some(styles),
        Ok(_) => None,
        Err(e) => {
            warn!("Ignoring undecodable block styles: {e}");
            None
        }
    }
}

fn has_nested(object: &Map<String, Value>) -> bool {
    let non_empty = |key: &str| match object.get(key) {
        None | Some(Value::Null) => false,
        Some(Value::Array(items)) => !items.is_empty(),
        Some(Value::Object(map)) => !map.is_empty(),
        Some(_) => true,
    };
    non_empty("children") || non_empty("columnSlots")
}

fn unknown_block(id: BlockId, kind_name: &str, object: &Map<String, Value>) -> Block {
    Block {
        id,
        order: 0,
        content: BlockContent::Unknown(UnknownBlock {
            kind: kind_name.to_string(),
            raw: object.clone(),
        }),
        styles: None,
        slots: Vec::new(),
    }
}

/// Encode a block into its canonical persisted shape.
pub fn encode_block(block: &Block) -> Value {
    if let BlockContent::Unknown(unknown) = &block.content {
        let mut raw = unknown.raw.clone();
        raw.insert("id".into(), Value::String(block.id.to_string()));
        raw.insert("order".into(), Value::from(block.order));
        return Value::Object(raw);
    }

    let mut object = Map::new();
    object.insert("id".into(), Value::String(block.id.to_string()));
    object.insert("kind".into(), Value::String(block.kind_name().to_string()));
    object.insert("content".into(), block.content.to_json());
    if let Some(styles) = block.styles.as_ref().filter(|s| !s.is_empty()) {
        if let Ok(styles) = serde_json::to_value(styles) {
            object.insert("styles".into(), styles);
        }
    }
    match block.containment() {
        Containment::None => {}
        Containment::Children => {
            let children = block.slots.first().map(Vec::as_slice).unwrap_or_default();
            object.insert("children".into(), encode_blocks(children));
        }
        Containment::ColumnSlots => {
            let slots = block.slots.iter().map(|slot| encode_blocks(slot)).collect();
            object.insert("columnSlots".into(), Value::Array(slots));
        }
    }
    object.insert("order".into(), Value::from(block.order));
    Value::Object(object)
}

pub fn encode_blocks(blocks: &[Block]) -> Value {
    Value::Array(blocks.iter().map(encode_block).collect())
}

impl Serialize for Block {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        encode_block(self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Block {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        decode_block(&value).ok_or_else(|| D::Error::custom("expected a block object"))
    }
}

/// `#[serde(with)]` adapter for a block list stored in any shape.
pub mod block_list {
    use super::*;

    pub fn serialize<S: Serializer>(blocks: &[Block], serializer: S) -> Result<S::Ok, S::Error> {
        encode_blocks(blocks).serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Block>, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(decode_blocks(Some(&value)))
    }
}

/// `#[serde(with)]` adapter for an optional per-language block list.
pub mod optional_block_list {
    use super::*;

    pub fn serialize<S: Serializer>(
        blocks: &Option<Vec<Block>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match blocks {
            Some(blocks) => encode_blocks(blocks).serialize(serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Vec<Block>>, D::Error> {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(value.map(|value| decode_blocks(Some(&value))))
    }
}
