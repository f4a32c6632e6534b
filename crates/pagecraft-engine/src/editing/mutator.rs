//! Tree operations over block lists.
//!
//! The public functions are pure: they take the current tree and return a
//! new one, leaving the input untouched. The `*_in` variants do the work in
//! place and report whether anything changed; [`crate::editing::apply`] and
//! the editor session use those.
//!
//! Every lookup descends through all slots of every container, so blocks
//! nested in `children` and in `columnSlots` are found the same way. An id
//! that is not in the tree is a no-op.

use log::{debug, warn};
use serde_json::{Map, Value};

use crate::models::{
    Block, BlockContent, BlockId, BlockStyles, Containment, MAX_COLUMNS, reindex,
};
use crate::templates::BlockTemplate;

/// Where a new block goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertAt {
    /// Append to the top-level list.
    End,
    /// Append to slot `slot` of the container `container`.
    Slot { container: BlockId, slot: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// One step from the root towards a nested block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathStep {
    pub container: BlockId,
    pub slot: usize,
}

pub fn find_block<'a>(tree: &'a [Block], id: &BlockId) -> Option<&'a Block> {
    for block in tree {
        if block.id == *id {
            return Some(block);
        }
        if let Some(found) = block.slots.iter().find_map(|slot| find_block(slot, id)) {
            return Some(found);
        }
    }
    None
}

/// Containers and slot indices leading to `id`; empty for a top-level block.
pub fn find_path(tree: &[Block], id: &BlockId) -> Option<Vec<PathStep>> {
    let mut path = Vec::new();
    path_into(tree, id, &mut path).then_some(path)
}

fn path_into(blocks: &[Block], id: &BlockId, path: &mut Vec<PathStep>) -> bool {
    for block in blocks {
        if block.id == *id {
            return true;
        }
        for (slot, children) in block.slots.iter().enumerate() {
            path.push(PathStep {
                container: block.id.clone(),
                slot,
            });
            if path_into(children, id, path) {
                return true;
            }
            path.pop();
        }
    }
    false
}

/// The sibling list holding `id`, and its position there.
pub(crate) fn locate_mut<'a>(
    blocks: &'a mut Vec<Block>,
    id: &BlockId,
) -> Option<(&'a mut Vec<Block>, usize)> {
    if let Some(position) = blocks.iter().position(|block| block.id == *id) {
        return Some((blocks, position));
    }
    for block in blocks.iter_mut() {
        for slot in block.slots.iter_mut() {
            if let Some(found) = locate_mut(slot, id) {
                return Some(found);
            }
        }
    }
    None
}

pub(crate) fn find_block_mut<'a>(blocks: &'a mut Vec<Block>, id: &BlockId) -> Option<&'a mut Block> {
    locate_mut(blocks, id).map(|(siblings, position)| &mut siblings[position])
}

pub(crate) fn insert_in(tree: &mut Vec<Block>, at: &InsertAt, block: Block) -> Option<BlockId> {
    insert_all_in(tree, at, vec![block])
}

/// Append `blocks` in order at `at`; returns the id of the first one.
pub(crate) fn insert_all_in(
    tree: &mut Vec<Block>,
    at: &InsertAt,
    blocks: Vec<Block>,
) -> Option<BlockId> {
    let Some(first) = blocks.first().map(|block| block.id.clone()) else {
        debug!("Nothing to insert");
        return None;
    };
    let siblings = match at {
        InsertAt::End => tree,
        InsertAt::Slot { container, slot } => {
            let Some(parent) = find_block_mut(tree, container) else {
                debug!("Insert target {container} not found");
                return None;
            };
            let Some(siblings) = parent.slots.get_mut(*slot) else {
                debug!("Block {container} has no slot {slot}");
                return None;
            };
            siblings
        }
    };
    siblings.extend(blocks);
    reindex(siblings);
    Some(first)
}

pub(crate) fn update_in(tree: &mut Vec<Block>, id: &BlockId, f: impl FnOnce(&mut Block)) -> bool {
    match find_block_mut(tree, id) {
        Some(block) => {
            f(block);
            true
        }
        None => {
            debug!("Update target {id} not found");
            false
        }
    }
}

/// Shallow-merge `patch` into `target`; a `null` value removes the key.
fn merge(target: &mut Map<String, Value>, patch: &Map<String, Value>) {
    for (key, value) in patch {
        if value.is_null() {
            target.remove(key);
        } else {
            target.insert(key.clone(), value.clone());
        }
    }
}

fn as_object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(object) => object,
        _ => Map::new(),
    }
}

pub(crate) fn update_content_in(
    tree: &mut Vec<Block>,
    id: &BlockId,
    content_patch: &Map<String, Value>,
    style_patch: &Map<String, Value>,
) -> bool {
    let Some(block) = find_block_mut(tree, id) else {
        debug!("Update target {id} not found");
        return false;
    };
    let Some(kind) = block.kind() else {
        debug!("Block {id} has unknown kind {}, not editable", block.kind_name());
        return false;
    };

    let mut content = None;
    if !content_patch.is_empty() {
        let mut merged = as_object(block.content.to_json());
        merge(&mut merged, content_patch);
        match BlockContent::from_json(kind, Value::Object(merged)) {
            Ok(decoded) => content = Some(decoded),
            Err(e) => {
                warn!("Rejecting content patch for {id} ({kind}): {e}");
                return false;
            }
        }
    }

    let mut styles = None;
    if !style_patch.is_empty() {
        let current = block
            .styles
            .as_ref()
            .and_then(|styles| serde_json::to_value(styles).ok())
            .map(as_object)
            .unwrap_or_default();
        let mut merged = current;
        merge(&mut merged, style_patch);
        match serde_json::from_value::<BlockStyles>(Value::Object(merged)) {
            Ok(decoded) => styles = Some(decoded),
            Err(e) => {
                warn!("Rejecting style patch for {id}: {e}");
                return false;
            }
        }
    }

    if let Some(content) = content {
        block.content = content;
        if let Some(columns) = block.content.column_count() {
            if columns != block.slots.len() {
                block.set_column_count(columns);
            }
        }
    }
    if let Some(styles) = styles {
        block.styles = (!styles.is_empty()).then_some(styles);
    }
    true
}

pub(crate) fn delete_in(tree: &mut Vec<Block>, id: &BlockId, parent: Option<&BlockId>) -> bool {
    let located = match parent {
        None => locate_mut(tree, id),
        Some(parent) => find_block_mut(tree, parent).and_then(|parent| {
            parent.slots.iter_mut().find_map(|slot| {
                let position = slot.iter().position(|block| block.id == *id)?;
                Some((slot, position))
            })
        }),
    };
    let Some((siblings, position)) = located else {
        debug!("Delete target {id} not found");
        return false;
    };
    siblings.remove(position);
    reindex(siblings);
    true
}

pub(crate) fn move_in(tree: &mut Vec<Block>, id: &BlockId, direction: Direction) -> bool {
    let Some((siblings, position)) = locate_mut(tree, id) else {
        debug!("Move target {id} not found");
        return false;
    };
    let target = match direction {
        Direction::Up => position.checked_sub(1),
        Direction::Down => (position + 1 < siblings.len()).then_some(position + 1),
    };
    let Some(target) = target else {
        debug!("Block {id} is already at the {direction:?} boundary");
        return false;
    };
    siblings.swap(position, target);
    reindex(siblings);
    true
}

pub(crate) fn move_to_in(tree: &mut Vec<Block>, id: &BlockId, index: usize) -> bool {
    let Some((siblings, position)) = locate_mut(tree, id) else {
        debug!("Move target {id} not found");
        return false;
    };
    let target = index.min(siblings.len() - 1);
    if target == position {
        return false;
    }
    let block = siblings.remove(position);
    siblings.insert(target, block);
    reindex(siblings);
    true
}

pub(crate) fn set_columns_in(tree: &mut Vec<Block>, id: &BlockId, count: usize) -> bool {
    if count == 0 {
        debug!("Ignoring column count 0 for {id}");
        return false;
    }
    let count = count.min(MAX_COLUMNS);
    let Some(block) = find_block_mut(tree, id) else {
        debug!("Column target {id} not found");
        return false;
    };
    if block.containment() != Containment::ColumnSlots {
        debug!("Block {id} ({}) has no columns", block.kind_name());
        return false;
    }
    if block.slots.len() == count && block.content.column_count() == Some(count) {
        return false;
    }
    // Shrinking drops the trailing slots with everything in them
    let discarded: usize = block.slots.iter().skip(count).map(Vec::len).sum();
    if discarded > 0 {
        debug!("Shrinking {id} to {count} columns discards {discarded} blocks");
    }
    block.set_column_count(count);
    true
}

pub(crate) fn duplicate_in(tree: &mut Vec<Block>, id: &BlockId) -> Option<BlockId> {
    let Some((siblings, position)) = locate_mut(tree, id) else {
        debug!("Duplicate target {id} not found");
        return None;
    };
    let copy = siblings[position].fresh_copy();
    let copy_id = copy.id.clone();
    siblings.insert(position + 1, copy);
    reindex(siblings);
    Some(copy_id)
}

/// Append `block` at `at`. Its `order` becomes its position among its new
/// siblings.
pub fn insert_block(tree: &[Block], at: InsertAt, block: Block) -> Vec<Block> {
    let mut next = tree.to_vec();
    insert_in(&mut next, &at, block);
    next
}

/// Apply `f` to the block `id`.
pub fn update_block(tree: &[Block], id: &BlockId, f: impl FnOnce(&mut Block)) -> Vec<Block> {
    let mut next = tree.to_vec();
    update_in(&mut next, id, f);
    next
}

/// Shallow-merge JSON patches into the content and styles of `id`.
///
/// A `null` patch value clears that key. If the merged content or styles no
/// longer decode, the block is left as it was.
pub fn update_content(
    tree: &[Block],
    id: &BlockId,
    content_patch: &Map<String, Value>,
    style_patch: &Map<String, Value>,
) -> Vec<Block> {
    let mut next = tree.to_vec();
    update_content_in(&mut next, id, content_patch, style_patch);
    next
}

/// Remove `id` and everything it contains. With `parent`, only that
/// container's slots are searched.
pub fn delete_block(tree: &[Block], id: &BlockId, parent: Option<&BlockId>) -> Vec<Block> {
    let mut next = tree.to_vec();
    delete_in(&mut next, id, parent);
    next
}

/// Swap `id` with its previous or next sibling.
pub fn move_block(tree: &[Block], id: &BlockId, direction: Direction) -> Vec<Block> {
    let mut next = tree.to_vec();
    move_in(&mut next, id, direction);
    next
}

/// Move `id` to `index` within its sibling list, clamped to the list.
pub fn move_block_to(tree: &[Block], id: &BlockId, index: usize) -> Vec<Block> {
    let mut next = tree.to_vec();
    move_to_in(&mut next, id, index);
    next
}

/// Resize the columns of the container `id` to `count` (at least 1).
///
/// Shrinking discards the blocks in the removed columns.
pub fn change_column_count(tree: &[Block], id: &BlockId, count: usize) -> Vec<Block> {
    let mut next = tree.to_vec();
    set_columns_in(&mut next, id, count);
    next
}

/// Append a fresh-id copy of `template`'s blocks at `at`.
pub fn insert_template(tree: &[Block], at: InsertAt, template: &BlockTemplate) -> Vec<Block> {
    let mut next = tree.to_vec();
    insert_all_in(&mut next, &at, template.instantiate());
    next
}

/// Insert a fresh-id deep copy of `id` right after it.
pub fn duplicate_block(tree: &[Block], id: &BlockId) -> Vec<Block> {
    let mut next = tree.to_vec();
    duplicate_in(&mut next, id);
    next
}
