use serde_json::{Map, Value};

use crate::editing::Patch;
use crate::editing::mutator::{self, Direction, InsertAt};
use crate::models::{Block, BlockId};

/// An edit to a block tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Cmd {
    Insert {
        at: InsertAt,
        block: Block,
    },
    /// Append several blocks at once, e.g. an instantiated template.
    InsertMany {
        at: InsertAt,
        blocks: Vec<Block>,
    },
    UpdateContent {
        id: BlockId,
        content: Map<String, Value>,
        styles: Map<String, Value>,
    },
    Delete {
        id: BlockId,
        parent: Option<BlockId>,
    },
    Move {
        id: BlockId,
        direction: Direction,
    },
    MoveTo {
        id: BlockId,
        index: usize,
    },
    SetColumns {
        id: BlockId,
        count: usize,
    },
    Duplicate {
        id: BlockId,
    },
}

/// Apply `cmd` to `tree` in place.
///
/// Commands that target a missing block, or that would break the tree's
/// rules, leave it unchanged and return a no-op patch.
pub fn apply(tree: &mut Vec<Block>, cmd: Cmd) -> Patch {
    match cmd {
        Cmd::Insert { at, block } => match mutator::insert_in(tree, &at, block) {
            Some(id) => Patch::applied(Some(id)),
            None => Patch::noop(),
        },
        Cmd::InsertMany { at, blocks } => match mutator::insert_all_in(tree, &at, blocks) {
            Some(first) => Patch::applied(Some(first)),
            None => Patch::noop(),
        },
        Cmd::UpdateContent {
            id,
            content,
            styles,
        } => changed(mutator::update_content_in(tree, &id, &content, &styles), Some(id)),
        Cmd::Delete { id, parent } => changed(mutator::delete_in(tree, &id, parent.as_ref()), None),
        Cmd::Move { id, direction } => changed(mutator::move_in(tree, &id, direction), Some(id)),
        Cmd::MoveTo { id, index } => changed(mutator::move_to_in(tree, &id, index), Some(id)),
        Cmd::SetColumns { id, count } => changed(mutator::set_columns_in(tree, &id, count), Some(id)),
        Cmd::Duplicate { id } => match mutator::duplicate_in(tree, &id) {
            Some(copy) => Patch::applied(Some(copy)),
            None => Patch::noop(),
        },
    }
}

fn changed(applied: bool, focus: Option<BlockId>) -> Patch {
    if applied {
        Patch::applied(focus)
    } else {
        Patch::noop()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BlockKind;
    use crate::tests::{block_with_id, sample_tree};

    #[test]
    fn test_insert_focuses_new_block() {
        let mut tree = sample_tree();
        let patch = apply(
            &mut tree,
            Cmd::Insert {
                at: InsertAt::End,
                block: block_with_id("new", BlockKind::Divider),
            },
        );
        assert!(patch.applied);
        assert_eq!(patch.focus, Some("new".into()));
    }

    #[test]
    fn test_insert_many_focuses_first_block() {
        let mut tree = sample_tree();
        let patch = apply(
            &mut tree,
            Cmd::InsertMany {
                at: InsertAt::End,
                blocks: vec![
                    block_with_id("a", BlockKind::Divider),
                    block_with_id("b", BlockKind::Spacer),
                ],
            },
        );
        assert!(patch.applied);
        assert_eq!(patch.focus, Some("a".into()));
        assert_eq!(tree.len(), 5);
        assert_eq!(tree[4].order, 4);

        let empty = apply(
            &mut tree,
            Cmd::InsertMany {
                at: InsertAt::End,
                blocks: Vec::new(),
            },
        );
        assert!(!empty.applied);
    }

    #[test]
    fn test_delete_clears_focus() {
        let mut tree = sample_tree();
        let patch = apply(
            &mut tree,
            Cmd::Delete {
                id: "top".into(),
                parent: None,
            },
        );
        assert_eq!(patch, Patch::applied(None));
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn test_duplicate_focuses_copy() {
        let mut tree = sample_tree();
        let patch = apply(&mut tree, Cmd::Duplicate { id: "top".into() });
        assert_eq!(patch.focus.as_ref(), Some(&tree[1].id));
        assert_ne!(tree[1].id.as_str(), "top");
    }

    #[test]
    fn test_missing_target_is_noop() {
        let mut tree = sample_tree();
        let before = tree.clone();
        let patch = apply(
            &mut tree,
            Cmd::Move {
                id: "missing".into(),
                direction: Direction::Down,
            },
        );
        assert_eq!(patch, Patch::noop());
        assert_eq!(tree, before);
    }
}
