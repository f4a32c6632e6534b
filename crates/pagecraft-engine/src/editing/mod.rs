/*!
 * # Editing Core Module
 *
 * Everything that changes a block tree goes through this module.
 *
 * ## Architecture Overview
 *
 * ### 1. Pure tree operations
 * - **`mutator`** exposes `insert_block`, `update_content`, `delete_block`,
 *   `move_block`, `move_block_to`, `change_column_count` and
 *   `duplicate_block`, each taking `&[Block]` and returning a new tree
 * - Containers are traversed through their slots only, so blocks inside
 *   `children` and inside `columnSlots` are reached by the same code
 * - Sibling `order` is rewritten after every structural change
 *
 * ### 2. Command-Based Editing
 * - Edits can also be expressed as **Commands** (`Cmd` enum) and applied in
 *   place with [`apply`], which returns a [`Patch`] saying whether the tree
 *   changed and which block to focus
 *
 * ### 3. Editor session
 * - [`PageEditor`] owns a working copy of a [`crate::models::Page`], the
 *   editing language, the selection and a dirty flag
 * - Saving writes the whole page; a failed save keeps the edits
 *
 * ## Usage Pattern
 *
 * ```rust
 * use pagecraft_engine::editing::*;
 * use pagecraft_engine::models::{Block, BlockKind};
 *
 * let columns = Block::new(BlockKind::Columns);
 * let container = columns.id.clone();
 * let tree = insert_block(&[], InsertAt::End, columns);
 * let tree = insert_block(
 *     &tree,
 *     InsertAt::Slot { container: container.clone(), slot: 1 },
 *     Block::new(BlockKind::Heading),
 * );
 * let tree = change_column_count(&tree, &container, 3);
 * assert_eq!(tree[0].slots.len(), 3);
 * assert_eq!(tree[0].slots[1].len(), 1);
 * ```
 */

pub mod commands;
pub mod mutator;
pub mod patch;
pub mod session;

pub use commands::{Cmd, apply};
pub use mutator::{
    Direction, InsertAt, PathStep, change_column_count, delete_block, duplicate_block, find_block,
    find_path, insert_block, insert_template, move_block, move_block_to, update_block,
    update_content,
};
pub use patch::Patch;
pub use session::PageEditor;
