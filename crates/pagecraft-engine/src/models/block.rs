use crate::models::{BlockContent, BlockId, BlockKind, BlockStyles, Containment, MAX_COLUMNS};

/// A node in a page's content tree.
///
/// Nested blocks live in `slots`, one list per slot. Leaf kinds have no
/// slots, `form-container` has exactly one (persisted as `children`), and
/// `columns`/`grid` have one per configured column (persisted as
/// `columnSlots`). Every traversal goes through `slots`, so the two
/// persisted containment shapes never need separate handling.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub id: BlockId,
    /// Position among siblings, always `0..n` after any mutation.
    pub order: usize,
    pub content: BlockContent,
    pub styles: Option<BlockStyles>,
    pub slots: Vec<Vec<Block>>,
}

impl Block {
    /// A fresh block of `kind` with default content and empty slots.
    pub fn new(kind: BlockKind) -> Self {
        Self::with_content(BlockContent::default_for(kind))
    }

    /// A fresh block holding `content`, with empty slots sized for its kind.
    pub fn with_content(content: BlockContent) -> Self {
        let slot_count = match content.kind().map(BlockKind::containment) {
            Some(Containment::Children) => 1,
            Some(Containment::ColumnSlots) => content.column_count().unwrap_or(1).max(1),
            _ => 0,
        };
        Self {
            id: BlockId::generate(),
            order: 0,
            content,
            styles: None,
            slots: vec![Vec::new(); slot_count],
        }
    }

    pub fn kind(&self) -> Option<BlockKind> {
        self.content.kind()
    }

    pub fn kind_name(&self) -> &str {
        self.content.kind_name()
    }

    pub fn containment(&self) -> Containment {
        self.kind()
            .map(BlockKind::containment)
            .unwrap_or(Containment::None)
    }

    pub fn is_container(&self) -> bool {
        self.containment() != Containment::None
    }

    /// Resize the column slots, truncating or padding with empty slots, and
    /// keep the configured column count in step.
    ///
    /// Blocks in truncated slots are dropped. The count is clamped to
    /// `1..=MAX_COLUMNS`.
    pub fn set_column_count(&mut self, count: usize) {
        if self.containment() != Containment::ColumnSlots {
            return;
        }
        let count = count.clamp(1, MAX_COLUMNS);
        self.slots.resize_with(count, Vec::new);
        self.content.set_column_count(count);
    }

    /// Deep copy with a new id on this block, every descendant and every
    /// stat or FAQ item.
    pub fn fresh_copy(&self) -> Block {
        let mut content = self.content.clone();
        content.regenerate_item_ids();
        Block {
            id: BlockId::generate(),
            order: self.order,
            content,
            styles: self.styles.clone(),
            slots: self
                .slots
                .iter()
                .map(|slot| slot.iter().map(Block::fresh_copy).collect())
                .collect(),
        }
    }

    /// Ids of this block and all of its descendants, depth first.
    pub fn subtree_ids(&self) -> Vec<&BlockId> {
        let mut ids = Vec::new();
        self.collect_ids(&mut ids);
        ids
    }

    fn collect_ids<'a>(&'a self, ids: &mut Vec<&'a BlockId>) {
        ids.push(&self.id);
        for child in self.slots.iter().flatten() {
            child.collect_ids(ids);
        }
    }

    /// Number of blocks in this subtree, including this one.
    pub fn subtree_len(&self) -> usize {
        1 + self
            .slots
            .iter()
            .flatten()
            .map(Block::subtree_len)
            .sum::<usize>()
    }
}

/// Rewrite `order` so it matches list position.
pub fn reindex(siblings: &mut [Block]) {
    for (position, block) in siblings.iter_mut().enumerate() {
        block.order = position;
    }
}
