use crate::models::BlockId;

/// Result of applying a command
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Patch {
    /// Whether the tree changed
    pub applied: bool,
    /// Block the editor should focus next: the new block for inserts and
    /// duplicates, the edited or moved block otherwise. `None` after a delete.
    pub focus: Option<BlockId>,
}

impl Patch {
    pub fn noop() -> Self {
        Self::default()
    }

    pub fn applied(focus: Option<BlockId>) -> Self {
        Self {
            applied: true,
            focus,
        }
    }
}
