pub mod block;
pub mod content;
pub mod ids;
pub mod kind;
pub mod language;
pub mod page;
pub mod styles;

pub use block::{Block, reindex};
pub use content::*;
pub use ids::BlockId;
pub use kind::{BlockKind, Containment};
pub use language::{Language, Localized};
pub use page::Page;
pub use styles::{BlockAnimation, BlockStyles, StyleAttrs};
