pub mod editing;
pub mod io;
pub mod models;
pub mod normalize;
pub mod registry;
pub mod templates;
pub mod views;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use editing::{Cmd, PageEditor, Patch};
pub use io::*;
pub use models::{Block, BlockContent, BlockId, BlockKind, BlockStyles, Language, Page};
pub use normalize::{decode_blocks, encode_blocks, normalize_blocks, normalize_column_slots};
pub use registry::{EditorForm, Registry};
pub use templates::{BlockTemplate, builtin_templates};
pub use views::{RenderContext, outline, render_blocks, render_page};
