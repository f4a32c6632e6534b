//! Kind → (editor, view) lookup.
//!
//! Containers render their children by asking the registry for each child's
//! view, so adding a kind never touches container code. Lookups never fail:
//! unknown and unregistered kinds get [`noop_editor`] and [`noop_view`].

pub mod editor;

use std::collections::HashMap;

use strum::IntoEnumIterator;

pub use editor::{EditorForm, FieldSpec, InputKind, SlotSummary, form_for};

use crate::models::{Block, BlockKind, Language};
use crate::views::{self, RenderContext};

pub type EditorFn = fn(&Block, Language) -> EditorForm;
pub type ViewFn = fn(&Block, &RenderContext) -> String;

#[derive(Debug, Clone, Copy)]
pub struct BlockHandlers {
    pub editor: EditorFn,
    pub view: ViewFn,
}

#[derive(Debug, Clone, Default)]
pub struct Registry {
    handlers: HashMap<BlockKind, BlockHandlers>,
}

impl Registry {
    /// An empty registry; every lookup falls back to the no-op handlers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the built-in editor and view of every kind.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        for kind in BlockKind::iter() {
            registry.register(kind, form_for, views::builtin_view(kind));
        }
        registry
    }

    /// Register (or replace) the handlers for `kind`.
    pub fn register(&mut self, kind: BlockKind, editor: EditorFn, view: ViewFn) {
        self.handlers.insert(kind, BlockHandlers { editor, view });
    }

    pub fn get(&self, kind: BlockKind) -> Option<&BlockHandlers> {
        self.handlers.get(&kind)
    }

    fn handlers_for(&self, block: &Block) -> Option<&BlockHandlers> {
        block.kind().and_then(|kind| self.get(kind))
    }

    pub fn editor_for(&self, block: &Block) -> EditorFn {
        self.handlers_for(block)
            .map(|handlers| handlers.editor)
            .unwrap_or(noop_editor)
    }

    pub fn view_for(&self, block: &Block) -> ViewFn {
        self.handlers_for(block)
            .map(|handlers| handlers.view)
            .unwrap_or(noop_view)
    }
}

pub fn noop_editor(block: &Block, language: Language) -> EditorForm {
    EditorForm::empty(block, language)
}

pub fn noop_view(_block: &Block, _ctx: &RenderContext) -> String {
    String::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::decode_block;
    use crate::tests::heading;
    use serde_json::json;

    #[test]
    fn test_builtin_covers_every_kind() {
        let registry = Registry::builtin();
        for kind in BlockKind::iter() {
            assert!(registry.get(kind).is_some(), "{kind} not registered");
        }
    }

    #[test]
    fn test_unknown_kind_gets_noops() {
        let registry = Registry::builtin();
        let block = decode_block(&json!({ "id": "x", "kind": "pricing-table" })).unwrap();

        let form = registry.editor_for(&block)(&block, Language::Ar);
        assert!(form.fields.is_empty());
        assert_eq!(form.kind, "pricing-table");

        let ctx = RenderContext::new(Language::Ar, &registry);
        assert_eq!(registry.view_for(&block)(&block, &ctx), "");
    }

    #[test]
    fn test_unregistered_kind_gets_noops() {
        let registry = Registry::new();
        let block = heading("h", "عنوان");
        let ctx = RenderContext::new(Language::Ar, &registry);
        assert_eq!(registry.view_for(&block)(&block, &ctx), "");
        assert!(registry.editor_for(&block)(&block, Language::Ar).fields.is_empty());
    }

    #[test]
    fn test_register_overrides_view() {
        fn shout(_block: &Block, _ctx: &RenderContext) -> String {
            "HEADING".into()
        }
        let mut registry = Registry::builtin();
        registry.register(BlockKind::Heading, form_for, shout);

        let block = heading("h", "عنوان");
        let ctx = RenderContext::new(Language::Ar, &registry);
        assert_eq!(registry.view_for(&block)(&block, &ctx), "HEADING");
    }
}
