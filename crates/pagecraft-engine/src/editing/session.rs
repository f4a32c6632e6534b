use log::{debug, info, warn};
use serde_json::{Map, Value};

use crate::editing::mutator::{Direction, InsertAt, find_block};
use crate::editing::{Cmd, Patch, apply};
use crate::io::{PageStore, StoreError};
use crate::models::{Block, BlockId, BlockKind, Language, Page};
use crate::registry::{EditorForm, Registry};
use crate::templates::BlockTemplate;

/// An editing session over one page in one editing language.
///
/// Holds the working copy of the page, the selected block and whether there
/// are unsaved edits. All edits go to the tree of the editing language.
#[derive(Debug, Clone)]
pub struct PageEditor {
    page: Page,
    language: Language,
    selected: Option<BlockId>,
    dirty: bool,
}

impl PageEditor {
    pub fn new(page: Page, language: Language) -> Self {
        Self {
            page,
            language,
            selected: None,
            dirty: false,
        }
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn into_page(self) -> Page {
        self.page
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Switch the editing language; the selection is kept only if the block
    /// also exists in the other tree.
    pub fn set_language(&mut self, language: Language) {
        self.language = language;
        if let Some(id) = &self.selected {
            if find_block(self.blocks(), id).is_none() {
                self.selected = None;
            }
        }
    }

    /// The tree being edited.
    pub fn blocks(&self) -> &[Block] {
        self.page.blocks_for(self.language)
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn selected_id(&self) -> Option<&BlockId> {
        self.selected.as_ref()
    }

    pub fn selected(&self) -> Option<&Block> {
        self.selected
            .as_ref()
            .and_then(|id| find_block(self.blocks(), id))
    }

    /// Select `id`, or clear the selection with `None`. Returns false and
    /// leaves the selection alone if `id` is not in the tree.
    pub fn select(&mut self, id: Option<BlockId>) -> bool {
        match id {
            Some(id) if find_block(self.blocks(), &id).is_none() => {
                debug!("Cannot select {id}: not in the {} tree", self.language);
                false
            }
            id => {
                self.selected = id;
                true
            }
        }
    }

    /// Editor form of the selected block.
    pub fn selected_form(&self, registry: &Registry) -> Option<EditorForm> {
        let block = self.selected()?;
        Some(registry.editor_for(block)(block, self.language))
    }

    /// Apply `cmd` to the editing tree and follow its focus.
    pub fn apply(&mut self, cmd: Cmd) -> Patch {
        let deleting = matches!(cmd, Cmd::Delete { .. });
        let patch = if self.page.has_language_tree(self.language) {
            apply(self.page.blocks_for_mut(self.language), cmd)
        } else {
            // Only materialize the language tree once something changes
            let mut tree = self.page.blocks_for(self.language).to_vec();
            let patch = apply(&mut tree, cmd);
            if patch.applied {
                self.page.set_blocks_for(self.language, tree);
            }
            patch
        };

        if patch.applied {
            self.dirty = true;
            if let Some(focus) = &patch.focus {
                self.selected = Some(focus.clone());
            } else if deleting && self.selected().is_none() {
                self.selected = None;
            }
        }
        patch
    }

    /// Insert a new block of `kind` and select it.
    pub fn add_block(&mut self, kind: BlockKind, at: InsertAt) -> Patch {
        self.apply(Cmd::Insert {
            at,
            block: Block::new(kind),
        })
    }

    /// Append a fresh copy of `template`'s blocks and select the first.
    pub fn insert_template(&mut self, template: &BlockTemplate, at: InsertAt) -> Patch {
        self.apply(Cmd::InsertMany {
            at,
            blocks: template.instantiate(),
        })
    }

    /// Merge content and style patches into the selected block.
    pub fn apply_edit(&mut self, content: Map<String, Value>, styles: Map<String, Value>) -> Patch {
        let Some(id) = self.selected.clone() else {
            return Patch::noop();
        };
        self.apply(Cmd::UpdateContent {
            id,
            content,
            styles,
        })
    }

    /// Delete the selected block and everything in it.
    pub fn remove(&mut self) -> Patch {
        let Some(id) = self.selected.clone() else {
            return Patch::noop();
        };
        self.apply(Cmd::Delete { id, parent: None })
    }

    pub fn move_selected(&mut self, direction: Direction) -> Patch {
        let Some(id) = self.selected.clone() else {
            return Patch::noop();
        };
        self.apply(Cmd::Move { id, direction })
    }

    pub fn duplicate_selected(&mut self) -> Patch {
        let Some(id) = self.selected.clone() else {
            return Patch::noop();
        };
        self.apply(Cmd::Duplicate { id })
    }

    /// Resize the selected columns/grid block.
    pub fn set_columns(&mut self, count: usize) -> Patch {
        let Some(id) = self.selected.clone() else {
            return Patch::noop();
        };
        self.apply(Cmd::SetColumns { id, count })
    }

    /// Replace the editing tree with a fresh-id copy of `from`'s tree.
    pub fn copy_from_language(&mut self, from: Language) {
        if from == self.language {
            return;
        }
        self.page.copy_language(from, self.language);
        self.selected = None;
        self.dirty = true;
    }

    /// Write the whole page to `store`.
    ///
    /// The store's copy is overwritten regardless of what else was saved in
    /// between. On failure the working copy and the dirty flag are kept so
    /// the save can be retried.
    pub fn save(&mut self, store: &mut dyn PageStore) -> Result<(), StoreError> {
        match store.save_page(&self.page) {
            Ok(saved) => {
                info!("Saved page {}", saved.id);
                self.page = saved;
                self.dirty = false;
                Ok(())
            }
            Err(e) => {
                warn!("Saving page {} failed: {e}", self.page.id);
                Err(e)
            }
        }
    }
}
