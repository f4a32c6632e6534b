use serde::{Deserialize, Serialize};

use crate::models::{Block, Language, language::resolve};
use crate::normalize::codec;

/// A page document as persisted by a [`crate::io::PageStore`].
///
/// `blocks` is the shared tree. Pages edited per language additionally carry
/// `blocksAr`/`blocksEn`, which take precedence for their language.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub id: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub title_ar: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_en: Option<String>,
    #[serde(default, with = "codec::block_list")]
    pub blocks: Vec<Block>,
    #[serde(
        default,
        with = "codec::optional_block_list",
        skip_serializing_if = "Option::is_none"
    )]
    pub blocks_ar: Option<Vec<Block>>,
    #[serde(
        default,
        with = "codec::optional_block_list",
        skip_serializing_if = "Option::is_none"
    )]
    pub blocks_en: Option<Vec<Block>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_css: Option<String>,
    /// Milliseconds since the Unix epoch, stamped by the store on save.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<u64>,
}

impl Page {
    pub fn new(id: impl Into<String>, slug: impl Into<String>, title_ar: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            slug: slug.into(),
            title_ar: title_ar.into(),
            ..Default::default()
        }
    }

    pub fn title(&self, language: Language) -> &str {
        resolve(&self.title_ar, self.title_en.as_deref(), language)
    }

    fn language_tree(&self, language: Language) -> Option<&Vec<Block>> {
        match language {
            Language::Ar => self.blocks_ar.as_ref(),
            Language::En => self.blocks_en.as_ref(),
        }
    }

    /// Whether `language` has its own tree rather than reading the shared one.
    pub fn has_language_tree(&self, language: Language) -> bool {
        self.language_tree(language).is_some()
    }

    /// The tree shown for `language`.
    pub fn blocks_for(&self, language: Language) -> &[Block] {
        self.language_tree(language).unwrap_or(&self.blocks)
    }

    /// The tree edited for `language`.
    ///
    /// The first edit of a language without its own tree starts from a copy
    /// of the shared tree, so the other language is left untouched.
    pub fn blocks_for_mut(&mut self, language: Language) -> &mut Vec<Block> {
        let shared = &self.blocks;
        let tree = match language {
            Language::Ar => &mut self.blocks_ar,
            Language::En => &mut self.blocks_en,
        };
        tree.get_or_insert_with(|| shared.clone())
    }

    pub fn set_blocks_for(&mut self, language: Language, blocks: Vec<Block>) {
        *self.blocks_for_mut(language) = blocks;
    }

    /// Replace the `to` tree with a copy of the `from` tree carrying fresh ids.
    pub fn copy_language(&mut self, from: Language, to: Language) {
        if from == to {
            return;
        }
        let copied: Vec<Block> = self.blocks_for(from).iter().map(Block::fresh_copy).collect();
        self.set_blocks_for(to, copied);
    }

    /// Total number of blocks in the tree shown for `language`.
    pub fn block_count(&self, language: Language) -> usize {
        self.blocks_for(language).iter().map(Block::subtree_len).sum()
    }
}
