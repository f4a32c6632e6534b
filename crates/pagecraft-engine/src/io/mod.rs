mod memory;

pub use memory::MemoryPageStore;

use crate::models::{Language, Page};
use log::{debug, warn};
use relative_path::RelativePathBuf;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Page not found: {0}")]
    NotFound(String),
    #[error("Invalid page id: {0:?}")]
    InvalidPageId(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid pages directory: {0}")]
    InvalidPagesDir(String),
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// What a page list shows without decoding every tree for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSummary {
    pub id: String,
    pub slug: String,
    pub title_ar: String,
    pub title_en: Option<String>,
    pub block_count: usize,
    pub updated_at: Option<u64>,
}

impl From<&Page> for PageSummary {
    fn from(page: &Page) -> Self {
        Self {
            id: page.id.clone(),
            slug: page.slug.clone(),
            title_ar: page.title_ar.clone(),
            title_en: page.title_en.clone(),
            block_count: page.block_count(Language::PRIMARY),
            updated_at: page.updated_at,
        }
    }
}

/// Load/store boundary for whole pages.
///
/// Saves replace the stored document wholesale; there is no revision check.
pub trait PageStore {
    fn get_page(&self, id: &str) -> Result<Option<Page>, StoreError>;

    /// Persist `page` and return it as stored (with `updated_at` stamped).
    fn save_page(&mut self, page: &Page) -> Result<Page, StoreError>;

    fn list_pages(&self) -> Result<Vec<PageSummary>, StoreError>;

    fn delete_page(&mut self, id: &str) -> Result<(), StoreError>;
}

pub(crate) fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or_default()
}

/// Page ids become file names, so they may not name other paths.
pub(crate) fn check_page_id(id: &str) -> Result<(), StoreError> {
    let valid = !id.is_empty()
        && id != "."
        && id != ".."
        && !id.contains(['/', '\\'])
        && !id.chars().any(char::is_control);
    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidPageId(id.to_string()))
    }
}

/// One pretty-printed JSON document per page, `<id>.json` under a root directory.
#[derive(Debug, Clone)]
pub struct FsPageStore {
    root: PathBuf,
}

impl FsPageStore {
    /// Open a store over an existing directory.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        validate_pages_dir(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn page_path(&self, id: &str) -> Result<PathBuf, StoreError> {
        check_page_id(id)?;
        // Appended, not `with_extension`: ids may contain dots.
        let relative = RelativePathBuf::from(format!("{id}.json"));
        Ok(relative.to_path(&self.root))
    }
}

impl PageStore for FsPageStore {
    fn get_page(&self, id: &str) -> Result<Option<Page>, StoreError> {
        let path = self.page_path(id)?;
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path)?;
        let page = serde_json::from_str(&content)?;
        Ok(Some(page))
    }

    fn save_page(&mut self, page: &Page) -> Result<Page, StoreError> {
        let path = self.page_path(&page.id)?;

        // Create parent directories if they don't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut stored = page.clone();
        stored.updated_at = Some(now_millis());
        let content = serde_json::to_string_pretty(&stored)?;
        fs::write(&path, content)?;
        debug!("Wrote page {} to {}", stored.id, path.display());
        Ok(stored)
    }

    fn list_pages(&self) -> Result<Vec<PageSummary>, StoreError> {
        let mut pages = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            let is_json = path.extension().is_some_and(|ext| ext == "json");
            if !path.is_file() || !is_json {
                continue;
            }
            let page = fs::read_to_string(&path)
                .map_err(StoreError::from)
                .and_then(|content| Ok(serde_json::from_str::<Page>(&content)?));
            match page {
                Ok(page) => pages.push(PageSummary::from(&page)),
                Err(e) => warn!("Skipping unreadable page {}: {e}", path.display()),
            }
        }
        pages.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(pages)
    }

    fn delete_page(&mut self, id: &str) -> Result<(), StoreError> {
        let path = self.page_path(id)?;
        if !path.exists() {
            return Err(StoreError::NotFound(id.to_string()));
        }
        fs::remove_file(&path)?;
        Ok(())
    }
}

pub fn validate_pages_dir(path: &Path) -> Result<(), StoreError> {
    if !path.exists() || !path.is_dir() {
        return Err(StoreError::InvalidPagesDir(
            "Directory does not exist".to_string(),
        ));
    }

    Ok(())
}
