use std::collections::BTreeMap;

use log::debug;
use serde::Deserialize;
use serde_json::Value;

use super::{PageStore, PageSummary, StoreError, check_page_id, now_millis};
use crate::models::Page;
use crate::normalize::mangle_nested_arrays;

/// In-process store holding each page as a raw JSON document.
///
/// With [`MemoryPageStore::mangling`] documents are written the way a
/// document database without nested-array support writes them, so reads go
/// through the same repair path as production data.
#[derive(Debug, Default)]
pub struct MemoryPageStore {
    documents: BTreeMap<String, Value>,
    mangle: bool,
    fail_next_save: bool,
    saves: usize,
}

impl MemoryPageStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mangling() -> Self {
        Self {
            mangle: true,
            ..Self::default()
        }
    }

    /// Make the next `save_page` fail with [`StoreError::Unavailable`].
    pub fn fail_next_save(&mut self) {
        self.fail_next_save = true;
    }

    /// The stored document for `id`, as written.
    pub fn raw(&self, id: &str) -> Option<&Value> {
        self.documents.get(id)
    }

    /// Store a document verbatim, bypassing encoding.
    pub fn insert_raw(&mut self, id: impl Into<String>, document: Value) {
        self.documents.insert(id.into(), document);
    }

    /// Number of successful saves.
    pub fn save_count(&self) -> usize {
        self.saves
    }
}

impl PageStore for MemoryPageStore {
    fn get_page(&self, id: &str) -> Result<Option<Page>, StoreError> {
        self.documents
            .get(id)
            .map(decode)
            .transpose()
    }

    fn save_page(&mut self, page: &Page) -> Result<Page, StoreError> {
        check_page_id(&page.id)?;
        if std::mem::take(&mut self.fail_next_save) {
            return Err(StoreError::Unavailable("simulated outage".to_string()));
        }

        let mut stored = page.clone();
        stored.updated_at = Some(now_millis());
        let mut document = serde_json::to_value(&stored)?;
        if self.mangle {
            document = mangle_nested_arrays(&document);
        }
        debug!("Stored page {} (mangled: {})", stored.id, self.mangle);
        self.documents.insert(stored.id.clone(), document);
        self.saves += 1;
        Ok(stored)
    }

    fn list_pages(&self) -> Result<Vec<PageSummary>, StoreError> {
        self.documents
            .values()
            .map(|document| decode(document).map(|page| PageSummary::from(&page)))
            .collect()
    }

    fn delete_page(&mut self, id: &str) -> Result<(), StoreError> {
        self.documents
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }
}

fn decode(document: &Value) -> Result<Page, StoreError> {
    Ok(Page::deserialize(document)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Language;
    use crate::tests::sample_page;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_mangling_store_writes_objects_for_slots() {
        let mut store = MemoryPageStore::mangling();
        store.save_page(&sample_page()).unwrap();

        let slots = &store.raw("home").unwrap()["blocks"][1]["columnSlots"];
        assert!(slots.is_object());
        assert_eq!(slots["__isNestedArray"], json!(true));
    }

    #[test]
    fn test_mangled_document_reads_back_unchanged() {
        let mut store = MemoryPageStore::mangling();
        let saved = store.save_page(&sample_page()).unwrap();

        let loaded = store.get_page("home").unwrap().unwrap();
        assert_eq!(loaded, saved);
        assert_eq!(loaded.blocks_for(Language::Ar)[1].slots.len(), 2);
    }

    #[test]
    fn test_failure_is_one_shot() {
        let mut store = MemoryPageStore::new();
        store.fail_next_save();
        assert!(matches!(
            store.save_page(&sample_page()),
            Err(StoreError::Unavailable(_))
        ));
        assert!(store.get_page("home").unwrap().is_none());

        store.save_page(&sample_page()).unwrap();
        assert_eq!(store.save_count(), 1);
    }

    #[test]
    fn test_later_save_overwrites_earlier() {
        let mut store = MemoryPageStore::new();
        let mut first = sample_page();
        first.title_ar = "أولى".into();
        let mut second = sample_page();
        second.blocks.truncate(1);

        store.save_page(&first).unwrap();
        store.save_page(&second).unwrap();

        let stored = store.get_page("home").unwrap().unwrap();
        assert_eq!(stored.title_ar, "الرئيسية");
        assert_eq!(stored.blocks.len(), 1);
    }

    #[test]
    fn test_list_and_delete() {
        let mut store = MemoryPageStore::new();
        store.save_page(&sample_page()).unwrap();
        store.insert_raw("about", json!({ "id": "about", "titleAr": "من نحن" }));

        let ids: Vec<String> = store.list_pages().unwrap().into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec!["about", "home"]);

        store.delete_page("about").unwrap();
        assert!(matches!(store.delete_page("about"), Err(StoreError::NotFound(_))));
    }
}
