//! In-memory storage backend.

use super::{BoxFuture, DocumentSummary, Storage, StorageError, StorageResult};
use crate::document::BoardDocument;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

/// In-memory backend for tests and ephemeral boards.
///
/// Documents are held in serialized form, so anything that would not survive
/// real persistence does not survive here either.
#[derive(Default)]
pub struct MemoryStorage {
    documents: RwLock<HashMap<String, String>>,
}

fn poisoned<T>(_: PoisonError<T>) -> StorageError {
    StorageError::Other("storage lock poisoned".to_string())
}

impl MemoryStorage {
    /// Create a new empty memory storage.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn save(&self, id: &str, document: &BoardDocument) -> BoxFuture<'_, StorageResult<()>> {
        let id = id.to_string();
        let json = document
            .to_json()
            .map_err(|e| StorageError::Serialization(e.to_string()));
        Box::pin(async move {
            self.documents.write().map_err(poisoned)?.insert(id, json?);
            Ok(())
        })
    }

    fn load(&self, id: &str) -> BoxFuture<'_, StorageResult<BoardDocument>> {
        let id = id.to_string();
        Box::pin(async move {
            let docs = self.documents.read().map_err(poisoned)?;
            let json = docs
                .get(&id)
                .ok_or_else(|| StorageError::NotFound(id.clone()))?;
            BoardDocument::from_json(json).map_err(|e| StorageError::Serialization(e.to_string()))
        })
    }

    fn delete(&self, id: &str) -> BoxFuture<'_, StorageResult<()>> {
        let id = id.to_string();
        Box::pin(async move {
            self.documents.write().map_err(poisoned)?.remove(&id);
            Ok(())
        })
    }

    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<DocumentSummary>>> {
        Box::pin(async move {
            let docs = self.documents.read().map_err(poisoned)?;
            let mut summaries = Vec::with_capacity(docs.len());
            for (key, json) in docs.iter() {
                let doc = BoardDocument::from_json(json)
                    .map_err(|e| StorageError::Serialization(e.to_string()))?;
                summaries.push(DocumentSummary::of(key, &doc));
            }
            summaries.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
            Ok(summaries)
        })
    }

    fn exists(&self, id: &str) -> BoxFuture<'_, StorageResult<bool>> {
        let id = id.to_string();
        Box::pin(async move { Ok(self.documents.read().map_err(poisoned)?.contains_key(&id)) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Step;
    use crate::elements::{Ball, Element};
    use crate::storage::test_util::block_on;
    use kurbo::Point;

    #[test]
    fn test_round_trip_preserves_elements() {
        let storage = MemoryStorage::new();
        let mut doc = BoardDocument::new();
        doc.steps[0]
            .elements
            .push(Element::Ball(Ball::new(Point::new(52.5, 34.0))));

        block_on(storage.save("counter-press", &doc)).unwrap();
        let loaded = block_on(storage.load("counter-press")).unwrap();

        assert_eq!(loaded, doc);
    }

    #[test]
    fn test_missing_document_is_not_found() {
        let storage = MemoryStorage::new();
        let result = block_on(storage.load("gone"));
        assert!(matches!(result, Err(StorageError::NotFound(_))));
    }

    #[test]
    fn test_delete_then_exists() {
        let storage = MemoryStorage::new();
        let doc = BoardDocument::new();

        block_on(storage.save("drill", &doc)).unwrap();
        assert!(block_on(storage.exists("drill")).unwrap());

        block_on(storage.delete("drill")).unwrap();
        assert!(!block_on(storage.exists("drill")).unwrap());
        // Deleting again is a no-op
        block_on(storage.delete("drill")).unwrap();
    }

    #[test]
    fn test_list_summaries_newest_first() {
        let storage = MemoryStorage::new();

        let mut older = BoardDocument::new();
        older.name = "Build-up".to_string();
        let mut newer = BoardDocument::new();
        newer.name = "High press".to_string();
        newer.steps.push(Step::new("Step 2", Vec::new()));
        newer.updated_at = older.updated_at + chrono::Duration::seconds(60);

        block_on(storage.save("build-up", &older)).unwrap();
        block_on(storage.save("high-press", &newer)).unwrap();

        let list = block_on(storage.list()).unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].key, "high-press");
        assert_eq!(list[0].name, "High press");
        assert_eq!(list[0].step_count, 2);
        assert_eq!(list[1].key, "build-up");
        assert_eq!(list[1].step_count, 1);
    }
}
