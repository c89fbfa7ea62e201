//! Debounced autosave for document persistence.
//!
//! Every committed change marks the manager dirty and restarts the quiet
//! period; a save fires once the board has been dirty and untouched for the
//! whole debounce window, so bursts of edits coalesce into a single save.

use crate::document::BoardDocument;
use crate::storage::{DocumentSummary, Storage, StorageResult};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Default autosave debounce window in seconds.
pub const DEFAULT_AUTOSAVE_DEBOUNCE_SECS: u64 = 2;

/// Key for the "last opened" document.
pub const LAST_DOCUMENT_KEY: &str = "__last_document__";

/// Manages debounced document persistence.
pub struct AutoSaveManager<S: Storage> {
    /// Storage backend.
    storage: Arc<S>,
    /// Quiet period after the last change before a save fires.
    debounce: Duration,
    /// When the document last became dirty (restarts on every dirty mark).
    last_change: Option<Instant>,
    /// Whether the document has unsaved changes.
    dirty: bool,
    /// Current document ID being edited.
    current_doc_id: Option<String>,
}

impl<S: Storage> AutoSaveManager<S> {
    /// Create a new autosave manager with the given storage backend.
    pub fn new(storage: Arc<S>) -> Self {
        Self {
            storage,
            debounce: Duration::from_secs(DEFAULT_AUTOSAVE_DEBOUNCE_SECS),
            last_change: None,
            dirty: false,
            current_doc_id: None,
        }
    }

    /// Set the debounce window.
    pub fn set_debounce(&mut self, debounce: Duration) {
        self.debounce = debounce;
    }

    /// Get the debounce window.
    pub fn debounce(&self) -> Duration {
        self.debounce
    }

    /// Mark the document as having unsaved changes, restarting the quiet
    /// period. New dirty marks reset the pending save rather than queuing
    /// more saves.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
        self.last_change = Some(Instant::now());
    }

    /// Check if the document has unsaved changes.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Set the current document ID.
    pub fn set_document_id(&mut self, id: Option<String>) {
        self.current_doc_id = id;
    }

    /// Get the current document ID.
    pub fn document_id(&self) -> Option<&str> {
        self.current_doc_id.as_deref()
    }

    /// Check if the quiet period has elapsed since the last change.
    pub fn should_save(&self) -> bool {
        if !self.dirty {
            return false;
        }

        match self.last_change {
            Some(at) => at.elapsed() >= self.debounce,
            None => true,
        }
    }

    /// Save the document if the debounce window elapsed.
    /// Returns true if a save was performed.
    pub async fn maybe_save(&mut self, document: &BoardDocument) -> StorageResult<bool> {
        if !self.should_save() {
            return Ok(false);
        }

        self.save(document).await?;
        Ok(true)
    }

    /// Force save the document immediately.
    ///
    /// On failure the dirty flag stays set, so the next poll retries.
    pub async fn save(&mut self, document: &BoardDocument) -> StorageResult<()> {
        let doc_id = self
            .current_doc_id
            .clone()
            .unwrap_or_else(|| document.id.clone());

        self.storage.save(&doc_id, document).await.inspect_err(|e| {
            log::warn!("autosave of {} failed: {}", doc_id, e);
        })?;

        // Also save as the "last document" for auto-restore
        self.storage.save(LAST_DOCUMENT_KEY, document).await?;

        self.dirty = false;
        self.last_change = None;

        Ok(())
    }

    /// Load a document by ID.
    pub async fn load(&mut self, id: &str) -> StorageResult<BoardDocument> {
        let doc = self.storage.load(id).await?;
        self.current_doc_id = Some(id.to_string());
        self.dirty = false;
        self.last_change = None;
        Ok(doc)
    }

    /// Try to load the last opened document.
    /// Returns None if no last document exists.
    pub async fn load_last(&mut self) -> Option<BoardDocument> {
        match self.storage.load(LAST_DOCUMENT_KEY).await {
            Ok(doc) => {
                self.current_doc_id = Some(doc.id.clone());
                self.dirty = false;
                self.last_change = None;
                Some(doc)
            }
            Err(_) => None,
        }
    }

    /// Delete a document by ID.
    pub async fn delete(&self, id: &str) -> StorageResult<()> {
        self.storage.delete(id).await
    }

    /// List saved documents, hiding the special "last document" entry.
    pub async fn list_documents(&self) -> StorageResult<Vec<DocumentSummary>> {
        let mut docs = self.storage.list().await?;
        docs.retain(|doc| doc.key != LAST_DOCUMENT_KEY);
        Ok(docs)
    }

    /// Check if a document exists.
    pub async fn exists(&self, id: &str) -> StorageResult<bool> {
        self.storage.exists(id).await
    }

    /// Get a reference to the storage backend.
    pub fn storage(&self) -> &Arc<S> {
        &self.storage
    }
}

/// Create the default file-backed storage.
pub fn create_default_storage() -> StorageResult<Arc<crate::storage::FileStorage>> {
    Ok(Arc::new(crate::storage::FileStorage::default_location()?))
}

/// Convenience function to create an autosave manager with default storage.
pub fn create_autosave_manager() -> StorageResult<AutoSaveManager<crate::storage::FileStorage>> {
    let storage = create_default_storage()?;
    Ok(AutoSaveManager::new(storage))
}
