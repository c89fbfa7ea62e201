//! Storage abstraction for document persistence.

mod autosave;
mod file;
mod memory;

pub use autosave::{
    AutoSaveManager, DEFAULT_AUTOSAVE_DEBOUNCE_SECS, LAST_DOCUMENT_KEY, create_autosave_manager,
    create_default_storage,
};
pub use file::FileStorage;
pub use memory::MemoryStorage;

use crate::document::BoardDocument;
use chrono::{DateTime, Utc};
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Document not found: {0}")]
    NotFound(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error("Storage error: {0}")]
    Other(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Listing entry for a stored document, enough for a document browser
/// without loading full step data.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentSummary {
    /// Storage key the document is saved under.
    pub key: String,
    /// Document display name.
    pub name: String,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
    /// Number of animation steps.
    pub step_count: usize,
}

impl DocumentSummary {
    pub(crate) fn of(key: impl Into<String>, document: &BoardDocument) -> Self {
        Self {
            key: key.into(),
            name: document.name.clone(),
            updated_at: document.updated_at,
            step_count: document.steps.len(),
        }
    }
}

/// Boxed future for async operations.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[cfg(test)]
pub(crate) mod test_util {
    /// Minimal blocking executor for boxed-future storage tests.
    pub fn block_on<F: std::future::Future>(f: F) -> F::Output {
        use std::task::{Context, Poll, RawWaker, RawWakerVTable, Waker};

        fn dummy_raw_waker() -> RawWaker {
            fn no_op(_: *const ()) {}
            fn clone(_: *const ()) -> RawWaker {
                dummy_raw_waker()
            }
            static VTABLE: RawWakerVTable = RawWakerVTable::new(clone, no_op, no_op, no_op);
            RawWaker::new(std::ptr::null(), &VTABLE)
        }

        let waker = unsafe { Waker::from_raw(dummy_raw_waker()) };
        let mut cx = Context::from_waker(&waker);
        let mut f = std::pin::pin!(f);

        loop {
            match f.as_mut().poll(&mut cx) {
                Poll::Ready(result) => return result,
                Poll::Pending => {}
            }
        }
    }
}

/// Trait for document storage backends.
///
/// Implementations can store documents in memory, on the filesystem, or in a
/// remote document database; the board never cares which.
pub trait Storage: Send + Sync {
    /// Save a document.
    fn save(&self, id: &str, document: &BoardDocument) -> BoxFuture<'_, StorageResult<()>>;

    /// Load a document.
    fn load(&self, id: &str) -> BoxFuture<'_, StorageResult<BoardDocument>>;

    /// Delete a document.
    fn delete(&self, id: &str) -> BoxFuture<'_, StorageResult<()>>;

    /// List stored documents, most recently modified first.
    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<DocumentSummary>>>;

    /// Check if a document exists.
    fn exists(&self, id: &str) -> BoxFuture<'_, StorageResult<bool>>;
}
