//! File-backed storage: one JSON file per document.

use super::{BoxFuture, DocumentSummary, Storage, StorageError, StorageResult};
use crate::document::BoardDocument;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Storage backend writing each document to `<base>/<key>.json`.
pub struct FileStorage {
    base_path: PathBuf,
}

impl FileStorage {
    /// Create a file storage rooted at `base_path`, creating the directory
    /// if needed.
    pub fn new(base_path: PathBuf) -> StorageResult<Self> {
        fs::create_dir_all(&base_path)
            .map_err(|e| StorageError::Io(format!("create {}: {}", base_path.display(), e)))?;
        Ok(Self { base_path })
    }

    /// Create file storage in the platform data directory
    /// (`~/.local/share/playbook/documents` on Linux).
    pub fn default_location() -> StorageResult<Self> {
        let base = dirs::data_local_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| StorageError::Io("no data directory available".to_string()))?;
        Self::new(base.join("playbook").join("documents"))
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Filename-safe storage key: anything outside `[A-Za-z0-9_-]` becomes
    /// an underscore.
    fn storage_key(id: &str) -> String {
        id.chars()
            .map(|c| {
                if c.is_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect()
    }

    fn path_for(&self, id: &str) -> PathBuf {
        self.base_path.join(format!("{}.json", Self::storage_key(id)))
    }
}

/// Write through a temporary file and rename, so an interrupted save never
/// truncates an existing document.
fn write_atomic(path: &Path, json: &str) -> StorageResult<()> {
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json)
        .map_err(|e| StorageError::Io(format!("write {}: {}", tmp.display(), e)))?;
    fs::rename(&tmp, path)
        .map_err(|e| StorageError::Io(format!("rename to {}: {}", path.display(), e)))
}

impl Storage for FileStorage {
    fn save(&self, id: &str, document: &BoardDocument) -> BoxFuture<'_, StorageResult<()>> {
        let path = self.path_for(id);
        let json = document
            .to_json()
            .map_err(|e| StorageError::Serialization(e.to_string()));
        Box::pin(async move { write_atomic(&path, &json?) })
    }

    fn load(&self, id: &str) -> BoxFuture<'_, StorageResult<BoardDocument>> {
        let path = self.path_for(id);
        let id = id.to_string();
        Box::pin(async move {
            let json = match fs::read_to_string(&path) {
                Ok(json) => json,
                Err(e) if e.kind() == ErrorKind::NotFound => {
                    return Err(StorageError::NotFound(id));
                }
                Err(e) => {
                    return Err(StorageError::Io(format!("read {}: {}", path.display(), e)));
                }
            };
            BoardDocument::from_json(&json).map_err(|e| {
                StorageError::Serialization(format!("parse {}: {}", path.display(), e))
            })
        })
    }

    fn delete(&self, id: &str) -> BoxFuture<'_, StorageResult<()>> {
        let path = self.path_for(id);
        Box::pin(async move {
            match fs::remove_file(&path) {
                Ok(()) => Ok(()),
                Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
                Err(e) => Err(StorageError::Io(format!(
                    "delete {}: {}",
                    path.display(),
                    e
                ))),
            }
        })
    }

    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<DocumentSummary>>> {
        let base = self.base_path.clone();
        Box::pin(async move {
            let entries = fs::read_dir(&base)
                .map_err(|e| StorageError::Io(format!("read {}: {}", base.display(), e)))?;

            let mut summaries = Vec::new();
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_none_or(|ext| ext != "json") {
                    continue;
                }
                let Some(key) = path.file_stem().and_then(|s| s.to_str()) else {
                    continue;
                };
                match fs::read_to_string(&path)
                    .map_err(|e| e.to_string())
                    .and_then(|json| BoardDocument::from_json(&json).map_err(|e| e.to_string()))
                {
                    Ok(doc) => summaries.push(DocumentSummary::of(key, &doc)),
                    // A corrupt file must not hide the rest of the library
                    Err(e) => log::warn!("skipping unreadable document {}: {}", path.display(), e),
                }
            }
            summaries.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
            Ok(summaries)
        })
    }

    fn exists(&self, id: &str) -> BoxFuture<'_, StorageResult<bool>> {
        let path = self.path_for(id);
        Box::pin(async move { Ok(path.exists()) })
    }
}
