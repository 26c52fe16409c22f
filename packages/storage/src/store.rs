use async_trait::async_trait;
use formbuilder_document::Document;
use unicode_normalization::UnicodeNormalization;

use crate::{StorageError, StorageResult};

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Stored document for `key`, or `None` when nothing was saved under it
    async fn load(&self, key: &str) -> StorageResult<Option<Document>>;

    /// Replace the document stored under `key`
    async fn save(&self, key: &str, document: &Document) -> StorageResult<()>;

    /// Remove the document under `key`. Returns whether one existed.
    async fn delete(&self, key: &str) -> StorageResult<bool>;

    /// All stored keys, sorted
    async fn keys(&self) -> StorageResult<Vec<String>>;

    /// `load`, with an empty "New Page" document substituted for absent keys
    async fn resolve(&self, key: &str) -> StorageResult<Document> {
        Ok(self.load(key).await?.unwrap_or_else(Document::new_page))
    }
}

/// Canonical form of a storage key: NFC-normalized and trimmed.
///
/// Empty keys and keys containing control characters are rejected.
pub fn normalize_key(key: &str) -> StorageResult<String> {
    let key: String = key.trim().nfc().collect();

    if key.is_empty() || key.chars().any(char::is_control) {
        return Err(StorageError::InvalidKey(key));
    }

    Ok(key)
}
