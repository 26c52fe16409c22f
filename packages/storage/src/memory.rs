use std::collections::HashMap;

use async_trait::async_trait;
use formbuilder_document::Document;
use tokio::sync::RwLock;
use tracing::debug;

use crate::{normalize_key, DocumentStore, StorageResult};

/// In-memory store. Documents are cloned in and out, so callers never share state with it.
#[derive(Debug, Default)]
pub struct MemoryStore {
    documents: RwLock<HashMap<String, Document>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with `documents`
    pub fn with_documents(
        documents: impl IntoIterator<Item = (String, Document)>,
    ) -> StorageResult<Self> {
        let mut map = HashMap::new();
        for (key, document) in documents {
            map.insert(normalize_key(&key)?, document);
        }
        Ok(Self {
            documents: RwLock::new(map),
        })
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn load(&self, key: &str) -> StorageResult<Option<Document>> {
        let key = normalize_key(key)?;
        let document = self.documents.read().await.get(&key).cloned();
        debug!(key = %key, found = document.is_some(), "Loaded document");
        Ok(document)
    }

    async fn save(&self, key: &str, document: &Document) -> StorageResult<()> {
        let key = normalize_key(key)?;
        debug!(key = %key, nodes = document.len(), "Saving document");
        self.documents.write().await.insert(key, document.clone());
        Ok(())
    }

    async fn delete(&self, key: &str) -> StorageResult<bool> {
        let key = normalize_key(key)?;
        Ok(self.documents.write().await.remove(&key).is_some())
    }

    async fn keys(&self) -> StorageResult<Vec<String>> {
        let mut keys: Vec<String> = self.documents.read().await.keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }
}
