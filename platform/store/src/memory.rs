use std::{
    collections::BTreeMap,
    sync::{Mutex, MutexGuard},
};

use async_trait::async_trait;
use mongodb::bson::{Document, oid::ObjectId};

use crate::{DocumentStore, Filter, ID_FIELD, StoreError, StoreResult, id_to_string};

type Collections = BTreeMap<String, Vec<Document>>;

/// In-process [`DocumentStore`]. Documents keep insertion order and receive
/// a fresh ObjectId when inserted without one.
#[derive(Debug, Default)]
pub struct MemoryStore {
    name: String,
    collections: Mutex<Collections>,
}

impl MemoryStore {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            collections: Mutex::default(),
        }
    }

    /// Stored documents of `collection`, identifiers included.
    pub fn documents(&self, collection: &str) -> StoreResult<Vec<Document>> {
        Ok(self.lock()?.get(collection).cloned().unwrap_or_default())
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, Collections>> {
        self.collections
            .lock()
            .map_err(|_| StoreError::Backend("memory store lock poisoned".into()))
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    fn name(&self) -> &str {
        &self.name
    }

    async fn find(
        &self,
        collection: &str,
        filter: &Filter,
        limit: u32,
    ) -> StoreResult<Vec<Document>> {
        let guard = self.lock()?;
        let Some(documents) = guard.get(collection) else {
            return Ok(Vec::new());
        };
        Ok(documents
            .iter()
            .filter(|document| filter.matches(document))
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn insert_one(&self, collection: &str, mut document: Document) -> StoreResult<String> {
        if !document.contains_key(ID_FIELD) {
            document.insert(ID_FIELD, ObjectId::new());
        }
        let id = document
            .get(ID_FIELD)
            .map(id_to_string)
            .unwrap_or_default();
        self.lock()?
            .entry(collection.to_string())
            .or_default()
            .push(document);
        Ok(id)
    }

    async fn list_collection_names(&self) -> StoreResult<Vec<String>> {
        Ok(self.lock()?.keys().cloned().collect())
    }
}
