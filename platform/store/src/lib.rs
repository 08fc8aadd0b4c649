//! Document store primitives: a typed filter expression, the store seam the
//! services talk to, and the two stores behind it (MongoDB, in-memory).

mod filter;
mod memory;
mod mongo;

use std::sync::Arc;

use async_trait::async_trait;
use mongodb::bson::{Bson, Document};
use serde::Deserialize;
use thiserror::Error;

pub use filter::Filter;
pub use memory::MemoryStore;
pub use mongo::MongoStore;
pub use mongodb::bson;

/// Field the store uses for its own identifiers.
pub const ID_FIELD: &str = "_id";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("database not configured: {0}")]
    Unavailable(String),
    #[error("database error: {0}")]
    Backend(String),
}

impl From<mongodb::error::Error> for StoreError {
    fn from(value: mongodb::error::Error) -> Self {
        Self::Backend(value.to_string())
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// The operations services need from a document database.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Database name, for diagnostics.
    fn name(&self) -> &str;

    /// Documents of `collection` matching `filter`, at most `limit` of them.
    async fn find(
        &self,
        collection: &str,
        filter: &Filter,
        limit: u32,
    ) -> StoreResult<Vec<Document>>;

    /// Insert one document and return the identifier the store assigned.
    async fn insert_one(&self, collection: &str, document: Document) -> StoreResult<String>;

    async fn list_collection_names(&self) -> StoreResult<Vec<String>>;
}

/// Store access as handed to request handlers: either a live store or the
/// reason there is none.
#[derive(Clone)]
pub enum StoreHandle {
    Available(Arc<dyn DocumentStore>),
    Unavailable { reason: String },
}

impl StoreHandle {
    pub fn available(store: impl DocumentStore + 'static) -> Self {
        Self::Available(Arc::new(store))
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable {
            reason: reason.into(),
        }
    }

    /// The store, or `StoreError::Unavailable` before anything is queried.
    pub fn require(&self) -> StoreResult<&dyn DocumentStore> {
        match self {
            Self::Available(store) => Ok(store.as_ref()),
            Self::Unavailable { reason } => Err(StoreError::Unavailable(reason.clone())),
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available(_))
    }
}

impl std::fmt::Debug for StoreHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Available(store) => f.debug_tuple("Available").field(&store.name()).finish(),
            Self::Unavailable { reason } => f
                .debug_struct("Unavailable")
                .field("reason", reason)
                .finish(),
        }
    }
}

/// Environment-driven connection settings.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct StoreSettings {
    pub url: Option<String>,
    pub database: Option<String>,
}

impl StoreSettings {
    pub fn new(url: impl Into<String>, database: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            database: Some(database.into()),
        }
    }

    /// Reads `DATABASE_URL` and `DATABASE_NAME`; blank values count as unset.
    pub fn from_env() -> Self {
        Self {
            url: non_blank_env("DATABASE_URL"),
            database: non_blank_env("DATABASE_NAME"),
        }
    }

    pub fn url(&self) -> StoreResult<&str> {
        self.url
            .as_deref()
            .ok_or_else(|| StoreError::Unavailable("DATABASE_URL not set".into()))
    }

    pub fn database(&self) -> StoreResult<&str> {
        self.database
            .as_deref()
            .ok_or_else(|| StoreError::Unavailable("DATABASE_NAME not set".into()))
    }
}

fn non_blank_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Builds a handle from settings. Never fails: a missing or invalid
/// configuration yields an unavailable handle carrying the reason.
pub async fn connect(settings: &StoreSettings) -> StoreHandle {
    match MongoStore::connect(settings).await {
        Ok(store) => {
            tracing::info!(database = store.name(), "document store configured");
            StoreHandle::available(store)
        }
        Err(err) => {
            tracing::warn!(error = %err, "document store unavailable");
            StoreHandle::unavailable(err.to_string())
        }
    }
}

/// String form of a store identifier: ObjectIds as hex, strings verbatim.
pub fn id_to_string(id: &Bson) -> String {
    match id {
        Bson::ObjectId(oid) => oid.to_hex(),
        Bson::String(value) => value.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::oid::ObjectId;

    #[test]
    fn object_ids_render_as_hex() {
        let oid = ObjectId::new();
        assert_eq!(id_to_string(&Bson::ObjectId(oid)), oid.to_hex());
        assert_eq!(id_to_string(&Bson::String("emp-1".into())), "emp-1");
        assert_eq!(id_to_string(&Bson::Int32(7)), "7");
    }

    #[test]
    fn unavailable_handle_fails_fast() {
        let handle = StoreHandle::unavailable("DATABASE_URL not set");
        assert!(!handle.is_available());
        let err = handle.require().err();
        assert_eq!(
            err,
            Some(StoreError::Unavailable("DATABASE_URL not set".into()))
        );
    }

    #[test]
    fn settings_report_missing_values() {
        let settings = StoreSettings::default();
        assert!(matches!(settings.url(), Err(StoreError::Unavailable(_))));
        assert!(matches!(settings.database(), Err(StoreError::Unavailable(_))));

        let settings = StoreSettings::new("mongodb://localhost:27017", "directory");
        assert_eq!(settings.url().ok(), Some("mongodb://localhost:27017"));
        assert_eq!(settings.database().ok(), Some("directory"));
    }

    #[tokio::test]
    async fn connect_without_settings_is_unavailable() {
        let handle = connect(&StoreSettings::default()).await;
        match handle {
            StoreHandle::Unavailable { reason } => assert!(reason.contains("DATABASE_URL")),
            StoreHandle::Available(_) => panic!("expected unavailable handle"),
        }
    }
}
