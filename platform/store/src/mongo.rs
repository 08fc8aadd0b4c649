use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{Client, Database, bson::Document};

use crate::{DocumentStore, Filter, StoreResult, StoreSettings, id_to_string};

/// [`DocumentStore`] backed by a MongoDB database.
#[derive(Clone, Debug)]
pub struct MongoStore {
    database: Database,
}

impl MongoStore {
    /// Parses the connection string and selects the database. The driver
    /// connects lazily, so an unreachable server only surfaces on first use.
    pub async fn connect(settings: &StoreSettings) -> StoreResult<Self> {
        let url = settings.url()?;
        let name = settings.database()?;
        let client = Client::with_uri_str(url).await?;
        Ok(Self::new(client.database(name)))
    }

    pub fn new(database: Database) -> Self {
        Self { database }
    }

    /// Drops the whole database with every collection in it.
    pub async fn drop_database(&self) -> StoreResult<()> {
        self.database.drop().await?;
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    fn name(&self) -> &str {
        self.database.name()
    }

    async fn find(
        &self,
        collection: &str,
        filter: &Filter,
        limit: u32,
    ) -> StoreResult<Vec<Document>> {
        let query = filter.to_document();
        tracing::debug!(collection, %query, limit, "find");
        let cursor = self
            .database
            .collection::<Document>(collection)
            .find(query)
            .limit(i64::from(limit))
            .await?;
        Ok(cursor.try_collect::<Vec<_>>().await?)
    }

    async fn insert_one(&self, collection: &str, document: Document) -> StoreResult<String> {
        let result = self
            .database
            .collection::<Document>(collection)
            .insert_one(document)
            .await?;
        Ok(id_to_string(&result.inserted_id))
    }

    async fn list_collection_names(&self) -> StoreResult<Vec<String>> {
        Ok(self.database.list_collection_names().await?)
    }
}
