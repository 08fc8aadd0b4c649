use platform_api::truncate_detail;
use platform_store::{StoreHandle, StoreSettings};
use serde::Serialize;

/// Collections listed in the report, at most.
const MAX_COLLECTIONS: usize = 10;
/// Characters of an upstream error kept in a status string.
const MAX_ERROR_CHARS: usize = 50;

/// Store connectivity summary served by `GET /test`. Every field is a
/// human-readable status; failures are reported here rather than raised.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StoreReport {
    pub backend: String,
    pub database: String,
    pub database_url: String,
    pub database_name: String,
    pub connection_status: String,
    pub collections: Vec<String>,
}

pub async fn store_report(handle: &StoreHandle, settings: &StoreSettings) -> StoreReport {
    let mut report = StoreReport {
        backend: "✅ Running".into(),
        database: "❌ Not Available".into(),
        database_url: presence(settings.url.is_some()),
        database_name: presence(settings.database.is_some()),
        connection_status: "Not Connected".into(),
        collections: Vec::new(),
    };

    let Ok(store) = handle.require() else {
        return report;
    };
    report.connection_status = "Connected".into();
    match store.list_collection_names().await {
        Ok(mut names) => {
            names.truncate(MAX_COLLECTIONS);
            report.collections = names;
            report.database = "✅ Connected & Working".into();
        }
        Err(err) => {
            tracing::warn!(error = %err, "collection listing failed");
            report.database = format!(
                "⚠️  Connected but Error: {}",
                truncate_detail(&err.to_string(), MAX_ERROR_CHARS)
            );
        }
    }
    report
}

fn presence(set: bool) -> String {
    let status = if set { "✅ Set" } else { "❌ Not Set" };
    status.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use platform_store::{
        DocumentStore, Filter, MemoryStore, StoreError, StoreResult,
        bson::{Document, doc},
    };

    struct UnreachableStore;

    #[async_trait]
    impl DocumentStore for UnreachableStore {
        fn name(&self) -> &str {
            "directory"
        }

        async fn find(&self, _: &str, _: &Filter, _: u32) -> StoreResult<Vec<Document>> {
            Err(StoreError::Backend("unreachable".into()))
        }

        async fn insert_one(&self, _: &str, _: Document) -> StoreResult<String> {
            Err(StoreError::Backend("unreachable".into()))
        }

        async fn list_collection_names(&self) -> StoreResult<Vec<String>> {
            Err(StoreError::Backend(
                "server selection timeout: no available servers matching the criteria".into(),
            ))
        }
    }

    #[tokio::test]
    async fn reports_unavailable_store_without_failing() {
        let report = store_report(
            &StoreHandle::unavailable("DATABASE_URL not set"),
            &StoreSettings::default(),
        )
        .await;
        assert_eq!(report.backend, "✅ Running");
        assert_eq!(report.database, "❌ Not Available");
        assert_eq!(report.connection_status, "Not Connected");
        assert_eq!(report.database_url, "❌ Not Set");
        assert_eq!(report.database_name, "❌ Not Set");
        assert!(report.collections.is_empty());
    }

    #[tokio::test]
    async fn lists_at_most_ten_collections() {
        let store = MemoryStore::new("directory");
        for i in 0..12 {
            store
                .insert_one(&format!("c{i:02}"), doc! { "n": i })
                .await
                .unwrap();
        }
        let settings = StoreSettings::new("mongodb://localhost:27017", "directory");
        let report = store_report(&StoreHandle::available(store), &settings).await;
        assert_eq!(report.database, "✅ Connected & Working");
        assert_eq!(report.connection_status, "Connected");
        assert_eq!(report.database_url, "✅ Set");
        assert_eq!(report.collections.len(), MAX_COLLECTIONS);
        assert_eq!(report.collections[0], "c00");
    }

    #[tokio::test]
    async fn listing_failure_is_reported_truncated() {
        let report = store_report(
            &StoreHandle::available(UnreachableStore),
            &StoreSettings::default(),
        )
        .await;
        assert_eq!(report.connection_status, "Connected");
        let detail = report
            .database
            .strip_prefix("⚠️  Connected but Error: ")
            .unwrap();
        assert_eq!(detail.chars().count(), MAX_ERROR_CHARS);
        assert!(report.collections.is_empty());
    }
}
