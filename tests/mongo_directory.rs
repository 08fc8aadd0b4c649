use anyhow::Result;
use platform_store::{DocumentStore, MongoStore, StoreHandle, StoreSettings};
use products_hr::{COLLECTION, Directory, EmployeeQuery, ListParams, sample_employees};
use uuid::Uuid;

/// Connects to a fresh database on the server named by `TEST_DATABASE_URL`.
async fn setup_mongo() -> Option<(Directory, MongoStore)> {
    let url = match std::env::var("TEST_DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            eprintln!("skipping MongoDB tests: TEST_DATABASE_URL not set");
            return None;
        }
    };
    let name = format!("directory_test_{}", Uuid::new_v4().simple());
    let store = MongoStore::connect(&StoreSettings::new(url, name)).await.ok()?;
    let directory = Directory::new(StoreHandle::available(store.clone()));
    Some((directory, store))
}

fn query(params: ListParams) -> EmployeeQuery {
    EmployeeQuery::try_from(params).expect("valid query")
}

#[tokio::test]
async fn seed_and_search_round_trip() -> Result<()> {
    let Some((directory, store)) = setup_mongo().await else {
        return Ok(());
    };
    let expected = sample_employees().len() as u64;
    assert_eq!(directory.seed().await?, expected);
    assert_eq!(directory.seed().await?, expected);

    let all = directory.list(&EmployeeQuery::default()).await?;
    assert_eq!(all.count as u64, expected * 2);
    assert!(all.items.iter().all(|e| e.id.len() == 24));
    assert!(all.items.iter().all(|e| !e.extra.contains_key("_id")));

    let hr = directory
        .list(&query(ListParams {
            q: Some("hr".into()),
            ..ListParams::default()
        }))
        .await?;
    assert!(hr.items.iter().any(|e| e.department.as_deref() == Some("HR")));

    store
        .insert_one(
            COLLECTION,
            platform_store::bson::doc! { "firstName": "Nadia", "phone": 213560000004_i64 },
        )
        .await?;
    let mixed = directory.list(&EmployeeQuery::default()).await?;
    assert_eq!(mixed.count as u64, expected * 2 + 1);

    let tagged = directory
        .list(&query(ListParams {
            tags: Some("Linux,DevOps".into()),
            ..ListParams::default()
        }))
        .await?;
    assert_eq!(tagged.count, 2);
    assert!(
        tagged
            .items
            .iter()
            .all(|e| e.department.as_deref() == Some("IT"))
    );

    let capped = directory
        .list(&query(ListParams {
            limit: Some("4".into()),
            ..ListParams::default()
        }))
        .await?;
    assert_eq!(capped.count, 4);

    let names = store.list_collection_names().await?;
    assert!(names.iter().any(|name| name == COLLECTION));

    store.drop_database().await?;
    assert!(store.list_collection_names().await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn pattern_characters_match_literally() -> Result<()> {
    let Some((directory, store)) = setup_mongo().await else {
        return Ok(());
    };
    store
        .insert_one(
            COLLECTION,
            platform_store::bson::doc! { "firstName": "A.B", "title": "C++ developer" },
        )
        .await?;
    store
        .insert_one(
            COLLECTION,
            platform_store::bson::doc! { "firstName": "AxB", "title": "Rust developer" },
        )
        .await?;

    let dotted = directory
        .list(&query(ListParams {
            q: Some("a.b".into()),
            ..ListParams::default()
        }))
        .await?;
    assert_eq!(dotted.count, 1);
    assert_eq!(dotted.items[0].first_name.as_deref(), Some("A.B"));

    let plus = directory
        .list(&query(ListParams {
            q: Some("c++".into()),
            ..ListParams::default()
        }))
        .await?;
    assert_eq!(plus.count, 1);

    store.drop_database().await?;
    Ok(())
}
