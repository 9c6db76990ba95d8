use super::*;

#[tokio::test]
async fn health_check_succeeds_for_live_pool() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    storage.health_check().await.expect("health check");
}

#[tokio::test]
async fn round_trips_a_value() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    storage
        .set_value("broker_id", "42")
        .await
        .expect("set value");
    let value = storage.get_value("broker_id").await.expect("get value");
    assert_eq!(value.as_deref(), Some("42"));
}

#[tokio::test]
async fn overwrites_an_existing_key() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    storage.set_value("broker_id", "42").await.expect("first");
    storage.set_value("broker_id", "7").await.expect("second");
    let value = storage.get_value("broker_id").await.expect("get value");
    assert_eq!(value.as_deref(), Some("7"));
}

#[tokio::test]
async fn missing_key_reads_as_none() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    let value = storage.get_value("absent").await.expect("get value");
    assert!(value.is_none());
}

#[tokio::test]
async fn delete_removes_the_key() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    storage.set_value("broker_profile", "{}").await.expect("set");
    storage.delete_value("broker_profile").await.expect("delete");
    let value = storage.get_value("broker_profile").await.expect("get");
    assert!(value.is_none());
}

#[tokio::test]
async fn creates_database_file_when_missing() {
    let suffix = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let temp_root = std::env::temp_dir().join(format!("portal_storage_test_{suffix}"));
    let db_path = temp_root.join("nested").join("session.db");
    let database_url = format!("sqlite://{}", db_path.to_string_lossy().replace('\\', "/"));

    let storage = Storage::new(&database_url).await.expect("db");
    drop(storage);

    assert!(
        db_path.exists(),
        "database file should exist: {}",
        db_path.display()
    );

    std::fs::remove_dir_all(temp_root).expect("cleanup");
}
