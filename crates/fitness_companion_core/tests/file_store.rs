use std::sync::Arc;

use fitness_companion_core::preferences::{ProfileField, UserPreferences};
use fitness_companion_core::store::{JsonFileStore, KeyValueStore};
use secrecy::SecretString;

#[tokio::test]
async fn values_survive_reopen() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("user_prefs.json");

    {
        let store = JsonFileStore::open(&path).await.expect("open");
        let prefs = UserPreferences::new(Arc::new(store));
        prefs
            .save_credentials("ana@duoc.cl", &SecretString::new("Pass1234".into()))
            .await
            .expect("save credentials");
        prefs
            .save_profile("Ana", "trail runner", Some("Female"))
            .await
            .expect("save profile");
        prefs
            .save_profile_field(ProfileField::Photo, "file:///photos/me.jpg")
            .await
            .expect("save photo");
    }

    let reopened = JsonFileStore::open(&path).await.expect("reopen");
    let prefs = UserPreferences::new(Arc::new(reopened));
    let creds = prefs.get_credentials().await.expect("creds");
    assert!(creds.matches("ana@duoc.cl", "Pass1234"));
    let profile = prefs.get_profile().await.expect("profile");
    assert_eq!(profile.name, "Ana");
    assert_eq!(profile.gender, "Female");
    assert_eq!(profile.photo, "file:///photos/me.jpg");
}

#[tokio::test]
async fn clear_empties_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("nested").join("prefs.json");
    let store = JsonFileStore::open(&path).await.expect("open");
    store.put("email", "a@b.com").await.expect("put");
    assert!(path.exists());

    store.clear().await.expect("clear");
    let contents = std::fs::read_to_string(&path).expect("read");
    let parsed: serde_json::Value = serde_json::from_str(&contents).expect("json");
    assert_eq!(parsed, serde_json::json!({}));
}

#[tokio::test]
async fn concurrent_writes_last_write_wins() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = Arc::new(
        JsonFileStore::open(dir.path().join("prefs.json"))
            .await
            .expect("open"),
    );

    let mut handles = Vec::new();
    for i in 0..8 {
        let s = store.clone();
        handles.push(tokio::spawn(async move {
            s.put("name", &format!("user-{i}")).await
        }));
    }
    for h in handles {
        h.await.expect("join").expect("put");
    }

    let in_memory = store.get("name").await.expect("get").expect("value");
    let reopened = JsonFileStore::open(store.path()).await.expect("reopen");
    let on_disk = reopened.get("name").await.expect("get").expect("value");
    assert_eq!(in_memory, on_disk);
}

#[tokio::test]
async fn failed_write_leaves_memory_unchanged() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("prefs.json");
    let store = JsonFileStore::open(&path).await.expect("open");
    store.put("name", "Ana").await.expect("put");

    // a directory in place of the file makes the rename fail
    std::fs::remove_file(&path).expect("remove file");
    std::fs::create_dir(&path).expect("create dir");

    assert!(store.put("name", "Bea").await.is_err());
    assert_eq!(store.get("name").await.expect("get").as_deref(), Some("Ana"));

    assert!(store.remove("name").await.is_err());
    assert!(store.clear().await.is_err());
    let snapshot = store.snapshot().await.expect("snapshot");
    assert_eq!(snapshot.get("name").map(String::as_str), Some("Ana"));
}
