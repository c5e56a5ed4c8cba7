#![allow(dead_code)]

mod models {
    include!("../src/models.rs");
}

mod storage {
    include!("../src/storage.rs");
}

mod api {
    include!("../src/api.rs");
}

use api::{build_router, AppState};
use std::net::SocketAddr;
use std::sync::Arc;
use storage::UploadCatalog;
use tokio::time::{sleep, Duration};

async fn spawn_server() -> (SocketAddr, tempfile::TempDir) {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("uploads.json");
    std::fs::write(&path, "[]").unwrap();

    let catalog = Arc::new(UploadCatalog::open(&path).unwrap());
    let app = build_router(AppState { catalog });

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (addr, tmp)
}

fn upload_body(title: &str, category: &str, department: &str) -> serde_json::Value {
    serde_json::json!({
        "title": title,
        "description": "A short description.",
        "category": category,
        "department": department,
        "uploader_id": "user-1",
        "uploader_name": "Test User",
        "uploader_email": "test.user@student.edu"
    })
}

#[tokio::test]
async fn create_then_search_roundtrip() {
    let (addr, _tmp) = spawn_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("http://{}/uploads", addr))
        .json(&upload_body("Graph Theory Notes", "Notes", "CSE"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);

    let created: serde_json::Value = resp.json().await.unwrap();
    assert!(!created["id"].as_str().unwrap().is_empty());
    assert_eq!(created["created_at"], created["updated_at"]);

    let found: serde_json::Value = client
        .get(format!("http://{}/uploads", addr))
        .query(&[("query", "graph theory")])
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(found["uploads"].as_array().unwrap().len(), 1);

    let miss: serde_json::Value = client
        .get(format!("http://{}/uploads", addr))
        .query(&[("category", "Assignments")])
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(miss["uploads"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn blank_title_is_rejected() {
    let (addr, _tmp) = spawn_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("http://{}/uploads", addr))
        .json(&upload_body("   ", "Notes", "CSE"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
}

#[tokio::test]
async fn unknown_enum_values_are_rejected() {
    let (addr, _tmp) = spawn_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("http://{}/uploads", addr))
        .json(&upload_body("Memes", "Memes", "CSE"))
        .send()
        .await
        .unwrap();
    assert!(resp.status().is_client_error());
}

#[tokio::test]
async fn update_merges_fields_through_the_api() {
    let (addr, _tmp) = spawn_server().await;
    let client = reqwest::Client::new();

    let created: serde_json::Value = client
        .post(format!("http://{}/uploads", addr))
        .json(&upload_body("Draft Title", "Notes", "CSE"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let id = created["id"].as_str().unwrap();

    let resp = client
        .put(format!("http://{}/uploads/{}", addr, id))
        .json(&serde_json::json!({"title": "Final Title"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 204);

    let found: serde_json::Value = client
        .get(format!("http://{}/uploads", addr))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let uploads = found["uploads"].as_array().unwrap();
    assert_eq!(uploads.len(), 1);
    assert_eq!(uploads[0]["title"], "Final Title");
    assert_eq!(uploads[0]["description"], "A short description.");
}

#[tokio::test]
async fn delete_is_idempotent() {
    let (addr, _tmp) = spawn_server().await;
    let client = reqwest::Client::new();

    let created: serde_json::Value = client
        .post(format!("http://{}/uploads", addr))
        .json(&upload_body("Disposable Notes", "Notes", "IT"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let id = created["id"].as_str().unwrap();

    for _ in 0..2 {
        let resp = client
            .delete(format!("http://{}/uploads/{}", addr, id))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 204);
    }

    let found: serde_json::Value = client
        .get(format!("http://{}/uploads", addr))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(found["uploads"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn uploader_listing_is_newest_first() {
    let (addr, _tmp) = spawn_server().await;
    let client = reqwest::Client::new();

    client
        .post(format!("http://{}/uploads", addr))
        .json(&upload_body("First Upload", "Notes", "CSE"))
        .send()
        .await
        .unwrap();
    sleep(Duration::from_millis(10)).await;
    client
        .post(format!("http://{}/uploads", addr))
        .json(&upload_body("Second Upload", "Projects", "CSE"))
        .send()
        .await
        .unwrap();

    let mut other = upload_body("Unrelated Upload", "Video", "ECE");
    other["uploader_id"] = serde_json::json!("user-2");
    client
        .post(format!("http://{}/uploads", addr))
        .json(&other)
        .send()
        .await
        .unwrap();

    let found: serde_json::Value = client
        .get(format!("http://{}/uploaders/user-1/uploads", addr))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let uploads = found["uploads"].as_array().unwrap();

    assert_eq!(uploads.len(), 2);
    assert_eq!(uploads[0]["title"], "Second Upload");
    assert_eq!(uploads[1]["title"], "First Upload");
}

#[tokio::test]
async fn stats_reflect_the_catalog() {
    let (addr, _tmp) = spawn_server().await;
    let client = reqwest::Client::new();

    client
        .post(format!("http://{}/uploads", addr))
        .json(&upload_body("Stats Notes", "Notes", "CSE"))
        .send()
        .await
        .unwrap();

    let mut other = upload_body("Stats Video", "Video", "ECE");
    other["uploader_id"] = serde_json::json!("user-2");
    client
        .post(format!("http://{}/uploads", addr))
        .json(&other)
        .send()
        .await
        .unwrap();

    let stats: serde_json::Value = client
        .get(format!("http://{}/stats", addr))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(stats["total_uploads"], 2);
    assert_eq!(stats["contributors"], 2);
    assert_eq!(stats["categories_in_use"], 2);
    assert_eq!(stats["uploaded_this_week"], 2);
}
