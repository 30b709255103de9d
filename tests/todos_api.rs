//! End-to-end tests for the task-list HTTP API.
//! Spins up the real server on a random port with a temp-dir database.

use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use todod::{config::Config, rest, storage::TodoStore, AppContext};

/// Find a free local port by binding to port 0.
fn find_free_port() -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().port()
}

/// Start the server against a fresh database and return its base URL.
async fn spawn_server(dir: &TempDir) -> String {
    let port = find_free_port();
    let config = Config {
        port,
        db_path: dir.path().join("todod.db"),
        static_dir: dir.path().join("dist"),
        log_filter: "error".to_string(),
    };
    let store = TodoStore::new(&config.db_path).await.unwrap();
    let ctx = Arc::new(AppContext { config, store });
    tokio::spawn(rest::serve(ctx));

    for _ in 0..50 {
        if tokio::net::TcpStream::connect(("127.0.0.1", port))
            .await
            .is_ok()
        {
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    format!("http://127.0.0.1:{port}")
}

async fn create_todo(client: &reqwest::Client, base: &str, text: &str) -> Value {
    let resp = client
        .post(format!("{base}/todos"))
        .json(&json!({ "text": text }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    resp.json().await.unwrap()
}

async fn list_todos(client: &reqwest::Client, base: &str) -> Vec<Value> {
    let resp = client.get(format!("{base}/todos")).send().await.unwrap();
    assert_eq!(resp.status(), 200);
    resp.json().await.unwrap()
}

#[tokio::test]
async fn create_then_list_returns_newest_first() {
    let dir = TempDir::new().unwrap();
    let base = spawn_server(&dir).await;
    let client = reqwest::Client::new();

    let first = create_todo(&client, &base, "Buy milk").await;
    assert_eq!(first["text"], "Buy milk");
    assert_eq!(first["completed"], false);
    assert!(first["id"].is_string());
    assert!(first["createdAt"].is_string());
    assert!(first["updatedAt"].is_string());

    tokio::time::sleep(Duration::from_millis(5)).await;
    create_todo(&client, &base, "Walk the dog").await;

    let todos = list_todos(&client, &base).await;
    assert_eq!(todos.len(), 2);
    assert_eq!(todos[0]["text"], "Walk the dog");
    assert_eq!(todos[1]["text"], "Buy milk");
}

#[tokio::test]
async fn toggle_round_trip() {
    let dir = TempDir::new().unwrap();
    let base = spawn_server(&dir).await;
    let client = reqwest::Client::new();

    let todo = create_todo(&client, &base, "task").await;
    let id = todo["id"].as_str().unwrap();

    let resp = client
        .patch(format!("{base}/todos/{id}/toggle"))
        .json(&json!({ "completed": true }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let updated: Value = resp.json().await.unwrap();
    assert_eq!(updated["completed"], true);

    let todos = list_todos(&client, &base).await;
    assert_eq!(todos[0]["completed"], true);

    let resp = client
        .patch(format!("{base}/todos/{id}/toggle"))
        .json(&json!({ "completed": false }))
        .send()
        .await
        .unwrap();
    let restored: Value = resp.json().await.unwrap();
    assert_eq!(restored["completed"], false);
}

#[tokio::test]
async fn edit_changes_only_text() {
    let dir = TempDir::new().unwrap();
    let base = spawn_server(&dir).await;
    let client = reqwest::Client::new();

    let todo = create_todo(&client, &base, "original").await;
    let id = todo["id"].as_str().unwrap();

    let resp = client
        .patch(format!("{base}/todos/{id}"))
        .json(&json!({ "text": "revised" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let updated: Value = resp.json().await.unwrap();
    assert_eq!(updated["text"], "revised");
    assert_eq!(updated["completed"], todo["completed"]);
    assert_eq!(updated["id"], todo["id"]);
    assert_eq!(updated["createdAt"], todo["createdAt"]);
}

#[tokio::test]
async fn delete_returns_prior_state_and_then_404s() {
    let dir = TempDir::new().unwrap();
    let base = spawn_server(&dir).await;
    let client = reqwest::Client::new();

    let todo = create_todo(&client, &base, "doomed").await;
    let id = todo["id"].as_str().unwrap();

    let resp = client
        .delete(format!("{base}/todos/{id}"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let deleted: Value = resp.json().await.unwrap();
    assert_eq!(deleted["text"], "doomed");

    assert!(list_todos(&client, &base).await.is_empty());

    // Every follow-up on the same id is a 404, never a 500.
    let resp = client
        .patch(format!("{base}/todos/{id}/toggle"))
        .json(&json!({ "completed": true }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);

    let resp = client
        .patch(format!("{base}/todos/{id}"))
        .json(&json!({ "text": "ghost" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);

    let resp = client
        .delete(format!("{base}/todos/{id}"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn malformed_id_is_404_not_500() {
    let dir = TempDir::new().unwrap();
    let base = spawn_server(&dir).await;
    let client = reqwest::Client::new();

    let resp = client
        .patch(format!("{base}/todos/not-a-uuid/toggle"))
        .json(&json!({ "completed": true }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "No such To Do");

    let resp = client
        .delete(format!("{base}/todos/not-a-uuid"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn list_reflects_non_deleted_set_in_creation_order() {
    let dir = TempDir::new().unwrap();
    let base = spawn_server(&dir).await;
    let client = reqwest::Client::new();

    let mut ids = Vec::new();
    for text in ["one", "two", "three", "four"] {
        let todo = create_todo(&client, &base, text).await;
        ids.push(todo["id"].as_str().unwrap().to_string());
        tokio::time::sleep(Duration::from_millis(5)).await;
    }

    // Toggle and edit two of them, delete another.
    client
        .patch(format!("{base}/todos/{}/toggle", ids[0]))
        .json(&json!({ "completed": true }))
        .send()
        .await
        .unwrap();
    client
        .patch(format!("{base}/todos/{}", ids[2]))
        .json(&json!({ "text": "three prime" }))
        .send()
        .await
        .unwrap();
    client
        .delete(format!("{base}/todos/{}", ids[1]))
        .send()
        .await
        .unwrap();

    let todos = list_todos(&client, &base).await;
    let texts: Vec<&str> = todos.iter().map(|t| t["text"].as_str().unwrap()).collect();
    assert_eq!(texts, vec!["four", "three prime", "one"]);
}

#[tokio::test]
async fn origin_allow_list_is_enforced() {
    let dir = TempDir::new().unwrap();
    let base = spawn_server(&dir).await;
    let client = reqwest::Client::new();

    // No Origin header: allowed.
    let resp = client.get(format!("{base}/todos")).send().await.unwrap();
    assert_eq!(resp.status(), 200);

    // Listed origin: allowed, with CORS headers on the response.
    let resp = client
        .get(format!("{base}/todos"))
        .header("Origin", "http://localhost:5173")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(
        resp.headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("http://localhost:5173")
    );

    // Unlisted origin: rejected before any handler runs.
    let resp = client
        .get(format!("{base}/todos"))
        .header("Origin", "https://evil.example")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 403);
    let body: Value = resp.json().await.unwrap();
    assert!(body["message"].as_str().unwrap().contains("CORS"));
}
