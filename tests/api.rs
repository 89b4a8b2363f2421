//! End-to-end CRUD tests against a running server.

use std::time::Duration;

use serde_json::{json, Value};
use tempfile::TempDir;

use task_api::config::ApiConfig;
use task_api::http::HttpServer;
use task_api::lifecycle::Shutdown;
use task_api::tasks::Task;

struct TestServer {
    url: String,
    shutdown: Shutdown,
    _data_dir: TempDir,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

async fn start_server() -> TestServer {
    let data_dir = tempfile::tempdir().unwrap();

    let mut config = ApiConfig::default();
    config.storage.data_path = data_dir
        .path()
        .join("db.json")
        .to_string_lossy()
        .into_owned();

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let server = HttpServer::new(config).unwrap();

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    // Give the accept loop a moment to come up
    tokio::time::sleep(Duration::from_millis(50)).await;

    TestServer {
        url: format!("http://{}", addr),
        shutdown,
        _data_dir: data_dir,
    }
}

async fn create(client: &reqwest::Client, url: &str, body: Value) -> reqwest::Response {
    client
        .post(format!("{url}/tasks"))
        .json(&body)
        .send()
        .await
        .unwrap()
}

async fn list(client: &reqwest::Client, url: &str) -> Vec<Task> {
    client
        .get(format!("{url}/tasks"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

#[tokio::test]
async fn test_create_then_list() {
    let server = start_server().await;
    let client = reqwest::Client::new();

    let res = create(
        &client,
        &server.url,
        json!({ "title": "A", "description": "B" }),
    )
    .await;
    assert_eq!(res.status(), 201);
    assert!(res.text().await.unwrap().is_empty());

    let tasks = list(&client, &server.url).await;
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].title, "A");
    assert_eq!(tasks[0].description, "B");
    assert!(tasks[0].completed_at.is_none());
    assert_eq!(tasks[0].created_at, tasks[0].updated_at);
}

#[tokio::test]
async fn test_create_missing_description_rejected() {
    let server = start_server().await;
    let client = reqwest::Client::new();

    let res = create(&client, &server.url, json!({ "title": "A" })).await;
    assert_eq!(res.status(), 400);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "Title and description are required");

    assert!(list(&client, &server.url).await.is_empty());
}

#[tokio::test]
async fn test_create_empty_fields_rejected() {
    let server = start_server().await;
    let client = reqwest::Client::new();

    let res = create(
        &client,
        &server.url,
        json!({ "title": "", "description": "B" }),
    )
    .await;
    assert_eq!(res.status(), 400);
}

#[tokio::test]
async fn test_malformed_body_rejected() {
    let server = start_server().await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/tasks", server.url))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 400);
}

#[tokio::test]
async fn test_update_nonexistent_returns_404() {
    let server = start_server().await;
    let client = reqwest::Client::new();

    let res = client
        .put(format!("{}/tasks/no-such-id", server.url))
        .json(&json!({ "title": "X" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 404);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "Task not found");

    assert!(list(&client, &server.url).await.is_empty());
}

#[tokio::test]
async fn test_update_title_only() {
    let server = start_server().await;
    let client = reqwest::Client::new();

    create(
        &client,
        &server.url,
        json!({ "title": "before", "description": "keep me" }),
    )
    .await;
    let before = list(&client, &server.url).await.remove(0);

    // Ensure the refreshed updated_at lands on a later timestamp
    tokio::time::sleep(Duration::from_millis(10)).await;

    let res = client
        .put(format!("{}/tasks/{}", server.url, before.id))
        .json(&json!({ "title": "after" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 204);

    let after = list(&client, &server.url).await.remove(0);
    assert_eq!(after.title, "after");
    assert_eq!(after.description, "keep me");
    assert_eq!(after.created_at, before.created_at);
    assert!(after.updated_at > before.updated_at);
}

#[tokio::test]
async fn test_delete_then_404() {
    let server = start_server().await;
    let client = reqwest::Client::new();

    create(
        &client,
        &server.url,
        json!({ "title": "doomed", "description": "gone soon" }),
    )
    .await;
    let task = list(&client, &server.url).await.remove(0);

    let res = client
        .delete(format!("{}/tasks/{}", server.url, task.id))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 204);

    assert!(list(&client, &server.url).await.is_empty());

    let res = client
        .delete(format!("{}/tasks/{}", server.url, task.id))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 404);
}

#[tokio::test]
async fn test_search_filters_by_substring() {
    let server = start_server().await;
    let client = reqwest::Client::new();

    create(
        &client,
        &server.url,
        json!({ "title": "foo fighters", "description": "band practice" }),
    )
    .await;
    create(
        &client,
        &server.url,
        json!({ "title": "groceries", "description": "buy milk" }),
    )
    .await;
    create(
        &client,
        &server.url,
        json!({ "title": "laundry", "description": "wash the foo towel" }),
    )
    .await;

    let matches: Vec<Task> = client
        .get(format!("{}/tasks", server.url))
        .query(&[("search", "foo")])
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(matches.len(), 2);
    assert!(matches
        .iter()
        .all(|t| t.title.contains("foo") || t.description.contains("foo")));
    assert!(matches.iter().all(|t| t.title != "groceries"));
}

#[tokio::test]
async fn test_unknown_route_returns_404() {
    let server = start_server().await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/users", server.url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 404);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "route not found");
}
