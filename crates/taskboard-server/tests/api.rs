//! End-to-end tests over a real socket.

use std::net::SocketAddr;
use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde_json::{json, Value};

use taskboard_server::{ServerConfig, TaskboardServer};
use taskboard_store::Database;
use taskboard_tasks::{ServiceConfig, TaskService};

const TIMEOUT: Duration = Duration::from_secs(5);

/// Boot a server on an auto-assigned port backed by an in-memory database.
async fn boot_server(default_parent_name: &str) -> (String, TaskboardServer) {
    let service = TaskService::new(
        Database::in_memory().unwrap(),
        ServiceConfig {
            default_parent_name: default_parent_name.into(),
        },
    );
    let server = TaskboardServer::new(ServerConfig::default(), service);
    let (addr, _handle): (SocketAddr, _) = server.listen().await.unwrap();
    (format!("http://{addr}/api/taskManager"), server)
}

fn client() -> Client {
    Client::builder().timeout(TIMEOUT).build().unwrap()
}

#[tokio::test]
async fn task_lifecycle() {
    let (base, server) = boot_server("Inbox").await;
    let http = client();

    let resp = http
        .post(format!("{base}/addTask"))
        .json(&json!({"task": "Plan trip", "priority": 3, "startDate": "10-03-2024"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = http
        .post(format!("{base}/addTask"))
        .json(&json!({
            "task": "Book flights",
            "priority": 8,
            "startDate": "11-03-2024",
            "endDate": "12-03-2024",
            "parentId": 1,
            "isParentCollection": false
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let view: Value = http
        .get(format!("{base}/taskById/2"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(view["parentTask"], "Plan trip");
    assert_eq!(view["isParentCollection"], false);
    assert_eq!(view["endDate"], "12-03-2024");

    let by_end: Value = http
        .get(format!("{base}/taskByEndDate/12-03-2024"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(by_end[0]["task"], "Book flights");
    assert_eq!(by_end[0]["parentTask"], "Plan trip");

    let mut renamed = view.clone();
    renamed["parentTask"] = json!("Plan holiday");
    let body: Value = http
        .put(format!("{base}/updateTask"))
        .json(&renamed)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["value"], "Task updated successfully.");

    let parent: Value = http
        .get(format!("{base}/taskById/1"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(parent["task"], "Plan holiday");
    assert_eq!(parent["parentTask"], "Inbox");

    let resp = http.put(format!("{base}/endTask/2")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let active: Value = http
        .get(format!("{base}/allParentsAndActiveTasks"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let names: Vec<&str> = active
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|v| v["task"].as_str())
        .collect();
    assert_eq!(names, vec!["Plan holiday"]);

    server.shutdown().shutdown();
}

#[tokio::test]
async fn search_over_http() {
    let (base, server) = boot_server("NA").await;
    let http = client();

    for (name, priority) in [("Low", 2), ("Mid", 12), ("High", 25)] {
        http.post(format!("{base}/addTask"))
            .json(&json!({"task": name, "priority": priority, "startDate": "01-01-2024", "parentTask": "Work"}))
            .send()
            .await
            .unwrap();
    }

    let found: Value = http
        .post(format!("{base}/search"))
        .json(&json!({"parentTask": "work", "priorityFrom": 10, "priorityTo": 30}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let names: Vec<&str> = found
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|v| v["task"].as_str())
        .collect();
    assert_eq!(names, vec!["Mid", "High"]);

    let resp = http
        .post(format!("{base}/search?Accept-Language=fr"))
        .json(&json!({"priorityFrom": 20, "priorityTo": 10}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["key"], "exception.priorityValidation");
    assert_eq!(
        body["value"],
        "La priorité de début ne doit pas dépasser la priorité de fin."
    );

    server.shutdown().shutdown();
}

#[tokio::test]
async fn shutdown_stops_the_listener() {
    let service = TaskService::new(Database::in_memory().unwrap(), ServiceConfig::default());
    let server = TaskboardServer::new(ServerConfig::default(), service);
    let (addr, handle) = server.listen().await.unwrap();

    let resp = client()
        .get(format!("http://{addr}/health"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    server.shutdown().shutdown();
    tokio::time::timeout(TIMEOUT, handle).await.unwrap().unwrap();
}
