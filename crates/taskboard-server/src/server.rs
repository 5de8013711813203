//! `TaskboardServer`: Axum HTTP server.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use axum::extract::State;
use axum::response::Json;
use axum::routing::{get, post, put};
use axum::Router;
use taskboard_tasks::TaskService;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::config::ServerConfig;
use crate::handlers;
use crate::health::{self, HealthResponse};
use crate::shutdown::ShutdownCoordinator;

/// Route prefix of the task manager API.
pub const API_PREFIX: &str = "/api/taskManager";

/// Shared state accessible from Axum handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: TaskService,
    /// When the server started.
    pub start_time: Instant,
}

pub struct TaskboardServer {
    config: ServerConfig,
    service: TaskService,
    shutdown: Arc<ShutdownCoordinator>,
    start_time: Instant,
}

impl TaskboardServer {
    pub fn new(config: ServerConfig, service: TaskService) -> Self {
        Self {
            config,
            service,
            shutdown: Arc::new(ShutdownCoordinator::new()),
            start_time: Instant::now(),
        }
    }

    /// Build the Axum router with all routes.
    pub fn router(&self) -> Router {
        let state = AppState {
            service: self.service.clone(),
            start_time: self.start_time,
        };

        let api = Router::new()
            .route("/allTasks", get(handlers::all_tasks))
            .route(
                "/allParentsAndActiveTasks",
                get(handlers::all_parents_and_active_tasks),
            )
            .route("/taskByName/{taskName}", get(handlers::task_by_name))
            .route("/taskById/{taskId}", get(handlers::task_by_id))
            .route("/taskByStartDate/{startDate}", get(handlers::task_by_start_date))
            .route("/taskByEndDate/{endDate}", get(handlers::task_by_end_date))
            .route("/taskByPriority/{priority}", get(handlers::task_by_priority))
            .route("/taskByParentTask/{parentTask}", get(handlers::task_by_parent_task))
            .route("/addTask", post(handlers::add_task))
            .route("/search", post(handlers::search))
            .route("/updateTask", put(handlers::update_task))
            .route("/endTask/{taskId}", put(handlers::end_task))
            .route("/i18nMessages", get(handlers::i18n_messages));

        Router::new()
            .route("/health", get(health_handler))
            .nest(API_PREFIX, api)
            .layer(TraceLayer::new_for_http())
            .layer(cors_layer())
            .with_state(state)
    }

    /// Bind and serve in a background task until [`Self::shutdown`] is called.
    /// Returns the bound address, which matters when the configured port is 0.
    pub async fn listen(&self) -> std::io::Result<(SocketAddr, JoinHandle<()>)> {
        let listener = TcpListener::bind(self.config.bind_address()).await?;
        let addr = listener.local_addr()?;
        let router = self.router();
        let token = self.shutdown.token();
        info!(%addr, "taskboard listening");

        let handle = tokio::spawn(async move {
            let served = axum::serve(listener, router)
                .with_graceful_shutdown(async move { token.cancelled().await })
                .await;
            if let Err(e) = served {
                error!(error = %e, "server stopped with error");
            }
            info!("taskboard stopped");
        });
        Ok((addr, handle))
    }

    pub fn shutdown(&self) -> &Arc<ShutdownCoordinator> {
        &self.shutdown
    }
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// GET /health
async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(health::health_check(state.start_time))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};
    use serde_json::{json, Value};
    use taskboard_store::Database;
    use taskboard_tasks::ServiceConfig;
    use tower::ServiceExt;

    fn make_server() -> TaskboardServer {
        let service = TaskService::new(Database::in_memory().unwrap(), ServiceConfig::default());
        TaskboardServer::new(ServerConfig::default(), service)
    }

    async fn call(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(value) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(value.to_string())
            }
            None => Body::empty(),
        };
        let resp = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), 1 << 20).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, value)
    }

    fn write_report() -> Value {
        json!({"task": "Write report", "priority": 5, "startDate": "01-01-2024", "parentTask": ""})
    }

    #[tokio::test]
    async fn health_endpoint_returns_ok() {
        let app = make_server().router();
        let (status, body) = call(&app, Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert!(body["uptime_secs"].is_number());
    }

    #[tokio::test]
    async fn unknown_route_returns_404() {
        let app = make_server().router();
        let (status, _) = call(&app, Method::GET, "/api/taskManager/nope", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn add_then_list() {
        let app = make_server().router();
        let (status, body) =
            call(&app, Method::POST, "/api/taskManager/addTask", Some(write_report())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"key": "message", "value": "Task added successfully."}));

        let (status, body) = call(&app, Method::GET, "/api/taskManager/allTasks", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!([{
                "taskId": 1,
                "task": "Write report",
                "priority": 5,
                "parentId": 1,
                "parentTask": "NA",
                "startDate": "01-01-2024",
                "isParentCollection": true
            }])
        );
    }

    #[tokio::test]
    async fn duplicate_add_is_server_error() {
        let app = make_server().router();
        call(&app, Method::POST, "/api/taskManager/addTask", Some(write_report())).await;
        let (status, body) =
            call(&app, Method::POST, "/api/taskManager/addTask", Some(write_report())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["key"], "exception.taskExist");
    }

    #[tokio::test]
    async fn invalid_add_is_bad_request() {
        let app = make_server().router();
        let (status, body) = call(
            &app,
            Method::POST,
            "/api/taskManager/addTask",
            Some(json!({"task": "x", "priority": 31, "startDate": "01-01-2024"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["key"], "error.invalidRequest");
    }

    #[tokio::test]
    async fn malformed_body_is_client_error() {
        let app = make_server().router();
        let req = Request::builder()
            .method(Method::POST)
            .uri("/api/taskManager/addTask")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert!(resp.status().is_client_error());
    }

    #[tokio::test]
    async fn update_without_changes_is_ignored() {
        let app = make_server().router();
        call(&app, Method::POST, "/api/taskManager/addTask", Some(write_report())).await;
        let (_, view) = call(&app, Method::GET, "/api/taskManager/taskById/1", None).await;

        let (status, body) = call(&app, Method::PUT, "/api/taskManager/updateTask", Some(view)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["value"], "Nothing to update.");
    }

    #[tokio::test]
    async fn end_missing_task_is_a_message() {
        let app = make_server().router();
        let (status, body) = call(&app, Method::PUT, "/api/taskManager/endTask/7", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"key": "message", "value": "No task found with id 7."}));
    }

    #[tokio::test]
    async fn end_then_update_is_rejected() {
        let app = make_server().router();
        call(&app, Method::POST, "/api/taskManager/addTask", Some(write_report())).await;
        let (status, body) = call(&app, Method::PUT, "/api/taskManager/endTask/1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["value"], "Task updated successfully.");

        let (_, mut view) = call(&app, Method::GET, "/api/taskManager/taskById/1", None).await;
        assert_eq!(view["priority"], -1);
        view["priority"] = json!(4);
        let (status, body) = call(&app, Method::PUT, "/api/taskManager/updateTask", Some(view)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["key"], "exception.updateTaskEnded");
    }

    #[tokio::test]
    async fn lookup_errors() {
        let app = make_server().router();
        let (status, body) = call(&app, Method::GET, "/api/taskManager/taskById/abc", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["key"], "error.invalidTaskId");

        let (status, body) = call(&app, Method::GET, "/api/taskManager/taskById/9", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["key"], "exception.taskNotFound");

        let (status, body) =
            call(&app, Method::GET, "/api/taskManager/taskByStartDate/2024-01-01", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["key"], "error.invalidDate");

        let (status, body) =
            call(&app, Method::GET, "/api/taskManager/taskByPriority/high", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["key"], "error.invalidPriority");
    }

    #[tokio::test]
    async fn search_with_inverted_range_is_rejected() {
        let app = make_server().router();
        let (status, body) = call(
            &app,
            Method::POST,
            "/api/taskManager/search",
            Some(json!({"priorityFrom": 10, "priorityTo": 5})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["key"], "exception.priorityValidation");
    }

    #[tokio::test]
    async fn parent_lookups() {
        let app = make_server().router();
        let mut req = write_report();
        req["parentTask"] = json!("Work");
        call(&app, Method::POST, "/api/taskManager/addTask", Some(req)).await;

        let (_, children) =
            call(&app, Method::GET, "/api/taskManager/taskByParentTask/Work", None).await;
        assert_eq!(children.as_array().unwrap().len(), 1);

        let (_, all) =
            call(&app, Method::GET, "/api/taskManager/allParentsAndActiveTasks", None).await;
        assert_eq!(all[0], json!({"parentId": 1, "parentTask": "Work", "isParentCollection": true}));
        assert_eq!(all[1]["task"], "Write report");
    }

    #[tokio::test]
    async fn messages_follow_locale() {
        let app = make_server().router();
        let (_, body) = call(
            &app,
            Method::GET,
            "/api/taskManager/i18nMessages?Accept-Language=fr",
            None,
        )
        .await;
        let entries = body.as_array().unwrap();
        assert!(entries
            .iter()
            .any(|kv| kv["key"] == "label.cancel" && kv["value"] == "Annuler"));

        let req = Request::builder()
            .uri("/api/taskManager/endTask/3")
            .method(Method::PUT)
            .header(header::ACCEPT_LANGUAGE, "fr-FR,fr;q=0.9,en;q=0.5")
            .body(Body::empty())
            .unwrap();
        let resp = app.clone().oneshot(req).await.unwrap();
        let bytes = axum::body::to_bytes(resp.into_body(), 1 << 20).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["value"], "Aucune tâche trouvée avec l'identifiant 3.");
    }
}
