//! Route handlers for `/api/taskManager`.
//!
//! Handlers are thin: extract, call the service, render. Message responses
//! (add, update, end) are `{"key": "message", "value": <text>}`.

use axum::extract::{Path, State};
use axum::Json;
use taskboard_core::{KeyValue, MessageKey, TaskFilter, TaskRequest, TaskView};
use taskboard_tasks::{EndOutcome, TaskError};
use tracing::debug;

use crate::error::ApiError;
use crate::locale::{Locale, RequestLocale};
use crate::messages;
use crate::server::AppState;

type ApiResult<T> = Result<Json<T>, ApiError>;

fn respond<T>(result: Result<T, TaskError>, locale: Locale) -> ApiResult<T> {
    result.map(Json).map_err(|e| ApiError::new(e, locale))
}

fn message(locale: Locale, key: MessageKey, args: &[String]) -> Json<KeyValue> {
    Json(KeyValue::new("message", messages::render(locale, key, args)))
}

/// GET /allTasks
pub async fn all_tasks(
    State(state): State<AppState>,
    RequestLocale(locale): RequestLocale,
) -> ApiResult<Vec<TaskView>> {
    respond(state.service.list_all(), locale)
}

/// GET /allParentsAndActiveTasks
pub async fn all_parents_and_active_tasks(
    State(state): State<AppState>,
    RequestLocale(locale): RequestLocale,
) -> ApiResult<Vec<TaskView>> {
    respond(state.service.list_parents_and_active_tasks(), locale)
}

/// GET /taskByName/{taskName}
pub async fn task_by_name(
    State(state): State<AppState>,
    RequestLocale(locale): RequestLocale,
    Path(task_name): Path<String>,
) -> ApiResult<Vec<TaskView>> {
    respond(state.service.list_by_name(&task_name), locale)
}

/// GET /taskById/{taskId}
pub async fn task_by_id(
    State(state): State<AppState>,
    RequestLocale(locale): RequestLocale,
    Path(task_id): Path<String>,
) -> ApiResult<TaskView> {
    respond(state.service.get_by_id(&task_id), locale)
}

/// GET /taskByStartDate/{startDate}
pub async fn task_by_start_date(
    State(state): State<AppState>,
    RequestLocale(locale): RequestLocale,
    Path(start_date): Path<String>,
) -> ApiResult<Vec<TaskView>> {
    respond(state.service.list_by_start_date(&start_date), locale)
}

/// GET /taskByEndDate/{endDate}
pub async fn task_by_end_date(
    State(state): State<AppState>,
    RequestLocale(locale): RequestLocale,
    Path(end_date): Path<String>,
) -> ApiResult<Vec<TaskView>> {
    respond(state.service.list_by_end_date(&end_date), locale)
}

/// GET /taskByPriority/{priority}
pub async fn task_by_priority(
    State(state): State<AppState>,
    RequestLocale(locale): RequestLocale,
    Path(priority): Path<String>,
) -> ApiResult<Vec<TaskView>> {
    respond(state.service.list_by_priority(&priority), locale)
}

/// GET /taskByParentTask/{parentTask}
pub async fn task_by_parent_task(
    State(state): State<AppState>,
    RequestLocale(locale): RequestLocale,
    Path(parent_task): Path<String>,
) -> ApiResult<Vec<TaskView>> {
    respond(state.service.list_by_parent_task(&parent_task), locale)
}

/// POST /addTask
pub async fn add_task(
    State(state): State<AppState>,
    RequestLocale(locale): RequestLocale,
    Json(request): Json<TaskRequest>,
) -> ApiResult<KeyValue> {
    let added = state
        .service
        .add(&request)
        .map_err(|e| ApiError::new(e, locale))?;
    debug!(task_id = %added.task.task_id, "added via api");
    Ok(message(locale, added.message_key(), &[]))
}

/// PUT /updateTask
pub async fn update_task(
    State(state): State<AppState>,
    RequestLocale(locale): RequestLocale,
    Json(request): Json<TaskRequest>,
) -> ApiResult<KeyValue> {
    let outcome = state
        .service
        .update(&request)
        .map_err(|e| ApiError::new(e, locale))?;
    Ok(message(locale, outcome.message_key(), &[]))
}

/// PUT /endTask/{taskId}
pub async fn end_task(
    State(state): State<AppState>,
    RequestLocale(locale): RequestLocale,
    Path(task_id): Path<String>,
) -> ApiResult<KeyValue> {
    let outcome = state
        .service
        .end_task(&task_id)
        .map_err(|e| ApiError::new(e, locale))?;
    let args = match outcome {
        EndOutcome::NotFound(id) => vec![id.to_string()],
        EndOutcome::Updated(_) => Vec::new(),
    };
    Ok(message(locale, outcome.message_key(), &args))
}

/// POST /search
pub async fn search(
    State(state): State<AppState>,
    RequestLocale(locale): RequestLocale,
    Json(filter): Json<TaskFilter>,
) -> ApiResult<Vec<TaskView>> {
    respond(state.service.search(&filter), locale)
}

/// GET /i18nMessages
pub async fn i18n_messages(RequestLocale(locale): RequestLocale) -> Json<Vec<KeyValue>> {
    Json(messages::bundle(locale))
}
