// rest/routes/todos.rs — the five task-list operations.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::rest::error::ApiError;
use crate::storage::TaskRow;
use crate::AppContext;

/// Reject identifiers that are not well-formed UUIDs before touching the
/// store, so garbage ids surface as 404 rather than an empty query.
fn validate_id(id: &str) -> Result<(), ApiError> {
    match Uuid::parse_str(id) {
        Ok(_) => Ok(()),
        Err(_) => Err(ApiError::NoSuchTodo),
    }
}

pub async fn list_todos(
    State(ctx): State<Arc<AppContext>>,
) -> Result<Json<Vec<TaskRow>>, ApiError> {
    let todos = ctx.store.list_todos().await.map_err(ApiError::ListQuery)?;
    Ok(Json(todos))
}

#[derive(Deserialize)]
pub struct CreateTodoRequest {
    pub text: String,
}

/// No presence/emptiness check on `text`: the client rejects blank input
/// before sending, and the server trusts that.
pub async fn create_todo(
    State(ctx): State<Arc<AppContext>>,
    Json(body): Json<CreateTodoRequest>,
) -> Result<Json<TaskRow>, ApiError> {
    let todo = ctx
        .store
        .create_todo(&body.text)
        .await
        .map_err(ApiError::Store)?;
    Ok(Json(todo))
}

#[derive(Deserialize)]
pub struct ToggleTodoRequest {
    pub completed: bool,
}

/// Overwrites `completed` with the client-supplied value; the client always
/// sends the negation of what it last saw, and the handler trusts it.
pub async fn toggle_todo(
    State(ctx): State<Arc<AppContext>>,
    Path(id): Path<String>,
    Json(body): Json<ToggleTodoRequest>,
) -> Result<Json<TaskRow>, ApiError> {
    validate_id(&id)?;
    match ctx
        .store
        .set_completed(&id, body.completed)
        .await
        .map_err(ApiError::Store)?
    {
        Some(todo) => Ok(Json(todo)),
        None => Err(ApiError::NoSuchTodo),
    }
}

#[derive(Deserialize)]
pub struct EditTodoRequest {
    pub text: String,
}

pub async fn edit_todo(
    State(ctx): State<Arc<AppContext>>,
    Path(id): Path<String>,
    Json(body): Json<EditTodoRequest>,
) -> Result<Json<TaskRow>, ApiError> {
    validate_id(&id)?;
    match ctx
        .store
        .set_text(&id, &body.text)
        .await
        .map_err(ApiError::Store)?
    {
        Some(todo) => Ok(Json(todo)),
        None => Err(ApiError::NoSuchTodo),
    }
}

/// Hard delete; responds with the record as it was before removal.
pub async fn delete_todo(
    State(ctx): State<Arc<AppContext>>,
    Path(id): Path<String>,
) -> Result<Json<TaskRow>, ApiError> {
    validate_id(&id)?;
    match ctx.store.delete_todo(&id).await.map_err(ApiError::Store)? {
        Some(todo) => Ok(Json(todo)),
        None => Err(ApiError::NoSuchTodo),
    }
}
