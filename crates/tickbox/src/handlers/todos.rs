use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    Json,
};

use tickbox_core::todo::{validate_create_request, CreateTodoRequest, Todo, UpdateTodoRequest};

use super::{error::AppError, response::ApiResponse};
use crate::state::AppState;

/// Extracts a strictly positive id; anything else is a 400.
fn todo_id(path: Result<Path<i64>, PathRejection>) -> Result<i64, AppError> {
    match path {
        Ok(Path(id)) if id > 0 => Ok(id),
        _ => Err(AppError::invalid_id()),
    }
}

fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    payload.map(|Json(body)| body).map_err(|rejection| {
        tracing::debug!(error = %rejection, "Rejected request body");
        AppError::invalid_body()
    })
}

/// Create a new todo (POST /api/v1/todos).
pub async fn create_todo(
    State(state): State<AppState>,
    payload: Result<Json<CreateTodoRequest>, JsonRejection>,
) -> Result<ApiResponse<Todo>, AppError> {
    let request = json_body(payload)?;
    validate_create_request(&request)?;

    let todo = state
        .todos
        .create(request)
        .await
        .map_err(|e| AppError::from_repository(e, "Failed to create todo"))?;

    tracing::info!(todo_id = todo.id, title = %todo.title, "Created todo");

    Ok(ApiResponse::created("Todo created successfully", todo))
}

/// List all todos, newest first (GET /api/v1/todos).
pub async fn list_todos(State(state): State<AppState>) -> Result<ApiResponse<Vec<Todo>>, AppError> {
    let todos = state
        .todos
        .list_all()
        .await
        .map_err(|e| AppError::from_repository(e, "Failed to retrieve todos"))?;

    Ok(ApiResponse::ok("Todos retrieved successfully", todos))
}

/// Get a single todo by ID (GET /api/v1/todos/{id}).
pub async fn get_todo(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<ApiResponse<Todo>, AppError> {
    let id = todo_id(id)?;

    let todo = state
        .todos
        .get_by_id(id)
        .await
        .map_err(|e| AppError::from_repository(e, "Failed to retrieve todo"))?;

    Ok(ApiResponse::ok("Todo found", todo))
}

/// Partially update a todo by ID (PUT /api/v1/todos/{id}).
pub async fn update_todo(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<UpdateTodoRequest>, JsonRejection>,
) -> Result<ApiResponse<Todo>, AppError> {
    let id = todo_id(id)?;
    let request = json_body(payload)?;

    let todo = state
        .todos
        .update(id, request)
        .await
        .map_err(|e| AppError::from_repository(e, "Failed to update todo"))?;

    tracing::info!(todo_id = id, "Updated todo");

    Ok(ApiResponse::ok("Todo updated successfully", todo))
}

/// Soft-delete a todo by ID (DELETE /api/v1/todos/{id}).
pub async fn delete_todo(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<ApiResponse<()>, AppError> {
    let id = todo_id(id)?;

    state
        .todos
        .delete(id)
        .await
        .map_err(|e| AppError::from_repository(e, "Failed to delete todo"))?;

    tracing::info!(todo_id = id, "Deleted todo");

    Ok(ApiResponse::message(
        axum::http::StatusCode::OK,
        "Todo deleted successfully",
    ))
}
