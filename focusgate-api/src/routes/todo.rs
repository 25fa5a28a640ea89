/// Todo list endpoints
///
/// # Endpoints
///
/// - `GET /todo` - List tasks (newest first) with the completion percentage
/// - `POST /todo` - Add a task
/// - `POST /todo/complete/:id` - Mark complete
/// - `POST /todo/undo/:id` - Mark incomplete
/// - `POST /todo/delete/:id` - Delete
///
/// The id-scoped mutations match rows by `(id, user_id)`; a mismatch
/// (unknown id or someone else's row) affects zero rows and redirects just
/// like a hit, revealing nothing about other users' data.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    routes::{redirect_with_notice, NoticeQuery},
};
use axum::{
    extract::{Path, Query, State},
    response::Redirect,
    Extension, Form, Json,
};
use focusgate_shared::{
    auth::session::Session,
    models::todo::{self, Todo, TodoError},
};
use serde::{Deserialize, Serialize};

/// Page payload for the todo list
#[derive(Debug, Serialize)]
pub struct TodoPage {
    /// Tasks, newest first
    pub todos: Vec<Todo>,

    /// Completion percentage, 0..=100
    pub progress: u8,

    /// Transient message from the previous redirect
    pub notice: Option<String>,
}

/// Add-task form
#[derive(Debug, Deserialize)]
pub struct AddTaskForm {
    /// Task text, trimmed and validated by the model
    #[serde(default)]
    pub task: String,
}

/// Renders the todo list
pub async fn todo_page(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Query(query): Query<NoticeQuery>,
) -> ApiResult<Json<TodoPage>> {
    let user_id = session.user_id().ok_or(ApiError::AuthRequired)?;

    let todos = Todo::list(&state.db, user_id).await?;
    let progress = todo::progress(&todos);

    Ok(Json(TodoPage {
        todos,
        progress,
        notice: query.notice,
    }))
}

/// Adds a task to the caller's list
pub async fn add_task(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Form(form): Form<AddTaskForm>,
) -> ApiResult<axum::response::Response> {
    let user_id = session.user_id().ok_or(ApiError::AuthRequired)?;

    let notice = match Todo::add(&state.db, user_id, &form.task).await {
        Ok(_) => "Task added successfully!",
        Err(TodoError::TooShort) => "Please enter a valid task (at least 3 characters).",
        Err(TodoError::Duplicate) => "Task already exists in your list.",
        Err(TodoError::Database(e)) => return Err(e.into()),
    };

    Ok(redirect_with_notice("/todo", notice))
}

/// Marks a task complete
pub async fn complete_task(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(id): Path<i64>,
) -> ApiResult<Redirect> {
    let user_id = session.user_id().ok_or(ApiError::AuthRequired)?;

    Todo::complete(&state.db, id, user_id).await?;
    Ok(Redirect::to("/todo"))
}

/// Marks a task incomplete
pub async fn undo_task(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(id): Path<i64>,
) -> ApiResult<Redirect> {
    let user_id = session.user_id().ok_or(ApiError::AuthRequired)?;

    Todo::undo(&state.db, id, user_id).await?;
    Ok(Redirect::to("/todo"))
}

/// Deletes a task
pub async fn delete_task(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(id): Path<i64>,
) -> ApiResult<Redirect> {
    let user_id = session.user_id().ok_or(ApiError::AuthRequired)?;

    Todo::delete(&state.db, id, user_id).await?;
    Ok(Redirect::to("/todo"))
}
