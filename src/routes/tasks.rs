use crate::{
    auth::{authorize_task_action, Identity, TaskAction},
    error::AppError,
    models::{task::total_pages, TaskInput, TaskListQuery, TaskListResponse},
    store::TaskStore,
};
use actix_web::{delete, get, patch, post, put, web, HttpResponse, Responder};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

/// Creates a new task owned by the authenticated identity.
///
/// Any authenticated identity may create tasks; ownership is assigned to the
/// creator and never changes afterwards.
///
/// ## Responses:
/// - `201 Created`: the new task as JSON.
/// - `400 Bad Request`: input validation failed.
/// - `401/403`: missing or invalid bearer token.
#[post("")]
pub async fn create_task(
    pool: web::Data<PgPool>,
    task_data: web::Json<TaskInput>,
    identity: Identity,
) -> Result<impl Responder, AppError> {
    // Validate input
    task_data.validate()?;

    let task = TaskStore::new(&pool)
        .create(identity.user_id, task_data.into_inner())
        .await?;

    Ok(HttpResponse::Created().json(task))
}

/// Paginated task list, scoped by role.
///
/// Admins see every task; other identities only the tasks they own. Tasks are
/// ordered newest-first.
///
/// ## Query Parameters:
/// - `page` (optional): 1-indexed page number, default 1.
/// - `limit` (optional): page size, default 5.
///
/// Non-numeric values fall back to the defaults rather than failing the
/// request.
///
/// ## Responses:
/// - `200 OK`: `{tasks, total, current_page, total_pages}`.
/// - `401/403`: missing or invalid bearer token.
#[get("")]
pub async fn list_tasks(
    pool: web::Data<PgPool>,
    query: web::Query<TaskListQuery>,
    identity: Identity,
) -> Result<impl Responder, AppError> {
    let page = query.page();
    let limit = query.limit();

    let (tasks, total) = TaskStore::new(&pool).list(&identity, page, limit).await?;

    Ok(HttpResponse::Ok().json(TaskListResponse {
        tasks,
        total,
        current_page: page,
        total_pages: total_pages(total, limit),
    }))
}

/// Updates an existing task.
///
/// The task must exist (404 otherwise, regardless of role) and the caller
/// must be its owner or an admin.
///
/// ## Responses:
/// - `200 OK`: the updated task as JSON.
/// - `403 Forbidden`: caller is neither owner nor admin.
/// - `404 Not Found`: no task with that id.
#[put("/{id}")]
pub async fn update_task(
    pool: web::Data<PgPool>,
    task_id: web::Path<Uuid>,
    task_data: web::Json<TaskInput>,
    identity: Identity,
) -> Result<impl Responder, AppError> {
    task_data.validate()?;

    let store = TaskStore::new(&pool);
    let task = store
        .find_by_id(*task_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Task not found".into()))?;

    authorize_task_action(&identity, task.created_by, TaskAction::Update)?;

    let updated = store.update(task.id, task_data.into_inner()).await?;
    Ok(HttpResponse::Ok().json(updated))
}

/// Flips a task between `Pending` and `Completed`.
///
/// Same authorization rule as update: owner or admin.
#[patch("/{id}/toggle-status")]
pub async fn toggle_task_status(
    pool: web::Data<PgPool>,
    task_id: web::Path<Uuid>,
    identity: Identity,
) -> Result<impl Responder, AppError> {
    let store = TaskStore::new(&pool);
    let task = store
        .find_by_id(*task_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Task not found".into()))?;

    authorize_task_action(&identity, task.created_by, TaskAction::ToggleStatus)?;

    let task = store.set_status(task.id, task.status.toggled()).await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Task status updated successfully",
        "task": task
    })))
}

/// Deletes a task. Admin only; owners cannot delete their own tasks.
///
/// Existence is checked first, so a missing task is 404 for every role.
#[delete("/{id}")]
pub async fn delete_task(
    pool: web::Data<PgPool>,
    task_id: web::Path<Uuid>,
    identity: Identity,
) -> Result<impl Responder, AppError> {
    let store = TaskStore::new(&pool);
    let task = store
        .find_by_id(*task_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Task not found".into()))?;

    authorize_task_action(&identity, task.created_by, TaskAction::Delete)?;

    store.delete(task.id).await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Task deleted"
    })))
}
