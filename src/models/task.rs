use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Default number of tasks per page when `limit` is absent, unparseable, or
/// out of range.
pub const DEFAULT_PAGE_SIZE: i64 = 5;

/// Largest accepted page size; anything above it falls back to the default.
pub const MAX_PAGE_SIZE: i64 = 100;

/// Represents the status of a task.
/// Corresponds to the `task_status` SQL enum.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "task_status")]
pub enum TaskStatus {
    /// Task is yet to be completed.
    Pending,
    /// Task is done.
    Completed,
}

impl Default for TaskStatus {
    fn default() -> Self {
        TaskStatus::Pending
    }
}

impl TaskStatus {
    /// The opposite status, used by the toggle endpoint.
    pub fn toggled(self) -> Self {
        match self {
            TaskStatus::Pending => TaskStatus::Completed,
            TaskStatus::Completed => TaskStatus::Pending,
        }
    }
}

/// Represents a task entity as stored in the database and returned by the API.
#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct Task {
    /// Unique identifier for the task (UUID v4).
    pub id: Uuid,
    /// The title of the task.
    pub title: String,
    /// An optional description for the task.
    pub description: Option<String>,
    /// The current status of the task.
    pub status: TaskStatus,
    /// Identifier of the user who owns the task; set at creation, immutable after.
    pub created_by: Uuid,
    /// Timestamp of when the task was created.
    pub created_at: DateTime<Utc>,
    /// Timestamp of the last update to the task.
    pub updated_at: DateTime<Utc>,
}

/// Input structure for creating or updating a task.
/// Contains validation rules for its fields.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct TaskInput {
    /// The title of the task.
    /// Must be between 1 and 200 characters.
    #[validate(length(min = 1, max = 200))]
    pub title: String,

    /// An optional description for the task.
    /// Maximum length of 1000 characters if provided.
    #[validate(length(max = 1000))]
    pub description: Option<String>,

    /// The status of the task. Defaults to `Pending` on creation; on update,
    /// leaving it out keeps the stored status.
    pub status: Option<TaskStatus>,
}

/// Pagination query parameters for the task list endpoint.
///
/// The raw values are kept as strings so that non-numeric input falls back to
/// the defaults (page 1, page size 5) instead of rejecting the request.
#[derive(Debug, Deserialize)]
pub struct TaskListQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl TaskListQuery {
    /// 1-indexed page number; anything unparseable or below 1 becomes 1.
    pub fn page(&self) -> i64 {
        self.page
            .as_deref()
            .and_then(|p| p.parse::<i64>().ok())
            .filter(|p| *p >= 1)
            .unwrap_or(1)
    }

    /// Page size, bounded to `1..=MAX_PAGE_SIZE`; anything else becomes the
    /// default.
    pub fn limit(&self) -> i64 {
        self.limit
            .as_deref()
            .and_then(|l| l.parse::<i64>().ok())
            .filter(|l| (1..=MAX_PAGE_SIZE).contains(l))
            .unwrap_or(DEFAULT_PAGE_SIZE)
    }
}

/// Response body for the paginated task list.
#[derive(Debug, Serialize, Deserialize)]
pub struct TaskListResponse {
    pub tasks: Vec<Task>,
    pub total: i64,
    pub current_page: i64,
    pub total_pages: i64,
}

/// Total page count: `ceil(total / limit)`.
///
/// Computed as quotient-plus-remainder so that no `limit` a caller can
/// produce overflows the addition.
pub fn total_pages(total: i64, limit: i64) -> i64 {
    total / limit + (total % limit != 0) as i64
}
