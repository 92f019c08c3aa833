pub mod task;
pub mod user;

pub use task::{Task, TaskInput, TaskListQuery, TaskListResponse, TaskStatus};
pub use user::{Role, User, UserProfile};
