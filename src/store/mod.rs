pub mod tasks;
pub mod users;

pub use tasks::TaskStore;
pub use users::UserStore;

/// Postgres unique-violation SQLSTATE, used to map constraint hits to
/// `AppError::Conflict`.
pub(crate) fn is_unique_violation(error: &sqlx::Error) -> bool {
    matches!(
        error,
        sqlx::Error::Database(db) if db.code().as_deref() == Some("23505")
    )
}
