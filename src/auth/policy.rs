//! Authorization policy for task records, defined once so every handler
//! applies the same rule.
//!
//! Admins may do anything. Owners may update and toggle their own tasks.
//! Deletion is admin-only. Creation and listing never reach this module:
//! creation is unconditional and list scoping happens in the repository query.

use crate::auth::extractors::Identity;
use crate::error::AppError;
use uuid::Uuid;

/// Action an identity wants to perform on an existing task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskAction {
    Update,
    ToggleStatus,
    Delete,
}

/// Decides whether `identity` may perform `action` on a task owned by `owner`.
///
/// Callers must resolve the task first: a missing task is `NotFound`
/// regardless of role, so existence is checked before authorization.
pub fn authorize_task_action(
    identity: &Identity,
    owner: Uuid,
    action: TaskAction,
) -> Result<(), AppError> {
    if identity.is_admin() {
        return Ok(());
    }

    match action {
        TaskAction::Delete => Err(AppError::Forbidden("Access denied".into())),
        TaskAction::Update | TaskAction::ToggleStatus => {
            if identity.user_id == owner {
                Ok(())
            } else {
                Err(AppError::Forbidden(
                    "You don't have permission to update this task".into(),
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;

    fn identity(user_id: Uuid, role: Role) -> Identity {
        Identity { user_id, role }
    }

    #[test]
    fn test_owner_may_update_and_toggle_but_not_delete() {
        let owner_id = Uuid::new_v4();
        let owner = identity(owner_id, Role::User);

        assert!(authorize_task_action(&owner, owner_id, TaskAction::Update).is_ok());
        assert!(authorize_task_action(&owner, owner_id, TaskAction::ToggleStatus).is_ok());
        assert!(matches!(
            authorize_task_action(&owner, owner_id, TaskAction::Delete),
            Err(AppError::Forbidden(_))
        ));
    }

    #[test]
    fn test_non_owner_is_forbidden() {
        let owner_id = Uuid::new_v4();
        let stranger = identity(Uuid::new_v4(), Role::User);

        for action in [TaskAction::Update, TaskAction::ToggleStatus, TaskAction::Delete] {
            assert!(
                matches!(
                    authorize_task_action(&stranger, owner_id, action),
                    Err(AppError::Forbidden(_))
                ),
                "non-owner should be forbidden for {:?}",
                action
            );
        }
    }

    #[test]
    fn test_admin_may_do_everything() {
        let owner_id = Uuid::new_v4();
        let admin = identity(Uuid::new_v4(), Role::Admin);

        for action in [TaskAction::Update, TaskAction::ToggleStatus, TaskAction::Delete] {
            assert!(
                authorize_task_action(&admin, owner_id, action).is_ok(),
                "admin should be allowed for {:?}",
                action
            );
        }
    }
}
