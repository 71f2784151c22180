//! Actions and action creators.
//!
//! Every slice owns a closed action enum; [`AppAction`] is the tree-level
//! action the store folds. Remote-backed operations are expressed as a
//! [`RemoteIntent`]: the reducer turns it into exactly one backend call whose
//! outcome comes back as one terminal action (a success batch or an error
//! toast).
//!
//! The free functions below are the action creators. They never touch state;
//! `add_task` and `edit_task` validate their text first and produce nothing
//! when validation fails.

use crate::types::{
    Credentials, FilterStatus, NewTask, PriorityLevel, Profile, ProfileUpdate, Registration,
    RequestId, Task, TaskChanges, TaskId, TaskQuery, Toast, User, UserId,
};
use crate::validation::{ValidationError, validate};
use chrono::NaiveDate;

/// Tasks slice actions
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TasksAction {
    /// A task was created by the backend
    AddSucceeded(Task),
    /// Replace the whole task list with the result of fetch `request`
    LoadTasks {
        /// Fetch the items belong to
        request: RequestId,
        /// Fetched tasks
        items: Vec<Task>,
    },
    /// A task was updated by the backend
    EditSucceeded(Task),
    /// A task was completed by the backend
    CompleteSucceeded(Task),
    /// A task was deleted by the backend
    DeleteSucceeded(TaskId),
    /// Toggle the local edit flag of one task
    SetEditMode {
        /// Task to toggle
        id: TaskId,
        /// New flag value
        is_edit_mode: bool,
    },
    /// Overwrite the pager with the pagination of fetch `request`
    SetPager {
        /// Fetch the pagination belongs to
        request: RequestId,
        /// Reported page
        page: u32,
        /// Reported page count
        pages: u32,
    },
    /// Show or hide the new-task form
    SetNewTaskRequested(bool),
}

/// Filter slice actions
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FilterAction {
    /// Set the status filter
    SetStatus(FilterStatus),
    /// Set or clear the priority filter
    SetPriority(Option<PriorityLevel>),
    /// Set or clear the due date filter
    SetDueDate(Option<NaiveDate>),
    /// Restore all filters to their defaults
    Reset,
}

/// Search slice actions
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchAction {
    /// Set the settled search query
    SetQuery(String),
    /// Mark a debounced query as pending or resolved
    SetSearching(bool),
}

/// Session slice actions
#[derive(Clone, Debug, PartialEq)]
pub enum SessionAction {
    /// Set the logged-in flag
    SetLoggedIn(bool),
    /// Set the profile
    SetProfile(Profile),
}

/// Toast slice actions
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ToastAction {
    /// Append a notification
    Enqueue(Toast),
    /// Drop every queued notification
    Clear,
}

/// Admin slice actions
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AdminAction {
    /// Replace the user list
    UsersLoaded(Vec<User>),
    /// A user was activated
    UserActivated(UserId),
    /// A user was deactivated
    UserDeactivated(UserId),
    /// A user was deleted
    UserDeleted(UserId),
}

/// Operations that need the backend
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RemoteIntent {
    /// `GET /tasks`
    FetchTasks(TaskQuery),
    /// `POST /tasks`
    AddTask(NewTask),
    /// `PUT /tasks/{id}`
    EditTask {
        /// Task to update
        id: TaskId,
        /// Fields to change
        changes: TaskChanges,
    },
    /// `DELETE /tasks/{id}`
    DeleteTask(TaskId),
    /// `PUT /tasks/{id}/complete`
    CompleteTask(TaskId),
    /// `GET /auth/profile`
    FetchProfile,
    /// `GET /auth/logout`
    Logout,
    /// `POST /auth/login`
    SignIn(Credentials),
    /// `POST /auth/register`
    SignUp(Registration),
    /// `POST /auth/send-password-reset-link`
    SendResetLink {
        /// Account email
        email: String,
    },
    /// `POST /auth/reset-password`
    ResetPassword {
        /// Token from the reset link
        token: String,
        /// Replacement password
        new_password: String,
    },
    /// `POST /auth/change-password`
    ChangePassword {
        /// Current password
        old_password: String,
        /// Replacement password
        new_password: String,
    },
    /// `POST /auth/update-profile`
    UpdateProfile(ProfileUpdate),
    /// `GET /users`
    FetchUsers,
    /// `PUT /users/{id}/activate`
    ActivateUser(UserId),
    /// `PUT /users/{id}/deactivate`
    DeactivateUser(UserId),
    /// `DELETE /users/{id}`
    DeleteUser(UserId),
}

/// Root action folded by the store
#[derive(Clone, Debug, PartialEq)]
pub enum AppAction {
    /// Tasks slice
    Tasks(TasksAction),
    /// Filter slice
    Filter(FilterAction),
    /// Search slice
    Search(SearchAction),
    /// Session slice
    Session(SessionAction),
    /// Toast slice
    Toast(ToastAction),
    /// Admin slice
    Admin(AdminAction),
    /// A backend operation
    Remote(RemoteIntent),
    /// A search keystroke, settled after the debounce window
    SearchInput(String),
    /// Fetch page `n` with the current filter and search
    ChangePage(u32),
    /// Several actions folded as one
    Batch(Vec<AppAction>),
}

impl AppAction {
    /// Shorthand for an error toast
    pub fn error_toast(message: impl Into<String>) -> Self {
        Self::Toast(ToastAction::Enqueue(Toast::error(message)))
    }

    /// Shorthand for a success toast
    pub fn success_toast(message: impl Into<String>) -> Self {
        Self::Toast(ToastAction::Enqueue(Toast::success(message)))
    }

    /// Whether this action concludes a remote intent
    ///
    /// Terminal actions are the ones effects feed back: a batch, an admin or
    /// session update, or a toast.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Batch(_)
                | Self::Toast(ToastAction::Enqueue(_))
                | Self::Session(_)
                | Self::Admin(AdminAction::UsersLoaded(_))
        )
    }
}

// ============================================================================
// Action creators
// ============================================================================

/// Create a task on the backend after validating its text
///
/// # Errors
///
/// Returns [`ValidationError`] if the title or description is blank
pub fn add_task(task: NewTask) -> Result<AppAction, ValidationError> {
    let task = NewTask {
        title: validate(&task.title)?,
        description: validate(&task.description)?,
        ..task
    };
    Ok(AppAction::Remote(RemoteIntent::AddTask(task)))
}

/// Update a task on the backend after validating any changed text
///
/// # Errors
///
/// Returns [`ValidationError`] if a provided title or description is blank
pub fn edit_task(id: TaskId, changes: TaskChanges) -> Result<AppAction, ValidationError> {
    let changes = TaskChanges {
        title: changes.title.as_deref().map(validate).transpose()?,
        description: changes.description.as_deref().map(validate).transpose()?,
        ..changes
    };
    Ok(AppAction::Remote(RemoteIntent::EditTask { id, changes }))
}

/// Delete a task
#[must_use]
pub const fn delete_task(id: TaskId) -> AppAction {
    AppAction::Remote(RemoteIntent::DeleteTask(id))
}

/// Mark a task completed
#[must_use]
pub const fn complete_task(id: TaskId) -> AppAction {
    AppAction::Remote(RemoteIntent::CompleteTask(id))
}

/// Fetch a page of tasks
///
/// The request size is always the pager's size.
#[must_use]
pub const fn fetch_tasks(query: TaskQuery) -> AppAction {
    AppAction::Remote(RemoteIntent::FetchTasks(query))
}

/// Fetch page `page` with the current filter and search
#[must_use]
pub const fn change_page(page: u32) -> AppAction {
    AppAction::ChangePage(page)
}

/// Toggle a task's local edit flag
#[must_use]
pub const fn set_edit_mode(id: TaskId, is_edit_mode: bool) -> AppAction {
    AppAction::Tasks(TasksAction::SetEditMode { id, is_edit_mode })
}

/// Show or hide the new-task form
#[must_use]
pub const fn set_new_task_requested(requested: bool) -> AppAction {
    AppAction::Tasks(TasksAction::SetNewTaskRequested(requested))
}

/// Overwrite the pager with the pagination of fetch `request`
#[must_use]
pub const fn set_pager(request: RequestId, page: u32, pages: u32) -> AppAction {
    AppAction::Tasks(TasksAction::SetPager {
        request,
        page,
        pages,
    })
}

/// Set the status filter
#[must_use]
pub const fn set_filter_status(status: FilterStatus) -> AppAction {
    AppAction::Filter(FilterAction::SetStatus(status))
}

/// Set or clear the priority filter
#[must_use]
pub const fn set_filter_priority(priority: Option<PriorityLevel>) -> AppAction {
    AppAction::Filter(FilterAction::SetPriority(priority))
}

/// Set or clear the due date filter
#[must_use]
pub const fn set_filter_due_date(due_date: Option<NaiveDate>) -> AppAction {
    AppAction::Filter(FilterAction::SetDueDate(due_date))
}

/// Restore every filter to its default
#[must_use]
pub const fn reset_filter() -> AppAction {
    AppAction::Filter(FilterAction::Reset)
}

/// Set the settled search query directly, bypassing the debounce
pub fn set_search_query(query: impl Into<String>) -> AppAction {
    AppAction::Search(SearchAction::SetQuery(query.into()))
}

/// Mark a debounced query as pending or resolved
#[must_use]
pub const fn set_searching(is_searching: bool) -> AppAction {
    AppAction::Search(SearchAction::SetSearching(is_searching))
}

/// A search keystroke; only the last one within the debounce window settles
pub fn search_input(query: impl Into<String>) -> AppAction {
    AppAction::SearchInput(query.into())
}

/// Set the logged-in flag
#[must_use]
pub const fn set_logged_in(is_logged_in: bool) -> AppAction {
    AppAction::Session(SessionAction::SetLoggedIn(is_logged_in))
}

/// Set the profile
#[must_use]
pub const fn set_profile(profile: Profile) -> AppAction {
    AppAction::Session(SessionAction::SetProfile(profile))
}

/// Queue a notification
#[must_use]
pub const fn enqueue_toast(toast: Toast) -> AppAction {
    AppAction::Toast(ToastAction::Enqueue(toast))
}

/// Dismiss all shown notifications (dispatched by the toast UI)
#[must_use]
pub const fn clear_toasts() -> AppAction {
    AppAction::Toast(ToastAction::Clear)
}

/// Check the session by loading the profile
#[must_use]
pub const fn fetch_profile() -> AppAction {
    AppAction::Remote(RemoteIntent::FetchProfile)
}

/// End the session
#[must_use]
pub const fn logout() -> AppAction {
    AppAction::Remote(RemoteIntent::Logout)
}

/// Sign in with email and password
pub fn sign_in(username: impl Into<String>, password: impl Into<String>) -> AppAction {
    AppAction::Remote(RemoteIntent::SignIn(Credentials {
        username: username.into(),
        password: password.into(),
    }))
}

/// Register a new account
#[must_use]
pub const fn sign_up(registration: Registration) -> AppAction {
    AppAction::Remote(RemoteIntent::SignUp(registration))
}

/// Email a password reset link
pub fn send_reset_link(email: impl Into<String>) -> AppAction {
    AppAction::Remote(RemoteIntent::SendResetLink {
        email: email.into(),
    })
}

/// Set a new password with a reset token
pub fn reset_password(token: impl Into<String>, new_password: impl Into<String>) -> AppAction {
    AppAction::Remote(RemoteIntent::ResetPassword {
        token: token.into(),
        new_password: new_password.into(),
    })
}

/// Change the signed-in user's password
pub fn change_password(
    old_password: impl Into<String>,
    new_password: impl Into<String>,
) -> AppAction {
    AppAction::Remote(RemoteIntent::ChangePassword {
        old_password: old_password.into(),
        new_password: new_password.into(),
    })
}

/// Update the signed-in user's profile
#[must_use]
pub const fn update_profile(update: ProfileUpdate) -> AppAction {
    AppAction::Remote(RemoteIntent::UpdateProfile(update))
}

/// Load all users (admin)
#[must_use]
pub const fn fetch_users() -> AppAction {
    AppAction::Remote(RemoteIntent::FetchUsers)
}

/// Activate a user (admin)
#[must_use]
pub const fn activate_user(id: UserId) -> AppAction {
    AppAction::Remote(RemoteIntent::ActivateUser(id))
}

/// Deactivate a user (admin)
#[must_use]
pub const fn deactivate_user(id: UserId) -> AppAction {
    AppAction::Remote(RemoteIntent::DeactivateUser(id))
}

/// Delete a user (admin)
#[must_use]
pub const fn delete_user(id: UserId) -> AppAction {
    AppAction::Remote(RemoteIntent::DeleteUser(id))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)] // Test code
mod tests {
    use super::*;
    use crate::types::{Category, PriorityLevel};
    use chrono::Utc;

    fn draft(title: &str, description: &str) -> NewTask {
        NewTask {
            title: title.into(),
            description: description.into(),
            due_date: Utc::now(),
            priority_level: PriorityLevel::High,
            category: Category::Project,
        }
    }

    #[test]
    fn add_task_sanitizes_text() {
        let action = add_task(draft(" <b>Ship</b> it ", "before friday")).unwrap();
        let AppAction::Remote(RemoteIntent::AddTask(task)) = action else {
            panic!("expected an add-task intent");
        };
        assert_eq!(task.title, "Ship it");
        assert_eq!(task.priority_level, PriorityLevel::High);
    }

    #[test]
    fn add_task_rejects_blank_description() {
        assert_eq!(add_task(draft("Ship it", "<br>")), Err(ValidationError));
    }

    #[test]
    fn edit_task_validates_only_given_fields() {
        let changes = TaskChanges {
            priority_level: Some(PriorityLevel::Low),
            ..TaskChanges::default()
        };
        assert!(edit_task(TaskId::new(1), changes).is_ok());

        let changes = TaskChanges {
            title: Some("   ".into()),
            ..TaskChanges::default()
        };
        assert_eq!(edit_task(TaskId::new(1), changes), Err(ValidationError));
    }

    #[test]
    fn creators_build_intents() {
        assert_eq!(
            sign_in("ada@example.com", "secret"),
            AppAction::Remote(RemoteIntent::SignIn(Credentials {
                username: "ada@example.com".into(),
                password: "secret".into(),
            }))
        );
        assert_eq!(
            reset_filter(),
            AppAction::Filter(FilterAction::Reset)
        );
        assert!(AppAction::error_toast("x").is_terminal());
        assert!(!delete_task(TaskId::new(3)).is_terminal());
    }
}
