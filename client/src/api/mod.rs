//! The HTTP backend collaborator.
//!
//! [`BackendApi`] is the seam between the remote sync adapter and the
//! transport: each method performs exactly one request. [`HttpBackend`] talks
//! to the real service; [`MockBackend`] is a scriptable in-memory stand-in.

mod error;
mod http;
mod mock;

pub use error::ApiError;
pub use http::HttpBackend;
pub use mock::MockBackend;

use crate::types::{
    Credentials, NewTask, Profile, ProfileUpdate, Registration, Task, TaskChanges, TaskId,
    TaskPage, TaskQuery, User, UserId,
};
use futures::future::BoxFuture;

/// Result of a backend call
pub type ApiResult<'a, T> = BoxFuture<'a, Result<T, ApiError>>;

/// One method per remote endpoint
pub trait BackendApi: Send + Sync {
    /// `GET /tasks`
    fn fetch_tasks(&self, query: TaskQuery) -> ApiResult<'_, TaskPage>;

    /// `POST /tasks`
    fn add_task(&self, task: NewTask) -> ApiResult<'_, Task>;

    /// `PUT /tasks/{id}`
    fn edit_task(&self, id: TaskId, changes: TaskChanges) -> ApiResult<'_, Task>;

    /// `DELETE /tasks/{id}`
    fn delete_task(&self, id: TaskId) -> ApiResult<'_, ()>;

    /// `PUT /tasks/{id}/complete`
    fn complete_task(&self, id: TaskId) -> ApiResult<'_, Task>;

    /// `GET /auth/profile`
    fn fetch_profile(&self) -> ApiResult<'_, Profile>;

    /// `GET /auth/logout`
    fn logout(&self) -> ApiResult<'_, ()>;

    /// `POST /auth/login`, returning the signed-in user
    fn sign_in(&self, credentials: Credentials) -> ApiResult<'_, Profile>;

    /// `POST /auth/register`
    fn sign_up(&self, registration: Registration) -> ApiResult<'_, ()>;

    /// `POST /auth/send-password-reset-link`
    fn send_reset_link(&self, email: String) -> ApiResult<'_, ()>;

    /// `POST /auth/reset-password?token=`
    fn reset_password(&self, token: String, new_password: String) -> ApiResult<'_, ()>;

    /// `POST /auth/change-password`
    fn change_password(&self, old_password: String, new_password: String) -> ApiResult<'_, ()>;

    /// `POST /auth/update-profile`
    fn update_profile(&self, update: ProfileUpdate) -> ApiResult<'_, Profile>;

    /// `GET /users`
    fn fetch_users(&self) -> ApiResult<'_, Vec<User>>;

    /// `PUT /users/{id}/activate`
    fn activate_user(&self, id: UserId) -> ApiResult<'_, ()>;

    /// `PUT /users/{id}/deactivate`
    fn deactivate_user(&self, id: UserId) -> ApiResult<'_, ()>;

    /// `DELETE /users/{id}`
    fn delete_user(&self, id: UserId) -> ApiResult<'_, ()>;
}
