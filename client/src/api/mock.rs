//! In-memory [`BackendApi`] for tests and offline demos

use super::{ApiError, ApiResult, BackendApi};
use crate::types::{
    Credentials, NewTask, Profile, ProfileUpdate, Registration, Task, TaskChanges, TaskId,
    TaskPage, TaskQuery, TaskState, User, UserId,
};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// Scriptable backend double
///
/// Task pages can be scripted per page number with an artificial latency;
/// unscripted pages are cut from the in-memory task list. Any operation can
/// be made to fail with [`MockBackend::fail`]. Every call is recorded as
/// `"<METHOD> <path>"`.
#[derive(Clone)]
pub struct MockBackend {
    inner: Arc<Mutex<MockState>>,
}

struct MockState {
    pages: HashMap<u32, (TaskPage, Duration)>,
    tasks: Vec<Task>,
    next_id: i64,
    profile: Profile,
    users: Vec<User>,
    failures: HashMap<&'static str, ApiError>,
    calls: Vec<String>,
    now: DateTime<Utc>,
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MockBackend {
    /// Empty backend: no tasks, empty profile, no users
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(MockState {
                pages: HashMap::new(),
                tasks: Vec::new(),
                next_id: 1,
                profile: Profile::default(),
                users: Vec::new(),
                failures: HashMap::new(),
                calls: Vec::new(),
                now: Utc::now(),
            })),
        }
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Serve `page` for requests of its page number after `delay`
    #[must_use]
    pub fn with_page(self, page: TaskPage, delay: Duration) -> Self {
        self.state().pages.insert(page.page, (page, delay));
        self
    }

    /// Seed the in-memory task list
    #[must_use]
    pub fn with_tasks(self, tasks: Vec<Task>) -> Self {
        {
            let mut state = self.state();
            state.next_id = tasks.iter().map(|t| t.id.get()).max().unwrap_or(0) + 1;
            state.tasks = tasks;
        }
        self
    }

    /// Profile returned by `fetch_profile` and `sign_in`
    #[must_use]
    pub fn with_profile(self, profile: Profile) -> Self {
        self.state().profile = profile;
        self
    }

    /// Users returned by `fetch_users`
    #[must_use]
    pub fn with_users(self, users: Vec<User>) -> Self {
        self.state().users = users;
        self
    }

    /// Timestamp used for `created_at`/`completed_at` of mutated tasks
    #[must_use]
    pub fn with_now(self, now: DateTime<Utc>) -> Self {
        self.state().now = now;
        self
    }

    /// Make every call of `operation` (e.g. `"add_task"`) fail with `error`
    pub fn fail(&self, operation: &'static str, error: ApiError) {
        self.state().failures.insert(operation, error);
    }

    /// Requests received so far, oldest first
    #[must_use]
    pub fn calls(&self) -> Vec<String> {
        self.state().calls.clone()
    }

    /// Current in-memory task list
    #[must_use]
    pub fn tasks(&self) -> Vec<Task> {
        self.state().tasks.clone()
    }

    /// Record the call and return the scripted failure, if any
    fn begin(&self, operation: &'static str, call: String) -> Result<(), ApiError> {
        let mut state = self.state();
        state.calls.push(call);
        match state.failures.get(operation) {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }

    fn run<T, F>(&self, operation: &'static str, call: String, f: F) -> ApiResult<'_, T>
    where
        T: Send + 'static,
        F: FnOnce(&mut MockState) -> Result<T, ApiError> + Send + 'static,
    {
        let result = self.begin(operation, call).and_then(|()| f(&mut *self.state()));
        Box::pin(async move { result })
    }
}

fn not_found(what: &str) -> ApiError {
    ApiError::Rejected {
        status: 404,
        detail: Some(format!("{what} not found")),
    }
}

fn query_string(query: &TaskQuery) -> String {
    query
        .to_query_pairs()
        .into_iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join("&")
}

impl BackendApi for MockBackend {
    fn fetch_tasks(&self, query: TaskQuery) -> ApiResult<'_, TaskPage> {
        let call = format!("GET /tasks?{}", query_string(&query));
        let begun = self.begin("fetch_tasks", call);
        let scripted = self.state().pages.get(&query.page).cloned();
        let inner = Arc::clone(&self.inner);

        Box::pin(async move {
            begun?;
            if let Some((page, delay)) = scripted {
                tokio::time::sleep(delay).await;
                return Ok(page);
            }

            let state = inner.lock().unwrap_or_else(PoisonError::into_inner);
            let size = query.size.max(1) as usize;
            let start = (query.page.max(1) as usize - 1) * size;
            let pages = state.tasks.len().div_ceil(size);
            Ok(TaskPage {
                items: state.tasks.iter().skip(start).take(size).cloned().collect(),
                page: query.page,
                pages: u32::try_from(pages).unwrap_or(u32::MAX),
            })
        })
    }

    fn add_task(&self, task: NewTask) -> ApiResult<'_, Task> {
        self.run("add_task", "POST /tasks".into(), move |state| {
            let created = Task {
                id: TaskId::new(state.next_id),
                title: task.title,
                description: task.description,
                due_date: task.due_date,
                priority_level: task.priority_level,
                category: task.category,
                created_at: state.now,
                completed_at: None,
                task_state: TaskState::Pending,
                is_edit_mode: false,
            };
            state.next_id += 1;
            state.tasks.push(created.clone());
            Ok(created)
        })
    }

    fn edit_task(&self, id: TaskId, changes: TaskChanges) -> ApiResult<'_, Task> {
        self.run("edit_task", format!("PUT /tasks/{id}"), move |state| {
            let task = state
                .tasks
                .iter_mut()
                .find(|t| t.id == id)
                .ok_or_else(|| not_found("Task"))?;
            if let Some(title) = changes.title {
                task.title = title;
            }
            if let Some(description) = changes.description {
                task.description = description;
            }
            if let Some(due_date) = changes.due_date {
                task.due_date = due_date;
            }
            if let Some(priority) = changes.priority_level {
                task.priority_level = priority;
            }
            if let Some(category) = changes.category {
                task.category = category;
            }
            Ok(task.clone())
        })
    }

    fn delete_task(&self, id: TaskId) -> ApiResult<'_, ()> {
        self.run("delete_task", format!("DELETE /tasks/{id}"), move |state| {
            let before = state.tasks.len();
            state.tasks.retain(|t| t.id != id);
            if state.tasks.len() == before {
                return Err(not_found("Task"));
            }
            Ok(())
        })
    }

    fn complete_task(&self, id: TaskId) -> ApiResult<'_, Task> {
        self.run("complete_task", format!("PUT /tasks/{id}/complete"), move |state| {
            let now = state.now;
            let task = state
                .tasks
                .iter_mut()
                .find(|t| t.id == id)
                .ok_or_else(|| not_found("Task"))?;
            task.completed_at = Some(now);
            Ok(task.clone())
        })
    }

    fn fetch_profile(&self) -> ApiResult<'_, Profile> {
        self.run("fetch_profile", "GET /auth/profile".into(), |state| {
            Ok(state.profile.clone())
        })
    }

    fn logout(&self) -> ApiResult<'_, ()> {
        self.run("logout", "GET /auth/logout".into(), |_| Ok(()))
    }

    fn sign_in(&self, credentials: Credentials) -> ApiResult<'_, Profile> {
        self.run("sign_in", "POST /auth/login".into(), move |state| {
            if credentials.password.is_empty() {
                return Err(ApiError::Rejected {
                    status: 401,
                    detail: Some("Incorrect username or password".into()),
                });
            }
            Ok(state.profile.clone())
        })
    }

    fn sign_up(&self, _registration: Registration) -> ApiResult<'_, ()> {
        self.run("sign_up", "POST /auth/register".into(), |_| Ok(()))
    }

    fn send_reset_link(&self, _email: String) -> ApiResult<'_, ()> {
        self.run(
            "send_reset_link",
            "POST /auth/send-password-reset-link".into(),
            |_| Ok(()),
        )
    }

    fn reset_password(&self, token: String, _new_password: String) -> ApiResult<'_, ()> {
        self.run(
            "reset_password",
            format!("POST /auth/reset-password?token={token}"),
            |_| Ok(()),
        )
    }

    fn change_password(&self, _old_password: String, _new_password: String) -> ApiResult<'_, ()> {
        self.run("change_password", "POST /auth/change-password".into(), |_| Ok(()))
    }

    fn update_profile(&self, update: ProfileUpdate) -> ApiResult<'_, Profile> {
        self.run("update_profile", "POST /auth/update-profile".into(), move |state| {
            if let Some(username) = update.username {
                state.profile.username = username;
            }
            if let Some(full_name) = update.full_name {
                state.profile.full_name = full_name;
            }
            Ok(state.profile.clone())
        })
    }

    fn fetch_users(&self) -> ApiResult<'_, Vec<User>> {
        self.run("fetch_users", "GET /users".into(), |state| Ok(state.users.clone()))
    }

    fn activate_user(&self, id: UserId) -> ApiResult<'_, ()> {
        self.run("activate_user", format!("PUT /users/{id}/activate"), move |state| {
            let user = state
                .users
                .iter_mut()
                .find(|u| u.id == id)
                .ok_or_else(|| not_found("User"))?;
            user.is_active = true;
            Ok(())
        })
    }

    fn deactivate_user(&self, id: UserId) -> ApiResult<'_, ()> {
        self.run("deactivate_user", format!("PUT /users/{id}/deactivate"), move |state| {
            let user = state
                .users
                .iter_mut()
                .find(|u| u.id == id)
                .ok_or_else(|| not_found("User"))?;
            user.is_active = false;
            Ok(())
        })
    }

    fn delete_user(&self, id: UserId) -> ApiResult<'_, ()> {
        self.run("delete_user", format!("DELETE /users/{id}"), move |state| {
            let before = state.users.len();
            state.users.retain(|u| u.id != id);
            if state.users.len() == before {
                return Err(not_found("User"));
            }
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Category, PriorityLevel};

    fn new_task(title: &str) -> NewTask {
        NewTask {
            title: title.into(),
            description: "details".into(),
            due_date: Utc::now(),
            priority_level: PriorityLevel::Low,
            category: Category::Personal,
        }
    }

    #[tokio::test]
    async fn add_then_page_from_memory() {
        let backend = MockBackend::new();
        backend.add_task(new_task("a")).await.unwrap();
        backend.add_task(new_task("b")).await.unwrap();
        backend.add_task(new_task("c")).await.unwrap();

        let page = backend
            .fetch_tasks(TaskQuery {
                page: 2,
                size: 2,
                ..TaskQuery::default()
            })
            .await
            .unwrap();

        assert_eq!(page.pages, 2);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].title, "c");
        assert_eq!(page.items[0].id, TaskId::new(3));
        assert_eq!(
            backend.calls(),
            vec!["POST /tasks", "POST /tasks", "POST /tasks", "GET /tasks?page=2&size=2"]
        );
    }

    #[tokio::test]
    async fn scripted_failure() {
        let backend = MockBackend::new();
        backend.fail("delete_task", ApiError::Network("offline".into()));

        let result = backend.delete_task(TaskId::new(1)).await;
        assert_eq!(result, Err(ApiError::Network("offline".into())));
        assert_eq!(backend.calls(), vec!["DELETE /tasks/1"]);
    }

    #[tokio::test]
    async fn missing_task_is_404() {
        let backend = MockBackend::new();
        let error = backend.complete_task(TaskId::new(9)).await.unwrap_err();
        assert_eq!(error.status(), Some(404));
    }
}
