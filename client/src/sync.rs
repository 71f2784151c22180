//! Remote sync adapter.
//!
//! Turns a [`RemoteIntent`] into exactly one backend call and the call's
//! outcome into exactly one terminal action. Successes that touch several
//! slices come back as one [`AppAction::Batch`]; every failure becomes an
//! error toast. Nothing is retried.
//!
//! Task-list fetches carry a [`RequestId`]: issuing one makes it the latest,
//! and the tasks reducer drops results of any earlier fetch.

use crate::actions::{
    AdminAction, AppAction, RemoteIntent, SearchAction, SessionAction, TasksAction,
};
use crate::api::{ApiError, BackendApi};
use crate::environment::ClientEnvironment;
use crate::reducers::AppState;
use crate::types::TaskQuery;
use crate::view::filter_to_status_param;
use metrics::{Unit, counter, describe_counter};
use std::future::Future;
use std::sync::Arc;
use taskboard_core::effect::{Effect, EffectId};
use taskboard_core::{SmallVec, cancellable, delay, reducer::Reducer, smallvec};
use tracing::{debug, warn};

/// Id of the pending search debounce timer
pub const SEARCH_DEBOUNCE: EffectId = EffectId::new("search-debounce");

/// Describe the sync adapter's metrics
pub fn register_metrics() {
    describe_counter!(
        "client.remote.calls",
        Unit::Count,
        "Backend calls issued, labelled by operation"
    );
    describe_counter!(
        "client.remote.failures",
        Unit::Count,
        "Backend calls that ended in an error toast, labelled by operation"
    );
}

/// Query for `page` built from the current filter, search and pager size
#[must_use]
pub fn query_for(state: &AppState, page: u32) -> TaskQuery {
    let search = state.search.query.trim();
    TaskQuery {
        search_query: (!search.is_empty()).then(|| search.to_string()),
        page: page.max(1),
        size: state.tasks.pager.size,
        status: filter_to_status_param(state.filter.status),
        priority_level: state.filter.priority,
        due_date: state.filter.due_date,
    }
}

/// Issue a task-list fetch, making it the latest
///
/// The result lands as one batch of `LoadTasks` and `SetPager` tagged with
/// the new request id.
pub fn issue_fetch(state: &mut AppState, query: TaskQuery, env: &ClientEnvironment) -> Effect<AppAction> {
    let request = state.tasks.latest_fetch.next();
    state.tasks.latest_fetch = request;
    debug!(%request, page = query.page, "Issuing task fetch");

    let api = Arc::clone(&env.api);
    remote_call(
        "fetch_tasks",
        async move { api.fetch_tasks(query).await },
        move |page| {
            AppAction::Batch(vec![
                AppAction::Tasks(TasksAction::LoadTasks {
                    request,
                    items: page.items,
                }),
                AppAction::Tasks(TasksAction::SetPager {
                    request,
                    page: page.page,
                    pages: page.pages,
                }),
            ])
        },
        |_| AppAction::error_toast("Failed to load tasks"),
    )
}

/// Wrap one backend call as an effect producing one terminal action
fn remote_call<T, Fut, OnOk, OnErr>(
    operation: &'static str,
    call: Fut,
    on_ok: OnOk,
    on_err: OnErr,
) -> Effect<AppAction>
where
    T: Send + 'static,
    Fut: Future<Output = Result<T, ApiError>> + Send + 'static,
    OnOk: FnOnce(T) -> AppAction + Send + 'static,
    OnErr: FnOnce(&ApiError) -> AppAction + Send + 'static,
{
    Effect::Future(Box::pin(async move {
        counter!("client.remote.calls", "operation" => operation).increment(1);
        match call.await {
            Ok(value) => Some(on_ok(value)),
            Err(error) => {
                warn!(operation, error = %error, "Remote call failed");
                counter!("client.remote.failures", "operation" => operation).increment(1);
                Some(on_err(&error))
            },
        }
    }))
}

/// Success batch: the slice update plus a success toast
fn with_toast(action: AppAction, message: &str) -> AppAction {
    AppAction::Batch(vec![action, AppAction::success_toast(message)])
}

fn failure(message: &'static str) -> impl FnOnce(&ApiError) -> AppAction + Send + 'static {
    move |_| AppAction::error_toast(message)
}

fn failure_with_detail(fallback: &'static str) -> impl FnOnce(&ApiError) -> AppAction + Send + 'static {
    move |error| AppAction::error_toast(error.user_message(fallback))
}

/// Reducer for remote intents, search keystrokes and page changes
#[derive(Clone, Debug, Default)]
pub struct SyncReducer;

impl SyncReducer {
    /// Create the reducer
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    #[allow(clippy::too_many_lines)] // one arm per endpoint
    fn remote(
        state: &mut AppState,
        intent: RemoteIntent,
        env: &ClientEnvironment,
    ) -> Effect<AppAction> {
        let api: Arc<dyn BackendApi> = Arc::clone(&env.api);

        match intent {
            RemoteIntent::FetchTasks(query) => {
                let query = TaskQuery {
                    page: query.page.max(1),
                    size: state.tasks.pager.size,
                    ..query
                };
                issue_fetch(state, query, env)
            },

            RemoteIntent::AddTask(task) => remote_call(
                "add_task",
                async move { api.add_task(task).await },
                |task| {
                    with_toast(
                        AppAction::Tasks(TasksAction::AddSucceeded(task)),
                        "Task added successfully",
                    )
                },
                failure("Failed to add task"),
            ),

            RemoteIntent::EditTask { id, changes } => remote_call(
                "edit_task",
                async move { api.edit_task(id, changes).await },
                |task| {
                    with_toast(
                        AppAction::Tasks(TasksAction::EditSucceeded(task)),
                        "Task updated successfully",
                    )
                },
                failure_with_detail("Failed to update task"),
            ),

            RemoteIntent::DeleteTask(id) => remote_call(
                "delete_task",
                async move { api.delete_task(id).await },
                move |()| {
                    with_toast(
                        AppAction::Tasks(TasksAction::DeleteSucceeded(id)),
                        "Task deleted",
                    )
                },
                failure("Failed to delete task"),
            ),

            RemoteIntent::CompleteTask(id) => remote_call(
                "complete_task",
                async move { api.complete_task(id).await },
                |task| {
                    with_toast(
                        AppAction::Tasks(TasksAction::CompleteSucceeded(task)),
                        "Task completed",
                    )
                },
                failure("Failed to update task"),
            ),

            RemoteIntent::FetchProfile => remote_call(
                "fetch_profile",
                async move { api.fetch_profile().await },
                |profile| {
                    AppAction::Batch(vec![
                        AppAction::Session(SessionAction::SetProfile(profile)),
                        AppAction::Session(SessionAction::SetLoggedIn(true)),
                    ])
                },
                |_| {
                    AppAction::Batch(vec![
                        AppAction::Session(SessionAction::SetLoggedIn(false)),
                        AppAction::error_toast("Session expired, please sign in"),
                    ])
                },
            ),

            RemoteIntent::Logout => {
                let session = Arc::clone(&env.session);
                remote_call(
                    "logout",
                    async move {
                        api.logout().await?;
                        session.clear_profile();
                        Ok::<_, ApiError>(())
                    },
                    |()| AppAction::Session(SessionAction::SetLoggedIn(false)),
                    failure("Failed to log out"),
                )
            },

            RemoteIntent::SignIn(credentials) => {
                let session = Arc::clone(&env.session);
                remote_call(
                    "sign_in",
                    async move {
                        let profile = api.sign_in(credentials).await?;
                        session.store_profile(&profile);
                        Ok::<_, ApiError>(profile)
                    },
                    |profile| {
                        AppAction::Batch(vec![
                            AppAction::Session(SessionAction::SetProfile(profile)),
                            AppAction::Session(SessionAction::SetLoggedIn(true)),
                        ])
                    },
                    failure("Invalid credentials"),
                )
            },

            RemoteIntent::SignUp(registration) => remote_call(
                "sign_up",
                async move { api.sign_up(registration).await },
                |()| AppAction::success_toast("Account created successfully"),
                failure_with_detail("Failed to create account"),
            ),

            RemoteIntent::SendResetLink { email } => remote_call(
                "send_reset_link",
                async move { api.send_reset_link(email).await },
                |()| AppAction::success_toast("Password reset link sent"),
                failure("Failed to send reset email"),
            ),

            RemoteIntent::ResetPassword {
                token,
                new_password,
            } => remote_call(
                "reset_password",
                async move { api.reset_password(token, new_password).await },
                |()| AppAction::success_toast("Password reset successfully"),
                failure_with_detail("Failed to reset password"),
            ),

            RemoteIntent::ChangePassword {
                old_password,
                new_password,
            } => remote_call(
                "change_password",
                async move { api.change_password(old_password, new_password).await },
                |()| AppAction::success_toast("Password changed successfully"),
                failure_with_detail("Failed to change password"),
            ),

            RemoteIntent::UpdateProfile(update) => remote_call(
                "update_profile",
                async move { api.update_profile(update).await },
                |profile| {
                    with_toast(
                        AppAction::Session(SessionAction::SetProfile(profile)),
                        "Profile updated successfully",
                    )
                },
                failure("Failed to update profile"),
            ),

            RemoteIntent::FetchUsers => remote_call(
                "fetch_users",
                async move { api.fetch_users().await },
                |users| AppAction::Admin(AdminAction::UsersLoaded(users)),
                failure_with_detail("Failed to load users"),
            ),

            RemoteIntent::ActivateUser(id) => remote_call(
                "activate_user",
                async move { api.activate_user(id).await },
                move |()| with_toast(AppAction::Admin(AdminAction::UserActivated(id)), "User activated"),
                failure("Failed to activate user"),
            ),

            RemoteIntent::DeactivateUser(id) => remote_call(
                "deactivate_user",
                async move { api.deactivate_user(id).await },
                move |()| {
                    with_toast(AppAction::Admin(AdminAction::UserDeactivated(id)), "User deactivated")
                },
                failure("Failed to deactivate user"),
            ),

            RemoteIntent::DeleteUser(id) => remote_call(
                "delete_user",
                async move { api.delete_user(id).await },
                move |()| with_toast(AppAction::Admin(AdminAction::UserDeleted(id)), "User deleted"),
                failure("Failed to delete user"),
            ),
        }
    }
}

impl Reducer for SyncReducer {
    type State = AppState;
    type Action = AppAction;
    type Environment = ClientEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            AppAction::Remote(intent) => smallvec![Self::remote(state, intent, env)],

            AppAction::SearchInput(query) => {
                state.search.is_searching = true;
                smallvec![cancellable! {
                    id: SEARCH_DEBOUNCE,
                    effect: delay! {
                        duration: env.search_debounce,
                        action: AppAction::Batch(vec![
                            AppAction::Search(SearchAction::SetQuery(query)),
                            AppAction::Search(SearchAction::SetSearching(false)),
                        ])
                    }
                }]
            },

            AppAction::ChangePage(page) => {
                let query = query_for(state, page);
                smallvec![issue_fetch(state, query, env)]
            },

            _ => SmallVec::new(),
        }
    }
}
