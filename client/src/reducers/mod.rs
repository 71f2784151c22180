//! State tree and the root reducer.
//!
//! Each slice has its own reducer, scoped into [`AppState`] with
//! `scope_reducer` and combined in a fixed order. The remote sync adapter
//! ([`SyncReducer`](crate::sync::SyncReducer)) runs last so it sees slices
//! already updated by the same action.

mod admin;
mod filter;
mod search;
mod session;
mod tasks;
mod toast;

pub use admin::{AdminReducer, AdminState};
pub use filter::{Filter, FilterReducer};
pub use search::{SearchReducer, SearchState};
pub use session::{SessionReducer, SessionState};
pub use tasks::{TasksReducer, TasksState};
pub use toast::{ToastReducer, ToastState};

use crate::actions::{
    AdminAction, AppAction, FilterAction, SearchAction, SessionAction, TasksAction, ToastAction,
};
use crate::environment::ClientEnvironment;
use crate::sync::{self, SyncReducer};
use std::sync::Arc;
use taskboard_core::composition::{BoxedReducer, CombinedReducer, combine_reducers, scope_reducer};
use taskboard_core::{SmallVec, effect::Effect, reducer::Reducer};

/// The whole client state
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AppState {
    /// Loaded tasks and pagination
    pub tasks: TasksState,
    /// Active filters
    pub filter: Filter,
    /// Search query
    pub search: SearchState,
    /// Session
    pub session: SessionState,
    /// Pending notifications
    pub toasts: ToastState,
    /// Admin panel
    pub admin: AdminState,
}

impl AppState {
    /// Initial state with the configured page size
    #[must_use]
    pub fn new(page_size: u32) -> Self {
        Self {
            tasks: TasksState::with_page_size(page_size),
            ..Self::default()
        }
    }
}

/// Inputs that shape the task-list query; a change triggers a refetch.
///
/// The search is compared trimmed, the way it is sent.
#[derive(PartialEq, Eq)]
struct QueryInputs {
    filter: Filter,
    search: String,
}

impl QueryInputs {
    fn of(state: &AppState) -> Self {
        Self {
            filter: state.filter,
            search: state.search.query.trim().to_owned(),
        }
    }
}

fn tasks_lens(state: &mut AppState) -> &mut TasksState {
    &mut state.tasks
}

fn filter_lens(state: &mut AppState) -> &mut Filter {
    &mut state.filter
}

fn search_lens(state: &mut AppState) -> &mut SearchState {
    &mut state.search
}

fn session_lens(state: &mut AppState) -> &mut SessionState {
    &mut state.session
}

fn toast_lens(state: &mut AppState) -> &mut ToastState {
    &mut state.toasts
}

fn admin_lens(state: &mut AppState) -> &mut AdminState {
    &mut state.admin
}

fn tasks_action(action: AppAction) -> Option<TasksAction> {
    match action {
        AppAction::Tasks(action) => Some(action),
        _ => None,
    }
}

fn filter_action(action: AppAction) -> Option<FilterAction> {
    match action {
        AppAction::Filter(action) => Some(action),
        _ => None,
    }
}

fn search_action(action: AppAction) -> Option<SearchAction> {
    match action {
        AppAction::Search(action) => Some(action),
        _ => None,
    }
}

fn session_action(action: AppAction) -> Option<SessionAction> {
    match action {
        AppAction::Session(action) => Some(action),
        _ => None,
    }
}

fn toast_action(action: AppAction) -> Option<ToastAction> {
    match action {
        AppAction::Toast(action) => Some(action),
        _ => None,
    }
}

fn admin_action(action: AppAction) -> Option<AdminAction> {
    match action {
        AppAction::Admin(action) => Some(action),
        _ => None,
    }
}

/// Root reducer of the client
///
/// Folds a [`AppAction::Batch`] element by element as a single fold, and
/// issues a page-1 fetch whenever the filter or the settled search query
/// changed.
#[derive(Clone)]
pub struct AppReducer {
    inner: Arc<CombinedReducer<AppState, AppAction, ClientEnvironment>>,
}

impl AppReducer {
    /// Compose the slice reducers and the sync adapter
    #[must_use]
    pub fn new() -> Self {
        let reducers: Vec<BoxedReducer<AppState, AppAction, ClientEnvironment>> = vec![
            Box::new(scope_reducer(TasksReducer::new(), tasks_lens, tasks_action, AppAction::Tasks)),
            Box::new(scope_reducer(FilterReducer::new(), filter_lens, filter_action, AppAction::Filter)),
            Box::new(scope_reducer(SearchReducer::new(), search_lens, search_action, AppAction::Search)),
            Box::new(scope_reducer(
                SessionReducer::new(),
                session_lens,
                session_action,
                AppAction::Session,
            )),
            Box::new(scope_reducer(ToastReducer::new(), toast_lens, toast_action, AppAction::Toast)),
            Box::new(scope_reducer(AdminReducer::new(), admin_lens, admin_action, AppAction::Admin)),
            Box::new(SyncReducer::new()),
        ];

        Self {
            inner: Arc::new(combine_reducers(reducers)),
        }
    }

    fn fold(
        &self,
        state: &mut AppState,
        action: AppAction,
        env: &ClientEnvironment,
    ) -> SmallVec<[Effect<AppAction>; 4]> {
        match action {
            AppAction::Batch(actions) => {
                let mut effects = SmallVec::new();
                for action in actions {
                    effects.extend(self.fold(state, action, env));
                }
                effects
            },
            action => self.inner.reduce(state, action, env),
        }
    }
}

impl Default for AppReducer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for AppReducer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppReducer")
            .field("reducers", &self.inner.len())
            .finish()
    }
}

impl Reducer for AppReducer {
    type State = AppState;
    type Action = AppAction;
    type Environment = ClientEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        let before = QueryInputs::of(state);
        let mut effects = self.fold(state, action, env);

        if QueryInputs::of(state) != before {
            tracing::debug!("Query inputs changed, refetching first page");
            let query = sync::query_for(state, 1);
            effects.push(sync::issue_fetch(state, query, env));
        }

        effects
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Test code can use unwrap
mod tests {
    use super::*;
    use crate::actions::{search_input, set_filter_priority, set_filter_status, set_search_query};
    use crate::api::MockBackend;
    use crate::session_storage::InMemorySessionStorage;
    use crate::types::{FilterStatus, PriorityLevel, RequestId};
    use taskboard_testing::{ReducerTest, assertions, test_clock};

    fn env() -> ClientEnvironment {
        ClientEnvironment::new(
            Arc::new(MockBackend::new()),
            Arc::new(InMemorySessionStorage::new()),
            &crate::config::SyncConfig::default(),
        )
        .with_clock(test_clock())
    }

    #[test]
    fn filter_change_issues_one_fetch() {
        ReducerTest::new(AppReducer::new())
            .with_env(env())
            .given_state(AppState::default())
            .when_action(set_filter_status(FilterStatus::Complete))
            .then_state(|state| {
                assert_eq!(state.filter.status, FilterStatus::Complete);
                assert_eq!(state.tasks.latest_fetch, RequestId::default().next());
            })
            .then_effects(|effects| {
                assertions::assert_effects_count(effects, 1);
                assertions::assert_has_future_effect(effects);
            })
            .run();
    }

    #[test]
    fn batch_refetches_once() {
        ReducerTest::new(AppReducer::new())
            .with_env(env())
            .given_state(AppState::default())
            .when_action(AppAction::Batch(vec![
                set_filter_status(FilterStatus::Incomplete),
                set_filter_priority(Some(PriorityLevel::High)),
            ]))
            .then_state(|state| {
                assert_eq!(state.filter.priority, Some(PriorityLevel::High));
                assert_eq!(state.tasks.latest_fetch, RequestId::default().next());
            })
            .then_effects(|effects| assertions::assert_effects_count(effects, 1))
            .run();
    }

    #[test]
    fn unchanged_filter_does_not_refetch() {
        ReducerTest::new(AppReducer::new())
            .with_env(env())
            .given_state(AppState::default())
            .when_action(set_filter_status(FilterStatus::All))
            .then_state(|state| assert_eq!(state.tasks.latest_fetch, RequestId::default()))
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn keystroke_does_not_refetch_until_settled() {
        ReducerTest::new(AppReducer::new())
            .with_env(env())
            .given_state(AppState::default())
            .when_action(search_input("mi"))
            .then_state(|state| {
                assert!(state.search.is_searching);
                assert_eq!(state.search.query, "");
                assert_eq!(state.tasks.latest_fetch, RequestId::default());
            })
            .then_effects(|effects| {
                assertions::assert_has_cancellable_effect(effects, sync::SEARCH_DEBOUNCE);
            })
            .run();
    }

    #[test]
    fn trailing_whitespace_does_not_refetch() {
        let mut state = AppState::default();
        state.search.query = "milk".into();

        ReducerTest::new(AppReducer::new())
            .with_env(env())
            .given_state(state)
            .when_action(set_search_query("milk "))
            .then_state(|state| {
                assert_eq!(state.search.query, "milk ");
                assert_eq!(state.tasks.latest_fetch, RequestId::default());
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn slices_ignore_foreign_actions() {
        let mut state = AppState::new(5);
        let before = state.clone();
        let effects = AppReducer::new().reduce(
            &mut state,
            AppAction::Admin(AdminAction::UserDeleted(crate::types::UserId::new(4))),
            &env(),
        );
        assert!(effects.is_empty());
        assert_eq!(state, before);
    }
}
