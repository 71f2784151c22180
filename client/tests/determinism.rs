//! Property tests for the root reducer
//!
//! The reducer is a pure fold: replaying the same actions from the same
//! state gives the same state, and stale fetch results never land.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic

use chrono::{Duration as Days, NaiveDate, TimeZone, Utc};
use proptest::prelude::*;
use std::sync::Arc;
use taskboard_client::actions::{self, AppAction, TasksAction};
use taskboard_client::config::SyncConfig;
use taskboard_client::session_storage::InMemorySessionStorage;
use taskboard_client::types::{
    Category, FilterStatus, PriorityLevel, RequestId, Task, TaskId, TaskState, Toast,
};
use taskboard_client::{AppReducer, AppState, ClientEnvironment, MockBackend};
use taskboard_core::reducer::Reducer;
use taskboard_testing::test_clock;

fn env() -> ClientEnvironment {
    ClientEnvironment::new(
        Arc::new(MockBackend::new()),
        Arc::new(InMemorySessionStorage::new()),
        &SyncConfig::default(),
    )
    .with_clock(test_clock())
}

fn task(id: i64, completed: bool) -> Task {
    let created = Utc.with_ymd_and_hms(2024, 12, 20, 8, 0, 0).unwrap();
    Task {
        id: TaskId::new(id),
        title: format!("Task {id}"),
        description: "Something".into(),
        due_date: created + Days::days(id),
        priority_level: PriorityLevel::Low,
        category: Category::Project,
        created_at: created,
        completed_at: completed.then_some(created + Days::days(1)),
        task_state: TaskState::Pending,
        is_edit_mode: false,
    }
}

fn status() -> impl Strategy<Value = FilterStatus> {
    prop_oneof![
        Just(FilterStatus::All),
        Just(FilterStatus::Complete),
        Just(FilterStatus::Incomplete),
    ]
}

fn priority() -> impl Strategy<Value = Option<PriorityLevel>> {
    prop_oneof![
        Just(None),
        Just(Some(PriorityLevel::Low)),
        Just(Some(PriorityLevel::Medium)),
        Just(Some(PriorityLevel::High)),
    ]
}

/// Actions that fold without a backend round trip
fn local_action() -> impl Strategy<Value = AppAction> {
    let leaf = prop_oneof![
        status().prop_map(actions::set_filter_status),
        priority().prop_map(actions::set_filter_priority),
        (1u32..28).prop_map(|d| actions::set_filter_due_date(NaiveDate::from_ymd_opt(2025, 1, d))),
        Just(actions::reset_filter()),
        "[a-z]{0,6}".prop_map(actions::set_search_query),
        "[a-z]{0,6}".prop_map(actions::search_input),
        any::<bool>().prop_map(actions::set_searching),
        any::<bool>().prop_map(actions::set_logged_in),
        any::<bool>().prop_map(actions::set_new_task_requested),
        (1i64..6, any::<bool>()).prop_map(|(id, on)| actions::set_edit_mode(TaskId::new(id), on)),
        "[a-z ]{1,12}".prop_map(|m| actions::enqueue_toast(Toast::success(m))),
        Just(actions::clear_toasts()),
        (1u32..5).prop_map(actions::change_page),
        (1i64..6, any::<bool>())
            .prop_map(|(id, done)| AppAction::Tasks(TasksAction::AddSucceeded(task(id, done)))),
        (1i64..6).prop_map(|id| AppAction::Tasks(TasksAction::DeleteSucceeded(TaskId::new(id)))),
    ];
    leaf.prop_recursive(2, 16, 4, |inner| {
        prop::collection::vec(inner, 0..4).prop_map(AppAction::Batch)
    })
}

fn replay(actions: &[AppAction]) -> AppState {
    let reducer = AppReducer::new();
    let env = env();
    let mut state = AppState::new(10);
    for action in actions {
        let _effects = reducer.reduce(&mut state, action.clone(), &env);
    }
    state
}

proptest! {
    #[test]
    fn replay_is_deterministic(actions in prop::collection::vec(local_action(), 0..24)) {
        prop_assert_eq!(replay(&actions), replay(&actions));
    }

    #[test]
    fn stale_results_never_land(
        actions in prop::collection::vec(local_action(), 0..12),
        pages in 1u32..9,
    ) {
        let reducer = AppReducer::new();
        let env = env();
        let mut state = AppState::new(10);
        for action in &actions {
            let _effects = reducer.reduce(&mut state, action.clone(), &env);
        }

        let before = state.tasks.clone();
        let stale = RequestId::default();
        let _effects = reducer.reduce(
            &mut state,
            AppAction::Batch(vec![
                AppAction::Tasks(TasksAction::LoadTasks { request: stale, items: vec![task(99, false)] }),
                actions::set_pager(stale, pages, pages),
            ]),
            &env,
        );

        if before.latest_fetch == stale {
            prop_assert_eq!(state.tasks.pager.pages, pages);
        } else {
            prop_assert_eq!(state.tasks, before);
        }
    }

    #[test]
    fn toasts_only_grow_until_cleared(messages in prop::collection::vec("[a-z]{1,8}", 1..10)) {
        let reducer = AppReducer::new();
        let env = env();
        let mut state = AppState::default();
        for (n, message) in messages.iter().enumerate() {
            let _effects = reducer.reduce(&mut state, AppAction::error_toast(message.clone()), &env);
            prop_assert_eq!(state.toasts.queue.len(), n + 1);
        }
        let expected_last = messages.last().map(Toast::error);
        prop_assert_eq!(state.toasts.last(), expected_last.as_ref());

        let _effects = reducer.reduce(&mut state, actions::clear_toasts(), &env);
        prop_assert!(state.toasts.queue.is_empty());
    }
}
