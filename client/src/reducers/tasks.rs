//! Tasks slice: the loaded page of tasks and its pagination.

use crate::actions::TasksAction;
use crate::config::DEFAULT_PAGE_SIZE;
use crate::types::{Pager, RequestId, Task};
use crate::view::compute_task_state;
use std::marker::PhantomData;
use taskboard_core::{SmallVec, effect::Effect, environment::Clock, reducer::Reducer};
use tracing::debug;

/// State of the tasks slice
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TasksState {
    /// Tasks of the last applied fetch, with local updates applied
    pub items: Vec<Task>,
    /// Pagination of the last applied fetch
    pub pager: Pager,
    /// The most recently issued fetch; only its response is applied
    pub latest_fetch: RequestId,
    /// The new-task form is open
    pub is_new_task_requested: bool,
}

impl TasksState {
    /// Empty slice with the given page size
    #[must_use]
    pub fn with_page_size(size: u32) -> Self {
        Self {
            items: Vec::new(),
            pager: Pager::with_size(size),
            latest_fetch: RequestId::default(),
            is_new_task_requested: false,
        }
    }

    /// Task with the given id
    #[must_use]
    pub fn get(&self, id: crate::types::TaskId) -> Option<&Task> {
        self.items.iter().find(|t| t.id == id)
    }
}

impl Default for TasksState {
    fn default() -> Self {
        Self::with_page_size(DEFAULT_PAGE_SIZE)
    }
}

/// Reducer for the tasks slice
///
/// Uses the environment clock to derive each task's display state on ingest.
#[derive(Clone, Debug)]
pub struct TasksReducer<E> {
    _env: PhantomData<fn() -> E>,
}

impl<E> TasksReducer<E> {
    /// Create the reducer
    #[must_use]
    pub const fn new() -> Self {
        Self { _env: PhantomData }
    }
}

impl<E> Default for TasksReducer<E> {
    fn default() -> Self {
        Self::new()
    }
}

/// Replace the stored task with `updated`, keeping local-only flags.
///
/// Returns `updated` back when no task has its id.
fn merge(items: &mut [Task], updated: Task) -> Option<Task> {
    match items.iter_mut().find(|t| t.id == updated.id) {
        Some(task) => {
            let is_edit_mode = task.is_edit_mode;
            *task = Task {
                is_edit_mode,
                ..updated
            };
            None
        },
        None => Some(updated),
    }
}

impl<E: Clock> Reducer for TasksReducer<E> {
    type State = TasksState;
    type Action = TasksAction;
    type Environment = E;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        let now = env.now();

        match action {
            TasksAction::AddSucceeded(mut task) => {
                task.task_state = compute_task_state(&task, now);
                task.is_edit_mode = false;
                // A refetch may have delivered the task already
                if let Some(task) = merge(&mut state.items, task) {
                    state.items.push(task);
                }
                state.is_new_task_requested = false;
            },

            TasksAction::LoadTasks { request, items } => {
                if request != state.latest_fetch {
                    debug!(%request, latest = %state.latest_fetch, "Discarding stale task list");
                    return SmallVec::new();
                }
                state.items = items
                    .into_iter()
                    .map(|mut task| {
                        task.task_state = compute_task_state(&task, now);
                        task
                    })
                    .collect();
            },

            TasksAction::EditSucceeded(mut task) | TasksAction::CompleteSucceeded(mut task) => {
                task.task_state = compute_task_state(&task, now);
                if merge(&mut state.items, task).is_some() {
                    debug!("Updated task is not on the loaded page");
                }
            },

            TasksAction::DeleteSucceeded(id) => state.items.retain(|t| t.id != id),

            TasksAction::SetEditMode { id, is_edit_mode } => {
                if let Some(task) = state.items.iter_mut().find(|t| t.id == id) {
                    task.is_edit_mode = is_edit_mode;
                }
            },

            TasksAction::SetPager {
                request,
                page,
                pages,
            } => {
                if request != state.latest_fetch {
                    debug!(%request, latest = %state.latest_fetch, "Discarding stale pager");
                    return SmallVec::new();
                }
                state.pager.page = page;
                state.pager.pages = pages;
            },

            TasksAction::SetNewTaskRequested(requested) => {
                state.is_new_task_requested = requested;
            },
        }

        SmallVec::new()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Test code can use unwrap
mod tests {
    use super::*;
    use crate::types::{Category, PriorityLevel, TaskId, TaskState};
    use chrono::{Duration, TimeZone, Utc};
    use taskboard_testing::{FixedClock, ReducerTest, assertions, test_clock};

    fn task(id: i64) -> Task {
        let created = Utc.with_ymd_and_hms(2024, 12, 20, 9, 0, 0).unwrap();
        Task {
            id: TaskId::new(id),
            title: format!("Task {id}"),
            description: "details".into(),
            due_date: created + Duration::days(30),
            priority_level: PriorityLevel::Medium,
            category: Category::Personal,
            created_at: created,
            completed_at: None,
            task_state: TaskState::Pending,
            is_edit_mode: false,
        }
    }

    fn loaded(ids: &[i64]) -> TasksState {
        TasksState {
            items: ids.iter().copied().map(task).collect(),
            ..TasksState::default()
        }
    }

    fn reducer() -> TasksReducer<FixedClock> {
        TasksReducer::new()
    }

    #[test]
    fn load_with_empty_payload_clears_list() {
        ReducerTest::new(reducer())
            .with_env(test_clock())
            .given_state(loaded(&[1, 2, 3]))
            .when_action(TasksAction::LoadTasks {
                request: RequestId::default(),
                items: vec![],
            })
            .then_state(|state| assert!(state.items.is_empty()))
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn load_derives_task_state_from_clock() {
        let mut overdue = task(7);
        overdue.due_date = Utc.with_ymd_and_hms(2024, 12, 31, 0, 0, 0).unwrap();

        ReducerTest::new(reducer())
            .with_env(test_clock())
            .given_state(TasksState::default())
            .when_action(TasksAction::LoadTasks {
                request: RequestId::default(),
                items: vec![overdue, task(8)],
            })
            .then_state(|state| {
                assert_eq!(state.items[0].task_state, TaskState::Outdated);
                assert_eq!(state.items[1].task_state, TaskState::Pending);
            })
            .run();
    }

    #[test]
    fn stale_load_is_discarded() {
        let mut state = loaded(&[1]);
        state.latest_fetch = RequestId::default().next().next();

        ReducerTest::new(reducer())
            .with_env(test_clock())
            .given_state(state)
            .when_actions([
                TasksAction::LoadTasks {
                    request: RequestId::default().next(),
                    items: vec![task(5), task(6)],
                },
                TasksAction::SetPager {
                    request: RequestId::default().next(),
                    page: 3,
                    pages: 4,
                },
            ])
            .then_state(|state| {
                assert_eq!(state.items, vec![task(1)]);
                assert_eq!(state.pager.page, 1);
                assert_eq!(state.pager.pages, 0);
            })
            .run();
    }

    #[test]
    fn delete_removes_only_matching_task() {
        ReducerTest::new(reducer())
            .with_env(test_clock())
            .given_state(loaded(&[1, 2]))
            .when_action(TasksAction::DeleteSucceeded(TaskId::new(1)))
            .then_state(|state| assert_eq!(state.items, vec![task(2)]))
            .run();
    }

    #[test]
    fn edit_mode_changes_only_target() {
        ReducerTest::new(reducer())
            .with_env(test_clock())
            .given_state(loaded(&[1, 2]))
            .when_actions([
                TasksAction::SetEditMode {
                    id: TaskId::new(1),
                    is_edit_mode: true,
                },
                TasksAction::SetEditMode {
                    id: TaskId::new(2),
                    is_edit_mode: true,
                },
                TasksAction::SetEditMode {
                    id: TaskId::new(2),
                    is_edit_mode: false,
                },
            ])
            .then_state(|state| {
                assert!(state.items[0].is_edit_mode);
                assert!(!state.items[1].is_edit_mode);
            })
            .run();
    }

    #[test]
    fn multiple_tasks_may_be_in_edit_mode() {
        ReducerTest::new(reducer())
            .with_env(test_clock())
            .given_state(loaded(&[1, 2]))
            .when_actions([
                TasksAction::SetEditMode {
                    id: TaskId::new(1),
                    is_edit_mode: true,
                },
                TasksAction::SetEditMode {
                    id: TaskId::new(2),
                    is_edit_mode: true,
                },
            ])
            .then_state(|state| assert!(state.items.iter().all(|t| t.is_edit_mode)))
            .run();
    }

    #[test]
    fn complete_merges_and_keeps_edit_flag() {
        let mut state = loaded(&[1, 2]);
        state.items[0].is_edit_mode = true;

        let mut completed = task(1);
        completed.completed_at = Some(Utc.with_ymd_and_hms(2024, 12, 22, 9, 0, 0).unwrap());
        completed.title = "Renamed".into();

        ReducerTest::new(reducer())
            .with_env(test_clock())
            .given_state(state)
            .when_action(TasksAction::CompleteSucceeded(completed))
            .then_state(|state| {
                let first = &state.items[0];
                assert_eq!(first.title, "Renamed");
                assert_eq!(first.task_state, TaskState::Completed);
                assert!(first.is_edit_mode);
                assert_eq!(state.items[1], task(2));
            })
            .run();
    }

    #[test]
    fn add_appends_and_closes_form() {
        let mut created = task(3);
        created.is_edit_mode = true;

        ReducerTest::new(reducer())
            .with_env(test_clock())
            .given_state(TasksState {
                is_new_task_requested: true,
                ..loaded(&[1])
            })
            .when_action(TasksAction::AddSucceeded(created))
            .then_state(|state| {
                assert_eq!(state.items.len(), 2);
                assert!(!state.items[1].is_edit_mode);
                assert!(!state.is_new_task_requested);
            })
            .run();
    }

    #[test]
    fn add_after_refetch_keeps_ids_unique() {
        let mut created = task(7);
        created.title = "From add response".into();

        ReducerTest::new(reducer())
            .with_env(test_clock())
            .given_state(TasksState {
                is_new_task_requested: true,
                ..TasksState::default()
            })
            .when_actions([
                TasksAction::LoadTasks {
                    request: RequestId::default(),
                    items: vec![task(1), task(7)],
                },
                TasksAction::AddSucceeded(created),
            ])
            .then_state(|state| {
                let ids: Vec<i64> = state.items.iter().map(|t| t.id.get()).collect();
                assert_eq!(ids, vec![1, 7]);
                assert_eq!(state.items[1].title, "From add response");
                assert!(!state.is_new_task_requested);
            })
            .run();
    }

    #[test]
    fn pager_applies_for_latest_fetch() {
        ReducerTest::new(reducer())
            .with_env(test_clock())
            .given_state(TasksState::with_page_size(5))
            .when_action(TasksAction::SetPager {
                request: RequestId::default(),
                page: 2,
                pages: 5,
            })
            .then_state(|state| {
                assert_eq!(
                    state.pager,
                    Pager {
                        page: 2,
                        pages: 5,
                        size: 5
                    }
                );
            })
            .run();
    }
}
