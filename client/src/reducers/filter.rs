//! Filter slice: query-parameter descriptor for task-list fetches.

use crate::actions::FilterAction;
use crate::types::{FilterStatus, PriorityLevel};
use chrono::NaiveDate;
use std::marker::PhantomData;
use taskboard_core::{SmallVec, effect::Effect, reducer::Reducer};

/// Active task-list filters
///
/// Changing a filter never touches loaded tasks; it only shapes the next
/// fetch (and the locally visible subset).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Filter {
    /// Completion status
    pub status: FilterStatus,
    /// Priority, if filtered
    pub priority: Option<PriorityLevel>,
    /// Due date, if filtered
    pub due_date: Option<NaiveDate>,
}

/// Reducer for the filter slice
#[derive(Clone, Debug)]
pub struct FilterReducer<E> {
    _env: PhantomData<fn() -> E>,
}

impl<E> FilterReducer<E> {
    /// Create the reducer
    #[must_use]
    pub const fn new() -> Self {
        Self { _env: PhantomData }
    }
}

impl<E> Default for FilterReducer<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Reducer for FilterReducer<E> {
    type State = Filter;
    type Action = FilterAction;
    type Environment = E;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        _env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            FilterAction::SetStatus(status) => state.status = status,
            FilterAction::SetPriority(priority) => state.priority = priority,
            FilterAction::SetDueDate(due_date) => state.due_date = due_date,
            FilterAction::Reset => *state = Filter::default(),
        }
        SmallVec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskboard_testing::{ReducerTest, assertions};

    #[test]
    fn each_setter_touches_one_field() {
        ReducerTest::new(FilterReducer::new())
            .with_env(())
            .given_state(Filter::default())
            .when_action(FilterAction::SetPriority(Some(PriorityLevel::High)))
            .then_state(|state| {
                assert_eq!(state.priority, Some(PriorityLevel::High));
                assert_eq!(state.status, FilterStatus::All);
                assert_eq!(state.due_date, None);
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn reset_restores_all_defaults() {
        ReducerTest::new(FilterReducer::new())
            .with_env(())
            .given_state(Filter::default())
            .when_actions([
                FilterAction::SetStatus(FilterStatus::Complete),
                FilterAction::SetPriority(Some(PriorityLevel::Low)),
                FilterAction::SetDueDate(NaiveDate::from_ymd_opt(2025, 3, 1)),
                FilterAction::Reset,
            ])
            .then_state(|state| assert_eq!(*state, Filter::default()))
            .run();
    }
}
