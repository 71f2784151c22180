//! Toast slice: notifications waiting for the UI.
//!
//! The core only enqueues. Display and expiry belong to the toast UI, which
//! dispatches `Clear` once it has shown the queue.

use crate::actions::ToastAction;
use crate::types::Toast;
use std::marker::PhantomData;
use taskboard_core::{SmallVec, effect::Effect, reducer::Reducer};

/// Pending notifications, oldest first
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ToastState {
    /// Queue
    pub queue: Vec<Toast>,
}

impl ToastState {
    /// Most recent notification
    #[must_use]
    pub fn last(&self) -> Option<&Toast> {
        self.queue.last()
    }
}

/// Reducer for the toast slice
#[derive(Clone, Debug)]
pub struct ToastReducer<E> {
    _env: PhantomData<fn() -> E>,
}

impl<E> ToastReducer<E> {
    /// Create the reducer
    #[must_use]
    pub const fn new() -> Self {
        Self { _env: PhantomData }
    }
}

impl<E> Default for ToastReducer<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Reducer for ToastReducer<E> {
    type State = ToastState;
    type Action = ToastAction;
    type Environment = E;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        _env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            ToastAction::Enqueue(toast) => state.queue.push(toast),
            ToastAction::Clear => state.queue.clear(),
        }
        SmallVec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskboard_testing::ReducerTest;

    #[test]
    fn enqueue_appends_and_clear_empties() {
        ReducerTest::new(ToastReducer::new())
            .with_env(())
            .given_state(ToastState::default())
            .when_actions([
                ToastAction::Enqueue(Toast::success("Task added successfully")),
                ToastAction::Enqueue(Toast::error("Failed to delete task")),
            ])
            .then_state(|state| {
                assert_eq!(state.queue.len(), 2);
                assert_eq!(state.last(), Some(&Toast::error("Failed to delete task")));
            })
            .run();

        ReducerTest::new(ToastReducer::new())
            .with_env(())
            .given_state(ToastState {
                queue: vec![Toast::success("x")],
            })
            .when_action(ToastAction::Clear)
            .then_state(|state| assert!(state.queue.is_empty()))
            .run();
    }
}
