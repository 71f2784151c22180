//! Search slice.

use crate::actions::SearchAction;
use std::marker::PhantomData;
use taskboard_core::{SmallVec, effect::Effect, reducer::Reducer};

/// Settled search query and debounce flag
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchState {
    /// Last settled query
    pub query: String,
    /// A keystroke is waiting out the debounce window
    pub is_searching: bool,
}

/// Reducer for the search slice
#[derive(Clone, Debug)]
pub struct SearchReducer<E> {
    _env: PhantomData<fn() -> E>,
}

impl<E> SearchReducer<E> {
    /// Create the reducer
    #[must_use]
    pub const fn new() -> Self {
        Self { _env: PhantomData }
    }
}

impl<E> Default for SearchReducer<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Reducer for SearchReducer<E> {
    type State = SearchState;
    type Action = SearchAction;
    type Environment = E;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        _env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            SearchAction::SetQuery(query) => state.query = query,
            SearchAction::SetSearching(is_searching) => state.is_searching = is_searching,
        }
        SmallVec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskboard_testing::ReducerTest;

    #[test]
    fn query_and_flag_are_independent() {
        ReducerTest::new(SearchReducer::new())
            .with_env(())
            .given_state(SearchState {
                query: String::new(),
                is_searching: true,
            })
            .when_action(SearchAction::SetQuery("milk".into()))
            .then_state(|state| {
                assert_eq!(state.query, "milk");
                assert!(state.is_searching);
            })
            .run();
    }
}
