//! Session slice.

use crate::actions::SessionAction;
use crate::types::Profile;
use std::marker::PhantomData;
use taskboard_core::{SmallVec, effect::Effect, reducer::Reducer};

/// Who is signed in
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SessionState {
    /// The backend accepted the session
    pub is_logged_in: bool,
    /// Profile from the last profile fetch or sign-in; empty when unknown
    pub profile: Profile,
}

/// Reducer for the session slice
///
/// `SetLoggedIn` and `SetProfile` are independent: neither implies the other.
#[derive(Clone, Debug)]
pub struct SessionReducer<E> {
    _env: PhantomData<fn() -> E>,
}

impl<E> SessionReducer<E> {
    /// Create the reducer
    #[must_use]
    pub const fn new() -> Self {
        Self { _env: PhantomData }
    }
}

impl<E> Default for SessionReducer<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Reducer for SessionReducer<E> {
    type State = SessionState;
    type Action = SessionAction;
    type Environment = E;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        _env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            SessionAction::SetLoggedIn(is_logged_in) => state.is_logged_in = is_logged_in,
            SessionAction::SetProfile(profile) => state.profile = profile,
        }
        SmallVec::new()
    }
}
