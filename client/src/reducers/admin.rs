//! Admin slice: user management.

use crate::actions::AdminAction;
use crate::types::User;
use std::marker::PhantomData;
use taskboard_core::{SmallVec, effect::Effect, reducer::Reducer};

/// Users listed in the admin panel
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AdminState {
    /// Users from the last fetch, with local updates applied
    pub users: Vec<User>,
}

/// Reducer for the admin slice
#[derive(Clone, Debug)]
pub struct AdminReducer<E> {
    _env: PhantomData<fn() -> E>,
}

impl<E> AdminReducer<E> {
    /// Create the reducer
    #[must_use]
    pub const fn new() -> Self {
        Self { _env: PhantomData }
    }
}

impl<E> Default for AdminReducer<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Reducer for AdminReducer<E> {
    type State = AdminState;
    type Action = AdminAction;
    type Environment = E;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        _env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            AdminAction::UsersLoaded(users) => state.users = users,
            AdminAction::UserActivated(id) => {
                if let Some(user) = state.users.iter_mut().find(|u| u.id == id) {
                    user.is_active = true;
                }
            },
            AdminAction::UserDeactivated(id) => {
                if let Some(user) = state.users.iter_mut().find(|u| u.id == id) {
                    user.is_active = false;
                }
            },
            AdminAction::UserDeleted(id) => state.users.retain(|u| u.id != id),
        }
        SmallVec::new()
    }
}
