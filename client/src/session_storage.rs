//! Session storage collaborator.
//!
//! Holds the signed-in user's profile between page loads (the original web
//! client keeps it in a `profile` cookie). Route guards read it; the sync
//! adapter writes it on sign-in and clears it on logout.

use crate::types::Profile;
use std::sync::{Arc, PoisonError, RwLock};

/// Storage for the signed-in profile
pub trait SessionStorage: Send + Sync {
    /// Remember `profile` for the session
    fn store_profile(&self, profile: &Profile);

    /// The remembered profile, if any
    fn load_profile(&self) -> Option<Profile>;

    /// Forget the remembered profile
    fn clear_profile(&self);
}

/// Process-local session storage
#[derive(Clone, Debug, Default)]
pub struct InMemorySessionStorage {
    profile: Arc<RwLock<Option<Profile>>>,
}

impl InMemorySessionStorage {
    /// Empty storage
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStorage for InMemorySessionStorage {
    fn store_profile(&self, profile: &Profile) {
        *self.profile.write().unwrap_or_else(PoisonError::into_inner) = Some(profile.clone());
    }

    fn load_profile(&self) -> Option<Profile> {
        self.profile
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn clear_profile(&self) {
        self.profile
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_load_clear() {
        let storage = InMemorySessionStorage::new();
        assert_eq!(storage.load_profile(), None);

        let profile = Profile {
            username: "ada".into(),
            ..Profile::default()
        };
        storage.store_profile(&profile);
        assert_eq!(storage.clone().load_profile(), Some(profile));

        storage.clear_profile();
        assert_eq!(storage.load_profile(), None);
    }
}
