//! Injected dependencies of the client reducers.

use crate::api::BackendApi;
use crate::config::SyncConfig;
use crate::session_storage::SessionStorage;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;
use taskboard_core::environment::{Clock, SystemClock};

/// Everything the reducers and the sync adapter reach outside the state for
#[derive(Clone)]
pub struct ClientEnvironment {
    /// Remote backend
    pub api: Arc<dyn BackendApi>,
    /// Session profile storage
    pub session: Arc<dyn SessionStorage>,
    /// Time source for derived task state
    pub clock: Arc<dyn Clock>,
    /// Quiet period before a search keystroke settles
    pub search_debounce: Duration,
}

impl ClientEnvironment {
    /// Environment with the system clock and the configured debounce window
    pub fn new(
        api: Arc<dyn BackendApi>,
        session: Arc<dyn SessionStorage>,
        sync: &SyncConfig,
    ) -> Self {
        Self {
            api,
            session,
            clock: Arc::new(SystemClock),
            search_debounce: sync.search_debounce,
        }
    }

    /// Replace the clock
    #[must_use]
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }
}

impl Clock for ClientEnvironment {
    fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }
}

impl std::fmt::Debug for ClientEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientEnvironment")
            .field("now", &self.clock.now())
            .field("search_debounce", &self.search_debounce)
            .finish_non_exhaustive()
    }
}
