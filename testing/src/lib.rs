//! # Taskboard Testing
//!
//! Testing utilities and helpers for the taskboard client state architecture.
//!
//! This crate provides:
//! - Mock implementations of Environment traits
//! - Given-When-Then reducer tests
//! - Helpers for driving effect descriptions without a store
//! - Assertion helpers for reducers
//!
//! ## Example
//!
//! ```ignore
//! use taskboard_testing::{ReducerTest, test_clock};
//!
//! ReducerTest::new(TasksReducer::new())
//!     .with_env(test_clock())
//!     .given_state(TasksState::default())
//!     .when_action(TasksAction::SetNewTaskRequested(true))
//!     .then_state(|s| assert!(s.is_new_task_requested))
//!     .run();
//! ```

use chrono::{DateTime, Utc};
use taskboard_core::environment::Clock;


pub use reducer_test::{ReducerTest, assertions};

/// Mock implementations for testing.
pub mod mocks {
    use super::{Clock, DateTime, Utc};

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use taskboard_testing::mocks::FixedClock;
    /// use taskboard_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// assert_eq!(clock.now(), clock.now());
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    ///
    /// # Panics
    ///
    /// This function will panic if the hardcoded timestamp fails to parse,
    /// which should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(
            DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
                .expect("hardcoded timestamp should always parse")
                .with_timezone(&Utc),
        )
    }
}

/// Test helpers and utilities.
pub mod helpers {
    use futures::future::BoxFuture;
    use taskboard_core::effect::Effect;

    /// Drive an effect description to completion without a store
    ///
    /// Futures are awaited in place and delays resolve immediately, so the
    /// result is the list of actions the effect would feed back, in order.
    /// `Cancel` contributes nothing.
    pub fn collect_actions<A: Send + 'static>(effect: Effect<A>) -> BoxFuture<'static, Vec<A>> {
        Box::pin(async move {
            match effect {
                Effect::None | Effect::Cancel(_) => Vec::new(),
                Effect::Future(fut) => fut.await.into_iter().collect(),
                Effect::Delay { action, .. } => vec![*action],
                Effect::Cancellable { effect, .. } => collect_actions(*effect).await,
                Effect::Parallel(effects) | Effect::Sequential(effects) => {
                    let mut actions = Vec::new();
                    for effect in effects {
                        actions.extend(collect_actions(effect).await);
                    }
                    actions
                },
            }
        })
    }

    /// Install a `tracing` subscriber that writes through the test harness
    ///
    /// Honors `RUST_LOG`; repeated calls are ignored.
    pub fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "warn".into()),
            )
            .with_test_writer()
            .try_init();
    }
}

// Re-export commonly used items
pub use helpers::{collect_actions, init_tracing};
pub use mocks::{FixedClock, test_clock};
