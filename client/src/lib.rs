//! To-do client state, kept in sync with a remote REST backend.
//!
//! The crate models the client side of a to-do application as a store of
//! slices (tasks, filter, search, session, toasts, admin). It provides:
//!
//! - Action creators for every user intent, with local validation
//! - One reducer per slice, combined into [`AppReducer`]
//! - A remote sync adapter that turns intents into backend calls and
//!   guards the task list against out-of-order fetch responses
//! - Derived-view helpers for what the UI renders
//!
//! # Quick Start
//!
//! ```no_run
//! use taskboard_client::{actions, build_store, ClientConfig, ClientEnvironment, HttpBackend};
//! use taskboard_client::session_storage::InMemorySessionStorage;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ClientConfig::from_env()?;
//! let env = ClientEnvironment::new(
//!     Arc::new(HttpBackend::new(&config.api)?),
//!     Arc::new(InMemorySessionStorage::new()),
//!     &config.sync,
//! );
//! let store = build_store(&config, env);
//!
//! let mut handle = store.send(actions::change_page(1)).await?;
//! handle.wait().await;
//!
//! let count = store.state(|s| s.tasks.items.len()).await;
//! println!("Loaded {count} tasks");
//! # Ok(())
//! # }
//! ```

pub mod actions;
pub mod api;
pub mod config;
pub mod environment;
pub mod reducers;
pub mod session_storage;
pub mod sync;
pub mod types;
pub mod validation;
pub mod view;

// Re-export commonly used types
pub use actions::AppAction;
pub use api::{ApiError, BackendApi, HttpBackend, MockBackend};
pub use config::{ClientConfig, ConfigError};
pub use environment::ClientEnvironment;
pub use reducers::{AppReducer, AppState};
pub use validation::ValidationError;

use taskboard_runtime::Store;

/// The client store
pub type AppStore = Store<AppState, AppAction, ClientEnvironment, AppReducer>;

/// Build a store with an empty state sized by `config`
#[must_use]
pub fn build_store(config: &ClientConfig, env: ClientEnvironment) -> AppStore {
    Store::new(AppState::new(config.sync.page_size), AppReducer::new(), env)
}
