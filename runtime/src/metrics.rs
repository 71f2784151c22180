//! Metric descriptions for the store runtime.
//!
//! The store records through the `metrics` facade; whichever recorder the
//! host application installs receives them. Call [`register_metrics`] once at
//! startup so the recorder knows units and help text.
//!
//! | Metric | Kind |
//! |---|---|
//! | `store.commands.total` | counter |
//! | `store.reducer.duration_seconds` | histogram |
//! | `store.effects.count` | histogram |
//! | `store.effects.executed` (`type` label) | counter |
//! | `store.effects.cancelled` | counter |
//! | `store.shutdown.*` | counter |

use metrics::{Unit, describe_counter, describe_histogram};

// Re-export metrics macros for use in other crates
pub use metrics::{counter, histogram};

/// Register all metric descriptions.
pub fn register_metrics() {
    describe_counter!(
        "store.commands.total",
        "Total number of actions dispatched to the store"
    );
    describe_histogram!(
        "store.reducer.duration_seconds",
        Unit::Seconds,
        "Time taken to fold one action through the reducer"
    );
    describe_histogram!(
        "store.effects.count",
        "Number of effects returned per dispatch"
    );
    describe_counter!(
        "store.effects.executed",
        "Effects started, labelled by effect type"
    );
    describe_counter!(
        "store.effects.cancelled",
        "In-flight effects aborted by cancellation or supersession"
    );
    describe_counter!(
        "store.shutdown.initiated",
        "Graceful shutdowns started"
    );
    describe_counter!(
        "store.shutdown.timeout",
        "Graceful shutdowns that gave up with effects still running"
    );
    describe_counter!(
        "store.shutdown.rejected_actions",
        "Actions rejected because the store was shutting down"
    );
}
