//! Declarative macros for ergonomic effect construction
//!
//! These macros reduce boilerplate when creating `Effect` variants, particularly
//! for remote calls and debounce timers.

/// Create an `Effect::Future` from an async block
///
/// # Example
///
/// ```rust,ignore
/// use taskboard_core::async_effect;
///
/// async_effect! {
///     match api.fetch_tasks(query).await {
///         Ok(page) => Some(AppAction::Tasks(TasksAction::LoadTasks { request, items: page.items })),
///         Err(error) => Some(toast_error(error.user_message("Failed to load tasks"))),
///     }
/// }
/// ```
#[macro_export]
macro_rules! async_effect {
    ($($body:tt)*) => {
        $crate::effect::Effect::Future(
            ::std::boxed::Box::pin(async move { $($body)* })
        )
    };
}

/// Create an `Effect::Delay` for scheduling delayed actions
///
/// # Example
///
/// ```rust,ignore
/// use taskboard_core::delay;
/// use std::time::Duration;
///
/// delay! {
///     duration: Duration::from_secs(3),
///     action: AppAction::Toast(ToastAction::Clear)
/// }
/// ```
#[macro_export]
macro_rules! delay {
    (
        duration: $duration:expr,
        action: $action:expr
    ) => {
        $crate::effect::Effect::Delay {
            duration: $duration,
            action: ::std::boxed::Box::new($action),
        }
    };
}

/// Wrap an effect so a later effect with the same id aborts it
///
/// # Example
///
/// ```rust,ignore
/// use taskboard_core::{cancellable, delay};
///
/// cancellable! {
///     id: SEARCH_DEBOUNCE,
///     effect: delay! {
///         duration: debounce,
///         action: AppAction::Search(SearchAction::SetQuery(text))
///     }
/// }
/// ```
#[macro_export]
macro_rules! cancellable {
    (
        id: $id:expr,
        effect: $effect:expr
    ) => {
        $crate::effect::Effect::Cancellable {
            id: $id,
            effect: ::std::boxed::Box::new($effect),
        }
    };
}
