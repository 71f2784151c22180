//! Derived-view helpers.
//!
//! Pure functions over state. They compute what the UI renders and never
//! dispatch.

use crate::reducers::{Filter, SearchState, SessionState};
use crate::types::{FilterStatus, Profile, Task, TaskState, Toast};
use chrono::{DateTime, Utc};

const MILLIS_PER_DAY: i64 = 86_400_000;

/// Status filter as the `status` query parameter
#[must_use]
pub const fn filter_to_status_param(status: FilterStatus) -> Option<bool> {
    match status {
        FilterStatus::All => None,
        FilterStatus::Complete => Some(true),
        FilterStatus::Incomplete => Some(false),
    }
}

/// Display state of a task at `now`
///
/// Completed wins over everything; an open task is outdated once its due date
/// has passed.
#[must_use]
pub fn compute_task_state(task: &Task, now: DateTime<Utc>) -> TaskState {
    if task.completed_at.is_some() {
        TaskState::Completed
    } else if task.due_date < now {
        TaskState::Outdated
    } else {
        TaskState::Pending
    }
}

/// Whole days from `created_at` to `completed_at`, rounded up
#[must_use]
pub fn days_between(completed_at: DateTime<Utc>, created_at: DateTime<Utc>) -> i64 {
    let millis = (completed_at - created_at).num_milliseconds();
    let days = millis.div_euclid(MILLIS_PER_DAY);
    if millis.rem_euclid(MILLIS_PER_DAY) == 0 {
        days
    } else {
        days + 1
    }
}

/// `"1 day"` or `"N days"`
#[must_use]
pub fn completed_in(completed_at: DateTime<Utc>, created_at: DateTime<Utc>) -> String {
    match days_between(completed_at, created_at) {
        1 => "1 day".to_string(),
        days => format!("{days} days"),
    }
}

/// Label of the pagination control
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PaginationLabel {
    /// More tasks may follow
    ShowMore,
    /// The list ends before this page does
    ShowLess,
}

impl PaginationLabel {
    /// Text shown on the control
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ShowMore => "Show More",
            Self::ShowLess => "Show Less",
        }
    }
}

/// Label for a list of `task_count` tasks showing `current_page`
#[must_use]
pub const fn next_pagination_label(
    task_count: usize,
    current_page: u32,
    page_size: u32,
) -> PaginationLabel {
    let last_index = (current_page as usize).saturating_mul(page_size as usize);
    if task_count < last_index {
        PaginationLabel::ShowLess
    } else {
        PaginationLabel::ShowMore
    }
}

/// Page to request when the pagination control is pressed
///
/// Advances while the list extends past the current page, otherwise wraps
/// back to the first page.
#[must_use]
pub const fn next_page(task_count: usize, current_page: u32, page_size: u32) -> u32 {
    let last_index = (current_page as usize).saturating_mul(page_size as usize);
    if task_count > last_index {
        current_page.saturating_add(1)
    } else {
        1
    }
}

/// `"D MMMM YYYY"`, e.g. `"3 January 2025"`
#[must_use]
pub fn format_date(date: DateTime<Utc>) -> String {
    date.format("%-d %B %Y").to_string()
}

/// Tasks that pass `filter` and `search`, in list order
///
/// Applies the same constraints the backend applies to a fetch, so local
/// changes (a task completed under an incomplete-only filter) leave the view
/// before the next fetch lands.
#[must_use]
pub fn visible_tasks<'a>(tasks: &'a [Task], filter: &Filter, search: &SearchState) -> Vec<&'a Task> {
    let needle = search.query.trim().to_lowercase();

    tasks
        .iter()
        .filter(|task| match filter_to_status_param(filter.status) {
            Some(completed) => task.completed_at.is_some() == completed,
            None => true,
        })
        .filter(|task| filter.priority.is_none_or(|p| task.priority_level == p))
        .filter(|task| filter.due_date.is_none_or(|d| task.due_date.date_naive() == d))
        .filter(|task| {
            needle.is_empty()
                || task.title.to_lowercase().contains(&needle)
                || task.description.to_lowercase().contains(&needle)
        })
        .collect()
}

/// Toasts enqueued since a listener last saw `seen` of them
///
/// A queue shorter than `seen` was cleared in between; all of it is new.
#[must_use]
pub fn unseen_toasts(queue: &[Toast], seen: usize) -> &[Toast] {
    queue.get(seen..).unwrap_or(queue)
}

/// Guarded views
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    /// Sign-in, sign-up and password reset pages
    Public,
    /// The task board and profile pages
    Authenticated,
    /// The user management panel
    Admin,
}

/// Outcome of a route guard
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouteAccess {
    /// Render the route
    Allow,
    /// Send the user to the sign-in page
    RedirectToSignIn,
    /// Send the user to the task board
    RedirectHome,
}

/// Decide whether `route` may be shown
///
/// Admin routes only look at the stored profile, the way the session cookie
/// is read by the browser guard.
#[must_use]
pub fn route_access(
    route: Route,
    session: &SessionState,
    stored_profile: Option<&Profile>,
) -> RouteAccess {
    match route {
        Route::Public => RouteAccess::Allow,
        Route::Authenticated => {
            if session.is_logged_in || stored_profile.is_some() {
                RouteAccess::Allow
            } else {
                RouteAccess::RedirectToSignIn
            }
        },
        Route::Admin => match stored_profile {
            None => RouteAccess::RedirectToSignIn,
            Some(profile) if profile.is_admin() => RouteAccess::Allow,
            Some(_) => RouteAccess::RedirectHome,
        },
    }
}
