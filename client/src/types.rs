//! Domain types for the to-do client.
//!
//! Remote records (tasks, profiles, users) deserialize straight from the
//! backend's JSON. Local-only fields are skipped by serde and filled in by
//! the reducers.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Server-assigned task identifier
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(i64);

impl TaskId {
    /// Wraps a raw identifier
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw identifier
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Server-assigned user identifier
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    /// Wraps a raw identifier
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw identifier
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Task priority
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PriorityLevel {
    /// Low priority (server default)
    #[default]
    Low,
    /// Medium priority
    Medium,
    /// High priority
    High,
}

impl PriorityLevel {
    /// Wire representation, as used in query strings
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
        }
    }
}

/// Task category
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Personal task
    #[default]
    Personal,
    /// Project task
    Project,
}

/// Derived display state of a task
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskState {
    /// Open and not yet due
    #[default]
    Pending,
    /// Open and past its due date
    Outdated,
    /// Completed
    Completed,
}

/// A task as held in the tasks slice
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Server-assigned id
    pub id: TaskId,
    /// Non-empty title
    pub title: String,
    /// Non-empty description
    pub description: String,
    /// Due date
    #[serde(with = "timestamp")]
    pub due_date: DateTime<Utc>,
    /// Priority
    pub priority_level: PriorityLevel,
    /// Category
    pub category: Category,
    /// Creation time
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    /// Completion time, if completed
    #[serde(default, with = "timestamp::option")]
    pub completed_at: Option<DateTime<Utc>>,
    /// Derived on ingest from `completed_at`, `due_date` and the clock
    #[serde(skip)]
    pub task_state: TaskState,
    /// Local UI flag, never sent to or read from the backend
    #[serde(skip)]
    pub is_edit_mode: bool,
}

/// Filter on completion status
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FilterStatus {
    /// No status filter
    #[default]
    All,
    /// Completed tasks only
    Complete,
    /// Open tasks only
    Incomplete,
}

/// Identifier of an issued task-list fetch
///
/// Increases monotonically; only the response carrying the latest issued id
/// is applied to state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(u64);

impl RequestId {
    /// The id following this one
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Pagination as reported by the last applied fetch
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pager {
    /// Current page (1-based)
    pub page: u32,
    /// Total pages
    pub pages: u32,
    /// Page size requested from the backend
    pub size: u32,
}

impl Pager {
    /// A pager that has not seen any response yet
    #[must_use]
    pub const fn with_size(size: u32) -> Self {
        Self {
            page: 1,
            pages: 0,
            size,
        }
    }
}

impl Default for Pager {
    fn default() -> Self {
        Self::with_size(crate::config::DEFAULT_PAGE_SIZE)
    }
}

/// Query parameters of `GET /tasks`
///
/// Unset values are omitted from the query string entirely.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TaskQuery {
    /// Free-text search
    pub search_query: Option<String>,
    /// Requested page
    pub page: u32,
    /// Page size
    pub size: u32,
    /// `true` for completed, `false` for open
    pub status: Option<bool>,
    /// Priority filter
    pub priority_level: Option<PriorityLevel>,
    /// Due date filter
    pub due_date: Option<NaiveDate>,
}

impl Default for TaskQuery {
    fn default() -> Self {
        Self {
            search_query: None,
            page: 1,
            size: crate::config::DEFAULT_PAGE_SIZE,
            status: None,
            priority_level: None,
            due_date: None,
        }
    }
}

impl TaskQuery {
    /// Query parameters in wire order, skipping unset and empty values
    #[must_use]
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(6);
        if let Some(search) = self.search_query.as_deref().filter(|s| !s.is_empty()) {
            pairs.push(("search_query", search.to_owned()));
        }
        pairs.push(("page", self.page.to_string()));
        pairs.push(("size", self.size.to_string()));
        if let Some(status) = self.status {
            pairs.push(("status", status.to_string()));
        }
        if let Some(priority) = self.priority_level {
            pairs.push(("priority_level", priority.as_str().to_owned()));
        }
        if let Some(due_date) = self.due_date {
            pairs.push(("due_date", due_date.format("%Y-%m-%d").to_string()));
        }
        pairs
    }
}

/// Body of `GET /tasks`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskPage {
    /// Tasks on this page
    pub items: Vec<Task>,
    /// Page number
    pub page: u32,
    /// Total pages
    pub pages: u32,
}

/// Body of `POST /tasks`
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NewTask {
    /// Title
    pub title: String,
    /// Description
    pub description: String,
    /// Due date
    #[serde(with = "timestamp")]
    pub due_date: DateTime<Utc>,
    /// Priority
    pub priority_level: PriorityLevel,
    /// Category
    pub category: Category,
}

/// Body of `PUT /tasks/{id}`; absent fields are left unchanged
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct TaskChanges {
    /// New title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// New description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// New due date
    #[serde(skip_serializing_if = "Option::is_none", with = "timestamp::option")]
    pub due_date: Option<DateTime<Utc>>,
    /// New priority
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority_level: Option<PriorityLevel>,
    /// New category
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
}

/// The signed-in user's profile
///
/// An empty profile (`Profile::default()`) stands for "no profile loaded".
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// User id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<UserId>,
    /// Login name
    #[serde(default)]
    pub username: String,
    /// Email address
    #[serde(default)]
    pub email: String,
    /// Display name
    #[serde(default)]
    pub full_name: String,
    /// Role name, `admin` for administrators
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Fields this client does not interpret
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Profile {
    /// Whether the profile grants access to the admin panel
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role.as_deref() == Some("admin")
    }

    /// Whether nothing has been loaded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Body of `POST /auth/login`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Credentials {
    /// Login name (email)
    pub username: String,
    /// Password
    pub password: String,
}

/// Body of `POST /auth/register`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Registration {
    /// Display name
    pub full_name: String,
    /// Email address
    pub email: String,
    /// Password
    pub password: String,
}

/// Body of `POST /auth/update-profile`
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ProfileUpdate {
    /// New login name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// New display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
}

/// Body of a successful `POST /auth/login`
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct LoginResponse {
    /// The signed-in user
    pub user: Profile,
}

/// A user row in the admin panel
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// User id
    pub id: UserId,
    /// Display name
    pub full_name: String,
    /// Email address
    pub email: String,
    /// Role name
    #[serde(default)]
    pub role: Option<String>,
    /// Whether the email address was verified
    #[serde(default)]
    pub is_verified: bool,
    /// Whether the account may sign in
    #[serde(default)]
    pub is_active: bool,
}

/// Toast severity
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    /// Operation succeeded
    Success,
    /// Operation failed
    Error,
}

/// A notification waiting to be shown by the UI
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toast {
    /// Severity
    #[serde(rename = "type")]
    pub kind: ToastKind,
    /// User-facing text
    pub message: String,
}

impl Toast {
    /// A success notification
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Success,
            message: message.into(),
        }
    }

    /// A failure notification
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Error,
            message: message.into(),
        }
    }
}

/// Timestamps as sent by the backend.
///
/// RFC 3339 with an offset is preferred; naive timestamps are read as UTC.
mod timestamp {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).map_err(serde::de::Error::custom)
    }

    fn parse(raw: &str) -> Result<DateTime<Utc>, String> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Ok(dt.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .map(|naive| naive.and_utc())
            .map_err(|e| format!("invalid timestamp {raw:?}: {e}"))
    }

    pub mod option {
        use chrono::{DateTime, Utc};
        use serde::{Deserialize, Deserializer, Serializer};

        #[allow(clippy::ref_option)] // serde `with` signature
        pub fn serialize<S: Serializer>(
            value: &Option<DateTime<Utc>>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match value {
                Some(dt) => super::serialize(dt, serializer),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<DateTime<Utc>>, D::Error> {
            Option::<String>::deserialize(deserializer)?
                .map(|raw| super::parse(&raw).map_err(serde::de::Error::custom))
                .transpose()
        }
    }
}
