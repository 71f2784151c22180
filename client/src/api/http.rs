//! reqwest-backed implementation of [`BackendApi`]

use super::{ApiError, ApiResult, BackendApi};
use crate::config::ApiConfig;
use crate::types::{
    Credentials, LoginResponse, NewTask, Profile, ProfileUpdate, Registration, Task, TaskChanges,
    TaskId, TaskPage, TaskQuery, User, UserId,
};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;

/// Backend client over HTTP
///
/// The session cookie set by `/auth/login` is kept in the client's cookie
/// store and sent with every later request.
#[derive(Clone, Debug)]
pub struct HttpBackend {
    client: Client,
    api_url: String,
}

impl HttpBackend {
    /// Build a client for the configured base URL
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Network` if the TLS backend cannot be initialized
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .cookie_store(true)
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self {
            client,
            api_url: config.base_url.clone(),
        })
    }

    /// Base URL requests are sent to
    #[must_use]
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    async fn send(request: RequestBuilder) -> Result<Response, ApiError> {
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        tracing::debug!(status = status.as_u16(), body = %body, "Backend rejected request");
        Err(ApiError::rejected(status.as_u16(), &body))
    }

    async fn json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, ApiError> {
        Self::send(request)
            .await?
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn empty(request: RequestBuilder) -> Result<(), ApiError> {
        Self::send(request).await.map(drop)
    }
}

impl BackendApi for HttpBackend {
    fn fetch_tasks(&self, query: TaskQuery) -> ApiResult<'_, TaskPage> {
        let request = self
            .client
            .get(format!("{}/tasks", self.api_url))
            .query(&query.to_query_pairs());
        Box::pin(Self::json(request))
    }

    fn add_task(&self, task: NewTask) -> ApiResult<'_, Task> {
        let request = self.client.post(format!("{}/tasks", self.api_url)).json(&task);
        Box::pin(Self::json(request))
    }

    fn edit_task(&self, id: TaskId, changes: TaskChanges) -> ApiResult<'_, Task> {
        let request = self
            .client
            .put(format!("{}/tasks/{id}", self.api_url))
            .json(&changes);
        Box::pin(Self::json(request))
    }

    fn delete_task(&self, id: TaskId) -> ApiResult<'_, ()> {
        let request = self.client.delete(format!("{}/tasks/{id}", self.api_url));
        Box::pin(Self::empty(request))
    }

    fn complete_task(&self, id: TaskId) -> ApiResult<'_, Task> {
        let request = self
            .client
            .put(format!("{}/tasks/{id}/complete", self.api_url));
        Box::pin(Self::json(request))
    }

    fn fetch_profile(&self) -> ApiResult<'_, Profile> {
        let request = self.client.get(format!("{}/auth/profile", self.api_url));
        Box::pin(Self::json(request))
    }

    fn logout(&self) -> ApiResult<'_, ()> {
        let request = self.client.get(format!("{}/auth/logout", self.api_url));
        Box::pin(Self::empty(request))
    }

    fn sign_in(&self, credentials: Credentials) -> ApiResult<'_, Profile> {
        let request = self
            .client
            .post(format!("{}/auth/login", self.api_url))
            .form(&[
                ("username", credentials.username),
                ("password", credentials.password),
            ]);
        Box::pin(async move {
            let login: LoginResponse = Self::json(request).await?;
            Ok(login.user)
        })
    }

    fn sign_up(&self, registration: Registration) -> ApiResult<'_, ()> {
        let request = self
            .client
            .post(format!("{}/auth/register", self.api_url))
            .form(&[
                ("full_name", registration.full_name),
                ("email", registration.email),
                ("password", registration.password),
            ]);
        Box::pin(Self::empty(request))
    }

    fn send_reset_link(&self, email: String) -> ApiResult<'_, ()> {
        let request = self
            .client
            .post(format!("{}/auth/send-password-reset-link", self.api_url))
            .form(&[("email", email)]);
        Box::pin(Self::empty(request))
    }

    fn reset_password(&self, token: String, new_password: String) -> ApiResult<'_, ()> {
        let request = self
            .client
            .post(format!("{}/auth/reset-password", self.api_url))
            .query(&[("token", token)])
            .form(&[("new_password", new_password)]);
        Box::pin(Self::empty(request))
    }

    fn change_password(&self, old_password: String, new_password: String) -> ApiResult<'_, ()> {
        let request = self
            .client
            .post(format!("{}/auth/change-password", self.api_url))
            .form(&[("old_password", old_password), ("new_password", new_password)]);
        Box::pin(Self::empty(request))
    }

    fn update_profile(&self, update: ProfileUpdate) -> ApiResult<'_, Profile> {
        let request = self
            .client
            .post(format!("{}/auth/update-profile", self.api_url))
            .json(&update);
        Box::pin(Self::json(request))
    }

    fn fetch_users(&self) -> ApiResult<'_, Vec<User>> {
        let request = self.client.get(format!("{}/users", self.api_url));
        Box::pin(Self::json(request))
    }

    fn activate_user(&self, id: UserId) -> ApiResult<'_, ()> {
        let request = self
            .client
            .put(format!("{}/users/{id}/activate", self.api_url));
        Box::pin(Self::empty(request))
    }

    fn deactivate_user(&self, id: UserId) -> ApiResult<'_, ()> {
        let request = self
            .client
            .put(format!("{}/users/{id}/deactivate", self.api_url));
        Box::pin(Self::empty(request))
    }

    fn delete_user(&self, id: UserId) -> ApiResult<'_, ()> {
        let request = self.client.delete(format!("{}/users/{id}", self.api_url));
        Box::pin(Self::empty(request))
    }
}
