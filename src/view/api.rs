use reqwest::{Client, Response, StatusCode};
use serde_json::json;
use thiserror::Error;

use crate::storage::TaskRow;

#[derive(Debug, Error)]
pub enum ApiClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned {status}: {message}")]
    Status { status: StatusCode, message: String },
}

/// Thin typed client over the task-list HTTP API.
pub struct ApiClient {
    base_url: String,
    http: Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            http: Client::new(),
        }
    }

    pub async fn list(&self) -> Result<Vec<TaskRow>, ApiClientError> {
        let resp = self.http.get(self.url("/todos")).send().await?;
        Ok(Self::check(resp).await?.json().await?)
    }

    pub async fn create(&self, text: &str) -> Result<TaskRow, ApiClientError> {
        let resp = self
            .http
            .post(self.url("/todos"))
            .json(&json!({ "text": text }))
            .send()
            .await?;
        Ok(Self::check(resp).await?.json().await?)
    }

    pub async fn toggle(&self, id: &str, completed: bool) -> Result<TaskRow, ApiClientError> {
        let resp = self
            .http
            .patch(self.url(&format!("/todos/{id}/toggle")))
            .json(&json!({ "completed": completed }))
            .send()
            .await?;
        Ok(Self::check(resp).await?.json().await?)
    }

    pub async fn edit(&self, id: &str, text: &str) -> Result<TaskRow, ApiClientError> {
        let resp = self
            .http
            .patch(self.url(&format!("/todos/{id}")))
            .json(&json!({ "text": text }))
            .send()
            .await?;
        Ok(Self::check(resp).await?.json().await?)
    }

    pub async fn delete(&self, id: &str) -> Result<TaskRow, ApiClientError> {
        let resp = self
            .http
            .delete(self.url(&format!("/todos/{id}")))
            .send()
            .await?;
        Ok(Self::check(resp).await?.json().await?)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Turn non-2xx responses into `Status` errors, pulling the server's
    /// `message` field out of the body when there is one.
    async fn check(resp: Response) -> Result<Response, ApiClientError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let message = resp
            .json::<serde_json::Value>()
            .await
            .ok()
            .and_then(|v| v.get("message")?.as_str().map(str::to_owned))
            .unwrap_or_default();
        Err(ApiClientError::Status { status, message })
    }
}
