use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::config::{ClientConfig, TASKS_ENDPOINT};
use crate::task::{Task, TaskId, TaskPatch};

use super::{ApiError, TaskApi};

/// REST client for a tasklist server.
pub struct HttpTaskClient {
    base_url: String,
    client: Client,
}

/// Error body returned by the server.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

impl HttpTaskClient {
    /// Creates a client for the server at `base_url` (e.g. "http://localhost:3001").
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    /// Creates a client from client configuration.
    pub fn with_config(config: &ClientConfig) -> Self {
        Self::new(&config.base_url)
    }

    /// Returns the server base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self) -> String {
        format!("{}{}", self.base_url, TASKS_ENDPOINT)
    }

    fn item_url(&self, id: TaskId) -> String {
        format!("{}{}/{}", self.base_url, TASKS_ENDPOINT, id)
    }

    /// Decodes a success body, or maps the failure status to an error.
    async fn decode<T: DeserializeOwned>(
        response: Response,
        id: Option<TaskId>,
    ) -> Result<T, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<T>().await?);
        }

        if let (StatusCode::NOT_FOUND, Some(id)) = (status, id) {
            return Err(ApiError::NotFound(id));
        }

        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&text)
            .map(|b| b.error)
            .unwrap_or(text);

        Err(ApiError::Status {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl TaskApi for HttpTaskClient {
    async fn list(&self) -> Result<Vec<Task>, ApiError> {
        let response = self.client.get(self.collection_url()).send().await?;
        Self::decode(response, None).await
    }

    async fn create(&self, patch: TaskPatch) -> Result<Task, ApiError> {
        let response = self
            .client
            .post(self.collection_url())
            .json(&patch)
            .send()
            .await?;
        Self::decode(response, None).await
    }

    async fn update(&self, id: TaskId, patch: TaskPatch) -> Result<Task, ApiError> {
        let response = self
            .client
            .put(self.item_url(id))
            .json(&patch)
            .send()
            .await?;
        Self::decode(response, Some(id)).await
    }

    async fn delete(&self, id: TaskId) -> Result<Task, ApiError> {
        let response = self.client.delete(self.item_url(id)).send().await?;
        Self::decode(response, Some(id)).await
    }
}
