//! Nodes API client.

use bytes::{Bytes, BytesMut};
use futures::StreamExt;
use mailex_core::repository::{
    AssociationBody, ContentRepository, Node, NodeBodyCreate, RepositoryError,
};
use mailex_shared::RepositoryConfig;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, RequestBuilder, Response};
use serde::Deserialize;
use tracing::debug;

/// Single-entity response wrapper: `{"entry": {...}}`.
#[derive(Debug, Deserialize)]
struct Entry<T> {
    entry: T,
}

/// Error response body: `{"error": {"briefSummary": "..."}}`.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorDetail {
    #[serde(default)]
    brief_summary: Option<String>,
}

/// Content repository client over the public REST API.
#[derive(Debug, Clone)]
pub struct NodesClient {
    http: reqwest::Client,
    base_url: String,
    username: String,
    password: String,
    max_content_bytes: u64,
}

impl NodesClient {
    /// Build a client from repository configuration.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Transport`] if the HTTP client cannot be
    /// constructed.
    pub fn new(config: &RepositoryConfig) -> Result<Self, RepositoryError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| RepositoryError::transport(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            username: config.username.clone(),
            password: config.password.clone(),
            max_content_bytes: config.max_content_bytes,
        })
    }

    /// Base URL requests are made against.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http
            .request(method, format!("{}/{path}", self.base_url))
            .basic_auth(&self.username, Some(&self.password))
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, RepositoryError> {
        let response = request
            .send()
            .await
            .map_err(|e| RepositoryError::transport(e.to_string()))?;
        check_status(response).await
    }
}

/// Turn a non-2xx response into a status error carrying its summary.
async fn check_status(response: Response) -> Result<Response, RepositoryError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.bytes().await.unwrap_or_default();
    let message = serde_json::from_slice::<ErrorBody>(&body)
        .ok()
        .and_then(|b| b.error.brief_summary)
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown").to_string());

    Err(RepositoryError::status(status.as_u16(), message))
}

impl ContentRepository for NodesClient {
    async fn get_content(&self, node_id: &str) -> Result<Bytes, RepositoryError> {
        debug!(node_id = %node_id, "Downloading node content");
        let limit = self.max_content_bytes;
        let response = self
            .send(self.request(
                Method::GET,
                &format!("nodes/{node_id}/content?attachment=true"),
            ))
            .await?;

        if response.content_length().is_some_and(|len| len > limit) {
            return Err(RepositoryError::ContentTooLarge { limit });
        }

        let mut content = BytesMut::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| RepositoryError::transport(e.to_string()))?;
            let total = u64::try_from(content.len() + chunk.len()).unwrap_or(u64::MAX);
            if total > limit {
                return Err(RepositoryError::ContentTooLarge { limit });
            }
            content.extend_from_slice(&chunk);
        }

        Ok(content.freeze())
    }

    async fn create_node(
        &self,
        parent_id: &str,
        body: &NodeBodyCreate,
    ) -> Result<Node, RepositoryError> {
        debug!(parent_id = %parent_id, name = %body.name, node_type = %body.node_type, "Creating node");
        let response = self
            .send(
                self.request(
                    Method::POST,
                    &format!("nodes/{parent_id}/children?autoRename=true"),
                )
                .json(body),
            )
            .await?;

        let created: Entry<Node> = response
            .json()
            .await
            .map_err(|e| RepositoryError::decode(e.to_string()))?;
        Ok(created.entry)
    }

    async fn update_node_content(
        &self,
        node_id: &str,
        content: Bytes,
    ) -> Result<(), RepositoryError> {
        debug!(node_id = %node_id, size = content.len(), "Uploading node content");
        self.send(
            self.request(
                Method::PUT,
                &format!("nodes/{node_id}/content?majorVersion=false"),
            )
            .header(CONTENT_TYPE, "application/octet-stream")
            .body(content),
        )
        .await?;
        Ok(())
    }

    async fn create_association(
        &self,
        source_id: &str,
        body: &AssociationBody,
    ) -> Result<(), RepositoryError> {
        debug!(
            source_id = %source_id,
            target_id = %body.target_id,
            assoc_type = %body.assoc_type,
            "Creating association"
        );
        self.send(
            self.request(Method::POST, &format!("nodes/{source_id}/targets"))
                .json(body),
        )
        .await?;
        Ok(())
    }
}
