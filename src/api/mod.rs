pub mod models;

use models::{Alert, ChatRequest, ChatResponse, Document};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::path::Path;
use tracing::{debug, warn};

pub const DEFAULT_UPLOAD_CATEGORY: &str = "general";

/// HTTP client for the contract Q&A backend.
///
/// One attempt per call: no retries and no timeout beyond the transport
/// default. Cloning is cheap and shares the connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `POST /upload` with the file bytes and a category.
    pub async fn upload(
        &self,
        path: &Path,
        category: Option<&str>,
    ) -> Result<serde_json::Value, ApiError> {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("document.pdf")
            .to_string();
        let bytes = tokio::fs::read(path).await?;
        let category = category.unwrap_or(DEFAULT_UPLOAD_CATEGORY).to_string();
        debug!(file = %file_name, %category, size = bytes.len(), "uploading document");

        let part = Part::bytes(bytes)
            .file_name(file_name)
            .mime_str("application/pdf")?;
        let form = Form::new().part("file", part).text("category", category);

        let resp = self
            .client
            .post(self.url("/upload"))
            .multipart(form)
            .send()
            .await?;
        decode(resp).await
    }

    /// `POST /chat`
    pub async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, ApiError> {
        debug!(
            category = request.category_filter.as_deref().unwrap_or("all"),
            docs = request.doc_ids.as_ref().map_or(0, Vec::len),
            "sending chat query"
        );
        let resp = self
            .client
            .post(self.url("/chat"))
            .json(request)
            .send()
            .await?;
        decode(resp).await
    }

    /// `GET /documents`, filtered server-side unless the category is absent or `all`.
    pub async fn list_documents(&self, category: Option<&str>) -> Result<Vec<Document>, ApiError> {
        let mut req = self.client.get(self.url("/documents"));
        if let Some(category) = category.filter(|c| *c != "all") {
            req = req.query(&[("category", category)]);
        }
        let resp = req.send().await?;
        decode(resp).await
    }

    /// `GET /alerts`
    pub async fn list_alerts(&self) -> Result<Vec<Alert>, ApiError> {
        let resp = self.client.get(self.url("/alerts")).send().await?;
        decode(resp).await
    }
}

async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, ApiError> {
    let status = resp.status();
    if !status.is_success() {
        let message = resp.text().await.unwrap_or_default();
        warn!(status = status.as_u16(), "backend returned an error status");
        return Err(ApiError::Api {
            status: status.as_u16(),
            message,
        });
    }
    let text = resp.text().await?;
    serde_json::from_str(&text).map_err(|e| ApiError::Parse(e.to_string()))
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
