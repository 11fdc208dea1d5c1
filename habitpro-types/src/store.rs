//! Contact store collaborator.
//!
//! The store owns persistence and decides who may list contacts. This side
//! only saves submissions and reads the list back, reacting to success or
//! failure.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error};

use crate::contact::{ContactRecord, ContactSubmission};

/// Failures reported by a contact store.
#[derive(Debug, Error)]
pub enum ContactStoreError {
    #[error("Unable to connect to the backend: {0}")]
    Unreachable(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Contact store rejected the request ({status}): {body}")]
    Rejected { status: u16, body: String },

    #[error("Invalid contact store response: {0}")]
    Decode(String),
}

/// Remote storage for captured contacts.
#[async_trait]
pub trait ContactStore: Send + Sync {
    /// Persist a submission. The store stamps the submission time.
    async fn save_contact(&self, submission: &ContactSubmission) -> Result<(), ContactStoreError>;

    /// Every stored contact, in store order.
    async fn list_contacts(&self) -> Result<Vec<ContactRecord>, ContactStoreError>;
}

/// Contact store reached over HTTP/JSON.
#[derive(Clone)]
pub struct HttpContactStore {
    http: Client,
    base_url: String,
    bearer: Option<String>,
}

impl std::fmt::Debug for HttpContactStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpContactStore")
            .field("base_url", &self.base_url)
            .field("authenticated", &self.bearer.is_some())
            .finish_non_exhaustive()
    }
}

impl HttpContactStore {
    /// Create a client for the store rooted at `base_url`.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ContactStoreError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ContactStoreError::Unreachable(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            bearer: None,
        })
    }

    /// Attach the caller's identity to every request.
    pub fn with_bearer<S: Into<String>>(mut self, token: S) -> Self {
        self.bearer = Some(token.into());
        self
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.bearer {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ContactStoreError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        error!("Contact store returned {}: {}", status, body);
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                Err(ContactStoreError::Unauthorized(body))
            }
            _ => Err(ContactStoreError::Rejected {
                status: status.as_u16(),
                body,
            }),
        }
    }
}

#[async_trait]
impl ContactStore for HttpContactStore {
    async fn save_contact(&self, submission: &ContactSubmission) -> Result<(), ContactStoreError> {
        let url = self.endpoint("contacts");
        debug!("Saving contact to {}", url);

        let response = self
            .authorize(self.http.post(&url).json(submission))
            .send()
            .await
            .map_err(|e| {
                error!("Save contact request failed: {}", e);
                ContactStoreError::Unreachable(e.to_string())
            })?;

        Self::check_status(response).await?;
        Ok(())
    }

    async fn list_contacts(&self) -> Result<Vec<ContactRecord>, ContactStoreError> {
        let url = self.endpoint("contacts");
        debug!("Listing contacts from {}", url);

        let response = self
            .authorize(self.http.get(&url))
            .send()
            .await
            .map_err(|e| {
                error!("List contacts request failed: {}", e);
                ContactStoreError::Unreachable(e.to_string())
            })?;

        let response = Self::check_status(response).await?;
        response
            .json()
            .await
            .map_err(|e| ContactStoreError::Decode(e.to_string()))
    }
}
