//! Optional named-entity recognition backend.
//!
//! The recognizer is a seam like the polisher: `Capabilities` holds an
//! `Arc<dyn EntityRecognizer>` when `NER_URL` is configured. The HTTP backend
//! speaks a spaCy-style contract: `POST {"text": ...}` returns
//! `{"entities": [{"text": ..., "label": ...}]}`.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Entity {
    pub text: String,
    pub label: String,
}

#[derive(Debug, Error)]
pub enum NerError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("NER backend returned status {0}")]
    Status(u16),
}

#[async_trait]
pub trait EntityRecognizer: Send + Sync {
    async fn recognize(&self, text: &str) -> Result<Vec<Entity>, NerError>;
}

#[derive(Debug, Serialize)]
struct NerRequest<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct NerResponse {
    #[serde(default)]
    entities: Vec<Entity>,
}

pub struct HttpEntityRecognizer {
    client: Client,
    url: String,
}

impl HttpEntityRecognizer {
    pub fn new(url: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(20))
                .build()
                .unwrap_or_default(),
            url,
        }
    }
}

#[async_trait]
impl EntityRecognizer for HttpEntityRecognizer {
    async fn recognize(&self, text: &str) -> Result<Vec<Entity>, NerError> {
        let response = self
            .client
            .post(&self.url)
            .json(&NerRequest { text })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(NerError::Status(status.as_u16()));
        }

        let body: NerResponse = response.json().await?;
        debug!("NER backend returned {} entities", body.entities.len());
        Ok(body.entities)
    }
}
