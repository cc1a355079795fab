//! Collection API transport
//!
//! Thin reqwest wrapper around one collection endpoint: list, create,
//! update, delete, plus the backend health probe. No retry, no backoff,
//! no timeout; a hung request simply stays in flight.

use serde_json::Value;
use url::Url;

use crate::error::{failure_message, ApiError, ClientError};
use crate::record::{parse_collection, Record, RecordId};

pub struct CollectionApi {
    base_url: String,
    collection_path: String,
    client: reqwest::Client,
}

impl CollectionApi {
    pub fn new(base_url: &str, collection_path: &str) -> Result<Self, ClientError> {
        Url::parse(base_url).map_err(|e| ClientError::InvalidBaseUrl(e.to_string()))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            collection_path: collection_path.to_string(),
            client: reqwest::Client::new(),
        })
    }

    fn collection_url(&self) -> String {
        format!("{}{}", self.base_url, self.collection_path)
    }

    fn record_url(&self, id: &RecordId) -> String {
        format!("{}{}/{}", self.base_url, self.collection_path, id)
    }

    /// `GET <collection>`: the whole record sequence, in server order.
    pub async fn fetch_collection(&self, wrapper_key: &str) -> Result<Vec<Record>, ApiError> {
        let url = self.collection_url();
        tracing::debug!(%url, "fetching collection");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ApiError::NetworkError(e.to_string()))?;

        let body = Self::success_body(response).await?;
        parse_collection(body, wrapper_key)
    }

    /// `POST <collection>` with a JSON body; returns the created record's
    /// representation.
    pub async fn create(&self, payload: &Value) -> Result<Value, ApiError> {
        let url = self.collection_url();
        tracing::debug!(%url, "creating record");

        let response = self
            .client
            .post(&url)
            .json(payload)
            .send()
            .await
            .map_err(|e| ApiError::NetworkError(e.to_string()))?;

        Self::success_body(response).await
    }

    /// `PUT <collection>/<id>` with a JSON body.
    pub async fn update(&self, id: &RecordId, payload: &Value) -> Result<Value, ApiError> {
        let url = self.record_url(id);
        tracing::debug!(%url, "updating record");

        let response = self
            .client
            .put(&url)
            .json(payload)
            .send()
            .await
            .map_err(|e| ApiError::NetworkError(e.to_string()))?;

        Self::success_body(response).await
    }

    /// `DELETE <collection>/<id>`.
    pub async fn delete(&self, id: &RecordId) -> Result<Value, ApiError> {
        let url = self.record_url(id);
        tracing::debug!(%url, "deleting record");

        let response = self
            .client
            .delete(&url)
            .send()
            .await
            .map_err(|e| ApiError::NetworkError(e.to_string()))?;

        Self::success_body(response).await
    }

    /// `GET /health`: backend liveness probe.
    pub async fn health(&self) -> Result<Value, ApiError> {
        let url = format!("{}/health", self.base_url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ApiError::NetworkError(e.to_string()))?;

        Self::success_body(response).await
    }

    /// Read the body, mapping a non-2xx status to a normalized
    /// `RequestFailed` and an unparsable 2xx body to `ParseError`.
    async fn success_body(response: reqwest::Response) -> Result<Value, ApiError> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::NetworkError(e.to_string()))?;

        if !status.is_success() {
            return Err(ApiError::RequestFailed {
                status: status.as_u16(),
                message: failure_message(status.as_u16(), &body),
            });
        }

        serde_json::from_str(&body).map_err(|e| ApiError::ParseError(e.to_string()))
    }
}
