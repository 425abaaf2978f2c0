use crate::domain::models::{MetadataConfig, RecordId};
use crate::services::query::Query;
use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde_json::Value;
use std::time::Duration;
use url::Url;

#[derive(thiserror::Error, Debug)]
pub enum MetadataError {
    #[error("invalid metadata endpoint `{0}`")]
    Endpoint(String),
    #[error("metadata request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("{method} /{collection} returned HTTP {status}")]
    Status {
        method: &'static str,
        collection: String,
        status: u16,
    },
    #[error("unexpected response body from /{collection}: {reason}")]
    Body { collection: String, reason: String },
}

/// Read/write contract of the remote metadata store.
pub trait MetadataStore {
    /// Records of `collection` matching `query`.
    fn query(&self, collection: &str, query: &Query) -> Result<Vec<Value>, MetadataError>;
    /// Partial update of the record with `id`.
    fn update(&self, collection: &str, id: &RecordId, body: &Value) -> Result<(), MetadataError>;
    fn create(&self, collection: &str, body: &Value) -> Result<(), MetadataError>;
    /// True when a lookup answers 200 with a non-empty list.
    fn exists(&self, collection: &str, query: &Query) -> Result<bool, MetadataError>;
}

pub struct MetadataClient {
    base: Url,
    http: Client,
}

impl MetadataClient {
    pub fn new(cfg: &MetadataConfig) -> Result<Self, MetadataError> {
        let base = Url::parse(cfg.endpoint_url.trim())
            .map_err(|_| MetadataError::Endpoint(cfg.endpoint_url.clone()))?;
        if base.cannot_be_a_base() {
            return Err(MetadataError::Endpoint(cfg.endpoint_url.clone()));
        }
        let http = Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build()?;
        Ok(Self { base, http })
    }

    pub fn collection_url(&self, collection: &str, query: &Query) -> Result<Url, MetadataError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| MetadataError::Endpoint(self.base.to_string()))?
            .pop_if_empty()
            .push(collection);
        if !query.filters().is_empty() {
            url.query_pairs_mut().extend_pairs(query.pairs());
        }
        Ok(url)
    }

    fn decode_list(collection: &str, body: &str) -> Result<Vec<Value>, MetadataError> {
        serde_json::from_str(body).map_err(|e| MetadataError::Body {
            collection: collection.to_string(),
            reason: e.to_string(),
        })
    }

    fn expect_ok(
        method: &'static str,
        collection: &str,
        status: StatusCode,
    ) -> Result<(), MetadataError> {
        if status != StatusCode::OK {
            return Err(MetadataError::Status {
                method,
                collection: collection.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(())
    }
}

impl MetadataStore for MetadataClient {
    fn query(&self, collection: &str, query: &Query) -> Result<Vec<Value>, MetadataError> {
        let url = self.collection_url(collection, query)?;
        tracing::debug!(%url, "GET");
        let resp = self.http.get(url).send()?;
        Self::expect_ok("GET", collection, resp.status())?;
        Self::decode_list(collection, &resp.text()?)
    }

    fn update(&self, collection: &str, id: &RecordId, body: &Value) -> Result<(), MetadataError> {
        let url = self.collection_url(collection, &Query::new().eq("_id", id))?;
        tracing::debug!(%url, "POST");
        let resp = self.http.post(url).json(body).send()?;
        Self::expect_ok("POST", collection, resp.status())
    }

    fn create(&self, collection: &str, body: &Value) -> Result<(), MetadataError> {
        let url = self.collection_url(collection, &Query::new())?;
        tracing::debug!(%url, "PUT");
        let resp = self.http.put(url).json(body).send()?;
        Self::expect_ok("PUT", collection, resp.status())
    }

    fn exists(&self, collection: &str, query: &Query) -> Result<bool, MetadataError> {
        let url = self.collection_url(collection, query)?;
        tracing::debug!(%url, "GET (existence)");
        let resp = self.http.get(url).send()?;
        let status = resp.status();
        if status != StatusCode::OK {
            tracing::warn!(collection, status = status.as_u16(), "lookup failed, treating as absent");
            return Ok(false);
        }
        Ok(!Self::decode_list(collection, &resp.text()?)?.is_empty())
    }
}
