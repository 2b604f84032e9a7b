//! HTTP client for the teaspoon server.
//!
//! Sends note uploads as multipart POSTs and reads the post feed. Upload
//! responses are reduced to their status code; the body is never read.

use std::future::Future;
use std::time::Duration;

use reqwest::{Client, Request};
use thiserror::Error;

use crate::error::{Error, Result};
use crate::models::{FeedPost, FeedResponse, WhoIs};
use crate::payload::UploadPayload;
use crate::util::{compact_text, normalize_base_url};

/// Failures that keep an upload from producing any HTTP status.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("could not build upload body: {0}")]
    Payload(String),
    #[error("upload request failed: {0}")]
    Request(#[from] reqwest::Error),
}

/// Something that can deliver an [`UploadPayload`] and report the status code.
pub trait UploadTransport {
    fn send_upload(
        &self,
        path: &str,
        payload: UploadPayload,
    ) -> impl Future<Output = std::result::Result<u16, TransportError>> + Send;
}

/// reqwest-backed client bound to one server base URL.
#[derive(Debug, Clone)]
pub struct HttpUploadClient {
    base_url: String,
    client: Client,
}

impl HttpUploadClient {
    /// Builds a client for an explicit server base URL.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::build(base_url.into(), None)
    }

    /// Builds a client whose requests give up after `timeout`.
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        Self::build(base_url.into(), Some(timeout))
    }

    fn build(base_url: String, timeout: Option<Duration>) -> Result<Self> {
        let base_url = normalize_base_url(&base_url).map_err(Error::InvalidInput)?;
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            base_url,
            client: builder.build()?,
        })
    }

    /// Returns the base URL this client was configured with.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for a server-relative path.
    pub fn url_for(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// POST with the multipart body; content type and boundary come from the form.
    pub fn build_upload_request(
        &self,
        path: &str,
        payload: UploadPayload,
    ) -> std::result::Result<Request, TransportError> {
        let form = payload
            .into_form()
            .map_err(|error| TransportError::Payload(error.to_string()))?;
        Ok(self.client.post(self.url_for(path)).multipart(form).build()?)
    }

    /// Fetch the stored posts, newest first.
    pub async fn fetch_feed(&self, path: &str) -> Result<Vec<FeedPost>> {
        let body = self.get_text(path, "application/json").await?;
        let feed: FeedResponse = serde_json::from_str(&body)?;
        tracing::debug!(count = feed.posts.len(), "Fetched feed");
        Ok(feed.posts)
    }

    /// Ask the server who it sees on the other end of this connection.
    pub async fn fetch_who(&self, path: &str) -> Result<WhoIs> {
        let body = self.get_text(path, "text/html").await?;
        let who = WhoIs::from_html(&body).ok_or_else(|| {
            Error::InvalidInput(format!(
                "unexpected identity page: {}",
                compact_text(&body)
            ))
        })?;
        tracing::debug!(node = %who.node_name, "Fetched identity");
        Ok(who)
    }

    async fn get_text(&self, path: &str, accept: &str) -> Result<String> {
        let url = self.url_for(path);
        tracing::debug!(%url, "GET");
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, accept)
            .send()
            .await?;
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Status {
                status,
                body: compact_text(&body),
            });
        }
        Ok(response.text().await?)
    }
}

impl UploadTransport for HttpUploadClient {
    async fn send_upload(
        &self,
        path: &str,
        payload: UploadPayload,
    ) -> std::result::Result<u16, TransportError> {
        let request = self.build_upload_request(path, payload)?;
        tracing::debug!(method = %request.method(), url = %request.url(), "Sending upload");
        let response = self.client.execute(request).await?;
        Ok(response.status().as_u16())
    }
}
