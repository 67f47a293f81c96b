//! HTTP-backed media resolver.
//!
//! Speaks the backend contract `POST {endpoint}/resolve {url, platformHint}`
//! and expects a [`MediaInfo`] JSON body back, or `{message}` on failure.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Error, Result};
use crate::media::item::MediaInfo;
use crate::media::resolver::{normalize_url, MediaResolver};
use crate::platform::Platform;

/// Request body for the resolve call.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ResolveRequest<'a> {
    url: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    platform_hint: Option<Platform>,
}

/// Error body returned by the backend.
#[derive(Debug, Deserialize)]
struct ErrorPayload {
    message: String,
}

/// Resolver delegating to a remote backend.
pub struct RemoteResolver {
    client: Client,
    resolve_url: Url,
}

impl RemoteResolver {
    /// Create a resolver for the given backend base URL.
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            resolve_url: resolve_endpoint(endpoint)?,
        })
    }

    /// Full URL of the resolve call.
    pub fn resolve_url(&self) -> &Url {
        &self.resolve_url
    }
}

/// Build `{endpoint}/resolve`, keeping any path prefix on the endpoint.
fn resolve_endpoint(endpoint: &str) -> Result<Url> {
    let mut base = Url::parse(endpoint)?;
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    Ok(base.join("resolve")?)
}

#[async_trait]
impl MediaResolver for RemoteResolver {
    async fn resolve(&self, url: &str, platform_hint: Option<Platform>) -> Result<MediaInfo> {
        let url = normalize_url(url)?;

        tracing::debug!("POST {} for {}", self.resolve_url, url);

        let response = self
            .client
            .post(self.resolve_url.clone())
            .json(&ResolveRequest {
                url: &url,
                platform_hint,
            })
            .send()
            .await
            .map_err(|e| Error::Resolution(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorPayload>(&body)
                .map(|payload| payload.message)
                .unwrap_or_else(|_| format!("Backend returned {}", status));
            return Err(Error::Resolution(message));
        }

        response
            .json::<MediaInfo>()
            .await
            .map_err(|e| Error::Resolution(format!("Invalid media info response: {}", e)))
    }
}
