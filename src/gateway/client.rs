//! API Gateway Client
//!
//! Turns a logical request into a cached lookup or a single HTTP GET against
//! the metadata service, classifying every failure.

use std::sync::Arc;

use reqwest::{Client as ReqwestClient, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::cache::{CacheDomain, CacheRegistry, RequestParams};
use crate::config::Config;
use crate::error::{ApiError, Result};

// == API Gateway ==
/// Caching client for the metadata service.
///
/// Every operation first consults its cache domain; on a miss it performs one
/// request under the configured timeout and caches the body only on success.
/// Identical requests issued concurrently are not merged: each misses and
/// fetches, and the last response to arrive is the one left in the cache.
#[derive(Clone)]
pub struct ApiGateway {
    http: ReqwestClient,
    base_url: String,
    api_key: String,
    language: String,
    cache: Arc<CacheRegistry>,
}

impl ApiGateway {
    // == Constructor ==
    /// Builds a gateway from `config`, sharing `cache` with any other holder.
    ///
    /// # Errors
    /// `ApiError::Configuration` when the credential is empty, the base URL
    /// does not parse, or the HTTP client cannot be built.
    pub fn new(config: &Config, cache: Arc<CacheRegistry>) -> Result<Self> {
        if config.api_key.trim().is_empty() {
            return Err(ApiError::Configuration(
                "API credential is missing".to_string(),
            ));
        }

        let base_url = config.base_url.trim_end_matches('/').to_string();
        Url::parse(&base_url).map_err(|err| {
            ApiError::Configuration(format!("invalid base URL {}: {}", base_url, err))
        })?;

        let http = ReqwestClient::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|err| ApiError::Configuration(format!("HTTP client: {}", err)))?;

        Ok(Self {
            http,
            base_url,
            api_key: config.api_key.clone(),
            language: config.language.clone(),
            cache,
        })
    }

    /// The registry this gateway reads and writes.
    pub fn cache(&self) -> &Arc<CacheRegistry> {
        &self.cache
    }

    // == Fetch ==
    /// Returns the response body for `endpoint`, from cache or network,
    /// exactly as the service sent it.
    pub async fn fetch_raw(
        &self,
        domain: CacheDomain,
        endpoint: &str,
        params: RequestParams,
    ) -> Result<Value> {
        self.fetch_with(domain, endpoint, params, |payload| Ok(payload.clone()))
            .await
    }

    /// Fetches `endpoint` and decodes it into `T`.
    ///
    /// A body that is valid JSON but does not fit `T` is reported as
    /// `MalformedResponse` and is not cached.
    pub async fn fetch<T: DeserializeOwned>(
        &self,
        domain: CacheDomain,
        endpoint: &str,
        params: RequestParams,
    ) -> Result<T> {
        self.fetch_with(domain, endpoint, params, |payload| {
            T::deserialize(payload).map_err(|err| {
                ApiError::MalformedResponse(format!("{}: unexpected shape: {}", endpoint, err))
            })
        })
        .await
    }

    async fn fetch_with<T, F>(
        &self,
        domain: CacheDomain,
        endpoint: &str,
        mut params: RequestParams,
        decode: F,
    ) -> Result<T>
    where
        F: Fn(&Value) -> Result<T>,
    {
        params.insert_default("language", self.language.as_str());

        if let Some(payload) = self.cache.get(domain, endpoint, &params).await {
            debug!(%domain, endpoint, "cache hit");
            return decode(&payload);
        }
        debug!(%domain, endpoint, "cache miss");

        let payload = match self.send(endpoint, &params).await {
            Ok(payload) => payload,
            Err(err) => {
                warn!(%domain, endpoint, error = %err, "request failed");
                return Err(err);
            }
        };

        let decoded = decode(&payload)?;
        self.cache.set(domain, endpoint, &params, payload).await;
        Ok(decoded)
    }

    // == Request ==
    async fn send(&self, endpoint: &str, params: &RequestParams) -> Result<Value> {
        let url = self.request_url(endpoint, params)?;

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|err| classify_transport(endpoint, err))?;

        let status = response.status();
        debug!(endpoint, %status, "received HTTP response");

        if !status.is_success() {
            // The status decides the kind; the body is only detail
            let body = response.text().await.unwrap_or_default();
            return Err(classify_status(endpoint, status, body));
        }

        let body = response
            .text()
            .await
            .map_err(|err| classify_transport(endpoint, err))?;

        parse_body(endpoint, &body)
    }

    /// Builds `base_url + endpoint?params&api_key=...`.
    pub(crate) fn request_url(&self, endpoint: &str, params: &RequestParams) -> Result<Url> {
        let raw = if endpoint.starts_with('/') {
            format!("{}{}", self.base_url, endpoint)
        } else {
            format!("{}/{}", self.base_url, endpoint)
        };

        let mut url = Url::parse(&raw).map_err(|err| {
            ApiError::Configuration(format!("invalid request URL for {}: {}", endpoint, err))
        })?;

        {
            let mut query = url.query_pairs_mut();
            for (name, value) in params.iter() {
                query.append_pair(name, &value.to_string());
            }
            query.append_pair("api_key", &self.api_key);
        }

        Ok(url)
    }
}

// == Classification ==
/// Maps a failure that happened before a complete response was read.
fn classify_transport(endpoint: &str, err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        ApiError::Timeout(endpoint.to_string())
    } else {
        // Without the URL: it carries the credential
        ApiError::Transport(format!("{}: {}", endpoint, err.without_url()))
    }
}

/// Maps a non-2xx status to its error kind.
fn classify_status(endpoint: &str, status: StatusCode, body: String) -> ApiError {
    match status {
        StatusCode::UNAUTHORIZED => ApiError::Unauthorized,
        StatusCode::NOT_FOUND => ApiError::NotFound(endpoint.to_string()),
        StatusCode::TOO_MANY_REQUESTS => ApiError::RateLimited,
        _ => ApiError::Upstream {
            status: status.as_u16(),
            body,
        },
    }
}

/// Decodes a 2xx body, rejecting empty or non-JSON content.
fn parse_body(endpoint: &str, body: &str) -> Result<Value> {
    if body.trim().is_empty() {
        return Err(ApiError::MalformedResponse(format!(
            "{}: empty response body",
            endpoint
        )));
    }

    serde_json::from_str(body).map_err(|err| {
        ApiError::MalformedResponse(format!("{}: invalid JSON: {}", endpoint, err))
    })
}
