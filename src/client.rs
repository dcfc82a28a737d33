// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! HTTP client for the DNS zone API.
//!
//! [`ZoneClient`] owns the base URL, the API key and a `reqwest` transport configured
//! with the request timeout. Each operation is exactly one HTTP exchange: there is no
//! retry loop here, callers that want one build it on top of
//! [`ClientError::is_transient`].
//!
//! # Example
//!
//! ```rust,no_run
//! use zonepatch::client::ZoneClient;
//! use zonepatch::config::ClientConfig;
//! use zonepatch::patch::build_record_patch;
//! use zonepatch::types::{Record, RecordType};
//!
//! # async fn example() -> Result<(), zonepatch::errors::ClientError> {
//! let client = ZoneClient::new(ClientConfig::new("my-api-key"))?;
//!
//! let zone = client.get_zone("example.com").await?;
//! println!("{:?}", zone.data);
//!
//! let patch = build_record_patch(
//!     "example.com",
//!     "@",
//!     RecordType::Mx,
//!     vec![Record { data: "10 mail1.example.com.".into(), ..Default::default() }],
//! );
//! client.patch_zone("example.com", &patch).await?;
//! # Ok(())
//! # }
//! ```

use crate::config::ClientConfig;
use crate::constants::{API_KEY_HEADER, API_VERSION, JSON_CONTENT_TYPE, ZONES_PATH};
use crate::errors::ClientError;
use crate::http_errors::parse_error_response;
use crate::types::{ApiResponse, Pagination, Zone, ZoneRequest};
use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client as HttpClient, Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, error, info};
use url::Url;

/// Zone operations consumed by record handlers.
///
/// [`ZoneClient`] is the production implementation; the trait is the seam that lets
/// higher layers run against a stand-in.
#[async_trait]
pub trait ZoneApi: Send + Sync {
    /// Fetch one page of zones.
    async fn list_zones(&self, page: &Pagination) -> Result<ApiResponse<Vec<Zone>>, ClientError>;

    /// Fetch a single zone with all its records.
    async fn get_zone(&self, name: &str) -> Result<ApiResponse<Zone>, ClientError>;

    /// Apply a merge patch and return the updated zone.
    async fn patch_zone(
        &self,
        name: &str,
        patch: &ZoneRequest,
    ) -> Result<ApiResponse<Zone>, ClientError>;

    /// Apply a merge patch, discarding the response body.
    async fn apply_patch(&self, name: &str, patch: &ZoneRequest) -> Result<(), ClientError>;
}

/// Client for the DNS zone API.
///
/// Cheap to clone and safe to share between tasks: it holds only immutable
/// configuration and a pooled transport.
#[derive(Clone)]
pub struct ZoneClient {
    /// HTTP client for API requests
    http: HttpClient,
    /// Base URL all endpoints are joined onto
    base_url: Url,
    /// Value of the API key header
    api_key: Arc<String>,
}

impl ZoneClient {
    /// Create a new `ZoneClient`.
    ///
    /// The configured timeout bounds both connecting and the complete exchange.
    ///
    /// # Errors
    ///
    /// Returns an error if the host is not an absolute URL usable as a base, or the
    /// HTTP transport cannot be constructed.
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let base_url = Url::parse(&config.host).map_err(|e| ClientError::InvalidHost {
            host: config.host.clone(),
            reason: e.to_string(),
        })?;

        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidHost {
                host: config.host,
                reason: "URL cannot be used as a base".to_string(),
            });
        }

        let http = HttpClient::builder()
            .timeout(config.timeout)
            .connect_timeout(config.timeout)
            .build()
            .map_err(ClientError::HttpClient)?;

        debug!(host = %base_url, timeout = ?config.timeout, "Zone API client created");

        Ok(Self {
            http,
            base_url,
            api_key: Arc::new(config.api_key),
        })
    }

    /// The base URL requests are sent to.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build an endpoint URL by appending path segments to the base URL.
    ///
    /// Segments are percent-encoded, so a zone name can never alter the path structure.
    #[must_use]
    pub fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn zone_url(&self, name: &str) -> Url {
        self.endpoint(&[API_VERSION, ZONES_PATH, name])
    }

    /// Fetch one page of zones.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, upstream answers with anything but 200,
    /// or the body is not a zone list.
    pub async fn list_zones(
        &self,
        page: &Pagination,
    ) -> Result<ApiResponse<Vec<Zone>>, ClientError> {
        let context = "list zones";
        let mut url = self.endpoint(&[API_VERSION, ZONES_PATH]);

        let pairs = page.query_pairs();
        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs);
        }

        let response = self.execute(Method::GET, url, None, context).await?;
        read_json(response, context).await
    }

    /// Fetch a single zone with all its records.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, upstream answers with anything but 200
    /// (404 for an unknown zone, see [`ClientError::is_not_found`]), or the body is not
    /// a zone.
    pub async fn get_zone(&self, name: &str) -> Result<ApiResponse<Zone>, ClientError> {
        let context = format!("get zone {name}");
        let response = self
            .execute(Method::GET, self.zone_url(name), None, &context)
            .await?;
        read_json(response, &context).await
    }

    /// Update a zone by patching it according to JSON Merge Patch (RFC 7396).
    ///
    /// # Errors
    ///
    /// Returns an error if the patch cannot be serialized, the request fails, upstream
    /// answers with anything but 200, or the body is not a zone.
    pub async fn patch_zone(
        &self,
        name: &str,
        patch: &ZoneRequest,
    ) -> Result<ApiResponse<Zone>, ClientError> {
        let context = format!("update zone {name}");
        let response = self.send_patch(name, patch, &context).await?;
        let zone: ApiResponse<Zone> = read_json(response, &context).await?;

        info!(
            zone = %name,
            invocation_id = zone.meta.as_ref().and_then(|m| m.invocation_id.as_deref()),
            "Zone patched"
        );
        Ok(zone)
    }

    /// Update a zone like [`Self::patch_zone`], discarding the response body.
    ///
    /// # Errors
    ///
    /// Returns an error if the patch cannot be serialized, the request fails, or
    /// upstream answers with anything but 200.
    pub async fn apply_patch(&self, name: &str, patch: &ZoneRequest) -> Result<(), ClientError> {
        let context = format!("update zone {name}");
        self.send_patch(name, patch, &context).await?;
        info!(zone = %name, "Zone patched");
        Ok(())
    }

    async fn send_patch(
        &self,
        name: &str,
        patch: &ZoneRequest,
        context: &str,
    ) -> Result<Response, ClientError> {
        let body = serde_json::to_vec(patch).map_err(|source| ClientError::Encode {
            context: context.to_string(),
            source,
        })?;

        self.execute(Method::PATCH, self.zone_url(name), Some(body), context)
            .await
    }

    /// Perform one authenticated exchange and check the status.
    ///
    /// Only 200 counts as success; every other status is classified by
    /// [`parse_error_response`].
    async fn execute(
        &self,
        method: Method,
        url: Url,
        body: Option<Vec<u8>>,
        context: &str,
    ) -> Result<Response, ClientError> {
        debug!(
            method = %method,
            url = %url,
            body_len = body.as_ref().map(Vec::len),
            "HTTP API request to zone API"
        );

        let mut request = self
            .http
            .request(method.clone(), url.clone())
            .header(ACCEPT, JSON_CONTENT_TYPE)
            .header(API_KEY_HEADER, self.api_key.as_str());

        if let Some(body) = body {
            request = request.header(CONTENT_TYPE, JSON_CONTENT_TYPE).body(body);
        }

        let response = request.send().await.map_err(|source| {
            error!(
                method = %method,
                url = %url,
                error = %source,
                timeout = source.is_timeout(),
                "Failed to send HTTP request"
            );
            ClientError::Transport {
                context: context.to_string(),
                source,
            }
        })?;

        let status = response.status();
        if status == StatusCode::OK {
            debug!(method = %method, url = %url, status = %status, "HTTP API request successful");
            return Ok(response);
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);

        let raw = response
            .bytes()
            .await
            .map_err(|source| ClientError::ReadBody {
                context: context.to_string(),
                source,
            })?;

        let source = parse_error_response(status.as_u16(), content_type.as_deref(), &raw);
        error!(
            method = %method,
            url = %url,
            status = %status,
            error = %source,
            "HTTP API request failed"
        );

        Err(ClientError::Response {
            context: context.to_string(),
            source,
        })
    }
}

/// Read the whole body, then decode it.
async fn read_json<T: DeserializeOwned>(response: Response, context: &str) -> Result<T, ClientError> {
    let raw = response
        .bytes()
        .await
        .map_err(|source| ClientError::ReadBody {
            context: context.to_string(),
            source,
        })?;

    serde_json::from_slice(&raw).map_err(|source| {
        error!(
            context = %context,
            body = %String::from_utf8_lossy(&raw),
            error = %source,
            "error unmarshalling response"
        );
        ClientError::Decode {
            context: context.to_string(),
            source,
        }
    })
}

impl fmt::Debug for ZoneClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ZoneClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl ZoneApi for ZoneClient {
    async fn list_zones(&self, page: &Pagination) -> Result<ApiResponse<Vec<Zone>>, ClientError> {
        ZoneClient::list_zones(self, page).await
    }

    async fn get_zone(&self, name: &str) -> Result<ApiResponse<Zone>, ClientError> {
        ZoneClient::get_zone(self, name).await
    }

    async fn patch_zone(
        &self,
        name: &str,
        patch: &ZoneRequest,
    ) -> Result<ApiResponse<Zone>, ClientError> {
        ZoneClient::patch_zone(self, name, patch).await
    }

    async fn apply_patch(&self, name: &str, patch: &ZoneRequest) -> Result<(), ClientError> {
        ZoneClient::apply_patch(self, name, patch).await
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod client_tests;
