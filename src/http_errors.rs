// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Classification of non-200 responses from the zone API.
//!
//! The API answers failures with a JSON envelope `{"error": {"status": N, "message": "..."}}`,
//! but it sits behind infrastructure (load balancers, WAFs) that may answer with an HTML
//! page instead. This module turns either shape into a single [`ResponseError`] and maps
//! HTTP status codes to stable reason strings.
//!
//! # Usage
//!
//! ```rust
//! use zonepatch::http_errors::{map_http_error_to_reason, parse_error_response};
//!
//! let body = br#"{"error":{"status":404,"message":"Zone not found"}}"#;
//! let err = parse_error_response(404, Some("application/json"), body);
//! assert_eq!(err.status(), 404);
//!
//! let (reason, _message) = map_http_error_to_reason(404);
//! assert_eq!(reason, "ZoneNotFound");
//! ```

use crate::constants::HTML_CONTENT_TYPE;
use crate::errors::ResponseError;
use crate::types::ApiResponse;
use scraper::{Html, Selector};
use tracing::{debug, error};

/// Request was malformed or rejected by validation
pub const REASON_BAD_REQUEST: &str = "BadRequest";

/// API key missing, invalid or lacking permissions
pub const REASON_AUTH_FAILED: &str = "AuthFailed";

/// Zone or resource does not exist
pub const REASON_ZONE_NOT_FOUND: &str = "ZoneNotFound";

/// Upstream is throttling requests
pub const REASON_RATE_LIMITED: &str = "RateLimited";

/// Upstream failed internally
pub const REASON_UPSTREAM_INTERNAL_ERROR: &str = "UpstreamInternalError";

/// An intermediary could not reach the API
pub const REASON_GATEWAY_ERROR: &str = "GatewayError";

/// Status code without a specific mapping
pub const REASON_UNEXPECTED_RESPONSE: &str = "UnexpectedResponse";

/// Convert a non-200 response into a typed error.
///
/// 1. The body is decoded as the standard envelope; an `error` field is returned verbatim,
///    taking the HTTP status when the envelope carries none.
/// 2. Otherwise, if the content type is HTML, the first `<title>` in the document is
///    used as the message.
/// 3. Otherwise the JSON decoding failure is returned and the raw body is logged.
///
/// # Arguments
///
/// * `status` - HTTP status code of the response
/// * `content_type` - Value of the `Content-Type` header, if any
/// * `body` - The full response body
#[must_use]
pub fn parse_error_response(status: u16, content_type: Option<&str>, body: &[u8]) -> ResponseError {
    match serde_json::from_slice::<ApiResponse<serde_json::Value>>(body) {
        Ok(ApiResponse {
            error: Some(mut api_error),
            ..
        }) => {
            if api_error.status == 0 {
                api_error.status = status;
            }
            ResponseError::Api(api_error)
        }
        Ok(_) => ResponseError::MissingError {
            status,
            body: String::from_utf8_lossy(body).into_owned(),
        },
        Err(source) => {
            if content_type.is_some_and(|ct| ct.contains(HTML_CONTENT_TYPE)) {
                if let Some(title) = extract_html_title(&String::from_utf8_lossy(body)) {
                    debug!(status, title = %title, "Classified HTML error page");
                    return ResponseError::Gateway { status, title };
                }
            }

            error!(
                status,
                body = %String::from_utf8_lossy(body),
                error = %source,
                "error parsing error response"
            );
            ResponseError::Undecodable { status, source }
        }
    }
}

/// Text of the first `<title>` element of an HTML document, in document order.
///
/// Returns `None` when there is no title or it is blank.
#[must_use]
pub fn extract_html_title(html: &str) -> Option<String> {
    let selector = Selector::parse("title").ok()?;
    let document = Html::parse_document(html);

    let title = document
        .select(&selector)
        .next()?
        .text()
        .collect::<String>();
    let title = title.trim();

    if title.is_empty() {
        None
    } else {
        Some(title.to_string())
    }
}

/// Map HTTP status code to reason and message.
///
/// # HTTP Code Mapping
///
/// | HTTP Code | Reason | Meaning |
/// |-----------|--------|---------|
/// | 400, 422 | `BadRequest` | Invalid request or patch document |
/// | 401, 403 | `AuthFailed` | API key missing, invalid or not permitted |
/// | 404 | `ZoneNotFound` | Zone not found |
/// | 429 | `RateLimited` | Too many requests |
/// | 500 | `UpstreamInternalError` | Internal server error |
/// | 502, 503, 504 | `GatewayError` | Intermediary could not reach the API |
/// | Other | `UnexpectedResponse` | Unexpected status |
///
/// # Example
///
/// ```rust
/// use zonepatch::http_errors::map_http_error_to_reason;
///
/// let (reason, message) = map_http_error_to_reason(503);
/// assert_eq!(reason, "GatewayError");
/// assert!(message.contains("503"));
/// ```
#[must_use]
pub fn map_http_error_to_reason(status_code: u16) -> (&'static str, String) {
    match status_code {
        400 => (
            REASON_BAD_REQUEST,
            "Invalid request to zone API (400)".into(),
        ),
        422 => (
            REASON_BAD_REQUEST,
            "Patch document rejected by zone API (422)".into(),
        ),
        401 => (
            REASON_AUTH_FAILED,
            "Zone API authentication required (401)".into(),
        ),
        403 => (
            REASON_AUTH_FAILED,
            "Zone API authorization failed (403)".into(),
        ),
        404 => (REASON_ZONE_NOT_FOUND, "Zone not found (404)".into()),
        429 => (
            REASON_RATE_LIMITED,
            "Zone API rate limit exceeded (429)".into(),
        ),
        500 => (
            REASON_UPSTREAM_INTERNAL_ERROR,
            "Zone API internal error (500)".into(),
        ),
        502 => (
            REASON_GATEWAY_ERROR,
            "Bad gateway reaching zone API (502)".into(),
        ),
        503 => (
            REASON_GATEWAY_ERROR,
            "Zone API service unavailable (503)".into(),
        ),
        504 => (
            REASON_GATEWAY_ERROR,
            "Gateway timeout reaching zone API (504)".into(),
        ),
        _ => (
            REASON_UNEXPECTED_RESPONSE,
            format!("Unexpected HTTP response from zone API ({status_code})"),
        ),
    }
}

#[cfg(test)]
#[path = "http_errors_tests.rs"]
mod http_errors_tests;
