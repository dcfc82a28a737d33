// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Error types for zone API operations.
//!
//! This module provides specialized error types for:
//! - Upstream API errors (the `{"error": {...}}` envelope)
//! - Responses that are not the API's own envelope (gateway HTML pages, opaque bodies)
//! - Transport failures (connection, TLS, timeout)
//! - Compound record data that cannot be decoded
//!
//! Every variant carries enough context (operation, zone, record name/type) to be
//! surfaced to an operator without further wrapping.

use crate::http_errors::map_http_error_to_reason;
use crate::types::RecordType;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error reported by the API in its standard envelope.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("api error: status={status}, message={message}")]
pub struct ApiError {
    /// HTTP status as reported in the envelope, 0 when upstream omits it
    #[serde(default)]
    pub status: u16,
    /// Message text, verbatim from upstream
    #[serde(default)]
    pub message: String,
}

/// Classification of a non-200 response.
#[derive(Error, Debug)]
pub enum ResponseError {
    /// The API's own error envelope
    #[error(transparent)]
    Api(#[from] ApiError),

    /// An HTML page from an intermediary (load balancer, WAF) carrying a `<title>`
    #[error("API error: {title}")]
    Gateway {
        /// HTTP status of the response
        status: u16,
        /// Text of the page's `<title>` element
        title: String,
    },

    /// Valid JSON that is not an error envelope
    #[error("unexpected error response (HTTP {status}): {body}")]
    MissingError {
        /// HTTP status of the response
        status: u16,
        /// Raw response body
        body: String,
    },

    /// Neither the JSON envelope nor an HTML page with a title
    #[error("error parsing error response (HTTP {status}): {source}")]
    Undecodable {
        /// HTTP status of the response
        status: u16,
        /// JSON decoding failure
        #[source]
        source: serde_json::Error,
    },
}

impl ResponseError {
    /// The HTTP status this error was classified from.
    ///
    /// For the API envelope the status reported in the body is preferred.
    #[must_use]
    pub fn status(&self) -> u16 {
        match self {
            Self::Api(e) => e.status,
            Self::Gateway { status, .. }
            | Self::MissingError { status, .. }
            | Self::Undecodable { status, .. } => *status,
        }
    }
}

/// Errors returned by [`crate::client::ZoneClient`].
#[derive(Error, Debug)]
pub enum ClientError {
    /// The configured host is not a usable base URL
    #[error("invalid API host '{host}': {reason}")]
    InvalidHost {
        /// The configured host
        host: String,
        /// Why it was rejected
        reason: String,
    },

    /// The HTTP transport could not be constructed
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),

    /// The request body could not be serialized
    #[error("could not {context}: failed to create request JSON body: {source}")]
    Encode {
        /// Operation context, e.g. `update zone example.com`
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// Connection failure, TLS failure or timeout
    #[error("could not {context}: error sending request: {source}")]
    Transport {
        /// Operation context
        context: String,
        #[source]
        source: reqwest::Error,
    },

    /// A non-200 response, classified by the error parser
    #[error("could not {context}: {source}")]
    Response {
        /// Operation context
        context: String,
        #[source]
        source: ResponseError,
    },

    /// The response body could not be read
    #[error("could not {context}: error reading response body: {source}")]
    ReadBody {
        /// Operation context
        context: String,
        #[source]
        source: reqwest::Error,
    },

    /// A 200 response whose body does not match the expected shape
    #[error("could not {context}: error unmarshalling response: {source}")]
    Decode {
        /// Operation context
        context: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ClientError {
    /// HTTP status of an upstream failure, if the exchange got that far.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Response { source, .. } => Some(source.status()),
            Self::Transport { source, .. } | Self::ReadBody { source, .. } => {
                source.status().map(|s| s.as_u16())
            }
            _ => None,
        }
    }

    /// The upstream error envelope, when the API produced one.
    #[must_use]
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Response {
                source: ResponseError::Api(e),
                ..
            } => Some(e),
            _ => None,
        }
    }

    /// Returns true if upstream reported the zone as unknown (HTTP 404).
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Returns true if a caller-side retry could plausibly succeed.
    ///
    /// This client never retries on its own; this only informs callers that
    /// implement their own retry policy.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport { .. } | Self::ReadBody { .. } => true,
            Self::Response { source, .. } => {
                let status = source.status();
                status == 429 || (500..600).contains(&status)
            }
            Self::InvalidHost { .. }
            | Self::HttpClient(_)
            | Self::Encode { .. }
            | Self::Decode { .. } => false,
        }
    }

    /// Stable reason code for this error, suitable for status reporting.
    #[must_use]
    pub fn status_reason(&self) -> &'static str {
        match self {
            Self::InvalidHost { .. } | Self::HttpClient(_) => "InvalidConfiguration",
            Self::Encode { .. } => "InvalidRequest",
            Self::Transport { .. } | Self::ReadBody { .. } => "UpstreamUnreachable",
            Self::Response { source, .. } => map_http_error_to_reason(source.status()).0,
            Self::Decode { .. } => "MalformedResponse",
        }
    }
}

/// Compound record data that does not match its type's grammar.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// A numeric field (priority, weight, port, flag) failed to parse
    #[error("malformed {record_type} record data '{data}': invalid {field} '{value}': {source}")]
    InvalidNumber {
        record_type: RecordType,
        /// Field name, e.g. `priority`
        field: &'static str,
        /// The offending token
        value: String,
        /// Full record data
        data: String,
        #[source]
        source: std::num::ParseIntError,
    },

    /// More whitespace-separated fields than the type allows
    #[error("malformed {record_type} record data '{data}': expected at most {expected} fields, found {found}")]
    FieldCount {
        record_type: RecordType,
        expected: usize,
        found: usize,
        /// Full record data
        data: String,
    },

    /// A field whose content would not survive encoding, e.g. an empty CAA tag
    #[error("malformed {record_type} record data '{data}': {field} {reason}")]
    InvalidField {
        record_type: RecordType,
        /// Field name, e.g. `tag`
        field: &'static str,
        reason: &'static str,
        /// Full record data
        data: String,
    },
}

/// Errors from the generic record set handler.
#[derive(Error, Debug)]
pub enum RecordSetError {
    /// Failure talking to the API
    #[error("{record_type} records at '{name}' in zone '{zone}': {source}")]
    Client {
        zone: String,
        name: String,
        record_type: RecordType,
        #[source]
        source: ClientError,
    },

    /// Upstream returned record data this crate cannot decode
    #[error("invalid {record_type} record at '{name}' in zone '{zone}': {source}")]
    Codec {
        zone: String,
        name: String,
        record_type: RecordType,
        #[source]
        source: CodecError,
    },

    /// The name has no records of any type
    #[error("no records exist on '{name}' level in zone '{zone}'")]
    NoRecordsAtName { zone: String, name: String },

    /// The name has records, but none of the requested type
    #[error("no {record_type} records exist on '{name}' level in zone '{zone}'")]
    NoRecordsOfType {
        zone: String,
        name: String,
        record_type: RecordType,
    },

    /// A record handed to a handler carries data of another type
    #[error("cannot store {found} record data in a {expected} record set")]
    TypeMismatch {
        expected: RecordType,
        found: RecordType,
    },

    /// Import ID not in `zone/name` form
    #[error("invalid import ID '{id}': {reason}")]
    InvalidImportId { id: String, reason: &'static str },
}

impl RecordSetError {
    /// The underlying client error, if the API call itself failed.
    #[must_use]
    pub fn client_error(&self) -> Option<&ClientError> {
        match self {
            Self::Client { source, .. } => Some(source),
            _ => None,
        }
    }

    /// Returns true if upstream reported the zone as unknown (HTTP 404).
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.client_error().is_some_and(ClientError::is_not_found)
    }
}

#[cfg(test)]
#[path = "errors_tests.rs"]
mod errors_tests;
