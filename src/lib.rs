// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! # zonepatch - client for a DNS zone REST API
//!
//! zonepatch talks to a DNS hosting provider's zone API and edits zone records
//! one `(name, type)` cell at a time using JSON Merge Patch (RFC 7396).
//!
//! ## Modules
//!
//! - [`client`] - HTTP client for listing, fetching and patching zones
//! - [`patch`] - Merge patch construction that touches only the intended cells
//! - [`codec`] - Presentation-format codec for MX, SRV and CAA record data
//! - [`http_errors`] - Classification of non-200 responses, including HTML error pages
//! - [`record_set`] - Generic create/read/update/delete handler for one record type
//! - [`config`] - Explicit client configuration, optionally loaded from the environment
//! - [`types`] - Wire types of the zone API
//! - [`errors`] - Error types
//!
//! ## Example
//!
//! ```rust,no_run
//! use zonepatch::client::ZoneClient;
//! use zonepatch::codec::{CaaData, RecordData, TypedRecord};
//! use zonepatch::config::ClientConfig;
//! use zonepatch::record_set::RecordSet;
//! use zonepatch::types::RecordType;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = ZoneClient::new(ClientConfig::new("my-api-key"))?;
//!
//! let caa = RecordSet::new(client, RecordType::Caa);
//! let record = TypedRecord::new(RecordData::Caa(CaaData::new(0, "issue", "letsencrypt.org")));
//! caa.apply("example.com", "@", None, &[record]).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Features
//!
//! - **Minimal patches** - Sibling record types and names are never rewritten
//! - **Record moves** - Renaming clears the old name in the same request
//! - **Typed record data** - A, AAAA, CAA, CNAME, MX, NS, PTR, SRV, TXT
//! - **Readable failures** - Gateway HTML pages are reduced to their `<title>`

pub mod client;
pub mod codec;
pub mod config;
pub mod constants;
pub mod errors;
pub mod http_errors;
pub mod patch;
pub mod record_set;
pub mod types;
