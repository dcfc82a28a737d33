// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Wire types for the DNS zone API.
//!
//! These mirror the JSON documents exchanged with the upstream API. Every optional
//! field is omitted on serialization when empty so that a [`ZoneRequest`] only carries
//! what a merge patch is meant to change.

use crate::constants::ZONE_RESOURCE_TYPE;
use crate::errors::ApiError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Records of one name, keyed by record-type token (`"A"`, `"MX"`, ...).
///
/// A `None` value serializes to `null`, which deletes the cell under JSON Merge Patch.
pub type RecordTypeMap = BTreeMap<String, Option<Vec<Record>>>;

/// All records of a zone, keyed by relative name (`"@"`, `"www"`, ...).
pub type RecordsMap = BTreeMap<String, RecordTypeMap>;

/// DNS record types supported by the zone API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RecordType {
    A,
    Aaaa,
    Caa,
    Cname,
    Mx,
    Ns,
    Ptr,
    Srv,
    Txt,
}

impl RecordType {
    /// Every supported record type.
    pub const ALL: [RecordType; 9] = [
        Self::A,
        Self::Aaaa,
        Self::Caa,
        Self::Cname,
        Self::Mx,
        Self::Ns,
        Self::Ptr,
        Self::Srv,
        Self::Txt,
    ];

    /// The token used as a key in the zone's records map.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::Aaaa => "AAAA",
            Self::Caa => "CAA",
            Self::Cname => "CNAME",
            Self::Mx => "MX",
            Self::Ns => "NS",
            Self::Ptr => "PTR",
            Self::Srv => "SRV",
            Self::Txt => "TXT",
        }
    }

    /// Whether `data` packs several fields for this type.
    #[must_use]
    pub fn is_compound(self) -> bool {
        matches!(self, Self::Caa | Self::Mx | Self::Srv)
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not a supported record-type token.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported record type '{0}'")]
pub struct UnknownRecordType(pub String);

impl FromStr for RecordType {
    type Err = UnknownRecordType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == upper)
            .ok_or_else(|| UnknownRecordType(s.to_string()))
    }
}

/// Pagination parameters and metadata for the zones collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
}

impl Pagination {
    /// Query parameters for the set fields, in a stable order.
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        [
            ("offset", self.offset),
            ("limit", self.limit),
            ("total", self.total),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.map(|v| (key, v.to_string())))
        .collect()
    }
}

/// Response metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    /// Opaque upstream invocation id, surfaced for tracing only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invocation_id: Option<String>,
    #[serde(flatten)]
    pub pagination: Pagination,
}

/// Standard response envelope: `{"meta": ..., "data": ..., "error": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Metadata>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
}

/// A zone, identified by its apex name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    #[serde(rename = "type", default, skip_serializing_if = "String::is_empty")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default)]
    pub attributes: Attributes,
}

impl Zone {
    /// A zone document with only the discriminator and id set.
    #[must_use]
    pub fn named(name: &str) -> Self {
        Self {
            kind: ZONE_RESOURCE_TYPE.to_string(),
            id: name.to_string(),
            attributes: Attributes::default(),
        }
    }

    /// Records of `record_type` at `name`, empty when the cell is absent.
    #[must_use]
    pub fn records_of(&self, name: &str, record_type: RecordType) -> &[Record] {
        self.attributes
            .records
            .as_ref()
            .and_then(|records| records.get(name))
            .and_then(|types| types.get(record_type.as_str()))
            .and_then(Option::as_deref)
            .unwrap_or_default()
    }

    /// Whether any record of any type exists at `name`.
    #[must_use]
    pub fn has_name(&self, name: &str) -> bool {
        self.attributes
            .records
            .as_ref()
            .and_then(|records| records.get(name))
            .is_some_and(|types| types.values().any(|r| r.as_ref().is_some_and(|r| !r.is_empty())))
    }
}

/// Zone metadata plus the records and redirects maps.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organisation_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organisation_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dns_type_description: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub slave: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub pending: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub deleted: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<Settings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub records: Option<RecordsMap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirects: Option<BTreeMap<String, Vec<Redirect>>>,
}

/// SOA-like zone settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expire: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
}

/// A single record in presentation format.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Time to live in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
    /// Type-specific presentation data, e.g. `"10 mail.example.com."`
    #[serde(rename = "rdata", default)]
    pub data: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
}

/// An HTTP redirect rule attached to a zone.
///
/// Fields missing upstream decode to their defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Redirect {
    pub path: String,
    pub destination: String,
    pub status: u16,
    pub slugs: bool,
    pub certificate: bool,
}

/// Body of a zone patch: `{"data": <zone>}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ZoneRequest {
    pub data: Zone,
}

impl ZoneRequest {
    /// The records map of the request, if any cell has been set.
    #[must_use]
    pub fn records(&self) -> Option<&RecordsMap> {
        self.data.attributes.records.as_ref()
    }
}

#[cfg(test)]
#[path = "types_tests.rs"]
mod types_tests;
