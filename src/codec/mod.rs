// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Presentation-format codec for record data.
//!
//! The zone API carries every record's data as one string (`rdata`). For most types this
//! is a single opaque value (an address, a hostname, a text string). Compound types pack
//! several fields into that string:
//!
//! | Type | Format |
//! |------|--------|
//! | MX   | `<priority> <host>` |
//! | SRV  | `<priority> <weight> <port> <target>` |
//! | CAA  | `<flag> <tag> "<value>"` |
//!
//! [`RecordData`] is the structured form, with one variant per record type and an
//! encode/decode pair per compound type in its own submodule.

pub mod caa;
pub mod mx;
pub mod srv;

pub use caa::CaaData;
pub use mx::MxData;
pub use srv::SrvData;

use crate::errors::CodecError;
use crate::types::{Record, RecordType};
use serde::Serialize;
use std::num::ParseIntError;
use std::str::FromStr;

/// Structured record data, one variant per record type.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "UPPERCASE")]
pub enum RecordData {
    /// IPv4 address literal
    A(String),
    /// IPv6 address literal
    Aaaa(String),
    /// Canonical name
    Cname(String),
    /// Name server hostname
    Ns(String),
    /// Pointer target hostname
    Ptr(String),
    /// Text value
    Txt(String),
    Mx(MxData),
    Srv(SrvData),
    Caa(CaaData),
}

impl RecordData {
    /// The record type this data belongs to.
    #[must_use]
    pub fn record_type(&self) -> RecordType {
        match self {
            Self::A(_) => RecordType::A,
            Self::Aaaa(_) => RecordType::Aaaa,
            Self::Cname(_) => RecordType::Cname,
            Self::Ns(_) => RecordType::Ns,
            Self::Ptr(_) => RecordType::Ptr,
            Self::Txt(_) => RecordType::Txt,
            Self::Mx(_) => RecordType::Mx,
            Self::Srv(_) => RecordType::Srv,
            Self::Caa(_) => RecordType::Caa,
        }
    }

    /// Encode into the presentation-format string the API expects.
    #[must_use]
    pub fn encode(&self) -> String {
        match self {
            Self::A(v) | Self::Aaaa(v) | Self::Cname(v) | Self::Ns(v) | Self::Ptr(v) | Self::Txt(v) => {
                v.clone()
            }
            Self::Mx(mx) => mx.encode(),
            Self::Srv(srv) => srv.encode(),
            Self::Caa(caa) => caa.encode(),
        }
    }

    /// Check that the data survives an encode/decode round trip.
    ///
    /// # Errors
    ///
    /// Returns a [`CodecError`] for a CAA tag that is empty or not a bare token.
    pub fn validate(&self) -> Result<(), CodecError> {
        match self {
            Self::Caa(caa) => caa.validate(),
            _ => Ok(()),
        }
    }

    /// Decode a presentation-format string for `record_type`.
    ///
    /// # Errors
    ///
    /// Returns a [`CodecError`] if a numeric field does not parse or a compound
    /// type carries more fields than its grammar allows.
    pub fn decode(record_type: RecordType, data: &str) -> Result<Self, CodecError> {
        Ok(match record_type {
            RecordType::A => Self::A(data.to_string()),
            RecordType::Aaaa => Self::Aaaa(data.to_string()),
            RecordType::Cname => Self::Cname(data.to_string()),
            RecordType::Ns => Self::Ns(data.to_string()),
            RecordType::Ptr => Self::Ptr(data.to_string()),
            RecordType::Txt => Self::Txt(data.to_string()),
            RecordType::Mx => Self::Mx(MxData::decode(data)?),
            RecordType::Srv => Self::Srv(SrvData::decode(data)?),
            RecordType::Caa => Self::Caa(CaaData::decode(data)?),
        })
    }

    /// Build opaque data for a non-compound type.
    ///
    /// Returns `None` for MX, SRV and CAA, which need their structured form.
    #[must_use]
    pub fn simple(record_type: RecordType, value: impl Into<String>) -> Option<Self> {
        let value = value.into();
        match record_type {
            RecordType::A => Some(Self::A(value)),
            RecordType::Aaaa => Some(Self::Aaaa(value)),
            RecordType::Cname => Some(Self::Cname(value)),
            RecordType::Ns => Some(Self::Ns(value)),
            RecordType::Ptr => Some(Self::Ptr(value)),
            RecordType::Txt => Some(Self::Txt(value)),
            RecordType::Mx | RecordType::Srv | RecordType::Caa => None,
        }
    }
}

/// A record with structured data plus its TTL and comments.
///
/// The derived ordering (data, then TTL, then comments) is the stable order in which
/// record sets are handed back to callers.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct TypedRecord {
    pub data: RecordData,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
}

impl TypedRecord {
    /// A record without TTL or comments.
    #[must_use]
    pub fn new(data: RecordData) -> Self {
        Self {
            data,
            ttl: None,
            comments: None,
        }
    }

    #[must_use]
    pub fn with_ttl(mut self, ttl: u32) -> Self {
        self.ttl = Some(ttl);
        self
    }

    #[must_use]
    pub fn with_comments(mut self, comments: impl Into<String>) -> Self {
        self.comments = Some(comments.into());
        self
    }

    /// The record type of the data.
    #[must_use]
    pub fn record_type(&self) -> RecordType {
        self.data.record_type()
    }

    /// Convert into the wire representation.
    #[must_use]
    pub fn to_wire(&self) -> Record {
        Record {
            ttl: self.ttl,
            data: self.data.encode(),
            comments: self.comments.clone(),
        }
    }

    /// Decode a wire record of `record_type`.
    ///
    /// # Errors
    ///
    /// Returns a [`CodecError`] if the record data is malformed for its type.
    pub fn from_wire(record_type: RecordType, record: &Record) -> Result<Self, CodecError> {
        Ok(Self {
            data: RecordData::decode(record_type, &record.data)?,
            ttl: record.ttl,
            comments: record.comments.clone(),
        })
    }
}

/// Split off up to `count` leading whitespace-delimited fields.
///
/// Returns the fields found and the remainder with surrounding whitespace removed.
pub(crate) fn take_fields(data: &str, count: usize) -> (Vec<&str>, &str) {
    let mut rest = data.trim();
    let mut fields = Vec::with_capacity(count);

    while fields.len() < count && !rest.is_empty() {
        let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        fields.push(&rest[..end]);
        rest = rest[end..].trim_start();
    }

    (fields, rest)
}

/// Take exactly `count` fields, padding missing trailing fields with `""`.
///
/// # Errors
///
/// Returns [`CodecError::FieldCount`] if more than `count` fields are present.
pub(crate) fn split_fields(
    record_type: RecordType,
    data: &str,
    count: usize,
) -> Result<Vec<&str>, CodecError> {
    let (mut fields, rest) = take_fields(data, count);

    if !rest.is_empty() {
        return Err(CodecError::FieldCount {
            record_type,
            expected: count,
            found: count + rest.split_whitespace().count(),
            data: data.to_string(),
        });
    }

    fields.resize(count, "");
    Ok(fields)
}

/// Parse a numeric field, reporting the field and record on failure.
pub(crate) fn parse_number<T>(
    record_type: RecordType,
    field: &'static str,
    value: &str,
    data: &str,
) -> Result<T, CodecError>
where
    T: FromStr<Err = ParseIntError>,
{
    value.parse().map_err(|source| CodecError::InvalidNumber {
        record_type,
        field,
        value: value.to_string(),
        data: data.to_string(),
        source,
    })
}

/// Join fields with single spaces, dropping empty trailing fields.
pub(crate) fn join_fields(fields: &[&str]) -> String {
    let used = fields
        .iter()
        .rposition(|f| !f.is_empty())
        .map_or(0, |last| last + 1);
    fields[..used].join(" ")
}
