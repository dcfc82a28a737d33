// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! CAA record data: `<flag> <tag> "<value>"`.

use super::{parse_number, take_fields};
use crate::errors::CodecError;
use crate::types::RecordType;
use serde::Serialize;

/// Certification authority authorization data.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct CaaData {
    /// 0 = not critical, 128 = issuer critical
    pub flag: u8,
    /// Property tag, commonly `issue`, `issuewild` or `iodef`
    pub tag: String,
    /// Property value, without the surrounding quotes
    pub value: String,
}

impl CaaData {
    #[must_use]
    pub fn new(flag: u8, tag: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            flag,
            tag: tag.into(),
            value: value.into(),
        }
    }

    /// Check that [`Self::encode`] output decodes back to `self`.
    ///
    /// The tag is a bare token: it must be non-empty and free of whitespace and quotes.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::InvalidField`] for a tag that cannot be encoded.
    pub fn validate(&self) -> Result<(), CodecError> {
        if self.tag.is_empty() {
            return Err(invalid_tag("must not be empty", &self.encode()));
        }
        if self.tag.chars().any(|c| c.is_whitespace() || c == '"') {
            return Err(invalid_tag(
                "must not contain whitespace or quotes",
                &self.encode(),
            ));
        }
        Ok(())
    }

    #[must_use]
    pub fn encode(&self) -> String {
        format!("{} {} \"{}\"", self.flag, self.tag, self.value)
    }

    /// The value is everything after the tag, so quoted values may contain spaces.
    ///
    /// # Errors
    ///
    /// Returns an error if the flag is not a `u8`, or a quoted value sits where the tag
    /// belongs.
    pub fn decode(data: &str) -> Result<Self, CodecError> {
        let (fields, rest) = take_fields(data, 2);
        let flag = fields.first().copied().unwrap_or_default();
        let tag = fields.get(1).copied().unwrap_or_default();

        if tag.starts_with('"') {
            return Err(invalid_tag("must not be empty", data));
        }

        Ok(Self {
            flag: parse_number(RecordType::Caa, "flag", flag, data)?,
            tag: tag.to_string(),
            value: strip_quotes(rest).to_string(),
        })
    }
}

fn invalid_tag(reason: &'static str, data: &str) -> CodecError {
    CodecError::InvalidField {
        record_type: RecordType::Caa,
        field: "tag",
        reason,
        data: data.to_string(),
    }
}

fn strip_quotes(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}

#[cfg(test)]
#[path = "caa_tests.rs"]
mod caa_tests;
