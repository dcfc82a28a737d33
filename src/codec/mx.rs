// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! MX record data: `<priority> <host>`.

use super::{join_fields, parse_number, split_fields};
use crate::errors::CodecError;
use crate::types::RecordType;
use serde::Serialize;

/// Mail exchanger data.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct MxData {
    /// Order in which mail servers are tried (lower first)
    pub priority: u16,
    /// Hostname of the mail server
    pub host: String,
}

impl MxData {
    #[must_use]
    pub fn new(priority: u16, host: impl Into<String>) -> Self {
        Self {
            priority,
            host: host.into(),
        }
    }

    #[must_use]
    pub fn encode(&self) -> String {
        join_fields(&[self.priority.to_string().as_str(), self.host.as_str()])
    }

    /// # Errors
    ///
    /// Returns an error if the priority is not a `u16` or extra fields are present.
    pub fn decode(data: &str) -> Result<Self, CodecError> {
        let fields = split_fields(RecordType::Mx, data, 2)?;

        Ok(Self {
            priority: parse_number(RecordType::Mx, "priority", fields[0], data)?,
            host: fields[1].to_string(),
        })
    }
}

#[cfg(test)]
#[path = "mx_tests.rs"]
mod mx_tests;
