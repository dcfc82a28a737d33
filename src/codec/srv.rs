// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! SRV record data: `<priority> <weight> <port> <target>`.

use super::{join_fields, parse_number, split_fields};
use crate::errors::CodecError;
use crate::types::RecordType;
use serde::Serialize;

/// Service locator data.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct SrvData {
    /// Priority of the target host (lower is higher priority)
    pub priority: u16,
    /// Relative weight for records with the same priority
    pub weight: u16,
    /// TCP or UDP port on which the service is found
    pub port: u16,
    /// Canonical hostname of the machine providing the service
    pub target: String,
}

impl SrvData {
    #[must_use]
    pub fn new(priority: u16, weight: u16, port: u16, target: impl Into<String>) -> Self {
        Self {
            priority,
            weight,
            port,
            target: target.into(),
        }
    }

    #[must_use]
    pub fn encode(&self) -> String {
        join_fields(&[
            self.priority.to_string().as_str(),
            self.weight.to_string().as_str(),
            self.port.to_string().as_str(),
            self.target.as_str(),
        ])
    }

    /// # Errors
    ///
    /// Returns an error if priority, weight or port is not a `u16`, or extra fields are
    /// present.
    pub fn decode(data: &str) -> Result<Self, CodecError> {
        let fields = split_fields(RecordType::Srv, data, 4)?;

        Ok(Self {
            priority: parse_number(RecordType::Srv, "priority", fields[0], data)?,
            weight: parse_number(RecordType::Srv, "weight", fields[1], data)?,
            port: parse_number(RecordType::Srv, "port", fields[2], data)?,
            target: fields[3].to_string(),
        })
    }
}

#[cfg(test)]
#[path = "srv_tests.rs"]
mod srv_tests;
