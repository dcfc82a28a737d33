// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! JSON Merge Patch (RFC 7396) construction for zone records.
//!
//! A zone's records form a two-level map, `name -> type -> [record]`. Each
//! `(name, type)` pair is a *cell*, the smallest unit a patch can change. Under merge
//! patch semantics every key present in the document overwrites the server's value and
//! `null` deletes it, so a patch must contain exactly the cells being changed and
//! nothing else.
//!
//! # Example
//!
//! ```rust
//! use zonepatch::patch::RecordPatch;
//! use zonepatch::types::{Record, RecordType};
//!
//! // Move the A records of "@" to "test"
//! let records = vec![Record { data: "192.0.2.1".into(), ..Default::default() }];
//! let request = RecordPatch::new("example.com")
//!     .set("test", RecordType::A, records)
//!     .clear("@", RecordType::A)
//!     .build();
//!
//! let cells = request.records().unwrap();
//! assert!(cells["test"]["A"].is_some());
//! assert!(cells["@"]["A"].is_none());
//! ```

use crate::types::{Record, RecordType, RecordsMap, Zone, ZoneRequest};

/// Builder for a patch touching one or more explicit cells of one zone.
#[derive(Debug, Clone)]
pub struct RecordPatch {
    zone: String,
    records: RecordsMap,
}

impl RecordPatch {
    #[must_use]
    pub fn new(zone: &str) -> Self {
        Self {
            zone: zone.to_string(),
            records: RecordsMap::new(),
        }
    }

    /// Replace all records of `record_type` at `name`.
    ///
    /// An empty `records` deletes the cell.
    #[must_use]
    pub fn set(mut self, name: &str, record_type: RecordType, records: Vec<Record>) -> Self {
        let value = if records.is_empty() {
            None
        } else {
            Some(records)
        };

        self.records
            .entry(name.to_string())
            .or_default()
            .insert(record_type.as_str().to_string(), value);
        self
    }

    /// Delete all records of `record_type` at `name`.
    #[must_use]
    pub fn clear(self, name: &str, record_type: RecordType) -> Self {
        self.set(name, record_type, Vec::new())
    }

    #[must_use]
    pub fn build(self) -> ZoneRequest {
        let mut zone = Zone::named(&self.zone);
        zone.attributes.records = Some(self.records);
        ZoneRequest { data: zone }
    }
}

/// Build a patch that sets exactly the `(name, record_type)` cell of `zone`.
///
/// Passing no records produces the deletion patch for that cell.
#[must_use]
pub fn build_record_patch(
    zone: &str,
    name: &str,
    record_type: RecordType,
    records: Vec<Record>,
) -> ZoneRequest {
    RecordPatch::new(zone).set(name, record_type, records).build()
}

/// Build a patch moving records of `record_type` from `old_name` to `new_name`.
///
/// Both cells end up in the same request: the new cell with `records`, the old cell
/// explicitly deleted. When the names are equal this is a plain set.
#[must_use]
pub fn build_move_patch(
    zone: &str,
    old_name: &str,
    new_name: &str,
    record_type: RecordType,
    records: Vec<Record>,
) -> ZoneRequest {
    let patch = RecordPatch::new(zone).set(new_name, record_type, records);

    if old_name == new_name {
        patch.build()
    } else {
        patch.clear(old_name, record_type).build()
    }
}

#[cfg(test)]
#[path = "patch_tests.rs"]
mod patch_tests;
