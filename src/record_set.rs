// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Generic create/read/update/delete for one record type at one name.
//!
//! A [`RecordSet`] owns the `(name, type)` cell of a zone: reading decodes the cell into
//! [`TypedRecord`]s, writing replaces it with a merge patch that touches nothing else.
//! Every record type goes through the same handler, parameterized by [`RecordType`].
//!
//! # Example
//!
//! ```rust,no_run
//! use zonepatch::client::ZoneClient;
//! use zonepatch::codec::{MxData, RecordData, TypedRecord};
//! use zonepatch::config::ClientConfig;
//! use zonepatch::record_set::RecordSet;
//! use zonepatch::types::RecordType;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = ZoneClient::new(ClientConfig::from_env()?)?;
//! let mx = RecordSet::new(client, RecordType::Mx);
//!
//! let record = TypedRecord::new(RecordData::Mx(MxData {
//!     priority: 10,
//!     host: "mail.example.com.".to_string(),
//! }))
//! .with_ttl(3600);
//!
//! mx.apply("example.com", "@", None, &[record]).await?;
//! println!("{:?}", mx.read("example.com", "@").await?);
//! # Ok(())
//! # }
//! ```

use crate::client::ZoneApi;
use crate::codec::TypedRecord;
use crate::constants::IMPORT_ID_SEPARATOR;
use crate::errors::{ClientError, RecordSetError};
use crate::patch::{build_move_patch, build_record_patch};
use crate::types::{Record, RecordType, Zone};
use std::fmt;
use tracing::{debug, info};

/// Handler for the records of one type, generic over the zone API.
#[derive(Debug, Clone)]
pub struct RecordSet<A: ZoneApi> {
    api: A,
    record_type: RecordType,
}

impl<A: ZoneApi> RecordSet<A> {
    #[must_use]
    pub fn new(api: A, record_type: RecordType) -> Self {
        Self { api, record_type }
    }

    #[must_use]
    pub fn record_type(&self) -> RecordType {
        self.record_type
    }

    /// Current records at `name`, sorted.
    ///
    /// A name or type with no records yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns an error if the zone cannot be fetched or upstream data does not decode.
    pub async fn read(&self, zone: &str, name: &str) -> Result<Vec<TypedRecord>, RecordSetError> {
        let current = self.fetch(zone, name).await?;
        self.decode(zone, name, current.records_of(name, self.record_type))
    }

    /// Like [`Self::read`], but an empty result is an error.
    ///
    /// # Errors
    ///
    /// Returns [`RecordSetError::NoRecordsAtName`] when `name` has no records at all,
    /// [`RecordSetError::NoRecordsOfType`] when it has records of other types only, or
    /// any error [`Self::read`] can return.
    pub async fn lookup(
        &self,
        zone: &str,
        name: &str,
    ) -> Result<Vec<TypedRecord>, RecordSetError> {
        let current = self.fetch(zone, name).await?;

        if !current.has_name(name) {
            return Err(RecordSetError::NoRecordsAtName {
                zone: zone.to_string(),
                name: name.to_string(),
            });
        }

        let records = current.records_of(name, self.record_type);
        if records.is_empty() {
            return Err(RecordSetError::NoRecordsOfType {
                zone: zone.to_string(),
                name: name.to_string(),
                record_type: self.record_type,
            });
        }

        self.decode(zone, name, records)
    }

    /// Replace the records at `name` with `records`.
    ///
    /// When `previous_name` is set and differs from `name`, the old cell is cleared in
    /// the same request.
    ///
    /// # Errors
    ///
    /// Returns [`RecordSetError::TypeMismatch`] if any record is not of this handler's
    /// type, [`RecordSetError::Codec`] if a record cannot be encoded unambiguously, or an
    /// error if the patch is rejected.
    pub async fn apply(
        &self,
        zone: &str,
        name: &str,
        previous_name: Option<&str>,
        records: &[TypedRecord],
    ) -> Result<(), RecordSetError> {
        let wire = self.to_wire(zone, name, records)?;
        let old_name = previous_name.unwrap_or(name);

        debug!(
            zone = %zone,
            name = %name,
            previous_name = %old_name,
            record_type = %self.record_type,
            count = wire.len(),
            "Applying record set"
        );

        let patch = build_move_patch(zone, old_name, name, self.record_type, wire);
        self.api
            .apply_patch(zone, &patch)
            .await
            .map_err(|source| self.client_error(zone, name, source))?;

        info!(
            zone = %zone,
            name = %name,
            record_type = %self.record_type,
            "Record set applied"
        );
        Ok(())
    }

    /// Delete every record of this type at `name`.
    ///
    /// # Errors
    ///
    /// Returns an error if the patch is rejected.
    pub async fn delete(&self, zone: &str, name: &str) -> Result<(), RecordSetError> {
        let patch = build_record_patch(zone, name, self.record_type, Vec::new());
        self.api
            .apply_patch(zone, &patch)
            .await
            .map_err(|source| self.client_error(zone, name, source))?;

        info!(
            zone = %zone,
            name = %name,
            record_type = %self.record_type,
            "Record set deleted"
        );
        Ok(())
    }

    async fn fetch(&self, zone: &str, name: &str) -> Result<Zone, RecordSetError> {
        let response = self
            .api
            .get_zone(zone)
            .await
            .map_err(|source| self.client_error(zone, name, source))?;
        Ok(response.data.unwrap_or_else(|| Zone::named(zone)))
    }

    fn client_error(&self, zone: &str, name: &str, source: ClientError) -> RecordSetError {
        RecordSetError::Client {
            zone: zone.to_string(),
            name: name.to_string(),
            record_type: self.record_type,
            source,
        }
    }

    fn decode(
        &self,
        zone: &str,
        name: &str,
        records: &[Record],
    ) -> Result<Vec<TypedRecord>, RecordSetError> {
        let mut decoded = records
            .iter()
            .map(|record| TypedRecord::from_wire(self.record_type, record))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|source| RecordSetError::Codec {
                zone: zone.to_string(),
                name: name.to_string(),
                record_type: self.record_type,
                source,
            })?;

        decoded.sort();
        Ok(decoded)
    }

    fn to_wire(
        &self,
        zone: &str,
        name: &str,
        records: &[TypedRecord],
    ) -> Result<Vec<Record>, RecordSetError> {
        records
            .iter()
            .map(|record| {
                let found = record.record_type();
                if found != self.record_type {
                    return Err(RecordSetError::TypeMismatch {
                        expected: self.record_type,
                        found,
                    });
                }

                record
                    .data
                    .validate()
                    .map_err(|source| RecordSetError::Codec {
                        zone: zone.to_string(),
                        name: name.to_string(),
                        record_type: self.record_type,
                        source,
                    })?;
                Ok(record.to_wire())
            })
            .collect()
    }
}

/// Identifier of a record set in `zone/name` form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportId {
    pub zone: String,
    pub name: String,
}

impl ImportId {
    /// Parse `zone/name`.
    ///
    /// # Errors
    ///
    /// Returns [`RecordSetError::InvalidImportId`] unless the input has exactly two
    /// non-empty parts.
    pub fn parse(id: &str) -> Result<Self, RecordSetError> {
        let invalid = |reason| RecordSetError::InvalidImportId {
            id: id.to_string(),
            reason,
        };

        let mut parts = id.split(IMPORT_ID_SEPARATOR);
        let (Some(zone), Some(name), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(invalid("expected format zone/name"));
        };

        if zone.is_empty() || name.is_empty() {
            return Err(invalid("zone and name must not be empty"));
        }

        Ok(Self {
            zone: zone.to_string(),
            name: name.to_string(),
        })
    }
}

impl fmt::Display for ImportId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{IMPORT_ID_SEPARATOR}{}", self.zone, self.name)
    }
}

#[cfg(test)]
#[path = "record_set_tests.rs"]
mod record_set_tests;
