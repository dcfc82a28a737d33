// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Global constants for the zonepatch client.
//!
//! This module contains all numeric and string constants used throughout the codebase.
//! Constants are organized by category for easy maintenance.

// ============================================================================
// API Constants
// ============================================================================

/// API version path segment
pub const API_VERSION: &str = "v1";

/// Collection path segment for zones
pub const ZONES_PATH: &str = "zones";

/// Header carrying the caller's API key
pub const API_KEY_HEADER: &str = "X-API-KEY";

/// Media type sent in `Accept` and `Content-Type` headers
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Media type fragment identifying HTML error pages from gateways
pub const HTML_CONTENT_TYPE: &str = "text/html";

/// Value of the `type` discriminator on zone documents
pub const ZONE_RESOURCE_TYPE: &str = "zone";

// ============================================================================
// Client Defaults
// ============================================================================

/// Default API host used when none is configured
pub const DEFAULT_API_HOST: &str = "https://api.abion.com";

/// Default HTTP timeout (connection + read) in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

// ============================================================================
// Environment Variables
// ============================================================================

/// Environment variable overriding the API host
pub const ENV_API_HOST: &str = "ZONEPATCH_API_HOST";

/// Environment variable carrying the API key
pub const ENV_API_KEY: &str = "ZONEPATCH_API_KEY";

/// Environment variable overriding the timeout in seconds
pub const ENV_API_TIMEOUT: &str = "ZONEPATCH_API_TIMEOUT";

// ============================================================================
// Import IDs
// ============================================================================

/// Separator between zone and name in import IDs (`example.com/www`)
pub const IMPORT_ID_SEPARATOR: char = '/';
