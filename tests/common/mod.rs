// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

// Common test utilities for integration tests

use serde_json::json;
use std::time::Duration;
use wiremock::MockServer;
use zonepatch::client::ZoneClient;
use zonepatch::config::ClientConfig;

pub const API_KEY: &str = "test-api-key";

/// Client pointed at the mock server with the default timeout
pub fn client_for(server: &MockServer) -> ZoneClient {
    ZoneClient::new(ClientConfig::new(API_KEY).with_host(server.uri()))
        .expect("mock server URI is a valid base URL")
}

/// Client pointed at the mock server with a short timeout
pub fn client_with_timeout(server: &MockServer, timeout: Duration) -> ZoneClient {
    ZoneClient::new(
        ClientConfig::new(API_KEY)
            .with_host(server.uri())
            .with_timeout(timeout),
    )
    .expect("mock server URI is a valid base URL")
}

/// A zone response as upstream returns it
pub fn zone_body() -> serde_json::Value {
    json!({
        "meta": {"invocationId": "inv-1"},
        "data": {
            "type": "zone",
            "id": "example.com",
            "attributes": {
                "organisationId": "org-1",
                "records": {
                    "@": {
                        "A": [{"rdata": "192.0.2.1"}],
                        "MX": [
                            {"ttl": 3600, "rdata": "20 mail2.example.com."},
                            {"ttl": 3600, "rdata": "10 mail1.example.com."}
                        ],
                        "SOA": [{"rdata": "ns1.example.com. hostmaster.example.com. 1 7200 3600 1209600 3600"}]
                    },
                    "_sip._tcp": {
                        "SRV": [{"rdata": "1 100 443 server1.example.com."}]
                    }
                }
            }
        }
    })
}
