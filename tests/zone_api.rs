// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Integration tests for the zone API client against a mock HTTP server.
//!
//! Run with: cargo test --test zone_api

mod common;

use common::{client_for, client_with_timeout, zone_body, API_KEY};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};
use zonepatch::codec::{MxData, RecordData, SrvData, TypedRecord};
use zonepatch::errors::{ClientError, RecordSetError, ResponseError};
use zonepatch::patch::build_record_patch;
use zonepatch::record_set::RecordSet;
use zonepatch::types::{Pagination, Record, RecordType};

// ============================================================================
// list_zones / get_zone
// ============================================================================

#[tokio::test]
async fn test_get_zone_sends_auth_headers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/zones/example.com"))
        .and(header("X-API-KEY", API_KEY))
        .and(header("Accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(zone_body()))
        .expect(1)
        .mount(&server)
        .await;

    let response = client_for(&server).get_zone("example.com").await.unwrap();

    let meta = response.meta.unwrap();
    assert_eq!(meta.invocation_id.as_deref(), Some("inv-1"));
    let zone = response.data.unwrap();
    assert_eq!(zone.id, "example.com");
    assert_eq!(zone.records_of("@", RecordType::Mx).len(), 2);

    let requests = server.received_requests().await.unwrap();
    assert!(requests[0].headers.get("content-type").is_none());
}

#[tokio::test]
async fn test_list_zones_with_pagination() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/zones"))
        .and(query_param("offset", "20"))
        .and(query_param("limit", "10"))
        .and(query_param_is_missing("total"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "meta": {"offset": 20, "limit": 10, "total": 21},
            "data": [{"type": "zone", "id": "example.com", "attributes": {}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let page = Pagination {
        offset: Some(20),
        limit: Some(10),
        total: None,
    };
    let response = client_for(&server).list_zones(&page).await.unwrap();

    assert_eq!(response.meta.unwrap().pagination.total, Some(21));
    assert_eq!(response.data.unwrap()[0].id, "example.com");
}

#[tokio::test]
async fn test_list_zones_without_pagination_sends_no_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/zones"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .mount(&server)
        .await;

    client_for(&server)
        .list_zones(&Pagination::default())
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests[0].url.query(), None);
}

// ============================================================================
// patch_zone
// ============================================================================

#[tokio::test]
async fn test_patch_zone_sends_merge_patch() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/v1/zones/example.com"))
        .and(header("X-API-KEY", API_KEY))
        .and(header("Content-Type", "application/json"))
        .and(body_json(json!({
            "data": {
                "type": "zone",
                "id": "example.com",
                "attributes": {
                    "records": {"@": {"MX": [{"rdata": "10 mail1.example.com."}]}}
                }
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(zone_body()))
        .expect(1)
        .mount(&server)
        .await;

    let patch = build_record_patch(
        "example.com",
        "@",
        RecordType::Mx,
        vec![Record {
            data: "10 mail1.example.com.".to_string(),
            ..Default::default()
        }],
    );
    let response = client_for(&server)
        .patch_zone("example.com", &patch)
        .await
        .unwrap();
    assert_eq!(response.data.unwrap().id, "example.com");
}

#[tokio::test]
async fn test_apply_patch_ignores_response_body() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/v1/zones/example.com"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .expect(1)
        .mount(&server)
        .await;

    let patch = build_record_patch("example.com", "www", RecordType::A, Vec::new());
    client_for(&server)
        .apply_patch("example.com", &patch)
        .await
        .unwrap();
}

// ============================================================================
// Error responses
// ============================================================================

#[tokio::test]
async fn test_not_found_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/zones/missing.test"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": {"status": 404, "message": "Zone not found"}
        })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .get_zone("missing.test")
        .await
        .unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(err.api_error().unwrap().message, "Zone not found");
    assert_eq!(
        err.to_string(),
        "could not get zone missing.test: api error: status=404, message=Zone not found"
    );
}

#[tokio::test]
async fn test_html_error_page_uses_title() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/zones/example.com"))
        .respond_with(ResponseTemplate::new(403).set_body_raw(
            "<html><head><title>Forbidden</title></head><body>Access denied</body></html>",
            "text/html; charset=utf-8",
        ))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .get_zone("example.com")
        .await
        .unwrap_err();

    match &err {
        ClientError::Response {
            source: ResponseError::Gateway { status, title },
            ..
        } => {
            assert_eq!(*status, 403);
            assert_eq!(title, "Forbidden");
        }
        other => panic!("expected gateway error, got {other:?}"),
    }
    assert!(err.to_string().contains("API error: Forbidden"));
    assert_eq!(err.status_reason(), "AuthFailed");
}

#[tokio::test]
async fn test_opaque_error_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/zones/example.com"))
        .respond_with(ResponseTemplate::new(500).set_body_raw("upstream exploded", "text/plain"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .get_zone("example.com")
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ClientError::Response {
            source: ResponseError::Undecodable { status: 500, .. },
            ..
        }
    ));
    assert!(err.is_transient());
}

#[tokio::test]
async fn test_non_200_success_status_is_error() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/v1/zones/example.com"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let patch = build_record_patch("example.com", "www", RecordType::A, Vec::new());
    let err = client_for(&server)
        .apply_patch("example.com", &patch)
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(204));
}

#[tokio::test]
async fn test_malformed_success_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/zones/example.com"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"data\": "))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .get_zone("example.com")
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Decode { .. }));
}

// ============================================================================
// Timeouts and cancellation
// ============================================================================

#[tokio::test]
async fn test_request_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/zones/example.com"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(zone_body())
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let err = client_with_timeout(&server, Duration::from_millis(200))
        .get_zone("example.com")
        .await
        .unwrap_err();

    match &err {
        ClientError::Transport { source, .. } => assert!(source.is_timeout()),
        other => panic!("expected transport error, got {other:?}"),
    }
    assert!(err.is_transient());
}

#[tokio::test]
async fn test_dropping_future_cancels_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/zones/example.com"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(zone_body())
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    let result =
        tokio::time::timeout(Duration::from_millis(100), client.get_zone("example.com")).await;
    assert!(result.is_err());
}

// ============================================================================
// Record sets over HTTP
// ============================================================================

#[tokio::test]
async fn test_record_set_read_decodes_compound_types() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/zones/example.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(zone_body()))
        .mount(&server)
        .await;

    let client = client_for(&server);

    let mx = RecordSet::new(client.clone(), RecordType::Mx)
        .read("example.com", "@")
        .await
        .unwrap();
    assert_eq!(
        mx,
        vec![
            TypedRecord::new(RecordData::Mx(MxData::new(10, "mail1.example.com."))).with_ttl(3600),
            TypedRecord::new(RecordData::Mx(MxData::new(20, "mail2.example.com."))).with_ttl(3600),
        ]
    );

    let srv = RecordSet::new(client, RecordType::Srv)
        .read("example.com", "_sip._tcp")
        .await
        .unwrap();
    assert_eq!(
        srv,
        vec![TypedRecord::new(RecordData::Srv(SrvData::new(
            1,
            100,
            443,
            "server1.example.com."
        )))]
    );
}

#[tokio::test]
async fn test_record_set_move_sends_single_patch() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/v1/zones/example.com"))
        .and(body_json(json!({
            "data": {
                "type": "zone",
                "id": "example.com",
                "attributes": {
                    "records": {
                        "@": {"A": null},
                        "test": {"A": [{"rdata": "192.0.2.1"}]}
                    }
                }
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(zone_body()))
        .expect(1)
        .mount(&server)
        .await;

    RecordSet::new(client_for(&server), RecordType::A)
        .apply(
            "example.com",
            "test",
            Some("@"),
            &[TypedRecord::new(RecordData::A("192.0.2.1".to_string()))],
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn test_record_set_delete_sends_null() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/v1/zones/example.com"))
        .and(body_json(json!({
            "data": {
                "type": "zone",
                "id": "example.com",
                "attributes": {"records": {"www": {"CAA": null}}}
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(zone_body()))
        .expect(1)
        .mount(&server)
        .await;

    RecordSet::new(client_for(&server), RecordType::Caa)
        .delete("example.com", "www")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_record_set_lookup_missing_type() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/zones/example.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(zone_body()))
        .mount(&server)
        .await;

    let err = RecordSet::new(client_for(&server), RecordType::Caa)
        .lookup("example.com", "@")
        .await
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "no CAA records exist on '@' level in zone 'example.com'"
    );
    assert!(matches!(err, RecordSetError::NoRecordsOfType { .. }));
}
