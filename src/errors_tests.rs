// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Unit tests for error types and their classification helpers.

#[cfg(test)]
mod tests {
    use crate::errors::{ApiError, ClientError, CodecError, RecordSetError, ResponseError};
    use crate::types::RecordType;

    fn response_error(source: ResponseError) -> ClientError {
        ClientError::Response {
            context: "get zone example.com".to_string(),
            source,
        }
    }

    fn api(status: u16, message: &str) -> ClientError {
        response_error(ResponseError::Api(ApiError {
            status,
            message: message.to_string(),
        }))
    }

    fn gateway(status: u16) -> ClientError {
        response_error(ResponseError::Gateway {
            status,
            title: "Bad Gateway".to_string(),
        })
    }

    // ========================================================================
    // Display
    // ========================================================================

    #[test]
    fn test_api_error_display() {
        assert_eq!(
            api(404, "zone not found").to_string(),
            "could not get zone example.com: api error: status=404, message=zone not found"
        );
    }

    #[test]
    fn test_gateway_error_display() {
        let err = response_error(ResponseError::Gateway {
            status: 403,
            title: "403 Forbidden".to_string(),
        });
        assert_eq!(
            err.to_string(),
            "could not get zone example.com: API error: 403 Forbidden"
        );
    }

    #[test]
    fn test_codec_error_display() {
        let err = CodecError::FieldCount {
            record_type: RecordType::Mx,
            expected: 2,
            found: 3,
            data: "10 a b".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "malformed MX record data '10 a b': expected at most 2 fields, found 3"
        );
    }

    #[test]
    fn test_record_set_lookup_errors_display() {
        let at_name = RecordSetError::NoRecordsAtName {
            zone: "example.com".to_string(),
            name: "www".to_string(),
        };
        assert_eq!(
            at_name.to_string(),
            "no records exist on 'www' level in zone 'example.com'"
        );

        let of_type = RecordSetError::NoRecordsOfType {
            zone: "example.com".to_string(),
            name: "www".to_string(),
            record_type: RecordType::Aaaa,
        };
        assert_eq!(
            of_type.to_string(),
            "no AAAA records exist on 'www' level in zone 'example.com'"
        );
    }

    #[test]
    fn test_record_set_client_error_names_cell() {
        let err = RecordSetError::Client {
            zone: "example.com".to_string(),
            name: "www".to_string(),
            record_type: RecordType::Mx,
            source: api(400, "bad"),
        };
        assert_eq!(
            err.to_string(),
            "MX records at 'www' in zone 'example.com': could not get zone example.com: \
             api error: status=400, message=bad"
        );
        assert!(!err.is_not_found());
        assert_eq!(err.client_error().and_then(ClientError::status), Some(400));
    }

    // ========================================================================
    // Classification
    // ========================================================================

    #[test]
    fn test_status() {
        assert_eq!(api(404, "missing").status(), Some(404));
        assert_eq!(gateway(502).status(), Some(502));
        assert_eq!(
            ClientError::InvalidHost {
                host: "x".to_string(),
                reason: "relative URL without a base".to_string(),
            }
            .status(),
            None
        );
    }

    #[test]
    fn test_api_error_accessor() {
        let err = api(401, "bad key");
        assert_eq!(err.api_error().map(|e| e.message.as_str()), Some("bad key"));
        assert!(gateway(502).api_error().is_none());
    }

    #[test]
    fn test_is_not_found() {
        assert!(api(404, "zone not found").is_not_found());
        assert!(!api(400, "bad request").is_not_found());
        assert!(!gateway(502).is_not_found());
    }

    #[test]
    fn test_is_transient() {
        assert!(api(429, "slow down").is_transient());
        assert!(api(500, "boom").is_transient());
        assert!(gateway(503).is_transient());
        assert!(!api(400, "bad request").is_transient());
        assert!(!api(404, "missing").is_transient());

        let decode = ClientError::Decode {
            context: "list zones".to_string(),
            source: serde_json::from_str::<u8>("x").unwrap_err(),
        };
        assert!(!decode.is_transient());
    }

    #[test]
    fn test_status_reason() {
        assert_eq!(api(401, "bad key").status_reason(), "AuthFailed");
        assert_eq!(api(404, "missing").status_reason(), "ZoneNotFound");
        assert_eq!(gateway(502).status_reason(), "GatewayError");

        let decode = ClientError::Decode {
            context: "list zones".to_string(),
            source: serde_json::from_str::<u8>("x").unwrap_err(),
        };
        assert_eq!(decode.status_reason(), "MalformedResponse");
    }

    #[test]
    fn test_envelope_status_preferred() {
        let err = ResponseError::Api(ApiError {
            status: 409,
            message: "conflict".to_string(),
        });
        assert_eq!(err.status(), 409);
    }
}
