// Uniform success/error envelope returned by every endpoint
//
// The builder only produces the body. Which status code goes with it is up to
// the handler.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

// Closed set of error codes surfaced to clients
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    NotFound,
    MissingTransactionId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: ErrorCode,
    pub message: String,
}

/// API response envelope.
///
/// Fields are private so that an envelope can only be built through
/// [`ApiResponse::success`] or [`ApiResponse::failure`]: exactly one of
/// `data` and `error` is set and `success` agrees with it. Deserializing
/// checks the same rule and rejects anything else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "RawApiResponse<T>",
    bound(deserialize = "T: Deserialize<'de>")
)]
pub struct ApiResponse<T> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<ErrorBody>,
    timestamp: String,
}

// Wire shape before the envelope rules are checked
#[derive(Deserialize)]
struct RawApiResponse<T> {
    success: bool,
    data: Option<T>,
    error: Option<ErrorBody>,
    timestamp: String,
}

impl<T> TryFrom<RawApiResponse<T>> for ApiResponse<T> {
    type Error = String;

    fn try_from(raw: RawApiResponse<T>) -> Result<Self, Self::Error> {
        match (raw.success, raw.data.is_some(), raw.error.is_some()) {
            (true, true, false) | (false, false, true) => {}
            (success, has_data, has_error) => {
                return Err(format!(
                    "invalid envelope: success={success}, data={has_data}, error={has_error}"
                ))
            }
        }
        DateTime::parse_from_rfc3339(&raw.timestamp)
            .map_err(|e| format!("invalid timestamp {:?}: {e}", raw.timestamp))?;

        Ok(Self {
            success: raw.success,
            data: raw.data,
            error: raw.error,
            timestamp: raw.timestamp,
        })
    }
}

impl<T> ApiResponse<T> {
    pub fn success(data: T, now: DateTime<Utc>) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            timestamp: format_timestamp(now),
        }
    }

    pub fn failure(code: ErrorCode, message: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ErrorBody {
                code,
                message: message.into(),
            }),
            timestamp: format_timestamp(now),
        }
    }

    pub fn from_error(error: &ApiError, now: DateTime<Utc>) -> Self {
        Self::failure(error.code(), error.to_string(), now)
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub fn error(&self) -> Option<&ErrorBody> {
        self.error.as_ref()
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    pub fn into_data(self) -> Option<T> {
        self.data
    }
}

impl<T: Serialize> ApiResponse<T> {
    // Pair the envelope with the status chosen by the handler
    pub fn with_status(self, status: StatusCode) -> Response {
        (status, Json(self)).into_response()
    }
}

// ISO-8601, UTC, millisecond precision: 2026-10-18T09:30:00.000Z
pub fn format_timestamp(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 18, 9, 30, 0).unwrap()
            + chrono::Duration::milliseconds(42)
    }

    #[test]
    fn test_success_envelope_shape() {
        let envelope = ApiResponse::success(vec![1, 2, 3], fixed_now());

        assert!(envelope.is_success());
        assert_eq!(envelope.data(), Some(&vec![1, 2, 3]));
        assert!(envelope.error().is_none());

        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(
            value,
            json!({
                "success": true,
                "data": [1, 2, 3],
                "timestamp": "2026-10-18T09:30:00.042Z"
            })
        );
    }

    #[test]
    fn test_failure_envelope_shape() {
        let envelope: ApiResponse<()> =
            ApiResponse::failure(ErrorCode::NotFound, "Package not found", fixed_now());

        assert!(!envelope.is_success());
        assert!(envelope.data().is_none());
        assert_eq!(envelope.error().map(|e| e.code), Some(ErrorCode::NotFound));

        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(
            value,
            json!({
                "success": false,
                "error": { "code": "NOT_FOUND", "message": "Package not found" },
                "timestamp": "2026-10-18T09:30:00.042Z"
            })
        );
    }

    #[test]
    fn test_exactly_one_of_data_or_error() {
        let now = fixed_now();
        let envelopes: Vec<ApiResponse<&str>> = vec![
            ApiResponse::success("payload", now),
            ApiResponse::failure(ErrorCode::MissingTransactionId, "missing", now),
            ApiResponse::from_error(&ApiError::PackageNotFound("x".to_string()), now),
        ];

        for envelope in envelopes {
            assert_ne!(envelope.data().is_some(), envelope.error().is_some());
            assert_eq!(envelope.is_success(), envelope.data().is_some());
        }
    }

    #[test]
    fn test_from_error_uses_code_and_message() {
        let envelope: ApiResponse<()> =
            ApiResponse::from_error(&ApiError::MissingTransactionId, fixed_now());
        let error = envelope.error().unwrap();
        assert_eq!(error.code, ErrorCode::MissingTransactionId);
        assert_eq!(error.message, "Transaction ID is required");
    }

    #[test]
    fn test_deserialize_accepts_valid_envelopes() {
        let ok: ApiResponse<Vec<u32>> = serde_json::from_value(json!({
            "success": true,
            "data": [1, 2],
            "timestamp": "2026-10-18T09:30:00.042Z"
        }))
        .unwrap();
        assert_eq!(ok, ApiResponse::success(vec![1, 2], fixed_now()));

        let failed: ApiResponse<Vec<u32>> = serde_json::from_value(json!({
            "success": false,
            "error": { "code": "NOT_FOUND", "message": "Package not found" },
            "timestamp": "2026-10-18T09:30:00.042Z"
        }))
        .unwrap();
        assert_eq!(failed.error().map(|e| e.code), Some(ErrorCode::NotFound));
    }

    #[test]
    fn test_deserialize_rejects_broken_envelopes() {
        let error = json!({ "code": "NOT_FOUND", "message": "gone" });
        let broken = vec![
            json!({ "success": true, "timestamp": "" }),
            json!({ "success": true, "timestamp": "2026-10-18T09:30:00.042Z" }),
            json!({
                "success": true,
                "data": 1,
                "error": error,
                "timestamp": "2026-10-18T09:30:00.042Z"
            }),
            json!({ "success": false, "data": 1, "timestamp": "2026-10-18T09:30:00.042Z" }),
            json!({ "success": false, "timestamp": "2026-10-18T09:30:00.042Z" }),
            json!({ "success": true, "data": 1, "timestamp": "yesterday" }),
        ];

        for value in broken {
            let result = serde_json::from_value::<ApiResponse<u32>>(value.clone());
            assert!(result.is_err(), "Accepted broken envelope: {}", value);
        }
    }

    #[test]
    fn test_timestamp_is_millisecond_utc() {
        let whole_second = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();
        assert_eq!(format_timestamp(whole_second), "2026-01-02T03:04:05.000Z");
    }
}
