//! Shared HTTP helpers for the remote adapters.
//!
//! Centralizes client construction and status-code checks (429 rate limiting
//! with `Retry-After` parsing, non-success → [`RemoteError::Api`]) so each
//! adapter stays focused on request construction and response mapping.

use std::time::Duration;

use crate::error::RemoteError;

pub const USER_AGENT: &str = "kiroku/0.1";

/// Build the `reqwest::Client` shared by one adapter.
///
/// # Panics
///
/// Panics if the underlying `reqwest::Client` fails to build.
#[must_use]
pub fn build_client(timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()
        .expect("reqwest client should build")
}

/// Check an HTTP response for common error conditions.
///
/// Returns the response unchanged on success. Handles:
/// - **429 Too Many Requests** → [`RemoteError::RateLimited`], carrying the
///   `Retry-After` seconds when the header is present and numeric.
/// - **Non-success status** → [`RemoteError::Api`] with status code and
///   response body.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, RemoteError> {
    if resp.status() == 429 {
        let retry_after = parse_retry_after(&resp);
        return Err(RemoteError::RateLimited {
            retry_after_secs: retry_after,
        });
    }
    if !resp.status().is_success() {
        return Err(RemoteError::Api {
            status: resp.status().as_u16(),
            message: resp.text().await.unwrap_or_default(),
        });
    }
    Ok(resp)
}

/// Decode a checked response body, keeping the serde message on failure.
pub async fn decode_json<T: serde::de::DeserializeOwned>(
    resp: reqwest::Response,
) -> Result<T, RemoteError> {
    let body = resp.text().await?;
    serde_json::from_str(&body).map_err(|e| RemoteError::Parse(e.to_string()))
}

/// Parse the `Retry-After` header as seconds.
fn parse_retry_after(resp: &reqwest::Response) -> Option<u64> {
    resp.headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mock_response(status: u16, body: &'static str) -> reqwest::Response {
        reqwest::Response::from(
            ::http::Response::builder()
                .status(status)
                .body(body)
                .unwrap(),
        )
    }

    fn mock_response_with_retry_after(status: u16, value: &str) -> reqwest::Response {
        reqwest::Response::from(
            ::http::Response::builder()
                .status(status)
                .header("Retry-After", value)
                .body("")
                .unwrap(),
        )
    }

    #[test]
    fn parse_retry_after_from_header() {
        let resp = mock_response_with_retry_after(429, "120");
        assert_eq!(parse_retry_after(&resp), Some(120));
    }

    #[test]
    fn parse_retry_after_missing_header() {
        let resp = mock_response(429, "");
        assert_eq!(parse_retry_after(&resp), None);
    }

    #[test]
    fn parse_retry_after_ignores_http_dates() {
        let resp = mock_response_with_retry_after(429, "Wed, 21 Oct 2015 07:28:00 GMT");
        assert_eq!(parse_retry_after(&resp), None);
    }

    #[tokio::test]
    async fn check_response_rate_limited_with_header() {
        let resp = mock_response_with_retry_after(429, "30");
        let err = check_response(resp).await.unwrap_err();
        assert!(matches!(
            err,
            RemoteError::RateLimited {
                retry_after_secs: Some(30)
            }
        ));
    }

    #[tokio::test]
    async fn check_response_not_found_keeps_body() {
        let resp = mock_response(404, "{\"status\":404,\"message\":\"Resource does not exist\"}");
        let err = check_response(resp).await.unwrap_err();
        match err {
            RemoteError::Api { status, message } => {
                assert_eq!(status, 404);
                assert!(message.contains("Resource does not exist"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn check_response_success() {
        let resp = mock_response(200, "{}");
        assert!(check_response(resp).await.is_ok());
    }

    #[tokio::test]
    async fn decode_json_reports_parse_errors() {
        let resp = mock_response(200, "not json");
        let err = decode_json::<serde_json::Value>(resp).await.unwrap_err();
        assert!(matches!(err, RemoteError::Parse(_)));
    }
}
