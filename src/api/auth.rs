// src/api/auth.rs

use crate::api::types::ErrorResponse;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;

/// Verify the X-API-Key header when a token is configured. A missing
/// key and a wrong key fail differently so clients can tell them apart.
pub fn check_api_key(
    expected: Option<&str>,
    headers: &HeaderMap,
) -> Result<(), (StatusCode, Json<ErrorResponse>)> {
    let Some(expected) = expected else {
        return Ok(());
    };

    let presented = headers
        .get("x-api-key")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    if presented.is_empty() {
        return Err((
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse {
                detail: "Missing API key".into(),
            }),
        ));
    }

    if constant_time_eq(presented.as_bytes(), expected.as_bytes()) {
        Ok(())
    } else {
        Err((
            StatusCode::FORBIDDEN,
            Json(ErrorResponse {
                detail: "Invalid API key".into(),
            }),
        ))
    }
}

/// Constant-time byte comparison to prevent timing attacks on token auth.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers_with_key(key: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("x-api-key", key.parse().unwrap());
        headers
    }

    #[test]
    fn test_no_token_configured_allows_all() {
        assert!(check_api_key(None, &HeaderMap::new()).is_ok());
        assert!(check_api_key(None, &headers_with_key("anything")).is_ok());
    }

    #[test]
    fn test_missing_key_is_unauthorized() {
        let err = check_api_key(Some("secret"), &HeaderMap::new()).unwrap_err();
        assert_eq!(err.0, StatusCode::UNAUTHORIZED);
        assert_eq!(err.1.detail, "Missing API key");
    }

    #[test]
    fn test_wrong_key_is_forbidden() {
        let err = check_api_key(Some("secret"), &headers_with_key("nope")).unwrap_err();
        assert_eq!(err.0, StatusCode::FORBIDDEN);
        assert_eq!(err.1.detail, "Invalid API key");
    }

    #[test]
    fn test_matching_key_accepted() {
        assert!(check_api_key(Some("secret"), &headers_with_key("secret")).is_ok());
    }

    #[test]
    fn test_constant_time_eq() {
        assert!(constant_time_eq(b"abc", b"abc"));
        assert!(!constant_time_eq(b"abc", b"abd"));
        assert!(!constant_time_eq(b"abc", b"ab"));
    }
}
