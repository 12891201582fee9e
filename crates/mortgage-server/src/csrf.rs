//! CSRF gate for state-changing requests.
//!
//! Token issuance belongs to the page that embeds the widget; this layer only
//! checks that a POST echoes the configured token in `X-CSRFToken`.

use axum::extract::{Request, State};
use axum::http::Method;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::state::AppState;
use crate::ServerError;

pub const CSRF_HEADER: &str = "x-csrftoken";

pub async fn csrf_guard(State(state): State<AppState>, request: Request, next: Next) -> Response {
    if request.method() != Method::POST {
        return next.run(request).await;
    }
    let Some(expected) = state.settings.csrf_token.as_deref() else {
        return next.run(request).await;
    };

    let supplied = request
        .headers()
        .get(CSRF_HEADER)
        .and_then(|v| v.to_str().ok());

    match supplied {
        Some(token) if tokens_match(token.as_bytes(), expected.as_bytes()) => {
            next.run(request).await
        }
        _ => {
            tracing::warn!(
                path = %request.uri().path(),
                token_present = supplied.is_some(),
                "CSRF verification failed"
            );
            ServerError::Csrf.into_response()
        }
    }
}

/// Length-revealing but otherwise constant-time comparison.
fn tokens_match(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_match() {
        assert!(tokens_match(b"secret", b"secret"));
        assert!(!tokens_match(b"secret", b"secreT"));
        assert!(!tokens_match(b"secret", b"secret2"));
        assert!(!tokens_match(b"", b"x"));
    }
}
