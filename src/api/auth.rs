//! Shared-secret authorization for the verification routes.
//!
//! The `Authorization` header value is compared with the configured token.
//! Both sides are hashed first so the comparison always covers 32 bytes,
//! whatever the length of the candidate.

use std::fmt;

use axum::extract::{Request, State};
use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;
use sha2::{Digest, Sha256};
use tracing::{debug, warn};

use super::error::ApiError;
use super::state::AppState;

#[derive(Clone)]
pub struct AuthSecret {
    digest: [u8; 32],
}

impl AuthSecret {
    pub fn new(token: &str) -> Self {
        Self {
            digest: Sha256::digest(token.as_bytes()).into(),
        }
    }

    /// Constant-time check of `candidate` against the secret.
    pub fn matches(&self, candidate: &[u8]) -> bool {
        let other: [u8; 32] = Sha256::digest(candidate).into();
        self.digest
            .iter()
            .zip(other.iter())
            .fold(0u8, |acc, (a, b)| acc | (a ^ b))
            == 0
    }
}

impl fmt::Debug for AuthSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthSecret(<redacted>)")
    }
}

/// 401 when the header is missing or empty, 403 when it does not match.
pub fn authorize(headers: &HeaderMap, secret: &AuthSecret) -> Result<(), ApiError> {
    let value = match headers.get(AUTHORIZATION) {
        Some(value) if !value.is_empty() => value,
        _ => return Err(ApiError::Unauthorized),
    };
    if secret.matches(value.as_bytes()) {
        Ok(())
    } else {
        Err(ApiError::Forbidden)
    }
}

pub async fn require_token(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if let Err(err) = authorize(request.headers(), state.secret()) {
        warn!(path = %request.uri().path(), status = %err.status(), "request rejected");
        return Err(err);
    }
    debug!(path = %request.uri().path(), "request authorized");
    Ok(next.run(request).await)
}
