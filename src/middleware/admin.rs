// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Admin key middleware for `/admin/*` routes.

use crate::error::AppError;
use crate::routes::admin::ADMIN_KEY_HEADER;
use crate::AppState;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use subtle::ConstantTimeEq;

/// Require the configured admin key in the `x-admin-key` header.
///
/// With no key configured every admin request is refused.
pub async fn require_admin(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(expected) = state.config.admin_api_key.as_deref() else {
        tracing::warn!("Blocked admin request: ADMIN_API_KEY not configured");
        return Err(AppError::Forbidden);
    };

    let provided = request
        .headers()
        .get(ADMIN_KEY_HEADER)
        .and_then(|h| h.to_str().ok())
        .unwrap_or("");

    if !keys_match(provided, expected) {
        tracing::warn!(
            path = %request.uri().path(),
            "Blocked admin request with invalid key"
        );
        return Err(AppError::Forbidden);
    }

    Ok(next.run(request).await)
}

fn keys_match(provided: &str, expected: &str) -> bool {
    provided.as_bytes().ct_eq(expected.as_bytes()).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_match() {
        assert!(keys_match("secret", "secret"));
        assert!(!keys_match("secreT", "secret"));
        assert!(!keys_match("", "secret"));
        assert!(!keys_match("secret-longer", "secret"));
    }
}
