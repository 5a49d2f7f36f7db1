use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

use crate::{
    pkg::server::state::AppState,
    prelude::{ApiError, Result},
    token::{Claims, verify_token},
};

/// Attaches the caller's claims when a valid bearer token is present.
/// Requests without one continue anonymously.
pub async fn authenticate(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let bearer = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|v| v.trim().to_string());
    if let Some(token) = bearer {
        match verify_token(&token, &state.secret_key) {
            Ok(claims) => {
                request.extensions_mut().insert(Arc::new(claims));
            }
            Err(e) => {
                tracing::warn!("ignoring invalid token: {}", e);
            }
        }
    }
    next.run(request).await
}

pub async fn ensure_admin(request: Request, next: Next) -> Result<Response> {
    let claims = request.extensions().get::<Arc<Claims>>().cloned();
    match claims {
        Some(claims) if claims.is_admin => {
            tracing::debug!("admin access for {}", &claims.username);
            Ok(next.run(request).await)
        }
        _ => {
            tracing::warn!("admin required, access denied");
            Err(ApiError::Unauthorized)
        }
    }
}
