use axum::middleware::{from_fn, from_fn_with_state};
use axum::routing::{delete, get, patch, post};
use axum::Router;

use super::handlers;
use super::handlers::health::{healthz, livez};
use super::middlewares::authn::{authenticate, ensure_admin};
use super::state::AppState;

pub fn build_routes(state: AppState) -> Router {
    Router::new()
        .route(
            "/jobs",
            get(handlers::jobs::list)
                .merge(post(handlers::jobs::create).route_layer(from_fn(ensure_admin))),
        )
        .route(
            "/jobs/{id}",
            get(handlers::jobs::get).merge(
                patch(handlers::jobs::update)
                    .merge(delete(handlers::jobs::remove))
                    .route_layer(from_fn(ensure_admin)),
            ),
        )
        .layer(from_fn_with_state(state.clone(), authenticate))
        .route("/healthz", get(healthz))
        .route("/livez", get(livez))
        .with_state(state)
}
