//! Axum router wiring for the PnP endpoints.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::{app_state::AppState, dispatch::Endpoint, transport};

pub fn build_router(state: AppState) -> Router {
    let max_body = state.cfg().server.max_body_bytes;
    Router::new()
        .route(
            Endpoint::Hello.path(),
            get(transport::http::hello).post(transport::http::hello),
        )
        .route(Endpoint::WorkRequest.path(), post(transport::http::work_request))
        .route(Endpoint::WorkResponse.path(), post(transport::http::work_response))
        .layer(DefaultBodyLimit::max(max_body))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
