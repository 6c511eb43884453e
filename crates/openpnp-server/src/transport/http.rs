//! HTTP handlers for the `/pnp/*` endpoints.
//!
//! Each handler hands the raw body to the dispatcher and maps the outcome to
//! a status code. A failed exchange never answers `200`.

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use bytes::Bytes;

use openpnp_core::error::{ErrorCode, PnpError};

use crate::app_state::AppState;
use crate::dispatch::{Endpoint, Reply};

pub async fn hello(State(state): State<AppState>) -> Response {
    exchange(&state, Endpoint::Hello, &[]).await
}

pub async fn work_request(State(state): State<AppState>, body: Bytes) -> Response {
    exchange(&state, Endpoint::WorkRequest, &body).await
}

pub async fn work_response(State(state): State<AppState>, body: Bytes) -> Response {
    exchange(&state, Endpoint::WorkResponse, &body).await
}

async fn exchange(state: &AppState, endpoint: Endpoint, body: &[u8]) -> Response {
    match state.dispatcher().exchange(endpoint, body).await {
        Ok(Reply::Empty) => StatusCode::OK.into_response(),
        Ok(Reply::Envelope(xml)) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/xml; charset=utf-8")],
            xml,
        )
            .into_response(),
        Err(e) => error_response(endpoint, &e),
    }
}

pub fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::MalformedMessage | ErrorCode::MalformedUdi => StatusCode::BAD_REQUEST,
        ErrorCode::Unimplemented => StatusCode::NOT_IMPLEMENTED,
        ErrorCode::InvalidServiceArguments | ErrorCode::BadConfig | ErrorCode::Internal => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

fn error_response(endpoint: Endpoint, err: &PnpError) -> Response {
    let code = err.code();
    if code.is_client_error() {
        tracing::warn!(
            endpoint = endpoint.as_str(),
            code = code.as_str(),
            error = %err,
            "rejected agent message"
        );
    } else {
        tracing::error!(
            endpoint = endpoint.as_str(),
            code = code.as_str(),
            error = %err,
            "exchange failed"
        );
    }
    (status_for(code), format!("{}: {err}", code.as_str())).into_response()
}
