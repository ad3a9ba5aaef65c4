//! Check endpoint handlers.

use axum::{
    extract::{rejection::JsonRejection, rejection::QueryRejection, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use super::super::types::{CheckQuery, CheckRequest, ErrorResponse, ServerState};
use crate::checker::CheckError;

/// `GET /api/check?domain=<raw>`
pub async fn check_get_handler(
    State(state): State<ServerState>,
    query: Result<Query<CheckQuery>, QueryRejection>,
) -> Response {
    match query {
        Ok(Query(query)) => run_check(&state, query.domain).await,
        Err(rejection) => error_response(StatusCode::BAD_REQUEST, rejection.body_text()),
    }
}

/// `POST /api/check` with `{"url": "<raw>"}`
pub async fn check_post_handler(
    State(state): State<ServerState>,
    body: Result<Json<CheckRequest>, JsonRejection>,
) -> Response {
    match body {
        Ok(Json(request)) => run_check(&state, request.url).await,
        Err(rejection) => error_response(StatusCode::BAD_REQUEST, rejection.body_text()),
    }
}

async fn run_check(state: &ServerState, raw: Option<String>) -> Response {
    let Some(raw) = raw.filter(|raw| !raw.trim().is_empty()) else {
        return error_response(StatusCode::BAD_REQUEST, "URL is required");
    };

    let permit = match state.permits.acquire().await {
        Ok(permit) => permit,
        Err(e) => {
            log::warn!("Turning away check of {:?}: {}", raw, e);
            return error_response(StatusCode::SERVICE_UNAVAILABLE, e.to_string());
        }
    };

    match state.checker.check_isolated(&raw, Some(permit)).await {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(CheckError::InvalidInput(e)) => error_response(StatusCode::BAD_REQUEST, e.to_string()),
        Err(e @ CheckError::Aborted { .. }) => match e.fallback_report() {
            Some(report) => (StatusCode::INTERNAL_SERVER_ERROR, Json(report)).into_response(),
            None => error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
        },
    }
}

fn error_response(status: StatusCode, error: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: error.into(),
        }),
    )
        .into_response()
}
