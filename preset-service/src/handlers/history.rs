use axum::{
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};

use crate::startup::AppState;

/// Raw passthrough of the archive webhook's history log.
///
/// Fails open: any read failure yields an empty history array with a server
/// error status instead of surfacing the transport error.
#[tracing::instrument(skip(state))]
pub async fn history(State(state): State<AppState>) -> Response {
    match state.archive.read_history().await {
        Ok(body) => ([(header::CONTENT_TYPE, "application/json")], body).into_response(),
        Err(e) => {
            tracing::warn!(error = %e, "History read failed, returning empty log");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                [(header::CONTENT_TYPE, "application/json")],
                "[]",
            )
                .into_response()
        }
    }
}
