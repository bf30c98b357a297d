use crate::startup::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Shown to shoppers when no message could be generated. Provider details
/// are logged, never returned.
pub const GENERATION_FAILED_MESSAGE: &str =
    "Przepraszamy, wystąpił błąd podczas generowania odpowiedzi.";

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: &'static str,
}

/// `GET /get-proactive-message`
pub async fn get_proactive_message(State(state): State<AppState>) -> Response {
    match state.gateway.get_proactive_message().await {
        Ok(message) => (StatusCode::OK, Json(MessageResponse { message })).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to generate proactive message");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: GENERATION_FAILED_MESSAGE,
                }),
            )
                .into_response()
        }
    }
}
