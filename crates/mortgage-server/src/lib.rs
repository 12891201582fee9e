//! Mortgage Server
//!
//! Serves the calculator widget's server-delegated quotes and the full
//! payment and schedule calculations as JSON.

pub mod config;
pub mod csrf;
pub mod form;
pub mod http;
pub mod state;

pub use config::Settings;
pub use http::create_router;
pub use state::AppState;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use mortgage_core::MortgageError;
use thiserror::Error;

/// Server errors. Every variant renders as `{"error": "..."}`.
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("{0}")]
    BadRequest(String),

    #[error("CSRF verification failed")]
    Csrf,

    #[error(transparent)]
    Calculation(#[from] MortgageError),
}

impl ServerError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServerError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::Csrf => StatusCode::FORBIDDEN,
            ServerError::Calculation(e) if e.is_recoverable() => StatusCode::BAD_REQUEST,
            ServerError::Calculation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            ServerError::Calculation(e) => e.user_message(),
            other => other.to_string(),
        };
        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}
