use axum::{
    http::{header, HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::{config::API_KEY_VAR, gateway::GatewayError, models::ErrorResponse};

pub const ALLOWED_REQUEST_HEADERS: &str = "authorization, x-client-info, apikey, content-type";

/// CORS headers attached to every response of the analysis endpoint.
pub fn cors_headers() -> [(HeaderName, HeaderValue); 2] {
    [
        (header::ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*")),
        (header::ACCESS_CONTROL_ALLOW_HEADERS, HeaderValue::from_static(ALLOWED_REQUEST_HEADERS)),
    ]
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{} is not configured", API_KEY_VAR)] MissingCredential,
    #[error("{0}")] InvalidBody(String),
    #[error("Provide either imageData or ingredients to analyze")] MissingMealContent,
    #[error(transparent)] Gateway(#[from] GatewayError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingMealContent => StatusCode::BAD_REQUEST,
            ApiError::Gateway(GatewayError::RateLimited) => StatusCode::TOO_MANY_REQUESTS,
            ApiError::Gateway(GatewayError::CreditsDepleted) => StatusCode::PAYMENT_REQUIRED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let mut message = self.to_string();
        if message.trim().is_empty() {
            message = "Failed to analyze meal".to_string();
        }
        tracing::error!("❌ Error in analyze-meal: {} ({})", message, status);
        (status, cors_headers(), Json(ErrorResponse { error: message })).into_response()
    }
}
