use axum::{
    extract::State,
    http::{header, HeaderName, HeaderValue, Method},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use bytes::Bytes;
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    set_header::SetResponseHeaderLayer,
};
use tracing::{debug, info};

use crate::{
    config::{AppConfig, ANALYSIS_MODEL},
    error::{cors_headers, ApiError, ALLOWED_REQUEST_HEADERS},
    extract::analysis_from_reply,
    gateway::{ChatMessage, ChatRequest, GatewayClient, ModelGateway},
    models::{AnalysisRequest, AnalysisResponse},
    prompt::build_analysis_prompt,
};

pub const ANALYZE_MEAL_PATH: &str = "/api/analyze-meal";

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub gateway: Arc<dyn ModelGateway>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let gateway = Arc::new(GatewayClient::new(config.gateway_url.clone()));
        Self::with_gateway(config, gateway)
    }

    pub fn with_gateway(config: AppConfig, gateway: Arc<dyn ModelGateway>) -> Self {
        Self { config: Arc::new(config), gateway }
    }
}

/// The CORS layer answers every OPTIONS request before routing, so the body is
/// never read for preflights. The outer header layer puts the allow-list on
/// responses axum produces itself (404, 405).
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(ANALYZE_MEAL_PATH, post(analyze_meal))
        .route("/health", get(health))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::POST, Method::OPTIONS])
                .allow_headers([
                    header::AUTHORIZATION,
                    HeaderName::from_static("x-client-info"),
                    HeaderName::from_static("apikey"),
                    header::CONTENT_TYPE,
                ]),
        )
        .layer(SetResponseHeaderLayer::if_not_present(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(ALLOWED_REQUEST_HEADERS),
        ))
        .with_state(state)
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

#[tracing::instrument(skip_all, fields(request_id = %uuid::Uuid::new_v4()))]
pub async fn analyze_meal(State(state): State<AppState>, body: Bytes) -> Result<Response, ApiError> {
    let api_key = state
        .config
        .gateway_api_key
        .as_deref()
        .ok_or(ApiError::MissingCredential)?;

    let request: AnalysisRequest = serde_json::from_slice(&body)
        .map_err(|e| ApiError::InvalidBody(e.to_string()))?;
    if !request.has_meal_content() {
        return Err(ApiError::MissingMealContent);
    }

    let with_image = request.image_data.is_some();
    info!("🍽️ Analyzing meal ({})", if with_image { "image" } else { "ingredients" });
    debug!("👤 User profile: {:?}", request.user_profile);

    let prompt = build_analysis_prompt(&request.user_profile, request.ingredients.as_deref());
    let chat = ChatRequest::single(ANALYSIS_MODEL, ChatMessage::user(prompt, request.image_data.as_deref()));

    let reply = state.gateway.complete(api_key, &chat).await?;
    let analysis = analysis_from_reply(&reply);

    info!(
        "✅ Analysis ready: {} foods, {} dangerous combinations, safety={}",
        analysis.detected_foods.len(),
        analysis.dangerous_combinations.len(),
        analysis.recommendations.overall_safety
    );
    Ok((cors_headers(), Json(AnalysisResponse { analysis })).into_response())
}
