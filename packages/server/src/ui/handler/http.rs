//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    domain::UserId,
    infrastructure::dto::http::{ConnectionDetailDto, GatewayStateDto, PresenceDto, TokenDto},
    ui::state::AppState,
};

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Debug endpoint to get current gateway state (for testing purposes)
pub async fn debug_gateway_state(State(state): State<Arc<AppState>>) -> Json<GatewayStateDto> {
    let connections = state.get_gateway_state_usecase.execute().await;

    // Domain Model から DTO への変換
    let connection_dtos: Vec<ConnectionDetailDto> =
        connections.iter().map(ConnectionDetailDto::from).collect();

    Json(GatewayStateDto {
        connection_count: connection_dtos.len(),
        connections: connection_dtos,
    })
}

/// Get presence of a single user by ID
pub async fn get_presence(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<PresenceDto>, StatusCode> {
    // Convert String -> UserId (Domain Model)
    let user_id = match UserId::try_from(user_id.clone()) {
        Ok(id) => id,
        Err(_) => {
            tracing::warn!("Invalid user_id format: '{}'", user_id);
            return Err(StatusCode::BAD_REQUEST);
        }
    };

    let connection_id = state.get_presence_usecase.execute(&user_id).await;

    Ok(Json(PresenceDto {
        user_id: user_id.into_string(),
        online: connection_id.is_some(),
        connection_id: connection_id.map(|id| id.into_string()),
    }))
}

/// Issue a signed token for a known user (development helper)
pub async fn debug_issue_token(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<TokenDto>, StatusCode> {
    // Convert String -> UserId (Domain Model)
    let user_id = match UserId::try_from(user_id.clone()) {
        Ok(id) => id,
        Err(_) => {
            tracing::warn!("Invalid user_id format: '{}'", user_id);
            return Err(StatusCode::BAD_REQUEST);
        }
    };

    match state.issue_token_usecase.execute(&user_id).await {
        Ok(token) => Ok(Json(TokenDto {
            user_id: user_id.into_string(),
            token,
        })),
        Err(crate::usecase::IssueTokenError::UnknownUser(_)) => Err(StatusCode::NOT_FOUND),
        Err(crate::usecase::IssueTokenError::Signing(e)) => {
            tracing::error!("Failed to sign token: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
