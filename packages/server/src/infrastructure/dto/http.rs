//! HTTP API response DTOs.

use serde::{Deserialize, Serialize};

/// Snapshot of the whole gateway, returned by `/debug/gateway`.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayStateDto {
    pub connection_count: usize,
    pub connections: Vec<ConnectionDetailDto>,
}

/// One registered connection with its owner and connect time.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionDetailDto {
    pub connection_id: String,
    pub user_id: String,
    pub display_name: String,
    pub connected_at: String,
}

/// Presence of a single user, returned by `/api/presence/{user_id}`.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresenceDto {
    pub user_id: String,
    pub online: bool,
    pub connection_id: Option<String>,
}

/// Freshly minted access token, returned by `/debug/token/{user_id}`.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenDto {
    pub user_id: String,
    pub token: String,
}
