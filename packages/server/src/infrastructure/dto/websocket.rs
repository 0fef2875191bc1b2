//! WebSocket message DTOs.
//!
//! Wire format of every frame exchanged over `/ws`. Field names are
//! camelCase and the `type` tag is kebab-case, so the JSON matches
//! what browser clients produce.

use serde::{Deserialize, Serialize};

/// Header carrying the access token during the WebSocket handshake.
pub const AUTHENTICATION_HEADER: &str = "authentication";

/// Discriminator tag of every WebSocket message.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub enum MessageType {
    /// Server -> client: handshake result with the assigned connection ID
    ConnectionAck,
    /// Server -> all clients: current roster of connection IDs
    ClientsUpdated,
    /// Client -> server: chat message
    MessageFromClient,
    /// Server -> all clients: chat message echoed with sender name
    MessageFromServer,
}

/// Server -> client: sent once right after the upgrade succeeds.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionAckMessage {
    pub r#type: MessageType,
    pub connection_id: String,
}

/// Server -> all clients: broadcast whenever the roster changes.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientsUpdatedMessage {
    pub r#type: MessageType,
    pub connection_ids: Vec<String>,
}

/// Client -> server: chat message. `message` may be absent or empty.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientChatMessage {
    pub r#type: MessageType,
    #[serde(default)]
    pub message: Option<String>,
}

/// Server -> all clients: chat message echoed to the whole roster.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerChatMessage {
    pub r#type: MessageType,
    pub sender_display_name: String,
    pub message: String,
}
