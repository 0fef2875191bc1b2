//! Conversion logic between DTOs and domain entities.

use crate::domain::{ChatBroadcast, Connection};
use crate::infrastructure::dto::http::ConnectionDetailDto;
use crate::infrastructure::dto::websocket as dto;
use hiroba_shared::time::timestamp_to_jst_rfc3339;

// ========================================
// Domain Entity → DTO
// ========================================

impl From<ChatBroadcast> for dto::ServerChatMessage {
    fn from(model: ChatBroadcast) -> Self {
        Self {
            r#type: dto::MessageType::MessageFromServer,
            sender_display_name: model.sender_display_name.into_string(),
            message: model.message,
        }
    }
}

impl From<&Connection> for ConnectionDetailDto {
    fn from(conn: &Connection) -> Self {
        Self {
            connection_id: conn.id.as_str().to_string(),
            user_id: conn.user.id.as_str().to_string(),
            display_name: conn.user.display_name.as_str().to_string(),
            connected_at: timestamp_to_jst_rfc3339(conn.connected_at),
        }
    }
}
