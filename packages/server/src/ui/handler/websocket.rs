//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc;

use crate::{
    domain::{Connection, ConnectionId, User},
    infrastructure::dto::websocket::{
        AUTHENTICATION_HEADER, ClientChatMessage, ClientsUpdatedMessage, ConnectionAckMessage,
        MessageType, ServerChatMessage,
    },
    infrastructure::socket::{OutboundFrame, WebSocketHandle},
    ui::state::AppState,
};
use hiroba_shared::time::get_jst_timestamp;

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, StatusCode> {
    // Extract the token from the handshake metadata
    let Some(token) = headers
        .get(AUTHENTICATION_HEADER)
        .and_then(|value| value.to_str().ok())
    else {
        tracing::warn!(
            "WebSocket handshake without '{}' header",
            AUTHENTICATION_HEADER
        );
        return Err(StatusCode::UNAUTHORIZED);
    };

    // Authenticate before upgrading. Invalid token, unknown user and inactive
    // user all look the same to the client.
    let user = match state.authenticate_client_usecase.execute(token).await {
        Ok(user) => user,
        Err(e) => {
            tracing::warn!("WebSocket handshake rejected: {}", e);
            return Err(StatusCode::UNAUTHORIZED);
        }
    };

    tracing::info!(
        "User '{}' authenticated, upgrading connection",
        user.id.as_str()
    );
    Ok(ws.on_upgrade(move |socket| handle_socket(socket, state, user)))
}

/// Spawns a task that forwards outbound frames from the rx channel to the WebSocket sender.
///
/// A Close frame terminates the loop after notifying the peer, so a forced
/// eviction flows through the same shutdown path as a client-initiated close.
///
/// # Arguments
///
/// * `rx` - Channel receiver for outbound frames addressed to this client
/// * `sender` - WebSocket sink to send frames to this client
///
/// # Returns
///
/// A `JoinHandle` for the spawned task
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<OutboundFrame>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(frame) = rx.recv().await {
            match frame {
                OutboundFrame::Event(msg) => {
                    if sender.send(Message::Text(msg.into())).await.is_err() {
                        break;
                    }
                }
                OutboundFrame::Close => {
                    let _ = sender.send(Message::Close(None)).await;
                    break;
                }
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>, user: User) {
    let (mut sender, mut receiver) = socket.split();

    // The transport layer mints the connection id once the upgrade succeeds
    let connection_id = ConnectionId::generate();
    let connection_id_str = connection_id.as_str().to_string();
    let user_id_str = user.id.as_str().to_string();

    // Create a channel for this client to receive outbound frames
    let (tx, rx) = mpsc::unbounded_channel();
    let handle = Arc::new(WebSocketHandle::new(tx));

    // Send connection-ack to the newly connected client
    {
        let ack_msg = ConnectionAckMessage {
            r#type: MessageType::ConnectionAck,
            connection_id: connection_id_str.clone(),
        };

        let ack_json = serde_json::to_string(&ack_msg).unwrap();
        if let Err(e) = sender.send(Message::Text(ack_json.into())).await {
            tracing::error!(
                "Failed to send connection-ack to '{}': {}",
                connection_id_str,
                e
            );
            return;
        }
        tracing::info!("Sent connection-ack to '{}'", connection_id_str);
    }

    // Register the connection. A previous connection of the same user is
    // evicted inside the UseCase.
    let connection = Connection::new(
        connection_id.clone(),
        user,
        handle.clone(),
        get_jst_timestamp(),
    );
    let roster = match state.connect_client_usecase.execute(connection).await {
        Ok(roster) => roster,
        Err(e) => {
            // Nothing was registered, so no cleanup is needed beyond dropping the socket
            tracing::error!(
                "Failed to register connection '{}': {}",
                connection_id_str,
                e
            );
            return;
        }
    };
    tracing::info!("User '{}' connected as '{}'", user_id_str, connection_id_str);

    // Broadcast the updated roster to all clients, including the new one
    {
        let roster_msg = ClientsUpdatedMessage {
            r#type: MessageType::ClientsUpdated,
            connection_ids: roster.into_iter().map(|id| id.into_string()).collect(),
        };

        let roster_json = serde_json::to_string(&roster_msg).unwrap();
        state
            .connect_client_usecase
            .broadcast_clients_updated(&roster_json)
            .await;
        tracing::info!("Broadcasted clients-updated for '{}'", connection_id_str);
    }

    let recv_connection_id = connection_id.clone();
    let state_clone = state.clone();

    // Spawn a task to receive messages from this client
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::error!("WebSocket error: {}", e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    tracing::debug!(
                        "Received text from '{}': {}",
                        recv_connection_id.as_str(),
                        text
                    );

                    // Parse the incoming frame; malformed payloads are dropped
                    let chat_msg = match serde_json::from_str::<ClientChatMessage>(&text) {
                        Ok(msg) => msg,
                        Err(e) => {
                            tracing::warn!("Failed to parse message as JSON: {}", e);
                            continue;
                        }
                    };
                    if chat_msg.r#type != MessageType::MessageFromClient {
                        tracing::warn!(
                            "Unexpected message type from '{}', ignoring",
                            recv_connection_id.as_str()
                        );
                        continue;
                    }

                    // Resolve the sender's display name and fill in an empty body
                    let broadcast = match state_clone
                        .send_message_usecase
                        .execute(&recv_connection_id, chat_msg.message)
                        .await
                    {
                        Ok(broadcast) => broadcast,
                        Err(e) => {
                            tracing::warn!("Failed to send message: {}", e);
                            continue;
                        }
                    };

                    // Echo the composed event to all clients, including the sender
                    let response: ServerChatMessage = broadcast.into();
                    let response_json = serde_json::to_string(&response).unwrap();
                    state_clone
                        .send_message_usecase
                        .broadcast_message(&response_json)
                        .await;
                }
                Message::Ping(_) => {
                    tracing::debug!("Received ping");
                    // Ping/pong is handled automatically by the WebSocket protocol
                }
                Message::Close(_) => {
                    tracing::info!(
                        "Connection '{}' requested close",
                        recv_connection_id.as_str()
                    );
                    break;
                }
                _ => {}
            }
        }
    });

    // Spawn a task to push outbound frames to this client
    let mut send_task = pusher_loop(rx, sender);

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    // Remove the connection and broadcast the updated roster. The removal is
    // a no-op when an eviction already took this entry out.
    let roster = state.disconnect_client_usecase.execute(&connection_id).await;
    {
        let roster_msg = ClientsUpdatedMessage {
            r#type: MessageType::ClientsUpdated,
            connection_ids: roster.into_iter().map(|id| id.into_string()).collect(),
        };

        let roster_json = serde_json::to_string(&roster_msg).unwrap();
        state
            .disconnect_client_usecase
            .broadcast_clients_updated(&roster_json)
            .await;
    }
    tracing::info!("Connection '{}' cleanup complete", connection_id_str);
}
