//! WebSocket client session management.

use futures_util::{SinkExt, StreamExt};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tokio::sync::mpsc;
use tokio_tungstenite::{
    connect_async,
    tungstenite::{
        Error as WsError, client::IntoClientRequest, http::HeaderValue, protocol::Message,
    },
};

use hiroba_server::infrastructure::dto::websocket::{
    AUTHENTICATION_HEADER, ClientChatMessage, ClientsUpdatedMessage, ConnectionAckMessage,
    MessageType, ServerChatMessage,
};
use hiroba_shared::time::get_jst_timestamp;

use crate::{error::ClientError, formatter::MessageFormatter, ui::redisplay_prompt};

/// Run a single WebSocket client session until the connection ends
pub async fn run_client_session(url: &str, token: &str) -> Result<(), ClientError> {
    // The token travels in the handshake metadata, not in the URL
    let mut request = url
        .into_client_request()
        .map_err(|e| ClientError::ConnectionError(e.to_string()))?;
    request.headers_mut().insert(
        AUTHENTICATION_HEADER,
        HeaderValue::from_str(token).map_err(|e| ClientError::ConnectionError(e.to_string()))?,
    );

    let (ws_stream, _response) = match connect_async(request).await {
        Ok(result) => result,
        Err(WsError::Http(response)) if response.status().as_u16() == 401 => {
            return Err(ClientError::AuthenticationRejected);
        }
        Err(e) => return Err(ClientError::ConnectionError(e.to_string())),
    };

    tracing::info!("Connected to presence gateway!");
    println!("\nType messages and press Enter to send. Press Ctrl+C to exit.\n");

    let (mut write, mut read) = ws_stream.split();

    // Spawn a task to handle incoming messages
    let mut read_task = tokio::spawn(async move {
        let mut connection_error = false;
        // Filled in by the connection-ack, used to mark "me" in rosters
        let mut my_connection_id: Option<String> = None;

        while let Some(message) = read.next().await {
            match message {
                Ok(Message::Text(text)) => {
                    // Try to parse as ConnectionAckMessage first
                    if let Ok(ack_msg) = serde_json::from_str::<ConnectionAckMessage>(&text) {
                        let formatted =
                            MessageFormatter::format_connection_ack(&ack_msg.connection_id);
                        print!("{}", formatted);
                        my_connection_id = Some(ack_msg.connection_id);
                        redisplay_prompt();
                    }
                    // Try to parse as ClientsUpdatedMessage
                    else if let Ok(roster_msg) =
                        serde_json::from_str::<ClientsUpdatedMessage>(&text)
                    {
                        let formatted = MessageFormatter::format_roster(
                            &roster_msg.connection_ids,
                            my_connection_id.as_deref(),
                        );
                        print!("{}", formatted);
                        redisplay_prompt();
                    }
                    // Try to parse as ServerChatMessage
                    else if let Ok(chat_msg) = serde_json::from_str::<ServerChatMessage>(&text) {
                        let formatted = MessageFormatter::format_chat_message(
                            &chat_msg.sender_display_name,
                            &chat_msg.message,
                            get_jst_timestamp(),
                        );
                        print!("{}", formatted);
                        redisplay_prompt();
                    }
                    // If parsing fails, display as raw text
                    else {
                        let formatted = MessageFormatter::format_raw_message(&text);
                        print!("{}", formatted);
                        redisplay_prompt();
                    }
                }
                Ok(Message::Binary(data)) => {
                    let formatted = MessageFormatter::format_binary_message(data.len());
                    print!("{}", formatted);
                    redisplay_prompt();
                }
                Ok(Message::Close(_)) => {
                    // An eviction by a newer session of the same user also lands
                    // here, so a server-side close ends the session for good
                    tracing::info!("Server closed the connection");
                    println!("\nDisconnected by the server.");
                    break;
                }
                Err(e) => {
                    tracing::warn!("WebSocket read error: {}", e);
                    connection_error = true;
                    break;
                }
                _ => {}
            }
        }

        connection_error
    });

    // Create channel for rustyline input
    let (input_tx, mut input_rx) = mpsc::unbounded_channel::<String>();

    // Spawn a blocking thread for rustyline (synchronous readline)
    let _readline_handle = std::thread::spawn(move || {
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(e) => {
                eprintln!("Failed to initialize readline: {}", e);
                return;
            }
        };

        loop {
            match rl.readline("> ") {
                Ok(line) => {
                    let line = line.trim();
                    if !line.is_empty() {
                        rl.add_history_entry(line).ok();
                        if input_tx.send(line.to_string()).is_err() {
                            // Channel closed, exit thread
                            break;
                        }
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    // Ctrl+C
                    tracing::info!("Interrupted");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    // Ctrl+D
                    tracing::info!("EOF");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {}", err);
                    break;
                }
            }
        }
    });

    // Spawn a task to handle stdin input and send to WebSocket
    let mut write_task = tokio::spawn(async move {
        let mut write_error = false;

        while let Some(line) = input_rx.recv().await {
            let msg = ClientChatMessage {
                r#type: MessageType::MessageFromClient,
                message: Some(line),
            };

            let json = match serde_json::to_string(&msg) {
                Ok(json) => json,
                Err(e) => {
                    tracing::error!("Failed to serialize message: {}", e);
                    continue;
                }
            };

            if let Err(e) = write.send(Message::Text(json.into())).await {
                tracing::warn!("Failed to send message: {}", e);
                write_error = true;
                break;
            }

            // Display sent timestamp and redisplay prompt
            let formatted = MessageFormatter::format_sent_confirmation(get_jst_timestamp());
            print!("\n{}", formatted);
            redisplay_prompt();
        }

        write_error
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        read_result = &mut read_task => {
            write_task.abort();
            let connection_error = read_result.unwrap_or(false);
            if connection_error {
                return Err(ClientError::ConnectionError(
                    "Connection lost".to_string(),
                ));
            }
        }
        write_result = &mut write_task => {
            read_task.abort();
            let write_error = write_result.unwrap_or(false);
            if write_error {
                return Err(ClientError::ConnectionError(
                    "Connection lost".to_string(),
                ));
            }
        }
    }

    Ok(())
}
