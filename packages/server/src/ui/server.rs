//! Server execution logic.

use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::usecase::{
    AuthenticateClientUseCase, ConnectClientUseCase, DisconnectClientUseCase,
    GetGatewayStateUseCase, GetPresenceUseCase, IssueTokenUseCase, SendMessageUseCase,
};

use super::{
    handler::{
        debug_gateway_state, debug_issue_token, get_presence, health_check, websocket_handler,
    },
    signal::shutdown_signal,
    state::AppState,
};

/// Presence gateway server
///
/// This struct encapsulates the server configuration and provides methods to run the server.
///
/// # Example
///
/// ```ignore
/// let server = GatewayServer::new(
///     authenticate_client_usecase,
///     connect_client_usecase,
///     disconnect_client_usecase,
///     send_message_usecase,
///     get_gateway_state_usecase,
///     get_presence_usecase,
///     issue_token_usecase,
/// );
/// server.run("127.0.0.1".to_string(), 8080).await?;
/// ```
pub struct GatewayServer {
    /// AuthenticateClientUseCase（接続認証のユースケース）
    authenticate_client_usecase: Arc<AuthenticateClientUseCase>,
    /// ConnectClientUseCase（接続受け入れのユースケース）
    connect_client_usecase: Arc<ConnectClientUseCase>,
    /// DisconnectClientUseCase（接続切断のユースケース）
    disconnect_client_usecase: Arc<DisconnectClientUseCase>,
    /// SendMessageUseCase（メッセージ送信のユースケース）
    send_message_usecase: Arc<SendMessageUseCase>,
    /// GetGatewayStateUseCase（ゲートウェイ状態取得のユースケース）
    get_gateway_state_usecase: Arc<GetGatewayStateUseCase>,
    /// GetPresenceUseCase（在席状況照会のユースケース）
    get_presence_usecase: Arc<GetPresenceUseCase>,
    /// IssueTokenUseCase（開発用トークン発行のユースケース）
    issue_token_usecase: Arc<IssueTokenUseCase>,
}

impl GatewayServer {
    /// Create a new GatewayServer instance
    pub fn new(
        authenticate_client_usecase: Arc<AuthenticateClientUseCase>,
        connect_client_usecase: Arc<ConnectClientUseCase>,
        disconnect_client_usecase: Arc<DisconnectClientUseCase>,
        send_message_usecase: Arc<SendMessageUseCase>,
        get_gateway_state_usecase: Arc<GetGatewayStateUseCase>,
        get_presence_usecase: Arc<GetPresenceUseCase>,
        issue_token_usecase: Arc<IssueTokenUseCase>,
    ) -> Self {
        Self {
            authenticate_client_usecase,
            connect_client_usecase,
            disconnect_client_usecase,
            send_message_usecase,
            get_gateway_state_usecase,
            get_presence_usecase,
            issue_token_usecase,
        }
    }

    /// Build the axum router with all gateway routes
    ///
    /// Exposed separately from [`run`](Self::run) so tests can serve the
    /// router on an ephemeral port.
    pub fn router(self) -> Router {
        let app_state = Arc::new(AppState {
            authenticate_client_usecase: self.authenticate_client_usecase,
            connect_client_usecase: self.connect_client_usecase,
            disconnect_client_usecase: self.disconnect_client_usecase,
            send_message_usecase: self.send_message_usecase,
            get_gateway_state_usecase: self.get_gateway_state_usecase,
            get_presence_usecase: self.get_presence_usecase,
            issue_token_usecase: self.issue_token_usecase,
        });

        Router::new()
            // WebSocket エンドポイント
            .route("/ws", get(websocket_handler))
            // HTTP エンドポイント
            .route("/api/health", get(health_check))
            .route("/api/presence/{user_id}", get(get_presence))
            .route("/debug/gateway", get(debug_gateway_state))
            .route("/debug/token/{user_id}", get(debug_issue_token))
            .layer(TraceLayer::new_for_http())
            .with_state(app_state)
    }

    /// Run the presence gateway server
    ///
    /// # Arguments
    ///
    /// * `host` - The host address to bind to (e.g., "127.0.0.1")
    /// * `port` - The port number to bind to (e.g., 8080)
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        let app = self.router();

        // Bind the server to the host and port
        let bind_addr = format!("{}:{}", host, port);
        let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

        // Start the server
        tracing::info!(
            "Presence gateway listening on {}",
            listener.local_addr()?
        );
        tracing::info!("Connect to: ws://{}/ws", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        // Set up graceful shutdown signal handler
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
