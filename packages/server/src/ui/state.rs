//! Server state shared across handlers.

use std::sync::Arc;

use crate::usecase::{
    AuthenticateClientUseCase, ConnectClientUseCase, DisconnectClientUseCase,
    GetGatewayStateUseCase, GetPresenceUseCase, IssueTokenUseCase, SendMessageUseCase,
};

/// Shared application state
pub struct AppState {
    /// AuthenticateClientUseCase（接続認証のユースケース）
    pub authenticate_client_usecase: Arc<AuthenticateClientUseCase>,
    /// ConnectClientUseCase（接続受け入れのユースケース）
    pub connect_client_usecase: Arc<ConnectClientUseCase>,
    /// DisconnectClientUseCase（接続切断のユースケース）
    pub disconnect_client_usecase: Arc<DisconnectClientUseCase>,
    /// SendMessageUseCase（メッセージ送信のユースケース）
    pub send_message_usecase: Arc<SendMessageUseCase>,
    /// GetGatewayStateUseCase（ゲートウェイ状態取得のユースケース）
    pub get_gateway_state_usecase: Arc<GetGatewayStateUseCase>,
    /// GetPresenceUseCase（在席状況照会のユースケース）
    pub get_presence_usecase: Arc<GetPresenceUseCase>,
    /// IssueTokenUseCase（開発用トークン発行のユースケース）
    pub issue_token_usecase: Arc<IssueTokenUseCase>,
}
