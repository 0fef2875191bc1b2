//! UseCase 層（ゲートウェイのアプリケーションロジック）

mod authenticate_client;
mod connect_client;
mod disconnect_client;
mod error;
mod get_gateway_state;
mod get_presence;
mod issue_token;
mod send_message;

pub use authenticate_client::AuthenticateClientUseCase;
pub use connect_client::ConnectClientUseCase;
pub use disconnect_client::DisconnectClientUseCase;
pub use error::{ConnectError, IssueTokenError, SendMessageError};
pub use get_gateway_state::GetGatewayStateUseCase;
pub use get_presence::GetPresenceUseCase;
pub use issue_token::IssueTokenUseCase;
pub use send_message::SendMessageUseCase;
