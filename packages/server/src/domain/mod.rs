//! ドメイン層（値オブジェクト・エンティティ・trait 定義）
//!
//! ゲートウェイの中核となる型と、外部コラボレータ（トークン検証・
//! ユーザー照会）および Infrastructure 層（接続表・ソケット）との
//! 契約をここで定義します。

mod auth;
mod entity;
mod error;
mod registry;
mod socket;
mod value_object;

pub use auth::{AuthError, TokenIssueError, TokenIssuer, TokenVerifier, UserDirectory};
pub use entity::{ChatBroadcast, Connection, User};
pub use error::DomainError;
pub use registry::{ConnectionRegistry, RegistryError};
pub use socket::{SocketHandle, SocketSendError};
pub use value_object::{ConnectionId, DisplayName, UserId};

#[cfg(test)]
pub use auth::{MockTokenVerifier, MockUserDirectory};
