//! 認証コラボレータの trait 定義
//!
//! トークン検証とユーザー照会はゲートウェイの外部契約であり、この層では
//! インターフェースだけを定義します。具体的な実装は Infrastructure 層が
//! 提供します（依存性の逆転）。

use async_trait::async_trait;
use thiserror::Error;

use super::entity::User;
use super::value_object::UserId;

/// 認証段階の失敗
///
/// 3 つの失敗はいずれも接続を閉じるだけで、クライアントには区別させない。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthError {
    /// トークンが不正（形式不正・期限切れ・署名不一致）
    #[error("invalid token")]
    InvalidToken,

    /// トークンは検証できたが該当ユーザーがいない
    #[error("user not found")]
    UserNotFound,

    /// ユーザーが無効化されている
    #[error("user is not active")]
    UserInactive,
}

/// トークン発行の失敗
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenIssueError {
    #[error("failed to sign token: {0}")]
    Signing(String),
}

/// 署名付きトークンを検証して principal を取り出す
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    /// トークンを検証し、ユーザー ID を返す
    async fn verify(&self, token: &str) -> Result<UserId, AuthError>;
}

/// ユーザー ID に対するトークンを発行する
///
/// ログインフローはゲートウェイの外側にあるため、発行は開発用
/// エンドポイントとテストだけが使う。
pub trait TokenIssuer: Send + Sync {
    fn issue(&self, user_id: &UserId) -> Result<String, TokenIssueError>;
}

/// principal からユーザーを照会する
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// ユーザーを ID で引く（存在しなければ None）
    async fn find_by_id(&self, user_id: &UserId) -> Option<User>;
}
