//! ドメイン層のエラー定義

use thiserror::Error;

/// 値オブジェクト生成時の検証エラー
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("user id must not be empty")]
    EmptyUserId,

    #[error("display name must not be empty")]
    EmptyDisplayName,

    #[error("connection id must not be empty")]
    EmptyConnectionId,
}
