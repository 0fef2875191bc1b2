//! UseCase 層のエラー定義

use thiserror::Error;

/// 接続受け入れの失敗
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConnectError {
    /// 同じ接続 ID が既に登録されている
    #[error("connection id '{0}' is already registered")]
    DuplicateConnectionId(String),
}

/// メッセージ送信の失敗
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SendMessageError {
    /// 送信元の接続が Registry に存在しない
    #[error("connection '{0}' is not registered")]
    UnknownConnection(String),
}

/// トークン発行の失敗
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IssueTokenError {
    /// UserDirectory に存在しないユーザー
    #[error("user '{0}' is not known")]
    UnknownUser(String),
    /// 署名処理の失敗
    #[error("failed to sign token: {0}")]
    Signing(String),
}
