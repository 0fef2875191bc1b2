//! UseCase: メッセージ送信処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SendMessageUseCase::execute() メソッド
//! - 送信者の表示名解決と、配信イベントの組み立て
//!
//! ### なぜこのテストが必要か
//! - ビジネスロジックの検証：イベントには送信者の表示名が載る
//! - 空メッセージの補完規則を保証
//! - 未登録の接続からの送信が拒否されることを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：本文ありのメッセージ送信
//! - エッジケース：本文が空・欠落しているメッセージ
//! - 異常系：Registry にない接続からの送信

use std::sync::Arc;

use crate::domain::{ChatBroadcast, ConnectionId, ConnectionRegistry};

use super::error::SendMessageError;

/// 本文が空・欠落のときに補完する文字列
const EMPTY_MESSAGE_PLACEHOLDER: &str = "No Message";

/// メッセージ送信のユースケース
pub struct SendMessageUseCase {
    /// Registry（接続表の抽象化）
    registry: Arc<dyn ConnectionRegistry>,
}

impl SendMessageUseCase {
    /// 新しい SendMessageUseCase を作成
    pub fn new(registry: Arc<dyn ConnectionRegistry>) -> Self {
        Self { registry }
    }

    /// 配信イベントを組み立てる
    ///
    /// # Arguments
    ///
    /// * `sender_id` - 送信元の接続 ID
    /// * `message` - 受信フレームの本文（欠落していてもよい）
    ///
    /// # Returns
    ///
    /// * `Ok(ChatBroadcast)` - 配信イベント（表示名解決・本文補完済み）
    /// * `Err(SendMessageError)` - 送信元が Registry に存在しない
    pub async fn execute(
        &self,
        sender_id: &ConnectionId,
        message: Option<String>,
    ) -> Result<ChatBroadcast, SendMessageError> {
        // 1. 送信者の表示名を Registry から解決
        let display_name = self
            .registry
            .display_name_of(sender_id)
            .await
            .ok_or_else(|| SendMessageError::UnknownConnection(sender_id.as_str().to_string()))?;

        // 2. 空・欠落の本文を補完
        let message = match message {
            Some(m) if !m.is_empty() => m,
            _ => EMPTY_MESSAGE_PLACEHOLDER.to_string(),
        };

        Ok(ChatBroadcast::new(display_name, message))
    }

    /// チャットイベントを全接続にブロードキャスト
    ///
    /// 送信者自身にも届ける（echo to all）。
    ///
    /// # Arguments
    ///
    /// * `message` - ブロードキャストするメッセージ（JSON）
    pub async fn broadcast_message(&self, message: &str) {
        let connections = self.registry.connections().await;
        for conn in connections {
            // ブロードキャストでは一部の送信失敗を許容
            if let Err(e) = conn.handle.send(message) {
                tracing::warn!(
                    "Failed to push chat message to connection '{}': {}",
                    conn.id.as_str(),
                    e
                );
            } else {
                tracing::debug!("Pushed chat message to connection '{}'", conn.id.as_str());
            }
        }
    }
}
