//! UseCase: 接続受け入れ処理（Session Policy）
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ConnectClientUseCase::execute() メソッド
//! - 接続の登録と、同一ユーザーの旧接続の追い出し
//!
//! ### なぜこのテストが必要か
//! - ビジネスロジックの検証：1 ユーザーにつき接続は高々 1 本
//! - 追い出された旧接続が確実にクローズされることを保証
//! - 登録後のロスターが正しく返されることを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：新規ユーザーの接続
//! - 正常系：同一ユーザーの再接続（旧接続の追い出し）
//! - 異常系：接続 ID の重複

use std::sync::Arc;

use crate::domain::{Connection, ConnectionId, ConnectionRegistry, RegistryError};

use super::error::ConnectError;

/// 接続受け入れのユースケース
///
/// 同一ユーザーの旧接続を追い出してから新しい接続を登録する、
/// いわゆる single-active-session ポリシーの実装。
pub struct ConnectClientUseCase {
    /// Registry（接続表の抽象化）
    registry: Arc<dyn ConnectionRegistry>,
}

impl ConnectClientUseCase {
    /// 新しい ConnectClientUseCase を作成
    pub fn new(registry: Arc<dyn ConnectionRegistry>) -> Self {
        Self { registry }
    }

    /// 接続受け入れを実行
    ///
    /// # Arguments
    ///
    /// * `connection` - 認証済みユーザーを載せた新しい接続
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<ConnectionId>)` - 登録直後のロスター（ブロードキャスト用）
    /// * `Err(ConnectError)` - 受け入れ失敗
    pub async fn execute(&self, connection: Connection) -> Result<Vec<ConnectionId>, ConnectError> {
        let user_id = connection.user.id.clone();
        let new_id = connection.id.clone();

        // 1. 登録（同一ユーザーの既存エントリは Registry が同じ排他区間で差し替える）
        let evicted = match self.registry.register(connection).await {
            Ok(evicted) => evicted,
            Err(RegistryError::DuplicateConnectionId(id)) => {
                return Err(ConnectError::DuplicateConnectionId(id));
            }
        };

        // 2. 追い出した旧接続をクローズ（エラーではなく想定内の置き換え）
        if let Some(old) = evicted {
            tracing::info!(
                "User '{}' reconnected as '{}', closing previous connection '{}'",
                user_id.as_str(),
                new_id.as_str(),
                old.id.as_str()
            );
            old.handle.close();
        }

        // 3. 登録後のロスターを返す
        Ok(self.registry.connection_ids().await)
    }

    /// ロスター更新を全接続にブロードキャスト
    ///
    /// # Arguments
    ///
    /// * `message` - ブロードキャストするメッセージ（JSON）
    pub async fn broadcast_clients_updated(&self, message: &str) {
        let connections = self.registry.connections().await;
        for conn in connections {
            // ブロードキャストでは一部の送信失敗を許容
            if let Err(e) = conn.handle.send(message) {
                tracing::warn!(
                    "Failed to push roster update to connection '{}': {}",
                    conn.id.as_str(),
                    e
                );
            }
        }
    }
}
