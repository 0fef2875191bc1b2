//! UseCase: 接続切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectClientUseCase::execute() メソッド
//! - 接続の削除と、削除後のロスター取得
//!
//! ### なぜこのテストが必要か
//! - ビジネスロジックの検証：切断で Registry から確実に消える
//! - 追い出し済み接続の切断イベント（二重削除）が安全なことを保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：接続中のクライアントの切断
//! - エッジケース：最後の接続の切断（空のロスター）
//! - エッジケース：追い出し済み接続の切断イベント到着

use std::sync::Arc;

use crate::domain::{ConnectionId, ConnectionRegistry};

/// 接続切断のユースケース
pub struct DisconnectClientUseCase {
    /// Registry（接続表の抽象化）
    registry: Arc<dyn ConnectionRegistry>,
}

impl DisconnectClientUseCase {
    /// 新しい DisconnectClientUseCase を作成
    pub fn new(registry: Arc<dyn ConnectionRegistry>) -> Self {
        Self { registry }
    }

    /// 接続切断を実行
    ///
    /// 切断イベントは追い出しによる強制クローズとも競合するため、
    /// 対象がすでに消えていてもエラーにしない。
    ///
    /// # Arguments
    ///
    /// * `connection_id` - 切断された接続の ID
    ///
    /// # Returns
    ///
    /// 削除直後のロスター（ブロードキャスト用）
    pub async fn execute(&self, connection_id: &ConnectionId) -> Vec<ConnectionId> {
        // 1. Registry から削除（存在しなければ no-op）
        match self.registry.remove(connection_id).await {
            Some(removed) => {
                tracing::info!(
                    "Connection '{}' of user '{}' removed from registry",
                    removed.id.as_str(),
                    removed.user.id.as_str()
                );
            }
            None => {
                // 追い出しで先に削除されたケース
                tracing::debug!(
                    "Connection '{}' was already removed",
                    connection_id.as_str()
                );
            }
        }

        // 2. 削除後のロスターを返す
        self.registry.connection_ids().await
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

#[cfg(test)]
mod tests {
    use std::sync::Mutex as StdMutex;
    use std::sync::atomic::{AtomicBool, Ordering};

    use super::*;
    use crate::domain::{Connection, DisplayName, SocketHandle, SocketSendError, User, UserId};
    use crate::infrastructure::registry::InMemoryConnectionRegistry;
    use hiroba_shared::time::get_jst_timestamp;

    struct RecordingSocketHandle {
        sent: StdMutex<Vec<String>>,
        closed: AtomicBool,
    }

    impl RecordingSocketHandle {
        fn new() -> Self {
            Self {
                sent: StdMutex::new(Vec::new()),
                closed: AtomicBool::new(false),
            }
        }

        fn sent(&self) -> Vec<String> {
            self.sent.lock().unwrap().clone()
        }
    }

    impl SocketHandle for RecordingSocketHandle {
        fn send(&self, event: &str) -> Result<(), SocketSendError> {
            self.sent.lock().unwrap().push(event.to_string());
            Ok(())
        }

        fn close(&self) {
            self.closed.store(true, Ordering::SeqCst);
        }
    }

    fn test_connection(
        conn_id: &str,
        user_id: &str,
        display_name: &str,
        handle: Arc<RecordingSocketHandle>,
    ) -> Connection {
        Connection::new(
            ConnectionId::new(conn_id.to_string()).unwrap(),
            User::new(
                UserId::new(user_id.to_string()).unwrap(),
                DisplayName::new(display_name.to_string()).unwrap(),
                true,
            ),
            handle,
            get_jst_timestamp(),
        )
    }

    #[tokio::test]
    async fn test_disconnect_removes_connection() {
        // テスト項目: 切断した接続が Registry から削除され、残りのロスターが返る
        // given (前提条件): 2 ユーザーが接続済み
        let registry = Arc::new(InMemoryConnectionRegistry::new());
        let usecase = DisconnectClientUseCase::new(registry.clone());
        let handle1 = Arc::new(RecordingSocketHandle::new());
        let handle2 = Arc::new(RecordingSocketHandle::new());
        registry
            .register(test_connection("c1", "u1", "Ana", handle1))
            .await
            .unwrap();
        registry
            .register(test_connection("c2", "u3", "Carla", handle2))
            .await
            .unwrap();

        // when (操作): c1 を切断
        let roster = usecase
            .execute(&ConnectionId::new("c1".to_string()).unwrap())
            .await;

        // then (期待する結果):
        assert_eq!(roster.len(), 1);
        assert_eq!(roster[0].as_str(), "c2");
        assert_eq!(registry.count().await, 1);
    }

    #[tokio::test]
    async fn test_disconnect_last_connection_returns_empty_roster() {
        // テスト項目: 最後の接続の切断で空のロスターが返る
        // given (前提条件): u1 のみ接続済み
        let registry = Arc::new(InMemoryConnectionRegistry::new());
        let usecase = DisconnectClientUseCase::new(registry.clone());
        let handle = Arc::new(RecordingSocketHandle::new());
        registry
            .register(test_connection("c1", "u1", "Ana", handle))
            .await
            .unwrap();

        // when (操作):
        let roster = usecase
            .execute(&ConnectionId::new("c1".to_string()).unwrap())
            .await;

        // then (期待する結果):
        assert!(roster.is_empty());
        assert_eq!(registry.count().await, 0);
    }

    #[tokio::test]
    async fn test_disconnect_absent_connection_is_noop() {
        // テスト項目: 存在しない接続の切断イベントが安全に無視される
        // given (前提条件): c2 のみ接続済み（c1 は追い出し済みの想定）
        let registry = Arc::new(InMemoryConnectionRegistry::new());
        let usecase = DisconnectClientUseCase::new(registry.clone());
        let handle = Arc::new(RecordingSocketHandle::new());
        registry
            .register(test_connection("c2", "u1", "Ana", handle))
            .await
            .unwrap();

        // when (操作): 削除済みの c1 の切断イベントが届く
        let roster = usecase
            .execute(&ConnectionId::new("c1".to_string()).unwrap())
            .await;

        // then (期待する結果): c2 は影響を受けない
        assert_eq!(roster.len(), 1);
        assert_eq!(roster[0].as_str(), "c2");
        assert_eq!(registry.count().await, 1);
    }

    #[tokio::test]
    async fn test_broadcast_clients_updated_reaches_remaining_connections() {
        // テスト項目: 切断後のロスター更新が残りの接続に届く
        // given (前提条件): c1 切断済み、c2 が残っている
        let registry = Arc::new(InMemoryConnectionRegistry::new());
        let usecase = DisconnectClientUseCase::new(registry.clone());
        let handle1 = Arc::new(RecordingSocketHandle::new());
        let handle2 = Arc::new(RecordingSocketHandle::new());
        registry
            .register(test_connection("c1", "u1", "Ana", handle1.clone()))
            .await
            .unwrap();
        registry
            .register(test_connection("c2", "u3", "Carla", handle2.clone()))
            .await
            .unwrap();
        usecase
            .execute(&ConnectionId::new("c1".to_string()).unwrap())
            .await;

        // when (操作):
        usecase
            .broadcast_clients_updated(r#"{"type":"clients-updated","connectionIds":["c2"]}"#)
            .await;

        // then (期待する結果): 残った c2 にだけ届く
        assert!(handle1.sent().is_empty());
        assert_eq!(handle2.sent().len(), 1);
    }
}
