//! UseCase: ゲートウェイ状態取得（デバッグ用）

use std::sync::Arc;

use crate::domain::{Connection, ConnectionRegistry};

/// ゲートウェイ状態取得のユースケース
pub struct GetGatewayStateUseCase {
    /// Registry（接続表の抽象化）
    registry: Arc<dyn ConnectionRegistry>,
}

impl GetGatewayStateUseCase {
    /// 新しい GetGatewayStateUseCase を作成
    pub fn new(registry: Arc<dyn ConnectionRegistry>) -> Self {
        Self { registry }
    }

    /// 現在の接続一覧を取得（挿入順）
    pub async fn execute(&self) -> Vec<Connection> {
        self.registry.connections().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ConnectionId, DisplayName, SocketHandle, SocketSendError, User, UserId};
    use crate::infrastructure::registry::InMemoryConnectionRegistry;
    use hiroba_shared::time::get_jst_timestamp;

    struct NoopSocketHandle;

    impl SocketHandle for NoopSocketHandle {
        fn send(&self, _event: &str) -> Result<(), SocketSendError> {
            Ok(())
        }

        fn close(&self) {}
    }

    fn test_connection(conn_id: &str, user_id: &str, display_name: &str) -> Connection {
        Connection::new(
            ConnectionId::new(conn_id.to_string()).unwrap(),
            User::new(
                UserId::new(user_id.to_string()).unwrap(),
                DisplayName::new(display_name.to_string()).unwrap(),
                true,
            ),
            Arc::new(NoopSocketHandle),
            get_jst_timestamp(),
        )
    }

    #[tokio::test]
    async fn test_get_gateway_state_empty() {
        // テスト項目: 接続がなければ空のリストが返る
        // given (前提条件):
        let registry = Arc::new(InMemoryConnectionRegistry::new());
        let usecase = GetGatewayStateUseCase::new(registry);

        // when (操作):
        let connections = usecase.execute().await;

        // then (期待する結果):
        assert!(connections.is_empty());
    }

    #[tokio::test]
    async fn test_get_gateway_state_returns_connections_in_insertion_order() {
        // テスト項目: 接続一覧が挿入順で返る
        // given (前提条件): 2 ユーザーが接続済み
        let registry = Arc::new(InMemoryConnectionRegistry::new());
        let usecase = GetGatewayStateUseCase::new(registry.clone());
        registry
            .register(test_connection("c1", "u1", "Ana"))
            .await
            .unwrap();
        registry
            .register(test_connection("c2", "u3", "Carla"))
            .await
            .unwrap();

        // when (操作):
        let connections = usecase.execute().await;

        // then (期待する結果):
        assert_eq!(connections.len(), 2);
        assert_eq!(connections[0].id.as_str(), "c1");
        assert_eq!(connections[1].id.as_str(), "c2");
    }
}
