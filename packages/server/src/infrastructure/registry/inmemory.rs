//! In-memory な ConnectionRegistry 実装
//!
//! ## 責務
//!
//! - 接続エンティティの登録・削除・列挙（プロセス内メモリのみ、永続化なし）
//! - 同一ユーザーの既存接続を登録と同じ排他区間で置き換える
//!
//! ## 設計ノート
//!
//! 接続表と userId → connectionId の索引を 1 つの Mutex で守る。
//! `register` の「既存接続の取り外し + 新規挿入」と、`remove` の
//! 「本体削除 + 索引の条件付きクリア」がそれぞれ 1 回のロック取得の
//! 中で完結するため、並行する admit / 切断がどの順で走っても
//! 1 ユーザー 1 接続の不変条件が保たれる。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    Connection, ConnectionId, ConnectionRegistry, DisplayName, RegistryError, UserId,
};

#[derive(Default)]
struct RegistryState {
    /// 挿入順を保持する接続エントリ
    entries: Vec<Connection>,
    /// userId → connectionId の索引
    index: HashMap<UserId, ConnectionId>,
}

/// In-memory な ConnectionRegistry 実装
///
/// サーバー起動時に 1 つだけ生成し、`Arc<dyn ConnectionRegistry>` として
/// UseCase 層へ渡す。グローバル変数にはしない。
pub struct InMemoryConnectionRegistry {
    state: Mutex<RegistryState>,
}

impl InMemoryConnectionRegistry {
    /// 空の Registry を作成する
    pub fn new() -> Self {
        Self {
            state: Mutex::new(RegistryState::default()),
        }
    }
}

impl Default for InMemoryConnectionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ConnectionRegistry for InMemoryConnectionRegistry {
    async fn register(&self, connection: Connection) -> Result<Option<Connection>, RegistryError> {
        let mut state = self.state.lock().await;

        if state.entries.iter().any(|c| c.id == connection.id) {
            return Err(RegistryError::DuplicateConnectionId(
                connection.id.as_str().to_string(),
            ));
        }

        // 索引を新しい接続 ID に差し替え、古い接続があれば本体からも外す
        let evicted = match state
            .index
            .insert(connection.user.id.clone(), connection.id.clone())
        {
            Some(old_id) => {
                let position = state.entries.iter().position(|c| c.id == old_id);
                position.map(|i| state.entries.remove(i))
            }
            None => None,
        };

        tracing::debug!(
            "registered connection '{}' for user '{}'",
            connection.id.as_str(),
            connection.user.id.as_str()
        );
        state.entries.push(connection);

        Ok(evicted)
    }

    async fn remove(&self, connection_id: &ConnectionId) -> Option<Connection> {
        let mut state = self.state.lock().await;

        let position = state.entries.iter().position(|c| &c.id == connection_id)?;
        let removed = state.entries.remove(position);

        // 索引がまだこの接続を指している場合だけ消す。追い出し後に旧接続の
        // 切断イベントが遅れて届いても、新しい接続の索引は壊れない。
        if state.index.get(&removed.user.id) == Some(&removed.id) {
            state.index.remove(&removed.user.id);
        }

        tracing::debug!(
            "removed connection '{}' for user '{}'",
            removed.id.as_str(),
            removed.user.id.as_str()
        );

        Some(removed)
    }

    async fn display_name_of(&self, connection_id: &ConnectionId) -> Option<DisplayName> {
        let state = self.state.lock().await;
        state
            .entries
            .iter()
            .find(|c| &c.id == connection_id)
            .map(|c| c.user.display_name.clone())
    }

    async fn connection_ids(&self) -> Vec<ConnectionId> {
        let state = self.state.lock().await;
        state.entries.iter().map(|c| c.id.clone()).collect()
    }

    async fn find_by_user(&self, user_id: &UserId) -> Option<ConnectionId> {
        let state = self.state.lock().await;
        state.index.get(user_id).cloned()
    }

    async fn connections(&self) -> Vec<Connection> {
        let state = self.state.lock().await;
        state.entries.clone()
    }

    async fn count(&self) -> usize {
        let state = self.state.lock().await;
        state.entries.len()
    }
}
