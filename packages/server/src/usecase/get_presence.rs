//! UseCase: ユーザー在席状況の照会

use std::sync::Arc;

use crate::domain::{ConnectionId, ConnectionRegistry, UserId};

/// 在席状況照会のユースケース
pub struct GetPresenceUseCase {
    /// Registry（接続表の抽象化）
    registry: Arc<dyn ConnectionRegistry>,
}

impl GetPresenceUseCase {
    /// 新しい GetPresenceUseCase を作成
    pub fn new(registry: Arc<dyn ConnectionRegistry>) -> Self {
        Self { registry }
    }

    /// ユーザーの現在の接続 ID を取得（未接続なら None）
    pub async fn execute(&self, user_id: &UserId) -> Option<ConnectionId> {
        self.registry.find_by_user(user_id).await
    }
}
