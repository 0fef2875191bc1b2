//! インメモリの UserDirectory 実装
//!
//! ## 責務
//!
//! - 既知ユーザーの台帳を保持し、ID での照会に応える
//! - 起動時のシードファイル（JSON）からの読み込み
//!
//! ## 設計ノート
//!
//! ユーザーの登録・更新 API は持たない。台帳は起動時に確定し、
//! 以後は読み取り専用なのでロックなしで共有できる。

use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

use crate::domain::{DisplayName, User, UserDirectory, UserId};

/// シードファイル読み込みのエラー
#[derive(Error, Debug)]
pub enum SeedError {
    #[error("failed to read seed file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse seed file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid user record: {0}")]
    InvalidRecord(String),
}

/// シードファイルの 1 レコード
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserSeedRecord {
    id: String,
    display_name: String,
    is_active: bool,
}

/// インメモリの UserDirectory 実装
pub struct InMemoryUserDirectory {
    users: HashMap<UserId, User>,
}

impl InMemoryUserDirectory {
    /// ユーザー一覧から台帳を作成する
    pub fn new(users: Vec<User>) -> Self {
        Self {
            users: users.into_iter().map(|u| (u.id.clone(), u)).collect(),
        }
    }

    /// デモ用のユーザー一覧で台帳を作成する
    ///
    /// シードファイル指定なしで起動したときの既定値。
    pub fn with_demo_users() -> Self {
        let demo = [("u1", "Ana", true), ("u2", "Bruno", false), ("u3", "Carla", true)];
        let users = demo
            .into_iter()
            .map(|(id, name, is_active)| {
                let id = UserId::new(id.to_string()).expect("demo user id is non-empty");
                let name =
                    DisplayName::new(name.to_string()).expect("demo display name is non-empty");
                User::new(id, name, is_active)
            })
            .collect();
        Self::new(users)
    }

    /// JSON シードファイルから台帳を作成する
    ///
    /// フォーマットは `[{"id": ..., "displayName": ..., "isActive": ...}]`。
    pub fn from_seed_file(path: &Path) -> Result<Self, SeedError> {
        let content = std::fs::read_to_string(path)?;
        let records: Vec<UserSeedRecord> = serde_json::from_str(&content)?;

        let mut users = Vec::with_capacity(records.len());
        for record in records {
            let id = UserId::new(record.id)
                .map_err(|e| SeedError::InvalidRecord(e.to_string()))?;
            let name = DisplayName::new(record.display_name)
                .map_err(|e| SeedError::InvalidRecord(e.to_string()))?;
            users.push(User::new(id, name, record.is_active));
        }

        Ok(Self::new(users))
    }

    /// 登録済みユーザー数を返す
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// 台帳が空かどうかを返す
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn find_by_id(&self, user_id: &UserId) -> Option<User> {
        self.users.get(user_id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_find_by_id_returns_known_user() {
        // テスト項目: 既知のユーザー ID で照会すると User が返る
        // given (前提条件):
        let directory = InMemoryUserDirectory::with_demo_users();
        let user_id = UserId::new("u1".to_string()).unwrap();

        // when (操作):
        let found = directory.find_by_id(&user_id).await;

        // then (期待する結果):
        let user = found.unwrap();
        assert_eq!(user.id, user_id);
        assert_eq!(user.display_name.as_str(), "Ana");
        assert!(user.is_active);
    }

    #[tokio::test]
    async fn test_find_by_id_returns_inactive_user_as_is() {
        // テスト項目: 非アクティブユーザーも照会自体は成功する
        // given (前提条件):
        let directory = InMemoryUserDirectory::with_demo_users();
        let user_id = UserId::new("u2".to_string()).unwrap();

        // when (操作):
        let found = directory.find_by_id(&user_id).await;

        // then (期待する結果): アクティブ判定は呼び出し側の責務
        let user = found.unwrap();
        assert!(!user.is_active);
    }

    #[tokio::test]
    async fn test_find_by_id_returns_none_for_unknown_user() {
        // テスト項目: 未知のユーザー ID で照会すると None が返る
        // given (前提条件):
        let directory = InMemoryUserDirectory::with_demo_users();
        let user_id = UserId::new("nobody".to_string()).unwrap();

        // when (操作):
        let found = directory.find_by_id(&user_id).await;

        // then (期待する結果):
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_from_seed_file_loads_users() {
        // テスト項目: シードファイルからユーザーを読み込める
        // given (前提条件):
        let path =
            std::env::temp_dir().join(format!("hiroba-seed-{}.json", uuid::Uuid::new_v4()));
        let json = r#"[
            {"id": "alice", "displayName": "Alice", "isActive": true},
            {"id": "bob", "displayName": "Bob", "isActive": false}
        ]"#;
        std::fs::write(&path, json).unwrap();

        // when (操作):
        let directory = InMemoryUserDirectory::from_seed_file(&path).unwrap();

        // then (期待する結果):
        assert_eq!(directory.len(), 2);
        let alice = directory
            .find_by_id(&UserId::new("alice".to_string()).unwrap())
            .await
            .unwrap();
        assert_eq!(alice.display_name.as_str(), "Alice");
        assert!(alice.is_active);
        let bob = directory
            .find_by_id(&UserId::new("bob".to_string()).unwrap())
            .await
            .unwrap();
        assert!(!bob.is_active);

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_from_seed_file_rejects_invalid_record() {
        // テスト項目: 空の ID を含むレコードは InvalidRecord になる
        // given (前提条件):
        let path =
            std::env::temp_dir().join(format!("hiroba-seed-{}.json", uuid::Uuid::new_v4()));
        let json = r#"[{"id": "", "displayName": "Ghost", "isActive": true}]"#;
        std::fs::write(&path, json).unwrap();

        // when (操作):
        let result = InMemoryUserDirectory::from_seed_file(&path);

        // then (期待する結果):
        assert!(matches!(result, Err(SeedError::InvalidRecord(_))));

        std::fs::remove_file(&path).unwrap();
    }
}
