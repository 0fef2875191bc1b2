//! Connection Registry の trait 定義
//!
//! ドメイン層が必要とする接続表へのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。
//!
//! ## 依存性の逆転（DIP）
//!
//! - ドメイン層が必要とするインターフェースをドメイン層自身が定義
//! - Infrastructure 層がドメイン層のインターフェースに依存
//! - ドメイン層は Infrastructure 層に依存しない

use async_trait::async_trait;
use thiserror::Error;

use super::entity::Connection;
use super::value_object::{ConnectionId, DisplayName, UserId};

/// Registry 操作の失敗
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// 同じ接続 ID が既に登録されている（register の事前条件違反）
    #[error("connection id '{0}' is already registered")]
    DuplicateConnectionId(String),
}

/// Connection Registry trait
///
/// 接続 ID → 接続エンティティの in-memory な対応表。
/// UseCase 層はこの trait に依存し、Infrastructure 層の具体実装には依存しない。
///
/// ## 不変条件
///
/// - 接続 ID は一意で、トランスポートセッションが開いている間だけ存在する
/// - 1 ユーザーにつき登録は高々 1 件（`register` の置き換えで保証する）
/// - 登録後のエントリは削除以外で変化しない
#[async_trait]
pub trait ConnectionRegistry: Send + Sync {
    /// 接続を登録する
    ///
    /// 同一ユーザーの既存接続があれば、同じ排他区間の中で取り外して返す。
    /// 返された接続のクローズは呼び出し側（Session Policy）の責務。
    async fn register(&self, connection: Connection) -> Result<Option<Connection>, RegistryError>;

    /// 接続を削除する（冪等）
    ///
    /// 存在しない ID はエラーにせず None を返す。切断イベントと追い出しが
    /// 競合しても双方から安全に呼べる。
    async fn remove(&self, connection_id: &ConnectionId) -> Option<Connection>;

    /// 接続 ID から表示名を引く
    async fn display_name_of(&self, connection_id: &ConnectionId) -> Option<DisplayName>;

    /// 現在の接続 ID 一覧を取得（挿入順）
    async fn connection_ids(&self) -> Vec<ConnectionId>;

    /// ユーザー ID から接続 ID を引く
    async fn find_by_user(&self, user_id: &UserId) -> Option<ConnectionId>;

    /// 現在の接続エンティティ一覧を取得（挿入順、ハンドル込み）
    async fn connections(&self) -> Vec<Connection>;

    /// 現在の接続数を取得
    async fn count(&self) -> usize;
}
