//! ドメイン層のエンティティ定義

use std::fmt;
use std::sync::Arc;

use super::socket::SocketHandle;
use super::value_object::{ConnectionId, DisplayName, UserId};

/// ハンドシェイク時に取得した認証済みユーザーのスナップショット
///
/// 接続中に再取得はしない（取得時点の値を保持し続ける）。
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: UserId,
    pub display_name: DisplayName,
    pub is_active: bool,
}

impl User {
    /// 新しい User を作成
    pub fn new(id: UserId, display_name: DisplayName, is_active: bool) -> Self {
        Self {
            id,
            display_name,
            is_active,
        }
    }
}

/// 1 本のトランスポートセッションに対応する接続エンティティ
///
/// Registry に登録されるのは認証成功後のみ。登録後にフィールドが
/// 変わることはなく、削除（切断または追い出し）だけが起こる。
#[derive(Clone)]
pub struct Connection {
    /// トランスポート層が払い出した接続 ID
    pub id: ConnectionId,
    /// ハンドシェイク時点のユーザースナップショット
    pub user: User,
    /// 送信・クローズのみ可能な接続ハンドル
    pub handle: Arc<dyn SocketHandle>,
    /// 接続時刻（エポックミリ秒）
    pub connected_at: i64,
}

impl Connection {
    /// 新しい Connection を作成
    pub fn new(
        id: ConnectionId,
        user: User,
        handle: Arc<dyn SocketHandle>,
        connected_at: i64,
    ) -> Self {
        Self {
            id,
            user,
            handle,
            connected_at,
        }
    }

    /// この接続の表示名を返す
    pub fn display_name(&self) -> &DisplayName {
        &self.user.display_name
    }
}

impl fmt::Debug for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // handle は Debug を実装しないため出力から外す
        f.debug_struct("Connection")
            .field("id", &self.id)
            .field("user", &self.user)
            .field("connected_at", &self.connected_at)
            .finish_non_exhaustive()
    }
}

impl PartialEq for Connection {
    fn eq(&self, other: &Self) -> bool {
        // handle は trait オブジェクトのためポインタ同一性で比較する
        self.id == other.id
            && self.user == other.user
            && Arc::ptr_eq(&self.handle, &other.handle)
            && self.connected_at == other.connected_at
    }
}

/// 全接続へ配信するチャットイベント
///
/// 送信者の表示名解決と本文の補完を終えた、配信直前の形。
#[derive(Debug, Clone, PartialEq)]
pub struct ChatBroadcast {
    /// 送信者の表示名（送信時点の Registry から解決したもの）
    pub sender_display_name: DisplayName,
    /// 配信する本文（空なら補完済み）
    pub message: String,
}

impl ChatBroadcast {
    /// 新しい ChatBroadcast を作成
    pub fn new(sender_display_name: DisplayName, message: String) -> Self {
        Self {
            sender_display_name,
            message,
        }
    }
}
