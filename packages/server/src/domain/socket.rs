//! 接続ハンドルの trait 定義

use thiserror::Error;

/// ハンドル経由の送信失敗
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SocketSendError {
    /// 送信チャンネルが既に閉じている
    #[error("connection channel is closed")]
    ChannelClosed,
}

/// 送信とクローズだけを公開する接続ハンドル
///
/// Registry はこの trait 越しにしかソケットへ触れず、トランスポートの
/// 内部には踏み込まない。実体の生成と破棄は UI 層が行う。
pub trait SocketHandle: Send + Sync {
    /// シリアライズ済みイベントを 1 件送信する
    fn send(&self, event: &str) -> Result<(), SocketSendError>;

    /// 接続のクローズを指示する（複数回呼んでも安全）
    fn close(&self);
}
