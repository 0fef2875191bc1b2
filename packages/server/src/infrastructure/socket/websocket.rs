//! WebSocket 接続への SocketHandle 実装
//!
//! ## 責務
//!
//! - ドメイン層の SocketHandle を WebSocket の送信側に接続する
//! - 送信フレーム（イベント / クローズ指示）をチャネル経由で
//!   pusher ループへ渡す
//!
//! ## 設計ノート
//!
//! WebSocket の送信シンク本体は axum のハンドラタスクが所有している。
//! このハンドルはシンクを直接は触らず、unbounded channel に
//! OutboundFrame を積むだけにしてある。これでドメイン層・ユースケース層は
//! 同期のまま送信でき、実際の I/O は接続ごとの pusher タスクに集約される。
//!
//! close はベストエフォート。受信側タスクが既に終了していれば
//! チャネル送信は失敗するが、その接続はもう閉じているので無視してよい。

use tokio::sync::mpsc;

use crate::domain::{SocketHandle, SocketSendError};

/// 接続ごとの pusher タスクへ渡す送信フレーム
#[derive(Debug, Clone, PartialEq)]
pub enum OutboundFrame {
    /// シリアライズ済みイベント JSON をテキストフレームで送る
    Event(String),
    /// Close フレームを送って接続を閉じる
    Close,
}

/// OutboundFrame を pusher タスクへ送るチャネルの送信側
pub type FrameSender = mpsc::UnboundedSender<OutboundFrame>;

/// WebSocket 接続 1 本に対応する SocketHandle 実装
pub struct WebSocketHandle {
    sender: FrameSender,
}

impl WebSocketHandle {
    pub fn new(sender: FrameSender) -> Self {
        Self { sender }
    }
}

impl SocketHandle for WebSocketHandle {
    fn send(&self, event: &str) -> Result<(), SocketSendError> {
        self.sender
            .send(OutboundFrame::Event(event.to_string()))
            .map_err(|_| SocketSendError::ChannelClosed)
    }

    fn close(&self) {
        // 受信側が既に終了していても問題ない
        let _ = self.sender.send(OutboundFrame::Close);
    }
}
