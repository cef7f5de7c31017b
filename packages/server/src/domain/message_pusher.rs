//! MessagePusher trait 定義
//!
//! リアルタイム配信（WebSocket など）の抽象化。
//! 接続 ID ごとの送信チャンネルと、ルーム単位のブロードキャストグループを管理します。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{ChatMessage, ConnectionId, RoomCode};

/// クライアントへのメッセージ送信用チャンネル
pub type PusherChannel = mpsc::UnboundedSender<String>;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// クライアントの送信チャンネルを登録
    async fn register_client(&self, connection_id: ConnectionId, sender: PusherChannel);

    /// クライアントの登録を解除（所属しているグループからも外す）
    async fn unregister_client(&self, connection_id: &ConnectionId);

    /// クライアントをルームのブロードキャストグループに参加させる
    async fn join_group(&self, room: &RoomCode, connection_id: &ConnectionId);

    /// クライアントをルームのブロードキャストグループから外す
    async fn leave_group(&self, room: &RoomCode, connection_id: &ConnectionId);

    /// 空になったブロードキャストグループを閉じ、閉じた場合は `true` を返す
    ///
    /// ルーム削除後に接続し直したメンバーがいる場合は閉じない。
    async fn close_group(&self, room: &RoomCode) -> bool;

    /// チャットメッセージを `message.room` のグループ全員（送信者を含む）に送信し、
    /// 送信できた件数を返す
    ///
    /// ワイヤフォーマットへの変換は実装側が行う。
    /// 一部のメンバーへの送信失敗は許容する（ログに残して続行）。
    async fn broadcast_chat(&self, message: &ChatMessage) -> usize;
}
