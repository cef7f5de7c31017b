//! UseCase: 参加者切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectParticipantUseCase::execute() メソッド
//! - セッション削除、グループからの離脱、参加者数の減算、最後の 1 人でのルーム削除
//!
//! ### なぜこのテストが必要か
//! - 全員が切断したルームが残らないこと（N 接続 → N 切断でルームが消える）を保証する
//! - 切断処理はデータストアの障害があっても失敗しないことを確認する
//!
//! ### どのような状況を想定しているか
//! - 正常系：残りの参加者がいる切断、最後の参加者の切断
//! - 異常系：データストアの障害（ログに残して続行）
//! - エッジケース：未登録の接続 ID、並行した切断

use std::sync::Arc;

use crate::domain::{
    ConnectionId, MemberRelease, MessageLogRepository, MessagePusher, RoomCode, RoomRepository,
};

use super::session_registry::SessionRegistry;

/// Disconnect の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisconnectOutcome {
    /// セッションを持たない接続だった
    NotAttached,
    /// ルームには参加者が残っている
    Remaining { room: RoomCode, members: i64 },
    /// 最後の参加者だったためルームを削除した
    RoomDeleted(RoomCode),
    /// ルームのレコードがすでに存在しなかった、または更新に失敗した
    Unrecorded(RoomCode),
}

/// 参加者切断のユースケース
pub struct DisconnectParticipantUseCase {
    rooms: Arc<dyn RoomRepository>,
    message_log: Arc<dyn MessageLogRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    sessions: Arc<SessionRegistry>,
}

impl DisconnectParticipantUseCase {
    /// 新しい DisconnectParticipantUseCase を作成
    pub fn new(
        rooms: Arc<dyn RoomRepository>,
        message_log: Arc<dyn MessageLogRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        sessions: Arc<SessionRegistry>,
    ) -> Self {
        Self {
            rooms,
            message_log,
            message_pusher,
            sessions,
        }
    }

    /// 参加者切断を実行
    ///
    /// 失敗を返しません。データストアの障害はログに記録して処理を続けます。
    pub async fn execute(&self, connection_id: &ConnectionId) -> DisconnectOutcome {
        // 1. セッションの削除
        let session = self.sessions.detach(connection_id).await;
        self.message_pusher.unregister_client(connection_id).await;
        let Some(session) = session else {
            return DisconnectOutcome::NotAttached;
        };

        // 2. グループからの離脱
        self.message_pusher
            .leave_group(&session.room, connection_id)
            .await;

        // 3. 参加者数の減算（0 以下になったら同じ操作で削除される）
        let room = session.room;
        match self.rooms.release_member(&room).await {
            Ok(MemberRelease::Remaining(members)) => {
                tracing::info!(
                    "{} left room {} ({} members remaining)",
                    session.name,
                    room,
                    members
                );
                DisconnectOutcome::Remaining { room, members }
            }
            Ok(MemberRelease::Deleted) => {
                let closed = self.message_pusher.close_group(&room).await;
                // 削除後に同じルームへ接続したセッションがあれば、その履歴は残す
                if closed && self.sessions.count_in_room(&room).await == 0 {
                    if let Err(e) = self.message_log.delete(&room).await {
                        tracing::warn!("Failed to delete message log of room {}: {}", room, e);
                    }
                }
                tracing::info!("Room deleted: {}", room);
                DisconnectOutcome::RoomDeleted(room)
            }
            Ok(MemberRelease::NotFound) => {
                tracing::warn!("Room {} vanished before {} left", room, session.name);
                DisconnectOutcome::Unrecorded(room)
            }
            Err(e) => {
                tracing::error!("Database error during room update or deletion: {}", e);
                DisconnectOutcome::Unrecorded(room)
            }
        }
    }
}
