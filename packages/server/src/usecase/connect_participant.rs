//! UseCase: 参加者接続処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ConnectParticipantUseCase::execute() メソッド
//! - 入室チケットの検証、セッション登録、参加者数の加算、ブロードキャストグループへの参加
//!
//! ### なぜこのテストが必要か
//! - JoinRoom を経ていない接続がルームに入れないことを保証する
//! - 参加者数が接続数と一致すること（N 接続で N）を保証する
//! - 加算に失敗した場合にセッションが残らないことを確認する
//! - 最後の参加者の切断と並行した接続でも、メッセージが届くことを保証する
//!
//! ### どのような状況を想定しているか
//! - 正常系：有効なチケットでの接続
//! - 異常系：チケットなし・不正・期限切れ・使用済み、ルームが削除済み、加算の失敗
//! - エッジケース：同じ接続 ID での二重接続、最後の参加者の切断との競合

use std::sync::Arc;

use carechat_shared::time::Clock;

use crate::domain::{
    ConnectionId, JoinTicketRepository, JoinToken, MessagePusher, PusherChannel, RepositoryError,
    RoomRepository, Session, Timestamp,
};

use super::{error::UseCaseError, session_registry::SessionRegistry};

/// 参加者接続のユースケース
pub struct ConnectParticipantUseCase {
    /// Repository（Room Directory）
    rooms: Arc<dyn RoomRepository>,
    /// Repository（入室チケット）
    tickets: Arc<dyn JoinTicketRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    sessions: Arc<SessionRegistry>,
    clock: Arc<dyn Clock>,
}

impl ConnectParticipantUseCase {
    /// 新しい ConnectParticipantUseCase を作成
    pub fn new(
        rooms: Arc<dyn RoomRepository>,
        tickets: Arc<dyn JoinTicketRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        sessions: Arc<SessionRegistry>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            rooms,
            tickets,
            message_pusher,
            sessions,
            clock,
        }
    }

    /// 参加者接続を実行
    ///
    /// # Arguments
    ///
    /// * `connection_id` - 接続 ID
    /// * `token` - JoinRoom で発行された入室チケットのトークン
    /// * `sender` - クライアントへのメッセージ送信用チャンネル
    ///
    /// # Returns
    ///
    /// * `Ok(Session)` - 接続成功（登録したセッション）
    /// * `Err(UseCaseError::Unauthorized)` - チケットがない、不正、期限切れ、使用済み
    /// * `Err(UseCaseError::NotFound)` - ルームが削除済み
    /// * `Err(UseCaseError::InvalidState)` - 接続 ID がすでにセッションを持っている
    /// * `Err(UseCaseError::Persistence)` - データストアの障害
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
        token: Option<String>,
        sender: PusherChannel,
    ) -> Result<Session, UseCaseError> {
        let now = Timestamp::new(self.clock.now_millis());

        // 1. チケットの検証（使い捨て）
        let token = token
            .and_then(|t| JoinToken::new(t).ok())
            .ok_or_else(|| {
                UseCaseError::Unauthorized("Room and name are required to join the room".to_string())
            })?;
        let ticket = self.tickets.consume(&token, now).await?.ok_or_else(|| {
            UseCaseError::Unauthorized("Join token is invalid or has expired".to_string())
        })?;

        // 2. ルームの存在チェック
        if self.rooms.find_by_code(&ticket.room).await?.is_none() {
            return Err(UseCaseError::NotFound("Room not found".to_string()));
        }

        // 3. セッション登録
        let session = Session {
            room: ticket.room.clone(),
            name: ticket.name,
            user: ticket.user,
            connected_at: now,
        };
        self.sessions
            .attach(connection_id.clone(), session.clone())
            .await
            .map_err(|e| UseCaseError::InvalidState(e.to_string()))?;

        // 4. 参加者数の加算（並行した削除と競合した場合はレコードを作り直す）
        //    グループへの参加はこの加算が成功した後に行う
        let members = match self
            .rooms
            .increment_members(&session.room, &ticket.family_id)
            .await
        {
            Ok(members) => members,
            Err(e) => {
                tracing::error!(
                    "Failed to count {} into room {}: {}",
                    connection_id,
                    session.room,
                    e
                );
                self.sessions.detach(&connection_id).await;
                return Err(match e {
                    // ルームが消えている間に家族が新しいルームを作成していた
                    RepositoryError::FamilyRoomExists(_) => {
                        UseCaseError::NotFound("Room not found".to_string())
                    }
                    other => other.into(),
                });
            }
        };

        // 5. MessagePusher にクライアントを登録し、ルームのグループに参加
        self.message_pusher
            .register_client(connection_id.clone(), sender)
            .await;
        self.message_pusher
            .join_group(&session.room, &connection_id)
            .await;

        tracing::info!(
            "{} connected to room {} ({} members)",
            session.name,
            session.room,
            members
        );
        Ok(session)
    }
}
