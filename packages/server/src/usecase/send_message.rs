//! UseCase: メッセージ送信処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SendMessageUseCase::execute() メソッド
//! - メッセージ履歴への追加とルーム全体へのブロードキャスト
//!
//! ### なぜこのテストが必要か
//! - 1 回の送信につき履歴への追加が 1 件、接続ごとのエンベロープが 1 通であることを保証する
//! - 送信者自身にもエコーが届くこと（対象はルーム全体）を確認する
//! - 履歴に残らなかったメッセージが配信されないことを確認する
//!
//! ### どのような状況を想定しているか
//! - 正常系：メッセージ送信とブロードキャスト
//! - 異常系：セッションがない、本文が空、ルームが削除済み、履歴の追加に失敗
//! - エッジケース：他のルームの接続には届かない

use std::sync::Arc;

use carechat_shared::time::Clock;

use crate::domain::{
    ChatMessage, ConnectionId, MessageBody, MessageLogRepository, MessagePusher, RoomRepository,
    Timestamp,
};

use super::{error::UseCaseError, session_registry::SessionRegistry};

/// SendMessage の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendMessageOutput {
    pub message: ChatMessage,
    /// エンベロープを受け取った接続数
    pub delivered: usize,
}

/// メッセージ送信のユースケース
pub struct SendMessageUseCase {
    rooms: Arc<dyn RoomRepository>,
    message_log: Arc<dyn MessageLogRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    sessions: Arc<SessionRegistry>,
    clock: Arc<dyn Clock>,
}

impl SendMessageUseCase {
    /// 新しい SendMessageUseCase を作成
    pub fn new(
        rooms: Arc<dyn RoomRepository>,
        message_log: Arc<dyn MessageLogRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        sessions: Arc<SessionRegistry>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            rooms,
            message_log,
            message_pusher,
            sessions,
            clock,
        }
    }

    /// メッセージ送信を実行
    ///
    /// # Arguments
    ///
    /// * `connection_id` - 送信元の接続 ID
    /// * `body` - 受信フレームの `message` フィールド
    ///
    /// # Returns
    ///
    /// * `Ok(SendMessageOutput)` - 履歴に追加したメッセージと配信数
    /// * `Err(UseCaseError::InvalidState)` - セッションがない、または本文が空
    /// * `Err(UseCaseError::NotFound)` - ルームが削除済み
    /// * `Err(UseCaseError::Persistence)` - データストアの障害
    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
        body: Option<String>,
    ) -> Result<SendMessageOutput, UseCaseError> {
        // 1. セッションと本文のチェック
        let session = self.sessions.get(connection_id).await;
        let body = body.and_then(|b| MessageBody::new(b).ok());
        let (Some(session), Some(body)) = (session, body) else {
            return Err(UseCaseError::InvalidState("Invalid data".to_string()));
        };

        // 2. ルームの存在チェック
        if self.rooms.find_by_code(&session.room).await?.is_none() {
            return Err(UseCaseError::NotFound("Room not found".to_string()));
        }

        // 3. 履歴に追加してからブロードキャスト
        let message = ChatMessage {
            room: session.room,
            name: session.name,
            message: body,
            created_at: Timestamp::new(self.clock.now_millis()),
            user: session.user,
        };
        self.message_log.append(message.clone()).await?;
        let delivered = self.message_pusher.broadcast_chat(&message).await;

        tracing::debug!(
            "Message from {} in room {} delivered to {} connections",
            message.name,
            message.room,
            delivered
        );
        Ok(SendMessageOutput { message, delivered })
    }
}
