//! UseCase: ルーム入室（認可）処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - JoinRoomUseCase::execute() メソッド
//! - 家族の一致チェック、メッセージ履歴の返却、入室チケットの発行
//!
//! ### なぜこのテストが必要か
//! - 他の家族のルームに入れないことを保証する
//! - JoinRoom は参加者数を変更しない（実際の接続は Connect で行う）
//!
//! ### どのような状況を想定しているか
//! - 正常系：同じ家族のユーザーが入室し、履歴とチケットを受け取る
//! - 異常系：必須項目の欠落、ルーム・ユーザーが存在しない、家族の不一致
//! - エッジケース：ルームコードの形式が不正（存在しないルームとして扱う）

use std::{sync::Arc, time::Duration};

use carechat_shared::time::Clock;

use crate::domain::{
    ChatMessage, DirectoryRepository, DisplayName, JoinTicket, JoinTicketRepository, JoinToken,
    MessageLogRepository, RoomCode, RoomRepository, Timestamp, UserId,
};

use super::error::UseCaseError;

/// JoinRoom の入力（ワイヤから取り出した生の値）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JoinRoomInput {
    pub room: String,
    pub name: String,
    pub user: String,
}

/// JoinRoom の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinRoomOutput {
    pub room: RoomCode,
    pub name: DisplayName,
    /// ルームのメッセージ履歴（追加順）
    pub messages: Vec<ChatMessage>,
    /// Connect で提示する入室チケット
    pub ticket: JoinTicket,
    pub expires_in: Duration,
}

/// ルーム入室のユースケース
pub struct JoinRoomUseCase {
    rooms: Arc<dyn RoomRepository>,
    message_log: Arc<dyn MessageLogRepository>,
    directory: Arc<dyn DirectoryRepository>,
    tickets: Arc<dyn JoinTicketRepository>,
    clock: Arc<dyn Clock>,
    /// 入室チケットの有効期間
    ticket_ttl: Duration,
}

impl JoinRoomUseCase {
    /// 新しい JoinRoomUseCase を作成
    pub fn new(
        rooms: Arc<dyn RoomRepository>,
        message_log: Arc<dyn MessageLogRepository>,
        directory: Arc<dyn DirectoryRepository>,
        tickets: Arc<dyn JoinTicketRepository>,
        clock: Arc<dyn Clock>,
        ticket_ttl: Duration,
    ) -> Self {
        Self {
            rooms,
            message_log,
            directory,
            tickets,
            clock,
            ticket_ttl,
        }
    }

    /// ルーム入室を実行
    ///
    /// # Returns
    ///
    /// * `Ok(JoinRoomOutput)` - 履歴と入室チケット
    /// * `Err(UseCaseError::Validation)` - ルームコード・名前・ユーザー ID の欠落
    /// * `Err(UseCaseError::NotFound)` - ルームまたはユーザーが存在しない
    /// * `Err(UseCaseError::Unauthorized)` - ユーザーの家族がルームの家族と異なる
    pub async fn execute(&self, input: JoinRoomInput) -> Result<JoinRoomOutput, UseCaseError> {
        // 1. 入力チェック
        let (Ok(name), Ok(user_id)) = (
            DisplayName::new(input.name),
            UserId::new(input.user),
        ) else {
            return Err(missing_fields());
        };
        if input.room.trim().is_empty() {
            return Err(missing_fields());
        }
        // 形式が不正なコードのルームは存在し得ない
        let code = RoomCode::new(input.room).map_err(|_| room_not_found())?;

        // 2. ルームとユーザーの存在チェック
        let room = self
            .rooms
            .find_by_code(&code)
            .await?
            .ok_or_else(room_not_found)?;
        let user = self
            .directory
            .find_user(&user_id)
            .await?
            .ok_or_else(|| UseCaseError::NotFound("User not found".to_string()))?;

        // 3. 家族の一致チェック
        if user.family_id.as_ref() != Some(&room.family_id) {
            tracing::warn!(
                "User {} (family {:?}) denied entry to room {} of family {}",
                user.id,
                user.family_id.as_ref().map(|f| f.as_str()),
                room.code,
                room.family_id
            );
            return Err(UseCaseError::Unauthorized(
                "You do not have the permission to join this room".to_string(),
            ));
        }

        // 4. 履歴の取得
        let messages = self.message_log.list(&room.code).await?;

        // 5. 入室チケットの発行
        let now = Timestamp::new(self.clock.now_millis());
        let purged = self.tickets.purge_expired(now).await?;
        if purged > 0 {
            tracing::debug!("Purged {} expired join tickets", purged);
        }
        let ttl_millis = i64::try_from(self.ticket_ttl.as_millis()).unwrap_or(i64::MAX);
        let ticket = JoinTicket {
            token: JoinToken::generate(),
            room: room.code.clone(),
            family_id: room.family_id.clone(),
            name: name.clone(),
            user: user.id,
            expires_at: now.add_millis(ttl_millis),
        };
        self.tickets.issue(ticket.clone()).await?;

        tracing::info!("{} joined room {}", name, room.code);
        Ok(JoinRoomOutput {
            room: room.code,
            name,
            messages,
            ticket,
            expires_in: self.ticket_ttl,
        })
    }
}

fn missing_fields() -> UseCaseError {
    UseCaseError::Validation("Please provide proper name and room ID".to_string())
}

fn room_not_found() -> UseCaseError {
    UseCaseError::NotFound("Room not found".to_string())
}
