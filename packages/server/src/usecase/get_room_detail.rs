//! UseCase: ルーム詳細の取得

use std::sync::Arc;

use crate::domain::{Room, RoomCode, RoomRepository};

use super::{error::UseCaseError, session_registry::SessionRegistry};

/// ルーム詳細
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomDetail {
    pub room: Room,
    /// このプロセスでルームに接続しているセッション数
    pub connected: usize,
}

/// ルーム詳細取得のユースケース
pub struct GetRoomDetailUseCase {
    rooms: Arc<dyn RoomRepository>,
    sessions: Arc<SessionRegistry>,
}

impl GetRoomDetailUseCase {
    pub fn new(rooms: Arc<dyn RoomRepository>, sessions: Arc<SessionRegistry>) -> Self {
        Self { rooms, sessions }
    }

    pub async fn execute(&self, code: String) -> Result<RoomDetail, UseCaseError> {
        let not_found = || UseCaseError::NotFound("Room not found".to_string());
        let code = RoomCode::new(code).map_err(|_| not_found())?;
        let room = self.rooms.find_by_code(&code).await?.ok_or_else(not_found)?;
        let connected = self.sessions.count_in_room(&room.code).await;
        Ok(RoomDetail { room, connected })
    }
}
