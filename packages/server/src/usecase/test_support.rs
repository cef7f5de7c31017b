//! UseCase テスト用の共通フィクスチャ

use std::{sync::Arc, time::Duration};

use carechat_shared::time::FixedClock;
use tokio::sync::mpsc;

use crate::{
    domain::{
        ConnectionId, DirectoryRepository, DisplayName, FamilyId, Role, RoomCode, RoomRepository,
        User, UserId,
    },
    infrastructure::{
        message_pusher::WebSocketMessagePusher,
        repository::{
            InMemoryDirectoryRepository, InMemoryJoinTicketRepository,
            InMemoryMessageLogRepository, InMemoryRoomRepository,
        },
    },
};

use super::{
    ConnectParticipantUseCase, DisconnectParticipantUseCase, JoinRoomInput, JoinRoomUseCase,
    SendMessageUseCase, SessionRegistry,
};

/// 2023-01-01 00:00:00 UTC
pub const NOW: i64 = 1_672_531_200_000;

/// インメモリ実装一式
pub struct Fixture {
    pub rooms: Arc<InMemoryRoomRepository>,
    pub message_log: Arc<InMemoryMessageLogRepository>,
    pub tickets: Arc<InMemoryJoinTicketRepository>,
    pub directory: Arc<InMemoryDirectoryRepository>,
    pub pusher: Arc<WebSocketMessagePusher>,
    pub sessions: Arc<SessionRegistry>,
    pub clock: Arc<FixedClock>,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            rooms: Arc::new(InMemoryRoomRepository::new()),
            message_log: Arc::new(InMemoryMessageLogRepository::new()),
            tickets: Arc::new(InMemoryJoinTicketRepository::new()),
            directory: Arc::new(InMemoryDirectoryRepository::new()),
            pusher: Arc::new(WebSocketMessagePusher::new()),
            sessions: Arc::new(SessionRegistry::new()),
            clock: Arc::new(FixedClock::new(NOW)),
        }
    }

    pub fn join_room_usecase(&self) -> JoinRoomUseCase {
        JoinRoomUseCase::new(
            self.rooms.clone(),
            self.message_log.clone(),
            self.directory.clone(),
            self.tickets.clone(),
            self.clock.clone(),
            Duration::from_secs(120),
        )
    }

    pub fn connect_usecase(&self) -> ConnectParticipantUseCase {
        ConnectParticipantUseCase::new(
            self.rooms.clone(),
            self.tickets.clone(),
            self.pusher.clone(),
            self.sessions.clone(),
            self.clock.clone(),
        )
    }

    pub fn send_message_usecase(&self) -> SendMessageUseCase {
        SendMessageUseCase::new(
            self.rooms.clone(),
            self.message_log.clone(),
            self.pusher.clone(),
            self.sessions.clone(),
            self.clock.clone(),
        )
    }

    pub fn disconnect_usecase(&self) -> DisconnectParticipantUseCase {
        DisconnectParticipantUseCase::new(
            self.rooms.clone(),
            self.message_log.clone(),
            self.pusher.clone(),
            self.sessions.clone(),
        )
    }

    pub async fn seed_room(&self, code: &str, family: &str) -> RoomCode {
        let code = RoomCode::new(code.to_string()).unwrap();
        self.rooms
            .create(crate::domain::Room::new(
                code.clone(),
                FamilyId::new(family.to_string()).unwrap(),
            ))
            .await
            .unwrap();
        code
    }

    pub async fn seed_user(&self, id: &str, name: &str, family: &str) -> UserId {
        self.insert_user(id, name, Some(FamilyId::new(family.to_string()).unwrap()))
            .await
    }

    pub async fn seed_user_without_family(&self, id: &str, name: &str) -> UserId {
        self.insert_user(id, name, None).await
    }

    async fn insert_user(&self, id: &str, name: &str, family_id: Option<FamilyId>) -> UserId {
        let user_id = UserId::new(id.to_string()).unwrap();
        self.directory
            .insert_user(User {
                id: user_id.clone(),
                name: DisplayName::new(name.to_string()).unwrap(),
                role: Role::Caregiver,
                family_id,
            })
            .await
            .unwrap();
        user_id
    }

    /// JoinRoom → Connect まで済ませた接続を作る
    pub async fn attach(
        &self,
        room: &str,
        user: &str,
        name: &str,
    ) -> (ConnectionId, mpsc::UnboundedReceiver<String>) {
        let output = self
            .join_room_usecase()
            .execute(JoinRoomInput {
                room: room.to_string(),
                name: name.to_string(),
                user: user.to_string(),
            })
            .await
            .unwrap();
        let connection_id = ConnectionId::generate();
        let (tx, rx) = mpsc::unbounded_channel();
        self.connect_usecase()
            .execute(
                connection_id.clone(),
                Some(output.ticket.token.into_string()),
                tx,
            )
            .await
            .unwrap();
        (connection_id, rx)
    }
}
