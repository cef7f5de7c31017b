//! Shared application state.

use std::{sync::Arc, time::Duration};

use carechat_shared::time::Clock;

use crate::{
    infrastructure::{
        message_pusher::WebSocketMessagePusher,
        repository::{
            InMemoryDirectoryRepository, InMemoryJoinTicketRepository,
            InMemoryLocationRepository, InMemoryMemoryProfileRepository,
            InMemoryMessageLogRepository, InMemoryPushTokenRepository,
            InMemoryReminderRepository, InMemoryRoomRepository,
        },
    },
    usecase::{
        ConnectParticipantUseCase, CreateRoomUseCase, DisconnectParticipantUseCase,
        GetRoomDetailUseCase, JoinRoomUseCase, ManageFamilyUseCase, ManageRemindersUseCase,
        MemoryProfileUseCase, PushTokenUseCase, RegisterUserUseCase, SendMessageUseCase,
        SessionRegistry, ShareLocationUseCase,
    },
};

/// Shared application state
pub struct AppState {
    /// CreateRoomUseCase（ルーム作成のユースケース）
    pub create_room_usecase: Arc<CreateRoomUseCase>,
    /// JoinRoomUseCase（ルーム入室のユースケース）
    pub join_room_usecase: Arc<JoinRoomUseCase>,
    /// ConnectParticipantUseCase（参加者接続のユースケース）
    pub connect_participant_usecase: Arc<ConnectParticipantUseCase>,
    /// SendMessageUseCase（メッセージ送信のユースケース）
    pub send_message_usecase: Arc<SendMessageUseCase>,
    /// DisconnectParticipantUseCase（参加者切断のユースケース）
    pub disconnect_participant_usecase: Arc<DisconnectParticipantUseCase>,
    /// GetRoomDetailUseCase（ルーム詳細取得のユースケース）
    pub get_room_detail_usecase: Arc<GetRoomDetailUseCase>,
    pub register_user_usecase: Arc<RegisterUserUseCase>,
    pub manage_family_usecase: Arc<ManageFamilyUseCase>,
    pub manage_reminders_usecase: Arc<ManageRemindersUseCase>,
    pub share_location_usecase: Arc<ShareLocationUseCase>,
    /// MemoryProfileUseCase（顔認識用の追加情報）
    pub memory_profile_usecase: Arc<MemoryProfileUseCase>,
    pub push_token_usecase: Arc<PushTokenUseCase>,
}

impl AppState {
    /// Wire every use case onto in-memory stores and the WebSocket pusher.
    pub fn in_memory(clock: Arc<dyn Clock>, join_ticket_ttl: Duration) -> Self {
        // 1. Repositories (in-memory document stores)
        let rooms = Arc::new(InMemoryRoomRepository::new());
        let message_log = Arc::new(InMemoryMessageLogRepository::new());
        let tickets = Arc::new(InMemoryJoinTicketRepository::new());
        let directory = Arc::new(InMemoryDirectoryRepository::new());
        let reminders = Arc::new(InMemoryReminderRepository::new());
        let locations = Arc::new(InMemoryLocationRepository::new());
        let profiles = Arc::new(InMemoryMemoryProfileRepository::new());
        let push_tokens = Arc::new(InMemoryPushTokenRepository::new());

        // 2. MessagePusher (WebSocket implementation) and session registry
        let message_pusher = Arc::new(WebSocketMessagePusher::new());
        let sessions = Arc::new(SessionRegistry::new());

        // 3. UseCases
        Self {
            create_room_usecase: Arc::new(CreateRoomUseCase::new(rooms.clone())),
            join_room_usecase: Arc::new(JoinRoomUseCase::new(
                rooms.clone(),
                message_log.clone(),
                directory.clone(),
                tickets.clone(),
                clock.clone(),
                join_ticket_ttl,
            )),
            connect_participant_usecase: Arc::new(ConnectParticipantUseCase::new(
                rooms.clone(),
                tickets,
                message_pusher.clone(),
                sessions.clone(),
                clock.clone(),
            )),
            send_message_usecase: Arc::new(SendMessageUseCase::new(
                rooms.clone(),
                message_log.clone(),
                message_pusher.clone(),
                sessions.clone(),
                clock,
            )),
            disconnect_participant_usecase: Arc::new(DisconnectParticipantUseCase::new(
                rooms.clone(),
                message_log,
                message_pusher,
                sessions.clone(),
            )),
            get_room_detail_usecase: Arc::new(GetRoomDetailUseCase::new(rooms, sessions)),
            register_user_usecase: Arc::new(RegisterUserUseCase::new(directory.clone())),
            manage_family_usecase: Arc::new(ManageFamilyUseCase::new(directory.clone())),
            manage_reminders_usecase: Arc::new(ManageRemindersUseCase::new(
                reminders,
                directory.clone(),
            )),
            share_location_usecase: Arc::new(ShareLocationUseCase::new(
                locations,
                directory.clone(),
            )),
            memory_profile_usecase: Arc::new(MemoryProfileUseCase::new(profiles, directory)),
            push_token_usecase: Arc::new(PushTokenUseCase::new(push_tokens)),
        }
    }
}
