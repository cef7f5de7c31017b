//! UseCase 層
//!
//! ルームのライフサイクル（作成・入室・接続・送信・切断）、
//! ユーザー / 家族ディレクトリ、リマインダー、位置情報、追加情報、
//! プッシュ通知トークンの操作を 1 ユースケース 1 構造体で提供します。
//! ドメイン層の trait にのみ依存し、具体的な実装は UI 層（起動時）で注入します。

mod care_access;
mod connect_participant;
mod create_room;
mod disconnect_participant;
mod error;
mod get_room_detail;
mod join_room;
mod manage_family;
mod manage_reminders;
mod memory_profile;
mod push_token;
mod register_user;
mod send_message;
mod session_registry;
mod share_location;

#[cfg(test)]
mod test_support;

pub use connect_participant::ConnectParticipantUseCase;
pub use create_room::{CreateRoomOutcome, CreateRoomUseCase};
pub use disconnect_participant::{DisconnectOutcome, DisconnectParticipantUseCase};
pub use error::UseCaseError;
pub use get_room_detail::{GetRoomDetailUseCase, RoomDetail};
pub use join_room::{JoinRoomInput, JoinRoomOutput, JoinRoomUseCase};
pub use manage_family::ManageFamilyUseCase;
pub use manage_reminders::{ManageRemindersUseCase, ReminderDraft};
pub use memory_profile::{MemoryProfileInput, MemoryProfileUseCase, ProfileSave};
pub use push_token::PushTokenUseCase;
pub use register_user::RegisterUserUseCase;
pub use send_message::{SendMessageOutput, SendMessageUseCase};
pub use session_registry::{SessionRegistry, SessionRegistryError};
pub use share_location::{CoordinatesInput, ShareLocationUseCase};
