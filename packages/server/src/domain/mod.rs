//! Domain layer
//!
//! チャットルームのドメインモデルと、ドメイン層が必要とするインターフェース
//! （Repository / MessagePusher）を定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

pub mod entity;
pub mod error;
pub mod factory;
pub mod message_pusher;
pub mod repository;
pub mod value_object;

pub use entity::{
    ChatMessage, Family, JoinTicket, MemoryProfile, Reminder, ReminderChanges, Room, SavedLocations,
    Session, User,
};
pub use error::{RepositoryError, ValueObjectError};
pub use factory::{FamilyIdFactory, ReminderIdFactory, RoomCodeFactory, UserIdFactory};
pub use message_pusher::{MessagePusher, PusherChannel};
pub use repository::{
    DirectoryRepository, JoinTicketRepository, LocationRepository, MemberRelease,
    MemoryProfileRepository, MessageLogRepository, PushTokenRepository, ReminderRepository,
    ReminderUpdate, RoomRepository,
};
pub use value_object::{
    ConnectionId, Coordinates, DisplayName, FamilyId, JoinToken, MessageBody, PushToken,
    ReminderId, Role, RoomCode, Timestamp, UserId,
};
