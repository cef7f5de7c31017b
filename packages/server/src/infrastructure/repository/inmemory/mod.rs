//! InMemory Repository 実装

mod directory;
mod join_ticket;
mod location;
mod memory_profile;
mod message_log;
mod push_token;
mod reminder;
mod room;

pub use directory::InMemoryDirectoryRepository;
pub use join_ticket::InMemoryJoinTicketRepository;
pub use location::InMemoryLocationRepository;
pub use memory_profile::InMemoryMemoryProfileRepository;
pub use message_log::InMemoryMessageLogRepository;
pub use push_token::InMemoryPushTokenRepository;
pub use reminder::InMemoryReminderRepository;
pub use room::InMemoryRoomRepository;
