//! Repository 実装
//!
//! - `inmemory`: HashMap をドキュメントストアとして使う実装
//! - 将来的に: MongoDB など

pub mod inmemory;

pub use inmemory::{
    InMemoryDirectoryRepository, InMemoryJoinTicketRepository, InMemoryLocationRepository,
    InMemoryMemoryProfileRepository, InMemoryMessageLogRepository, InMemoryPushTokenRepository,
    InMemoryReminderRepository, InMemoryRoomRepository,
};
