//! InMemory Message Log Repository 実装

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ChatMessage, MessageLogRepository, RepositoryError, RoomCode};

/// インメモリ Message Log 実装
///
/// ルームコードごとに 1 つのログ（追記順の Vec）を持ちます。
#[derive(Default)]
pub struct InMemoryMessageLogRepository {
    logs: Mutex<HashMap<RoomCode, Vec<ChatMessage>>>,
}

impl InMemoryMessageLogRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MessageLogRepository for InMemoryMessageLogRepository {
    async fn append(&self, message: ChatMessage) -> Result<(), RepositoryError> {
        let mut logs = self.logs.lock().await;
        logs.entry(message.room.clone()).or_default().push(message);
        Ok(())
    }

    async fn list(&self, code: &RoomCode) -> Result<Vec<ChatMessage>, RepositoryError> {
        let logs = self.logs.lock().await;
        Ok(logs.get(code).cloned().unwrap_or_default())
    }

    async fn delete(&self, code: &RoomCode) -> Result<(), RepositoryError> {
        let mut logs = self.logs.lock().await;
        logs.remove(code);
        Ok(())
    }
}
