//! InMemory Push Token Repository 実装

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{PushToken, PushTokenRepository, RepositoryError, UserId};

#[derive(Default)]
pub struct InMemoryPushTokenRepository {
    tokens: Mutex<HashMap<UserId, PushToken>>,
}

impl InMemoryPushTokenRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PushTokenRepository for InMemoryPushTokenRepository {
    async fn store(&self, user_id: &UserId, token: PushToken) -> Result<(), RepositoryError> {
        let mut tokens = self.tokens.lock().await;
        tokens.insert(user_id.clone(), token);
        Ok(())
    }

    async fn find(&self, user_id: &UserId) -> Result<Option<PushToken>, RepositoryError> {
        let tokens = self.tokens.lock().await;
        Ok(tokens.get(user_id).cloned())
    }
}
