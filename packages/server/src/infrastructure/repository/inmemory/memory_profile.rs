//! InMemory Memory Profile Repository 実装

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{MemoryProfile, MemoryProfileRepository, RepositoryError, UserId};

#[derive(Default)]
pub struct InMemoryMemoryProfileRepository {
    profiles: Mutex<HashMap<UserId, MemoryProfile>>,
}

impl InMemoryMemoryProfileRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MemoryProfileRepository for InMemoryMemoryProfileRepository {
    async fn upsert(&self, profile: MemoryProfile) -> Result<bool, RepositoryError> {
        let mut profiles = self.profiles.lock().await;
        Ok(profiles.insert(profile.user.clone(), profile).is_none())
    }

    async fn list(&self, user_id: &UserId) -> Result<Vec<MemoryProfile>, RepositoryError> {
        let profiles = self.profiles.lock().await;
        Ok(profiles.get(user_id).cloned().into_iter().collect())
    }
}
