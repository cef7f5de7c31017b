//! InMemory Location Repository 実装

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{Coordinates, LocationRepository, RepositoryError, SavedLocations, UserId};

/// インメモリ Location Store 実装
#[derive(Default)]
pub struct InMemoryLocationRepository {
    /// Key: ユーザー ID
    locations: Mutex<HashMap<UserId, SavedLocations>>,
}

impl InMemoryLocationRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LocationRepository for InMemoryLocationRepository {
    async fn save_home(
        &self,
        user_id: &UserId,
        coordinates: Coordinates,
    ) -> Result<(), RepositoryError> {
        let mut locations = self.locations.lock().await;
        locations
            .entry(user_id.clone())
            .or_insert_with(|| SavedLocations::new(user_id.clone()))
            .home = Some(coordinates);
        Ok(())
    }

    async fn save_current(
        &self,
        user_id: &UserId,
        coordinates: Coordinates,
    ) -> Result<(), RepositoryError> {
        let mut locations = self.locations.lock().await;
        locations
            .entry(user_id.clone())
            .or_insert_with(|| SavedLocations::new(user_id.clone()))
            .current = Some(coordinates);
        Ok(())
    }

    async fn find(&self, user_id: &UserId) -> Result<Option<SavedLocations>, RepositoryError> {
        let locations = self.locations.lock().await;
        Ok(locations.get(user_id).cloned())
    }
}
