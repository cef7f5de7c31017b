//! InMemory Directory Repository 実装（ユーザー / 家族）

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{DirectoryRepository, Family, FamilyId, RepositoryError, User, UserId};

#[derive(Default)]
struct Directory {
    users: HashMap<UserId, User>,
    families: HashMap<FamilyId, Family>,
}

/// インメモリ User / Family Directory 実装
#[derive(Default)]
pub struct InMemoryDirectoryRepository {
    directory: Mutex<Directory>,
}

impl InMemoryDirectoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DirectoryRepository for InMemoryDirectoryRepository {
    async fn find_user(&self, user_id: &UserId) -> Result<Option<User>, RepositoryError> {
        let directory = self.directory.lock().await;
        Ok(directory.users.get(user_id).cloned())
    }

    async fn insert_user(&self, user: User) -> Result<(), RepositoryError> {
        let mut directory = self.directory.lock().await;
        directory.users.insert(user.id.clone(), user);
        Ok(())
    }

    async fn find_family(&self, family_id: &FamilyId) -> Result<Option<Family>, RepositoryError> {
        let directory = self.directory.lock().await;
        Ok(directory.families.get(family_id).cloned())
    }

    async fn find_family_of_member(
        &self,
        user_id: &UserId,
    ) -> Result<Option<Family>, RepositoryError> {
        let directory = self.directory.lock().await;
        Ok(directory
            .families
            .values()
            .find(|family| family.members.contains(user_id))
            .cloned())
    }

    async fn insert_family(&self, family: Family) -> Result<(), RepositoryError> {
        let mut directory = self.directory.lock().await;
        directory.families.insert(family.id.clone(), family);
        Ok(())
    }

    async fn assign_user_family(
        &self,
        user_id: &UserId,
        family_id: &FamilyId,
    ) -> Result<(), RepositoryError> {
        let mut directory = self.directory.lock().await;
        let user = directory
            .users
            .get_mut(user_id)
            .ok_or_else(|| RepositoryError::NotFound(format!("user {user_id}")))?;
        user.family_id = Some(family_id.clone());
        Ok(())
    }

    async fn add_family_member(
        &self,
        family_id: &FamilyId,
        user_id: &UserId,
    ) -> Result<(), RepositoryError> {
        let mut directory = self.directory.lock().await;
        let family = directory
            .families
            .get_mut(family_id)
            .ok_or_else(|| RepositoryError::NotFound(format!("family {family_id}")))?;
        family.add_member(user_id.clone());
        Ok(())
    }

    async fn set_family_patient(
        &self,
        family_id: &FamilyId,
        user_id: &UserId,
    ) -> Result<(), RepositoryError> {
        let mut directory = self.directory.lock().await;
        let family = directory
            .families
            .get_mut(family_id)
            .ok_or_else(|| RepositoryError::NotFound(format!("family {family_id}")))?;
        family.patient = Some(user_id.clone());
        Ok(())
    }
}
