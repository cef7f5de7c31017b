//! InMemory Reminder Repository 実装

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    Reminder, ReminderChanges, ReminderId, ReminderRepository, ReminderUpdate, RepositoryError,
    UserId,
};

/// インメモリ Reminder Store 実装
///
/// 登録順を保つため Vec で保持します。
#[derive(Default)]
pub struct InMemoryReminderRepository {
    reminders: Mutex<Vec<Reminder>>,
}

impl InMemoryReminderRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ReminderRepository for InMemoryReminderRepository {
    async fn insert(&self, reminder: Reminder) -> Result<(), RepositoryError> {
        let mut reminders = self.reminders.lock().await;
        reminders.push(reminder);
        Ok(())
    }

    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<Reminder>, RepositoryError> {
        let reminders = self.reminders.lock().await;
        Ok(reminders
            .iter()
            .filter(|r| &r.user == user_id)
            .cloned()
            .collect())
    }

    async fn find(&self, id: &ReminderId) -> Result<Option<Reminder>, RepositoryError> {
        let reminders = self.reminders.lock().await;
        Ok(reminders.iter().find(|r| &r.id == id).cloned())
    }

    async fn update(
        &self,
        id: &ReminderId,
        changes: ReminderChanges,
    ) -> Result<ReminderUpdate, RepositoryError> {
        let mut reminders = self.reminders.lock().await;
        let Some(reminder) = reminders.iter_mut().find(|r| &r.id == id) else {
            return Ok(ReminderUpdate::NotFound);
        };
        if changes.apply_to(reminder) {
            Ok(ReminderUpdate::Updated)
        } else {
            Ok(ReminderUpdate::Unchanged)
        }
    }

    async fn delete(&self, id: &ReminderId) -> Result<bool, RepositoryError> {
        let mut reminders = self.reminders.lock().await;
        let before = reminders.len();
        reminders.retain(|r| &r.id != id);
        Ok(reminders.len() < before)
    }
}
