//! UseCase: リマインダーの登録・取得・更新・削除
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ManageRemindersUseCase の患者本人による操作と、介護者による操作
//!
//! ### なぜこのテストが必要か
//! - 介護者は同じ家族の患者のリマインダーしか扱えないことを保証する
//! - 患者は自分のリマインダーしか更新・削除できないことを確認する
//!
//! ### どのような状況を想定しているか
//! - 正常系：登録、一覧、部分更新、削除
//! - 異常系：必須項目の欠落、別の家族の介護者、他人のリマインダー
//! - エッジケース：値が変わらない更新、変更項目のない更新

use std::sync::Arc;

use crate::domain::{
    DirectoryRepository, Reminder, ReminderChanges, ReminderId, ReminderIdFactory,
    ReminderRepository, ReminderUpdate, UserId,
};

use super::{
    care_access::{caregiver_and_patient, ensure_same_family},
    error::UseCaseError,
};

/// リマインダー登録の入力（未指定の項目は `None`）
#[derive(Debug, Clone, Default)]
pub struct ReminderDraft {
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub status: Option<String>,
    pub urgent: Option<bool>,
    pub important: Option<bool>,
}

impl ReminderDraft {
    /// 必須項目を確認してリマインダーを組み立てる
    fn into_reminder(self, owner: UserId) -> Result<Reminder, UseCaseError> {
        fn required(value: Option<String>, field: &str) -> Result<String, UseCaseError> {
            value
                .ok_or_else(|| UseCaseError::Validation(format!("Missing field: {field}")))
        }

        Ok(Reminder {
            id: ReminderIdFactory::generate(),
            user: owner,
            title: required(self.title, "title")?,
            description: required(self.description, "description")?,
            date: required(self.date, "date")?,
            time: required(self.time, "time")?,
            status: required(self.status, "status")?,
            urgent: self.urgent.unwrap_or(false),
            important: self.important.unwrap_or(false),
        })
    }
}

const CAREGIVER_AND_PATIENT_REQUIRED: &str = "Caregiver ID and Patient ID are required";
const PATIENT_REQUIRED: &str = "Patient ID is required";
const NOT_FOUND_OR_DENIED: &str = "Reminder not found or access denied";

/// リマインダー管理のユースケース
pub struct ManageRemindersUseCase {
    reminders: Arc<dyn ReminderRepository>,
    directory: Arc<dyn DirectoryRepository>,
}

impl ManageRemindersUseCase {
    pub fn new(
        reminders: Arc<dyn ReminderRepository>,
        directory: Arc<dyn DirectoryRepository>,
    ) -> Self {
        Self {
            reminders,
            directory,
        }
    }

    /// 患者本人のリマインダー一覧
    pub async fn list_for_patient(&self, patient_id: String) -> Result<Vec<Reminder>, UseCaseError> {
        let patient = patient(patient_id)?;
        Ok(self.reminders.list_for_user(&patient).await?)
    }

    /// 介護者が同じ家族の患者のリマインダー一覧を取得
    pub async fn list_for_caregiver(
        &self,
        caregiver_id: String,
        patient_id: String,
    ) -> Result<Vec<Reminder>, UseCaseError> {
        let (caregiver, patient) =
            caregiver_and_patient(caregiver_id, patient_id, CAREGIVER_AND_PATIENT_REQUIRED)?;
        ensure_same_family(
            self.directory.as_ref(),
            &caregiver,
            &patient,
            "You do not have permission to view this patient's reminders",
        )
        .await?;
        Ok(self.reminders.list_for_user(&patient).await?)
    }

    /// 患者本人がリマインダーを登録
    pub async fn create_for_patient(
        &self,
        patient_id: String,
        draft: ReminderDraft,
    ) -> Result<Reminder, UseCaseError> {
        let patient = UserId::new(patient_id)
            .map_err(|_| UseCaseError::Validation("Missing field: userId".to_string()))?;
        self.insert(draft.into_reminder(patient)?).await
    }

    /// 介護者が同じ家族の患者のリマインダーを登録
    pub async fn create_for_caregiver(
        &self,
        caregiver_id: String,
        patient_id: String,
        draft: ReminderDraft,
    ) -> Result<Reminder, UseCaseError> {
        let (caregiver, patient) = caregiver_and_patient(
            caregiver_id,
            patient_id,
            "Please provide Caregiver ID and Patient ID!",
        )?;
        ensure_same_family(
            self.directory.as_ref(),
            &caregiver,
            &patient,
            "You do not have the permission to handle reminders for this patient",
        )
        .await?;
        self.insert(draft.into_reminder(patient)?).await
    }

    /// 患者本人が自分のリマインダーを更新
    pub async fn update_for_patient(
        &self,
        reminder_id: String,
        patient_id: String,
        changes: ReminderChanges,
    ) -> Result<ReminderUpdate, UseCaseError> {
        let patient = patient(patient_id)?;
        self.update_owned(reminder_id, &patient, changes).await
    }

    /// 介護者が同じ家族の患者のリマインダーを更新
    pub async fn update_for_caregiver(
        &self,
        reminder_id: String,
        caregiver_id: String,
        patient_id: String,
        changes: ReminderChanges,
    ) -> Result<ReminderUpdate, UseCaseError> {
        let (caregiver, patient) =
            caregiver_and_patient(caregiver_id, patient_id, CAREGIVER_AND_PATIENT_REQUIRED)?;
        ensure_same_family(
            self.directory.as_ref(),
            &caregiver,
            &patient,
            "You do not have permission to update this reminder",
        )
        .await?;
        self.update_owned(reminder_id, &patient, changes).await
    }

    /// 患者本人が自分のリマインダーを削除
    pub async fn delete_for_patient(
        &self,
        patient_id: String,
        reminder_id: String,
    ) -> Result<(), UseCaseError> {
        let patient = patient(patient_id)?;
        self.delete_owned(reminder_id, &patient).await
    }

    /// 介護者が同じ家族の患者のリマインダーを削除
    pub async fn delete_for_caregiver(
        &self,
        caregiver_id: String,
        patient_id: String,
        reminder_id: String,
    ) -> Result<(), UseCaseError> {
        let (caregiver, patient) =
            caregiver_and_patient(caregiver_id, patient_id, CAREGIVER_AND_PATIENT_REQUIRED)?;
        ensure_same_family(
            self.directory.as_ref(),
            &caregiver,
            &patient,
            "You do not have permission to delete this reminder",
        )
        .await?;
        self.delete_owned(reminder_id, &patient).await
    }

    async fn insert(&self, reminder: Reminder) -> Result<Reminder, UseCaseError> {
        self.reminders.insert(reminder.clone()).await?;
        tracing::info!("Reminder {} saved for {}", reminder.id, reminder.user);
        Ok(reminder)
    }

    /// `owner` のリマインダーであることを確認して ID を返す
    async fn owned(&self, reminder_id: String, owner: &UserId) -> Result<ReminderId, UseCaseError> {
        let denied = || UseCaseError::NotFound(NOT_FOUND_OR_DENIED.to_string());
        let id = ReminderId::new(reminder_id).map_err(|_| denied())?;
        match self.reminders.find(&id).await? {
            Some(reminder) if &reminder.user == owner => Ok(id),
            _ => Err(denied()),
        }
    }

    async fn update_owned(
        &self,
        reminder_id: String,
        owner: &UserId,
        changes: ReminderChanges,
    ) -> Result<ReminderUpdate, UseCaseError> {
        if changes.is_empty() {
            return Err(UseCaseError::Validation(
                "No valid fields to update".to_string(),
            ));
        }
        let id = self.owned(reminder_id, owner).await?;
        match self.reminders.update(&id, changes).await? {
            ReminderUpdate::NotFound => {
                Err(UseCaseError::NotFound("Reminder not found".to_string()))
            }
            outcome => {
                tracing::info!("Reminder {} update: {:?}", id, outcome);
                Ok(outcome)
            }
        }
    }

    async fn delete_owned(&self, reminder_id: String, owner: &UserId) -> Result<(), UseCaseError> {
        let id = self.owned(reminder_id, owner).await?;
        if !self.reminders.delete(&id).await? {
            return Err(UseCaseError::NotFound("Reminder not found".to_string()));
        }
        tracing::info!("Reminder {} deleted", id);
        Ok(())
    }
}

fn patient(patient_id: String) -> Result<UserId, UseCaseError> {
    UserId::new(patient_id).map_err(|_| UseCaseError::Validation(PATIENT_REQUIRED.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{RepositoryError, repository::MockReminderRepository},
        infrastructure::repository::{InMemoryDirectoryRepository, InMemoryReminderRepository},
        usecase::test_support::Fixture,
    };

    struct Setup {
        fixture: Fixture,
        usecase: ManageRemindersUseCase,
    }

    /// CG1 と PAT1 は家族 F1、CG2 は家族 F2
    async fn setup() -> Setup {
        let fixture = Fixture::new();
        fixture.seed_user("CG1", "Asha", "F1").await;
        fixture.seed_user("PAT1", "Dadi", "F1").await;
        fixture.seed_user("CG2", "Meera", "F2").await;
        let usecase = ManageRemindersUseCase::new(
            Arc::new(InMemoryReminderRepository::new()),
            fixture.directory.clone(),
        );
        Setup { fixture, usecase }
    }

    fn draft(title: &str) -> ReminderDraft {
        ReminderDraft {
            title: Some(title.to_string()),
            description: Some("After breakfast".to_string()),
            date: Some("2024-05-01".to_string()),
            time: Some("09:00".to_string()),
            status: Some("pending".to_string()),
            urgent: Some(true),
            important: None,
        }
    }

    #[tokio::test]
    async fn test_caregiver_and_patient_share_reminders() {
        // テスト項目: 介護者が登録したリマインダーを患者が取得でき、持ち主は患者になる
        // given (前提条件):
        let setup = setup().await;

        // when (操作):
        let created = setup
            .usecase
            .create_for_caregiver("CG1".into(), "PAT1".into(), draft("Medicine"))
            .await
            .unwrap();
        setup
            .usecase
            .create_for_patient("PAT1".into(), draft("Walk"))
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(created.user.as_str(), "PAT1");
        assert!(created.urgent);
        assert!(!created.important);
        let by_patient = setup.usecase.list_for_patient("PAT1".into()).await.unwrap();
        let by_caregiver = setup
            .usecase
            .list_for_caregiver("CG1".into(), "PAT1".into())
            .await
            .unwrap();
        assert_eq!(by_patient, by_caregiver);
        let titles: Vec<_> = by_patient.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["Medicine", "Walk"]);
    }

    #[tokio::test]
    async fn test_other_family_caregiver_is_unauthorized() {
        // テスト項目: 別の家族の介護者は一覧・登録・更新・削除のいずれもできない
        // given (前提条件):
        let setup = setup().await;
        let created = setup
            .usecase
            .create_for_patient("PAT1".into(), draft("Medicine"))
            .await
            .unwrap();
        let id = created.id.as_str().to_string();

        // when (操作):
        let list = setup
            .usecase
            .list_for_caregiver("CG2".into(), "PAT1".into())
            .await;
        let create = setup
            .usecase
            .create_for_caregiver("CG2".into(), "PAT1".into(), draft("x"))
            .await;
        let update = setup
            .usecase
            .update_for_caregiver(
                id.clone(),
                "CG2".into(),
                "PAT1".into(),
                ReminderChanges {
                    status: Some("done".into()),
                    ..Default::default()
                },
            )
            .await;
        let delete = setup
            .usecase
            .delete_for_caregiver("CG2".into(), "PAT1".into(), id)
            .await;

        // then (期待する結果):
        assert!(matches!(list, Err(UseCaseError::Unauthorized(_))));
        assert!(matches!(create, Err(UseCaseError::Unauthorized(_))));
        assert!(matches!(update, Err(UseCaseError::Unauthorized(_))));
        assert!(matches!(delete, Err(UseCaseError::Unauthorized(_))));
        assert_eq!(
            setup.usecase.list_for_patient("PAT1".into()).await.unwrap().len(),
            1
        );
    }

    #[tokio::test]
    async fn test_missing_fields_are_validation_errors() {
        // テスト項目: 必須項目・ID の欠落は Validation
        // given (前提条件):
        let setup = setup().await;
        let mut without_time = draft("Medicine");
        without_time.time = None;

        // when (操作):
        let missing_time = setup
            .usecase
            .create_for_patient("PAT1".into(), without_time)
            .await;
        let missing_user = setup
            .usecase
            .create_for_patient(String::new(), draft("Medicine"))
            .await;
        let missing_patient = setup
            .usecase
            .list_for_caregiver("CG1".into(), String::new())
            .await;

        // then (期待する結果):
        assert_eq!(
            missing_time,
            Err(UseCaseError::Validation("Missing field: time".to_string()))
        );
        assert_eq!(
            missing_user,
            Err(UseCaseError::Validation("Missing field: userId".to_string()))
        );
        assert_eq!(
            missing_patient,
            Err(UseCaseError::Validation(
                CAREGIVER_AND_PATIENT_REQUIRED.to_string()
            ))
        );
    }

    #[tokio::test]
    async fn test_patient_update_and_delete_own_reminder() {
        // テスト項目: 患者は自分のリマインダーを更新・削除でき、同じ値での更新は Unchanged
        // given (前提条件):
        let setup = setup().await;
        let created = setup
            .usecase
            .create_for_patient("PAT1".into(), draft("Medicine"))
            .await
            .unwrap();
        let id = created.id.as_str().to_string();
        let done = ReminderChanges {
            status: Some("done".into()),
            ..Default::default()
        };

        // when (操作):
        let first = setup
            .usecase
            .update_for_patient(id.clone(), "PAT1".into(), done.clone())
            .await
            .unwrap();
        let second = setup
            .usecase
            .update_for_patient(id.clone(), "PAT1".into(), done)
            .await
            .unwrap();
        let empty = setup
            .usecase
            .update_for_patient(id.clone(), "PAT1".into(), ReminderChanges::default())
            .await;
        setup
            .usecase
            .delete_for_patient("PAT1".into(), id.clone())
            .await
            .unwrap();
        let again = setup.usecase.delete_for_patient("PAT1".into(), id).await;

        // then (期待する結果):
        assert_eq!(first, ReminderUpdate::Updated);
        assert_eq!(second, ReminderUpdate::Unchanged);
        assert_eq!(
            empty,
            Err(UseCaseError::Validation("No valid fields to update".to_string()))
        );
        assert_eq!(
            again,
            Err(UseCaseError::NotFound(NOT_FOUND_OR_DENIED.to_string()))
        );
    }

    #[tokio::test]
    async fn test_patient_cannot_touch_someone_elses_reminder() {
        // テスト項目: 他人のリマインダーの更新・削除は NotFound（存在を明かさない）
        // given (前提条件):
        let setup = setup().await;
        setup.fixture.seed_user("PAT2", "Nani", "F2").await;
        let created = setup
            .usecase
            .create_for_patient("PAT1".into(), draft("Medicine"))
            .await
            .unwrap();
        let id = created.id.as_str().to_string();

        // when (操作):
        let update = setup
            .usecase
            .update_for_patient(
                id.clone(),
                "PAT2".into(),
                ReminderChanges {
                    title: Some("hijacked".into()),
                    ..Default::default()
                },
            )
            .await;
        let delete = setup.usecase.delete_for_patient("PAT2".into(), id).await;

        // then (期待する結果):
        for result in [update.map(|_| ()), delete] {
            assert_eq!(
                result,
                Err(UseCaseError::NotFound(NOT_FOUND_OR_DENIED.to_string()))
            );
        }
        let listed = setup.usecase.list_for_patient("PAT1".into()).await.unwrap();
        assert_eq!(listed[0].title, "Medicine");
    }

    #[tokio::test]
    async fn test_store_failure_is_persistence_error() {
        // テスト項目: ストアの障害は Persistence エラーになる
        // given (前提条件):
        let mut reminders = MockReminderRepository::new();
        reminders
            .expect_list_for_user()
            .returning(|_| Err(RepositoryError::Unavailable("down".to_string())));
        let usecase = ManageRemindersUseCase::new(
            Arc::new(reminders),
            Arc::new(InMemoryDirectoryRepository::new()),
        );

        // when (操作):
        let result = usecase.list_for_patient("PAT1".into()).await;

        // then (期待する結果):
        assert!(matches!(result, Err(UseCaseError::Persistence(_))));
    }
}
