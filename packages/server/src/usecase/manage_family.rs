//! UseCase: 家族の作成とメンバー管理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ManageFamilyUseCase の create / add_member / add_patient / get
//!
//! ### なぜこのテストが必要か
//! - ルームへの入室可否はユーザーの所属家族で決まるため、所属の設定を保証する
//! - 介護者が 2 つの家族を持てないことを確認する
//!
//! ### どのような状況を想定しているか
//! - 正常系：家族の作成、メンバー・患者の追加、取得
//! - 異常系：介護者以外による作成、存在しないユーザー・家族
//! - エッジケース：同じメンバーの二重追加

use std::sync::Arc;

use crate::domain::{
    DirectoryRepository, Family, FamilyId, FamilyIdFactory, Role, User, UserId,
};

use super::error::UseCaseError;

/// 家族管理のユースケース
pub struct ManageFamilyUseCase {
    directory: Arc<dyn DirectoryRepository>,
}

impl ManageFamilyUseCase {
    pub fn new(directory: Arc<dyn DirectoryRepository>) -> Self {
        Self { directory }
    }

    /// 介護者を作成者として家族を作成
    ///
    /// # Returns
    ///
    /// * `Ok(Family)` - 作成した家族（メンバーは介護者のみ）
    /// * `Err(UseCaseError::Validation)` - ID が空、介護者でない、またはすでに家族に所属している
    pub async fn create(&self, caregiver_id: String) -> Result<Family, UseCaseError> {
        let caregiver_id = UserId::new(caregiver_id)
            .map_err(|_| UseCaseError::Validation("Caregiver ID is required".to_string()))?;

        match self.directory.find_user(&caregiver_id).await? {
            Some(user) if user.role == Role::Caregiver => {}
            _ => {
                return Err(UseCaseError::Validation(
                    "Caregiver not found or invalid role".to_string(),
                ));
            }
        }
        if let Some(existing) = self.directory.find_family_of_member(&caregiver_id).await? {
            return Err(UseCaseError::Validation(format!(
                "Caregiver already belong to a family.\nFamily Id: {}",
                existing.id
            )));
        }

        let family_id = loop {
            let candidate = FamilyIdFactory::generate();
            if self.directory.find_family(&candidate).await?.is_none() {
                break candidate;
            }
        };
        let family = Family::new(family_id, caregiver_id.clone());
        self.directory.insert_family(family.clone()).await?;
        self.directory
            .assign_user_family(&caregiver_id, &family.id)
            .await?;

        tracing::info!("Family {} created by {}", family.id, caregiver_id);
        Ok(family)
    }

    /// ユーザーを家族のメンバーに追加
    pub async fn add_member(&self, user_id: String, family_id: String) -> Result<(), UseCaseError> {
        let (user, family) = self.lookup(user_id, family_id).await?;
        self.directory
            .assign_user_family(&user.id, &family.id)
            .await?;
        if !family.members.contains(&user.id) {
            self.directory
                .add_family_member(&family.id, &user.id)
                .await?;
        }
        tracing::info!("User {} added to family {}", user.id, family.id);
        Ok(())
    }

    /// ユーザーを家族の患者として設定
    pub async fn add_patient(
        &self,
        user_id: String,
        family_id: String,
    ) -> Result<(), UseCaseError> {
        let (user, family) = self.lookup(user_id, family_id).await?;
        self.directory
            .assign_user_family(&user.id, &family.id)
            .await?;
        self.directory
            .set_family_patient(&family.id, &user.id)
            .await?;
        tracing::info!("Patient {} added to family {}", user.id, family.id);
        Ok(())
    }

    /// 家族を取得
    pub async fn get(&self, family_id: String) -> Result<Family, UseCaseError> {
        let not_found = || UseCaseError::NotFound("Family not found".to_string());
        let family_id = FamilyId::new(family_id).map_err(|_| not_found())?;
        self.directory
            .find_family(&family_id)
            .await?
            .ok_or_else(not_found)
    }

    async fn lookup(
        &self,
        user_id: String,
        family_id: String,
    ) -> Result<(User, Family), UseCaseError> {
        let (Ok(user_id), Ok(family_id)) = (UserId::new(user_id), FamilyId::new(family_id)) else {
            return Err(UseCaseError::Validation(
                "User ID and Family ID are required".to_string(),
            ));
        };
        let user = self
            .directory
            .find_user(&user_id)
            .await?
            .ok_or_else(|| UseCaseError::NotFound("User not found".to_string()))?;
        let family = self
            .directory
            .find_family(&family_id)
            .await?
            .ok_or_else(|| UseCaseError::NotFound("Family not found".to_string()))?;
        Ok((user, family))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{RepositoryError, repository::MockDirectoryRepository},
        infrastructure::repository::InMemoryDirectoryRepository,
        usecase::RegisterUserUseCase,
    };

    struct Setup {
        directory: Arc<InMemoryDirectoryRepository>,
        usecase: ManageFamilyUseCase,
        register: RegisterUserUseCase,
    }

    fn setup() -> Setup {
        let directory = Arc::new(InMemoryDirectoryRepository::new());
        Setup {
            usecase: ManageFamilyUseCase::new(directory.clone()),
            register: RegisterUserUseCase::new(directory.clone()),
            directory,
        }
    }

    async fn register(setup: &Setup, name: &str, role: &str) -> User {
        setup
            .register
            .execute(name.to_string(), role.to_string())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_create_family_assigns_caregiver() {
        // テスト項目: 介護者が家族を作成すると、介護者の所属家族が設定される
        // given (前提条件):
        let setup = setup();
        let caregiver = register(&setup, "Asha", "CG").await;

        // when (操作):
        let family = setup
            .usecase
            .create(caregiver.id.as_str().to_string())
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(family.id.as_str().len(), 8);
        assert_eq!(family.created_by, caregiver.id);
        assert_eq!(family.members, vec![caregiver.id.clone()]);
        let stored = setup.directory.find_user(&caregiver.id).await.unwrap().unwrap();
        assert_eq!(stored.family_id, Some(family.id));
    }

    #[tokio::test]
    async fn test_create_family_rejects_patient_and_existing_member() {
        // テスト項目: 患者による作成、家族に所属済みの介護者による作成は Validation
        // given (前提条件):
        let setup = setup();
        let patient = register(&setup, "Dadi", "PAT").await;
        let caregiver = register(&setup, "Asha", "CG").await;
        let family = setup
            .usecase
            .create(caregiver.id.as_str().to_string())
            .await
            .unwrap();

        // when (操作):
        let by_patient = setup.usecase.create(patient.id.as_str().to_string()).await;
        let again = setup
            .usecase
            .create(caregiver.id.as_str().to_string())
            .await;
        let blank = setup.usecase.create(String::new()).await;

        // then (期待する結果):
        assert_eq!(
            by_patient,
            Err(UseCaseError::Validation(
                "Caregiver not found or invalid role".to_string()
            ))
        );
        assert_eq!(
            again,
            Err(UseCaseError::Validation(format!(
                "Caregiver already belong to a family.\nFamily Id: {}",
                family.id
            )))
        );
        assert!(matches!(blank, Err(UseCaseError::Validation(_))));
    }

    #[tokio::test]
    async fn test_add_member_and_patient() {
        // テスト項目: メンバー・患者を追加すると所属家族が設定され、二重追加はされない
        // given (前提条件):
        let setup = setup();
        let caregiver = register(&setup, "Asha", "CG").await;
        let sibling = register(&setup, "Ravi", "CG").await;
        let patient = register(&setup, "Dadi", "PAT").await;
        let family = setup
            .usecase
            .create(caregiver.id.as_str().to_string())
            .await
            .unwrap();
        let family_id = family.id.as_str().to_string();

        // when (操作):
        for _ in 0..2 {
            setup
                .usecase
                .add_member(sibling.id.as_str().to_string(), family_id.clone())
                .await
                .unwrap();
        }
        setup
            .usecase
            .add_patient(patient.id.as_str().to_string(), family_id.clone())
            .await
            .unwrap();

        // then (期待する結果):
        let family = setup.usecase.get(family_id).await.unwrap();
        assert_eq!(family.members, vec![caregiver.id, sibling.id.clone()]);
        assert_eq!(family.patient, Some(patient.id.clone()));
        for id in [&sibling.id, &patient.id] {
            let user = setup.directory.find_user(id).await.unwrap().unwrap();
            assert_eq!(user.family_id, Some(family.id.clone()));
        }
    }

    #[tokio::test]
    async fn test_add_member_lookup_errors() {
        // テスト項目: 項目の欠落は Validation、存在しないユーザー・家族は NotFound
        // given (前提条件):
        let setup = setup();
        let caregiver = register(&setup, "Asha", "CG").await;
        let user_id = caregiver.id.as_str().to_string();

        // when (操作):
        let missing = setup.usecase.add_member(user_id.clone(), String::new()).await;
        let no_user = setup
            .usecase
            .add_member("USIDFFFF".to_string(), "abcd1234".to_string())
            .await;
        let no_family = setup
            .usecase
            .add_patient(user_id, "abcd1234".to_string())
            .await;
        let get_unknown = setup.usecase.get("abcd1234".to_string()).await;

        // then (期待する結果):
        assert!(matches!(missing, Err(UseCaseError::Validation(_))));
        assert_eq!(
            no_user,
            Err(UseCaseError::NotFound("User not found".to_string()))
        );
        assert_eq!(
            no_family,
            Err(UseCaseError::NotFound("Family not found".to_string()))
        );
        assert!(matches!(get_unknown, Err(UseCaseError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_create_family_persistence_error() {
        // テスト項目: ディレクトリの障害は Persistence エラーになる
        // given (前提条件):
        let mut directory = MockDirectoryRepository::new();
        directory
            .expect_find_user()
            .returning(|_| Err(RepositoryError::Unavailable("down".to_string())));
        let usecase = ManageFamilyUseCase::new(Arc::new(directory));

        // when (操作):
        let result = usecase.create("USID0001".to_string()).await;

        // then (期待する結果):
        assert!(matches!(result, Err(UseCaseError::Persistence(_))));
    }
}
