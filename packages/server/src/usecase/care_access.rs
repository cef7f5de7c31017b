//! 介護者が患者のデータを扱えるかどうかの判定

use crate::domain::{DirectoryRepository, UserId};

use super::error::UseCaseError;

/// 介護者 ID と患者 ID の組を検証する（どちらかが空なら Validation）
pub(super) fn caregiver_and_patient(
    caregiver_id: String,
    patient_id: String,
    missing: &str,
) -> Result<(UserId, UserId), UseCaseError> {
    match (UserId::new(caregiver_id), UserId::new(patient_id)) {
        (Ok(caregiver), Ok(patient)) => Ok((caregiver, patient)),
        _ => Err(UseCaseError::Validation(missing.to_string())),
    }
}

/// 介護者と患者が同じ家族に所属していることを確認する
///
/// どちらかが存在しない、または家族に所属していない場合も `denied` で拒否する。
pub(super) async fn ensure_same_family(
    directory: &dyn DirectoryRepository,
    caregiver: &UserId,
    patient: &UserId,
    denied: &str,
) -> Result<(), UseCaseError> {
    let caregiver = directory.find_user(caregiver).await?;
    let patient = directory.find_user(patient).await?;
    match (caregiver, patient) {
        (Some(caregiver), Some(patient))
            if caregiver.family_id.is_some() && caregiver.family_id == patient.family_id =>
        {
            Ok(())
        }
        _ => Err(UseCaseError::Unauthorized(denied.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{
        domain::{DisplayName, FamilyId, Role, User},
        infrastructure::repository::InMemoryDirectoryRepository,
    };

    async fn insert(directory: &InMemoryDirectoryRepository, id: &str, family: Option<&str>) {
        directory
            .insert_user(User {
                id: UserId::new(id.to_string()).unwrap(),
                name: DisplayName::new(id.to_string()).unwrap(),
                role: Role::Caregiver,
                family_id: family.map(|f| FamilyId::new(f.to_string()).unwrap()),
            })
            .await
            .unwrap();
    }

    fn user_id(value: &str) -> UserId {
        UserId::new(value.to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_same_family_is_allowed_and_others_are_denied() {
        // テスト項目: 同じ家族なら許可、別の家族・未所属・未登録は拒否
        // given (前提条件):
        let directory = Arc::new(InMemoryDirectoryRepository::new());
        insert(&directory, "CG1", Some("F1")).await;
        insert(&directory, "PAT1", Some("F1")).await;
        insert(&directory, "PAT2", Some("F2")).await;
        insert(&directory, "CG9", None).await;
        insert(&directory, "PAT9", None).await;

        // when (操作) / then (期待する結果):
        assert!(
            ensure_same_family(directory.as_ref(), &user_id("CG1"), &user_id("PAT1"), "no")
                .await
                .is_ok()
        );
        for (caregiver, patient) in [("CG1", "PAT2"), ("CG9", "PAT9"), ("CG1", "GHOST")] {
            let result = ensure_same_family(
                directory.as_ref(),
                &user_id(caregiver),
                &user_id(patient),
                "no",
            )
            .await;
            assert_eq!(result, Err(UseCaseError::Unauthorized("no".to_string())));
        }
    }

    #[test]
    fn test_caregiver_and_patient_requires_both() {
        // テスト項目: 介護者 ID・患者 ID のどちらかが空なら Validation
        // given (前提条件) / when (操作):
        let result = caregiver_and_patient("CG1".to_string(), String::new(), "both required");

        // then (期待する結果):
        assert_eq!(
            result,
            Err(UseCaseError::Validation("both required".to_string()))
        );
    }
}
