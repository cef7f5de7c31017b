//! UseCase: 患者の自宅（安全な場所）と現在地の共有
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ShareLocationUseCase の自宅・現在地の保存と取得
//!
//! ### なぜこのテストが必要か
//! - 患者の位置情報は同じ家族の介護者にしか見せないことを保証する
//!
//! ### どのような状況を想定しているか
//! - 正常系：患者・介護者による自宅の保存、患者による現在地の報告と介護者による取得
//! - 異常系：座標の欠落・範囲外、別の家族の介護者、未保存の位置情報

use std::sync::Arc;

use crate::domain::{Coordinates, DirectoryRepository, LocationRepository, UserId};

use super::{
    care_access::{caregiver_and_patient, ensure_same_family},
    error::UseCaseError,
};

/// リクエストから受け取った座標（未指定の項目は `None`）
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CoordinatesInput {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl CoordinatesInput {
    fn into_coordinates(self) -> Result<Coordinates, UseCaseError> {
        let (Some(latitude), Some(longitude)) = (self.latitude, self.longitude) else {
            return Err(UseCaseError::Validation(
                "Latitude and Longitude are required".to_string(),
            ));
        };
        Ok(Coordinates::new(latitude, longitude)?)
    }
}

/// 位置情報共有のユースケース
pub struct ShareLocationUseCase {
    locations: Arc<dyn LocationRepository>,
    directory: Arc<dyn DirectoryRepository>,
}

impl ShareLocationUseCase {
    pub fn new(
        locations: Arc<dyn LocationRepository>,
        directory: Arc<dyn DirectoryRepository>,
    ) -> Self {
        Self {
            locations,
            directory,
        }
    }

    /// 患者本人が自宅を保存
    pub async fn save_home_for_patient(
        &self,
        patient_id: String,
        coords: Option<CoordinatesInput>,
    ) -> Result<(), UseCaseError> {
        let missing = || {
            UseCaseError::Validation("User ID and home location data are required".to_string())
        };
        let patient = UserId::new(patient_id).map_err(|_| missing())?;
        let coordinates = coords.ok_or_else(missing)?.into_coordinates()?;
        self.locations.save_home(&patient, coordinates).await?;
        tracing::info!("Home location saved for {}", patient);
        Ok(())
    }

    /// 介護者が同じ家族の患者の自宅を保存
    pub async fn save_home_for_caregiver(
        &self,
        caregiver_id: String,
        patient_id: String,
        coords: Option<CoordinatesInput>,
    ) -> Result<(), UseCaseError> {
        const MISSING: &str = "Patient ID, Caregiver ID and home location data are required";
        let (caregiver, patient) = caregiver_and_patient(caregiver_id, patient_id, MISSING)?;
        let coords = coords.ok_or_else(|| UseCaseError::Validation(MISSING.to_string()))?;
        ensure_same_family(
            self.directory.as_ref(),
            &caregiver,
            &patient,
            "You do not have the permission to handle locations for this patient",
        )
        .await?;
        let coordinates = coords.into_coordinates()?;
        self.locations.save_home(&patient, coordinates).await?;
        tracing::info!("Home location saved for {} by {}", patient, caregiver);
        Ok(())
    }

    /// 患者の自宅を取得
    pub async fn get_home(&self, patient_id: String) -> Result<Coordinates, UseCaseError> {
        let patient = UserId::new(patient_id)
            .map_err(|_| UseCaseError::Validation("User ID is required".to_string()))?;
        self.locations
            .find(&patient)
            .await?
            .and_then(|saved| saved.home)
            .ok_or_else(|| {
                UseCaseError::NotFound(
                    "Home location not found! Please save your home location now".to_string(),
                )
            })
    }

    /// 患者本人が現在地を報告
    pub async fn save_current(
        &self,
        patient_id: String,
        coords: Option<CoordinatesInput>,
    ) -> Result<(), UseCaseError> {
        let missing = || {
            UseCaseError::Validation("User ID and current location data is required".to_string())
        };
        let patient = UserId::new(patient_id).map_err(|_| missing())?;
        let coordinates = coords.ok_or_else(missing)?.into_coordinates()?;
        self.locations.save_current(&patient, coordinates).await?;
        tracing::debug!("Current location updated for {}", patient);
        Ok(())
    }

    /// 介護者が同じ家族の患者の現在地を取得
    pub async fn get_current(
        &self,
        caregiver_id: String,
        patient_id: String,
    ) -> Result<Coordinates, UseCaseError> {
        let (caregiver, patient) = caregiver_and_patient(
            caregiver_id,
            patient_id,
            "Caregiver ID and Patient ID are required",
        )?;
        ensure_same_family(
            self.directory.as_ref(),
            &caregiver,
            &patient,
            "You do not have permission to view this patient's location",
        )
        .await?;
        self.locations
            .find(&patient)
            .await?
            .and_then(|saved| saved.current)
            .ok_or_else(|| {
                UseCaseError::NotFound(
                    "Current location not found! Please save your current location now"
                        .to_string(),
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{RepositoryError, repository::MockLocationRepository},
        infrastructure::repository::{InMemoryDirectoryRepository, InMemoryLocationRepository},
        usecase::test_support::Fixture,
    };

    fn coords(latitude: f64, longitude: f64) -> Option<CoordinatesInput> {
        Some(CoordinatesInput {
            latitude: Some(latitude),
            longitude: Some(longitude),
        })
    }

    /// CG1 と PAT1 は家族 F1、CG2 は家族 F2
    async fn setup() -> ShareLocationUseCase {
        let fixture = Fixture::new();
        fixture.seed_user("CG1", "Asha", "F1").await;
        fixture.seed_user("PAT1", "Dadi", "F1").await;
        fixture.seed_user("CG2", "Meera", "F2").await;
        ShareLocationUseCase::new(
            Arc::new(InMemoryLocationRepository::new()),
            fixture.directory.clone(),
        )
    }

    #[tokio::test]
    async fn test_home_saved_by_caregiver_is_read_by_patient() {
        // テスト項目: 介護者が保存した自宅を患者が取得でき、患者の保存で上書きされる
        // given (前提条件):
        let usecase = setup().await;

        // when (操作):
        usecase
            .save_home_for_caregiver("CG1".into(), "PAT1".into(), coords(12.97, 77.59))
            .await
            .unwrap();
        let first = usecase.get_home("PAT1".into()).await.unwrap();
        usecase
            .save_home_for_patient("PAT1".into(), coords(13.0, 77.6))
            .await
            .unwrap();
        let second = usecase.get_home("PAT1".into()).await.unwrap();

        // then (期待する結果):
        assert_eq!(first, Coordinates::new(12.97, 77.59).unwrap());
        assert_eq!(second, Coordinates::new(13.0, 77.6).unwrap());
    }

    #[tokio::test]
    async fn test_current_location_is_shared_within_family_only() {
        // テスト項目: 患者の現在地は同じ家族の介護者だけが取得できる
        // given (前提条件):
        let usecase = setup().await;
        usecase
            .save_current("PAT1".into(), coords(12.98, 77.60))
            .await
            .unwrap();

        // when (操作):
        let same_family = usecase.get_current("CG1".into(), "PAT1".into()).await;
        let other_family = usecase.get_current("CG2".into(), "PAT1".into()).await;

        // then (期待する結果):
        assert_eq!(same_family, Ok(Coordinates::new(12.98, 77.60).unwrap()));
        assert!(matches!(other_family, Err(UseCaseError::Unauthorized(_))));
    }

    #[tokio::test]
    async fn test_missing_or_invalid_coordinates() {
        // テスト項目: 座標の欠落・緯度経度の欠落・範囲外はいずれも Validation で、何も保存されない
        // given (前提条件):
        let usecase = setup().await;
        let half = Some(CoordinatesInput {
            latitude: Some(12.0),
            longitude: None,
        });

        // when (操作):
        let no_coords = usecase.save_home_for_patient("PAT1".into(), None).await;
        let half_coords = usecase.save_home_for_patient("PAT1".into(), half).await;
        let out_of_range = usecase
            .save_current("PAT1".into(), coords(91.0, 0.0))
            .await;

        // then (期待する結果):
        assert_eq!(
            no_coords,
            Err(UseCaseError::Validation(
                "User ID and home location data are required".to_string()
            ))
        );
        assert_eq!(
            half_coords,
            Err(UseCaseError::Validation(
                "Latitude and Longitude are required".to_string()
            ))
        );
        assert!(matches!(out_of_range, Err(UseCaseError::Validation(_))));
        assert!(matches!(
            usecase.get_home("PAT1".into()).await,
            Err(UseCaseError::NotFound(_))
        ));
        assert!(matches!(
            usecase.get_current("CG1".into(), "PAT1".into()).await,
            Err(UseCaseError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_store_failure_is_persistence_error() {
        // テスト項目: ストアの障害は Persistence エラーになる
        // given (前提条件):
        let mut locations = MockLocationRepository::new();
        locations
            .expect_save_current()
            .returning(|_, _| Err(RepositoryError::Unavailable("down".to_string())));
        let usecase = ShareLocationUseCase::new(
            Arc::new(locations),
            Arc::new(InMemoryDirectoryRepository::new()),
        );

        // when (操作):
        let result = usecase.save_current("PAT1".into(), coords(1.0, 1.0)).await;

        // then (期待する結果):
        assert!(matches!(result, Err(UseCaseError::Persistence(_))));
    }
}
