//! UseCase: 顔認識で使う追加情報（続柄・紹介文・思い出のきっかけ）の保存と取得

use std::sync::Arc;

use crate::domain::{DirectoryRepository, MemoryProfile, MemoryProfileRepository, UserId};

use super::error::UseCaseError;

/// 追加情報の入力
#[derive(Debug, Clone, Default)]
pub struct MemoryProfileInput {
    pub user: String,
    pub relation: Option<String>,
    pub tagline: Option<String>,
    pub trigger_memory: Option<String>,
}

/// 保存の結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileSave {
    Created,
    Updated,
}

pub struct MemoryProfileUseCase {
    profiles: Arc<dyn MemoryProfileRepository>,
    directory: Arc<dyn DirectoryRepository>,
}

impl MemoryProfileUseCase {
    pub fn new(
        profiles: Arc<dyn MemoryProfileRepository>,
        directory: Arc<dyn DirectoryRepository>,
    ) -> Self {
        Self {
            profiles,
            directory,
        }
    }

    /// 追加情報を保存（ユーザーごとに 1 件、再保存で上書き）
    ///
    /// 名前は保存時点のディレクトリの値を使う。
    pub async fn save(&self, input: MemoryProfileInput) -> Result<ProfileSave, UseCaseError> {
        let non_blank = |value: Option<String>| value.filter(|v| !v.trim().is_empty());
        let (Some(relation), Some(tagline), Some(trigger_memory)) = (
            non_blank(input.relation),
            non_blank(input.tagline),
            non_blank(input.trigger_memory),
        ) else {
            return Err(UseCaseError::Validation(
                "Please provide all details properly".to_string(),
            ));
        };
        let user_id = UserId::new(input.user)
            .map_err(|_| UseCaseError::Validation("Please send a valid User ID".to_string()))?;
        let user = self
            .directory
            .find_user(&user_id)
            .await?
            .ok_or_else(|| UseCaseError::NotFound("User not found".to_string()))?;

        let created = self
            .profiles
            .upsert(MemoryProfile {
                user: user.id,
                name: user.name,
                relation,
                tagline,
                trigger_memory,
            })
            .await?;
        tracing::info!("Additional info saved for {}", user_id);
        Ok(if created {
            ProfileSave::Created
        } else {
            ProfileSave::Updated
        })
    }

    /// ユーザーの追加情報を取得（未保存なら空）
    pub async fn get(&self, user_id: String) -> Result<Vec<MemoryProfile>, UseCaseError> {
        let user_id = UserId::new(user_id)
            .map_err(|_| UseCaseError::Validation("Please send a valid User ID".to_string()))?;
        Ok(self.profiles.list(&user_id).await?)
    }
}
