//! UseCase: 端末のプッシュ通知トークンの保存と取得

use std::sync::Arc;

use crate::domain::{PushToken, PushTokenRepository, UserId};

use super::error::UseCaseError;

pub struct PushTokenUseCase {
    tokens: Arc<dyn PushTokenRepository>,
}

impl PushTokenUseCase {
    pub fn new(tokens: Arc<dyn PushTokenRepository>) -> Self {
        Self { tokens }
    }

    /// トークンを保存（同じユーザーの既存トークンは上書き）
    pub async fn store(&self, user_id: String, token: String) -> Result<(), UseCaseError> {
        let token =
            PushToken::new(token).map_err(|_| UseCaseError::Validation("Missing token".into()))?;
        let user_id = user(user_id)?;
        self.tokens.store(&user_id, token).await?;
        tracing::info!("Push token stored for {}", user_id);
        Ok(())
    }

    /// ユーザーのトークンを取得
    pub async fn get(&self, user_id: String) -> Result<PushToken, UseCaseError> {
        let user_id = user(user_id)?;
        self.tokens
            .find(&user_id)
            .await?
            .ok_or_else(|| UseCaseError::NotFound("Push token not found for user.".to_string()))
    }
}

fn user(user_id: String) -> Result<UserId, UseCaseError> {
    UserId::new(user_id).map_err(|_| UseCaseError::Validation("Missing UserId".to_string()))
}
