//! UseCase: ユーザー登録

use std::sync::Arc;

use crate::domain::{DirectoryRepository, DisplayName, Role, User, UserIdFactory};

use super::error::UseCaseError;

/// ユーザー登録のユースケース
///
/// 認証情報は扱いません。ID の採番とディレクトリへの登録のみを行います。
pub struct RegisterUserUseCase {
    directory: Arc<dyn DirectoryRepository>,
}

impl RegisterUserUseCase {
    pub fn new(directory: Arc<dyn DirectoryRepository>) -> Self {
        Self { directory }
    }

    /// ユーザー登録を実行
    ///
    /// # Returns
    ///
    /// * `Ok(User)` - 登録したユーザー（家族には未所属）
    /// * `Err(UseCaseError::Validation)` - 名前が空、またはロールが `CG` / `PAT` 以外
    pub async fn execute(&self, name: String, role: String) -> Result<User, UseCaseError> {
        let name = DisplayName::new(name)?;
        let role = Role::parse(&role)?;

        let id = loop {
            let candidate = UserIdFactory::generate();
            if self.directory.find_user(&candidate).await?.is_none() {
                break candidate;
            }
        };

        let user = User {
            id,
            name,
            role,
            family_id: None,
        };
        self.directory.insert_user(user.clone()).await?;
        tracing::info!("User {} registered as {}", user.id, user.role);
        Ok(user)
    }
}
