//! UseCase: ルーム作成処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - CreateRoomUseCase::execute() メソッド
//!
//! ### なぜこのテストが必要か
//! - 1 家族 1 ルームの保証（2 回目以降は既存のコードを返す冪等性）
//! - コードの衝突時に再採番されることの確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：新規作成、既存ルームの返却
//! - 異常系：データストアの障害
//! - エッジケース：採番したコードがすでに使用中

use std::sync::Arc;

use crate::domain::{FamilyId, RepositoryError, Room, RoomCode, RoomCodeFactory, RoomRepository};

use super::error::UseCaseError;

/// CreateRoom の結果
///
/// 家族がすでにルームを持っている場合も失敗ではなく、既存のコードを返す（冪等）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateRoomOutcome {
    Created(RoomCode),
    AlreadyExists(RoomCode),
}

impl CreateRoomOutcome {
    /// 作成済み・既存を問わずルームコードを取得
    pub fn code(&self) -> &RoomCode {
        match self {
            CreateRoomOutcome::Created(code) | CreateRoomOutcome::AlreadyExists(code) => code,
        }
    }
}

/// ルーム作成のユースケース
pub struct CreateRoomUseCase {
    /// Repository（Room Directory）
    rooms: Arc<dyn RoomRepository>,
    /// ルームコードの採番
    generate_code: Box<dyn Fn() -> RoomCode + Send + Sync>,
}

impl CreateRoomUseCase {
    /// 新しい CreateRoomUseCase を作成
    pub fn new(rooms: Arc<dyn RoomRepository>) -> Self {
        Self::with_code_generator(rooms, RoomCodeFactory::generate)
    }

    /// 採番方法を指定して作成（テスト用）
    pub fn with_code_generator(
        rooms: Arc<dyn RoomRepository>,
        generate_code: impl Fn() -> RoomCode + Send + Sync + 'static,
    ) -> Self {
        Self {
            rooms,
            generate_code: Box::new(generate_code),
        }
    }

    /// ルーム作成を実行
    ///
    /// # Returns
    ///
    /// * `Ok(CreateRoomOutcome::Created)` - 新しいルームを作成した
    /// * `Ok(CreateRoomOutcome::AlreadyExists)` - 家族はすでにルームを持っている
    /// * `Err(UseCaseError::Persistence)` - データストアの障害
    pub async fn execute(&self, family_id: FamilyId) -> Result<CreateRoomOutcome, UseCaseError> {
        // 1. 既存ルームのチェック
        if let Some(existing) = self.rooms.find_by_family(&family_id).await? {
            return Ok(CreateRoomOutcome::AlreadyExists(existing.code));
        }

        // 2. 未使用のコードが取れるまで採番して登録
        loop {
            let code = (self.generate_code)();
            match self
                .rooms
                .create(Room::new(code.clone(), family_id.clone()))
                .await
            {
                Ok(()) => {
                    tracing::info!("Room {} created for family {}", code, family_id);
                    return Ok(CreateRoomOutcome::Created(code));
                }
                Err(RepositoryError::CodeTaken(taken)) => {
                    tracing::debug!("Room code {} already in use, drawing again", taken);
                }
                // 並行した作成に負けた場合も既存のコードを返す
                Err(RepositoryError::FamilyRoomExists(existing)) => {
                    return Ok(CreateRoomOutcome::AlreadyExists(existing));
                }
                Err(e) => return Err(e.into()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::repository::MockRoomRepository,
        infrastructure::repository::InMemoryRoomRepository,
    };
    use std::sync::Mutex;

    fn family(value: &str) -> FamilyId {
        FamilyId::new(value.to_string()).unwrap()
    }

    fn code(value: &str) -> RoomCode {
        RoomCode::new(value.to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_create_room_is_idempotent_per_family() {
        // テスト項目: 同じ家族で 2 回作成しても同じコードが返る
        // given (前提条件):
        let rooms = Arc::new(InMemoryRoomRepository::new());
        let usecase = CreateRoomUseCase::new(rooms.clone());

        // when (操作):
        let first = usecase.execute(family("F1")).await.unwrap();
        let second = usecase.execute(family("F1")).await.unwrap();

        // then (期待する結果):
        assert!(matches!(first, CreateRoomOutcome::Created(_)));
        assert_eq!(second, CreateRoomOutcome::AlreadyExists(first.code().clone()));
        assert_eq!(rooms.count().await, 1);
    }

    #[tokio::test]
    async fn test_create_room_for_new_family_gets_fresh_code() {
        // テスト項目: ルームを持たない家族には未使用の新しいコードが採番される
        // given (前提条件):
        let rooms = Arc::new(InMemoryRoomRepository::new());
        let usecase = CreateRoomUseCase::new(rooms.clone());
        let f1 = usecase.execute(family("F1")).await.unwrap();

        // when (操作):
        let f2 = usecase.execute(family("F2")).await.unwrap();

        // then (期待する結果):
        assert!(matches!(f2, CreateRoomOutcome::Created(_)));
        assert_ne!(f1.code(), f2.code());
        let code = f2.code().as_str();
        assert_eq!(code.len(), 8);
        assert!(code.bytes().all(|b| b.is_ascii_uppercase()));
        let room = rooms.find_by_code(f2.code()).await.unwrap().unwrap();
        assert_eq!(room.family_id, family("F2"));
        assert_eq!(room.member_count, 0);
    }

    #[tokio::test]
    async fn test_create_room_redraws_on_collision() {
        // テスト項目: 採番したコードが使用中なら再採番される
        // given (前提条件):
        let rooms = Arc::new(InMemoryRoomRepository::new());
        rooms
            .create(Room::new(code("AAAAAAAA"), family("F1")))
            .await
            .unwrap();
        let draws = Mutex::new(vec![code("BBBBBBBB"), code("AAAAAAAA"), code("AAAAAAAA")]);
        let usecase = CreateRoomUseCase::with_code_generator(rooms.clone(), move || {
            draws.lock().unwrap().pop().unwrap()
        });

        // when (操作):
        let outcome = usecase.execute(family("F2")).await.unwrap();

        // then (期待する結果): 2 回衝突した後、3 回目のコードで作成される
        assert_eq!(outcome, CreateRoomOutcome::Created(code("BBBBBBBB")));
        assert_eq!(rooms.count().await, 2);
    }

    #[tokio::test]
    async fn test_create_room_lost_race_returns_existing() {
        // テスト項目: 並行作成に負けた場合も既存のコードが返る
        // given (前提条件):
        let mut rooms = MockRoomRepository::new();
        rooms.expect_find_by_family().returning(|_| Ok(None));
        rooms
            .expect_create()
            .returning(|_| Err(RepositoryError::FamilyRoomExists(code("WINNERAA"))));
        let usecase = CreateRoomUseCase::new(Arc::new(rooms));

        // when (操作):
        let outcome = usecase.execute(family("F1")).await.unwrap();

        // then (期待する結果):
        assert_eq!(outcome, CreateRoomOutcome::AlreadyExists(code("WINNERAA")));
    }

    #[tokio::test]
    async fn test_create_room_persistence_error() {
        // テスト項目: データストアの障害は Persistence エラーになる
        // given (前提条件):
        let mut rooms = MockRoomRepository::new();
        rooms
            .expect_find_by_family()
            .returning(|_| Err(RepositoryError::Unavailable("down".to_string())));
        let usecase = CreateRoomUseCase::new(Arc::new(rooms));

        // when (操作):
        let result = usecase.execute(family("F1")).await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(UseCaseError::Persistence(RepositoryError::Unavailable(
                "down".to_string()
            )))
        );
    }
}
