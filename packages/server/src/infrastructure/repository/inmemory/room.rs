//! InMemory Room Repository 実装
//!
//! ドメイン層が定義する RoomRepository trait の具体的な実装。
//! HashMap をインメモリのドキュメントストアとして使用します。
//!
//! ## アトミック性
//!
//! 各メソッドは 1 回のロック取得で完結します。これはドキュメントストアの
//! 単一ドキュメントに対する find-and-modify に相当し、
//! 参加者数の加減算が read-modify-write で失われることはありません。
//!
//! ## 技術的負債
//!
//! 現在、ドメインモデル（`Room`）を直接ストレージとして使用しています。
//! 外部のドキュメントストアを実装する際は、以下の変換層が必要になります：
//!
//! ```text
//! Document → RoomDocument (DTO) → Room (ドメインモデル)
//! ```

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{FamilyId, MemberRelease, RepositoryError, Room, RoomCode, RoomRepository};

/// インメモリ Room Repository 実装
#[derive(Default)]
pub struct InMemoryRoomRepository {
    /// Key: ルームコード
    rooms: Mutex<HashMap<RoomCode, Room>>,
}

impl InMemoryRoomRepository {
    /// 新しい InMemoryRoomRepository を作成
    pub fn new() -> Self {
        Self::default()
    }

    /// 登録されているルーム数
    pub async fn count(&self) -> usize {
        self.rooms.lock().await.len()
    }
}

#[async_trait]
impl RoomRepository for InMemoryRoomRepository {
    async fn create(&self, room: Room) -> Result<(), RepositoryError> {
        let mut rooms = self.rooms.lock().await;

        if let Some(existing) = rooms.values().find(|r| r.family_id == room.family_id) {
            return Err(RepositoryError::FamilyRoomExists(existing.code.clone()));
        }
        if rooms.contains_key(&room.code) {
            return Err(RepositoryError::CodeTaken(room.code));
        }

        rooms.insert(room.code.clone(), room);
        Ok(())
    }

    async fn find_by_code(&self, code: &RoomCode) -> Result<Option<Room>, RepositoryError> {
        let rooms = self.rooms.lock().await;
        Ok(rooms.get(code).cloned())
    }

    async fn find_by_family(&self, family_id: &FamilyId) -> Result<Option<Room>, RepositoryError> {
        let rooms = self.rooms.lock().await;
        Ok(rooms.values().find(|r| &r.family_id == family_id).cloned())
    }

    async fn increment_members(
        &self,
        code: &RoomCode,
        family_id: &FamilyId,
    ) -> Result<i64, RepositoryError> {
        let mut rooms = self.rooms.lock().await;

        if !rooms.contains_key(code) {
            // 消えている間に家族が別のルームを作成していれば作り直さない
            if let Some(existing) = rooms.values().find(|r| &r.family_id == family_id) {
                return Err(RepositoryError::FamilyRoomExists(existing.code.clone()));
            }
        }
        let room = rooms
            .entry(code.clone())
            .or_insert_with(|| Room::new(code.clone(), family_id.clone()));
        room.member_count += 1;
        Ok(room.member_count)
    }

    async fn release_member(&self, code: &RoomCode) -> Result<MemberRelease, RepositoryError> {
        let mut rooms = self.rooms.lock().await;

        let Some(room) = rooms.get_mut(code) else {
            return Ok(MemberRelease::NotFound);
        };
        room.member_count -= 1;
        if room.member_count > 0 {
            return Ok(MemberRelease::Remaining(room.member_count));
        }

        rooms.remove(code);
        Ok(MemberRelease::Deleted)
    }

    async fn delete(&self, code: &RoomCode) -> Result<(), RepositoryError> {
        let mut rooms = self.rooms.lock().await;
        rooms.remove(code);
        Ok(())
    }
}
