//! Session Registry
//!
//! 接続 ID → {ルーム, 表示名, ユーザー} のプロセス内の対応表。
//! 接続が生きている間だけ有効で、永続化はしません。
//!
//! ロックは各メソッドの中だけで保持し、Repository の呼び出しをまたぐことはありません。

use std::collections::HashMap;

use thiserror::Error;
use tokio::sync::Mutex;

use crate::domain::{ConnectionId, RoomCode, Session};

/// Session Registry のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionRegistryError {
    /// 接続 ID にはすでにセッションがある
    #[error("Connection '{0}' is already attached")]
    AlreadyAttached(ConnectionId),
}

/// 接続中セッションの表
#[derive(Default)]
pub struct SessionRegistry {
    sessions: Mutex<HashMap<ConnectionId, Session>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// セッションを登録
    pub async fn attach(
        &self,
        connection_id: ConnectionId,
        session: Session,
    ) -> Result<(), SessionRegistryError> {
        let mut sessions = self.sessions.lock().await;
        if sessions.contains_key(&connection_id) {
            return Err(SessionRegistryError::AlreadyAttached(connection_id));
        }
        sessions.insert(connection_id, session);
        Ok(())
    }

    /// セッションを取得
    pub async fn get(&self, connection_id: &ConnectionId) -> Option<Session> {
        let sessions = self.sessions.lock().await;
        sessions.get(connection_id).cloned()
    }

    /// セッションを削除して返す
    pub async fn detach(&self, connection_id: &ConnectionId) -> Option<Session> {
        let mut sessions = self.sessions.lock().await;
        sessions.remove(connection_id)
    }

    /// ルームに接続しているセッション数
    pub async fn count_in_room(&self, room: &RoomCode) -> usize {
        let sessions = self.sessions.lock().await;
        sessions.values().filter(|s| &s.room == room).count()
    }

    /// 全セッション数
    pub async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }
}
