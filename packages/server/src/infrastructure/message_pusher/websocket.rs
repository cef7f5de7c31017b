//! WebSocket を使った MessagePusher 実装
//!
//! ## 責務
//!
//! - 接続ごとの `UnboundedSender` を管理
//! - ルーム単位のブロードキャストグループを管理
//! - チャットメッセージのエンコードとブロードキャスト
//!
//! ## 設計ノート
//!
//! WebSocket の生成は UI 層（`ui/handler/websocket.rs`）で行われます。
//! この実装は生成された `UnboundedSender` を受け取り、メッセージ送信に使用します。
//!
//! これにより、「WebSocket の生成」と「メッセージの送信」が分離されます：
//! - UI 層: WebSocket 接続の受付、sender の生成
//! - Infrastructure 層: sender とグループの管理、メッセージ送信

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::{
    domain::{ChatMessage, ConnectionId, MessagePusher, PusherChannel, RoomCode},
    infrastructure::dto::websocket::ChatEnvelope,
};

#[derive(Default)]
struct Registry {
    /// Key: 接続 ID
    clients: HashMap<ConnectionId, PusherChannel>,
    /// Key: ルームコード, Value: グループに参加している接続 ID
    groups: HashMap<RoomCode, HashSet<ConnectionId>>,
}

/// WebSocket を使った MessagePusher 実装
///
/// ## 使用例
///
/// ```ignore
/// let pusher = WebSocketMessagePusher::new();
/// pusher.register_client(connection_id.clone(), tx).await;
/// pusher.join_group(&room, &connection_id).await;
///
/// // メッセージをルームの全員に送信（送信できた件数が返る）
/// let delivered = pusher.broadcast_chat(&message).await;
/// ```
#[derive(Default)]
pub struct WebSocketMessagePusher {
    registry: Mutex<Registry>,
}

impl WebSocketMessagePusher {
    /// 新しい WebSocketMessagePusher を作成
    pub fn new() -> Self {
        Self::default()
    }

    /// グループの全メンバーに送信し、送信できた件数を返す
    pub async fn broadcast_to_group(&self, room: &RoomCode, content: &str) -> usize {
        let registry = self.registry.lock().await;

        let Some(members) = registry.groups.get(room) else {
            return 0;
        };

        let mut delivered = 0;
        for member in members {
            match registry.clients.get(member) {
                // ブロードキャストでは一部の送信失敗を許容
                Some(sender) => match sender.send(content.to_string()) {
                    Ok(()) => delivered += 1,
                    Err(e) => {
                        tracing::warn!("Failed to push message to client '{}': {}", member, e)
                    }
                },
                None => tracing::warn!(
                    "Client '{}' not found during broadcast, skipping",
                    member
                ),
            }
        }
        tracing::debug!(
            "Broadcasted message to {}/{} clients in group '{}'",
            delivered,
            members.len(),
            room
        );
        delivered
    }

    /// グループのメンバー数
    pub async fn group_size(&self, room: &RoomCode) -> usize {
        let registry = self.registry.lock().await;
        registry.groups.get(room).map_or(0, HashSet::len)
    }
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn register_client(&self, connection_id: ConnectionId, sender: PusherChannel) {
        let mut registry = self.registry.lock().await;
        tracing::debug!("Client '{}' registered to MessagePusher", connection_id);
        registry.clients.insert(connection_id, sender);
    }

    async fn unregister_client(&self, connection_id: &ConnectionId) {
        let mut registry = self.registry.lock().await;
        registry.clients.remove(connection_id);
        registry.groups.retain(|_, members| {
            members.remove(connection_id);
            !members.is_empty()
        });
        tracing::debug!("Client '{}' unregistered from MessagePusher", connection_id);
    }

    async fn join_group(&self, room: &RoomCode, connection_id: &ConnectionId) {
        let mut registry = self.registry.lock().await;
        registry
            .groups
            .entry(room.clone())
            .or_default()
            .insert(connection_id.clone());
        tracing::debug!("Client '{}' joined group '{}'", connection_id, room);
    }

    async fn leave_group(&self, room: &RoomCode, connection_id: &ConnectionId) {
        let mut registry = self.registry.lock().await;
        if let Some(members) = registry.groups.get_mut(room) {
            members.remove(connection_id);
            if members.is_empty() {
                registry.groups.remove(room);
            }
        }
        tracing::debug!("Client '{}' left group '{}'", connection_id, room);
    }

    async fn close_group(&self, room: &RoomCode) -> bool {
        let mut registry = self.registry.lock().await;
        match registry.groups.get(room) {
            Some(members) if !members.is_empty() => {
                tracing::debug!(
                    "Group '{}' kept open: {} members joined since the room was deleted",
                    room,
                    members.len()
                );
                false
            }
            _ => {
                registry.groups.remove(room);
                tracing::debug!("Group '{}' closed", room);
                true
            }
        }
    }

    async fn broadcast_chat(&self, message: &ChatMessage) -> usize {
        let envelope = ChatEnvelope::from(message.clone());
        match serde_json::to_string(&envelope) {
            Ok(json) => self.broadcast_to_group(&message.room, &json).await,
            Err(e) => {
                tracing::error!("Failed to encode chat message for '{}': {}", message.room, e);
                0
            }
        }
    }
}
