//! WebSocket frame DTOs.

use serde::{Deserialize, Serialize};

/// Inbound chat frame: `{"message": "..."}`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InboundMessage {
    #[serde(default)]
    pub message: Option<String>,
}

/// Outbound chat envelope broadcast to every connection in the room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatEnvelope {
    pub name: String,
    pub message: String,
    pub created_at: String,
    pub user: String,
}

/// Frame status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrameStatus {
    Success,
    Error,
}

/// Status frame sent to a single connection (connect acknowledgement or error).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusFrame {
    pub status: FrameStatus,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub room: Option<String>,
}

impl StatusFrame {
    pub fn success(message: impl Into<String>, room: impl Into<String>) -> Self {
        Self {
            status: FrameStatus::Success,
            message: message.into(),
            room: Some(room.into()),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: FrameStatus::Error,
            message: message.into(),
            room: None,
        }
    }
}
