//! HTTP API request/response DTOs.
//!
//! Field names follow the mobile client's wire format (camelCase, plus the
//! `CGId` / `PATId` keys of the join request).

use serde::{Deserialize, Serialize};

use super::websocket::ChatEnvelope;

/// `POST /v1/chatroom/create-room`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoomRequest {
    pub family_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRoomResponse {
    pub status: String,
    pub message: String,
    pub room: String,
}

/// `POST /v1/chatroom/join-room`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JoinRoomRequest {
    pub room: Option<String>,
    pub name: Option<String>,
    #[serde(rename = "CGId")]
    pub caregiver_id: Option<String>,
    #[serde(rename = "PATId")]
    pub patient_id: Option<String>,
    pub role: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinRoomResponse {
    pub status: String,
    pub message: String,
    pub room: String,
    pub messages: Vec<ChatEnvelope>,
    /// Single-use token to present on the WebSocket connect
    pub token: String,
    /// Seconds until `token` expires
    pub expires_in: u64,
}

/// `GET /v1/chatroom/rooms/{code}`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomDetailDto {
    pub room: String,
    pub family_id: String,
    /// Member count stored in the room directory
    pub members: i64,
    /// Sessions attached to the room in this process
    pub connected: usize,
}

/// `POST /v1/users`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegisterUserRequest {
    pub name: Option<String>,
    pub role: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUserResponse {
    pub status: String,
    pub message: String,
    pub user_id: String,
}

/// `POST /v1/family`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFamilyRequest {
    pub caregiver_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFamilyResponse {
    pub status: String,
    pub message: String,
    pub family_id: String,
}

/// `POST /v1/family/add_user` and `POST /v1/family/add_patient`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilyMemberRequest {
    pub user_id: Option<String>,
    pub family_id: Option<String>,
}

/// `GET /v1/family/{familyId}`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilyDto {
    pub family_id: String,
    pub created_by: String,
    pub members: Vec<String>,
    pub patient: Option<String>,
}

/// Plain `{status, message}` envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
    pub message: String,
}

impl StatusResponse {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: "success".to_string(),
            message: message.into(),
        }
    }
}
