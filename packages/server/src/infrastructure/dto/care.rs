//! HTTP DTOs for reminders, locations, additional info and push tokens.
//!
//! Every request field is optional so the use cases can report what is
//! missing instead of the extractor rejecting the body.

use serde::{Deserialize, Serialize};

/// Query carrying a single user (`?userId=`)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserQuery {
    pub user_id: Option<String>,
}

/// Query carrying a caregiver and a patient (`?CGId=&PATId=`)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CarePairQuery {
    #[serde(rename = "CGId")]
    pub caregiver_id: Option<String>,
    #[serde(rename = "PATId")]
    pub patient_id: Option<String>,
}

/// `POST /v1/reminders/{patient,caregiver}`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReminderRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub status: Option<String>,
    pub user_id: Option<String>,
    #[serde(rename = "CGId")]
    pub caregiver_id: Option<String>,
    #[serde(rename = "PATId")]
    pub patient_id: Option<String>,
    pub is_urgent: Option<bool>,
    pub is_important: Option<bool>,
}

/// `PUT /v1/reminders/{patient,caregiver}/{reminder_id}`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReminderRequest {
    pub user_id: Option<String>,
    #[serde(rename = "CGId")]
    pub caregiver_id: Option<String>,
    #[serde(rename = "PATId")]
    pub patient_id: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub status: Option<String>,
    pub urgent: Option<bool>,
    pub important: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderDto {
    pub rem_id: String,
    pub user_id: String,
    pub title: String,
    pub description: String,
    pub date: String,
    pub time: String,
    pub status: String,
    pub urgent: bool,
    pub important: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemindersResponse {
    pub status: String,
    pub message: String,
    pub reminders: Vec<ReminderDto>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct CoordsRequest {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoordinatesDto {
    pub latitude: f64,
    pub longitude: f64,
}

/// `POST /v1/location/...`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationRequest {
    pub user_id: Option<String>,
    #[serde(rename = "CGId")]
    pub caregiver_id: Option<String>,
    #[serde(rename = "PATId")]
    pub patient_id: Option<String>,
    pub coords: Option<CoordsRequest>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationResponse {
    pub status: String,
    pub coords: CoordinatesDto,
}

/// `POST /v1/family/save-additional-info`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdditionalInfoRequest {
    pub user_id: Option<String>,
    pub relation: Option<String>,
    pub tagline: Option<String>,
    pub trigger_memory: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdditionalInfoDto {
    pub user_id: String,
    pub name: String,
    pub relation: String,
    pub tagline: String,
    pub trigger_memory: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdditionalInfoResponse {
    pub status: String,
    pub message: String,
    pub user_info: Vec<AdditionalInfoDto>,
}

/// `POST /v1/notifications/store-token`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreTokenRequest {
    pub user_id: Option<String>,
    pub token: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub status: String,
    pub message: String,
    pub token: String,
}
