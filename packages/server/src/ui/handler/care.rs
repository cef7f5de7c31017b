//! HTTP handlers for reminders, locations, additional info and push tokens.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
};

use crate::{
    domain::{Coordinates, Reminder, ReminderUpdate},
    infrastructure::dto::{
        care::{
            AdditionalInfoDto, AdditionalInfoRequest, AdditionalInfoResponse, CarePairQuery,
            CoordinatesDto, CoordsRequest, CreateReminderRequest, LocationRequest,
            LocationResponse, ReminderDto, RemindersResponse, StoreTokenRequest, TokenResponse,
            UpdateReminderRequest, UserQuery,
        },
        http::StatusResponse,
    },
    ui::{error::ApiError, state::AppState},
    usecase::{CoordinatesInput, MemoryProfileInput, ProfileSave, ReminderDraft},
};

type Created = (StatusCode, Json<StatusResponse>);

fn created(message: impl Into<String>) -> Created {
    (StatusCode::CREATED, Json(StatusResponse::success(message)))
}

fn draft(request: &CreateReminderRequest) -> ReminderDraft {
    ReminderDraft {
        title: request.title.clone(),
        description: request.description.clone(),
        date: request.date.clone(),
        time: request.time.clone(),
        status: request.status.clone(),
        urgent: request.is_urgent,
        important: request.is_important,
    }
}

fn coords(request: Option<CoordsRequest>) -> Option<CoordinatesInput> {
    request.map(|c| CoordinatesInput {
        latitude: c.latitude,
        longitude: c.longitude,
    })
}

fn reminders_response(message: &str, reminders: Vec<Reminder>) -> Json<RemindersResponse> {
    Json(RemindersResponse {
        status: "success".to_string(),
        message: message.to_string(),
        reminders: reminders.into_iter().map(ReminderDto::from).collect(),
    })
}

fn update_response(outcome: ReminderUpdate) -> Json<StatusResponse> {
    // NotFound is already an error at this point
    let message = match outcome {
        ReminderUpdate::Unchanged => "No changes made to the reminder",
        _ => "Reminder updated successfully",
    };
    Json(StatusResponse::success(message))
}

fn location_response(coordinates: Coordinates) -> Json<LocationResponse> {
    Json(LocationResponse {
        status: "success".to_string(),
        coords: CoordinatesDto::from(coordinates),
    })
}

// ========================================
// Reminders
// ========================================

pub async fn list_patient_reminders(
    State(state): State<Arc<AppState>>,
    Query(query): Query<UserQuery>,
) -> Result<Json<RemindersResponse>, ApiError> {
    let reminders = state
        .manage_reminders_usecase
        .list_for_patient(query.user_id.unwrap_or_default())
        .await?;
    Ok(reminders_response("Reminders fetched successfully", reminders))
}

pub async fn list_caregiver_reminders(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CarePairQuery>,
) -> Result<Json<RemindersResponse>, ApiError> {
    let reminders = state
        .manage_reminders_usecase
        .list_for_caregiver(
            query.caregiver_id.unwrap_or_default(),
            query.patient_id.unwrap_or_default(),
        )
        .await?;
    Ok(reminders_response("Reminders fetched successfully", reminders))
}

pub async fn create_patient_reminder(
    State(state): State<Arc<AppState>>,
    body: Result<Json<CreateReminderRequest>, JsonRejection>,
) -> Result<Created, ApiError> {
    let Json(request) = body?;
    state
        .manage_reminders_usecase
        .create_for_patient(request.user_id.clone().unwrap_or_default(), draft(&request))
        .await?;
    Ok(created("Reminder created successfully"))
}

/// The reminder is stored under the patient, not the caregiver who wrote it
pub async fn create_caregiver_reminder(
    State(state): State<Arc<AppState>>,
    body: Result<Json<CreateReminderRequest>, JsonRejection>,
) -> Result<Created, ApiError> {
    let Json(request) = body?;
    state
        .manage_reminders_usecase
        .create_for_caregiver(
            request.caregiver_id.clone().unwrap_or_default(),
            request.patient_id.clone().unwrap_or_default(),
            draft(&request),
        )
        .await?;
    Ok(created("Reminder created successfully"))
}

pub async fn update_patient_reminder(
    State(state): State<Arc<AppState>>,
    Path(reminder_id): Path<String>,
    body: Result<Json<UpdateReminderRequest>, JsonRejection>,
) -> Result<Json<StatusResponse>, ApiError> {
    let Json(request) = body?;
    let patient_id = request.user_id.clone().unwrap_or_default();
    let outcome = state
        .manage_reminders_usecase
        .update_for_patient(reminder_id, patient_id, request.into())
        .await?;
    Ok(update_response(outcome))
}

pub async fn update_caregiver_reminder(
    State(state): State<Arc<AppState>>,
    Path(reminder_id): Path<String>,
    body: Result<Json<UpdateReminderRequest>, JsonRejection>,
) -> Result<Json<StatusResponse>, ApiError> {
    let Json(request) = body?;
    let caregiver_id = request.caregiver_id.clone().unwrap_or_default();
    let patient_id = request.patient_id.clone().unwrap_or_default();
    let outcome = state
        .manage_reminders_usecase
        .update_for_caregiver(reminder_id, caregiver_id, patient_id, request.into())
        .await?;
    Ok(update_response(outcome))
}

pub async fn delete_patient_reminder(
    State(state): State<Arc<AppState>>,
    Path((user_id, reminder_id)): Path<(String, String)>,
) -> Result<Json<StatusResponse>, ApiError> {
    state
        .manage_reminders_usecase
        .delete_for_patient(user_id, reminder_id)
        .await?;
    Ok(Json(StatusResponse::success("Reminder deleted successfully")))
}

pub async fn delete_caregiver_reminder(
    State(state): State<Arc<AppState>>,
    Path((caregiver_id, patient_id, reminder_id)): Path<(String, String, String)>,
) -> Result<Json<StatusResponse>, ApiError> {
    state
        .manage_reminders_usecase
        .delete_for_caregiver(caregiver_id, patient_id, reminder_id)
        .await?;
    Ok(Json(StatusResponse::success("Reminder deleted successfully")))
}

// ========================================
// Locations
// ========================================

pub async fn save_patient_home(
    State(state): State<Arc<AppState>>,
    body: Result<Json<LocationRequest>, JsonRejection>,
) -> Result<Created, ApiError> {
    let Json(request) = body?;
    state
        .share_location_usecase
        .save_home_for_patient(request.user_id.unwrap_or_default(), coords(request.coords))
        .await?;
    Ok(created("Home location saved successfully"))
}

pub async fn get_patient_home(
    State(state): State<Arc<AppState>>,
    Query(query): Query<UserQuery>,
) -> Result<Json<LocationResponse>, ApiError> {
    let home = state
        .share_location_usecase
        .get_home(query.user_id.unwrap_or_default())
        .await?;
    Ok(location_response(home))
}

pub async fn save_caregiver_home(
    State(state): State<Arc<AppState>>,
    body: Result<Json<LocationRequest>, JsonRejection>,
) -> Result<Created, ApiError> {
    let Json(request) = body?;
    state
        .share_location_usecase
        .save_home_for_caregiver(
            request.caregiver_id.unwrap_or_default(),
            request.patient_id.unwrap_or_default(),
            coords(request.coords),
        )
        .await?;
    Ok(created("Home location saved successfully"))
}

/// Reported by the patient's device
pub async fn save_current_location(
    State(state): State<Arc<AppState>>,
    body: Result<Json<LocationRequest>, JsonRejection>,
) -> Result<Json<StatusResponse>, ApiError> {
    let Json(request) = body?;
    state
        .share_location_usecase
        .save_current(request.user_id.unwrap_or_default(), coords(request.coords))
        .await?;
    Ok(Json(StatusResponse::success(
        "Current location updated successfully",
    )))
}

pub async fn get_current_location(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CarePairQuery>,
) -> Result<Json<LocationResponse>, ApiError> {
    let current = state
        .share_location_usecase
        .get_current(
            query.caregiver_id.unwrap_or_default(),
            query.patient_id.unwrap_or_default(),
        )
        .await?;
    Ok(location_response(current))
}

// ========================================
// Additional info
// ========================================

pub async fn save_additional_info(
    State(state): State<Arc<AppState>>,
    body: Result<Json<AdditionalInfoRequest>, JsonRejection>,
) -> Result<Created, ApiError> {
    let Json(request) = body?;
    let input = MemoryProfileInput {
        user: request.user_id.unwrap_or_default(),
        relation: request.relation,
        tagline: request.tagline,
        trigger_memory: request.trigger_memory,
    };
    match state.memory_profile_usecase.save(input).await? {
        ProfileSave::Created => Ok(created("Additional info saved successfully")),
        ProfileSave::Updated => Ok((
            StatusCode::OK,
            Json(StatusResponse::success("Additional info updated successfully")),
        )),
    }
}

pub async fn get_additional_info(
    State(state): State<Arc<AppState>>,
    Query(query): Query<UserQuery>,
) -> Result<Json<AdditionalInfoResponse>, ApiError> {
    let profiles = state
        .memory_profile_usecase
        .get(query.user_id.unwrap_or_default())
        .await?;
    Ok(Json(AdditionalInfoResponse {
        status: "success".to_string(),
        message: "Additional info fetched successfully".to_string(),
        user_info: profiles.into_iter().map(AdditionalInfoDto::from).collect(),
    }))
}

// ========================================
// Push tokens
// ========================================

pub async fn store_push_token(
    State(state): State<Arc<AppState>>,
    body: Result<Json<StoreTokenRequest>, JsonRejection>,
) -> Result<Json<StatusResponse>, ApiError> {
    let Json(request) = body?;
    state
        .push_token_usecase
        .store(
            request.user_id.unwrap_or_default(),
            request.token.unwrap_or_default(),
        )
        .await?;
    Ok(Json(StatusResponse::success("Token stored successfully")))
}

pub async fn get_push_token(
    State(state): State<Arc<AppState>>,
    Query(query): Query<UserQuery>,
) -> Result<Json<TokenResponse>, ApiError> {
    let token = state
        .push_token_usecase
        .get(query.user_id.unwrap_or_default())
        .await?;
    Ok(Json(TokenResponse {
        status: "success".to_string(),
        message: "Token fetched successfully".to_string(),
        token: token.into_string(),
    }))
}
