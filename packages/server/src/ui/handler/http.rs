//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
};

use crate::{
    domain::FamilyId,
    infrastructure::dto::{
        http::{
            CreateFamilyRequest, CreateFamilyResponse, CreateRoomRequest, CreateRoomResponse,
            FamilyDto, FamilyMemberRequest, JoinRoomRequest, JoinRoomResponse,
            RegisterUserRequest, RegisterUserResponse, RoomDetailDto, StatusResponse,
        },
        websocket::ChatEnvelope,
    },
    ui::{error::ApiError, state::AppState},
    usecase::{CreateRoomOutcome, JoinRoomInput, UseCaseError},
};

const SUCCESS: &str = "success";

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Create the family's chat room, or report the one it already owns
pub async fn create_room(
    State(state): State<Arc<AppState>>,
    body: Result<Json<CreateRoomRequest>, JsonRejection>,
) -> Result<Json<CreateRoomResponse>, ApiError> {
    let Json(request) = body?;
    let family_id = FamilyId::new(request.family_id.unwrap_or_default())
        .map_err(|_| UseCaseError::Validation("Family ID is required".to_string()))?;

    match state.create_room_usecase.execute(family_id.clone()).await? {
        CreateRoomOutcome::Created(code) => Ok(Json(CreateRoomResponse {
            status: SUCCESS.to_string(),
            message: format!("Room created for family {family_id}"),
            room: code.into_string(),
        })),
        CreateRoomOutcome::AlreadyExists(code) => Err(ApiError::RoomExists(code.into_string())),
    }
}

/// Authorize a user for a room and hand back its backlog and a join token
pub async fn join_room(
    State(state): State<Arc<AppState>>,
    body: Result<Json<JoinRoomRequest>, JsonRejection>,
) -> Result<Json<JoinRoomResponse>, ApiError> {
    let Json(request) = body?;
    // Caregivers identify with CGId, everyone else with PATId
    let user = if request.role.as_deref() == Some("CG") {
        request.caregiver_id
    } else {
        request.patient_id
    };
    let input = JoinRoomInput {
        room: request.room.unwrap_or_default(),
        name: request.name.unwrap_or_default(),
        user: user.unwrap_or_default(),
    };

    let output = state.join_room_usecase.execute(input).await?;

    Ok(Json(JoinRoomResponse {
        status: SUCCESS.to_string(),
        message: format!("{} joined room {}", output.name, output.room),
        room: output.room.into_string(),
        messages: output.messages.into_iter().map(ChatEnvelope::from).collect(),
        token: output.ticket.token.into_string(),
        expires_in: output.expires_in.as_secs(),
    }))
}

/// Get room detail by code
pub async fn get_room_detail(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
) -> Result<Json<RoomDetailDto>, ApiError> {
    let detail = state.get_room_detail_usecase.execute(code).await?;

    // Domain Model から DTO への変換
    Ok(Json(RoomDetailDto {
        room: detail.room.code.into_string(),
        family_id: detail.room.family_id.into_string(),
        members: detail.room.member_count,
        connected: detail.connected,
    }))
}

/// Register a caregiver or patient in the directory
pub async fn register_user(
    State(state): State<Arc<AppState>>,
    body: Result<Json<RegisterUserRequest>, JsonRejection>,
) -> Result<Json<RegisterUserResponse>, ApiError> {
    let Json(request) = body?;
    let user = state
        .register_user_usecase
        .execute(
            request.name.unwrap_or_default(),
            request.role.unwrap_or_default(),
        )
        .await?;

    Ok(Json(RegisterUserResponse {
        status: SUCCESS.to_string(),
        message: "User registered successfully".to_string(),
        user_id: user.id.into_string(),
    }))
}

pub async fn create_family(
    State(state): State<Arc<AppState>>,
    body: Result<Json<CreateFamilyRequest>, JsonRejection>,
) -> Result<Json<CreateFamilyResponse>, ApiError> {
    let Json(request) = body?;
    let family = state
        .manage_family_usecase
        .create(request.caregiver_id.unwrap_or_default())
        .await?;

    Ok(Json(CreateFamilyResponse {
        status: SUCCESS.to_string(),
        message: "Family created successfully".to_string(),
        family_id: family.id.into_string(),
    }))
}

pub async fn add_family_user(
    State(state): State<Arc<AppState>>,
    body: Result<Json<FamilyMemberRequest>, JsonRejection>,
) -> Result<Json<StatusResponse>, ApiError> {
    let Json(request) = body?;
    let (user_id, family_id) = member_fields(request);
    state
        .manage_family_usecase
        .add_member(user_id.clone(), family_id.clone())
        .await?;
    Ok(Json(StatusResponse::success(format!(
        "User {user_id} added to family {family_id}"
    ))))
}

pub async fn add_family_patient(
    State(state): State<Arc<AppState>>,
    body: Result<Json<FamilyMemberRequest>, JsonRejection>,
) -> Result<Json<StatusResponse>, ApiError> {
    let Json(request) = body?;
    let (user_id, family_id) = member_fields(request);
    state
        .manage_family_usecase
        .add_patient(user_id.clone(), family_id.clone())
        .await?;
    Ok(Json(StatusResponse::success(format!(
        "User {user_id} added to family {family_id}"
    ))))
}

pub async fn get_family(
    State(state): State<Arc<AppState>>,
    Path(family_id): Path<String>,
) -> Result<Json<FamilyDto>, ApiError> {
    let family = state.manage_family_usecase.get(family_id).await?;
    Ok(Json(family.into()))
}

fn member_fields(request: FamilyMemberRequest) -> (String, String) {
    (
        request.user_id.unwrap_or_default(),
        request.family_id.unwrap_or_default(),
    )
}
