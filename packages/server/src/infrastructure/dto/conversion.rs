//! Conversion logic between DTOs and domain entities.

use carechat_shared::time::timestamp_to_ist_string;

use crate::domain::{ChatMessage, Coordinates, Family, MemoryProfile, Reminder, ReminderChanges};

use super::{
    care::{AdditionalInfoDto, CoordinatesDto, ReminderDto, UpdateReminderRequest},
    http::FamilyDto,
    websocket::ChatEnvelope,
};

// ========================================
// Domain Entity → DTO
// ========================================

impl From<ChatMessage> for ChatEnvelope {
    fn from(model: ChatMessage) -> Self {
        Self {
            name: model.name.into_string(),
            message: model.message.into_string(),
            created_at: timestamp_to_ist_string(model.created_at.value()).unwrap_or_default(),
            user: model.user.into_string(),
        }
    }
}

impl From<Family> for FamilyDto {
    fn from(model: Family) -> Self {
        Self {
            family_id: model.id.into_string(),
            created_by: model.created_by.into_string(),
            members: model.members.into_iter().map(|m| m.into_string()).collect(),
            patient: model.patient.map(|p| p.into_string()),
        }
    }
}

impl From<Reminder> for ReminderDto {
    fn from(model: Reminder) -> Self {
        Self {
            rem_id: model.id.into_string(),
            user_id: model.user.into_string(),
            title: model.title,
            description: model.description,
            date: model.date,
            time: model.time,
            status: model.status,
            urgent: model.urgent,
            important: model.important,
        }
    }
}

impl From<Coordinates> for CoordinatesDto {
    fn from(model: Coordinates) -> Self {
        Self {
            latitude: model.latitude(),
            longitude: model.longitude(),
        }
    }
}

impl From<MemoryProfile> for AdditionalInfoDto {
    fn from(model: MemoryProfile) -> Self {
        Self {
            user_id: model.user.into_string(),
            name: model.name.into_string(),
            relation: model.relation,
            tagline: model.tagline,
            trigger_memory: model.trigger_memory,
        }
    }
}

// ========================================
// DTO → Domain Entity
// ========================================

impl From<UpdateReminderRequest> for ReminderChanges {
    fn from(dto: UpdateReminderRequest) -> Self {
        Self {
            title: dto.title,
            description: dto.description,
            date: dto.date,
            time: dto.time,
            status: dto.status,
            urgent: dto.urgent,
            important: dto.important,
        }
    }
}
