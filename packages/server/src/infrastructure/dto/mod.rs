//! Data Transfer Objects (DTOs) for the chat service.
//!
//! DTOs are organized by protocol:
//! - `websocket`: WebSocket frame DTOs
//! - `http`: HTTP API request/response DTOs for rooms and the directory
//! - `care`: HTTP API DTOs for reminders, locations, additional info and push tokens

pub mod care;
pub mod conversion;
pub mod http;
pub mod websocket;
