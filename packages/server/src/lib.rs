//! Family chat room server for the carechat memory-care assistant.
//!
//! Caregivers and patients of one family share a chat room: rooms are created
//! per family, joined over HTTP, and used over a WebSocket connection. A room
//! lives as long as at least one connection is attached to it.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

pub mod config;
