//! Utilities shared by the carechat packages.

pub mod logger;
pub mod time;
