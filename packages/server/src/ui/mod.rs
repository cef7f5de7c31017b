//! HTTP and WebSocket surface of the chat server.

mod error;
mod handler;
mod server;
mod signal;
pub mod state;

pub use server::Server;
pub use state::AppState;
