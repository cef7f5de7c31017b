//! Server execution logic.

use std::sync::Arc;

use axum::{
    Router,
    routing::{delete, get, post, put},
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use super::{
    handler::{
        add_family_patient, add_family_user, create_caregiver_reminder, create_family,
        create_patient_reminder, create_room, delete_caregiver_reminder, delete_patient_reminder,
        get_additional_info, get_current_location, get_family, get_patient_home, get_push_token,
        get_room_detail, health_check, join_room, list_caregiver_reminders,
        list_patient_reminders, register_user, save_additional_info, save_caregiver_home,
        save_current_location, save_patient_home, store_push_token, update_caregiver_reminder,
        update_patient_reminder, websocket_handler,
    },
    signal::shutdown_signal,
    state::AppState,
};

/// Chat room server
///
/// # Example
///
/// ```ignore
/// let state = AppState::in_memory(Arc::new(SystemClock), Duration::from_secs(120));
/// Server::new(state).run("127.0.0.1".to_string(), 8080).await?;
/// ```
pub struct Server {
    state: Arc<AppState>,
}

impl Server {
    /// Create a new Server instance
    pub fn new(state: AppState) -> Self {
        Self {
            state: Arc::new(state),
        }
    }

    /// Build the router with every HTTP and WebSocket route
    pub fn into_router(self) -> Router {
        Router::new()
            // WebSocket エンドポイント
            .route("/v1/chatroom/ws", get(websocket_handler))
            // HTTP エンドポイント
            .route("/v1/chatroom/create-room", post(create_room))
            .route("/v1/chatroom/join-room", post(join_room))
            .route("/v1/chatroom/rooms/{code}", get(get_room_detail))
            .route("/v1/users", post(register_user))
            .route("/v1/family", post(create_family))
            .route("/v1/family/add_user", post(add_family_user))
            .route("/v1/family/add_patient", post(add_family_patient))
            .route("/v1/family/save-additional-info", post(save_additional_info))
            .route("/v1/family/get-additional-info", get(get_additional_info))
            .route("/v1/family/{family_id}", get(get_family))
            .route(
                "/v1/reminders/patient",
                get(list_patient_reminders).post(create_patient_reminder),
            )
            .route(
                "/v1/reminders/caregiver",
                get(list_caregiver_reminders).post(create_caregiver_reminder),
            )
            .route(
                "/v1/reminders/patient/{reminder_id}",
                put(update_patient_reminder),
            )
            .route(
                "/v1/reminders/caregiver/{reminder_id}",
                put(update_caregiver_reminder),
            )
            .route(
                "/v1/reminders/patient/{user_id}/{reminder_id}",
                delete(delete_patient_reminder),
            )
            .route(
                "/v1/reminders/caregiver/{caregiver_id}/{patient_id}/{reminder_id}",
                delete(delete_caregiver_reminder),
            )
            .route(
                "/v1/location/patient/safe-location",
                get(get_patient_home).post(save_patient_home),
            )
            .route(
                "/v1/location/caregiver/safe-location",
                post(save_caregiver_home),
            )
            .route(
                "/v1/location/caregiver/curr-location",
                get(get_current_location).post(save_current_location),
            )
            .route("/v1/notifications/store-token", post(store_push_token))
            .route("/v1/notifications/get-user-token", get(get_push_token))
            .route("/api/health", get(health_check))
            .layer(TraceLayer::new_for_http())
            .with_state(self.state)
    }

    /// Run the chat server
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        let bind_addr = format!("{}:{}", host, port);
        let listener = TcpListener::bind(&bind_addr).await?;

        tracing::info!("Chat server listening on {}", listener.local_addr()?);
        tracing::info!("Connect to: ws://{}/v1/chatroom/ws?token=<join token>", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        self.serve(listener).await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }

    /// Serve on an already bound listener until a shutdown signal arrives
    pub async fn serve(self, listener: TcpListener) -> std::io::Result<()> {
        axum::serve(listener, self.into_router())
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}
