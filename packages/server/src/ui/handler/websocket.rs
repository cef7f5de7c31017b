//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        Query, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use serde::Deserialize;
use tokio::sync::mpsc;

use crate::{
    domain::{ConnectionId, PusherChannel},
    infrastructure::dto::websocket::{InboundMessage, StatusFrame},
    ui::{error::client_message, state::AppState},
};

/// Query parameters for WebSocket connection
#[derive(Debug, Deserialize)]
pub struct ConnectQuery {
    /// Join token issued by `POST /v1/chatroom/join-room`
    pub token: Option<String>,
}

/// Upgrade unconditionally; the connect outcome is reported on the socket itself.
pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Query(query): Query<ConnectQuery>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state, query.token))
}

/// Spawns a task that receives messages from the rx channel and pushes them to the WebSocket sender.
///
/// Every frame for this connection goes through the channel: chat envelopes
/// broadcast by the room and status frames addressed to this client alone.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

/// Queue a status frame for this connection only.
fn send_frame(tx: &PusherChannel, frame: StatusFrame) {
    match serde_json::to_string(&frame) {
        Ok(json) => {
            if tx.send(json).is_err() {
                tracing::debug!("Connection closed before status frame was sent");
            }
        }
        Err(e) => tracing::error!("Failed to encode status frame: {}", e),
    }
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>, token: Option<String>) {
    let connection_id = ConnectionId::generate();
    let (sender, mut receiver) = socket.split();
    let (tx, rx) = mpsc::unbounded_channel();
    let mut send_task = pusher_loop(rx, sender);

    // Attach the connection to the room its join token was issued for
    match state
        .connect_participant_usecase
        .execute(connection_id.clone(), token, tx.clone())
        .await
    {
        Ok(session) => {
            tracing::info!(
                "Connection '{}' attached to room {} as {}",
                connection_id,
                session.room,
                session.name
            );
            send_frame(
                &tx,
                StatusFrame::success(
                    format!("{} joined room {}", session.name, session.room),
                    session.room.into_string(),
                ),
            );
        }
        Err(e) => {
            tracing::warn!("Connection '{}' failed to attach: {}", connection_id, e);
            send_frame(&tx, StatusFrame::error(client_message(&e)));
        }
    }

    let state_clone = state.clone();
    let connection_id_clone = connection_id.clone();

    // Spawn a task to receive messages from this client
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::warn!("WebSocket error on '{}': {}", connection_id_clone, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    handle_text(&state_clone, &connection_id_clone, &tx, text.as_str()).await;
                }
                Message::Close(_) => {
                    tracing::info!("Connection '{}' requested close", connection_id_clone);
                    break;
                }
                _ => {}
            }
        }
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    let outcome = state
        .disconnect_participant_usecase
        .execute(&connection_id)
        .await;
    tracing::debug!("Connection '{}' closed: {:?}", connection_id, outcome);
}

async fn handle_text(
    state: &AppState,
    connection_id: &ConnectionId,
    tx: &PusherChannel,
    text: &str,
) {
    let inbound = match serde_json::from_str::<InboundMessage>(text) {
        Ok(inbound) => inbound,
        Err(e) => {
            tracing::warn!("Malformed frame from '{}': {}", connection_id, e);
            send_frame(tx, StatusFrame::error("Invalid data"));
            return;
        }
    };

    if let Err(e) = state
        .send_message_usecase
        .execute(connection_id, inbound.message)
        .await
    {
        tracing::warn!("Failed to send message from '{}': {}", connection_id, e);
        send_frame(tx, StatusFrame::error(client_message(&e)));
    }
}
