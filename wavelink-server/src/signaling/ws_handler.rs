use crate::connection::ConnectionLifecycle;
use crate::registry::SessionRegistry;
use crate::signaling::{SignalingOutput, SignalingRouter, SignalingService};
use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};
use tracing::{info, warn};
use wavelink_core::{ClientMessage, ConnectionId, ServerMessage};

/// Everything the HTTP layer needs: shared registry, the socket fan-out
/// service and the message router wired on top of both.
#[derive(Clone)]
pub struct RelayState {
    pub registry: Arc<SessionRegistry>,
    pub service: SignalingService,
    pub router: Arc<SignalingRouter>,
}

impl RelayState {
    pub fn new() -> Self {
        let registry = Arc::new(SessionRegistry::new());
        let service = SignalingService::new();
        let router = Arc::new(SignalingRouter::new(
            registry.clone(),
            Arc::new(service.clone()),
        ));
        Self {
            registry,
            service,
            router,
        }
    }
}

impl Default for RelayState {
    fn default() -> Self {
        Self::new()
    }
}

pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<RelayState>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: RelayState) {
    let connection_id = ConnectionId::new();
    info!("New WebSocket connection: {}", connection_id);

    let (mut sender, mut receiver) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel();

    state.service.add_peer(connection_id.clone(), tx);

    // The client learns its assigned id before anything else happens.
    state.service.send_to(
        &connection_id,
        &ServerMessage::Welcome {
            socket_id: connection_id.clone(),
        },
    );

    let lifecycle = Arc::new(Mutex::new(ConnectionLifecycle::new(connection_id.clone())));

    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(msg).await.is_err() {
                break;
            }
        }
    });

    let mut recv_task = tokio::spawn({
        let state = state.clone();
        let connection_id = connection_id.clone();
        let lifecycle = lifecycle.clone();

        async move {
            while let Some(Ok(msg)) = receiver.next().await {
                match msg {
                    Message::Text(text) => match serde_json::from_str::<ClientMessage>(&text) {
                        Ok(client_msg) => {
                            let mut conn = lifecycle.lock().await;
                            state.router.handle_message(&mut conn, client_msg);
                        }
                        Err(e) => warn!("Invalid message from {}: {:?}", connection_id, e),
                    },
                    Message::Close(_) => break,
                    _ => {}
                }
            }

            let mut conn = lifecycle.lock().await;
            state.router.handle_disconnect(&mut conn);
        }
    });

    tokio::select! {
        _ = (&mut send_task) => recv_task.abort(),
        _ = (&mut recv_task) => send_task.abort(),
    };

    // Safety net for the aborted-receiver path; a no-op when the receive
    // loop already processed the disconnect.
    state.router.handle_disconnect(&mut *lifecycle.lock().await);

    state.service.remove_peer(&connection_id);
    info!("WebSocket disconnected: {}", connection_id);
}
