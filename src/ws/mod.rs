pub mod handlers;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
};
use futures::{sink::SinkExt, stream::StreamExt};
use std::sync::Arc;

use crate::config::AppConfig;
use crate::protocol::{ClientMessage, ServerMessage, PROTOCOL_VERSION};
use crate::state::AppState;

/// WebSocket upgrade handler
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(config): State<Arc<AppConfig>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, config))
}

/// Serialize a message and send it, returning false once the socket is gone
async fn send_json<S>(sender: &mut S, msg: &ServerMessage) -> bool
where
    S: SinkExt<Message> + Unpin,
{
    match serde_json::to_string(msg) {
        Ok(json) => sender.send(Message::Text(json.into())).await.is_ok(),
        Err(e) => {
            tracing::error!("Failed to serialize message: {}", e);
            true
        }
    }
}

/// One connection is one view: mount on connect, unmount on disconnect
async fn handle_socket(socket: WebSocket, config: Arc<AppConfig>) {
    let (mut sender, mut receiver) = socket.split();

    let state = Arc::new(AppState::new(config));
    tracing::info!(view = %state.id, "WebSocket connected");

    // Subscribe before mounting so no timer update is missed
    let mut updates_rx = state.updates.subscribe();

    let welcome = ServerMessage::Welcome {
        protocol: PROTOCOL_VERSION.to_string(),
        view_id: state.id.clone(),
        server_now: chrono::Utc::now().to_rfc3339(),
    };
    if !send_json(&mut sender, &welcome).await {
        tracing::error!("Failed to send welcome message");
        return;
    }

    let lobby = state.on_mount().await;
    if send_json(&mut sender, &lobby).await {
        loop {
            tokio::select! {
                // Views re-rendered by timers
                update = updates_rx.recv() => {
                    if let Ok(msg) = update {
                        if !send_json(&mut sender, &msg).await {
                            break;
                        }
                    }
                }

                ws_msg = receiver.next() => {
                    match ws_msg {
                        Some(Ok(Message::Text(text))) => {
                            tracing::debug!("Received message: {}", text);

                            let response = match serde_json::from_str::<ClientMessage>(&text) {
                                Ok(client_msg) => handlers::handle_message(client_msg, &state).await,
                                Err(e) => {
                                    tracing::warn!("Failed to parse client message: {}", e);
                                    Some(ServerMessage::Error {
                                        code: "PARSE_ERROR".to_string(),
                                        msg: format!("Invalid message format: {}", e),
                                    })
                                }
                            };

                            if let Some(response) = response {
                                if !send_json(&mut sender, &response).await {
                                    tracing::error!("Failed to send response");
                                    break;
                                }
                            }
                        }
                        Some(Ok(Message::Close(_))) => {
                            tracing::info!("WebSocket closed");
                            break;
                        }
                        Some(Ok(Message::Ping(data))) => {
                            if sender.send(Message::Pong(data)).await.is_err() {
                                break;
                            }
                        }
                        Some(Ok(_)) => {}
                        Some(Err(e)) => {
                            tracing::error!("WebSocket error: {}", e);
                            break;
                        }
                        None => break,
                    }
                }
            }
        }
    }

    state.on_unmount().await;
    tracing::info!(view = %state.id, "WebSocket connection closed");
}
