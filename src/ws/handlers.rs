//! Client message dispatch

use crate::error::ViewError;
use crate::protocol::{ClientMessage, ServerMessage};
use crate::state::AppState;
use std::sync::Arc;

fn view_error(e: ViewError) -> ServerMessage {
    ServerMessage::Error {
        code: e.code().to_string(),
        msg: e.to_string(),
    }
}

/// Handle client messages and return optional response
pub async fn handle_message(msg: ClientMessage, state: &Arc<AppState>) -> Option<ServerMessage> {
    match msg {
        ClientMessage::AddPlayer => Some(match state.add_player().await {
            Ok(view) => ServerMessage::Lobby { view },
            Err(e) => view_error(e),
        }),

        ClientMessage::Start => Some(match state.start_session().await {
            Ok(view) => ServerMessage::Prompt { view },
            Err(e) => view_error(e),
        }),

        ClientMessage::SimulateAnswer => Some(match state.record_answer().await {
            Ok(view) => ServerMessage::Prompt { view },
            Err(e) => view_error(e),
        }),

        ClientMessage::Resize { viewport, panel } => {
            tracing::debug!(
                view = %state.id,
                width = viewport.width,
                height = viewport.height,
                "Viewport resized"
            );
            state.on_resize(viewport, panel).await
        }
    }
}
