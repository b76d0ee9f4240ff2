use crate::types::*;
use crate::view::{LobbyView, PromptView};
use serde::{Deserialize, Serialize};

pub const PROTOCOL_VERSION: &str = "1.0";

/// Input events sent by the browser page
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "t", rename_all = "snake_case")]
pub enum ClientMessage {
    AddPlayer,
    Start,
    SimulateAnswer,
    /// Sent after layout and on every window resize
    Resize {
        viewport: Viewport,
        /// Lobby panel bounds in pixels, absent when the lobby is not shown
        #[serde(default)]
        panel: Option<PixelRect>,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "t", rename_all = "snake_case")]
pub enum ServerMessage {
    Welcome {
        protocol: String,
        view_id: ViewId,
        server_now: String,
    },
    Lobby {
        view: LobbyView,
    },
    Prompt {
        view: PromptView,
    },
    Error {
        code: String,
        msg: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_message_tags() {
        let msg: ClientMessage = serde_json::from_str(r#"{"t":"add_player"}"#).unwrap();
        assert_eq!(msg, ClientMessage::AddPlayer);

        let msg: ClientMessage = serde_json::from_str(r#"{"t":"simulate_answer"}"#).unwrap();
        assert_eq!(msg, ClientMessage::SimulateAnswer);

        let msg: ClientMessage = serde_json::from_str(
            r#"{"t":"resize","viewport":{"width":1024,"height":768},"panel":{"left":1,"right":2,"top":3,"bottom":4}}"#,
        )
        .unwrap();
        match msg {
            ClientMessage::Resize { viewport, panel } => {
                assert_eq!(viewport.width, 1024.0);
                assert_eq!(panel.unwrap().bottom, 4.0);
            }
            other => panic!("Expected Resize, got {:?}", other),
        }
    }

    #[test]
    fn test_resize_without_panel() {
        let msg: ClientMessage =
            serde_json::from_str(r#"{"t":"resize","viewport":{"width":640,"height":480}}"#)
                .unwrap();
        assert!(matches!(msg, ClientMessage::Resize { panel: None, .. }));
    }

    #[test]
    fn test_server_error_shape() {
        let json = serde_json::to_value(ServerMessage::Error {
            code: "PARSE_ERROR".to_string(),
            msg: "nope".to_string(),
        })
        .unwrap();
        assert_eq!(json["t"], "error");
        assert_eq!(json["code"], "PARSE_ERROR");
    }
}
