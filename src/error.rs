use std::io;

/// Actions a view refuses because the matching control is not on screen
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ViewError {
    #[error("The lobby is not on screen")]
    NotInLobby,

    #[error("The prompt screen is not on screen")]
    NotOnPrompt,

    #[error("The answer control is not visible yet")]
    ControlHidden,
}

impl ViewError {
    /// Protocol error code sent to the client
    pub fn code(&self) -> &'static str {
        match self {
            ViewError::NotInLobby => "NOT_IN_LOBBY",
            ViewError::NotOnPrompt => "NOT_ON_PROMPT",
            ViewError::ControlHidden => "CONTROL_HIDDEN",
        }
    }
}

/// Fatal errors while bringing the server up
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: std::net::SocketAddr,
        #[source]
        source: io::Error,
    },

    #[error("Server stopped unexpectedly: {0}")]
    Serve(#[from] io::Error),
}
