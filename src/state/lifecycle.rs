//! Mount / resize / unmount hooks for a view

use super::{AppState, Lobby};
use crate::protocol::ServerMessage;
use crate::types::{PixelRect, Viewport};

impl AppState {
    /// Show a fresh lobby. Called once when the socket connects.
    pub async fn on_mount(&self) -> ServerMessage {
        let viewport = *self.viewport.read().await;
        let mut slot = self.lobby.write().await;
        let mut rng = self.rng.lock().await;

        let mut lobby = Lobby::new(&mut *rng);
        let view = lobby.render(&mut *rng, &viewport);
        tracing::info!(view = %self.id, room_code = %lobby.room_code, "Lobby mounted");
        *slot = Some(lobby);

        ServerMessage::Lobby { view }
    }

    /// The browser reported a new viewport size and, while the lobby is
    /// visible, the lobby panel's bounding box.
    ///
    /// Bubbles already placed keep their position even if the new exclusion
    /// rectangle now covers them.
    pub async fn on_resize(
        &self,
        viewport: Viewport,
        panel: Option<PixelRect>,
    ) -> Option<ServerMessage> {
        *self.viewport.write().await = viewport;

        {
            let mut lobby = self.lobby.write().await;
            let lobby = lobby.as_mut()?;
            if let Some(panel) = panel {
                lobby.measure(&panel, &viewport);
                tracing::debug!(view = %self.id, exclusion = ?lobby.exclusion, "Lobby panel measured");
            }
        }

        self.current_view().await
    }

    /// Tear the view down. Dropping the timer handles aborts the timers.
    pub async fn on_unmount(&self) {
        let cancelled = {
            let mut timers = self.timers.lock().await;
            let count = timers.len();
            timers.clear();
            count
        };

        *self.lobby.write().await = None;
        *self.prompt_screen.write().await = None;

        tracing::info!(view = %self.id, cancelled, "View unmounted");
    }

    /// Render whichever screen is visible
    pub async fn current_view(&self) -> Option<ServerMessage> {
        if let Some(view) = self.lobby_view().await {
            return Some(ServerMessage::Lobby { view });
        }
        self.prompt_view()
            .await
            .map(|view| ServerMessage::Prompt { view })
    }
}
