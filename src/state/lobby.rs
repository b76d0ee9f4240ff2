use super::AppState;
use crate::error::ViewError;
use crate::layout::{BubbleLayout, Footprint};
use crate::names::{generate_player_name, generate_room_code};
use crate::types::*;
use crate::view::{render_lobby, LobbyView};
use rand::Rng;

/// Lobby screen state. Dropping it discards the bubble cache.
#[derive(Debug, Clone)]
pub struct Lobby {
    pub room_code: RoomCode,
    pub players: Vec<PlayerName>,
    pub exclusion: Option<ExclusionRect>,
    bubbles: BubbleLayout,
}

impl Lobby {
    pub fn new<R: Rng>(rng: &mut R) -> Self {
        Self {
            room_code: generate_room_code(rng),
            players: Vec::new(),
            exclusion: None,
            bubbles: BubbleLayout::new(),
        }
    }

    pub fn add_player<R: Rng>(&mut self, rng: &mut R) -> PlayerName {
        let name = generate_player_name(rng);
        self.players.push(name.clone());
        name
    }

    /// Recompute the exclusion rectangle from the panel's on-screen box
    pub fn measure(&mut self, panel: &PixelRect, viewport: &Viewport) {
        self.exclusion = Some(ExclusionRect::from_pixels(panel, viewport));
    }

    pub fn handoff(&self) -> LobbyHandoff {
        LobbyHandoff {
            room_code: self.room_code.clone(),
            roster: self.players.clone(),
            exclusion: self.exclusion,
        }
    }

    /// Place any new bubbles, then render the screen
    pub fn render<R: Rng>(&mut self, rng: &mut R, viewport: &Viewport) -> LobbyView {
        let bubbles = self.bubbles.arrange(
            rng,
            &self.players,
            Footprint::for_viewport(viewport),
            self.exclusion.as_ref(),
        );
        render_lobby(&self.room_code, &self.players, bubbles)
    }
}

impl AppState {
    /// Render the lobby if it is on screen
    pub async fn lobby_view(&self) -> Option<LobbyView> {
        let viewport = *self.viewport.read().await;
        let mut lobby = self.lobby.write().await;
        let lobby = lobby.as_mut()?;
        let mut rng = self.rng.lock().await;
        Some(lobby.render(&mut *rng, &viewport))
    }

    pub async fn add_player(&self) -> Result<LobbyView, ViewError> {
        {
            let mut lobby = self.lobby.write().await;
            let lobby = lobby.as_mut().ok_or(ViewError::NotInLobby)?;
            let name = lobby.add_player(&mut *self.rng.lock().await);
            tracing::info!(view = %self.id, player = %name, count = lobby.players.len(), "Player added");
        }

        self.lobby_view().await.ok_or(ViewError::NotInLobby)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_new_lobby() {
        let lobby = Lobby::new(&mut StdRng::seed_from_u64(1));
        assert_eq!(lobby.room_code.len(), 4);
        assert!(lobby.players.is_empty());
        assert!(lobby.exclusion.is_none());
    }

    #[test]
    fn test_measure_in_viewport_percent() {
        let mut lobby = Lobby::new(&mut StdRng::seed_from_u64(1));
        let viewport = Viewport {
            width: 1000.0,
            height: 500.0,
        };
        lobby.measure(
            &PixelRect {
                left: 300.0,
                right: 700.0,
                top: 100.0,
                bottom: 400.0,
            },
            &viewport,
        );

        assert_eq!(
            lobby.exclusion,
            Some(ExclusionRect {
                left: 30.0,
                right: 70.0,
                top: 20.0,
                bottom: 80.0,
            })
        );
    }

    #[test]
    fn test_handoff_snapshot() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut lobby = Lobby::new(&mut rng);
        let first = lobby.add_player(&mut rng);
        let second = lobby.add_player(&mut rng);

        let handoff = lobby.handoff();
        assert_eq!(handoff.room_code, lobby.room_code);
        assert_eq!(handoff.roster, vec![first, second]);
        assert!(handoff.exclusion.is_none());

        // Later lobby changes do not leak into the snapshot
        lobby.add_player(&mut rng);
        assert_eq!(handoff.roster.len(), 2);
    }

    #[test]
    fn test_render_keeps_bubbles_stable() {
        let mut rng = StdRng::seed_from_u64(9);
        let viewport = Viewport::default();
        let mut lobby = Lobby::new(&mut rng);
        lobby.add_player(&mut rng);
        lobby.add_player(&mut rng);

        let first = lobby.render(&mut rng, &viewport);
        let second = lobby.render(&mut rng, &viewport);

        assert_eq!(first.bubbles, second.bubbles);
        assert_eq!(first.player_count, 2);
        assert_eq!(first.status, "2 players joined");
    }
}
