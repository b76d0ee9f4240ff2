mod lifecycle;
mod lobby;
mod prompt;
pub mod session;

pub use lobby::Lobby;
pub use prompt::PromptScreen;
pub use session::{Session, Tick};

use crate::config::AppConfig;
use crate::protocol::ServerMessage;
use crate::timers::TimerHandle;
use crate::types::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use tokio::sync::{broadcast, Mutex, RwLock};

/// State of one mounted view (one browser tab)
///
/// Views never share state. Each WebSocket connection mounts its own and
/// drops it on disconnect, which is what makes a reload start from scratch.
#[derive(Clone)]
pub struct AppState {
    pub id: ViewId,
    pub config: Arc<AppConfig>,
    pub session: Arc<RwLock<Session>>,
    pub lobby: Arc<RwLock<Option<Lobby>>>,
    pub prompt_screen: Arc<RwLock<Option<PromptScreen>>>,
    pub viewport: Arc<RwLock<Viewport>>,
    /// Views re-rendered by timers, forwarded to the socket
    pub updates: broadcast::Sender<ServerMessage>,
    rng: Arc<Mutex<StdRng>>,
    timers: Arc<Mutex<Vec<TimerHandle>>>,
}

impl AppState {
    pub fn new(config: Arc<AppConfig>) -> Self {
        Self::with_rng(config, StdRng::from_os_rng())
    }

    /// Deterministic view for tests and replays
    pub fn with_seed(config: Arc<AppConfig>, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: Arc<AppConfig>, rng: StdRng) -> Self {
        let (tx, _rx) = broadcast::channel(32);
        Self {
            id: ulid::Ulid::new().to_string(),
            config,
            session: Arc::new(RwLock::new(Session::new())),
            lobby: Arc::new(RwLock::new(None)),
            prompt_screen: Arc::new(RwLock::new(None)),
            viewport: Arc::new(RwLock::new(Viewport::default())),
            updates: tx,
            rng: Arc::new(Mutex::new(rng)),
            timers: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Number of timers currently owned by this view
    pub async fn active_timers(&self) -> usize {
        self.timers
            .lock()
            .await
            .iter()
            .filter(|t| !t.is_finished())
            .count()
    }

    /// Send a message to this view's socket. No receiver just means the
    /// socket is gone, which is fine.
    pub(crate) fn publish(&self, msg: ServerMessage) {
        let _ = self.updates.send(msg);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ViewError;
    use std::time::Duration;

    fn test_state() -> Arc<AppState> {
        Arc::new(AppState::with_seed(Arc::new(AppConfig::default()), 17))
    }

    #[tokio::test]
    async fn test_mount_shows_lobby() {
        let state = test_state();
        let msg = state.on_mount().await;

        match msg {
            ServerMessage::Lobby { view } => {
                assert_eq!(view.room_code.len(), 4);
                assert_eq!(view.player_count, 0);
                assert!(view.bubbles.is_empty());
            }
            other => panic!("Expected Lobby message, got {:?}", other),
        }
        assert!(!state.session.read().await.is_started());
    }

    #[tokio::test]
    async fn test_add_players_and_start() {
        let state = test_state();
        state.on_mount().await;

        state.add_player().await.unwrap();
        let view = state.add_player().await.unwrap();
        assert_eq!(view.player_count, 2);
        assert_eq!(view.bubbles.len(), 2);

        let roster = state.lobby.read().await.as_ref().unwrap().players.clone();
        let prompt = state.start_session().await.unwrap();

        assert_eq!(prompt.time_left, 60);
        assert_eq!(prompt.round_no, 1);
        assert!(!prompt.shrunk);
        assert!(state.lobby.read().await.is_none());
        assert_eq!(state.session.read().await.roster(), roster.as_slice());
        assert_eq!(state.active_timers().await, 2);

        state.on_unmount().await;
    }

    #[tokio::test]
    async fn test_start_with_zero_players() {
        let state = test_state();
        state.on_mount().await;

        let prompt = state.start_session().await.unwrap();
        assert_eq!(prompt.time_left, 60);
        assert!(state.session.read().await.roster().is_empty());

        state.on_unmount().await;
    }

    #[tokio::test]
    async fn test_lobby_actions_after_start_are_rejected() {
        let state = test_state();
        state.on_mount().await;
        state.start_session().await.unwrap();

        assert_eq!(state.add_player().await.unwrap_err(), ViewError::NotInLobby);
        assert_eq!(
            state.start_session().await.unwrap_err(),
            ViewError::NotInLobby
        );

        state.on_unmount().await;
    }

    #[tokio::test]
    async fn test_answer_requires_prompt_screen() {
        let state = test_state();
        state.on_mount().await;
        assert_eq!(
            state.record_answer().await.unwrap_err(),
            ViewError::NotOnPrompt
        );

        state.start_session().await.unwrap();
        assert_eq!(
            state.record_answer().await.unwrap_err(),
            ViewError::ControlHidden
        );

        state.on_unmount().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_prompt_shrinks_after_delay() {
        let state = test_state();
        state.on_mount().await;
        state.add_player().await.unwrap();
        state.start_session().await.unwrap();

        tokio::time::sleep(Duration::from_millis(4_500)).await;
        assert!(!state.prompt_view().await.unwrap().shrunk);

        tokio::time::sleep(Duration::from_millis(1_000)).await;
        let view = state.prompt_view().await.unwrap();
        assert!(view.shrunk);
        assert_eq!(view.time_left, 55);

        let rosters = view.rosters.unwrap();
        assert!(rosters.answered.is_empty());
        assert_eq!(rosters.not_answered.len(), 1);

        let view = state.record_answer().await.unwrap();
        assert_eq!(view.rosters.unwrap().not_answered_text, "All answered!");

        state.on_unmount().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_countdown_runs_to_zero_and_stops() {
        let state = test_state();
        state.on_mount().await;
        state.start_session().await.unwrap();

        tokio::time::sleep(Duration::from_secs(61)).await;
        assert_eq!(state.session.read().await.time_left, 0);
        // Only the shrink timer and countdown existed, both are done now
        assert_eq!(state.active_timers().await, 0);

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(state.session.read().await.time_left, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_unmount_cancels_timers() {
        let state = test_state();
        state.on_mount().await;
        state.start_session().await.unwrap();

        tokio::time::sleep(Duration::from_millis(2_500)).await;
        state.on_unmount().await;
        let frozen = state.session.read().await.time_left;
        assert_eq!(frozen, 58);

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(state.session.read().await.time_left, frozen);
        assert!(state.prompt_screen.read().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_timer_updates_are_published() {
        let state = test_state();
        let mut rx = state.updates.subscribe();
        state.on_mount().await;
        state.start_session().await.unwrap();

        tokio::time::sleep(Duration::from_millis(1_500)).await;
        match rx.try_recv() {
            Ok(ServerMessage::Prompt { view }) => assert_eq!(view.time_left, 59),
            other => panic!("Expected Prompt message, got {:?}", other),
        }

        state.on_unmount().await;
    }
}
