use super::AppState;
use crate::error::ViewError;
use crate::types::*;
use crate::view::PromptView;
use rand::Rng;
use std::sync::Arc;

pub const PROMPTS: [&str; 5] = [
    "Invent a new holiday and describe how it is celebrated.",
    "What would you do if you could be invisible for a day?",
    "Describe the worst possible superpower.",
    "If animals could talk, which would be the rudest?",
    "Come up with a new ice cream flavor.",
];

/// Result of one countdown tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Countdown moved and is still above zero
    Running(u32),
    /// Countdown just reached zero. Nothing else happens at zero yet; the
    /// countdown timer only uses this to stop itself.
    Expired,
    /// Not started, or already at zero
    Idle,
}

/// Session controller state for one view
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub phase: SessionPhase,
    pub round_no: u32,
    pub time_left: u32,
    pub prompt: String,
    pub lobby: Option<LobbyHandoff>,
    pub answered: Vec<PlayerName>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            phase: SessionPhase::NotStarted,
            round_no: 0,
            time_left: 0,
            prompt: String::new(),
            lobby: None,
            answered: Vec::new(),
        }
    }

    fn is_valid_transition(from: SessionPhase, to: SessionPhase) -> bool {
        use SessionPhase::*;

        // Restarting resets the round; there is no way back to NotStarted
        matches!((from, to), (NotStarted, Started) | (Started, Started))
    }

    /// Start (or restart) the session with a lobby snapshot
    pub fn start<R: Rng>(&mut self, handoff: LobbyHandoff, countdown_seconds: u32, rng: &mut R) {
        debug_assert!(Self::is_valid_transition(self.phase, SessionPhase::Started));

        self.phase = SessionPhase::Started;
        self.round_no += 1;
        self.time_left = countdown_seconds;
        self.prompt = PROMPTS[rng.random_range(0..PROMPTS.len())].to_string();
        self.lobby = Some(handoff);
        self.answered.clear();
    }

    pub fn is_started(&self) -> bool {
        self.phase == SessionPhase::Started
    }

    /// Advance the countdown by one second
    pub fn tick(&mut self) -> Tick {
        if !self.is_started() || self.time_left == 0 {
            return Tick::Idle;
        }

        self.time_left -= 1;
        if self.time_left == 0 {
            Tick::Expired
        } else {
            Tick::Running(self.time_left)
        }
    }

    pub fn roster(&self) -> &[PlayerName] {
        self.lobby
            .as_ref()
            .map(|l| l.roster.as_slice())
            .unwrap_or(&[])
    }

    /// Mark the next roster member who has not answered yet
    pub fn record_answer(&mut self) -> Option<PlayerName> {
        let next = self
            .roster()
            .iter()
            .find(|name| !self.answered.contains(name))
            .cloned()?;
        self.answered.push(next.clone());
        Some(next)
    }

    pub fn not_answered(&self) -> Vec<PlayerName> {
        not_answered(self.roster(), &self.answered)
    }
}

/// Roster members missing from `answered`, in roster order
pub fn not_answered(roster: &[PlayerName], answered: &[PlayerName]) -> Vec<PlayerName> {
    roster
        .iter()
        .filter(|name| !answered.contains(name))
        .cloned()
        .collect()
}

impl AppState {
    /// Hand the lobby over to the session controller and show the prompt screen
    pub async fn start_session(self: &Arc<Self>) -> Result<PromptView, ViewError> {
        let handoff = {
            let mut lobby = self.lobby.write().await;
            let lobby = lobby.take().ok_or(ViewError::NotInLobby)?;
            lobby.handoff()
        };

        tracing::info!(
            view = %self.id,
            room_code = %handoff.room_code,
            players = handoff.roster.len(),
            "Starting session"
        );

        {
            let mut rng = self.rng.lock().await;
            self.session
                .write()
                .await
                .start(handoff, self.config.countdown_seconds, &mut *rng);
        }

        self.mount_prompt_screen().await;
        self.prompt_view().await.ok_or(ViewError::NotOnPrompt)
    }

    /// Simulate the next player answering
    pub async fn record_answer(&self) -> Result<PromptView, ViewError> {
        match *self.prompt_screen.read().await {
            None => return Err(ViewError::NotOnPrompt),
            Some(ref screen) if !screen.shrunk => return Err(ViewError::ControlHidden),
            Some(_) => {}
        }

        match self.session.write().await.record_answer() {
            Some(name) => tracing::info!(view = %self.id, player = %name, "Player answered"),
            None => tracing::debug!(view = %self.id, "Everyone has answered already"),
        }

        self.prompt_view().await.ok_or(ViewError::NotOnPrompt)
    }
}
