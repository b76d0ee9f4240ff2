//! Serializable snapshots of what each screen shows
//!
//! Rendering is pure: the same component state always yields the same view.
//! Derived values (status line, not-answered roster) are computed here on
//! every render instead of being stored.

use crate::state::session::{not_answered, Session};
use crate::types::{BubblePlacement, PlayerName, RoomCode};
use serde::{Deserialize, Serialize};

pub const GAME_TITLE: &str = "Wack-a-Human";
const NONE_ANSWERED: &str = "None yet";
const ALL_ANSWERED: &str = "All answered!";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BubbleView {
    pub name: PlayerName,
    #[serde(flatten)]
    pub placement: BubblePlacement,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LobbyView {
    pub title: String,
    pub room_code: RoomCode,
    pub player_count: usize,
    pub status: String,
    pub bubbles: Vec<BubbleView>,
}

/// Answered / not answered lists, only shown once the prompt screen shrinks
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnswerRosters {
    pub answered: Vec<PlayerName>,
    pub not_answered: Vec<PlayerName>,
    pub answered_text: String,
    pub not_answered_text: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PromptView {
    pub title: String,
    pub round_no: u32,
    pub prompt: String,
    pub time_left: u32,
    pub shrunk: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rosters: Option<AnswerRosters>,
}

/// "Waiting for players to join..." / "1 player joined" / "N players joined"
pub fn lobby_status(player_count: usize) -> String {
    match player_count {
        0 => "Waiting for players to join...".to_string(),
        1 => "1 player joined".to_string(),
        n => format!("{} players joined", n),
    }
}

pub fn render_lobby(
    room_code: &str,
    players: &[PlayerName],
    bubbles: Vec<(PlayerName, BubblePlacement)>,
) -> LobbyView {
    LobbyView {
        title: GAME_TITLE.to_string(),
        room_code: room_code.to_string(),
        player_count: players.len(),
        status: lobby_status(players.len()),
        bubbles: bubbles
            .into_iter()
            .map(|(name, placement)| BubbleView { name, placement })
            .collect(),
    }
}

fn join_or(names: &[PlayerName], fallback: &str) -> String {
    if names.is_empty() {
        fallback.to_string()
    } else {
        names.join(", ")
    }
}

pub fn render_prompt(session: &Session, shrunk: bool) -> PromptView {
    let rosters = shrunk.then(|| {
        let answered = session.answered.clone();
        let missing = not_answered(session.roster(), &answered);
        AnswerRosters {
            answered_text: join_or(&answered, NONE_ANSWERED),
            not_answered_text: join_or(&missing, ALL_ANSWERED),
            answered,
            not_answered: missing,
        }
    });

    PromptView {
        title: format!("Round {}", session.round_no),
        round_no: session.round_no,
        prompt: session.prompt.clone(),
        time_left: session.time_left,
        shrunk,
        rosters,
    }
}
