use super::AppState;
use crate::timers;
use crate::view::{render_prompt, PromptView};
use std::sync::Arc;

/// Local display state of the prompt screen
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromptScreen {
    /// One-way switch into the compact layout with the answer rosters
    pub shrunk: bool,
}

impl PromptScreen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if this call changed the layout
    pub fn shrink(&mut self) -> bool {
        !std::mem::replace(&mut self.shrunk, true)
    }
}

impl AppState {
    /// Show the prompt screen and start its timers, replacing any running ones
    pub(crate) async fn mount_prompt_screen(self: &Arc<Self>) {
        *self.prompt_screen.write().await = Some(PromptScreen::new());

        let countdown = timers::spawn_countdown(self.clone());
        let shrink = timers::spawn_shrink_delay(self.clone());

        let mut handles = self.timers.lock().await;
        handles.clear();
        handles.push(countdown);
        handles.push(shrink);
    }

    /// Switch the prompt screen into shrunk mode. Returns false when it was
    /// already shrunk or is not on screen.
    pub async fn shrink_prompt(&self) -> bool {
        match self.prompt_screen.write().await.as_mut() {
            Some(screen) => screen.shrink(),
            None => false,
        }
    }

    pub async fn prompt_view(&self) -> Option<PromptView> {
        let shrunk = self.prompt_screen.read().await.as_ref()?.shrunk;
        let session = self.session.read().await;
        Some(render_prompt(&session, shrunk))
    }
}
