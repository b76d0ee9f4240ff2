use crate::protocol::ServerMessage;
use crate::state::{AppState, Tick};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

/// A background timer owned by a view. Dropping the handle aborts the task.
#[derive(Debug)]
pub struct TimerHandle {
    name: &'static str,
    handle: JoinHandle<()>,
}

impl TimerHandle {
    fn spawn<F>(name: &'static str, task: F) -> Self
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        Self {
            name,
            handle: tokio::spawn(task),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        if !self.handle.is_finished() {
            tracing::debug!(timer = self.name, "Cancelling timer");
            self.handle.abort();
        }
    }
}

/// Tick the session countdown once per interval until it reaches zero
pub fn spawn_countdown(state: Arc<AppState>) -> TimerHandle {
    TimerHandle::spawn("countdown", async move {
        let period = state.config.tick_interval;
        let mut interval = tokio::time::interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            interval.tick().await;

            let tick = state.session.write().await.tick();
            match tick {
                Tick::Running(_) => publish_prompt(&state).await,
                Tick::Expired => {
                    // Nothing happens at zero besides the final repaint
                    tracing::info!(view = %state.id, "Countdown finished");
                    publish_prompt(&state).await;
                    break;
                }
                Tick::Idle => break,
            }
        }
    })
}

/// Shrink the prompt screen once after the configured delay
pub fn spawn_shrink_delay(state: Arc<AppState>) -> TimerHandle {
    TimerHandle::spawn("shrink", async move {
        tokio::time::sleep(state.config.shrink_delay).await;

        if state.shrink_prompt().await {
            tracing::debug!(view = %state.id, "Prompt screen shrunk");
            publish_prompt(&state).await;
        }
    })
}

async fn publish_prompt(state: &AppState) {
    if let Some(view) = state.prompt_view().await {
        state.publish(ServerMessage::Prompt { view });
    }
}
