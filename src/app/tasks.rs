// ABOUTME: Screen-owned background tasks and the messages they post back to the UI loop
// Every message carries the mount generation so results from a torn-down screen are dropped

use std::future::Future;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

use crate::app::actions::ActionOutcome;

#[derive(Debug)]
pub enum MessagePayload {
    /// Periodic tick from the screen's [`crate::app::timer::ScopedTicker`]
    Tick,
    /// A backend call finished
    Outcome(ActionOutcome),
}

#[derive(Debug)]
pub struct ScreenMessage {
    pub generation: u64,
    pub payload: MessagePayload,
}

pub type MessageSender = UnboundedSender<ScreenMessage>;

/// In-flight work owned by the mounted screen; dropping it aborts everything
#[derive(Debug, Default)]
pub struct ScreenTasks {
    handles: Vec<JoinHandle<()>>,
}

impl ScreenTasks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn<F>(&mut self, future: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.handles.retain(|handle| !handle.is_finished());
        self.handles.push(tokio::spawn(future));
    }

    /// Tasks that have not finished yet
    pub fn in_flight(&self) -> usize {
        self.handles.iter().filter(|handle| !handle.is_finished()).count()
    }

    pub fn abort_all(&mut self) {
        for handle in self.handles.drain(..) {
            handle.abort();
        }
    }
}

impl Drop for ScreenTasks {
    fn drop(&mut self) {
        self.abort_all();
    }
}
