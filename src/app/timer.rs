// ABOUTME: Scoped periodic ticker acquired by a screen and released when dropped

use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::debug;

use crate::app::tasks::{MessagePayload, MessageSender, ScreenMessage};

/// What a screen wants from its ticker right now.
///
/// A change in `epoch` restarts the ticker from a full period even when the
/// period itself is unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickerSpec {
    pub period: Duration,
    pub epoch: u64,
}

impl TickerSpec {
    pub fn new(period: Duration, epoch: u64) -> Self {
        Self { period, epoch }
    }
}

/// Posts [`MessagePayload::Tick`] every `period`; the first tick fires one period after start
#[derive(Debug)]
pub struct ScopedTicker {
    spec: TickerSpec,
    handle: JoinHandle<()>,
}

impl ScopedTicker {
    pub fn start(spec: TickerSpec, generation: u64, tx: MessageSender) -> Self {
        debug!("Starting ticker every {}ms (generation {})", spec.period.as_millis(), generation);
        let handle = tokio::spawn(async move {
            let mut interval = interval_at(Instant::now() + spec.period, spec.period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                let message = ScreenMessage {
                    generation,
                    payload: MessagePayload::Tick,
                };
                if tx.send(message).is_err() {
                    break;
                }
            }
        });
        Self { spec, handle }
    }

    pub fn spec(&self) -> TickerSpec {
        self.spec
    }
}

impl Drop for ScopedTicker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    #[tokio::test(start_paused = true)]
    async fn test_ticks_after_each_period() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let _ticker = ScopedTicker::start(TickerSpec::new(Duration::from_secs(1), 0), 7, tx);

        let message = rx.recv().await.unwrap();
        assert_eq!(message.generation, 7);
        assert!(matches!(message.payload, MessagePayload::Tick));
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_stops_ticking() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let ticker = ScopedTicker::start(TickerSpec::new(Duration::from_secs(1), 0), 1, tx);
        drop(ticker);
        tokio::time::sleep(Duration::from_secs(3)).await;
        assert!(rx.recv().await.is_none());
    }
}
