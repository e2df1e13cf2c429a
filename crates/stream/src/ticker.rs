use pulse_core::Message;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::debug;

/// Handle to a running tick producer.
///
/// The task sends [`Message::Tick`] every `period`, first one `period` after
/// spawning.  Cancelling flips the watch token and aborts the task; dropping
/// the handle cancels too, so a ticker can never outlive its owner.
#[derive(Debug)]
pub struct Ticker {
    epoch:  u64,
    cancel: watch::Sender<bool>,
    task:   JoinHandle<()>,
}

impl Ticker {
    /// Spawn a ticker on the current Tokio runtime.
    pub fn spawn(period: Duration, epoch: u64, tx: mpsc::Sender<Message>) -> Self {
        let (cancel, token) = watch::channel(false);
        let task = tokio::spawn(tick_loop(period, epoch, tx, token));
        Self { epoch, cancel, task }
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn is_cancelled(&self) -> bool {
        *self.cancel.borrow()
    }

    /// Stop producing ticks.  Safe to call more than once.
    pub fn cancel(&self) {
        self.cancel.send_replace(true);
        self.task.abort();
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.cancel();
    }
}

async fn tick_loop(
    period: Duration,
    epoch: u64,
    tx: mpsc::Sender<Message>,
    mut token: watch::Receiver<bool>,
) {
    let mut interval = time::interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;
            changed = token.changed() => {
                if changed.is_err() || *token.borrow() {
                    break;
                }
            }
            _ = interval.tick() => {
                if *token.borrow() {
                    break;
                }
                if tx.send(Message::Tick { epoch }).await.is_err() {
                    break; // event loop gone
                }
            }
        }
    }

    debug!(epoch, "ticker exited");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn emits_ticks_tagged_with_epoch() {
        let (tx, mut rx) = mpsc::channel(8);
        let _ticker = Ticker::spawn(Duration::from_millis(1_000), 7, tx);

        for _ in 0..3 {
            assert_eq!(rx.recv().await, Some(Message::Tick { epoch: 7 }));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn first_tick_waits_one_period() {
        let (tx, mut rx) = mpsc::channel(8);
        let _ticker = Ticker::spawn(Duration::from_millis(1_000), 1, tx);

        time::advance(Duration::from_millis(999)).await;
        assert!(rx.try_recv().is_err());

        assert_eq!(rx.recv().await, Some(Message::Tick { epoch: 1 }));
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_ticker_goes_quiet() {
        let (tx, mut rx) = mpsc::channel(8);
        let ticker = Ticker::spawn(Duration::from_millis(1_000), 1, tx);
        ticker.cancel();
        ticker.cancel();
        assert!(ticker.is_cancelled());

        // The task owned the only sender, so the channel closes once it is gone.
        let next = time::timeout(Duration::from_secs(30), rx.recv()).await;
        assert_eq!(next, Ok(None));
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_handle_cancels() {
        let (tx, mut rx) = mpsc::channel(8);
        drop(Ticker::spawn(Duration::from_millis(500), 1, tx));

        let next = time::timeout(Duration::from_secs(30), rx.recv()).await;
        assert_eq!(next, Ok(None));
    }
}
