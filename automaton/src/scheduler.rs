// scheduler.rs - Periodic tick source for the stepping loop
//
// The timer runs as a task on a background tokio runtime and only *delivers*
// ticks. Whoever owns the grid drains them on its own thread, so two ticks can
// never step the same grid concurrently.

use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Ticks buffered before further ticks are coalesced.
const TICK_BACKLOG: usize = 4;

/// Callback fired from the timer thread after each delivered tick. Used to
/// wake the owning context (e.g. request a UI repaint); must not touch the grid.
pub type TickWaker = Arc<dyn Fn() + Send + Sync>;

#[derive(Default)]
pub struct Ticker {
    timer: Option<JoinHandle<()>>,
    ticks: Option<mpsc::Receiver<()>>,
}

impl Ticker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arms a timer firing every `interval`, the first tick immediately.
    /// Any previously armed timer is cancelled first.
    pub fn start(&mut self, runtime: &Handle, interval: Duration, on_tick: Option<TickWaker>) {
        self.cancel();

        let (tx, rx) = mpsc::channel(TICK_BACKLOG);
        let timer = runtime.spawn(async move {
            let mut clock = tokio::time::interval(interval);
            clock.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                clock.tick().await;
                match tx.try_send(()) {
                    Ok(()) => {}
                    Err(TrySendError::Full(())) => continue,  // owner is behind, coalesce
                    Err(TrySendError::Closed(())) => break,
                }
                if let Some(wake) = &on_tick { wake(); }
            }
        });

        log::debug!("ticker armed every {interval:?}");
        self.timer = Some(timer);
        self.ticks = Some(rx);
    }

    /// Stops the timer. Ticks already queued are discarded with the
    /// receiver, so nothing is delivered after this returns.
    /// Returns whether a timer was armed.
    pub fn cancel(&mut self) -> bool {
        self.ticks = None;
        match self.timer.take() {
            Some(timer) => {
                timer.abort();
                log::debug!("ticker cancelled");
                true
            }
            None => false,
        }
    }

    pub fn is_active(&self) -> bool {
        self.timer.is_some()
    }

    /// Takes every tick delivered so far.
    pub fn drain(&mut self) -> usize {
        let Some(ticks) = self.ticks.as_mut() else { return 0 };
        let mut count = 0;
        while ticks.try_recv().is_ok() {
            count += 1;
        }
        count
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread::sleep;

    fn runtime() -> tokio::runtime::Runtime {
        tokio::runtime::Runtime::new().unwrap()
    }

    #[test]
    fn delivers_ticks_and_wakes_owner() {
        let rt = runtime();
        let woken = Arc::new(AtomicUsize::new(0));
        let waker: TickWaker = {
            let woken = woken.clone();
            Arc::new(move || { woken.fetch_add(1, Ordering::SeqCst); })
        };

        let mut ticker = Ticker::new();
        ticker.start(rt.handle(), Duration::from_millis(10), Some(waker));
        sleep(Duration::from_millis(100));

        assert!(ticker.drain() >= 1);
        assert!(woken.load(Ordering::SeqCst) >= 1);
    }

    #[test]
    fn nothing_is_delivered_after_cancel() {
        let rt = runtime();
        let mut ticker = Ticker::new();
        ticker.start(rt.handle(), Duration::from_millis(5), None);
        sleep(Duration::from_millis(50));

        assert!(ticker.cancel());
        assert!(!ticker.is_active());
        sleep(Duration::from_millis(50));
        assert_eq!(ticker.drain(), 0);
    }

    #[test]
    fn cancel_twice_is_harmless() {
        let rt = runtime();
        let mut ticker = Ticker::new();
        ticker.start(rt.handle(), Duration::from_millis(5), None);
        assert!(ticker.cancel());
        assert!(!ticker.cancel());
    }

    #[test]
    fn backlog_is_bounded() {
        let rt = runtime();
        let mut ticker = Ticker::new();
        ticker.start(rt.handle(), Duration::from_millis(1), None);
        sleep(Duration::from_millis(100));
        assert!(ticker.drain() <= TICK_BACKLOG);
    }

    #[test]
    fn restart_replaces_the_previous_timer() {
        let rt = runtime();
        let mut ticker = Ticker::new();
        ticker.start(rt.handle(), Duration::from_millis(5), None);
        let first = ticker.timer.as_ref().unwrap().abort_handle();
        ticker.start(rt.handle(), Duration::from_secs(60), None);
        sleep(Duration::from_millis(50));
        assert!(first.is_finished());
        // only the immediate first tick of the new timer
        assert_eq!(ticker.drain(), 1);
    }
}
