// marketplace/src/util/debounce.rs

//! Trailing-edge debouncing over tokio timers.

use parking_lot::Mutex;
use std::future::Future;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Runs only the last action submitted within `delay` of the previous one.
///
/// `call` spawns onto the current tokio runtime and therefore must be invoked
/// from within one.
#[derive(Debug)]
pub struct Debouncer {
  delay: Duration,
  pending: Mutex<Option<JoinHandle<()>>>,
}

impl Debouncer {
  pub fn new(delay: Duration) -> Self {
    Self {
      delay,
      pending: Mutex::new(None),
    }
  }

  pub fn delay(&self) -> Duration {
    self.delay
  }

  /// Schedules `action` after the delay, cancelling any action still waiting.
  pub fn call<F, Fut>(&self, action: F)
  where
    F: FnOnce() -> Fut + Send + 'static,
    Fut: Future<Output = ()> + Send + 'static,
  {
    let delay = self.delay;
    let handle = tokio::spawn(async move {
      tokio::time::sleep(delay).await;
      action().await;
    });

    if let Some(previous) = self.pending.lock().replace(handle) {
      previous.abort();
    }
  }

  /// Drops the waiting action, if any. An action already running is not interrupted.
  pub fn cancel(&self) {
    if let Some(previous) = self.pending.lock().take() {
      if !previous.is_finished() {
        previous.abort();
      }
    }
  }
}

impl Drop for Debouncer {
  fn drop(&mut self) {
    self.cancel();
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::sync::atomic::{AtomicUsize, Ordering};
  use std::sync::Arc;

  #[tokio::test(start_paused = true)]
  async fn test_burst_collapses_into_one_call() {
    let debouncer = Debouncer::new(Duration::from_millis(300));
    let calls = Arc::new(AtomicUsize::new(0));

    for _ in 0..5 {
      let calls = calls.clone();
      debouncer.call(move || async move {
        calls.fetch_add(1, Ordering::SeqCst);
      });
      tokio::time::sleep(Duration::from_millis(100)).await;
    }
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    tokio::time::sleep(Duration::from_millis(400)).await;
    assert_eq!(calls.load(Ordering::SeqCst), 1);
  }

  #[tokio::test(start_paused = true)]
  async fn test_cancel_prevents_pending_call() {
    let debouncer = Debouncer::new(Duration::from_millis(50));
    let calls = Arc::new(AtomicUsize::new(0));
    let c = calls.clone();
    debouncer.call(move || async move {
      c.fetch_add(1, Ordering::SeqCst);
    });
    debouncer.cancel();
    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(calls.load(Ordering::SeqCst), 0);
  }
}
