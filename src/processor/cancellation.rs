//! Cooperative cancellation shared by every file task of a run.

use std::sync::Arc;

use tokio::sync::watch;

/// A cancellation signal backed by a `watch` channel.
///
/// Clones share the same signal. Tasks check [`is_cancelled`] at their
/// check points and race blocking work against [`cancelled`].
///
/// [`is_cancelled`]: Cancellation::is_cancelled
/// [`cancelled`]: Cancellation::cancelled
#[derive(Debug, Clone)]
pub struct Cancellation {
  sender: Arc<watch::Sender<bool>>,
  receiver: watch::Receiver<bool>,
}

impl Default for Cancellation {
  fn default() -> Self {
    Self::new()
  }
}

impl Cancellation {
  pub fn new() -> Self {
    let (sender, receiver) = watch::channel(false);
    Self {
      sender: Arc::new(sender),
      receiver,
    }
  }

  /// Signals every clone. Calling this more than once has no further effect.
  pub fn cancel(&self) {
    self.sender.send_replace(true);
  }

  pub fn is_cancelled(&self) -> bool {
    *self.receiver.borrow()
  }

  /// Completes once [`cancel`](Self::cancel) has been called.
  pub async fn cancelled(&self) {
    let mut receiver = self.receiver.clone();
    if receiver.wait_for(|cancelled| *cancelled).await.is_err() {
      // The sender lives as long as any clone, so this only happens during
      // teardown; never report a cancellation that did not happen.
      std::future::pending::<()>().await;
    }
  }
}
