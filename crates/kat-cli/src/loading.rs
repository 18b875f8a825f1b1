//! Cosmetic loading placeholder shown while filter results are recomputed.
//!
//! Each request starts a fresh timer and aborts the one before it, so only
//! the newest request ever reports ready.

use std::time::Duration;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;

pub(crate) struct LoadingGate {
    delay: Duration,
    pending: Option<JoinHandle<()>>,
}

/// Resolves when its request's delay has elapsed, or reports that it was
/// superseded.
pub(crate) struct LoadingTicket {
    rx: oneshot::Receiver<()>,
}

impl LoadingTicket {
    /// `true` once the delay elapsed, `false` if a newer request replaced
    /// this one first.
    pub(crate) async fn ready(self) -> bool {
        self.rx.await.is_ok()
    }
}

impl LoadingGate {
    pub(crate) fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Starts a new placeholder timer, cancelling any pending one.
    ///
    /// Must be called from within a Tokio runtime.
    pub(crate) fn request(&mut self) -> LoadingTicket {
        self.cancel();

        let (tx, rx) = oneshot::channel();
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // The receiver may already be gone; nothing to report then.
            let _ = tx.send(());
        }));

        LoadingTicket { rx }
    }

    /// Aborts the pending timer, if any.
    pub(crate) fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

impl Drop for LoadingGate {
    fn drop(&mut self) {
        self.cancel();
    }
}
