// ── Flash notifications ──
//
// A single transient message with automatic expiry. Showing a new
// message replaces the pending expiry timer instead of stacking another
// one, so the newest message always gets its full time on screen and an
// old timer can never hide it early.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, watch};
use tokio_util::sync::CancellationToken;

pub(crate) struct FlashCell {
    inner: Arc<FlashInner>,
    ttl: Duration,
}

struct FlashInner {
    message: watch::Sender<Option<String>>,
    /// Cancels the pending expiry task; replaced on every show.
    pending: Mutex<CancellationToken>,
}

impl FlashInner {
    /// Clear for a fired timer. The lock serializes this against
    /// `show`, which cancels and publishes under the same lock; a timer
    /// whose token was cancelled in the meantime must not touch the
    /// replacement message.
    async fn expire(&self, token: &CancellationToken) {
        let _guard = self.pending.lock().await;
        if !token.is_cancelled() {
            self.message.send_modify(|m| *m = None);
        }
    }
}

impl FlashCell {
    pub(crate) fn new(ttl: Duration) -> Self {
        let (message, _) = watch::channel(None);
        Self {
            inner: Arc::new(FlashInner {
                message,
                pending: Mutex::new(CancellationToken::new()),
            }),
            ttl,
        }
    }

    /// Show `message` now and arm a fresh expiry timer.
    pub(crate) async fn show(&self, message: String) {
        let token = CancellationToken::new();
        // Anchor the deadline here, not at first poll of the task.
        let expiry = tokio::time::sleep(self.ttl);

        {
            let mut pending = self.inner.pending.lock().await;
            pending.cancel();
            *pending = token.clone();
            self.inner.message.send_modify(|m| *m = Some(message));
        }

        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            tokio::select! {
                biased;
                () = token.cancelled() => {}
                () = expiry => inner.expire(&token).await,
            }
        });
    }

    /// Dismiss the current message immediately.
    pub(crate) async fn clear(&self) {
        let pending = self.inner.pending.lock().await;
        pending.cancel();
        self.inner.message.send_modify(|m| *m = None);
    }

    pub(crate) fn snapshot(&self) -> Option<String> {
        self.inner.message.borrow().clone()
    }

    pub(crate) fn subscribe(&self) -> watch::Receiver<Option<String>> {
        self.inner.message.subscribe()
    }
}
