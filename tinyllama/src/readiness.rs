use common::protocol::ModelState;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::info;

/// One-shot readiness signal. Moves from `Uninitialized` to `Ready` once and
/// never back.
#[derive(Clone)]
pub struct ReadyGate {
    tx: Arc<watch::Sender<ModelState>>,
}

impl ReadyGate {
    /// Starts uninitialized and flips to ready after `delay`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn after(delay: Duration) -> Self {
        let gate = Self::pending();
        let timer = gate.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            timer.open();
            info!("TinyLlama model initialized");
        });
        gate
    }

    pub fn pending() -> Self {
        let (tx, _rx) = watch::channel(ModelState::Uninitialized);
        Self { tx: Arc::new(tx) }
    }

    pub fn ready() -> Self {
        let gate = Self::pending();
        gate.open();
        gate
    }

    pub fn open(&self) {
        self.tx.send_if_modified(|state| {
            if *state == ModelState::Ready {
                return false;
            }
            *state = ModelState::Ready;
            true
        });
    }

    pub fn state(&self) -> ModelState {
        *self.tx.borrow()
    }

    pub fn is_ready(&self) -> bool {
        self.state() == ModelState::Ready
    }

    pub async fn wait(&self) {
        let mut rx = self.tx.subscribe();
        // The sender lives as long as `self`, so this cannot observe a close.
        let _ = rx.wait_for(|state| *state == ModelState::Ready).await;
    }
}
