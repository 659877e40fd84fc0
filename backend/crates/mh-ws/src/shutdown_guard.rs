use crate::ShutdownCoordinator;

use tokio::sync::watch;

/// Waits for a [`ShutdownCoordinator`] signal
pub struct ShutdownGuard {
    shutdown_rx: watch::Receiver<bool>,
}

impl ShutdownGuard {
    pub fn new(coordinator: &ShutdownCoordinator) -> Self {
        Self {
            shutdown_rx: coordinator.subscribe(),
        }
    }

    /// Wait for shutdown signal. Also returns if the coordinator is gone.
    pub async fn wait(&mut self) {
        let _ = self.shutdown_rx.wait_for(|stopped| *stopped).await;
    }

    /// Non-blocking check
    pub fn is_triggered(&self) -> bool {
        *self.shutdown_rx.borrow()
    }
}
