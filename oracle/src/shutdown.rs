//! Graceful shutdown for the monitor process.
//!
//! The monitor loop is the only consumer, so the stop flag is a single
//! `watch` pair created once at startup: the controller flips it (from an
//! OS signal or programmatically) and the loop checks it at the waiting
//! boundary, so a cycle in flight always completes before the process
//! exits.

use tokio::signal;
use tokio::sync::watch;

/// Receiving half of the stop flag, handed to the monitor loop.
pub struct ShutdownSignal {
    rx: watch::Receiver<bool>,
}

impl ShutdownSignal {
    /// Resolve once shutdown has been triggered.
    ///
    /// A dropped controller also resolves, so losing the signal task
    /// cannot leave the loop running unsupervised.
    pub async fn wait(&mut self) {
        if *self.rx.borrow_and_update() {
            return;
        }
        while self.rx.changed().await.is_ok() {
            if *self.rx.borrow_and_update() {
                return;
            }
        }
    }
}

/// Sending half of the stop flag.
pub struct ShutdownController {
    tx: watch::Sender<bool>,
}

impl ShutdownController {
    /// Create the controller and the one signal the monitor will poll.
    pub fn new() -> (Self, ShutdownSignal) {
        let (tx, rx) = watch::channel(false);
        (Self { tx }, ShutdownSignal { rx })
    }

    /// Trigger shutdown programmatically.
    pub fn trigger(&self) {
        let _ = self.tx.send(true);
    }

    /// Wait for SIGTERM or SIGINT, then trigger shutdown.
    pub async fn wait_for_signal(self) {
        let ctrl_c = signal::ctrl_c();

        #[cfg(unix)]
        let terminate = async {
            signal::unix::signal(signal::unix::SignalKind::terminate())
                .expect("failed to install SIGTERM handler")
                .recv()
                .await;
        };

        #[cfg(not(unix))]
        let terminate = std::future::pending::<()>();

        tokio::select! {
            _ = ctrl_c => { tracing::info!("received SIGINT, stopping monitor"); }
            _ = terminate => { tracing::info!("received SIGTERM, stopping monitor"); }
        }

        self.trigger();
    }
}
