//! Stop signal for the accept loop.
//!
//! A `Shutdown` is held by whoever may stop the server (the signal task,
//! tests). The server holds a `ShutdownSignal` and awaits it both while
//! idle in `accept` and while a connection is in flight.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::broadcast;

/// Handle that stops every subscribed server.
#[derive(Debug, Clone)]
pub struct Shutdown {
    tx: broadcast::Sender<()>,
    triggered: Arc<AtomicBool>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self {
            tx,
            triggered: Arc::new(AtomicBool::new(false)),
        }
    }

    /// A signal that fires on the next (or an earlier) `trigger`.
    pub fn subscribe(&self) -> ShutdownSignal {
        ShutdownSignal {
            rx: self.tx.subscribe(),
            triggered: Arc::clone(&self.triggered),
        }
    }

    pub fn trigger(&self) {
        self.triggered.store(true, Ordering::SeqCst);
        let _ = self.tx.send(());
    }

    pub fn is_triggered(&self) -> bool {
        self.triggered.load(Ordering::SeqCst)
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

/// Receiving side of [`Shutdown`].
#[derive(Debug)]
pub struct ShutdownSignal {
    rx: broadcast::Receiver<()>,
    triggered: Arc<AtomicBool>,
}

impl ShutdownSignal {
    /// Resolve once shutdown has been requested.
    ///
    /// Also resolves when every `Shutdown` handle is dropped, since nothing
    /// could stop the server after that.
    pub async fn wait(&mut self) {
        if self.triggered.load(Ordering::SeqCst) {
            return;
        }
        // Ok, Lagged and Closed all mean the sender is done with us
        let _ = self.rx.recv().await;
    }
}
