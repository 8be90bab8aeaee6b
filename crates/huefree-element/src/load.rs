//! Resource-ready notifications.
//!
//! An image that is still loading owns a [`LoadNotifier`]. Recoloring code
//! that needs the decoded resource takes a [`LoadSignal`] from it and awaits
//! it. The notifier fires at most once; a signal whose resource never loads
//! never resolves.

use std::sync::Arc;

use tokio::sync::watch;

/// Sending side: owned by the resource.
#[derive(Debug, Clone)]
pub struct LoadNotifier {
    tx: Arc<watch::Sender<bool>>,
}

/// Receiving side: resolves once the resource has loaded.
#[derive(Debug)]
pub struct LoadSignal {
    rx: watch::Receiver<bool>,
}

impl LoadNotifier {
    /// A notifier for a resource that is still loading.
    pub fn pending() -> Self {
        let (tx, _) = watch::channel(false);
        Self { tx: Arc::new(tx) }
    }

    /// A notifier for a resource that has already loaded.
    pub fn loaded() -> Self {
        let (tx, _) = watch::channel(true);
        Self { tx: Arc::new(tx) }
    }

    /// Whether the resource has loaded.
    pub fn is_loaded(&self) -> bool {
        *self.tx.borrow()
    }

    /// Mark the resource loaded and wake every waiting signal.
    ///
    /// Returns `false` if it had already been marked.
    pub fn notify_loaded(&self) -> bool {
        self.tx.send_if_modified(|loaded| {
            if *loaded {
                return false;
            }
            *loaded = true;
            true
        })
    }

    /// A signal that resolves once this resource has loaded.
    pub fn subscribe(&self) -> LoadSignal {
        LoadSignal {
            rx: self.tx.subscribe(),
        }
    }
}

impl LoadSignal {
    /// Wait for the resource. Returns immediately if it already loaded.
    pub async fn wait(mut self) {
        if self.rx.wait_for(|loaded| *loaded).await.is_err() {
            // Notifier dropped without ever firing.
            std::future::pending::<()>().await;
        }
    }
}
