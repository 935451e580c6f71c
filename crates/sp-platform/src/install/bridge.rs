use std::sync::{Arc, Mutex};

use anyhow::Result;
use tokio::sync::mpsc;
use tracing::{debug, info};

use sp_core::ports::{InstallCapability, InstallPlatformPort, InstallSignal};

use super::display_mode::DisplayMode;

const SIGNAL_CHANNEL_CAPACITY: usize = 8;

type Subscriber = Arc<Mutex<Option<mpsc::Sender<InstallSignal>>>>;

/// App-side view of the host install signals.
///
/// At most one subscriber at a time; subscribing again replaces (and closes)
/// the previous subscription.
pub struct HostInstallBridge {
    display_mode: DisplayMode,
    subscriber: Subscriber,
}

/// Host-side sender. Cheap to clone; signals sent while nobody subscribes are
/// dropped.
#[derive(Clone)]
pub struct HostInstallHandle {
    subscriber: Subscriber,
}

impl HostInstallBridge {
    pub fn new(display_mode: DisplayMode) -> Self {
        Self {
            display_mode,
            subscriber: Arc::new(Mutex::new(None)),
        }
    }

    pub fn handle(&self) -> HostInstallHandle {
        HostInstallHandle {
            subscriber: Arc::clone(&self.subscriber),
        }
    }
}

impl InstallPlatformPort for HostInstallBridge {
    fn is_standalone(&self) -> bool {
        self.display_mode.is_standalone()
    }

    fn subscribe(&self) -> Result<mpsc::Receiver<InstallSignal>> {
        let (tx, rx) = mpsc::channel(SIGNAL_CHANNEL_CAPACITY);
        let previous = lock(&self.subscriber).replace(tx);
        if previous.is_some() {
            debug!("previous install subscription replaced");
        }
        Ok(rx)
    }
}

impl HostInstallHandle {
    /// Host observed that installing became possible.
    pub async fn capability_available<C>(&self, capability: C) -> bool
    where
        C: InstallCapability + 'static,
    {
        self.send(InstallSignal::CapabilityAvailable(Box::new(capability)))
            .await
    }

    /// Host observed that the app got installed.
    pub async fn app_installed(&self) -> bool {
        self.send(InstallSignal::AppInstalled).await
    }

    /// Returns whether a subscriber received the signal.
    async fn send(&self, signal: InstallSignal) -> bool {
        let Some(tx) = lock(&self.subscriber).clone() else {
            debug!(?signal, "no install subscriber, signal dropped");
            return false;
        };

        info!(?signal, "forwarding install signal");
        if tx.send(signal).await.is_err() {
            debug!("install subscriber went away");
            // Drop the dead sender unless a newer subscription replaced it.
            let mut current = lock(&self.subscriber);
            if current.as_ref().is_some_and(|cur| cur.same_channel(&tx)) {
                *current = None;
            }
            return false;
        }
        true
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}
