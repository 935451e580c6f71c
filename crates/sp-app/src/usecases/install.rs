//! Install prompt controller.
//!
//! Drives the pure [`InstallStateMachine`] from host signals, user actions
//! and the offer delay timer, and executes the actions it returns.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, Weak};

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::Duration;
use tracing::{debug, info, info_span, warn, Instrument};

use sp_core::install::{
    InstallAction, InstallChoice, InstallContext, InstallEvent, InstallLifecycle,
    InstallStateMachine, DISMISSAL_KEY,
};
use sp_core::ports::{
    InstallCapability, InstallPlatformPort, InstallSignal, KeyValueStorePort, NotifierPort,
};
use sp_core::{Notice, NoticeId};

use crate::internal::ResettableTimer;

/// Errors produced by the install prompt controller.
#[derive(Debug, thiserror::Error)]
pub enum InstallError {
    #[error("install prompt controller already started")]
    AlreadyStarted,
    #[error("subscribe to install signals failed: {0}")]
    Subscribe(#[source] anyhow::Error),
}

/// Controller for the "add to home screen" offer.
///
/// ## Behavior / 行为
/// - `start` reads the dismissal record once, then either pins the
///   installed state (standalone host) or listens for host signals
/// - A captured capability is offered after a 3000 ms delay unless the
///   user dismissed a previous offer
/// - `request_install` consumes the capability; it can prompt at most once
/// - While the prompt is open, declines and repeated requests are ignored
///
/// Clones share the same lifecycle.
#[derive(Clone)]
pub struct InstallPromptController {
    inner: Arc<Inner>,
}

struct Inner {
    platform: Arc<dyn InstallPlatformPort>,
    store: Arc<dyn KeyValueStorePort>,
    notifier: Arc<dyn NotifierPort>,
    lifecycle: watch::Sender<InstallLifecycle>,
    dismissed: AtomicBool,
    started: AtomicBool,
    capability: Mutex<Option<Box<dyn InstallCapability>>>,
    offer_timer: ResettableTimer,
    // Serializes transitions; host signals, timer firings and user actions
    // all go through it.
    dispatch_lock: tokio::sync::Mutex<()>,
    commands: mpsc::UnboundedSender<InstallEvent>,
    command_rx: Mutex<Option<mpsc::UnboundedReceiver<InstallEvent>>>,
    listener: Mutex<Option<JoinHandle<()>>>,
}

impl InstallPromptController {
    pub fn new(
        platform: Arc<dyn InstallPlatformPort>,
        store: Arc<dyn KeyValueStorePort>,
        notifier: Arc<dyn NotifierPort>,
    ) -> Self {
        let (lifecycle, _) = watch::channel(InstallLifecycle::default());
        let (commands, command_rx) = mpsc::unbounded_channel();
        Self {
            inner: Arc::new(Inner {
                platform,
                store,
                notifier,
                lifecycle,
                dismissed: AtomicBool::new(false),
                started: AtomicBool::new(false),
                capability: Mutex::new(None),
                offer_timer: ResettableTimer::new("install_offer"),
                dispatch_lock: tokio::sync::Mutex::new(()),
                commands,
                command_rx: Mutex::new(Some(command_rx)),
                listener: Mutex::new(None),
            }),
        }
    }

    /// Read the dismissal record and begin observing the host.
    ///
    /// Must be called from within a tokio runtime.
    pub async fn start(&self) -> Result<(), InstallError> {
        let span = info_span!("usecase.install_prompt.start");
        async {
            if self.inner.started.swap(true, Ordering::SeqCst) {
                return Err(InstallError::AlreadyStarted);
            }

            let dismissed = match self.inner.store.get_flag(DISMISSAL_KEY).await {
                Ok(flag) => flag,
                Err(err) => {
                    warn!(error = %err, "dismissal record unreadable, treating as dismissed");
                    true
                }
            };
            self.inner.dismissed.store(dismissed, Ordering::SeqCst);

            if self.inner.platform.is_standalone() {
                info!("running standalone, install offer disabled");
                self.inner.dispatch(InstallEvent::StandaloneDetected, None).await;
                return Ok(());
            }

            let signals = self
                .inner
                .platform
                .subscribe()
                .map_err(InstallError::Subscribe)?;
            let commands = lock(&self.inner.command_rx)
                .take()
                .ok_or(InstallError::AlreadyStarted)?;

            let handle = tokio::spawn(listen(Arc::downgrade(&self.inner), signals, commands));
            *lock(&self.inner.listener) = Some(handle);

            info!(dismissed, "install prompt controller started");
            Ok(())
        }
        .instrument(span)
        .await
    }

    /// User pressed the install action.
    ///
    /// Returns the lifecycle after the prompt settled (or immediately when
    /// no capability is held). The prompt runs on its own task, so the
    /// platform's answer is applied even if this future is dropped.
    pub async fn request_install(&self) -> InstallLifecycle {
        let span = info_span!("usecase.install_prompt.request_install");
        async {
            let Some(capability) = self
                .inner
                .dispatch(InstallEvent::InstallRequested, None)
                .await
            else {
                return self.lifecycle();
            };

            let inner = Arc::clone(&self.inner);
            let prompt = tokio::spawn(
                async move {
                    let event = match capability.prompt().await {
                        Ok(InstallChoice::Accepted) => InstallEvent::ChoiceAccepted,
                        Ok(InstallChoice::Dismissed) => InstallEvent::ChoiceDismissed,
                        Err(err) => {
                            warn!(error = %err, "install prompt failed");
                            InstallEvent::PromptFailed
                        }
                    };
                    inner.dispatch(event, None).await;
                }
                .in_current_span(),
            );

            if let Err(err) = prompt.await {
                warn!(error = %err, "install prompt task aborted");
                self.inner.dispatch(InstallEvent::PromptFailed, None).await;
            }
            self.lifecycle()
        }
        .instrument(span)
        .await
    }

    /// User declined the presented offer ("not now").
    pub async fn decline_offer(&self) -> InstallLifecycle {
        self.inner.dispatch(InstallEvent::OfferDeclined, None).await;
        self.lifecycle()
    }

    pub fn lifecycle(&self) -> InstallLifecycle {
        *self.inner.lifecycle.borrow()
    }

    pub fn subscribe_lifecycle(&self) -> watch::Receiver<InstallLifecycle> {
        self.inner.lifecycle.subscribe()
    }

    /// Whether the install affordance should be shown. False while the
    /// platform prompt is open.
    pub fn is_offered(&self) -> bool {
        self.lifecycle() == InstallLifecycle::Offered
    }

    /// Stop listening and drop any pending offer.
    pub fn shutdown(&self) {
        if let Some(handle) = lock(&self.inner.listener).take() {
            handle.abort();
        }
        self.inner.offer_timer.cancel();
        debug!("install prompt controller shut down");
    }
}

impl Inner {
    /// Apply one event. Returns the capability to prompt with, if the
    /// transition asked for it.
    async fn dispatch(
        &self,
        event: InstallEvent,
        incoming: Option<Box<dyn InstallCapability>>,
    ) -> Option<Box<dyn InstallCapability>> {
        let _dispatch_guard = self.dispatch_lock.lock().await;

        let span = info_span!("usecase.install_prompt.dispatch", event = ?event);
        async move {
            let mut incoming = incoming;
            let from = *self.lifecycle.borrow();
            let ctx = InstallContext {
                dismissed: self.dismissed.load(Ordering::SeqCst),
            };
            let (next, actions) = InstallStateMachine::transition(from, event, ctx);
            if from != next {
                info!(from = ?from, to = ?next, "install lifecycle transition");
            }

            let mut prompt = None;
            for action in actions {
                debug!(?action, "install executing action");
                match action {
                    InstallAction::CaptureCapability => {
                        *lock(&self.capability) = incoming.take();
                    }
                    InstallAction::ScheduleOffer { delay_ms } => {
                        let commands = self.commands.clone();
                        self.offer_timer
                            .schedule(Duration::from_millis(delay_ms), async move {
                                if commands.send(InstallEvent::OfferDelayElapsed).is_err() {
                                    debug!("install controller gone, offer dropped");
                                }
                            });
                    }
                    InstallAction::CancelOffer => self.offer_timer.cancel(),
                    InstallAction::InvokePrompt => {
                        let held = lock(&self.capability).take();
                        match held {
                            Some(capability) => prompt = Some(capability),
                            None => {
                                warn!("install prompt requested without a held capability");
                                self.notifier
                                    .notify(Notice::from(NoticeId::InstallUnavailable));
                            }
                        }
                    }
                    InstallAction::DiscardCapability => {
                        lock(&self.capability).take();
                    }
                    InstallAction::PersistDismissal => self.persist_dismissal().await,
                    InstallAction::Notify(id) => self.notifier.notify(Notice::from(id)),
                }
            }

            if incoming.is_some() {
                debug!("install capability not captured, dropping it");
            }
            self.lifecycle.send_replace(next);
            prompt
        }
        .instrument(span)
        .await
    }

    async fn persist_dismissal(&self) {
        self.dismissed.store(true, Ordering::SeqCst);
        if let Err(err) = self.store.set(DISMISSAL_KEY, "true").await {
            warn!(error = %err, "failed to persist install dismissal");
        }
    }

    async fn on_signal(&self, signal: InstallSignal) {
        debug!(?signal, "install signal received");
        match signal {
            InstallSignal::CapabilityAvailable(capability) => {
                self.dispatch(InstallEvent::CapabilityAvailable, Some(capability))
                    .await;
            }
            InstallSignal::AppInstalled => {
                self.dispatch(InstallEvent::AppInstalled, None).await;
            }
        }
    }
}

async fn listen(
    inner: Weak<Inner>,
    mut signals: mpsc::Receiver<InstallSignal>,
    mut commands: mpsc::UnboundedReceiver<InstallEvent>,
) {
    let mut signals_open = true;
    loop {
        tokio::select! {
            signal = signals.recv(), if signals_open => match signal {
                Some(signal) => {
                    let Some(inner) = inner.upgrade() else { break };
                    inner.on_signal(signal).await;
                }
                None => {
                    debug!("install signal stream closed");
                    signals_open = false;
                }
            },
            command = commands.recv() => match command {
                Some(event) => {
                    let Some(inner) = inner.upgrade() else { break };
                    inner.dispatch(event, None).await;
                }
                None => break,
            },
        }
    }
    debug!("install listener stopped");
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}
