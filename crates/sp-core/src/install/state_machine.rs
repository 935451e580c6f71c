//! Install lifecycle state machine.
//!
//! Defines a pure state transition function for the "add to home screen"
//! offer. Side effects are returned as [`InstallAction`]s and executed by
//! the install prompt controller.

use crate::notice::NoticeId;

/// Delay between capturing the install capability and presenting the offer.
pub const OFFER_DELAY_MS: u64 = 3000;

/// Why no install offer can be made.
///
/// 无法提供安装的原因。
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum UnavailableReason {
    /// No capability observed yet.
    ///
    /// 尚未收到安装能力。
    NoCapability,
    /// The app already runs installed. Terminal.
    ///
    /// 应用已安装（终态）。
    AlreadyInstalled,
}

/// Install lifecycle.
///
/// 安装生命周期。
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum InstallLifecycle {
    Unavailable { reason: UnavailableReason },
    /// Capability captured, offer not yet presented.
    ///
    /// 已捕获安装能力，尚未展示。
    Deferred,
    /// Install affordance presented to the user.
    ///
    /// 正在向用户展示安装入口。
    Offered,
    /// Platform prompt is open; the capability has been handed out.
    ///
    /// 安装提示已打开，等待平台结果。
    Prompting,
    /// Installed through our prompt. Terminal.
    ///
    /// 用户接受安装（终态）。
    Accepted,
    /// User declined; the dismissal is persisted. Terminal.
    ///
    /// 用户拒绝安装（终态）。
    Dismissed,
}

impl Default for InstallLifecycle {
    fn default() -> Self {
        InstallLifecycle::Unavailable {
            reason: UnavailableReason::NoCapability,
        }
    }
}

impl InstallLifecycle {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            InstallLifecycle::Unavailable {
                reason: UnavailableReason::AlreadyInstalled
            } | InstallLifecycle::Accepted
                | InstallLifecycle::Dismissed
        )
    }

    pub fn is_installed(&self) -> bool {
        matches!(
            self,
            InstallLifecycle::Unavailable {
                reason: UnavailableReason::AlreadyInstalled
            } | InstallLifecycle::Accepted
        )
    }

    fn holds_capability(&self) -> bool {
        matches!(self, InstallLifecycle::Deferred | InstallLifecycle::Offered)
    }
}

/// Events that drive the install lifecycle.
///
/// 驱动安装流程的事件。
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum InstallEvent {
    /// Host reports standalone display mode (already installed).
    StandaloneDetected,
    /// Host offers an install capability handle.
    CapabilityAvailable,
    /// The offer delay timer fired.
    OfferDelayElapsed,
    /// User pressed the install action.
    InstallRequested,
    /// Platform prompt closed with acceptance.
    ChoiceAccepted,
    /// Platform prompt closed with dismissal.
    ChoiceDismissed,
    /// Platform prompt could not be shown.
    PromptFailed,
    /// User declined the presented offer.
    OfferDeclined,
    /// Host reports the app got installed.
    AppInstalled,
}

/// Side-effects produced by state transitions.
///
/// 状态迁移产生的副作用。
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum InstallAction {
    CaptureCapability,
    ScheduleOffer { delay_ms: u64 },
    CancelOffer,
    InvokePrompt,
    DiscardCapability,
    PersistDismissal,
    Notify(NoticeId),
}

/// Facts read once when the install flow starts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InstallContext {
    /// Dismissal record present in durable storage.
    pub dismissed: bool,
}

/// Pure install state machine.
///
/// 纯状态机：不包含副作用。
pub struct InstallStateMachine;

impl InstallStateMachine {
    pub fn transition(
        state: InstallLifecycle,
        event: InstallEvent,
        ctx: InstallContext,
    ) -> (InstallLifecycle, Vec<InstallAction>) {
        use InstallAction as A;
        use InstallEvent as E;
        use InstallLifecycle as S;

        if state.is_terminal() {
            return match event {
                E::InstallRequested => (state, vec![A::Notify(NoticeId::InstallUnavailable)]),
                _ => (state, Vec::new()),
            };
        }

        match (state, event) {
            (_, E::StandaloneDetected | E::AppInstalled) => (
                S::Unavailable {
                    reason: UnavailableReason::AlreadyInstalled,
                },
                vec![A::CancelOffer, A::DiscardCapability],
            ),
            (
                S::Unavailable {
                    reason: UnavailableReason::NoCapability,
                },
                E::CapabilityAvailable,
            ) => {
                let mut actions = vec![A::CaptureCapability];
                if !ctx.dismissed {
                    actions.push(A::ScheduleOffer {
                        delay_ms: OFFER_DELAY_MS,
                    });
                }
                (S::Deferred, actions)
            }
            (S::Deferred, E::OfferDelayElapsed) if !ctx.dismissed => (S::Offered, Vec::new()),
            (s, E::InstallRequested) if s.holds_capability() => {
                (S::Prompting, vec![A::CancelOffer, A::InvokePrompt])
            }
            // Only the platform's answer settles an open prompt.
            (S::Prompting, E::InstallRequested | E::OfferDeclined) => (S::Prompting, Vec::new()),
            (S::Prompting, E::ChoiceAccepted) => (
                S::Accepted,
                vec![
                    A::DiscardCapability,
                    A::Notify(NoticeId::InstallAccepted),
                ],
            ),
            (S::Prompting, E::ChoiceDismissed) => (
                S::Dismissed,
                vec![A::PersistDismissal, A::DiscardCapability],
            ),
            (S::Offered, E::OfferDeclined) => (
                S::Dismissed,
                vec![A::CancelOffer, A::PersistDismissal, A::DiscardCapability],
            ),
            (S::Prompting, E::PromptFailed) => (
                S::Unavailable {
                    reason: UnavailableReason::NoCapability,
                },
                vec![
                    A::DiscardCapability,
                    A::Notify(NoticeId::InstallUnavailable),
                ],
            ),
            (s, E::InstallRequested) => (s, vec![A::Notify(NoticeId::InstallUnavailable)]),
            (state, _event) => {
                #[cfg(feature = "tracing")]
                tracing::trace!(?state, event = ?_event, "install event ignored");
                (state, Vec::new())
            }
        }
    }
}
