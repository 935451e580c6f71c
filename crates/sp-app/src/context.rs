use std::sync::Arc;

use serde::Serialize;
use sp_core::{normalize, score, OperationKind, OperationState, StrengthAssessment};
use tokio::sync::watch;

/// Everything the view renders, as one immutable value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormSnapshot {
    pub plain_text: String,
    pub encrypted_text: String,
    pub encrypt: OperationState,
    pub decrypt: OperationState,
    /// Transient "copied" feedback flag.
    pub copied: bool,
    #[serde(skip)]
    in_flight: InFlight,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct InFlight {
    encrypt: u32,
    decrypt: u32,
}

impl InFlight {
    fn slot(&mut self, kind: OperationKind) -> &mut u32 {
        match kind {
            OperationKind::Encrypt => &mut self.encrypt,
            OperationKind::Decrypt => &mut self.decrypt,
        }
    }
}

impl FormSnapshot {
    pub fn operation(&self, kind: OperationKind) -> OperationState {
        match kind {
            OperationKind::Encrypt => self.encrypt,
            OperationKind::Decrypt => self.decrypt,
        }
    }

    fn operation_mut(&mut self, kind: OperationKind) -> &mut OperationState {
        match kind {
            OperationKind::Encrypt => &mut self.encrypt,
            OperationKind::Decrypt => &mut self.decrypt,
        }
    }

    /// Recomputed from the encrypted text on every call.
    pub fn strength(&self) -> StrengthAssessment {
        score(&self.encrypted_text)
    }

    /// The copy action is only enabled with something to copy.
    pub fn can_copy(&self) -> bool {
        !self.encrypted_text.is_empty()
    }
}

/// Shared form state container.
///
/// The single owner of the plain text, encrypted text, per-kind operation
/// states and the copy feedback flag. Use cases mutate it through the entry
/// points below; views read snapshots or [`subscribe`](Self::subscribe) to
/// changes.
///
/// Text written through this container is always normalized, whatever its
/// source (user edit or service result).
pub struct FormContext {
    state: watch::Sender<FormSnapshot>,
}

impl Default for FormContext {
    fn default() -> Self {
        Self::new()
    }
}

impl FormContext {
    pub fn new() -> Self {
        let (state, _) = watch::channel(FormSnapshot::default());
        Self { state }
    }

    /// Returns the context wrapped in Arc for shared ownership.
    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub fn snapshot(&self) -> FormSnapshot {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<FormSnapshot> {
        self.state.subscribe()
    }

    pub fn set_plain_text(&self, raw: &str) {
        let text = normalize(raw);
        self.state.send_modify(|s| s.plain_text = text);
    }

    pub fn set_encrypted_text(&self, raw: &str) {
        let text = normalize(raw);
        self.state.send_modify(|s| s.encrypted_text = text);
    }

    pub fn clear_fields(&self) {
        self.state.send_modify(|s| {
            s.plain_text.clear();
            s.encrypted_text.clear();
        });
    }

    pub fn set_copied(&self, copied: bool) {
        self.state.send_modify(|s| s.copied = copied);
    }

    /// Mark one more `kind` call as outstanding.
    pub fn begin_operation(&self, kind: OperationKind) {
        self.state.send_modify(|s| {
            *s.in_flight.slot(kind) += 1;
            *s.operation_mut(kind) = OperationState::Pending;
        });
    }

    /// Settle one outstanding `kind` call.
    ///
    /// The kind stays `Pending` while other calls of the same kind are still
    /// outstanding; the last one to settle decides the terminal state.
    pub fn finish_operation(&self, kind: OperationKind, outcome: OperationState) {
        self.state.send_modify(|s| {
            let outstanding = s.in_flight.slot(kind);
            *outstanding = outstanding.saturating_sub(1);
            if *outstanding == 0 {
                *s.operation_mut(kind) = outcome;
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_are_normalized() {
        let ctx = FormContext::new();
        ctx.set_plain_text(" my secret ");
        ctx.set_encrypted_text("U2Fs\n dGVk");

        let snapshot = ctx.snapshot();
        assert_eq!(snapshot.plain_text, "mysecret");
        assert_eq!(snapshot.encrypted_text, "U2FsdGVk");
    }

    #[test]
    fn clear_fields_keeps_operation_states() {
        let ctx = FormContext::new();
        ctx.set_plain_text("abc");
        ctx.set_encrypted_text("xyz");
        ctx.begin_operation(OperationKind::Encrypt);

        ctx.clear_fields();

        let snapshot = ctx.snapshot();
        assert!(snapshot.plain_text.is_empty());
        assert!(snapshot.encrypted_text.is_empty());
        assert_eq!(snapshot.encrypt, OperationState::Pending);
    }

    #[test]
    fn kinds_are_tracked_independently() {
        let ctx = FormContext::new();
        ctx.begin_operation(OperationKind::Encrypt);
        ctx.begin_operation(OperationKind::Decrypt);

        ctx.finish_operation(OperationKind::Decrypt, OperationState::Failed);

        let snapshot = ctx.snapshot();
        assert_eq!(snapshot.encrypt, OperationState::Pending);
        assert_eq!(snapshot.decrypt, OperationState::Failed);
    }

    #[test]
    fn overlapping_calls_of_one_kind_stay_pending_until_the_last_settles() {
        let ctx = FormContext::new();
        ctx.begin_operation(OperationKind::Encrypt);
        ctx.begin_operation(OperationKind::Encrypt);

        ctx.finish_operation(OperationKind::Encrypt, OperationState::Succeeded);
        assert_eq!(ctx.snapshot().encrypt, OperationState::Pending);

        ctx.finish_operation(OperationKind::Encrypt, OperationState::Failed);
        assert_eq!(ctx.snapshot().encrypt, OperationState::Failed);
    }

    #[test]
    fn strength_follows_the_encrypted_text() {
        let ctx = FormContext::new();
        assert_eq!(ctx.snapshot().strength().label(), "");
        assert!(!ctx.snapshot().can_copy());

        ctx.set_encrypted_text("Abc12345!");
        assert_eq!(ctx.snapshot().strength().label(), "Very Strong");
        assert!(ctx.snapshot().can_copy());
    }

    #[tokio::test]
    async fn subscribers_observe_changes() {
        let ctx = FormContext::new();
        let mut rx = ctx.subscribe();

        ctx.set_plain_text("hello");

        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().plain_text, "hello");
    }
}
