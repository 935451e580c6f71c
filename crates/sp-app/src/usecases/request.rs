//! Remote encrypt/decrypt requests
//! 远程加密/解密请求

use std::sync::Arc;

use tracing::{info, info_span, warn, Instrument};
use sp_core::ports::{EncryptionServicePort, NotifierPort};
use sp_core::{classify, Notice, OperationKind, OperationState, RemoteOutcome};

use crate::context::FormContext;

/// Issues encrypt/decrypt operations against the remote service.
///
/// ## Behavior / 行为
/// - Marks the operation kind `Pending` before the call
/// - Sends exactly one request, no retries, no client timeout
/// - On success writes the result into the opposite field
/// - On any failure emits one notice whose id depends on the failure category
/// - Always settles the kind into `Succeeded` or `Failed`
///
/// Encrypt and decrypt never share state, so both may be outstanding at once.
/// A request that settles after the inputs changed still writes its result.
pub struct RequestOrchestrator {
    service: Arc<dyn EncryptionServicePort>,
    notifier: Arc<dyn NotifierPort>,
    context: Arc<FormContext>,
}

impl RequestOrchestrator {
    pub fn new(
        service: Arc<dyn EncryptionServicePort>,
        notifier: Arc<dyn NotifierPort>,
        context: Arc<FormContext>,
    ) -> Self {
        Self {
            service,
            notifier,
            context,
        }
    }

    pub async fn run_encrypt(&self, text: &str) -> OperationState {
        self.run(OperationKind::Encrypt, text).await
    }

    pub async fn run_decrypt(&self, text: &str) -> OperationState {
        self.run(OperationKind::Decrypt, text).await
    }

    async fn run(&self, kind: OperationKind, text: &str) -> OperationState {
        let span = info_span!("usecase.request.run", kind = %kind, input_len = text.len());

        async {
            let pending = PendingOperation::begin(&self.context, kind);

            let raw = self.service.request(kind, text).await;
            let outcome = classify(kind, raw);

            let state = match &outcome {
                RemoteOutcome::Success(result) => {
                    match kind {
                        OperationKind::Encrypt => self.context.set_encrypted_text(result),
                        OperationKind::Decrypt => self.context.set_plain_text(result),
                    }
                    info!("remote operation succeeded");
                    OperationState::Succeeded
                }
                RemoteOutcome::DomainInvalid
                | RemoteOutcome::Unexpected
                | RemoteOutcome::Transport(_) => {
                    warn!(?outcome, "remote operation failed");
                    if let Some(id) = outcome.notice(kind) {
                        self.notifier.notify(Notice::from(id));
                    }
                    OperationState::Failed
                }
            };

            pending.settle(state);
            state
        }
        .instrument(span)
        .await
    }
}

/// One outstanding call of `kind`. Settles as `Failed` if dropped before
/// [`settle`](Self::settle), so an abandoned call never pins `Pending`.
struct PendingOperation<'a> {
    context: &'a FormContext,
    kind: OperationKind,
    settled: bool,
}

impl<'a> PendingOperation<'a> {
    fn begin(context: &'a FormContext, kind: OperationKind) -> Self {
        context.begin_operation(kind);
        Self {
            context,
            kind,
            settled: false,
        }
    }

    fn settle(mut self, state: OperationState) {
        self.settled = true;
        self.context.finish_operation(self.kind, state);
    }
}

impl Drop for PendingOperation<'_> {
    fn drop(&mut self) {
        if !self.settled {
            warn!(kind = %self.kind, "remote operation abandoned before it settled");
            self.context.finish_operation(self.kind, OperationState::Failed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use sp_core::{NoticeId, ServiceBody, ServiceResponse, TransportError};
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Mutex;
    use tokio::time::{timeout, Duration};

    /// Never answers the first call; answers every later one.
    struct StallsOnceService {
        stalled: AtomicBool,
        reply: Result<ServiceResponse, TransportError>,
    }

    #[async_trait]
    impl EncryptionServicePort for StallsOnceService {
        async fn request(
            &self,
            _kind: OperationKind,
            _text: &str,
        ) -> Result<ServiceResponse, TransportError> {
            if !self.stalled.swap(true, Ordering::SeqCst) {
                std::future::pending::<()>().await;
            }
            self.reply.clone()
        }
    }

    struct ScriptedService {
        reply: Result<ServiceResponse, TransportError>,
        seen: Mutex<Vec<(OperationKind, String)>>,
    }

    impl ScriptedService {
        fn new(reply: Result<ServiceResponse, TransportError>) -> Arc<Self> {
            Arc::new(Self {
                reply,
                seen: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl EncryptionServicePort for ScriptedService {
        async fn request(
            &self,
            kind: OperationKind,
            text: &str,
        ) -> Result<ServiceResponse, TransportError> {
            self.seen.lock().unwrap().push((kind, text.to_string()));
            self.reply.clone()
        }
    }

    #[derive(Default)]
    struct RecordingNotifier {
        notices: Mutex<Vec<Notice>>,
    }

    impl RecordingNotifier {
        fn ids(&self) -> Vec<NoticeId> {
            self.notices.lock().unwrap().iter().map(|n| n.id).collect()
        }
    }

    impl NotifierPort for RecordingNotifier {
        fn notify(&self, notice: Notice) {
            self.notices.lock().unwrap().push(notice);
        }
    }

    fn ok(status: u16, msg: &str, result: Option<&str>) -> Result<ServiceResponse, TransportError> {
        Ok(ServiceResponse {
            status,
            body: Some(ServiceBody {
                msg: Some(msg.to_string()),
                result: result.map(str::to_string),
            }),
        })
    }

    fn orchestrator(
        service: Arc<ScriptedService>,
    ) -> (RequestOrchestrator, Arc<RecordingNotifier>, Arc<FormContext>) {
        let notifier = Arc::new(RecordingNotifier::default());
        let context = FormContext::new().arc();
        (
            RequestOrchestrator::new(service, notifier.clone(), context.clone()),
            notifier,
            context,
        )
    }

    #[tokio::test]
    async fn encrypt_success_writes_encrypted_text() {
        let service = ScriptedService::new(ok(200, "encrypted successfully", Some("XYZ")));
        let (orchestrator, notifier, context) = orchestrator(service.clone());

        let state = orchestrator.run_encrypt("abc").await;

        assert_eq!(state, OperationState::Succeeded);
        let snapshot = context.snapshot();
        assert_eq!(snapshot.encrypted_text, "XYZ");
        assert_eq!(snapshot.encrypt, OperationState::Succeeded);
        assert_eq!(snapshot.decrypt, OperationState::Idle);
        assert!(notifier.ids().is_empty());
        assert_eq!(
            *service.seen.lock().unwrap(),
            vec![(OperationKind::Encrypt, "abc".to_string())]
        );
    }

    #[tokio::test]
    async fn decrypt_success_writes_plain_text() {
        let service = ScriptedService::new(ok(200, "decrypted successfully", Some("hello")));
        let (orchestrator, _notifier, context) = orchestrator(service);

        let state = orchestrator.run_decrypt("XYZ").await;

        assert_eq!(state, OperationState::Succeeded);
        assert_eq!(context.snapshot().plain_text, "hello");
    }

    #[tokio::test]
    async fn decrypt_of_invalid_text_fires_domain_notice() {
        let service = ScriptedService::new(ok(400, "Encrypted text is not valid", None));
        let (orchestrator, notifier, context) = orchestrator(service);

        let state = orchestrator.run_decrypt("garbage").await;

        assert_eq!(state, OperationState::Failed);
        assert_eq!(context.snapshot().decrypt, OperationState::Failed);
        assert_eq!(notifier.ids(), vec![NoticeId::EncryptedTextInvalid]);
    }

    #[tokio::test]
    async fn unexpected_body_fires_generic_notice() {
        let service = ScriptedService::new(ok(200, "something else", Some("?")));
        let (orchestrator, notifier, context) = orchestrator(service);

        let state = orchestrator.run_encrypt("abc").await;

        assert_eq!(state, OperationState::Failed);
        assert!(context.snapshot().encrypted_text.is_empty());
        assert_eq!(notifier.ids(), vec![NoticeId::EncryptUnexpected]);
    }

    #[tokio::test]
    async fn transport_failure_fires_server_notice() {
        let service =
            ScriptedService::new(Err(TransportError::Connect("connection refused".into())));
        let (orchestrator, notifier, context) = orchestrator(service);

        let state = orchestrator.run_decrypt("XYZ").await;

        assert_eq!(state, OperationState::Failed);
        assert_eq!(context.snapshot().decrypt, OperationState::Failed);
        assert_eq!(notifier.ids(), vec![NoticeId::DecryptServerError]);
    }

    #[tokio::test]
    async fn result_is_normalized_before_it_is_stored() {
        let service = ScriptedService::new(ok(200, "encrypted successfully", Some("AB C\n")));
        let (orchestrator, _notifier, context) = orchestrator(service);

        orchestrator.run_encrypt("abc").await;

        assert_eq!(context.snapshot().encrypted_text, "ABC");
    }

    #[tokio::test(start_paused = true)]
    async fn abandoned_call_does_not_leave_the_kind_pending() {
        let service = Arc::new(StallsOnceService {
            stalled: AtomicBool::new(false),
            reply: ok(200, "encrypted successfully", Some("XYZ")),
        });
        let notifier = Arc::new(RecordingNotifier::default());
        let context = FormContext::new().arc();
        let orchestrator = RequestOrchestrator::new(service, notifier.clone(), context.clone());

        let abandoned = timeout(Duration::from_millis(10), orchestrator.run_encrypt("abc")).await;
        assert!(abandoned.is_err());
        assert_eq!(context.snapshot().encrypt, OperationState::Failed);

        let state = orchestrator.run_encrypt("abc").await;

        assert_eq!(state, OperationState::Succeeded);
        assert_eq!(context.snapshot().encrypt, OperationState::Succeeded);
        assert_eq!(context.snapshot().encrypted_text, "XYZ");
        assert!(notifier.ids().is_empty());
    }
}
