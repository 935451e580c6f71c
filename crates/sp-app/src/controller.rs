//! Controller facade
//!
//! The single owner of the form state. Views call the entry points below and
//! render from [`SecurePassController::snapshot`] or a subscription.

use std::sync::Arc;

use anyhow::Result;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info_span, warn, Instrument};

use sp_core::ports::NotifierPort;
use sp_core::{
    check_decrypt, check_encrypt, Notice, OperationKind, OperationState, StrengthAssessment,
    ValidationError,
};

use crate::context::{FormContext, FormSnapshot};
use crate::deps::AppDeps;
use crate::usecases::{CopyEncryptedText, InstallPromptController, RequestOrchestrator};

#[derive(Clone)]
pub struct SecurePassController {
    context: Arc<FormContext>,
    notifier: Arc<dyn NotifierPort>,
    requests: Arc<RequestOrchestrator>,
    copy: Arc<CopyEncryptedText>,
    install: InstallPromptController,
}

impl SecurePassController {
    pub fn new(deps: AppDeps) -> Self {
        let AppDeps {
            encryption_service,
            clipboard,
            install_platform,
            key_value_store,
            notifier,
        } = deps;

        let context = FormContext::new().arc();
        Self {
            requests: Arc::new(RequestOrchestrator::new(
                encryption_service,
                notifier.clone(),
                context.clone(),
            )),
            copy: Arc::new(CopyEncryptedText::new(
                clipboard,
                notifier.clone(),
                context.clone(),
            )),
            install: InstallPromptController::new(
                install_platform,
                key_value_store,
                notifier.clone(),
            ),
            context,
            notifier,
        }
    }

    pub fn snapshot(&self) -> FormSnapshot {
        self.context.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<FormSnapshot> {
        self.context.subscribe()
    }

    pub fn strength(&self) -> StrengthAssessment {
        self.context.snapshot().strength()
    }

    pub fn install(&self) -> &InstallPromptController {
        &self.install
    }

    pub fn edit_plain_text(&self, raw: &str) {
        self.context.set_plain_text(raw);
    }

    pub fn edit_encrypted_text(&self, raw: &str) {
        self.context.set_encrypted_text(raw);
    }

    /// Empty both fields. In-flight requests still write their result.
    pub fn clear_all(&self) {
        debug!("clearing both fields");
        self.context.clear_fields();
    }

    /// Encrypt the current plain text.
    ///
    /// Validation failures emit a warning notice and never reach the remote
    /// service; the operation state is left untouched.
    pub async fn encrypt(&self) -> Result<OperationState, ValidationError> {
        let text = self.context.snapshot().plain_text;
        self.gate(OperationKind::Encrypt, check_encrypt(&text))?;
        Ok(self.requests.run_encrypt(&text).await)
    }

    /// Decrypt the current encrypted text.
    pub async fn decrypt(&self) -> Result<OperationState, ValidationError> {
        let text = self.context.snapshot().encrypted_text;
        self.gate(OperationKind::Decrypt, check_decrypt(&text))?;
        Ok(self.requests.run_decrypt(&text).await)
    }

    fn gate(
        &self,
        kind: OperationKind,
        checked: Result<(), ValidationError>,
    ) -> Result<(), ValidationError> {
        checked.inspect_err(|err| {
            warn!(kind = %kind, error = %err, "validation rejected request");
            self.notifier.notify(Notice::from(err.notice_id()));
        })
    }

    /// Copy the current encrypted text.
    ///
    /// Returns `false` without touching the clipboard when there is nothing
    /// to copy.
    pub async fn copy_encrypted(&self) -> Result<bool> {
        let snapshot = self.context.snapshot();
        if !snapshot.can_copy() {
            debug!("nothing to copy");
            return Ok(false);
        }
        self.copy.copy(&snapshot.encrypted_text).await?;
        Ok(true)
    }

    /// Run [`encrypt`](Self::encrypt) as an independent task.
    pub fn spawn_encrypt(&self) -> JoinHandle<Result<OperationState, ValidationError>> {
        let this = self.clone();
        tokio::spawn(
            async move { this.encrypt().await }.instrument(info_span!("controller.encrypt")),
        )
    }

    pub fn spawn_decrypt(&self) -> JoinHandle<Result<OperationState, ValidationError>> {
        let this = self.clone();
        tokio::spawn(
            async move { this.decrypt().await }.instrument(info_span!("controller.decrypt")),
        )
    }

    pub fn spawn_copy(&self) -> JoinHandle<Result<bool>> {
        let this = self.clone();
        tokio::spawn(
            async move { this.copy_encrypted().await }.instrument(info_span!("controller.copy")),
        )
    }
}
