//! Copy the encrypted text to the system clipboard
//! 复制加密文本到系统剪贴板

use std::sync::Arc;

use anyhow::Result;
use tokio::time::Duration;
use tracing::{info, info_span, warn, Instrument};
use sp_core::ports::{ClipboardPort, NotifierPort};
use sp_core::{Notice, NoticeId};

use crate::context::FormContext;
use crate::internal::ResettableTimer;

/// How long the "copied" feedback flag stays raised.
pub const COPY_FEEDBACK_MS: u64 = 2000;

/// Use case for copying text to the system clipboard.
///
/// ## Behavior / 行为
/// - Success: raises the `copied` flag, emits a success notice and lowers the
///   flag after [`COPY_FEEDBACK_MS`]. A new copy restarts the window.
/// - Failure: emits an error notice; the flag stays down.
///
/// Callers must not invoke it while the encrypted text is empty.
pub struct CopyEncryptedText {
    clipboard: Arc<dyn ClipboardPort>,
    notifier: Arc<dyn NotifierPort>,
    context: Arc<FormContext>,
    feedback_timer: ResettableTimer,
}

impl CopyEncryptedText {
    pub fn new(
        clipboard: Arc<dyn ClipboardPort>,
        notifier: Arc<dyn NotifierPort>,
        context: Arc<FormContext>,
    ) -> Self {
        Self {
            clipboard,
            notifier,
            context,
            feedback_timer: ResettableTimer::new("copy_feedback"),
        }
    }

    pub async fn copy(&self, text: &str) -> Result<()> {
        let span = info_span!("usecase.copy_encrypted_text.copy", text_len = text.len());

        async {
            if let Err(err) = self.clipboard.write_text(text).await {
                warn!(error = %err, "clipboard write failed");
                self.notifier.notify(Notice::from(NoticeId::CopyFailed));
                return Err(err);
            }

            let context = Arc::clone(&self.context);
            self.feedback_timer
                .schedule(Duration::from_millis(COPY_FEEDBACK_MS), async move {
                    context.set_copied(false);
                });
            self.context.set_copied(true);
            self.notifier.notify(Notice::from(NoticeId::CopySucceeded));

            info!("text copied to clipboard");
            Ok(())
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use mockall::mock;
    use std::sync::Mutex;
    use tokio::time::advance;

    mock! {
        Clipboard {}

        #[async_trait]
        impl ClipboardPort for Clipboard {
            async fn write_text(&self, text: &str) -> Result<()>;
        }
    }

    #[derive(Default)]
    struct RecordingNotifier {
        ids: Mutex<Vec<NoticeId>>,
    }

    impl NotifierPort for RecordingNotifier {
        fn notify(&self, notice: Notice) {
            self.ids.lock().unwrap().push(notice.id);
        }
    }

    fn use_case(
        clipboard: MockClipboard,
    ) -> (CopyEncryptedText, Arc<RecordingNotifier>, Arc<FormContext>) {
        let notifier = Arc::new(RecordingNotifier::default());
        let context = FormContext::new().arc();
        (
            CopyEncryptedText::new(Arc::new(clipboard), notifier.clone(), context.clone()),
            notifier,
            context,
        )
    }

    async fn settle() {
        for _ in 0..5 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn successful_copy_raises_flag_for_two_seconds() {
        let mut clipboard = MockClipboard::new();
        clipboard
            .expect_write_text()
            .withf(|text| text.to_string() == "XYZ")
            .times(1)
            .returning(|_| Ok(()));
        let (use_case, notifier, context) = use_case(clipboard);

        use_case.copy("XYZ").await.unwrap();

        assert!(context.snapshot().copied);
        assert_eq!(*notifier.ids.lock().unwrap(), vec![NoticeId::CopySucceeded]);

        advance(Duration::from_millis(1999)).await;
        settle().await;
        assert!(context.snapshot().copied);

        advance(Duration::from_millis(1)).await;
        settle().await;
        assert!(!context.snapshot().copied);
    }

    #[tokio::test(start_paused = true)]
    async fn second_copy_restarts_the_window() {
        let mut clipboard = MockClipboard::new();
        clipboard.expect_write_text().times(2).returning(|_| Ok(()));
        let (use_case, _notifier, context) = use_case(clipboard);

        use_case.copy("XYZ").await.unwrap();
        advance(Duration::from_millis(1500)).await;
        use_case.copy("XYZ").await.unwrap();

        advance(Duration::from_millis(1500)).await;
        settle().await;
        assert!(context.snapshot().copied, "window must restart, not shorten");

        advance(Duration::from_millis(500)).await;
        settle().await;
        assert!(!context.snapshot().copied);
    }

    #[tokio::test]
    async fn failed_copy_notifies_and_keeps_flag_down() {
        let mut clipboard = MockClipboard::new();
        clipboard
            .expect_write_text()
            .returning(|_| Err(anyhow::anyhow!("clipboard unavailable")));
        let (use_case, notifier, context) = use_case(clipboard);

        let result = use_case.copy("XYZ").await;

        assert!(result.is_err());
        assert!(!context.snapshot().copied);
        assert_eq!(*notifier.ids.lock().unwrap(), vec![NoticeId::CopyFailed]);
    }
}
