//! End-to-end flows through the wired app against a mocked service.

use std::path::Path;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use async_trait::async_trait;
use mockito::{Matcher, Server};
use tempfile::TempDir;

use securepass_lib::bootstrap::{self, wire_with_clipboard, ResolvedSettings, WiredApp};
use sp_core::install::{InstallChoice, DISMISSAL_KEY};
use sp_core::ports::{ClipboardPort, InstallCapability};
use sp_core::{InstallLifecycle, NoticeId, OperationState};

#[derive(Default)]
struct MemoryClipboard {
    text: Mutex<Option<String>>,
}

#[async_trait]
impl ClipboardPort for MemoryClipboard {
    async fn write_text(&self, text: &str) -> Result<()> {
        *self.text.lock().unwrap() = Some(text.to_string());
        Ok(())
    }
}

struct DismissingCapability;

#[async_trait]
impl InstallCapability for DismissingCapability {
    async fn prompt(self: Box<Self>) -> Result<InstallChoice> {
        Ok(InstallChoice::Dismissed)
    }
}

fn settings(base_url: String, data_dir: &Path) -> ResolvedSettings {
    ResolvedSettings {
        service_base_url: base_url,
        data_dir: data_dir.to_path_buf(),
        logs_dir: data_dir.join("logs"),
        standalone: false,
    }
}

async fn started_app(base_url: String, data_dir: &Path) -> (WiredApp, Arc<MemoryClipboard>) {
    let clipboard = Arc::new(MemoryClipboard::default());
    let app = wire_with_clipboard(&settings(base_url, data_dir), clipboard.clone()).unwrap();
    bootstrap::start(&app).await.unwrap();
    (app, clipboard)
}

fn active_ids(app: &WiredApp) -> Vec<NoticeId> {
    app.notices.active().into_iter().map(|n| n.id).collect()
}

#[tokio::test]
async fn encrypt_then_copy_round_trip() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/encrypt")
        .match_query(Matcher::UrlEncoded(
            "plainText".into(),
            "my+secret".into(),
        ))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"msg":"encrypted successfully","result":"U2Fs dGVk+X"}"#)
        .create_async()
        .await;
    let data_dir = TempDir::new().unwrap();
    let (app, clipboard) = started_app(format!("{}/api", server.url()), data_dir.path()).await;

    app.controller.edit_plain_text("my +secret");
    let state = app.controller.encrypt().await.unwrap();

    mock.assert_async().await;
    assert_eq!(state, OperationState::Succeeded);
    assert_eq!(app.controller.snapshot().encrypted_text, "U2FsdGVk+X");

    assert!(app.controller.copy_encrypted().await.unwrap());
    assert_eq!(
        clipboard.text.lock().unwrap().as_deref(),
        Some("U2FsdGVk+X")
    );
    assert_eq!(active_ids(&app), vec![NoticeId::CopySucceeded]);
}

#[tokio::test]
async fn invalid_decrypt_shows_one_domain_notice() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/decrypt")
        .match_query(Matcher::Any)
        .with_status(400)
        .with_body(r#"{"msg":"Encrypted text is not valid"}"#)
        .expect(2)
        .create_async()
        .await;
    let data_dir = TempDir::new().unwrap();
    let (app, _clipboard) = started_app(format!("{}/api", server.url()), data_dir.path()).await;

    app.controller.edit_encrypted_text("not-a-cipher");
    app.controller.decrypt().await.unwrap();
    app.controller.decrypt().await.unwrap();

    assert_eq!(app.controller.snapshot().decrypt, OperationState::Failed);
    assert_eq!(active_ids(&app), vec![NoticeId::EncryptedTextInvalid]);
}

#[tokio::test]
async fn non_json_success_is_unexpected() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/encrypt")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("<html>maintenance</html>")
        .create_async()
        .await;
    let data_dir = TempDir::new().unwrap();
    let (app, _clipboard) = started_app(format!("{}/api", server.url()), data_dir.path()).await;

    app.controller.edit_plain_text("abc");
    let state = app.controller.encrypt().await.unwrap();

    assert_eq!(state, OperationState::Failed);
    assert_eq!(active_ids(&app), vec![NoticeId::EncryptUnexpected]);
}

#[tokio::test]
async fn server_error_status_is_a_transport_failure() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/encrypt")
        .match_query(Matcher::Any)
        .with_status(500)
        .with_body(r#"{"msg":"boom"}"#)
        .create_async()
        .await;
    let data_dir = TempDir::new().unwrap();
    let (app, _clipboard) = started_app(format!("{}/api", server.url()), data_dir.path()).await;

    app.controller.edit_plain_text("abc");
    app.controller.encrypt().await.unwrap();

    assert_eq!(active_ids(&app), vec![NoticeId::EncryptServerError]);
}

#[tokio::test]
async fn dismissal_survives_a_restart() {
    let data_dir = TempDir::new().unwrap();

    {
        let (app, _clipboard) =
            started_app("http://127.0.0.1:1/api".into(), data_dir.path()).await;
        let install = app.controller.install().clone();
        let mut lifecycle = install.subscribe_lifecycle();

        assert!(
            app.install_handle
                .capability_available(DismissingCapability)
                .await
        );
        lifecycle
            .wait_for(|state| *state == InstallLifecycle::Deferred)
            .await
            .unwrap();

        assert_eq!(install.request_install().await, InstallLifecycle::Dismissed);
        install.shutdown();
    }

    let stored = std::fs::read_to_string(data_dir.path().join("securepass.json")).unwrap();
    let stored: serde_json::Value = serde_json::from_str(&stored).unwrap();
    assert_eq!(stored[DISMISSAL_KEY], "true");

    tokio::time::pause();
    let (app, _clipboard) = started_app("http://127.0.0.1:1/api".into(), data_dir.path()).await;
    let install = app.controller.install().clone();
    let mut lifecycle = install.subscribe_lifecycle();
    assert!(
        app.install_handle
            .capability_available(DismissingCapability)
            .await
    );
    lifecycle
        .wait_for(|state| *state == InstallLifecycle::Deferred)
        .await
        .unwrap();

    tokio::time::advance(std::time::Duration::from_millis(10_000)).await;
    for _ in 0..10 {
        tokio::task::yield_now().await;
    }
    assert!(!install.is_offered());
    install.shutdown();
}
