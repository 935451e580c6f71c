//! HTTP client for the remote encryption service
//!
//! `GET {base}/encrypt?plainText=..` and `GET {base}/decrypt?encryptedText=..`.
//! Query values are percent-encoded, so a `+` in the text reaches the
//! service as `%2B` instead of a space.

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};

use sp_core::ports::EncryptionServicePort;
use sp_core::{OperationKind, ServiceBody, ServiceResponse, TransportError};

/// Service location used when none is configured.
pub const DEFAULT_SERVICE_BASE_URL: &str = "http://localhost:3000/api";

pub struct HttpEncryptionService {
    client: Client,
    base_url: String,
}

impl HttpEncryptionService {
    /// Build a client without a request timeout; a slow service keeps the
    /// operation pending until it answers or the connection drops.
    pub fn new(base_url: impl Into<String>) -> anyhow::Result<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to build HTTP client: {}", e))?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, kind: OperationKind) -> String {
        format!("{}/{}", self.base_url, kind.endpoint())
    }
}

#[async_trait]
impl EncryptionServicePort for HttpEncryptionService {
    async fn request(
        &self,
        kind: OperationKind,
        text: &str,
    ) -> Result<ServiceResponse, TransportError> {
        let url = self.endpoint(kind);
        debug!(%url, kind = %kind, "sending request to encryption service");

        let response = self
            .client
            .get(&url)
            .query(&[(kind.query_param(), text)])
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status().as_u16();
        let bytes = response.bytes().await.map_err(map_transport_error)?;
        let body = match serde_json::from_slice::<ServiceBody>(&bytes) {
            Ok(body) => Some(body),
            Err(err) => {
                warn!(status, error = %err, "service reply is not a JSON body");
                None
            }
        };

        debug!(status, "encryption service replied");
        Ok(ServiceResponse { status, body })
    }
}

fn map_transport_error(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout
    } else if err.is_connect() {
        TransportError::Connect(err.to_string())
    } else {
        TransportError::Other(err.to_string())
    }
}
