//! REST client for the KMS symmetric-key API.

use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::types::{CreateSymmetricKeyRequest, ListSymmetricKeysResponse, Operation, SymmetricKey};
use crate::iam::TokenProvider;
use crate::{Error, Result};

/// Remote symmetric-key operations used by the request handler.
///
/// The handler depends on this trait rather than the concrete client so
/// tests can substitute a fake in place of the cloud API.
#[async_trait]
pub trait SymmetricKeyApi: Send + Sync {
    /// List the keys of a folder (first page).
    async fn list_keys(&self, folder_id: &str) -> Result<ListSymmetricKeysResponse>;

    /// Create a key; returns the service-side operation handle.
    async fn create_key(&self, request: &CreateSymmetricKeyRequest) -> Result<Operation>;

    /// Fetch a key by id.
    async fn get_key(&self, key_id: &str) -> Result<SymmetricKey>;
}

/// `reqwest`-backed client for the cloud REST endpoint.
///
/// Every call attaches a bearer token from the [`TokenProvider`]; the
/// provider refreshes it transparently when it nears expiry.
pub struct KmsClient {
    http: reqwest::Client,
    base_url: String,
    tokens: Arc<TokenProvider>,
}

impl KmsClient {
    /// Create a client for `base_url` (trailing slashes are stripped).
    #[must_use]
    pub fn new(http: reqwest::Client, base_url: &str, tokens: Arc<TokenProvider>) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            tokens,
        }
    }

    async fn authorized(&self, request: reqwest::RequestBuilder) -> Result<reqwest::RequestBuilder> {
        let token = self.tokens.get_token().await?;
        Ok(request.bearer_auth(token))
    }
}

/// Turn a non-success response into [`Error::Api`], otherwise decode JSON.
async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    if !response.status().is_success() {
        let status = response.status().as_u16();
        let message = response.text().await.unwrap_or_default();
        return Err(Error::Api { status, message });
    }
    Ok(response.json().await?)
}

#[async_trait]
impl SymmetricKeyApi for KmsClient {
    async fn list_keys(&self, folder_id: &str) -> Result<ListSymmetricKeysResponse> {
        let request = self
            .authorized(self.http.get(format!("{}/keys", self.base_url)))
            .await?
            .query(&[("folderId", folder_id)]);

        debug!(folder_id, "listing symmetric keys");
        read_json(request.send().await?).await
    }

    async fn create_key(&self, request: &CreateSymmetricKeyRequest) -> Result<Operation> {
        let builder = self
            .authorized(self.http.post(format!("{}/keys", self.base_url)))
            .await?
            .json(request);

        debug!(name = %request.name, folder_id = %request.folder_id, "creating symmetric key");
        read_json(builder.send().await?).await
    }

    async fn get_key(&self, key_id: &str) -> Result<SymmetricKey> {
        let request = self
            .authorized(self.http.get(format!("{}/keys/{key_id}", self.base_url)))
            .await?;

        debug!(key_id, "fetching symmetric key");
        read_json(request.send().await?).await
    }
}
