//! The `/key/` request handler.
//!
//! Each request runs the same sequence against the remote API: list the
//! folder's keys, return the one matching the configured name if present,
//! otherwise create it and fetch the fresh record. Check-before-create is
//! best-effort only — two concurrent first requests can both miss the list
//! and create two keys.

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::kms::{CreateSymmetricKeyRequest, SymmetricAlgorithm, SymmetricKey, SymmetricKeyApi};

/// Rotation period for newly created keys: 25 hours, protobuf duration form.
const ROTATION_PERIOD: &str = "90000s";

/// Description stamped on keys this service creates.
const KEY_DESCRIPTION: &str = "created by KM";

/// Response envelope: exactly one of `Body` / `Error` is populated.
#[derive(Debug, Serialize, Deserialize)]
pub struct KeyResponse {
    /// Success payload — the key record
    #[serde(rename = "Body", skip_serializing_if = "Option::is_none")]
    pub body: Option<SymmetricKey>,
    /// Error description
    #[serde(rename = "Error", skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl KeyResponse {
    fn body(key: SymmetricKey) -> Self {
        Self {
            body: Some(key),
            error: None,
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            body: None,
            error: Some(message.into()),
        }
    }
}

/// Serves `GET /key/` for one configured folder and key name.
pub struct KeyHandler {
    api: Arc<dyn SymmetricKeyApi>,
    folder_id: String,
    key_name: String,
}

impl KeyHandler {
    /// Create a handler ensuring `key_name` exists in `folder_id` through `api`.
    #[must_use]
    pub fn new(api: Arc<dyn SymmetricKeyApi>, folder_id: String, key_name: String) -> Self {
        Self {
            api,
            folder_id,
            key_name,
        }
    }

    /// Run the list → maybe create → get sequence for one request.
    pub async fn ensure_key(&self) -> (StatusCode, KeyResponse) {
        let listing = match self.api.list_keys(&self.folder_id).await {
            Ok(listing) => listing,
            Err(e) => {
                warn!(error = %e, folder_id = %self.folder_id, "listing keys failed");
                return (StatusCode::BAD_REQUEST, KeyResponse::error(e.to_string()));
            }
        };

        if let Some(key) = listing.keys.into_iter().find(|k| k.name == self.key_name) {
            return (StatusCode::OK, KeyResponse::body(key));
        }

        let request = CreateSymmetricKeyRequest {
            folder_id: self.folder_id.clone(),
            name: self.key_name.clone(),
            description: KEY_DESCRIPTION.to_string(),
            default_algorithm: SymmetricAlgorithm::Aes256,
            rotation_period: ROTATION_PERIOD.to_string(),
            deletion_protection: false,
        };

        let operation = match self.api.create_key(&request).await {
            Ok(operation) => operation,
            Err(e) => {
                error!(error = %e, key_name = %self.key_name, "create call failed");
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    KeyResponse::error(e.to_string()),
                );
            }
        };

        if let Some(status) = operation.error {
            error!(operation_id = %operation.id, code = status.code, "key creation failed");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                KeyResponse::error(format!("key creation failed: {}", status.message)),
            );
        }
        if !operation.done {
            error!(operation_id = %operation.id, "bad response from kms: can not create key");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                KeyResponse::error("bad response from kms: can not create key"),
            );
        }

        // A decode failure leaves the id empty; the get below then fails
        // predictably and reports the compounded error.
        let id = match operation.response {
            Some(payload) => match serde_json::from_value::<SymmetricKey>(payload) {
                Ok(key) => key.id,
                Err(e) => {
                    error!(error = %e, "failed to decode created key from operation response");
                    String::new()
                }
            },
            None => {
                error!(operation_id = %operation.id, "operation done without response payload");
                String::new()
            }
        };

        match self.api.get_key(&id).await {
            Ok(key) => {
                info!(key_id = %key.id, key_name = %key.name, "symmetric key created");
                (StatusCode::OK, KeyResponse::body(key))
            }
            Err(e) => {
                error!(error = %e, key_id = %id, "get after create failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    KeyResponse::error(format!("bad request to kms: can not get key: {e}")),
                )
            }
        }
    }
}

/// `GET /key/` — ensure the configured key exists and return its metadata.
pub async fn send_key(State(handler): State<Arc<KeyHandler>>) -> (StatusCode, Json<KeyResponse>) {
    let (status, response) = handler.ensure_key().await;
    (status, Json(response))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::kms::KeyStatus;

    fn sample_key() -> SymmetricKey {
        SymmetricKey {
            id: "abj1234567890".to_string(),
            folder_id: "b1gfolder".to_string(),
            created_at: None,
            name: "app-key".to_string(),
            description: KEY_DESCRIPTION.to_string(),
            status: KeyStatus::Active,
            default_algorithm: SymmetricAlgorithm::Aes256,
            rotation_period: Some(ROTATION_PERIOD.to_string()),
            deletion_protection: false,
        }
    }

    #[test]
    fn success_envelope_has_no_error_field() {
        let value = serde_json::to_value(KeyResponse::body(sample_key())).expect("serialize");
        assert_eq!(value["Body"]["name"], json!("app-key"));
        assert!(value.get("Error").is_none());
    }

    #[test]
    fn error_envelope_has_no_body_field() {
        let value = serde_json::to_value(KeyResponse::error("boom")).expect("serialize");
        assert_eq!(value["Error"], json!("boom"));
        assert!(value.get("Body").is_none());
    }
}
