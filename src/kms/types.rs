//! Wire types for the KMS symmetric-key REST API.
//!
//! Field names follow the service's camelCase JSON. Only the fields this
//! service reads are modeled; unknown fields are ignored on deserialize.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Symmetric encryption algorithm.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SymmetricAlgorithm {
    /// Algorithm not set
    #[default]
    #[serde(rename = "SYMMETRIC_ALGORITHM_UNSPECIFIED")]
    Unspecified,
    /// AES-128
    #[serde(rename = "AES_128")]
    Aes128,
    /// AES-192
    #[serde(rename = "AES_192")]
    Aes192,
    /// AES-256
    #[serde(rename = "AES_256")]
    Aes256,
}

/// Lifecycle status of a symmetric key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyStatus {
    /// Being created
    #[serde(rename = "CREATING")]
    Creating,
    /// Usable for crypto operations
    #[serde(rename = "ACTIVE")]
    Active,
    /// Temporarily unusable
    #[serde(rename = "INACTIVE")]
    Inactive,
    /// Status not set (or not recognized)
    #[default]
    #[serde(rename = "STATUS_UNSPECIFIED")]
    #[serde(other)]
    Unspecified,
}

/// A symmetric KMS key record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymmetricKey {
    /// Key id
    pub id: String,
    /// Folder the key belongs to
    #[serde(default)]
    pub folder_id: String,
    /// Creation timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// User-assigned name, unique per folder
    #[serde(default)]
    pub name: String,
    /// Free-form description
    #[serde(default)]
    pub description: String,
    /// Lifecycle status
    #[serde(default)]
    pub status: KeyStatus,
    /// Algorithm used for new key versions
    #[serde(default)]
    pub default_algorithm: SymmetricAlgorithm,
    /// Rotation interval, protobuf duration form (e.g. `"90000s"`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation_period: Option<String>,
    /// Whether the service refuses to delete this key
    #[serde(default)]
    pub deletion_protection: bool,
}

/// Response of the key listing call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListSymmetricKeysResponse {
    /// Keys in the requested folder
    #[serde(default)]
    pub keys: Vec<SymmetricKey>,
    /// Continuation token; absent on the last page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
}

/// Parameters of a key creation call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSymmetricKeyRequest {
    /// Target folder
    pub folder_id: String,
    /// Key name
    pub name: String,
    /// Free-form description
    pub description: String,
    /// Algorithm for new versions
    pub default_algorithm: SymmetricAlgorithm,
    /// Rotation interval, protobuf duration form
    pub rotation_period: String,
    /// Deletion protection flag
    pub deletion_protection: bool,
}

/// Error status of a failed operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationError {
    /// gRPC status code
    #[serde(default)]
    pub code: i32,
    /// Human-readable message
    #[serde(default)]
    pub message: String,
}

/// The service's asynchronous handle for key creation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    /// Operation id
    #[serde(default)]
    pub id: String,
    /// Operation description
    #[serde(default)]
    pub description: String,
    /// Completion flag
    #[serde(default)]
    pub done: bool,
    /// Failure status, set instead of `response` when the operation failed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<OperationError>,
    /// The created key, embedded once the operation is done
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn key_deserializes_from_service_json() {
        let key: SymmetricKey = serde_json::from_value(json!({
            "id": "abj1234567890",
            "folderId": "b1gfolder",
            "createdAt": "2024-05-01T10:00:00Z",
            "name": "app-key",
            "description": "created by KM",
            "status": "ACTIVE",
            "defaultAlgorithm": "AES_256",
            "rotationPeriod": "90000s",
            "deletionProtection": false,
            "primaryVersion": {"id": "ignored"}
        }))
        .expect("deserialize");

        assert_eq!(key.id, "abj1234567890");
        assert_eq!(key.name, "app-key");
        assert_eq!(key.status, KeyStatus::Active);
        assert_eq!(key.default_algorithm, SymmetricAlgorithm::Aes256);
        assert_eq!(key.rotation_period.as_deref(), Some("90000s"));
        assert!(!key.deletion_protection);
    }

    #[test]
    fn unknown_status_falls_back_to_unspecified() {
        let key: SymmetricKey = serde_json::from_value(json!({
            "id": "abj1234567890",
            "status": "SCHEDULED_FOR_DESTRUCTION"
        }))
        .expect("deserialize");
        assert_eq!(key.status, KeyStatus::Unspecified);
    }

    #[test]
    fn create_request_serializes_camel_case() {
        let request = CreateSymmetricKeyRequest {
            folder_id: "b1gfolder".to_string(),
            name: "app-key".to_string(),
            description: "created by KM".to_string(),
            default_algorithm: SymmetricAlgorithm::Aes256,
            rotation_period: "90000s".to_string(),
            deletion_protection: false,
        };

        let value = serde_json::to_value(&request).expect("serialize");
        assert_eq!(
            value,
            json!({
                "folderId": "b1gfolder",
                "name": "app-key",
                "description": "created by KM",
                "defaultAlgorithm": "AES_256",
                "rotationPeriod": "90000s",
                "deletionProtection": false
            })
        );
    }

    #[test]
    fn failed_operation_carries_error() {
        let operation: Operation = serde_json::from_value(json!({
            "id": "op123",
            "done": true,
            "error": {"code": 6, "message": "key already exists"}
        }))
        .expect("deserialize");

        assert!(operation.done);
        assert_eq!(operation.error.expect("error").message, "key already exists");
        assert!(operation.response.is_none());
    }
}
