//! Configuration management

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Yaml},
};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Default IAM token-exchange endpoint.
pub const DEFAULT_IAM_ENDPOINT: &str = "https://iam.api.cloud.yandex.net/iam/v1/tokens";

/// Default KMS REST base URL.
pub const DEFAULT_KMS_ENDPOINT: &str = "https://kms.api.cloud.yandex.net/kms/v1";

/// Main configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Service account acting as the signing principal
    pub service_account_id: String,

    /// Path to the service account's private RSA key (PEM)
    pub key_file: PathBuf,

    /// Authorized-key id, sent as the `kid` header of the assertion
    pub key_id: String,

    /// Folder the symmetric key lives in
    pub folder_id: String,

    /// Logical name of the key this service ensures exists
    pub key_name: String,

    /// HTTP listen address
    pub address: String,

    /// Optional remote sink for structured logs; empty or absent = disabled
    pub logging_url: Option<String>,

    /// IAM token-exchange URL
    pub iam_endpoint: String,

    /// KMS REST base URL
    pub kms_endpoint: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service_account_id: String::new(),
            key_file: PathBuf::new(),
            key_id: String::new(),
            folder_id: String::new(),
            key_name: String::new(),
            address: "0.0.0.0:8080".to_string(),
            logging_url: None,
            iam_endpoint: DEFAULT_IAM_ENDPOINT.to_string(),
            kms_endpoint: DEFAULT_KMS_ENDPOINT.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from file and environment
    ///
    /// # Errors
    ///
    /// Returns an error if the config file does not exist, cannot be parsed,
    /// or a required setting is missing.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::new();

        // Load from file if provided
        if let Some(p) = path {
            if !p.exists() {
                return Err(Error::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            figment = figment.merge(Yaml::file(p));
        }

        // Merge environment variables (KEY_MANAGER_ prefix)
        figment = figment.merge(Env::prefixed("KEY_MANAGER_"));

        let config: Self = figment
            .extract()
            .map_err(|e| Error::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Reject configurations that cannot identify the signing principal
    /// or the target key.
    fn validate(&self) -> Result<()> {
        for (key, value) in [
            ("service_account_id", &self.service_account_id),
            ("key_id", &self.key_id),
            ("folder_id", &self.folder_id),
            ("key_name", &self.key_name),
        ] {
            if value.is_empty() {
                return Err(Error::Config(format!("missing required setting: {key}")));
            }
        }
        if self.key_file.as_os_str().is_empty() {
            return Err(Error::Config(
                "missing required setting: key_file".to_string(),
            ));
        }
        Ok(())
    }
}
