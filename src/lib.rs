//! Yandex Cloud KMS key manager
//!
//! Ensures a symmetric encryption key exists in a configured KMS folder and
//! serves its metadata over a single HTTP endpoint: `GET /key/` lists the
//! folder, creates the key on first call, and returns the record either way.
//!
//! Authentication uses a service-account JWT assertion exchanged at the IAM
//! endpoint for a short-lived bearer token, cached until it nears expiry.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cli;
pub mod config;
pub mod error;
pub mod handler;
pub mod iam;
pub mod kms;
pub mod logging;
pub mod server;

pub use error::{Error, Result};

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Setup tracing/logging.
///
/// `sink_url` optionally installs the remote HTTP log sink; when `None`
/// events only go to stdout.
pub fn setup_tracing(level: &str, format: Option<&str>, sink_url: Option<&str>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let sink = sink_url.map(|url| logging::HttpSinkLayer::new(url.to_string()));

    let subscriber = tracing_subscriber::registry().with(filter).with(sink);

    match format {
        Some("json") => {
            subscriber.with(fmt::layer().json()).init();
        }
        _ => {
            subscriber.with(fmt::layer()).init();
        }
    }

    Ok(())
}
