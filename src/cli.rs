//! Command-line interface

use std::path::PathBuf;

use clap::Parser;

/// Yandex Cloud KMS key manager - ensures a symmetric key exists and serves its metadata
#[derive(Parser, Debug)]
#[command(name = "yc-key-manager")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file (YAML)
    #[arg(short, long, env = "KEY_MANAGER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "KEY_MANAGER_LOG_LEVEL")]
    pub log_level: String,

    /// Log format (text, json)
    #[arg(long, env = "KEY_MANAGER_LOG_FORMAT")]
    pub log_format: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cli = Cli::parse_from(["yc-key-manager"]);
        assert!(cli.config.is_none());
        assert_eq!(cli.log_level, "info");
        assert!(cli.log_format.is_none());
    }

    #[test]
    fn flags_are_parsed() {
        let cli = Cli::parse_from([
            "yc-key-manager",
            "--config",
            "deploy/config.yaml",
            "--log-level",
            "debug",
            "--log-format",
            "json",
        ]);
        assert_eq!(cli.config, Some(PathBuf::from("deploy/config.yaml")));
        assert_eq!(cli.log_level, "debug");
        assert_eq!(cli.log_format.as_deref(), Some("json"));
    }
}
