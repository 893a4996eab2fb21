//! Configuration structures
//!
//! Deserialized from environment variables or a config file by the infra
//! loader. Every field has a deployment default except the API base URL,
//! which must always be provided.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_BASE_PATH, DEFAULT_REQUEST_TIMEOUT_SECS, SM2_PUBLIC_KEY};

/// Top-level client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub api: ApiConfig,
    #[serde(default)]
    pub crypto: CryptoConfig,
    #[serde(default)]
    pub app: AppConfig,
}

/// Request client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the backend (e.g. `https://example.com/chameleon-api`)
    pub base_url: String,
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

/// Field-encryption configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CryptoConfig {
    /// SM2 public key, uncompressed SEC1 hex. Read-only after startup.
    pub public_key: String,
}

/// Application shell configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Route base path the shell is mounted under
    pub base_path: String,
}

impl Default for CryptoConfig {
    fn default() -> Self {
        Self { public_key: SM2_PUBLIC_KEY.to_string() }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self { base_path: DEFAULT_BASE_PATH.to_string() }
    }
}

fn default_timeout_seconds() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_missing_sections() {
        let json = r#"{ "api": { "base_url": "https://example.com/api" } }"#;
        let config: Config = serde_json::from_str(json).expect("valid config");

        assert_eq!(config.api.timeout_seconds, DEFAULT_REQUEST_TIMEOUT_SECS);
        assert_eq!(config.app.base_path, DEFAULT_BASE_PATH);
        assert_eq!(config.crypto.public_key, SM2_PUBLIC_KEY);
    }

    #[test]
    fn explicit_values_override_defaults() {
        let json = r#"{
            "api": { "base_url": "https://example.com/api", "timeout_seconds": 30 },
            "crypto": { "public_key": "04abcd" },
            "app": { "base_path": "/studio/" }
        }"#;
        let config: Config = serde_json::from_str(json).expect("valid config");

        assert_eq!(config.api.timeout_seconds, 30);
        assert_eq!(config.crypto.public_key, "04abcd");
        assert_eq!(config.app.base_path, "/studio/");
    }
}
