//! Configuration loader
//!
//! Loads client configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If incomplete, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `CHAMELEON_API_BASE_URL`: Backend base URL (required)
//! - `CHAMELEON_API_TIMEOUT_SECS`: Per-request timeout in seconds
//! - `CHAMELEON_SM2_PUBLIC_KEY`: SM2 public key, uncompressed SEC1 hex
//! - `CHAMELEON_BASE_PATH`: Route base path of the application shell
//!
//! Optional variables fall back to the deployment defaults in
//! `chameleon_domain::constants`.
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./config.json` or `./config.toml` (current working directory)
//! 2. `./chameleon.json` or `./chameleon.toml` (current working directory)
//! 3. `../config.json` or `../config.toml` (parent directory)
//! 4. Relative to executable location

use std::path::{Path, PathBuf};

use chameleon_domain::constants::{
    DEFAULT_BASE_PATH, DEFAULT_REQUEST_TIMEOUT_SECS, SM2_PUBLIC_KEY,
};
use chameleon_domain::{ApiConfig, AppConfig, ChameleonError, Config, CryptoConfig, Result};

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If the required
/// variables are missing, falls back to loading from a config file.
///
/// # Errors
/// Returns `ChameleonError::Config` if:
/// - Configuration cannot be loaded from either source
/// - File format is invalid
/// - Required fields are missing
pub fn load() -> Result<Config> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// `CHAMELEON_API_BASE_URL` must be present; the remaining variables fall
/// back to deployment defaults.
///
/// # Errors
/// Returns `ChameleonError::Config` if the base URL is missing or a
/// numeric variable has an invalid value.
pub fn load_from_env() -> Result<Config> {
    let base_url = env_var("CHAMELEON_API_BASE_URL")?;

    let timeout_seconds = match std::env::var("CHAMELEON_API_TIMEOUT_SECS") {
        Ok(raw) => raw.parse::<u64>().map_err(|e| {
            ChameleonError::Config(format!("Invalid request timeout: {}", e))
        })?,
        Err(_) => DEFAULT_REQUEST_TIMEOUT_SECS,
    };

    let public_key =
        std::env::var("CHAMELEON_SM2_PUBLIC_KEY").unwrap_or_else(|_| SM2_PUBLIC_KEY.to_string());
    let base_path =
        std::env::var("CHAMELEON_BASE_PATH").unwrap_or_else(|_| DEFAULT_BASE_PATH.to_string());

    Ok(Config {
        api: ApiConfig { base_url, timeout_seconds },
        crypto: CryptoConfig { public_key },
        app: AppConfig { base_path },
    })
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Arguments
/// * `path` - Optional path to config file. If `None`, uses
///   [`probe_config_paths`].
///
/// # Errors
/// Returns `ChameleonError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
/// - Required fields are missing
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(ChameleonError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            ChameleonError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| ChameleonError::Config(format!("Failed to read config file: {}", e)))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
///
/// # Errors
/// Returns `ChameleonError::Config` if format is invalid or parsing fails.
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| ChameleonError::Config(format!("Invalid TOML format: {}", e))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| ChameleonError::Config(format!("Invalid JSON format: {}", e))),
        _ => Err(ChameleonError::Config(format!("Unsupported config format: {}", extension))),
    }
}

/// Probe multiple paths for configuration files
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    // Try current working directory
    if let Ok(cwd) = std::env::current_dir() {
        candidates.extend(vec![
            cwd.join("config.json"),
            cwd.join("config.toml"),
            cwd.join("chameleon.json"),
            cwd.join("chameleon.toml"),
            cwd.join("../config.json"),
            cwd.join("../config.toml"),
        ]);
    }

    // Try relative to executable
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.extend(vec![
                exe_dir.join("config.json"),
                exe_dir.join("config.toml"),
                exe_dir.join("chameleon.json"),
                exe_dir.join("chameleon.toml"),
            ]);
        }
    }

    // Return first existing candidate
    candidates.into_iter().find(|path| path.exists())
}

/// Get required environment variable
///
/// # Errors
/// Returns `ChameleonError::Config` if the variable is not set.
fn env_var(key: &str) -> Result<String> {
    std::env::var(key).map_err(|_| {
        ChameleonError::Config(format!("Missing required environment variable: {}", key))
    })
}
