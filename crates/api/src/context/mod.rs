//! Application context - dependency injection container

use std::sync::Arc;

use chameleon_core::FieldCipher;
use chameleon_domain::{Config, Result};
use chameleon_infra::ApiClient;

/// Application context - holds all services and dependencies
pub struct AppContext {
    pub config: Config,
    pub api: Arc<ApiClient>,
    pub cipher: Arc<FieldCipher>,
}

impl AppContext {
    /// Construct the context from loaded configuration.
    ///
    /// Builds the process-wide API client and the field cipher. Both live
    /// for the lifetime of the process.
    ///
    /// # Errors
    /// Returns `ChameleonError::Config` for an invalid base URL and
    /// `ChameleonError::Crypto` for an empty public key.
    pub fn new(config: Config) -> Result<Self> {
        let api = Arc::new(ApiClient::new(&config.api)?);
        let cipher = Arc::new(FieldCipher::from_config(&config.crypto)?);

        Ok(Self { config, api, cipher })
    }
}

#[cfg(test)]
mod tests {
    use chameleon_domain::{ApiConfig, AppConfig, CryptoConfig};

    use super::*;

    #[test]
    fn builds_from_valid_configuration() {
        let config = Config {
            api: ApiConfig { base_url: "https://example.com/api".into(), timeout_seconds: 180 },
            crypto: CryptoConfig::default(),
            app: AppConfig::default(),
        };

        let ctx = AppContext::new(config).expect("context");
        assert_eq!(ctx.cipher.public_key(), CryptoConfig::default().public_key);
    }

    #[test]
    fn rejects_an_invalid_base_url() {
        let config = Config {
            api: ApiConfig { base_url: "not a url".into(), timeout_seconds: 180 },
            crypto: CryptoConfig::default(),
            app: AppConfig::default(),
        };

        assert!(AppContext::new(config).is_err());
    }
}
