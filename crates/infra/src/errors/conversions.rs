//! Conversions from external infrastructure errors into domain errors.

use chameleon_domain::{ApiErrorBody, ChameleonError};
use reqwest::Error as HttpError;
use reqwest::StatusCode;
use url::ParseError as UrlError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub ChameleonError);

impl From<InfraError> for ChameleonError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<ChameleonError> for InfraError {
    fn from(value: ChameleonError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoChameleonError {
    fn into_chameleon(self) -> ChameleonError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → ChameleonError */
/* -------------------------------------------------------------------------- */

impl IntoChameleonError for HttpError {
    fn into_chameleon(self) -> ChameleonError {
        if self.is_timeout() {
            return ChameleonError::Network("HTTP request timed out".into());
        }

        #[cfg(not(target_arch = "wasm32"))]
        if self.is_connect() {
            return ChameleonError::Network("HTTP connection failure".into());
        }

        if self.is_builder() {
            return ChameleonError::Internal(format!("malformed HTTP request: {self}"));
        }

        if let Some(status) = self.status() {
            return status_to_error(status, None);
        }

        ChameleonError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_chameleon())
    }
}

/* -------------------------------------------------------------------------- */
/* url::ParseError → ChameleonError */
/* -------------------------------------------------------------------------- */

impl IntoChameleonError for UrlError {
    fn into_chameleon(self) -> ChameleonError {
        ChameleonError::Config(format!("invalid URL: {self}"))
    }
}

impl From<UrlError> for InfraError {
    fn from(value: UrlError) -> Self {
        InfraError(value.into_chameleon())
    }
}

/* -------------------------------------------------------------------------- */
/* HTTP status → ChameleonError */
/* -------------------------------------------------------------------------- */

/// Map a non-success response to a domain error, folding the backend's
/// `{"error": ...}` body into the message when one is present.
pub fn error_for_status(status: StatusCode, body: &[u8]) -> ChameleonError {
    let detail = serde_json::from_slice::<ApiErrorBody>(body).map(|b| b.error).ok();
    status_to_error(status, detail)
}

fn status_to_error(status: StatusCode, detail: Option<String>) -> ChameleonError {
    let code = status.as_u16();
    let reason =
        detail.unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown status").to_string());
    let message = format!("HTTP {code}: {reason}");

    match code {
        401 | 403 => ChameleonError::Auth(message),
        404 => ChameleonError::NotFound(message),
        429 => ChameleonError::Network(message),
        400..=499 => ChameleonError::InvalidInput(message),
        500..=599 => ChameleonError::Network(message),
        _ => ChameleonError::Network(message),
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
