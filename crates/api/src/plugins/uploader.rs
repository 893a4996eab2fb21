//! File-upload widget capability.
//!
//! Validates a file locally (extension and size, same limits the backend
//! enforces) before handing it to the authenticated processing endpoint.
//! The prompt passed in must already be SM2-encrypted; the uploader never
//! sees plaintext prompt material.

use std::path::Path;
use std::sync::Arc;

use chameleon_domain::constants::{ALLOWED_UPLOAD_EXTENSIONS, MAX_UPLOAD_BYTES};
use chameleon_domain::{ChameleonError, ProcessedImage, Result};
use chameleon_infra::ApiClient;
use tokio_util::sync::CancellationToken;

use crate::bootstrap::App;
use crate::plugins::Plugin;

/// Upload widget bound to the backend API client.
pub struct Uploader {
    api: Arc<ApiClient>,
}

impl Uploader {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    /// Check a candidate file against the accepted extensions and the
    /// size limit, without touching the network.
    ///
    /// # Errors
    /// Returns `ChameleonError::InvalidInput` describing the rejection.
    pub fn validate(filename: &str, size: usize) -> Result<()> {
        let extension = Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        match extension {
            Some(ext) if ALLOWED_UPLOAD_EXTENSIONS.contains(&ext.as_str()) => {}
            _ => {
                return Err(ChameleonError::InvalidInput(format!(
                    "unsupported file type: {filename}"
                )));
            }
        }

        if size == 0 {
            return Err(ChameleonError::InvalidInput("upload is empty".into()));
        }
        if size > MAX_UPLOAD_BYTES {
            return Err(ChameleonError::InvalidInput(format!(
                "upload exceeds the {MAX_UPLOAD_BYTES} byte limit"
            )));
        }

        Ok(())
    }

    /// Validate and upload an image for processing.
    ///
    /// # Errors
    /// Local validation failures are `InvalidInput`; the rest come from
    /// the API client (`Auth` before login, `Network`, backend errors).
    pub async fn upload(
        &self,
        image: Vec<u8>,
        filename: &str,
        encrypted_prompt: &str,
        cancel: &CancellationToken,
    ) -> Result<ProcessedImage> {
        Self::validate(filename, image.len())?;
        self.api.process_image(image, filename, encrypted_prompt, cancel).await
    }
}

/// Registers the [`Uploader`] capability.
pub struct UploaderPlugin;

impl Plugin for UploaderPlugin {
    fn name(&self) -> &'static str {
        "uploader"
    }

    fn register(&self, app: &mut App) -> Result<()> {
        let api = app.context().api.clone();
        app.install_uploader(Arc::new(Uploader::new(api)));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_the_backend_image_types() {
        assert!(Uploader::validate("cat.png", 1024).is_ok());
        assert!(Uploader::validate("cat.JPG", 1024).is_ok());
        assert!(Uploader::validate("cat.jpeg", 1024).is_ok());
    }

    #[test]
    fn rejects_other_extensions() {
        assert!(Uploader::validate("cat.gif", 1024).is_err());
        assert!(Uploader::validate("cat", 1024).is_err());
        assert!(Uploader::validate("cat.png.exe", 1024).is_err());
    }

    #[test]
    fn rejects_empty_and_oversized_uploads() {
        assert!(Uploader::validate("cat.png", 0).is_err());
        assert!(Uploader::validate("cat.png", MAX_UPLOAD_BYTES + 1).is_err());
        assert!(Uploader::validate("cat.png", MAX_UPLOAD_BYTES).is_ok());
    }
}
