//! Typed endpoint wrappers over [`HttpClient`].
//!
//! One method per backend route. Request and response bodies are the
//! domain wire types; every body goes through [`parse_json`], and backend
//! `{"error": ...}` payloads come back as typed domain errors.
//!
//! The bearer token returned by the login callback is retained for the
//! authenticated upload endpoint. That token is the only mutable state in
//! the client.

use chameleon_domain::{
    ApiConfig, AuthUrl, ChameleonError, LoginRequest, ProcessedImage, Result, Session,
    TranslateRequest, Translation,
};
use parking_lot::RwLock;
use reqwest::multipart::{Form, Part};
use reqwest::Method;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::http::{parse_json, HttpClient};

/// Client for the Chameleon backend API.
pub struct ApiClient {
    http: HttpClient,
    session_token: RwLock<Option<String>>,
}

impl ApiClient {
    /// Build the client from the API configuration.
    ///
    /// # Errors
    /// Returns `ChameleonError::Config` if the base URL is invalid.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        Ok(Self { http: HttpClient::from_config(config)?, session_token: RwLock::new(None) })
    }

    /// The retained bearer token, when logged in.
    pub fn session_token(&self) -> Option<String> {
        self.session_token.read().clone()
    }

    /// Replace the retained bearer token.
    pub fn set_session_token(&self, token: impl Into<String>) {
        *self.session_token.write() = Some(token.into());
    }

    /// Drop the retained bearer token.
    pub fn clear_session(&self) {
        *self.session_token.write() = None;
    }

    /// `GET /api/auth/github`: fetch the GitHub authorize URL.
    ///
    /// # Errors
    /// Network, decode, and backend errors map into domain errors.
    pub async fn github_auth_url(&self, cancel: &CancellationToken) -> Result<AuthUrl> {
        let request = self.http.request(Method::GET, "/api/auth/github");
        let response = self.http.send_with_cancel(request, cancel).await?;
        parse_json(response).await
    }

    /// `POST /api/auth/github/callback`: exchange the authorization code
    /// for a session. The returned bearer token is retained.
    ///
    /// # Errors
    /// `ChameleonError::InvalidInput` for an empty code; otherwise network,
    /// decode, and backend errors.
    pub async fn github_login(&self, code: &str, cancel: &CancellationToken) -> Result<Session> {
        if code.is_empty() {
            return Err(ChameleonError::InvalidInput("authorization code is empty".into()));
        }

        let request = self
            .http
            .request(Method::POST, "/api/auth/github/callback")
            .json(&LoginRequest { code: code.to_string() });
        let response = self.http.send_with_cancel(request, cancel).await?;
        let session: Session = parse_json(response).await?;

        *self.session_token.write() = Some(session.token.clone());
        info!(identifier = %session.identifier, "session established");
        Ok(session)
    }

    /// `POST /api/translate`: translate an SM2-encrypted prompt.
    ///
    /// The prompt must already be encrypted; this client never sends
    /// plaintext prompt material.
    ///
    /// # Errors
    /// Network, decode, and backend errors map into domain errors.
    pub async fn translate(
        &self,
        encrypted_prompt: &str,
        cancel: &CancellationToken,
    ) -> Result<Translation> {
        let request = self
            .http
            .request(Method::POST, "/api/translate")
            .json(&TranslateRequest { prompt: encrypted_prompt.to_string() });
        let response = self.http.send_with_cancel(request, cancel).await?;
        parse_json(response).await
    }

    /// `POST /api/process`: upload an image plus an SM2-encrypted prompt
    /// and receive the processed image (base64).
    ///
    /// # Errors
    /// `ChameleonError::Auth` when called before login; otherwise network,
    /// decode, and backend errors.
    pub async fn process_image(
        &self,
        image: Vec<u8>,
        filename: &str,
        encrypted_prompt: &str,
        cancel: &CancellationToken,
    ) -> Result<ProcessedImage> {
        let token = self.session_token().ok_or_else(|| {
            ChameleonError::Auth("image processing requires a session; log in first".into())
        })?;

        debug!(filename, bytes = image.len(), "uploading image for processing");

        let part = Part::bytes(image).file_name(filename.to_string());
        let form =
            Form::new().part("image", part).text("prompt", encrypted_prompt.to_string());
        let request = self
            .http
            .request(Method::POST, "/api/process")
            .bearer_auth(token)
            .multipart(form);
        let response = self.http.send_with_cancel(request, cancel).await?;
        parse_json(response).await
    }
}
