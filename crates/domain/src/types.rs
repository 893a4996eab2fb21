//! Wire types for the backend API
//!
//! Shapes are defined by the backend; this module only mirrors them.
//! Field-level protected values travel as SM2 ciphertext hex strings.

use serde::{Deserialize, Serialize};

/// Response of `GET /api/auth/github`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUrl {
    /// Fully-formed GitHub authorize URL to redirect the user to
    pub auth_url: String,
}

/// Request body of `POST /api/auth/github/callback`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Authorization code returned by GitHub
    pub code: String,
}

/// Response of `POST /api/auth/github/callback`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Bearer token for authenticated endpoints
    pub token: String,
    /// Stable user identifier (GitHub login)
    pub identifier: String,
    #[serde(default)]
    pub message: Option<String>,
}

/// Request body of `POST /api/translate`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslateRequest {
    /// SM2-encrypted prompt, hex encoded
    pub prompt: String,
}

/// Response of `POST /api/translate`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Translation {
    pub en_prompt: String,
}

/// Response of `POST /api/process`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessedImage {
    /// Base64-encoded result image
    pub result: String,
}

/// Error body returned by the backend on non-2xx responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub error: String,
}
