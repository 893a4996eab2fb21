//! Command layer - thin operations over the application context.
//!
//! These are the actions the shell's pages trigger. Field values are
//! encrypted before they leave the client; plaintext never reaches the
//! API client.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use chameleon_domain::{AuthUrl, ChameleonError, Result, Session};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::bootstrap::App;
use crate::context::AppContext;

/// Fetch the GitHub authorize URL to redirect the user to.
///
/// # Errors
/// Network, decode, and backend errors map into domain errors.
pub async fn fetch_github_auth_url(
    ctx: &AppContext,
    cancel: &CancellationToken,
) -> Result<AuthUrl> {
    ctx.api.github_auth_url(cancel).await
}

/// Complete the GitHub login with the authorization code from the
/// callback route. The session token is retained by the API client.
///
/// # Errors
/// `InvalidInput` for an empty code; otherwise network, decode, and
/// backend errors.
pub async fn login_with_github(
    ctx: &AppContext,
    code: &str,
    cancel: &CancellationToken,
) -> Result<Session> {
    ctx.api.github_login(code, cancel).await
}

/// Encrypt a prompt under the configured public key and ask the backend
/// to translate it.
///
/// # Errors
/// `Crypto` when encryption fails (the prompt never leaves the client in
/// that case); otherwise network, decode, and backend errors.
pub async fn translate_prompt(
    ctx: &AppContext,
    prompt: &str,
    cancel: &CancellationToken,
) -> Result<String> {
    let encrypted = ctx.cipher.encrypt(prompt)?;
    debug!(ciphertext_len = encrypted.len(), "prompt encrypted for translation");

    let translation = ctx.api.translate(&encrypted, cancel).await?;
    Ok(translation.en_prompt)
}

/// Encrypt a prompt, upload an image through the uploader capability, and
/// decode the processed result.
///
/// # Errors
/// `Internal` when the uploader plugin is missing, `InvalidInput` for a
/// rejected file or an undecodable result, `Crypto` when encryption
/// fails; otherwise errors from the API client.
pub async fn process_image(
    app: &App,
    image: Vec<u8>,
    filename: &str,
    prompt: &str,
    cancel: &CancellationToken,
) -> Result<Vec<u8>> {
    let uploader = app
        .uploader()
        .ok_or_else(|| ChameleonError::Internal("uploader plugin is not registered".into()))?;

    let encrypted = app.context().cipher.encrypt(prompt)?;
    let processed = uploader.upload(image, filename, &encrypted, cancel).await?;

    BASE64.decode(processed.result.as_bytes()).map_err(|e| {
        ChameleonError::InvalidInput(format!("backend returned an undecodable image: {e}"))
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use base64::Engine as _;
    use chameleon_domain::{ApiConfig, AppConfig, Config, CryptoConfig};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::bootstrap::AppBuilder;
    use crate::plugins::{NotifyPlugin, UploaderPlugin};

    fn context_for(server: &MockServer) -> Arc<AppContext> {
        let config = Config {
            api: ApiConfig { base_url: server.uri(), timeout_seconds: 180 },
            crypto: CryptoConfig::default(),
            app: AppConfig::default(),
        };
        Arc::new(AppContext::new(config).expect("context"))
    }

    #[tokio::test]
    async fn translate_sends_ciphertext_not_plaintext() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/translate"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "en_prompt": "a red fish"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let ctx = context_for(&server);
        let translated = translate_prompt(&ctx, "一条红色的鱼", &CancellationToken::new())
            .await
            .expect("translation");
        assert_eq!(translated, "a red fish");

        let requests = server.received_requests().await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
        let sent = body["prompt"].as_str().unwrap();
        assert_ne!(sent, "一条红色的鱼");
        assert!(sent.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[tokio::test]
    async fn translate_with_an_empty_prompt_never_hits_the_network() {
        let server = MockServer::start().await;
        let ctx = context_for(&server);

        let result = translate_prompt(&ctx, "", &CancellationToken::new()).await;
        match result {
            Err(ChameleonError::Crypto(_)) => {}
            other => panic!("expected crypto error, got {:?}", other),
        }
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn process_image_decodes_the_result() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/process"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "result": BASE64.encode([9u8, 8, 7])
            })))
            .expect(1)
            .mount(&server)
            .await;

        let ctx = context_for(&server);
        ctx.api.set_session_token("jwt-token");
        let app = AppBuilder::new("App")
            .plugin(Box::new(NotifyPlugin))
            .plugin(Box::new(UploaderPlugin))
            .build(ctx)
            .expect("app");

        let bytes = process_image(
            &app,
            vec![1, 2, 3],
            "fish.png",
            "make it bigger",
            &CancellationToken::new(),
        )
        .await
        .expect("processed bytes");

        assert_eq!(bytes, vec![9, 8, 7]);
    }

    #[tokio::test]
    async fn process_image_without_the_uploader_is_an_internal_error() {
        let server = MockServer::start().await;
        let app = AppBuilder::new("App").build(context_for(&server)).expect("app");

        let result =
            process_image(&app, vec![1], "fish.png", "prompt", &CancellationToken::new()).await;
        match result {
            Err(ChameleonError::Internal(msg)) => assert!(msg.contains("uploader")),
            other => panic!("expected internal error, got {:?}", other),
        }
    }
}
