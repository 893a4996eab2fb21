//! Chameleon client shell
//!
//! Main entry point: logging, environment, configuration, context, and
//! application bootstrap.

use std::sync::Arc;

use chameleon_app::{AppBuilder, AppContext, NotifyPlugin, UploaderPlugin};
use chameleon_domain::Result;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging FIRST so we can see .env loading
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load environment variables from .env file
    match dotenvy::dotenv() {
        Ok(path) => info!(path = %path.display(), "Loaded .env"),
        Err(e) => warn!(error = %e, "Could not load .env file"),
    }

    let config = chameleon_infra::config::load()?;
    let ctx = Arc::new(AppContext::new(config)?);

    let app = AppBuilder::new("App")
        .route("/", "home")
        .route("/auth/callback", "auth-callback")
        .plugin(Box::new(NotifyPlugin))
        .plugin(Box::new(UploaderPlugin))
        .build(ctx)?;

    info!(
        root = app.root(),
        base_path = app.base_path(),
        routes = app.routes().len(),
        "chameleon client initialized"
    );

    Ok(())
}
