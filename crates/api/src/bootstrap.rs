//! Application bootstrap
//!
//! Given a root component name and a route table, [`AppBuilder`] constructs
//! the [`App`] instance and registers the capability plugins before the app
//! is handed to the caller. A plugin registration failure is fatal to
//! startup: the error propagates out of [`AppBuilder::build`] untouched.

use std::sync::Arc;

use chameleon_domain::Result;
use tracing::info;

use crate::context::AppContext;
use crate::plugins::{Notifier, Plugin, Uploader};

/// A named route of the application shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub path: String,
    pub name: String,
}

impl Route {
    pub fn new(path: impl Into<String>, name: impl Into<String>) -> Self {
        Self { path: path.into(), name: name.into() }
    }
}

/// Builder for the application shell.
pub struct AppBuilder {
    root: String,
    routes: Vec<Route>,
    plugins: Vec<Box<dyn Plugin>>,
}

impl AppBuilder {
    /// Start building an app around the given root component.
    pub fn new(root: impl Into<String>) -> Self {
        Self { root: root.into(), routes: Vec::new(), plugins: Vec::new() }
    }

    /// Add a route to the table.
    #[must_use]
    pub fn route(mut self, path: impl Into<String>, name: impl Into<String>) -> Self {
        self.routes.push(Route::new(path, name));
        self
    }

    /// Queue a capability plugin for registration.
    #[must_use]
    pub fn plugin(mut self, plugin: Box<dyn Plugin>) -> Self {
        self.plugins.push(plugin);
        self
    }

    /// Construct the app and register every queued plugin, in order.
    ///
    /// # Errors
    /// The first plugin registration failure aborts startup and is
    /// returned as-is.
    pub fn build(self, ctx: Arc<AppContext>) -> Result<App> {
        let base_path = ctx.config.app.base_path.clone();
        let mut app = App {
            ctx,
            root: self.root,
            base_path,
            routes: self.routes,
            installed: Vec::new(),
            notifier: None,
            uploader: None,
        };

        for plugin in &self.plugins {
            plugin.register(&mut app)?;
            app.installed.push(plugin.name());
            info!(plugin = plugin.name(), "plugin registered");
        }

        info!(root = %app.root, routes = app.routes.len(), "application constructed");
        Ok(app)
    }
}

/// The constructed application shell.
pub struct App {
    ctx: Arc<AppContext>,
    root: String,
    base_path: String,
    routes: Vec<Route>,
    installed: Vec<&'static str>,
    notifier: Option<Arc<Notifier>>,
    uploader: Option<Arc<Uploader>>,
}

impl App {
    /// The shared application context.
    pub fn context(&self) -> &Arc<AppContext> {
        &self.ctx
    }

    /// Name of the root component the shell was built around.
    pub fn root(&self) -> &str {
        &self.root
    }

    /// Base path the route table is mounted under.
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// The registered route table.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Names of the plugins registered at build time, in order.
    pub fn installed_plugins(&self) -> &[&'static str] {
        &self.installed
    }

    /// Resolve a request path to a route, honoring the base path.
    pub fn resolve(&self, request_path: &str) -> Option<&Route> {
        let prefix = self.base_path.trim_end_matches('/');
        let local = match request_path.strip_prefix(prefix) {
            Some("") => "/",
            Some(stripped) => stripped,
            None => request_path,
        };
        self.routes.iter().find(|route| route.path == local)
    }

    /// Install the notification capability. Called by `NotifyPlugin`.
    pub fn install_notifier(&mut self, notifier: Arc<Notifier>) {
        self.notifier = Some(notifier);
    }

    /// Install the upload capability. Called by `UploaderPlugin`.
    pub fn install_uploader(&mut self, uploader: Arc<Uploader>) {
        self.uploader = Some(uploader);
    }

    /// The notification surface, when the plugin is registered.
    pub fn notifier(&self) -> Option<&Arc<Notifier>> {
        self.notifier.as_ref()
    }

    /// The upload widget, when the plugin is registered.
    pub fn uploader(&self) -> Option<&Arc<Uploader>> {
        self.uploader.as_ref()
    }
}
