//! Capability plugins registered onto the application shell at bootstrap.

use chameleon_domain::Result;

use crate::bootstrap::App;

mod notify;
mod uploader;

pub use notify::*;
pub use uploader::*;

/// A capability plugin, registered once before the app is handed out.
pub trait Plugin {
    /// Stable plugin name, used for bookkeeping and logs.
    fn name(&self) -> &'static str;

    /// Install the capability onto the app.
    ///
    /// # Errors
    /// Any error is fatal to startup; the bootstrap propagates it.
    fn register(&self, app: &mut App) -> Result<()>;
}
