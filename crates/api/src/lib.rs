//! # Chameleon App
//!
//! Application shell for the Chameleon client.
//!
//! This crate contains:
//! - The application context (dependency injection)
//! - The bootstrap (route table + capability plugin registration)
//! - The capability plugins (notification surface, file-upload widget)
//! - The command layer (encrypt-then-send operations over the context)
//!
//! ## Architecture
//! - Depends on `chameleon-domain`, `chameleon-core`, and `chameleon-infra`
//! - Wires the layers together and owns the binary entry point

pub mod bootstrap;
pub mod commands;
pub mod context;
pub mod plugins;

// Re-export for convenience
pub use bootstrap::*;
pub use commands::*;
pub use context::*;
pub use plugins::*;
