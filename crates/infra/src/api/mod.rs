//! Typed client for the Chameleon backend API

mod client;

pub use client::*;
