#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]
// ErowidClient<B> is meant to be used through ErowidClientPort, not its
// generic structure
#![allow(private_interfaces)]

mod client;
mod config;
mod error;
mod http;
mod models;
mod port;
mod url;

// ============================================================================
// Public API
// ============================================================================

// Client
pub use client::DefaultErowidClient;

// Configuration
pub use config::{DEFAULT_BASE_URL, ErowidClientConfig};

// Errors surfaced by construction
pub use error::ErowidError;
