//! Erowid API client port definitions.
//!
//! The actual implementation lives in `lysergic-erowid`.

mod client;
mod error;

pub use client::ErowidClientPort;
pub use error::{ErowidPortError, ErowidPortResult};
