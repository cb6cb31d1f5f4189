//! Bookly Core - Core data structures and trait definitions
//!
//! This module defines the shared abstractions for the Bookly client:
//! session and profile types, the error system, configuration, logging,
//! and the key-value store contract used for session persistence.

pub mod config;
pub mod error;
pub mod logging;
pub mod traits;
pub mod types;

pub use error::*;
pub use logging::*;
pub use traits::*;
pub use types::*;

// Re-export commonly used external types
pub use async_trait::async_trait;
pub use tokio;
pub use tracing;
