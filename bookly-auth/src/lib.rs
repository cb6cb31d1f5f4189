//! Bookly Auth - Client-side authentication session management
//!
//! This crate holds the signed-in state of a Bookly client process. It talks
//! to the remote authentication endpoint, persists the session token and user
//! profile through a key-value store, restores them on startup, and publishes
//! the current user to any interested consumer.
//!
//! ## Architecture
//!
//! - [`api`]: the remote authentication API client (one endpoint, `POST sessions`)
//! - [`storage`]: key-value store implementations (file-backed and in-memory)
//! - [`session`]: the [`SessionManager`] tying both together
//!
//! The manager is constructed once at process start with its collaborators
//! injected, then shared by cloning. Components that need session data receive
//! the manager (or a [`session::SessionManager::subscribe`] receiver) instead
//! of looking it up ambiently.

pub mod api;
pub mod session;
pub mod storage;

pub use api::{ApiClientConfig, AuthApiClient, HttpAuthClient};
pub use session::SessionManager;
pub use storage::{FileKeyValueStore, MemoryKeyValueStore};
