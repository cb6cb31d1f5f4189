//! Core trait definitions

use crate::error::BooklyResult;
use async_trait::async_trait;
use std::collections::HashMap;

/// Asynchronous, persistent, string-keyed storage
///
/// This is the collaborator the session layer persists through. Implementations
/// apply batched entries in the order given; no transactional guarantee across
/// keys is assumed beyond what the backing store provides.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Fetch multiple keys; absent keys are simply missing from the result map
    async fn get_many(&self, keys: &[String]) -> BooklyResult<HashMap<String, String>>;

    /// Store multiple entries, applied in the order given
    async fn set_many(&self, entries: &[(String, String)]) -> BooklyResult<()>;

    /// Remove multiple keys, applied in the order given; missing keys are ignored
    async fn delete_many(&self, keys: &[String]) -> BooklyResult<()>;
}
