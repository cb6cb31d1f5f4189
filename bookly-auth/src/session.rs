//! Session Manager - holds the signed-in state of the client process
//!
//! The manager owns the current session (token + user profile), persists it
//! through an injected [`KeyValueStore`], and signs users in and out against
//! an injected [`AuthApiClient`]. It is constructed once at process start and
//! shared by cloning; consumers either query it directly or watch the
//! published user through [`SessionManager::subscribe`].

use crate::api::AuthApiClient;
use bookly_core::{BooklyResult, Credentials, Session, UserProfile};
use std::sync::Arc;
use tokio::sync::{watch, RwLock};
use tracing::{debug, info, warn};

/// In-memory session state guarded by the manager's lock
///
/// `session` and `loading` move together: the session is either absent or
/// present with both token and user populated, and `loading` flips to false
/// exactly once, when the startup hydration attempt completes.
struct SessionState {
    session: Option<Session>,
    loading: bool,
}

/// Client-side authentication session manager
///
/// Lifecycle: construct, call [`SessionManager::hydrate`] once to restore any
/// persisted session, then serve sign-in/sign-out and reads for the process
/// lifetime. Failed operations leave the in-memory session unchanged.
#[derive(Clone)]
pub struct SessionManager {
    /// Remote authentication API
    api: Arc<dyn AuthApiClient>,
    /// Persistent key-value store, treated as exclusively owned
    store: Arc<dyn bookly_core::KeyValueStore>,
    /// Current session and readiness flag
    state: Arc<RwLock<SessionState>>,
    /// Publishes the current user to subscribers
    user_tx: Arc<watch::Sender<Option<UserProfile>>>,
    /// Namespaced key holding the raw token text
    token_key: String,
    /// Namespaced key holding the JSON-serialized user profile
    user_key: String,
}

impl SessionManager {
    /// Create a new session manager
    ///
    /// `namespace` is the fixed application prefix for the persisted keys
    /// (e.g. "@Bookly" yields "@Bookly:token" and "@Bookly:user"). The
    /// manager starts in the loading state until [`SessionManager::hydrate`]
    /// completes.
    pub fn new(
        api: Arc<dyn AuthApiClient>,
        store: Arc<dyn bookly_core::KeyValueStore>,
        namespace: &str,
    ) -> Self {
        let (user_tx, _) = watch::channel(None);

        Self {
            api,
            store,
            state: Arc::new(RwLock::new(SessionState {
                session: None,
                loading: true,
            })),
            user_tx: Arc::new(user_tx),
            token_key: format!("{}:token", namespace),
            user_key: format!("{}:user", namespace),
        }
    }

    /// Restore a persisted session, if any
    ///
    /// Reads both namespaced keys from the store. The session becomes present
    /// only when both values exist, are non-empty, and the user profile
    /// deserializes cleanly; a malformed stored profile is logged and treated
    /// as signed out rather than failing startup. The loading flag drops to
    /// false after the first attempt completes, whatever the outcome, and
    /// repeat calls are no-ops.
    pub async fn hydrate(&self) -> BooklyResult<()> {
        {
            let state = self.state.read().await;
            if !state.loading {
                debug!("Session already hydrated, skipping");
                return Ok(());
            }
        }

        let keys = [self.token_key.clone(), self.user_key.clone()];
        let result = self.store.get_many(&keys).await;

        let mut state = self.state.write().await;
        if !state.loading {
            // Another caller finished hydration while we were reading
            return Ok(());
        }

        let values = match result {
            Ok(values) => values,
            Err(e) => {
                // The attempt completed; readiness must not stay pending.
                // The published user is still its initial None, so there is
                // nothing to notify subscribers about.
                state.loading = false;
                return Err(e);
            }
        };

        let token = values.get(&self.token_key).filter(|v| !v.is_empty());
        let user_raw = values.get(&self.user_key).filter(|v| !v.is_empty());

        if let (Some(token), Some(user_raw)) = (token, user_raw) {
            match serde_json::from_str::<UserProfile>(user_raw) {
                Ok(user) => {
                    info!(user_id = %user.id, "Restored persisted session");
                    state.session = Some(Session {
                        token: token.clone(),
                        user,
                    });
                }
                Err(e) => {
                    warn!(
                        error = %e,
                        "Stored user profile is malformed, treating as signed out"
                    );
                }
            }
        } else {
            debug!("No persisted session found");
        }

        state.loading = false;
        self.user_tx
            .send_replace(state.session.as_ref().map(|s| s.user.clone()));

        Ok(())
    }

    /// Sign in against the remote API and persist the resulting session
    ///
    /// On success the token and serialized user are written to the store
    /// (user first, so a persisted token never exists without its user) and
    /// the in-memory session becomes present. On any failure the error
    /// propagates and the in-memory session is left unchanged. No retry.
    pub async fn sign_in(&self, credentials: &Credentials) -> BooklyResult<()> {
        debug!(email = %credentials.email, "Signing in");

        let session = self.api.create_session(credentials).await?;

        let user_json = serde_json::to_string(&session.user)?;
        let entries = [
            (self.user_key.clone(), user_json),
            (self.token_key.clone(), session.token.clone()),
        ];
        self.store.set_many(&entries).await?;

        let mut state = self.state.write().await;
        info!(user_id = %session.user.id, "Signed in");
        state.session = Some(session);
        self.user_tx
            .send_replace(state.session.as_ref().map(|s| s.user.clone()));

        Ok(())
    }

    /// Sign out, removing the persisted session
    ///
    /// Deletes the token key before the user key, then clears the in-memory
    /// session. A storage failure propagates with the in-memory session
    /// unchanged; in that case memory and store may diverge until the caller
    /// retries.
    pub async fn sign_out(&self) -> BooklyResult<()> {
        let keys = [self.token_key.clone(), self.user_key.clone()];
        self.store.delete_many(&keys).await?;

        let mut state = self.state.write().await;
        state.session = None;
        self.user_tx.send_replace(None);

        info!("Signed out");
        Ok(())
    }

    /// The user portion of the current session, if signed in
    pub async fn current_user(&self) -> Option<UserProfile> {
        self.state.read().await.session.as_ref().map(|s| s.user.clone())
    }

    /// The full current session, if signed in
    pub async fn current_session(&self) -> Option<Session> {
        self.state.read().await.session.clone()
    }

    /// Whether the startup hydration attempt is still pending
    pub async fn is_loading(&self) -> bool {
        self.state.read().await.loading
    }

    /// Watch the current user
    ///
    /// The receiver holds the latest published user and wakes on sign-in,
    /// sign-out, and completed hydration.
    pub fn subscribe(&self) -> watch::Receiver<Option<UserProfile>> {
        self.user_tx.subscribe()
    }
}
