//! Core data type definitions

use serde::{Deserialize, Serialize};

/// User profile as returned by the Bookly API
///
/// This is the record persisted alongside the session token and exposed to
/// consumers while a user is signed in. The password never appears here; the
/// server strips it before responding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    pub avatar_url: Option<String>,
}

/// Sign-in credentials sent to the authentication endpoint
///
/// No local validation is performed; the server is the authority on whether
/// a credential pair is acceptable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

/// An authenticated session: token and user profile as a pair
///
/// A session is either absent (no authenticated user) or present with both
/// fields populated. The two are always set and cleared together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: UserProfile,
}

/// Top-level client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BooklyConfig {
    pub api: ApiConfig,
    pub storage: StorageConfig,
}

/// Remote API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the Bookly API
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
    /// User agent string
    pub user_agent: String,
}

/// Persistent storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding persisted key-value entries
    pub data_dir: String,
    /// Application prefix for persisted keys (e.g. "@Bookly")
    pub namespace: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_profile_text_roundtrip() {
        let user = UserProfile {
            id: "1".to_string(),
            name: "Ana".to_string(),
            email: "a@b.com".to_string(),
            avatar_url: Some("https://cdn.bookly.app/avatars/1.png".to_string()),
        };

        let text = serde_json::to_string(&user).unwrap();
        let restored: UserProfile = serde_json::from_str(&text).unwrap();
        assert_eq!(restored, user);
    }

    #[test]
    fn test_user_profile_missing_avatar_deserializes() {
        let restored: UserProfile =
            serde_json::from_str(r#"{"id":"1","name":"Ana","email":"a@b.com"}"#).unwrap();
        assert_eq!(restored.avatar_url, None);
    }

    #[test]
    fn test_session_pairs_token_and_user() {
        let session = Session {
            token: "tok123".to_string(),
            user: UserProfile {
                id: "1".to_string(),
                name: "Ana".to_string(),
                email: "a@b.com".to_string(),
                avatar_url: None,
            },
        };

        let text = serde_json::to_string(&session).unwrap();
        let restored: Session = serde_json::from_str(&text).unwrap();
        assert_eq!(restored, session);
    }
}
