use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Session tokens issued by the hosted backend on sign-in
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionToken {
    /// Access token sent with note API requests
    pub access_token: String,

    /// Optional refresh token for session renewal
    pub refresh_token: Option<String>,

    /// Token expiration timestamp (Unix timestamp)
    pub expires_at: i64,
}

impl SessionToken {
    /// Check if the token needs refresh (within 5 minutes of expiry)
    pub fn needs_refresh(&self) -> bool {
        let now = chrono::Utc::now().timestamp();
        now >= self.expires_at - 300 // 5 minute buffer
    }

    /// Check if the token is expired
    pub fn is_expired(&self) -> bool {
        let now = chrono::Utc::now().timestamp();
        now >= self.expires_at
    }
}

/// File-based persistence for the backend session.
/// The session is stored in the user's config directory so a restarted app
/// can resume without a fresh sign-in.
pub struct SessionStorage;

impl SessionStorage {
    /// Get the session file path
    fn session_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to get config directory")?
            .join("textsnap")
            .join("session");

        // Ensure directory exists
        fs::create_dir_all(&config_dir).context("Failed to create session directory")?;

        Ok(config_dir.join("session.json"))
    }

    /// Persist the session token
    pub fn store(token: &SessionToken) -> Result<()> {
        let path = Self::session_path()?;

        let json =
            serde_json::to_string_pretty(token).context("Failed to serialize session token")?;

        fs::write(&path, &json).context("Failed to write session file")?;

        tracing::info!("Stored session token at {:?}", path);
        Ok(())
    }

    /// Retrieve the persisted session token
    pub fn retrieve() -> Result<SessionToken> {
        let path = Self::session_path()?;

        let json = fs::read_to_string(&path).context("Failed to read session file")?;

        let token: SessionToken =
            serde_json::from_str(&json).context("Failed to deserialize session token")?;

        tracing::info!("Retrieved persisted session token");
        Ok(token)
    }

    /// Delete the persisted session (sign-out)
    pub fn delete() -> Result<()> {
        let path = Self::session_path()?;

        if path.exists() {
            fs::remove_file(&path).context("Failed to delete session file")?;
            tracing::info!("Deleted persisted session token");
        }

        Ok(())
    }

    /// Check if a persisted session exists and is usable
    pub fn has_session() -> bool {
        Self::retrieve().map(|t| !t.is_expired()).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_token_expiry() {
        let now = chrono::Utc::now().timestamp();

        // Expired token
        let expired = SessionToken {
            access_token: "test".to_string(),
            refresh_token: None,
            expires_at: now - 3600, // 1 hour ago
        };
        assert!(expired.is_expired());
        assert!(expired.needs_refresh());

        // Valid token
        let valid = SessionToken {
            access_token: "test".to_string(),
            refresh_token: None,
            expires_at: now + 3600, // 1 hour from now
        };
        assert!(!valid.is_expired());
        assert!(!valid.needs_refresh());

        // Valid but near expiry: refresh window
        let near_expiry = SessionToken {
            access_token: "test".to_string(),
            refresh_token: Some("refresh".to_string()),
            expires_at: now + 60, // 1 minute from now
        };
        assert!(!near_expiry.is_expired());
        assert!(near_expiry.needs_refresh());
    }

    #[test]
    fn test_token_serde_round_trip() {
        let token = SessionToken {
            access_token: "abc".to_string(),
            refresh_token: Some("def".to_string()),
            expires_at: 1_700_000_000,
        };

        let json = serde_json::to_string(&token).unwrap();
        let back: SessionToken = serde_json::from_str(&json).unwrap();
        assert_eq!(back.access_token, "abc");
        assert_eq!(back.refresh_token.as_deref(), Some("def"));
        assert_eq!(back.expires_at, 1_700_000_000);
    }
}
