//! Current-user identity and the auth provider seam.
//!
//! The note reconciler never reads ambient session state; callers fetch the
//! owner from an `AuthProvider` and pass it in explicitly. An absent user means
//! every mutating note operation is rejected before any remote call.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use textsnap_core::AuthError;
use tokio::sync::watch;

/// Opaque identifier of the authenticated user that owns a note.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OwnerId(String);

impl OwnerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for OwnerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for OwnerId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// The signed-in user as reported by the auth provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: OwnerId,
    pub email: Option<String>,
}

/// Auth collaborator: supplies the current identity and a change stream.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Resolve the currently signed-in user, if any.
    async fn current_user(&self) -> Result<Option<CurrentUser>, AuthError>;

    /// Subscribe to auth-state changes (sign-in, sign-out, session expiry).
    fn subscribe(&self) -> watch::Receiver<Option<CurrentUser>>;
}

/// In-process auth state holder backed by a watch channel.
///
/// The hosted identity service delivers session changes through its own SDK;
/// this type is the process-local fan-out point for them.
pub struct SessionAuth {
    tx: watch::Sender<Option<CurrentUser>>,
}

impl SessionAuth {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { tx }
    }

    /// Record a completed sign-in and notify subscribers.
    pub fn signed_in(&self, user: CurrentUser) {
        tracing::info!("User signed in: {}", user.id);
        let _ = self.tx.send(Some(user));
    }

    /// Record a sign-out (or session expiry) and notify subscribers.
    pub fn signed_out(&self) {
        tracing::info!("User signed out");
        let _ = self.tx.send(None);
    }
}

impl Default for SessionAuth {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuthProvider for SessionAuth {
    async fn current_user(&self) -> Result<Option<CurrentUser>, AuthError> {
        Ok(self.tx.borrow().clone())
    }

    fn subscribe(&self) -> watch::Receiver<Option<CurrentUser>> {
        self.tx.subscribe()
    }
}
