//! Remote note store trait and error types.
//!
//! The store is a collaborator: it owns durability and per-request atomicity.
//! Every operation is scoped by an owner-equality filter.

use async_trait::async_trait;
use textsnap_auth::OwnerId;
use thiserror::Error;

use crate::note::{Note, NoteCreateRequest, NoteId, NoteUpdateRequest};

/// Errors that can occur talking to the remote note store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Transport-level failure (connection, timeout, body).
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("Backend error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The backend answered 2xx but the body was not what we asked for.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

/// Trait for remote note stores.
///
/// Implementations don't manage local state; the reconciler layers optimistic
/// local mutations on top of these calls.
#[async_trait]
pub trait NoteStore: Send + Sync {
    /// Fetch all notes belonging to `owner`.
    async fn select(&self, owner: &OwnerId) -> Result<Vec<Note>, StoreError>;

    /// Insert a new note row and return the stored row (with its durable id).
    async fn insert(&self, request: &NoteCreateRequest) -> Result<Note, StoreError>;

    /// Apply a partial update to the note with `id` owned by `owner`.
    async fn update(
        &self,
        owner: &OwnerId,
        id: &NoteId,
        fields: &NoteUpdateRequest,
    ) -> Result<(), StoreError>;

    /// Delete the note with `id` owned by `owner`.
    async fn delete(&self, owner: &OwnerId, id: &NoteId) -> Result<(), StoreError>;
}
