//! Note types shared by the remote store and the reconciler.
//!
//! A note row carries `title`, `content`, a derived `slug`, and an owner
//! reference; the owner column is named `user` on the backend.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use textsnap_auth::OwnerId;
use thiserror::Error;
use uuid::Uuid;

use crate::slug::slug_from_title;

/// Errors that can occur during note operations.
#[derive(Debug, Error)]
pub enum NoteError {
    /// No signed-in user; mutating operations are rejected before any remote call.
    #[error("Not signed in")]
    Unauthenticated,

    /// Validation error (empty title/content, content too long).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Note is not present in local state (or belongs to another user).
    #[error("Note not found: {0}")]
    NotFound(NoteId),
}

impl NoteError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

/// Opaque note identifier, unique per user.
///
/// Locally created notes start with a provisional UUID; the remote store may
/// assign its own durable key, which replaces the provisional one after a
/// successful insert.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(String);

impl NoteId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a provisional id for a note not yet acknowledged by the store.
    pub fn provisional() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NoteId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NoteId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// A single user-owned note.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    pub content: String,
    pub slug: String,
    #[serde(rename = "user")]
    pub owner: OwnerId,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl Note {
    /// Build a new local note with a provisional id and a slug derived from the title.
    pub fn draft(title: &str, content: &str, owner: OwnerId) -> Self {
        let now = Utc::now();
        Self {
            id: NoteId::provisional(),
            title: title.to_string(),
            content: content.to_string(),
            slug: slug_from_title(title),
            owner,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Row sent to the remote store on insert. The id is store-assigned, so the
/// request never carries one.
#[derive(Debug, Clone, Serialize)]
pub struct NoteCreateRequest {
    pub title: String,
    pub content: String,
    pub slug: String,
    #[serde(rename = "user")]
    pub owner: OwnerId,
}

impl From<&Note> for NoteCreateRequest {
    fn from(note: &Note) -> Self {
        Self {
            title: note.title.clone(),
            content: note.content.clone(),
            slug: note.slug.clone(),
            owner: note.owner.clone(),
        }
    }
}

/// Partial update sent to the remote store; only Some fields are applied.
#[derive(Debug, Clone, Default, Serialize)]
pub struct NoteUpdateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
}

/// Maximum content length for notes.
pub const MAX_CONTENT_LENGTH: usize = 10_000;

/// Validate a note title: must be non-empty after trimming.
pub fn validate_title(title: &str) -> Result<(), NoteError> {
    if title.trim().is_empty() {
        return Err(NoteError::validation("Title cannot be empty"));
    }
    Ok(())
}

/// Validate note content.
///
/// # Errors
/// Returns `NoteError::Validation` if:
/// - Content is empty or whitespace-only.
/// - Content exceeds `MAX_CONTENT_LENGTH` characters.
pub fn validate_content(content: &str) -> Result<(), NoteError> {
    let trimmed = content.trim();

    if trimmed.is_empty() {
        return Err(NoteError::validation("Content cannot be empty"));
    }

    if content.len() > MAX_CONTENT_LENGTH {
        return Err(NoteError::validation(format!(
            "Content exceeds maximum length of {} characters",
            MAX_CONTENT_LENGTH
        )));
    }

    Ok(())
}
