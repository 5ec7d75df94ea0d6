//! Note store reconciler: the per-user local note list and its remote twin.
//!
//! Local mutations are applied optimistically. A remote call that fails is
//! logged and never rolled back; the local and remote sets may diverge until
//! the next `load_notes` replaces local state wholesale. This is an explicit
//! policy, not an accident: the backend's per-request atomicity is the only
//! consistency guarantee on offer.

use textsnap_auth::OwnerId;

use crate::note::{
    validate_content, validate_title, Note, NoteCreateRequest, NoteError, NoteId,
    NoteUpdateRequest,
};
use crate::slug::slug_from_title;
use crate::store::NoteStore;

/// Owns the in-memory note list for the current user and resolves
/// create/update/delete intents into paired local+remote mutations.
pub struct NoteReconciler<S: NoteStore> {
    store: S,
    notes: Vec<Note>,
}

impl<S: NoteStore> NoteReconciler<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            notes: Vec::new(),
        }
    }

    /// The current local note list.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn get(&self, id: &NoteId) -> Option<&Note> {
        self.notes.iter().find(|n| n.id == *id)
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Fetch all of `owner`'s notes and replace local state.
    ///
    /// A fetch failure is logged and leaves the local list unchanged; the next
    /// successful load converges local state with the store.
    pub async fn load_notes(&mut self, owner: &OwnerId) {
        match self.store.select(owner).await {
            Ok(notes) => {
                tracing::debug!("Loaded {} notes for owner {}", notes.len(), owner);
                self.notes = notes;
            }
            Err(e) => {
                tracing::warn!("Failed to load notes for owner {}: {}", owner, e);
            }
        }
    }

    /// Create a new note from submitted title/content.
    ///
    /// The note appears in local state immediately with a provisional id; a
    /// successful remote insert swaps in the store-assigned row. Remote failure
    /// keeps the optimistic local entry.
    ///
    /// # Errors
    /// `Unauthenticated` if no owner is supplied, `Validation` on empty
    /// title/content; neither issues a remote call.
    pub async fn create_note(
        &mut self,
        title: &str,
        content: &str,
        owner: Option<&OwnerId>,
    ) -> Result<Note, NoteError> {
        let owner = owner.ok_or(NoteError::Unauthenticated)?;
        validate_title(title)?;
        validate_content(content)?;

        let draft = Note::draft(title, content, owner.clone());
        let provisional_id = draft.id.clone();
        self.notes.push(draft.clone());

        let request = NoteCreateRequest::from(&draft);
        match self.store.insert(&request).await {
            Ok(stored) => {
                // Thread the durable key back into the optimistic entry
                if let Some(local) = self.notes.iter_mut().find(|n| n.id == provisional_id) {
                    *local = stored.clone();
                }
                Ok(stored)
            }
            Err(e) => {
                tracing::warn!(
                    "Remote insert failed for note {}; keeping local copy: {}",
                    provisional_id,
                    e
                );
                Ok(draft)
            }
        }
    }

    /// Replace an existing note's title/content, preserving id and owner.
    ///
    /// The slug is recomputed from the new title. Remote failure is logged and
    /// the local replacement stands.
    ///
    /// # Errors
    /// `Unauthenticated`, `Validation`, or `NotFound` if the note is not in
    /// local state or belongs to a different owner. None of these issue a
    /// remote call.
    pub async fn update_note(
        &mut self,
        id: &NoteId,
        title: &str,
        content: &str,
        owner: Option<&OwnerId>,
    ) -> Result<Note, NoteError> {
        let owner = owner.ok_or(NoteError::Unauthenticated)?;
        validate_title(title)?;
        validate_content(content)?;

        let note = self
            .notes
            .iter_mut()
            .find(|n| n.id == *id && n.owner == *owner)
            .ok_or_else(|| NoteError::NotFound(id.clone()))?;

        note.title = title.to_string();
        note.content = content.to_string();
        note.slug = slug_from_title(title);
        note.updated_at = chrono::Utc::now();
        let updated = note.clone();

        let fields = NoteUpdateRequest {
            title: Some(updated.title.clone()),
            content: Some(updated.content.clone()),
            slug: Some(updated.slug.clone()),
        };
        if let Err(e) = self.store.update(owner, id, &fields).await {
            tracing::warn!(
                "Remote update failed for note {}; local copy diverges: {}",
                id,
                e
            );
        }

        Ok(updated)
    }

    /// Delete a note.
    ///
    /// The remote delete is issued first, but the local entry is removed
    /// whatever the remote outcome: the user asked for the note to be gone,
    /// and a stale remote row is reconciled away by the next `load_notes`.
    ///
    /// # Errors
    /// `Unauthenticated`, or `NotFound` if the note is not in local state or
    /// belongs to a different owner; neither issues a remote call.
    pub async fn delete_note(
        &mut self,
        id: &NoteId,
        owner: Option<&OwnerId>,
    ) -> Result<(), NoteError> {
        let owner = owner.ok_or(NoteError::Unauthenticated)?;

        if !self.notes.iter().any(|n| n.id == *id && n.owner == *owner) {
            return Err(NoteError::NotFound(id.clone()));
        }

        if let Err(e) = self.store.delete(owner, id).await {
            tracing::warn!(
                "Remote delete failed for note {}; removing locally anyway: {}",
                id,
                e
            );
        }

        self.notes.retain(|n| n.id != *id);
        Ok(())
    }
}
