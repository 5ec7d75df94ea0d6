//! Note editor state machine.
//!
//! Drives which of create vs. update fires on submit. The form loops between
//! these states for the whole session; there is no terminal state.

use crate::note::{Note, NoteId};

/// What the form is currently doing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EditorState {
    /// No note selected, form empty.
    #[default]
    Idle,
    /// Form populated (blank or pre-filled from extracted text), not yet submitted.
    Composing { title: String, content: String },
    /// Form populated from a selected existing note.
    Editing {
        id: NoteId,
        title: String,
        content: String,
    },
}

/// Intent produced by a successful submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitAction {
    Create {
        title: String,
        content: String,
    },
    Update {
        id: NoteId,
        title: String,
        content: String,
    },
}

/// Why a submit was refused. The form stays open in all cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorError {
    /// Nothing to submit: the form is not open.
    Idle,
    EmptyTitle,
    EmptyContent,
}

impl std::fmt::Display for EditorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EditorError::Idle => write!(f, "No note form is open"),
            EditorError::EmptyTitle => write!(f, "Please provide a title"),
            EditorError::EmptyContent => write!(f, "Please provide some content"),
        }
    }
}

impl std::error::Error for EditorError {}

impl EditorState {
    /// "Add note": open a blank form.
    pub fn open_blank(&mut self) {
        *self = EditorState::Composing {
            title: String::new(),
            content: String::new(),
        };
    }

    /// Extracted text delivered (e.g. from OCR): auto-open the form with the
    /// text as content and an empty title.
    pub fn open_extracted(&mut self, text: impl Into<String>) {
        *self = EditorState::Composing {
            title: String::new(),
            content: text.into(),
        };
    }

    /// Select an existing note for edit; its identity is remembered.
    pub fn open_note(&mut self, note: &Note) {
        *self = EditorState::Editing {
            id: note.id.clone(),
            title: note.title.clone(),
            content: note.content.clone(),
        };
    }

    /// Update the form's title field. No-op when the form is closed.
    pub fn set_title(&mut self, value: impl Into<String>) {
        match self {
            EditorState::Idle => {}
            EditorState::Composing { title, .. } | EditorState::Editing { title, .. } => {
                *title = value.into();
            }
        }
    }

    /// Update the form's content field. No-op when the form is closed.
    pub fn set_content(&mut self, value: impl Into<String>) {
        match self {
            EditorState::Idle => {}
            EditorState::Composing { content, .. } | EditorState::Editing { content, .. } => {
                *content = value.into();
            }
        }
    }

    /// Close the form without submitting.
    pub fn cancel(&mut self) {
        *self = EditorState::Idle;
    }

    /// Submit the form.
    ///
    /// Returns the intent to hand to the reconciler and transitions to `Idle`.
    /// On validation failure the state is untouched so the user can fix the
    /// form and submit again.
    pub fn submit(&mut self) -> Result<SubmitAction, EditorError> {
        let action = match self {
            EditorState::Idle => return Err(EditorError::Idle),
            EditorState::Composing { title, content } => {
                Self::check_fields(title, content)?;
                SubmitAction::Create {
                    title: title.clone(),
                    content: content.clone(),
                }
            }
            EditorState::Editing { id, title, content } => {
                Self::check_fields(title, content)?;
                SubmitAction::Update {
                    id: id.clone(),
                    title: title.clone(),
                    content: content.clone(),
                }
            }
        };

        *self = EditorState::Idle;
        Ok(action)
    }

    /// The note a delete action would target (only available while editing).
    pub fn delete_target(&self) -> Option<&NoteId> {
        match self {
            EditorState::Editing { id, .. } => Some(id),
            _ => None,
        }
    }

    pub fn is_open(&self) -> bool {
        !matches!(self, EditorState::Idle)
    }

    fn check_fields(title: &str, content: &str) -> Result<(), EditorError> {
        if title.trim().is_empty() {
            return Err(EditorError::EmptyTitle);
        }
        if content.trim().is_empty() {
            return Err(EditorError::EmptyContent);
        }
        Ok(())
    }
}
