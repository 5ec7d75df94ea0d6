//! Event-driven service layer: async note operations for a UI thread.
//! All network work runs off the UI thread; results are sent back via mpsc.
//!
//! Operations against the same note are not serialized beyond the reconciler
//! mutex: a rapid update-then-delete dispatches two independent requests with
//! no ordering guarantee. No retry, no cancellation of in-flight work.

use std::path::PathBuf;
use std::sync::mpsc::Sender;
use std::sync::Arc;

use textsnap_auth::OwnerId;
use tokio::runtime::Handle;
use tokio::sync::Mutex;

use crate::editor::SubmitAction;
use crate::note::{Note, NoteError, NoteId};
use crate::ocr::{Recognition, RecognizeError, TextRecognizer};
use crate::reconciler::NoteReconciler;
use crate::store::NoteStore;

/// Messages sent from async operations back to the UI thread
#[derive(Debug)]
pub enum NotesMessage {
    /// The refreshed local list after a load (unchanged if the fetch failed)
    LoadDone(Vec<Note>),
    /// Result of a submitted form (create or update)
    SaveDone(Result<Note, NoteError>),
    /// Result of deleting a note
    DeleteDone {
        id: NoteId,
        result: Result<(), NoteError>,
    },
    /// Result of a text recognition request
    RecognizeDone(Result<Recognition, RecognizeError>),
}

/// Shared handle to the reconciler for spawned operations.
pub type SharedReconciler<S> = Arc<Mutex<NoteReconciler<S>>>;

/// Request a reload of the owner's notes.
/// Sends `LoadDone` on the channel when complete.
pub fn request_load<S>(
    tx: &Sender<NotesMessage>,
    handle: &Handle,
    reconciler: SharedReconciler<S>,
    owner: OwnerId,
) where
    S: NoteStore + 'static,
{
    let tx = tx.clone();
    handle.spawn(async move {
        let mut rec = reconciler.lock().await;
        rec.load_notes(&owner).await;
        let _ = tx.send(NotesMessage::LoadDone(rec.notes().to_vec()));
    });
}

/// Request that a submitted form be saved.
/// A `Create` intent becomes `create_note`, an `Update` intent `update_note`.
/// Sends `SaveDone` on the channel when complete.
pub fn request_save<S>(
    tx: &Sender<NotesMessage>,
    handle: &Handle,
    reconciler: SharedReconciler<S>,
    action: SubmitAction,
    owner: Option<OwnerId>,
) where
    S: NoteStore + 'static,
{
    let tx = tx.clone();
    handle.spawn(async move {
        let mut rec = reconciler.lock().await;
        let result = match action {
            SubmitAction::Create { title, content } => {
                rec.create_note(&title, &content, owner.as_ref()).await
            }
            SubmitAction::Update { id, title, content } => {
                rec.update_note(&id, &title, &content, owner.as_ref()).await
            }
        };
        let _ = tx.send(NotesMessage::SaveDone(result));
    });
}

/// Request deletion of a note.
/// Sends `DeleteDone` on the channel when complete.
pub fn request_delete<S>(
    tx: &Sender<NotesMessage>,
    handle: &Handle,
    reconciler: SharedReconciler<S>,
    id: NoteId,
    owner: Option<OwnerId>,
) where
    S: NoteStore + 'static,
{
    let tx = tx.clone();
    handle.spawn(async move {
        let mut rec = reconciler.lock().await;
        let result = rec.delete_note(&id, owner.as_ref()).await;
        let _ = tx.send(NotesMessage::DeleteDone { id, result });
    });
}

/// Request text recognition for an image.
/// Sends `RecognizeDone` on the channel when complete.
pub fn request_recognize<R>(
    tx: &Sender<NotesMessage>,
    handle: &Handle,
    recognizer: Arc<R>,
    image: PathBuf,
    language: String,
) where
    R: TextRecognizer + 'static,
{
    let tx = tx.clone();
    handle.spawn(async move {
        let result = recognizer.recognize(&image, &language).await;
        let _ = tx.send(NotesMessage::RecognizeDone(result));
    });
}
