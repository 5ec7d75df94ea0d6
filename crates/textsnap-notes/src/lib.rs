pub mod editor;
pub mod http;
pub mod note;
pub mod ocr;
pub mod reconciler;
pub mod service;
pub mod slug;
pub mod store;

pub use editor::{EditorError, EditorState, SubmitAction};
pub use http::HttpNoteStore;
pub use note::{Note, NoteCreateRequest, NoteError, NoteId, NoteUpdateRequest};
pub use ocr::{Clipboard, Recognition, RecognizeError, TextRecognizer};
pub use reconciler::NoteReconciler;
pub use service::{NotesMessage, SharedReconciler};
pub use slug::slug_from_title;
pub use store::{NoteStore, StoreError};
