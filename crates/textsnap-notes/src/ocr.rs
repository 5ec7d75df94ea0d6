//! Collaborator seams for text extraction.
//!
//! The OCR engine is an opaque external function (image + language code in,
//! confidence + text out); its internals are out of scope here. Extracted text
//! seeds a new note's content through `EditorState::open_extracted`.

use async_trait::async_trait;
use std::path::Path;
use thiserror::Error;

/// Result of one recognition request.
#[derive(Debug, Clone, PartialEq)]
pub struct Recognition {
    /// Engine confidence, 0-100.
    pub confidence: f32,
    pub text: String,
}

impl Recognition {
    /// Render the result the way the extraction screen displays it.
    pub fn summary(&self) -> String {
        format!("Confidence: {}\nText:\n{}", self.confidence, self.text)
    }
}

/// Errors reported by the recognition engine.
#[derive(Debug, Error)]
pub enum RecognizeError {
    #[error("Recognition failed: {0}")]
    Engine(String),

    #[error("Could not read image: {0}")]
    UnreadableImage(String),
}

/// OCR engine collaborator.
///
/// Invoked once per user-initiated recognition request. There is no
/// cancellation: issuing a new request does not cancel a prior one.
#[async_trait]
pub trait TextRecognizer: Send + Sync {
    async fn recognize(&self, image: &Path, language: &str)
        -> Result<Recognition, RecognizeError>;
}

/// Clipboard collaborator: one-way copy of displayed extracted text.
pub trait Clipboard {
    fn copy(&mut self, text: &str) -> anyhow::Result<()>;
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::panic)]
    use super::*;
    use crate::editor::EditorState;

    struct FixedRecognizer(Recognition);

    #[async_trait]
    impl TextRecognizer for FixedRecognizer {
        async fn recognize(
            &self,
            _image: &Path,
            _language: &str,
        ) -> Result<Recognition, RecognizeError> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn summary_matches_display_format() {
        let rec = Recognition {
            confidence: 87.5,
            text: "milk\neggs".to_string(),
        };
        assert_eq!(rec.summary(), "Confidence: 87.5\nText:\nmilk\neggs");
    }

    #[tokio::test]
    async fn recognized_text_seeds_the_note_form() {
        let engine = FixedRecognizer(Recognition {
            confidence: 91.0,
            text: "extracted body".to_string(),
        });

        let result = engine
            .recognize(Path::new("photo.png"), "eng")
            .await
            .expect("recognition should succeed");

        let mut editor = EditorState::default();
        editor.open_extracted(result.text);

        match editor {
            EditorState::Composing { title, content } => {
                assert!(title.is_empty());
                assert_eq!(content, "extracted body");
            }
            other => panic!("expected Composing, got {:?}", other),
        }
    }
}
