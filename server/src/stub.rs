use async_trait::async_trait;
use mkvfont_core::{AttachmentExtractor, ExtractionFailure, FontBlob};
use std::path::Path;
use std::sync::Mutex;

/// Serves canned attachments by position and records which positions were asked for.
pub struct StubExtractor {
    attachments: Vec<Option<Vec<u8>>>,
    calls: Mutex<Vec<usize>>,
}

impl StubExtractor {
    pub fn new(attachments: Vec<Option<Vec<u8>>>) -> Self {
        StubExtractor {
            attachments,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<usize> {
        let mut calls = self.calls.lock().unwrap().clone();
        calls.sort_unstable();
        calls
    }
}

#[async_trait]
impl AttachmentExtractor for StubExtractor {
    async fn extract_attachment(&self, _path: &Path, position: usize) -> Result<FontBlob, ExtractionFailure> {
        self.calls.lock().unwrap().push(position);
        match self.attachments.get(position) {
            Some(Some(data)) if !data.is_empty() => Ok(FontBlob::from(data.clone())),
            Some(_) => Err(ExtractionFailure::Empty),
            None => Err(ExtractionFailure::Exit(Some(1))),
        }
    }
}
