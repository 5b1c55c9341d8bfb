use crate::data::font_data::FontBlob;
use crate::error::ExtractionFailure;
use async_trait::async_trait;
use std::path::Path;

/// Pulls the raw bytes of one attachment stream out of a container.
///
/// `position` is the zero-based ordinal among the container's attachment
/// streams, never the container-assigned stream index. An `Ok` blob is never
/// empty; "nothing came out" is reported as [`ExtractionFailure::Empty`].
#[async_trait]
pub trait AttachmentExtractor: Send + Sync {
    async fn extract_attachment(&self, path: &Path, position: usize) -> Result<FontBlob, ExtractionFailure>;
}
