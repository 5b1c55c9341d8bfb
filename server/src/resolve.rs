//! Turns an attachment track into a display name or servable bytes.

use mkvfont_core::{position_of, AttachmentExtractor, AttachmentTrack, Error, FontBlob, ResolvedFont, Result};
use mkvfont_font::{identify, DefaultFont};
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

pub struct FontResolver {
    extractor: Arc<dyn AttachmentExtractor>,
    default_font: DefaultFont,
}

impl FontResolver {
    pub fn new(extractor: Arc<dyn AttachmentExtractor>, default_font: DefaultFont) -> Self {
        FontResolver { extractor, default_font }
    }

    /// Extracted bytes, or an empty blob when extraction failed for any reason.
    async fn extract(&self, path: &Path, position: usize) -> FontBlob {
        match self.extractor.extract_attachment(path, position).await {
            Ok(blob) => blob,
            Err(failure) => {
                debug!(path = %path.display(), position, %failure, "attachment extraction failed");
                FontBlob::empty()
            }
        }
    }

    fn family_name(&self, blob: &FontBlob, track: &AttachmentTrack) -> Option<String> {
        let identity = identify(blob);
        if identity.family_name.is_none() {
            debug!(
                index = track.index,
                declared = %track.declared_path,
                kind = identity.source_extension,
                "attachment is not an identifiable font"
            );
        }
        identity.family_name
    }

    /// Name shown in the font list: `family + extension`, else the declared file name.
    pub async fn display_name(&self, path: &Path, track: &AttachmentTrack, position: usize) -> String {
        let blob = self.extract(path, position).await;
        if blob.is_empty() {
            return track.file_name();
        }
        track.display_name(self.family_name(&blob, track).as_deref())
    }

    /// Bytes and naming for the attachment whose container index is `requested_index`.
    ///
    /// `tracks` must be the attachment-only sequence in library order. When
    /// nothing can be extracted the fallback font is returned under the
    /// track's own name and mime type.
    pub async fn resolve_content(
        &self,
        path: &Path,
        tracks: &[AttachmentTrack],
        requested_index: i32,
        want_filename: bool,
    ) -> Result<ResolvedFont> {
        let position = position_of(tracks, requested_index).ok_or(Error::InvalidIndex(requested_index))?;
        let track = &tracks[position];

        let blob = self.extract(path, position).await;
        if blob.is_empty() {
            debug!(index = requested_index, position, "serving fallback font");
            return Ok(ResolvedFont {
                content: self.default_font.bytes(),
                filename: if want_filename { Some(track.file_name()) } else { None },
                mime_type: track.mime_type.clone(),
            });
        }

        let filename = if want_filename {
            Some(track.display_name(self.family_name(&blob, track).as_deref()))
        } else {
            None
        };
        Ok(ResolvedFont {
            content: blob,
            filename,
            mime_type: track.mime_type.clone(),
        })
    }
}
