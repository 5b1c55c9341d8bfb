use crate::resolve::FontResolver;
use futures::future::join_all;
use mkvfont_core::AttachmentTrack;
use std::path::Path;
use std::sync::Arc;

/// Display names for every attachment of a container, in track order.
#[derive(Clone)]
pub struct FontCatalog {
    resolver: Arc<FontResolver>,
}

impl FontCatalog {
    pub fn new(resolver: Arc<FontResolver>) -> Self {
        FontCatalog { resolver }
    }

    /// One name per track; the i-th name belongs to the track at position i.
    ///
    /// Extractions run concurrently, bounded by the extractor's own limit.
    pub async fn list_display_names(&self, path: &Path, tracks: &[AttachmentTrack]) -> Vec<String> {
        let names = tracks
            .iter()
            .enumerate()
            .map(|(position, track)| self.resolver.display_name(path, track, position));
        join_all(names).await
    }
}
