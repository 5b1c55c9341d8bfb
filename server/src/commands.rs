//! Offline subcommands: identify local font files, extract one attachment.

use crate::ffmpeg::{ExtractorSettings, FfmpegExtractor};
use mkvfont_core::{AttachmentExtractor, ExtractionFailure, FontBlob};
use mkvfont_font::check::check_type;
use mkvfont_font::family_name;
use std::io;
use std::path::Path;

/// `path<TAB>family<TAB>kind` for one font file.
pub fn identify_line(path: &Path) -> io::Result<String> {
    let data = std::fs::read(path)?;
    let family = family_name(&data).unwrap_or_else(|failure| format!("(unknown: {})", failure));
    let kind = check_type(&data).map(|kind| kind.extension()).unwrap_or("-");
    Ok(format!("{}\t{}\t{}", path.display(), family, kind))
}

pub async fn extract(settings: ExtractorSettings, video: &Path, position: usize) -> Result<FontBlob, ExtractionFailure> {
    FfmpegExtractor::new(settings).extract_attachment(video, position).await
}
