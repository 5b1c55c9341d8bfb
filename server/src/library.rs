//! Media library lookups: item id to container path plus attachment tracks.
//!
//! The library proper lives elsewhere; the server reads a JSON export of it
//! and can follow that file as it is rewritten.

use mkvfont_core::{AttachmentTrack, Error, Result};
use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{info, warn};

const DEFAULT_MIME_TYPE: &str = "application/octet-stream";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Video,
    Audio,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreamType {
    Video,
    Audio,
    Subtitle,
    Attachment,
    Data,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MediaStream {
    pub index: i32,
    #[serde(rename = "type")]
    pub stream_type: StreamType,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub mime_type: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MediaItem {
    pub kind: ItemKind,
    pub path: PathBuf,
    #[serde(default)]
    pub streams: Vec<MediaStream>,
}

impl MediaItem {
    pub fn is_video(&self) -> bool {
        self.kind == ItemKind::Video
    }

    /// Attachment streams in declared order.
    ///
    /// Listing and single-font resolution both go through here, so a track's
    /// offset in the result is the position the extractor is asked for.
    pub fn attachments(&self) -> Vec<AttachmentTrack> {
        self.streams
            .iter()
            .filter(|stream| stream.stream_type == StreamType::Attachment)
            .map(|stream| {
                AttachmentTrack::new(
                    stream.index,
                    stream.path.clone().unwrap_or_default(),
                    stream.mime_type.clone().unwrap_or_else(|| DEFAULT_MIME_TYPE.to_string()),
                )
            })
            .collect()
    }
}

pub trait MediaLibrary: Send + Sync {
    fn item(&self, id: i64) -> Option<MediaItem>;
}

/// Container path and attachment tracks of a video item.
pub fn video_attachments(library: &dyn MediaLibrary, id: i64) -> Result<(PathBuf, Vec<AttachmentTrack>)> {
    match library.item(id) {
        Some(item) if item.is_video() => {
            let tracks = item.attachments();
            Ok((item.path, tracks))
        }
        _ => Err(Error::NotFound(id)),
    }
}

/// `{ "<id>": MediaItem, ... }` read from disk.
pub struct JsonLibrary {
    source: Option<PathBuf>,
    items: RwLock<HashMap<i64, MediaItem>>,
}

fn parse(json: &str) -> Result<HashMap<i64, MediaItem>> {
    serde_json::from_str(json).map_err(|e| Error::library(e.to_string()))
}

impl JsonLibrary {
    pub fn from_items(items: HashMap<i64, MediaItem>) -> Self {
        JsonLibrary {
            source: None,
            items: RwLock::new(items),
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(JsonLibrary::from_items(parse(json)?))
    }

    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let items = parse(&json).map_err(|e| Error::library(format!("{}: {}", path.display(), e)))?;
        Ok(JsonLibrary {
            source: Some(path.to_path_buf()),
            items: RwLock::new(items),
        })
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Re-reads the source file. On error the current contents stay in place.
    pub fn reload(&self) -> Result<usize> {
        let path = self.source.as_ref().ok_or_else(|| Error::library("library has no backing file"))?;
        let items = parse(&std::fs::read_to_string(path)?)?;
        let count = items.len();
        *self.items.write().unwrap_or_else(PoisonError::into_inner) = items;
        Ok(count)
    }

    pub fn len(&self) -> usize {
        self.items.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl MediaLibrary for JsonLibrary {
    fn item(&self, id: i64) -> Option<MediaItem> {
        self.items.read().unwrap_or_else(PoisonError::into_inner).get(&id).cloned()
    }
}

/// Reloads `library` whenever its file changes. Keep the watcher alive.
///
/// The parent directory is watched so that editors which replace the file
/// rather than rewrite it are still noticed.
pub fn watch(library: Arc<JsonLibrary>) -> Result<RecommendedWatcher> {
    let path = library
        .source()
        .map(Path::to_path_buf)
        .ok_or_else(|| Error::library("library has no backing file"))?;
    let file_name = path.file_name().map(|name| name.to_os_string());
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    };

    let mut watcher = notify::recommended_watcher(move |event: notify::Result<Event>| match event {
        Ok(event) => {
            let touches_library = event.paths.iter().any(|changed| changed.file_name() == file_name.as_deref());
            if !touches_library || !(event.kind.is_modify() || event.kind.is_create()) {
                return;
            }
            match library.reload() {
                Ok(count) => info!(count, "media library reloaded"),
                Err(e) => warn!(error = %e, "media library reload failed, keeping previous contents"),
            }
        }
        Err(e) => warn!(error = %e, "media library watch error"),
    })
    .map_err(|e| Error::library(e.to_string()))?;
    watcher
        .watch(&dir, RecursiveMode::NonRecursive)
        .map_err(|e| Error::library(e.to_string()))?;
    Ok(watcher)
}
