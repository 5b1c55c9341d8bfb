//! The fallback font served when an attachment yields no bytes.

use crate::core_types::FontBlob;
use std::io;
use std::path::Path;

static BUNDLED_FONT: &[u8] = include_bytes!("../assets/DejaVuSans-Bold.ttf");

/// Loaded once at startup and shared read-only afterwards.
///
/// There is no way to swap the bytes of an existing value; cloning hands out
/// another handle to the same buffer.
#[derive(Debug, Clone)]
pub struct DefaultFont(FontBlob);

impl DefaultFont {
    pub fn bundled() -> Self {
        DefaultFont(FontBlob::from_static(BUNDLED_FONT))
    }

    /// Reads a replacement fallback font from disk.
    pub fn load(path: impl AsRef<Path>) -> io::Result<Self> {
        let data = std::fs::read(path.as_ref())?;
        if data.is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("{} is empty", path.as_ref().display()),
            ));
        }
        Ok(DefaultFont(FontBlob::from(data)))
    }

    pub fn bytes(&self) -> FontBlob {
        self.0.clone()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
