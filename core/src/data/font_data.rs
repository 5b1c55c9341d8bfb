use bytes::Bytes;
use std::ops::Deref;

/// Raw font bytes for the lifetime of one request.
///
/// Backed by [`Bytes`], so clones share the buffer and the bundled fallback
/// font can be wrapped without copying.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FontBlob(Bytes);

impl FontBlob {
    pub fn empty() -> Self {
        FontBlob(Bytes::new())
    }

    pub fn from_static(data: &'static [u8]) -> Self {
        FontBlob(Bytes::from_static(data))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Bytes {
        self.0
    }
}

impl Deref for FontBlob {
    type Target = [u8];

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<u8>> for FontBlob {
    fn from(data: Vec<u8>) -> Self {
        FontBlob(Bytes::from(data))
    }
}

impl From<Bytes> for FontBlob {
    fn from(data: Bytes) -> Self {
        FontBlob(data)
    }
}

/// What could be learned about a blob from its contents alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontIdentity {
    pub family_name: Option<String>,
    /// Sniffed container kind (`ttf`, `otf`, `ttc`, `woff`, `woff2`), empty if unknown.
    pub source_extension: &'static str,
}

impl FontIdentity {
    pub fn unknown() -> Self {
        FontIdentity {
            family_name: None,
            source_extension: "",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ResolvedFont {
    pub content: FontBlob,
    pub filename: Option<String>,
    pub mime_type: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_buffer() {
        let blob = FontBlob::from(vec![0u8, 1, 0, 0]);
        let copy = blob.clone();
        assert_eq!(blob.as_ptr(), copy.as_ptr());
        assert_eq!(copy.len(), 4);
    }

    #[test]
    fn empty_blob() {
        assert!(FontBlob::empty().is_empty());
        assert_eq!(FontBlob::default(), FontBlob::from(Vec::new()));
    }
}
