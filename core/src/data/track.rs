/// One attachment-type stream as reported by the media library.
///
/// `index` is the container-assigned stream index that API callers use. It is
/// not the ordinal position handed to the extractor: that position is the
/// track's offset within the attachment-only sequence it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachmentTrack {
    pub index: i32,
    pub declared_path: String,
    pub mime_type: String,
}

impl AttachmentTrack {
    pub fn new(index: i32, declared_path: impl Into<String>, mime_type: impl Into<String>) -> Self {
        AttachmentTrack {
            index,
            declared_path: declared_path.into(),
            mime_type: mime_type.into(),
        }
    }

    /// Text after the last `/`, `"fonts/a.ttf"` -> `"a.ttf"`, `"fonts/"` -> `""`.
    pub fn file_name(&self) -> String {
        self.base_name().to_string()
    }

    /// From the last dot of the base filename on, or empty when the name has
    /// no dot or ends in one. Leading dots count: `".ttf"` -> `".ttf"`.
    pub fn extension(&self) -> String {
        let name = self.base_name();
        match name.rfind('.') {
            Some(dot) if dot + 1 < name.len() => name[dot..].to_string(),
            _ => String::new(),
        }
    }

    fn base_name(&self) -> &str {
        match self.declared_path.rfind('/') {
            Some(slash) => &self.declared_path[slash + 1..],
            None => &self.declared_path,
        }
    }

    /// `family + extension` when a family is known, the base filename otherwise.
    pub fn display_name(&self, family_name: Option<&str>) -> String {
        match family_name {
            Some(family) => format!("{}{}", family, self.extension()),
            None => self.file_name(),
        }
    }
}

/// Ordinal position of the track whose container index is `index`.
///
/// This is the only bridge between the two numbering spaces; the slice must be
/// the same attachment-filtered sequence that extraction positions refer to.
pub fn position_of(tracks: &[AttachmentTrack], index: i32) -> Option<usize> {
    tracks.iter().position(|track| track.index == index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_name_strips_directories() {
        let track = AttachmentTrack::new(3, "fonts/sub/Arial Bold.TTF", "font/ttf");
        assert_eq!(track.file_name(), "Arial Bold.TTF");
        assert_eq!(track.extension(), ".TTF");
    }

    #[test]
    fn missing_extension_is_empty() {
        let track = AttachmentTrack::new(3, "README", "text/plain");
        assert_eq!(track.extension(), "");
        assert_eq!(track.display_name(Some("Noto Sans")), "Noto Sans");
    }

    #[test]
    fn empty_declared_path() {
        let track = AttachmentTrack::new(0, "", "application/x-truetype-font");
        assert_eq!(track.file_name(), "");
        assert_eq!(track.display_name(None), "");
    }

    #[test]
    fn dotfiles_and_trailing_dots() {
        let hidden = AttachmentTrack::new(1, ".ttf", "font/ttf");
        assert_eq!(hidden.file_name(), ".ttf");
        assert_eq!(hidden.extension(), ".ttf");
        assert_eq!(hidden.display_name(Some("Fam")), "Fam.ttf");

        let trailing = AttachmentTrack::new(2, "a.", "font/ttf");
        assert_eq!(trailing.extension(), "");
        assert_eq!(trailing.display_name(Some("Fam")), "Fam");

        let dotted = AttachmentTrack::new(3, "v1.2/font", "font/ttf");
        assert_eq!(dotted.extension(), "");
    }

    #[test]
    fn directory_path_has_no_file_name() {
        let track = AttachmentTrack::new(4, "fonts/", "font/ttf");
        assert_eq!(track.file_name(), "");
        assert_eq!(track.extension(), "");
        assert_eq!(track.display_name(None), "");
    }

    #[test]
    fn display_name_prefers_family() {
        let track = AttachmentTrack::new(7, "b.otf", "font/otf");
        assert_eq!(track.display_name(Some("Noto Sans")), "Noto Sans.otf");
        assert_eq!(track.display_name(None), "b.otf");
    }

    #[test]
    fn position_is_ordinal_not_index() {
        let tracks = vec![
            AttachmentTrack::new(5, "a.ttf", "font/ttf"),
            AttachmentTrack::new(7, "b.otf", "font/otf"),
        ];
        assert_eq!(position_of(&tracks, 7), Some(1));
        assert_eq!(position_of(&tracks, 5), Some(0));
        assert_eq!(position_of(&tracks, 1), None);
        assert_eq!(position_of(&[], 0), None);
    }
}
