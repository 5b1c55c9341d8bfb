extern crate mkvfont_core as core_types;

pub mod default;
pub mod name;
pub mod woff;

#[cfg(any(test, feature = "fixtures"))]
pub mod fixtures;

pub use default::DefaultFont;
pub use name::{family_name, identify};

pub mod check {
    // 1.0
    const SFNT_VERSION_TRUE_TYPE1: u32 = 0x00010000;
    // true
    const SFNT_VERSION_TRUE_TYPE2: u32 = 0x74727565;
    // typ1
    const SFNT_VERSION_TRUE_TYPE3: u32 = 0x74797031;
    // OTTO
    const SFNT_VERSION_OPEN_TYPE: u32 = 0x4F54544F;
    // ttcf
    const SFNT_COLLECTION: u32 = 0x74746366;
    // wOFF
    const SFNT_VERSION_WOFF: u32 = 0x774f4646;
    // wOF2
    const SFNT_VERSION_WOFF2: u32 = 0x774f4632;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum FontKind {
        TrueType,
        OpenType,
        Collection,
        Woff,
        Woff2,
    }

    impl FontKind {
        pub fn extension(self) -> &'static str {
            match self {
                FontKind::TrueType => "ttf",
                FontKind::OpenType => "otf",
                FontKind::Collection => "ttc",
                FontKind::Woff => "woff",
                FontKind::Woff2 => "woff2",
            }
        }
    }

    pub(crate) fn get_u16(data: &[u8], offset: usize) -> Option<u16> {
        let r = data.get(offset..offset.checked_add(2)?)?;
        Some(u16::from_be_bytes([r[0], r[1]]))
    }

    pub(crate) fn get_u32(data: &[u8], offset: usize) -> Option<u32> {
        let r = data.get(offset..offset.checked_add(4)?)?;
        Some(u32::from_be_bytes([r[0], r[1], r[2], r[3]]))
    }

    /// Sniffs the container kind from the leading signature.
    pub fn check_type(data: &[u8]) -> Option<FontKind> {
        let signature = get_u32(data, 0)?;
        if signature == SFNT_VERSION_TRUE_TYPE1 || signature == SFNT_VERSION_TRUE_TYPE2 || signature == SFNT_VERSION_TRUE_TYPE3 {
            Some(FontKind::TrueType)
        } else if signature == SFNT_VERSION_OPEN_TYPE {
            Some(FontKind::OpenType)
        } else if signature == SFNT_COLLECTION {
            Some(FontKind::Collection)
        } else if signature == SFNT_VERSION_WOFF {
            Some(FontKind::Woff)
        } else if signature == SFNT_VERSION_WOFF2 {
            Some(FontKind::Woff2)
        } else {
            None
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn signatures() {
            assert_eq!(check_type(&[0, 1, 0, 0, 0, 4]), Some(FontKind::TrueType));
            assert_eq!(check_type(b"true...."), Some(FontKind::TrueType));
            assert_eq!(check_type(b"OTTO...."), Some(FontKind::OpenType));
            assert_eq!(check_type(b"ttcf...."), Some(FontKind::Collection));
            assert_eq!(check_type(b"wOFF...."), Some(FontKind::Woff));
            assert_eq!(check_type(b"wOF2...."), Some(FontKind::Woff2));
            assert_eq!(check_type(b"PK\x03\x04"), None);
            assert_eq!(check_type(b"OTT"), None);
        }

        #[test]
        fn reads_are_bounds_checked() {
            assert_eq!(get_u16(&[1, 2, 3], 1), Some(0x0203));
            assert_eq!(get_u16(&[1, 2, 3], 2), None);
            assert_eq!(get_u32(&[1, 2, 3], usize::MAX), None);
        }
    }
}
