//! Family-name lookup for sfnt, collection and WOFF binaries.

use crate::check::{check_type, FontKind};
use crate::core_types::{FontBlob, FontIdentity, ParseFailure};
use crate::woff;
use ttf_parser::name::{Name, PlatformId};
use ttf_parser::{name_id, Face};

const ENGLISH_US: u16 = 0x0409;
// Mac Roman
const MAC_ROMAN: u16 = 0;

/// Identifies a blob. Never fails: anything unparsable has no family name.
pub fn identify(blob: &FontBlob) -> FontIdentity {
    let source_extension = check_type(blob).map(FontKind::extension).unwrap_or("");
    FontIdentity {
        family_name: family_name(blob).ok(),
        source_extension,
    }
}

/// Primary family name of the first face in `data`.
pub fn family_name(data: &[u8]) -> Result<String, ParseFailure> {
    match check_type(data).ok_or(ParseFailure::UnknownFormat)? {
        FontKind::Woff => {
            let table = woff::table(data, "name")?;
            let parsed = ttf_parser::name::Table::parse(&table)
                .ok_or_else(|| ParseFailure::Malformed("unreadable name table".to_string()))?;
            pick_family(parsed.names.into_iter().collect())
        }
        FontKind::Woff2 => Err(ParseFailure::Unsupported("WOFF2")),
        FontKind::TrueType | FontKind::OpenType | FontKind::Collection => {
            let face = Face::parse(data, 0).map_err(|e| ParseFailure::Malformed(e.to_string()))?;
            pick_family(face.names().into_iter().collect())
        }
    }
}

fn pick_family(records: Vec<Name>) -> Result<String, ParseFailure> {
    [name_id::TYPOGRAPHIC_FAMILY, name_id::FAMILY]
        .iter()
        .find_map(|&id| best_record(&records, id))
        .ok_or(ParseFailure::NoFamilyName)
}

/// Decoded text and its preference rank, lower is better.
fn decode(name: &Name) -> Option<(u8, String)> {
    if let Some(text) = name.to_string() {
        let rank = match name.platform_id {
            PlatformId::Windows if name.language_id == ENGLISH_US => 0,
            _ => 1,
        };
        return Some((rank, text));
    }
    match name.platform_id {
        PlatformId::Macintosh if name.encoding_id == MAC_ROMAN && name.name.is_ascii() => {
            Some((2, String::from_utf8_lossy(name.name).into_owned()))
        }
        _ => None,
    }
}

fn best_record(records: &[Name], id: u16) -> Option<String> {
    let mut best: Option<(u8, String)> = None;
    for name in records.iter().filter(|name| name.name_id == id) {
        let (rank, text) = match decode(name) {
            Some(decoded) => decoded,
            None => continue,
        };
        let text = text.trim();
        if text.is_empty() {
            continue;
        }
        if best.as_ref().map_or(true, |(current, _)| rank < *current) {
            best = Some((rank, text.to_string()));
        }
    }
    best.map(|(_, text)| text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::default::DefaultFont;
    use crate::fixtures::{self, mac_name, windows_name, OPENTYPE, TRUETYPE};

    #[test]
    fn truetype_family() {
        let font = fixtures::truetype("Noto Sans");
        assert_eq!(family_name(&font), Ok("Noto Sans".to_string()));
        let identity = identify(&FontBlob::from(font));
        assert_eq!(identity.family_name.as_deref(), Some("Noto Sans"));
        assert_eq!(identity.source_extension, "ttf");
    }

    #[test]
    fn opentype_family() {
        let identity = identify(&FontBlob::from(fixtures::opentype("Noto Sans")));
        assert_eq!(identity.family_name.as_deref(), Some("Noto Sans"));
        assert_eq!(identity.source_extension, "otf");
    }

    #[test]
    fn real_font() {
        let identity = identify(&DefaultFont::bundled().bytes());
        assert_eq!(identity.family_name.as_deref(), Some("DejaVu Sans"));
        assert_eq!(identity.source_extension, "ttf");
    }

    #[test]
    fn typographic_family_wins() {
        let font = fixtures::sfnt(
            TRUETYPE,
            &[windows_name(1, "Source Han Sans SC Light"), windows_name(16, "Source Han Sans SC")],
        );
        assert_eq!(family_name(&font).unwrap(), "Source Han Sans SC");
    }

    #[test]
    fn windows_english_preferred_over_other_languages() {
        let mut japanese = windows_name(1, "源ノ角ゴシック");
        japanese.language_id = 0x0411;
        let font = fixtures::sfnt(OPENTYPE, &[japanese, windows_name(1, "Source Han Sans")]);
        assert_eq!(family_name(&font).unwrap(), "Source Han Sans");
    }

    #[test]
    fn non_english_name_still_used_when_alone() {
        let mut japanese = windows_name(1, "源ノ角ゴシック");
        japanese.language_id = 0x0411;
        let font = fixtures::sfnt(TRUETYPE, &[japanese]);
        assert_eq!(family_name(&font).unwrap(), "源ノ角ゴシック");
    }

    #[test]
    fn mac_roman_fallback() {
        let font = fixtures::sfnt(TRUETYPE, &[mac_name(1, "Old Style")]);
        assert_eq!(family_name(&font).unwrap(), "Old Style");
    }

    #[test]
    fn blank_names_are_skipped() {
        let font = fixtures::sfnt(TRUETYPE, &[windows_name(16, "  "), windows_name(1, "Fallback")]);
        assert_eq!(family_name(&font).unwrap(), "Fallback");
    }

    #[test]
    fn font_without_family() {
        let font = fixtures::sfnt(TRUETYPE, &[windows_name(2, "Bold")]);
        assert_eq!(family_name(&font), Err(ParseFailure::NoFamilyName));
        let identity = identify(&FontBlob::from(font));
        assert_eq!(identity.family_name, None);
        assert_eq!(identity.source_extension, "ttf");
    }

    #[test]
    fn arbitrary_bytes_have_no_name() {
        let samples: [&[u8]; 4] = [b"", b"\x00", b"hello, world", &[0xff; 512]];
        for data in samples {
            assert_eq!(identify(&FontBlob::from(data.to_vec())), FontIdentity::unknown());
        }
        assert_eq!(family_name(b"PK\x03\x04zip"), Err(ParseFailure::UnknownFormat));
    }

    #[test]
    fn truncated_font_is_malformed() {
        let font = fixtures::truetype("Noto Sans");
        let truncated = &font[..40];
        assert!(matches!(family_name(truncated), Err(ParseFailure::Malformed(_))));
        assert_eq!(identify(&FontBlob::from(truncated.to_vec())).family_name, None);
    }

    #[test]
    fn woff_family() {
        let font = fixtures::woff(&fixtures::truetype("Noto Sans CJK"));
        let identity = identify(&FontBlob::from(font));
        assert_eq!(identity.family_name.as_deref(), Some("Noto Sans CJK"));
        assert_eq!(identity.source_extension, "woff");
    }

    #[test]
    fn woff2_is_recognised_but_unsupported() {
        let mut data = b"wOF2".to_vec();
        data.extend_from_slice(&[0u8; 60]);
        assert_eq!(family_name(&data), Err(ParseFailure::Unsupported("WOFF2")));
        assert_eq!(identify(&FontBlob::from(data)).source_extension, "woff2");
    }
}
