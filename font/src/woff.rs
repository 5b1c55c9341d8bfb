//! WOFF 1.0 table access.
//!
//! Only the table directory is walked; a single table is inflated on demand,
//! which is all the name lookup needs.

use crate::check::{get_u16, get_u32};
use crate::core_types::ParseFailure;
use miniz_oxide::inflate::decompress_to_vec_zlib_with_limit;
use std::borrow::Cow;

const HEADER_LEN: usize = 44;
const ENTRY_LEN: usize = 20;

fn truncated(what: &str) -> ParseFailure {
    ParseFailure::Malformed(format!("truncated WOFF {}", what))
}

/// Returns the decompressed contents of the table tagged `tag`.
pub fn table<'a>(data: &'a [u8], tag: &'static str) -> Result<Cow<'a, [u8]>, ParseFailure> {
    if data.len() < HEADER_LEN {
        return Err(truncated("header"));
    }
    let num_tables = get_u16(data, 12).ok_or_else(|| truncated("header"))? as usize;
    for i in 0..num_tables {
        let entry = HEADER_LEN + i * ENTRY_LEN;
        let entry_tag = data.get(entry..entry + 4).ok_or_else(|| truncated("table directory"))?;
        if entry_tag != tag.as_bytes() {
            continue;
        }
        let offset = get_u32(data, entry + 4).ok_or_else(|| truncated("table directory"))? as usize;
        let comp_length = get_u32(data, entry + 8).ok_or_else(|| truncated("table directory"))? as usize;
        let orig_length = get_u32(data, entry + 12).ok_or_else(|| truncated("table directory"))? as usize;
        let stored = offset
            .checked_add(comp_length)
            .and_then(|end| data.get(offset..end))
            .ok_or_else(|| truncated("table data"))?;
        if comp_length == orig_length {
            return Ok(Cow::Borrowed(stored));
        }
        if comp_length > orig_length {
            return Err(ParseFailure::Malformed(format!("`{}` table is larger than its original", tag)));
        }
        let inflated = decompress_to_vec_zlib_with_limit(stored, orig_length)
            .map_err(|_| ParseFailure::Malformed(format!("`{}` table does not inflate", tag)))?;
        if inflated.len() != orig_length {
            return Err(ParseFailure::Malformed(format!("`{}` table has the wrong length", tag)));
        }
        return Ok(Cow::Owned(inflated));
    }
    Err(ParseFailure::MissingTable(tag))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[test]
    fn finds_compressed_table() {
        let font = fixtures::woff(&fixtures::truetype("Noto Sans"));
        let name = table(&font, "name").unwrap();
        assert!(matches!(name, Cow::Owned(_)));
        assert_eq!(get_u16(&name, 0), Some(0));
        assert_eq!(get_u16(&name, 2), Some(4));
    }

    #[test]
    fn stored_table_is_borrowed() {
        let font = fixtures::woff(&fixtures::truetype("Noto Sans"));
        // maxp is six bytes and never shrinks under zlib
        let maxp = table(&font, "maxp").unwrap();
        assert!(matches!(maxp, Cow::Borrowed(_)));
        assert_eq!(maxp.len(), 6);
    }

    #[test]
    fn missing_table() {
        let font = fixtures::woff(&fixtures::truetype("Noto Sans"));
        assert_eq!(table(&font, "CFF ").unwrap_err(), ParseFailure::MissingTable("CFF "));
    }

    #[test]
    fn truncated_input() {
        let font = fixtures::woff(&fixtures::truetype("Noto Sans"));
        assert!(matches!(table(&font[..30], "name"), Err(ParseFailure::Malformed(_))));
        assert!(matches!(table(&font[..HEADER_LEN + 10], "name"), Err(ParseFailure::Malformed(_))));
    }

    #[test]
    fn corrupt_stream() {
        let mut font = fixtures::woff(&fixtures::truetype("Noto Sans"));
        // name is the fourth directory entry; break its zlib header
        let offset = get_u32(&font, HEADER_LEN + 3 * ENTRY_LEN + 4).unwrap() as usize;
        font[offset] = 0xff;
        assert!(matches!(table(&font, "name"), Err(ParseFailure::Malformed(_))));
    }

    #[test]
    fn inflated_length_must_match() {
        let mut font = fixtures::woff(&fixtures::truetype("Noto Sans"));
        let orig_length = HEADER_LEN + 3 * ENTRY_LEN + 12;
        let declared = get_u32(&font, orig_length).unwrap();
        font[orig_length..orig_length + 4].copy_from_slice(&(declared + 8).to_be_bytes());
        assert!(table(&font, "name").is_err());
    }
}
