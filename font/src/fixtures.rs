//! Tiny but structurally valid font binaries for tests.
//!
//! Each font carries `head`, `hhea`, `maxp` and `name` tables, which is the
//! minimum `ttf-parser` accepts as a face.

use miniz_oxide::deflate::compress_to_vec_zlib;

pub const TRUETYPE: u32 = 0x0001_0000;
pub const OPENTYPE: u32 = 0x4F54_544F;

#[derive(Debug, Clone)]
pub struct NameRecord {
    pub platform_id: u16,
    pub encoding_id: u16,
    pub language_id: u16,
    pub name_id: u16,
    pub value: String,
}

/// Windows, Unicode BMP, English (US).
pub fn windows_name(name_id: u16, value: &str) -> NameRecord {
    NameRecord {
        platform_id: 3,
        encoding_id: 1,
        language_id: 0x0409,
        name_id,
        value: value.to_string(),
    }
}

/// Macintosh, Roman, English. `value` must be ASCII.
pub fn mac_name(name_id: u16, value: &str) -> NameRecord {
    NameRecord {
        platform_id: 1,
        encoding_id: 0,
        language_id: 0,
        name_id,
        value: value.to_string(),
    }
}

/// Family, subfamily, full name and PostScript name, like most shipped fonts.
pub fn standard_names(family: &str) -> Vec<NameRecord> {
    vec![
        windows_name(1, family),
        windows_name(2, "Regular"),
        windows_name(4, &format!("{} Regular", family)),
        windows_name(6, &format!("{}-Regular", family.replace(' ', ""))),
    ]
}

pub fn truetype(family: &str) -> Vec<u8> {
    sfnt(TRUETYPE, &standard_names(family))
}

pub fn opentype(family: &str) -> Vec<u8> {
    sfnt(OPENTYPE, &standard_names(family))
}

pub fn name_table(records: &[NameRecord]) -> Vec<u8> {
    let mut rows = Vec::new();
    let mut storage = Vec::new();
    for record in records {
        let encoded: Vec<u8> = if record.platform_id == 1 {
            record.value.as_bytes().to_vec()
        } else {
            record.value.encode_utf16().flat_map(|c| c.to_be_bytes()).collect()
        };
        for field in [
            record.platform_id,
            record.encoding_id,
            record.language_id,
            record.name_id,
            encoded.len() as u16,
            storage.len() as u16,
        ] {
            rows.extend_from_slice(&field.to_be_bytes());
        }
        storage.extend_from_slice(&encoded);
    }
    let mut data = Vec::new();
    data.extend_from_slice(&0u16.to_be_bytes()); // format
    data.extend_from_slice(&(records.len() as u16).to_be_bytes());
    data.extend_from_slice(&(6 + 12 * records.len() as u16).to_be_bytes()); // stringOffset
    data.extend_from_slice(&rows);
    data.extend_from_slice(&storage);
    data
}

fn head_table() -> Vec<u8> {
    let mut data = vec![0u8; 54];
    data[0..4].copy_from_slice(&0x0001_0000u32.to_be_bytes()); // version
    data[4..8].copy_from_slice(&0x0001_0000u32.to_be_bytes()); // fontRevision
    data[12..16].copy_from_slice(&0x5F0F_3CF5u32.to_be_bytes()); // magicNumber
    data[18..20].copy_from_slice(&1000u16.to_be_bytes()); // unitsPerEm
    data[40..42].copy_from_slice(&1000i16.to_be_bytes()); // xMax
    data[42..44].copy_from_slice(&800i16.to_be_bytes()); // yMax
    data
}

fn hhea_table() -> Vec<u8> {
    let mut data = vec![0u8; 36];
    data[0..4].copy_from_slice(&0x0001_0000u32.to_be_bytes());
    data[4..6].copy_from_slice(&800i16.to_be_bytes()); // ascender
    data[6..8].copy_from_slice(&(-200i16).to_be_bytes()); // descender
    data[18..20].copy_from_slice(&1i16.to_be_bytes()); // caretSlopeRise
    data[34..36].copy_from_slice(&1u16.to_be_bytes()); // numberOfHMetrics
    data
}

fn maxp_table() -> Vec<u8> {
    let mut data = Vec::new();
    data.extend_from_slice(&0x0000_5000u32.to_be_bytes());
    data.extend_from_slice(&1u16.to_be_bytes()); // numGlyphs
    data
}

fn pad4(data: &mut Vec<u8>) {
    while data.len() % 4 != 0 {
        data.push(0);
    }
}

/// An sfnt with the given signature and name records.
pub fn sfnt(magic: u32, records: &[NameRecord]) -> Vec<u8> {
    // sorted by tag, lookups binary-search the directory
    let tables: Vec<(&[u8; 4], Vec<u8>)> = vec![
        (b"head", head_table()),
        (b"hhea", hhea_table()),
        (b"maxp", maxp_table()),
        (b"name", name_table(records)),
    ];
    let num_tables = tables.len() as u16;
    let entry_selector = 15 - num_tables.leading_zeros() as u16;
    let search_range = (1u16 << entry_selector) * 16;

    let mut output = Vec::new();
    output.extend_from_slice(&magic.to_be_bytes());
    output.extend_from_slice(&num_tables.to_be_bytes());
    output.extend_from_slice(&search_range.to_be_bytes());
    output.extend_from_slice(&entry_selector.to_be_bytes());
    output.extend_from_slice(&(num_tables * 16 - search_range).to_be_bytes());

    let mut offset = 12 + 16 * tables.len();
    let mut body = Vec::new();
    for (tag, data) in &tables {
        output.extend_from_slice(*tag);
        output.extend_from_slice(&0u32.to_be_bytes()); // checksum, unchecked
        output.extend_from_slice(&(offset as u32).to_be_bytes());
        output.extend_from_slice(&(data.len() as u32).to_be_bytes());
        body.extend_from_slice(data);
        pad4(&mut body);
        offset = 12 + 16 * tables.len() + body.len();
    }
    output.extend_from_slice(&body);
    output
}

/// Re-wraps an sfnt built by [`sfnt`] as WOFF 1.0, compressing tables that shrink.
pub fn woff(sfnt: &[u8]) -> Vec<u8> {
    let read_u32 = |at: usize| u32::from_be_bytes([sfnt[at], sfnt[at + 1], sfnt[at + 2], sfnt[at + 3]]);
    let num_tables = u16::from_be_bytes([sfnt[4], sfnt[5]]) as usize;

    let mut directory = Vec::new();
    let mut body = Vec::new();
    let data_start = 44 + 20 * num_tables;
    for i in 0..num_tables {
        let record = 12 + 16 * i;
        let offset = read_u32(record + 8) as usize;
        let length = read_u32(record + 12) as usize;
        let original = &sfnt[offset..offset + length];
        let compressed = compress_to_vec_zlib(original, 6);
        let stored: &[u8] = if compressed.len() < original.len() { &compressed } else { original };

        directory.extend_from_slice(&sfnt[record..record + 4]);
        directory.extend_from_slice(&((data_start + body.len()) as u32).to_be_bytes());
        directory.extend_from_slice(&(stored.len() as u32).to_be_bytes());
        directory.extend_from_slice(&(length as u32).to_be_bytes());
        directory.extend_from_slice(&read_u32(record + 4).to_be_bytes());
        body.extend_from_slice(stored);
        pad4(&mut body);
    }

    let total_length = (data_start + body.len()) as u32;
    let mut output = Vec::new();
    output.extend_from_slice(b"wOFF");
    output.extend_from_slice(&sfnt[0..4]); // flavor
    output.extend_from_slice(&total_length.to_be_bytes());
    output.extend_from_slice(&(num_tables as u16).to_be_bytes());
    output.extend_from_slice(&0u16.to_be_bytes()); // reserved
    output.extend_from_slice(&(sfnt.len() as u32).to_be_bytes()); // totalSfntSize
    output.extend_from_slice(&1u16.to_be_bytes()); // majorVersion
    output.extend_from_slice(&0u16.to_be_bytes()); // minorVersion
    output.extend_from_slice(&[0u8; 20]); // metadata and private blocks
    output.extend_from_slice(&directory);
    output.extend_from_slice(&body);
    output
}
