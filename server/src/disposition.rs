use std::fmt::Write;

// RFC 5987 attr-char, besides ASCII alphanumerics
const ATTR_CHAR: &[u8] = b"!#$&+-.^_`|~";

/// `Content-Disposition` value offering `filename` for download.
///
/// Carries a transliterated ASCII `filename` for old clients and the exact
/// name as UTF-8 in `filename*`.
pub fn content_disposition(filename: &str) -> String {
    format!(
        "attachment; filename=\"{}\"; filename*=UTF-8''{}",
        ascii_fallback(filename),
        percent_encode(filename)
    )
}

fn ascii_fallback(filename: &str) -> String {
    deunicode::deunicode(filename)
        .chars()
        .map(|c| match c {
            '"' | '\\' => '_',
            c if c == ' ' || c.is_ascii_graphic() => c,
            _ => '_',
        })
        .collect()
}

fn percent_encode(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        if byte.is_ascii_alphanumeric() || ATTR_CHAR.contains(&byte) {
            out.push(byte as char);
        } else {
            let _ = write!(out, "%{:02X}", byte);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_name() {
        assert_eq!(
            content_disposition("Noto Sans.otf"),
            "attachment; filename=\"Noto Sans.otf\"; filename*=UTF-8''Noto%20Sans.otf"
        );
    }

    #[test]
    fn accented_name() {
        assert_eq!(
            content_disposition("Café.ttf"),
            "attachment; filename=\"Cafe.ttf\"; filename*=UTF-8''Caf%C3%A9.ttf"
        );
    }

    #[test]
    fn cjk_name_gets_ascii_fallback() {
        let value = content_disposition("思源黑体.ttf");
        assert!(value.is_ascii());
        assert!(value.ends_with("filename*=UTF-8''%E6%80%9D%E6%BA%90%E9%BB%91%E4%BD%93.ttf"));
    }

    #[test]
    fn quotes_and_controls_are_neutralised() {
        assert_eq!(ascii_fallback("a\"b\\c\td.ttf"), "a_b_c_d.ttf");
        assert_eq!(percent_encode("a\"b"), "a%22b");
    }
}
