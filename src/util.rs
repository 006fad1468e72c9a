//! Byte decoding for HTML input.

use std::borrow::Cow;

/// Decode bytes to a string, handling various encodings.
///
/// This function:
/// 1. First tries UTF-8 (handles BOM automatically via encoding_rs)
/// 2. If malformed, tries the hint encoding (from `<meta charset>`)
/// 3. Falls back to Windows-1252 (common in clipboard and legacy pages)
///
/// # Examples
///
/// ```ignore
/// let utf8_bytes = "Hello, World!".as_bytes();
/// assert_eq!(decode_text(utf8_bytes, None), "Hello, World!");
/// ```
pub fn decode_text<'a>(bytes: &'a [u8], hint_encoding: Option<&str>) -> Cow<'a, str> {
    // Try UTF-8 first (handles BOM automatically)
    let (result, _encoding, malformed) = encoding_rs::UTF_8.decode(bytes);

    if !malformed {
        return result;
    }

    if let Some(name) = hint_encoding
        && let Some(encoding) = encoding_rs::Encoding::for_label(name.as_bytes())
    {
        let (result, _, _) = encoding.decode(bytes);
        return result;
    }

    let (result, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
    result
}

/// Find the charset declared by a `<meta>` tag in the first kilobyte.
///
/// Recognizes both `<meta charset="...">` and the
/// `content="text/html; charset=..."` form. Quotes are optional.
pub fn extract_meta_charset(bytes: &[u8]) -> Option<&str> {
    let prefix = &bytes[..bytes.len().min(1024)];

    let mut offset = 0;
    while let Some(pos) = prefix[offset..]
        .windows(5)
        .position(|w| w.eq_ignore_ascii_case(b"<meta"))
    {
        let tag_start = offset + pos;
        let tag_end = prefix[tag_start..]
            .iter()
            .position(|&b| b == b'>')
            .map_or(prefix.len(), |p| tag_start + p);
        let tag = &prefix[tag_start..tag_end];

        if let Some(at) = tag.windows(8).position(|w| w.eq_ignore_ascii_case(b"charset=")) {
            let value = &tag[at + 8..];
            let value = value
                .strip_prefix(b"\"")
                .or_else(|| value.strip_prefix(b"'"))
                .unwrap_or(value);
            let end = value
                .iter()
                .position(|&b| matches!(b, b'"' | b'\'' | b';' | b'/' | b'>') || b.is_ascii_whitespace())
                .unwrap_or(value.len());
            if end > 0 {
                return std::str::from_utf8(&value[..end]).ok();
            }
        }
        offset = tag_end;
    }
    None
}
