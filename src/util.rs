//! Byte decoding and image sniffing.

use std::borrow::Cow;

/// Decode bytes to a string, handling various encodings.
///
/// This function:
/// 1. First tries UTF-8 (handles BOM automatically via encoding_rs)
/// 2. If malformed, tries the hint encoding (usually from `<meta charset>`)
/// 3. Falls back to Windows-1252 (what Word writes for legacy HTML)
pub fn decode_text<'a>(bytes: &'a [u8], hint_encoding: Option<&str>) -> Cow<'a, str> {
    let (result, _encoding, malformed) = encoding_rs::UTF_8.decode(bytes);

    if !malformed {
        return result;
    }

    if let Some(name) = hint_encoding
        && let Some(encoding) = encoding_rs::Encoding::for_label(name.as_bytes())
    {
        log::debug!("input is not UTF-8, decoding as {}", encoding.name());
        let (result, _, _) = encoding.decode(bytes);
        return result;
    }

    log::debug!("input is not UTF-8, decoding as windows-1252");
    let (result, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
    result
}

/// Decode an HTML document, honoring its declared charset.
pub fn decode_html(bytes: &[u8]) -> Cow<'_, str> {
    decode_text(bytes, extract_html_charset(bytes))
}

/// Extract the charset from a `<meta>` declaration.
///
/// Only the first 1024 bytes are checked, as browsers do.
pub fn extract_html_charset(bytes: &[u8]) -> Option<&str> {
    let prefix = &bytes[..bytes.len().min(1024)];

    let pos = prefix
        .windows(8)
        .position(|w| w.eq_ignore_ascii_case(b"charset="))?;
    let mut value = &prefix[pos + 8..];
    if let Some((&quote, rest)) = value.split_first()
        && (quote == b'"' || quote == b'\'')
    {
        value = rest;
    }

    let end = value
        .iter()
        .position(|&b| matches!(b, b'"' | b'\'' | b';' | b'>' | b' ' | b'/'))
        .unwrap_or(value.len());
    std::str::from_utf8(&value[..end]).ok().filter(|s| !s.is_empty())
}

/// Raster formats the converter embeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Jpeg,
    Gif,
    Bmp,
    Tiff,
}

impl ImageFormat {
    /// Sniff the format from magic bytes.
    pub fn detect(data: &[u8]) -> Option<Self> {
        match data {
            [0x89, b'P', b'N', b'G', ..] => Some(ImageFormat::Png),
            [0xFF, 0xD8, ..] => Some(ImageFormat::Jpeg),
            [b'G', b'I', b'F', ..] => Some(ImageFormat::Gif),
            [b'B', b'M', ..] => Some(ImageFormat::Bmp),
            [b'I', b'I', 0x2A, 0x00, ..] | [b'M', b'M', 0x00, 0x2A, ..] => Some(ImageFormat::Tiff),
            _ => None,
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            ImageFormat::Png => "image/png",
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Gif => "image/gif",
            ImageFormat::Bmp => "image/bmp",
            ImageFormat::Tiff => "image/tiff",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_utf8() {
        assert_eq!(decode_text("Título".as_bytes(), None), "Título");
    }

    #[test]
    fn test_decode_falls_back_to_windows_1252() {
        let bytes = b"T\xedtulo";
        assert_eq!(decode_text(bytes, None), "Título");
        assert_eq!(decode_text(bytes, Some("iso-8859-1")), "Título");
    }

    #[test]
    fn test_extract_html_charset() {
        assert_eq!(
            extract_html_charset(br#"<meta charset="windows-1252">"#),
            Some("windows-1252")
        );
        assert_eq!(
            extract_html_charset(
                br#"<meta http-equiv="Content-Type" content="text/html; charset=iso-8859-1">"#
            ),
            Some("iso-8859-1")
        );
        assert_eq!(extract_html_charset(b"<p>no meta</p>"), None);
    }

    #[test]
    fn test_decode_html_uses_meta_charset() {
        let bytes = b"<meta charset=\"iso-8859-1\"><p>Se\xf1al</p>";
        assert!(decode_html(bytes).contains("Señal"));
    }

    #[test]
    fn test_detect_image_format() {
        assert_eq!(
            ImageFormat::detect(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A]),
            Some(ImageFormat::Png)
        );
        assert_eq!(ImageFormat::detect(&[0xFF, 0xD8, 0xFF]), Some(ImageFormat::Jpeg));
        assert_eq!(ImageFormat::detect(b"GIF89a"), Some(ImageFormat::Gif));
        assert_eq!(ImageFormat::detect(b"hello"), None);
        assert_eq!(ImageFormat::Png.mime_type(), "image/png");
    }
}
