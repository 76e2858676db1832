//! Byte-to-text decoding for exported sheets and scanner dumps.

use encoding_rs::{Encoding, UTF_8, WINDOWS_1254};

/// Decoded text and the encoding it was read as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedText {
    pub text: String,
    /// WHATWG encoding name, e.g. `UTF-8` or `windows-1254`.
    pub encoding: &'static str,
    /// True when malformed sequences were replaced.
    pub had_errors: bool,
}

/// Decodes bytes: a BOM selects UTF-8 or UTF-16, valid UTF-8 is taken as
/// is, and anything else is read as Windows-1254 (Turkish), the code page
/// older scanner software writes.
pub fn decode_bytes(bytes: &[u8]) -> DecodedText {
    if let Some((encoding, bom_len)) = Encoding::for_bom(bytes) {
        return decode_with(encoding, &bytes[bom_len..]);
    }
    match std::str::from_utf8(bytes) {
        Ok(text) => DecodedText {
            text: text.to_string(),
            encoding: UTF_8.name(),
            had_errors: false,
        },
        Err(_) => {
            tracing::debug!("input is not UTF-8, decoding as windows-1254");
            decode_with(WINDOWS_1254, bytes)
        }
    }
}

fn decode_with(encoding: &'static Encoding, bytes: &[u8]) -> DecodedText {
    let (text, had_errors) = encoding.decode_without_bom_handling(bytes);
    DecodedText {
        text: text.into_owned(),
        encoding: encoding.name(),
        had_errors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utf8_passthrough() {
        let decoded = decode_bytes("Öğrenci".as_bytes());
        assert_eq!(decoded.text, "Öğrenci");
        assert_eq!(decoded.encoding, "UTF-8");
        assert!(!decoded.had_errors);
    }

    #[test]
    fn test_utf8_bom_stripped() {
        let mut bytes = vec![0xEF, 0xBB, 0xBF];
        bytes.extend_from_slice(b"Soru No");
        assert_eq!(decode_bytes(&bytes).text, "Soru No");
    }

    #[test]
    fn test_windows_1254_fallback() {
        // "AYŞE" in windows-1254: Ş is 0xDE
        let decoded = decode_bytes(&[b'A', b'Y', 0xDE, b'E']);
        assert_eq!(decoded.text, "AYŞE");
        assert_eq!(decoded.encoding, "windows-1254");
    }

    #[test]
    fn test_utf16_bom() {
        let decoded = decode_bytes(&[0xFF, 0xFE, b'A', 0x00, b'B', 0x00]);
        assert_eq!(decoded.text, "AB");
        assert_eq!(decoded.encoding, "UTF-16LE");
    }
}
