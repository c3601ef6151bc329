//! Ordered text-encoding fallback for CSV files.
//!
//! Files are decoded with the first encoding in [`FALLBACK_CHAIN`] that
//! accepts every byte. The order matters: a legacy Western European
//! encoding is tried before UTF-8, so UTF-8 files that happen to be valid
//! Windows-1252 are read as Windows-1252.

use std::borrow::Cow;
use std::fmt;

use encoding_rs::{UTF_8, WINDOWS_1252};
use serde::{Deserialize, Serialize};

/// Bytes Windows-1252 leaves undefined. Decoding them is an error.
const WINDOWS_1252_UNDEFINED: [u8; 5] = [0x81, 0x8D, 0x8F, 0x90, 0x9D];

/// Text encodings tried for delimited files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TextEncoding {
    /// Windows-1252 (strict: undefined bytes fail).
    Windows1252,
    /// UTF-8 (strict: no replacement characters).
    Utf8,
    /// ISO-8859-1; maps every byte and never fails.
    Latin1,
}

/// Encodings in the order they are attempted.
pub const FALLBACK_CHAIN: [TextEncoding; 3] = [
    TextEncoding::Windows1252,
    TextEncoding::Utf8,
    TextEncoding::Latin1,
];

impl TextEncoding {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Windows1252 => "windows-1252",
            Self::Utf8 => "utf-8",
            Self::Latin1 => "latin-1",
        }
    }

    /// Decodes `bytes`, or returns `None` if they are not valid in this encoding.
    pub fn decode(self, bytes: &[u8]) -> Option<String> {
        match self {
            Self::Windows1252 => {
                if bytes.iter().any(|b| WINDOWS_1252_UNDEFINED.contains(b)) {
                    return None;
                }
                let (text, _) = WINDOWS_1252.decode_without_bom_handling(bytes);
                Some(text.into_owned())
            }
            Self::Utf8 => UTF_8
                .decode_without_bom_handling_and_without_replacement(bytes)
                .map(Cow::into_owned),
            // encoding_rs treats the "latin1" label as Windows-1252, so map bytes directly.
            Self::Latin1 => Some(bytes.iter().map(|&b| char::from(b)).collect()),
        }
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Decodes with the first encoding of [`FALLBACK_CHAIN`] that succeeds.
pub fn decode_with_fallback(bytes: &[u8]) -> Option<(String, TextEncoding)> {
    FALLBACK_CHAIN.into_iter().find_map(|encoding| match encoding.decode(bytes) {
        Some(text) => Some((text, encoding)),
        None => {
            tracing::debug!(encoding = encoding.label(), "decoding failed, trying next encoding");
            None
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_plain_ascii_uses_first_encoding() {
        let (text, encoding) = decode_with_fallback(b"a,b\n1,2\n").unwrap();
        assert_eq!(encoding, TextEncoding::Windows1252);
        assert_eq!(text, "a,b\n1,2\n");
    }

    #[test]
    fn test_windows_1252_specials() {
        // 0x80 is the euro sign, 0xE9 is e-acute.
        let (text, encoding) = decode_with_fallback(&[0x80, b' ', 0xE9]).unwrap();
        assert_eq!(encoding, TextEncoding::Windows1252);
        assert_eq!(text, "€ é");
    }

    #[test]
    fn test_utf8_valid_as_windows_1252_is_read_as_windows_1252() {
        // "é" in UTF-8 is C3 A9, both defined in Windows-1252.
        let (text, encoding) = decode_with_fallback("é".as_bytes()).unwrap();
        assert_eq!(encoding, TextEncoding::Windows1252);
        assert_eq!(text, "Ã©");
    }

    #[test]
    fn test_utf8_with_undefined_windows_byte_falls_back_to_utf8() {
        // "Á" in UTF-8 is C3 81; 0x81 is undefined in Windows-1252.
        let (text, encoding) = decode_with_fallback("Ádám".as_bytes()).unwrap();
        assert_eq!(encoding, TextEncoding::Utf8);
        assert_eq!(text, "Ádám");
    }

    #[test]
    fn test_invalid_everywhere_but_latin1() {
        // Lone continuation byte: invalid UTF-8 and undefined in Windows-1252.
        let (text, encoding) = decode_with_fallback(&[b'a', 0x81, b'b']).unwrap();
        assert_eq!(encoding, TextEncoding::Latin1);
        assert_eq!(text, "a\u{81}b");
    }

    #[test]
    fn test_utf8_strict_rejects_invalid() {
        assert!(TextEncoding::Utf8.decode(&[0xFF, 0xFE, 0x00]).is_none());
        assert!(TextEncoding::Windows1252.decode(&[0x9D]).is_none());
    }

    proptest! {
        #[test]
        fn prop_chain_always_decodes(bytes in proptest::collection::vec(any::<u8>(), 0..256)) {
            prop_assert!(decode_with_fallback(&bytes).is_some());
        }

        #[test]
        fn prop_single_byte_encodings_preserve_length(bytes in proptest::collection::vec(any::<u8>(), 0..256)) {
            let latin1 = TextEncoding::Latin1.decode(&bytes).unwrap();
            prop_assert_eq!(latin1.chars().count(), bytes.len());
            if let Some(text) = TextEncoding::Windows1252.decode(&bytes) {
                prop_assert_eq!(text.chars().count(), bytes.len());
            }
        }
    }
}
