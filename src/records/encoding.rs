//! Text decoding for tabular sources.
//!
//! CSV exports arrive in whatever encoding the producing tool defaulted to.
//! [`decode_text`] walks [`ENCODING_FALLBACKS`] in order and returns the
//! first encoding that decodes the whole input without malformed sequences.

use encoding_rs::{Encoding, IBM866, KOI8_R, UTF_8, WINDOWS_1251};

/// UTF-8 byte-order mark.
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// A candidate text encoding for tabular input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    /// UTF-8 prefixed with a byte-order mark (the mark is stripped)
    Utf8Bom,
    /// Plain UTF-8
    Utf8,
    /// Windows Cyrillic code page
    Windows1251,
    /// KOI8-R Cyrillic
    Koi8R,
    /// DOS Cyrillic code page
    Ibm866,
}

/// Encodings tried, in order, when decoding a tabular file.
///
/// Windows-1251 maps every byte, so decoding never gets past it with this
/// list: KOI8-R and CP866 are only reached through [`decode_with`] with a
/// candidate list that leaves Windows-1251 out.
pub const ENCODING_FALLBACKS: &[TextEncoding] = &[
    TextEncoding::Utf8Bom,
    TextEncoding::Utf8,
    TextEncoding::Windows1251,
    TextEncoding::Koi8R,
    TextEncoding::Ibm866,
];

impl TextEncoding {
    /// Conventional label, as used in logs and error messages.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Utf8Bom => "utf-8-sig",
            Self::Utf8 => "utf-8",
            Self::Windows1251 => "windows-1251",
            Self::Koi8R => "koi8-r",
            Self::Ibm866 => "ibm866",
        }
    }

    fn encoding(self) -> &'static Encoding {
        match self {
            Self::Utf8Bom | Self::Utf8 => UTF_8,
            Self::Windows1251 => WINDOWS_1251,
            Self::Koi8R => KOI8_R,
            Self::Ibm866 => IBM866,
        }
    }

    /// Decode `bytes` strictly. `None` means this encoding does not fit.
    #[must_use]
    pub fn decode(self, bytes: &[u8]) -> Option<String> {
        let payload = match self {
            Self::Utf8Bom => bytes.strip_prefix(UTF8_BOM)?,
            _ => bytes,
        };
        self.encoding()
            .decode_without_bom_handling_and_without_replacement(payload)
            .map(std::borrow::Cow::into_owned)
    }
}

impl std::fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Decode `bytes` with the first fitting encoding from `candidates`.
#[must_use]
pub fn decode_with(bytes: &[u8], candidates: &[TextEncoding]) -> Option<(TextEncoding, String)> {
    candidates.iter().find_map(|&candidate| {
        let decoded = candidate.decode(bytes);
        if decoded.is_none() {
            tracing::debug!("Input is not valid {}, trying next encoding", candidate);
        }
        decoded.map(|text| (candidate, text))
    })
}

/// Decode `bytes` with [`ENCODING_FALLBACKS`].
#[must_use]
pub fn decode_text(bytes: &[u8]) -> Option<(TextEncoding, String)> {
    decode_with(bytes, ENCODING_FALLBACKS)
}
