// src/extractors/normalize.rs
use crate::utils::error::ExtractError;
use crate::utils::AppError;
use std::io::Read;

/// Character encodings an etext may be decoded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Encoding {
    /// ISO-8859-1. Every byte maps to the code point of the same value, so decoding cannot fail.
    #[default]
    Latin1,
    Utf8,
}

impl Encoding {
    pub fn name(self) -> &'static str {
        match self {
            Encoding::Latin1 => "latin-1",
            Encoding::Utf8 => "utf-8",
        }
    }
}

fn decode_latin1(raw: &[u8]) -> String {
    raw.iter().map(|&b| char::from(b)).collect()
}

/// Decodes raw etext bytes into a `String`.
pub fn decode(raw: &[u8], encoding: Encoding) -> Result<String, ExtractError> {
    match encoding {
        Encoding::Latin1 => Ok(decode_latin1(raw)),
        Encoding::Utf8 => std::str::from_utf8(raw)
            .map(str::to_owned)
            .map_err(|e| ExtractError::Decode {
                encoding: encoding.name(),
                offset: e.valid_up_to(),
            }),
    }
}

/// Collapses every CRLF pair into a single LF. Lone CR and LF are kept.
pub fn normalize_line_endings(text: &str) -> String {
    text.replace("\r\n", "\n")
}

/// Latin-1 decode followed by line-ending normalization. Total over all inputs.
pub fn normalize(raw: &[u8]) -> String {
    normalize_line_endings(&decode_latin1(raw))
}

/// Reads the whole stream, then decodes and normalizes it.
pub fn read_normalized<R: Read>(mut reader: R, encoding: Encoding) -> Result<String, AppError> {
    let mut raw = Vec::new();
    reader.read_to_end(&mut raw)?;
    tracing::debug!("Read {} raw bytes", raw.len());
    let text = decode(&raw, encoding)?;
    Ok(normalize_line_endings(&text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latin1_maps_high_bytes_to_code_points() {
        let raw = [b'c', b'a', b'f', 0xE9, 0xFF];
        assert_eq!(normalize(&raw), "caf\u{e9}\u{ff}");
    }

    #[test]
    fn normalize_agrees_with_latin1_decode() {
        let raw: Vec<u8> = (0..=255u8).collect();
        let decoded = decode(&raw, Encoding::Latin1).unwrap();
        assert_eq!(decoded.chars().count(), 256);
        assert_eq!(normalize(&raw), normalize_line_endings(&decoded));
    }

    #[test]
    fn only_crlf_pairs_are_collapsed() {
        let raw = b"one\r\ntwo\rthree\nfour\r\n\r\n";
        assert_eq!(normalize(raw), "one\ntwo\rthree\nfour\n\n");
    }

    #[test]
    fn utf8_decode_reports_offset_of_bad_byte() {
        let raw = [b'a', b'b', 0xE9, b'c'];
        match decode(&raw, Encoding::Utf8) {
            Err(ExtractError::Decode { encoding, offset }) => {
                assert_eq!(encoding, "utf-8");
                assert_eq!(offset, 2);
            }
            other => panic!("expected decode error, got {:?}", other),
        }
        assert_eq!(decode(&raw, Encoding::Latin1).unwrap(), "ab\u{e9}c");
    }

    #[test]
    fn read_normalized_consumes_reader() {
        let input: &[u8] = b"Title\r\n\r\nBody\r\n";
        let text = read_normalized(input, Encoding::Latin1).unwrap();
        assert_eq!(text, "Title\n\nBody\n");
    }
}
