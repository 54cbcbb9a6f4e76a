use anyhow::{anyhow, Result};
use encoding_rs::{Encoding as RsEncoding, GB18030, SHIFT_JIS, UTF_8};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::str::FromStr;

pub trait TextDecoder {
    fn decode<'a>(&self, bytes: &'a [u8]) -> Cow<'a, str>;

    /// Decode C-style string: stop at the first NUL (0x00).
    fn decode_cstr<'a>(&self, bytes: &'a [u8]) -> Cow<'a, str> {
        let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
        self.decode(&bytes[..end])
    }

    /// Decode the NUL-terminated string starting at `offset` inside a blob.
    /// Returns `None` when `offset` is past the end of the blob.
    fn decode_cstr_at<'a>(&self, blob: &'a [u8], offset: usize) -> Option<Cow<'a, str>> {
        blob.get(offset..).map(|rest| self.decode_cstr(rest))
    }
}

/// Text encodings scripts are known to ship with.
///
/// Retail scripts use Shift-JIS; the others exist for fan translations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    Utf8,
    #[default]
    #[serde(alias = "sjis")]
    ShiftJis,
    /// Treat GBK as GB18030 (superset).
    Gbk,
}

impl Encoding {
    #[inline]
    pub fn as_encoding_rs(self) -> &'static RsEncoding {
        match self {
            Encoding::Utf8 => UTF_8,
            Encoding::ShiftJis => SHIFT_JIS,
            Encoding::Gbk => GB18030,
        }
    }
}

impl FromStr for Encoding {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let lower = s.to_ascii_lowercase();
        match lower.as_str() {
            "sjis" | "shiftjis" | "shift_jis" => Ok(Encoding::ShiftJis),
            "gbk" | "gb18030" => Ok(Encoding::Gbk),
            "utf8" | "utf-8" => Ok(Encoding::Utf8),
            _ => Err(anyhow!("unknown text encoding: {s}")),
        }
    }
}

/// A simple decoder bound to one encoding.
#[derive(Debug, Clone, Copy, Default)]
pub struct Decoder {
    enc: Encoding,
}

impl Decoder {
    #[inline]
    pub fn new(enc: Encoding) -> Self {
        Self { enc }
    }
}

impl TextDecoder for Decoder {
    fn decode<'a>(&self, bytes: &'a [u8]) -> Cow<'a, str> {
        match self.enc {
            Encoding::Utf8 => String::from_utf8_lossy(bytes),
            Encoding::ShiftJis | Encoding::Gbk => {
                let (cow, _, had_errors) = self.enc.as_encoding_rs().decode(bytes);
                if had_errors {
                    log::debug!("{:?} decode error in {} bytes", self.enc, bytes.len());
                }
                cow
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_cstr_stops_at_nul() {
        let d = Decoder::new(Encoding::Utf8);
        assert_eq!(d.decode_cstr(b"hello\0world"), "hello");
    }

    #[test]
    fn decode_cstr_at_offset() {
        let d = Decoder::default();
        let blob = b"abc\0def\0";
        assert_eq!(d.decode_cstr_at(blob, 4).as_deref(), Some("def"));
        assert_eq!(d.decode_cstr_at(blob, 8).as_deref(), Some(""));
        assert_eq!(d.decode_cstr_at(blob, 9), None);
    }

    #[test]
    fn shift_jis_kana() {
        let d = Decoder::new(Encoding::ShiftJis);
        // "テスト"
        let bytes = [0x83, 0x65, 0x83, 0x58, 0x83, 0x67];
        assert_eq!(d.decode(&bytes), "テスト");
    }

    #[test]
    fn parse_names() {
        assert_eq!("SJIS".parse::<Encoding>().unwrap(), Encoding::ShiftJis);
        assert_eq!("utf8".parse::<Encoding>().unwrap(), Encoding::Utf8);
        assert!("latin1".parse::<Encoding>().is_err());
    }
}
