//! Loading document bytes under the UTF-8 → CP949 fallback policy.
//!
//! The corpus mixes UTF-8 files with files saved by Korean-locale Windows
//! tools. Exactly two encodings are tried, in this order.

use std::{fmt, path::Path};

use encoding_rs::EUC_KR;

use crate::{Error, Result};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Which encoding a document was decoded with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
  Utf8,
  /// Windows code page 949 (a superset of EUC-KR).
  Cp949,
}

impl fmt::Display for TextEncoding {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      TextEncoding::Utf8 => "UTF-8",
      TextEncoding::Cp949 => "CP949",
    })
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedText {
  pub text:     String,
  pub encoding: TextEncoding,
}

/// Decode `bytes` as UTF-8, falling back to CP949. `None` if both fail.
pub fn decode_bytes(bytes: &[u8]) -> Option<DecodedText> {
  let utf8 = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
  if let Ok(text) = std::str::from_utf8(utf8) {
    return Some(DecodedText {
      text:     text.to_owned(),
      encoding: TextEncoding::Utf8,
    });
  }

  // encoding_rs's EUC_KR is the WHATWG definition, i.e. windows-949.
  let (text, had_errors) = EUC_KR.decode_without_bom_handling(bytes);
  if had_errors {
    return None;
  }
  Some(DecodedText {
    text:     text.into_owned(),
    encoding: TextEncoding::Cp949,
  })
}

/// Read and decode the file at `path`.
pub fn read_text(path: &Path) -> Result<DecodedText> {
  let bytes = std::fs::read(path).map_err(|source| Error::Io {
    path: path.to_path_buf(),
    source,
  })?;
  decode_bytes(&bytes).ok_or_else(|| Error::Decode {
    path: path.to_path_buf(),
  })
}
