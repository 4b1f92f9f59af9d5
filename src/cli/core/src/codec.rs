/* src/cli/core/src/codec.rs */

use anyhow::{Context, Result};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;

pub fn encode(input: &str) -> String {
  STANDARD.encode(input.as_bytes())
}

/// Decode standard-alphabet base64 into bytes.
pub fn decode_bytes(input: &str) -> Result<Vec<u8>> {
  STANDARD.decode(input.trim()).context("invalid base64 input")
}

/// Decode to text, replacing invalid UTF-8 sequences.
pub fn decode(input: &str) -> Result<String> {
  Ok(String::from_utf8_lossy(&decode_bytes(input)?).into_owned())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn encodes_standard_alphabet() {
    assert_eq!(encode("hello world"), "aGVsbG8gd29ybGQ=");
    assert_eq!(encode(""), "");
    assert_eq!(encode("??>"), "Pz8+");
  }

  #[test]
  fn decodes_with_surrounding_whitespace() {
    assert_eq!(decode(" aGVsbG8gd29ybGQ=\n").unwrap(), "hello world");
  }

  #[test]
  fn rejects_invalid_input() {
    let err = decode("not base64!").unwrap_err();
    assert!(err.to_string().contains("invalid base64"));
  }

  #[test]
  fn rejects_url_safe_alphabet() {
    assert!(decode("Pz8-").is_err());
  }
}
