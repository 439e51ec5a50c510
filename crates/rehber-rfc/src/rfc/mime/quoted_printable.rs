//! Quoted-printable decoding (RFC 2045 §6.7).

use thiserror::Error;

/// A malformed quoted-printable escape.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QuotedPrintableError {
    /// `=` followed by something that is neither two hex digits nor a line break.
    #[error("invalid escape at byte {offset}")]
    InvalidEscape { offset: usize },
    /// `=X` at the very end of the input.
    #[error("truncated escape at byte {offset}")]
    TruncatedEscape { offset: usize },
}

/// Returns whether an `ENCODING` parameter value names quoted-printable.
#[must_use]
pub fn is_quoted_printable(encoding: &str) -> bool {
    encoding.trim().eq_ignore_ascii_case("quoted-printable")
}

/// Decodes quoted-printable bytes.
///
/// `=XX` escapes (either hex case) become the byte `0xXX`. Soft line breaks
/// (`=` before CRLF or LF, or a lone trailing `=` left behind after unfolding)
/// are removed. All other bytes pass through untouched.
///
/// ## Errors
/// Returns an error on an escape that is not followed by two hex digits or a
/// line break.
pub fn decode_quoted_printable(input: &[u8]) -> Result<Vec<u8>, QuotedPrintableError> {
    let mut out = Vec::with_capacity(input.len());
    let mut i = 0;

    while i < input.len() {
        let byte = input[i];
        if byte != b'=' {
            out.push(byte);
            i += 1;
            continue;
        }

        match input.get(i + 1..) {
            // Trailing soft break
            Some([]) | None => i += 1,
            Some([b'\r', b'\n', ..]) => i += 3,
            Some([b'\n', ..]) => i += 2,
            Some([hi, lo, ..]) => match (hex_value(*hi), hex_value(*lo)) {
                (Some(hi), Some(lo)) => {
                    out.push(hi << 4 | lo);
                    i += 3;
                }
                _ => return Err(QuotedPrintableError::InvalidEscape { offset: i }),
            },
            Some([single]) => {
                return Err(if hex_value(*single).is_some() {
                    QuotedPrintableError::TruncatedEscape { offset: i }
                } else {
                    QuotedPrintableError::InvalidEscape { offset: i }
                });
            }
        }
    }

    Ok(out)
}

fn hex_value(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        _ => None,
    }
}
