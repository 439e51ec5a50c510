//! Decoding of vCard text values.
//!
//! Values arrive either plain or quoted-printable, and quoted-printable bytes
//! may be UTF-8 or a legacy single-byte charset. Every function here is
//! total: when decoding fails the trimmed raw value is returned.

use std::sync::LazyLock;

use encoding_rs::Encoding;
use regex::Regex;

use rehber_rfc::error::RfcError;
use rehber_rfc::rfc::mime::{decode_quoted_printable, is_quoted_printable};

use crate::error::{ServiceError, ServiceResult};

static QP_ESCAPE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"=[0-9A-Fa-f]{2}").ok());

/// Returns whether `value` contains something that looks like a `=XX` escape.
#[must_use]
pub fn looks_quoted_printable(value: &str) -> bool {
    QP_ESCAPE
        .as_ref()
        .is_some_and(|pattern| pattern.is_match(value))
}

/// ## Summary
/// Decodes a value with an optional encoding hint.
///
/// With a hint, only quoted-printable is acted upon. Without one, a value
/// containing a `=XX` escape is assumed to be quoted-printable. This is the
/// path used for raw lines, where no parameters are trusted.
#[must_use]
pub fn decode(value: &str, encoding_hint: Option<&str>) -> String {
    let quoted_printable = match encoding_hint {
        Some(hint) => is_quoted_printable(hint),
        None => looks_quoted_printable(value),
    };

    if quoted_printable {
        decode_quoted_printable_text(value, None)
    } else {
        value.trim().to_string()
    }
}

/// Decodes a value according to its declared `ENCODING` parameter only.
///
/// A value without a quoted-printable declaration is returned trimmed, even
/// if it happens to contain `=XX` sequences.
#[must_use]
pub fn decode_declared(value: &str, encoding: Option<&str>) -> String {
    decode_with_charset(value, encoding, None)
}

/// ## Summary
/// Decodes a value according to its declared `ENCODING` and `CHARSET`.
///
/// Quoted-printable bytes are read through the declared charset when it is a
/// known non-UTF-8 label (`windows-1254`, `ISO-8859-9`, ...), then as UTF-8.
/// If neither yields text the trimmed raw value is returned.
#[must_use]
pub fn decode_with_charset(value: &str, encoding: Option<&str>, charset: Option<&str>) -> String {
    if encoding.is_some_and(is_quoted_printable) {
        decode_quoted_printable_text(value, charset)
    } else {
        value.trim().to_string()
    }
}

fn decode_quoted_printable_text(value: &str, charset: Option<&str>) -> String {
    quoted_printable_to_text(value, charset).unwrap_or_else(|error| {
        tracing::debug!(%error, "Quoted-printable value kept raw");
        value.trim().to_string()
    })
}

/// ## Errors
/// Returns `ServiceError::RfcError` for a malformed escape, or
/// `ServiceError::DecodeError` when the bytes fit neither the declared
/// charset nor UTF-8.
fn quoted_printable_to_text(value: &str, charset: Option<&str>) -> ServiceResult<String> {
    let bytes = decode_quoted_printable(value.trim().as_bytes()).map_err(RfcError::from)?;

    if let Some(text) = charset.and_then(|label| decode_legacy_charset(&bytes, label)) {
        return Ok(text.trim().to_string());
    }

    String::from_utf8(bytes)
        .map(|text| text.trim().to_string())
        .map_err(|error| ServiceError::DecodeError(error.to_string()))
}

/// Decodes bytes through a non-UTF-8 charset label, strictly.
fn decode_legacy_charset(bytes: &[u8], label: &str) -> Option<String> {
    let encoding = Encoding::for_label(label.trim().as_bytes())?;
    if encoding == encoding_rs::UTF_8 {
        return None;
    }
    encoding
        .decode_without_bom_handling_and_without_replacement(bytes)
        .map(std::borrow::Cow::into_owned)
}
