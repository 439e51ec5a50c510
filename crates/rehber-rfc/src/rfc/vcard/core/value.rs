//! vCard value types (RFC 6350 §4).

use super::datetime::DateAndOrTime;
use super::structured::{Address, Organization, StructuredName};

/// A vCard property value.
///
/// Only the value shapes the importer consumes get their own variant;
/// everything else is kept as text.
#[derive(Debug, Clone, PartialEq)]
pub enum VCardValue {
    /// Text value (RFC 6350 §4.1), escapes already removed.
    Text(String),

    /// Multi-valued text (comma-separated in source).
    TextList(Vec<String>),

    /// URI value (RFC 6350 §4.2).
    Uri(String),

    /// BDAY / ANNIVERSARY value.
    DateAndOrTime(DateAndOrTime),

    /// Structured name (N property).
    StructuredName(StructuredName),

    /// Address (ADR property).
    Address(Address),

    /// Organization (ORG property).
    Organization(Organization),

    /// Inline binary data (`ENCODING=b` / `ENCODING=BASE64`).
    Binary(Vec<u8>),

    /// Unknown/extension value (preserved verbatim).
    Unknown(String),
}

impl VCardValue {
    /// Returns the value as text if applicable.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) | Self::Unknown(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the text or URI string of the value.
    #[must_use]
    pub fn as_text_or_uri(&self) -> Option<&str> {
        match self {
            Self::Text(s) | Self::Unknown(s) | Self::Uri(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the first entry of a text list, or the text itself.
    #[must_use]
    pub fn first_text(&self) -> Option<&str> {
        match self {
            Self::TextList(values) => values.first().map(String::as_str),
            other => other.as_text(),
        }
    }

    /// Returns the value as a structured name if applicable.
    #[must_use]
    pub fn as_structured_name(&self) -> Option<&StructuredName> {
        match self {
            Self::StructuredName(n) => Some(n),
            _ => None,
        }
    }

    /// Returns the value as an address if applicable.
    #[must_use]
    pub fn as_address(&self) -> Option<&Address> {
        match self {
            Self::Address(a) => Some(a),
            _ => None,
        }
    }

    /// Returns the value as an organization if applicable.
    #[must_use]
    pub fn as_organization(&self) -> Option<&Organization> {
        match self {
            Self::Organization(o) => Some(o),
            _ => None,
        }
    }

    /// Returns the value as a date/time if applicable.
    #[must_use]
    pub fn as_date_and_or_time(&self) -> Option<&DateAndOrTime> {
        match self {
            Self::DateAndOrTime(d) => Some(d),
            _ => None,
        }
    }

    /// Returns decoded binary data if applicable.
    #[must_use]
    pub fn as_binary(&self) -> Option<&[u8]> {
        match self {
            Self::Binary(b) => Some(b),
            _ => None,
        }
    }
}
