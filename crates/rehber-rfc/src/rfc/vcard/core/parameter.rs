//! vCard parameter types.

/// A vCard parameter.
///
/// Parameters can have multiple values (e.g., TYPE=home,work).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VCardParameter {
    /// Parameter name (normalized to uppercase).
    pub name: String,
    /// Parameter values.
    pub values: Vec<String>,
}

impl VCardParameter {
    /// Creates a new parameter with a single value.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into().to_ascii_uppercase(),
            values: vec![value.into()],
        }
    }

    /// Creates a parameter with multiple values.
    #[must_use]
    pub fn multi(name: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            name: name.into().to_ascii_uppercase(),
            values,
        }
    }

    /// Interprets a vCard 2.1 parameter written without a name.
    ///
    /// `TEL;CELL;VOICE:` and `NOTE;QUOTED-PRINTABLE:` are legal 2.1. Transfer
    /// encodings become `ENCODING`, everything else becomes a `TYPE` value.
    #[must_use]
    pub fn bare(token: &str) -> Self {
        let token = token.trim();
        if encodings::is_transfer_encoding(token) {
            Self::new("ENCODING", token)
        } else {
            Self::type_param(token)
        }
    }

    /// Returns the first value, if any.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        self.values.first().map(String::as_str)
    }

    /// Returns whether the parameter has the specified value (case-insensitive).
    #[must_use]
    pub fn has_value(&self, value: &str) -> bool {
        self.values.iter().any(|v| v.eq_ignore_ascii_case(value))
    }

    /// Creates a TYPE parameter.
    #[must_use]
    pub fn type_param(value: impl Into<String>) -> Self {
        Self::new("TYPE", value)
    }
}

/// TYPE values the importer looks at.
pub mod types {
    pub const HOME: &str = "HOME";
    pub const WORK: &str = "WORK";
    pub const CELL: &str = "CELL";
    pub const MOBILE: &str = "MOBILE";
    pub const VOICE: &str = "VOICE";
    pub const INTERNET: &str = "INTERNET";
    pub const PREF: &str = "PREF";
}

/// Values of the `ENCODING` parameter.
pub mod encodings {
    pub const QUOTED_PRINTABLE: &str = "QUOTED-PRINTABLE";
    pub const BASE64: &str = "BASE64";
    /// vCard 3.0 spelling of base64 (RFC 2426 §5).
    pub const B: &str = "B";
    pub const EIGHT_BIT: &str = "8BIT";
    pub const SEVEN_BIT: &str = "7BIT";

    /// Returns whether `value` names base64 in either spelling.
    #[must_use]
    pub fn is_base64(value: &str) -> bool {
        value.eq_ignore_ascii_case(BASE64) || value.eq_ignore_ascii_case(B)
    }

    /// Returns whether `value` is a transfer encoding that may appear bare.
    #[must_use]
    pub fn is_transfer_encoding(value: &str) -> bool {
        [QUOTED_PRINTABLE, BASE64, EIGHT_BIT, SEVEN_BIT]
            .iter()
            .any(|e| value.eq_ignore_ascii_case(e))
    }
}
