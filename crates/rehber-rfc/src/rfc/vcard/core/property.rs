//! vCard property types.

use super::parameter::{VCardParameter, encodings};
use super::value::VCardValue;

/// A vCard property.
///
/// Contains the parsed value along with the raw value as it appeared after
/// unfolding.
#[derive(Debug, Clone, PartialEq)]
pub struct VCardProperty {
    /// Optional property group (e.g., "item1" in "item1.TEL").
    pub group: Option<String>,
    /// Property name (normalized to uppercase).
    pub name: String,
    /// Parameters in order of appearance.
    pub params: Vec<VCardParameter>,
    /// Parsed value.
    pub value: VCardValue,
    /// Raw value string.
    pub raw_value: String,
}

impl VCardProperty {
    /// Creates a property with a text value.
    #[must_use]
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        let value_str = value.into();
        Self {
            group: None,
            name: name.into().to_ascii_uppercase(),
            params: Vec::new(),
            value: VCardValue::Text(value_str.clone()),
            raw_value: value_str,
        }
    }

    /// Returns the parameter with the given name.
    #[must_use]
    pub fn get_param(&self, name: &str) -> Option<&VCardParameter> {
        self.params.iter().find(|p| p.name.eq_ignore_ascii_case(name))
    }

    /// Returns the value of a parameter.
    #[must_use]
    pub fn get_param_value(&self, name: &str) -> Option<&str> {
        self.get_param(name)?.value()
    }

    /// Returns whether this property has the specified TYPE value.
    ///
    /// Several TYPE parameters may appear on one line (`TEL;TYPE=CELL;TYPE=VOICE`).
    #[must_use]
    pub fn has_type(&self, type_value: &str) -> bool {
        self.params
            .iter()
            .filter(|p| p.name == "TYPE")
            .any(|p| p.has_value(type_value))
    }

    /// Returns every TYPE value in order of appearance.
    #[must_use]
    pub fn type_values(&self) -> Vec<&str> {
        self.params
            .iter()
            .filter(|p| p.name == "TYPE")
            .flat_map(|p| p.values.iter().map(String::as_str))
            .filter(|v| !v.trim().is_empty())
            .collect()
    }

    /// Returns the declared `ENCODING` parameter.
    #[must_use]
    pub fn encoding(&self) -> Option<&str> {
        self.get_param_value("ENCODING")
    }

    /// Returns the declared `CHARSET` parameter.
    #[must_use]
    pub fn charset(&self) -> Option<&str> {
        self.get_param_value("CHARSET")
    }

    /// Returns whether the value was transferred as base64.
    #[must_use]
    pub fn is_base64(&self) -> bool {
        self.encoding().is_some_and(encodings::is_base64)
    }

    /// Returns the value as text if it is a text value.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        self.value.as_text()
    }
}

/// Property names the importer reads.
pub mod names {
    pub const FN: &str = "FN";
    pub const N: &str = "N";
    pub const NICKNAME: &str = "NICKNAME";
    pub const PHOTO: &str = "PHOTO";
    pub const BDAY: &str = "BDAY";
    pub const ANNIVERSARY: &str = "ANNIVERSARY";
    pub const X_ANNIVERSARY: &str = "X-ANNIVERSARY";
    pub const ADR: &str = "ADR";
    pub const TEL: &str = "TEL";
    pub const EMAIL: &str = "EMAIL";
    pub const TITLE: &str = "TITLE";
    pub const ROLE: &str = "ROLE";
    pub const ORG: &str = "ORG";
    pub const NOTE: &str = "NOTE";
    pub const URL: &str = "URL";
}
