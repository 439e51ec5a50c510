//! vCard wrapper type.

use super::property::{VCardProperty, names};
use super::structured::StructuredName;

/// vCard version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VCardVersion {
    /// vCard 2.1 (versit), still emitted by most phone exports.
    V2_1,
    /// vCard 3.0 (RFC 2426).
    V3,
    /// vCard 4.0 (RFC 6350).
    #[default]
    V4,
}

impl VCardVersion {
    /// Parses from version string.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "2.1" => Some(Self::V2_1),
            "3.0" => Some(Self::V3),
            "4.0" => Some(Self::V4),
            _ => None,
        }
    }
}

/// A complete vCard.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VCard {
    /// vCard version.
    pub version: VCardVersion,
    /// All properties in order of appearance.
    pub properties: Vec<VCardProperty>,
}

impl VCard {
    /// Creates a new, empty vCard 4.0.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a property to the vCard.
    pub fn add_property(&mut self, prop: VCardProperty) {
        self.properties.push(prop);
    }

    /// Returns all properties with the given name.
    #[must_use]
    pub fn get_properties(&self, name: &str) -> Vec<&VCardProperty> {
        self.properties
            .iter()
            .filter(|p| p.name.eq_ignore_ascii_case(name))
            .collect()
    }

    /// Returns the first property with the given name.
    #[must_use]
    pub fn get_property(&self, name: &str) -> Option<&VCardProperty> {
        self.properties
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }

    /// Returns the FN (formatted name) value.
    #[must_use]
    pub fn formatted_name(&self) -> Option<&str> {
        self.get_property(names::FN)?.as_text()
    }

    /// Returns the N (structured name) value.
    #[must_use]
    pub fn name(&self) -> Option<&StructuredName> {
        self.get_property(names::N)?.value.as_structured_name()
    }
}
