//! vCard core types.
//!
//! - [`VCard`] - Complete vCard representation
//! - [`VCardProperty`] - Individual property with parameters and value
//! - [`VCardParameter`] - Property parameters
//! - [`VCardValue`] - Property value variants
//!
//! Structured values: [`StructuredName`] (N), [`Address`] (ADR) and
//! [`Organization`] (ORG). Dates may be truncated ([`VCardDate`]) or free
//! text ([`DateAndOrTime::Text`]).

mod datetime;
mod parameter;
mod property;
mod structured;
mod value;
mod vcard;

pub use datetime::{DateAndOrTime, VCardDate};
pub use parameter::{VCardParameter, encodings, types};
pub use property::{VCardProperty, names};
pub use structured::{Address, Organization, StructuredName};
pub use value::VCardValue;
pub use vcard::{VCard, VCardVersion};
