//! vCard grammar (RFC 2426, RFC 6350 and the vCard 2.1 dialect).
//!
//! This module turns the text of a single `BEGIN:VCARD` .. `END:VCARD` block
//! (or a whole document) into typed [`VCard`] values. It is read-only: the
//! importer never writes vCards back out.
//!
//! ## Usage
//!
//! ```rust
//! use rehber_rfc::rfc::vcard::parse_single;
//!
//! let input = "\
//! BEGIN:VCARD\r\n\
//! VERSION:2.1\r\n\
//! N:Doe;John;;;\r\n\
//! TEL;CELL:0532 123 45 67\r\n\
//! END:VCARD\r\n";
//!
//! let card = parse_single(input).unwrap();
//! assert!(card.get_property("TEL").unwrap().has_type("CELL"));
//! ```
//!
//! ## Leniency
//!
//! Phone exports rarely follow the RFCs to the letter, so the grammar accepts:
//!
//! - `VERSION:2.1` alongside 3.0 and 4.0
//! - bare 2.1 parameters (`TEL;CELL;VOICE:`), read as `TYPE` values
//! - quoted-printable soft line breaks, joined before the card is parsed
//! - `ENCODING=b` / `ENCODING=BASE64` values, decoded to binary
//! - unparsable `BDAY`/`ANNIVERSARY` values, preserved as text
//!
//! ## Submodules
//!
//! - [`core`] - Core types (`VCard`, `VCardProperty`, `VCardValue`, etc.)
//! - [`parse`] - Parsing functions and error types

pub mod core;
pub mod parse;

#[cfg(test)]
mod tests;

pub use core::{
    Address, DateAndOrTime, Organization, StructuredName, VCard, VCardDate, VCardParameter,
    VCardProperty, VCardValue, VCardVersion,
};
pub use parse::{ParseError, ParseErrorKind, ParseResult, parse, parse_single};
