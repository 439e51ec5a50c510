//! vCard parsing.
//!
//! ## Usage
//!
//! ```rust
//! use rehber_rfc::rfc::vcard::parse;
//!
//! let input = "\
//! BEGIN:VCARD\r\n\
//! VERSION:3.0\r\n\
//! FN:John Doe\r\n\
//! EMAIL;TYPE=INTERNET:john@example.com\r\n\
//! END:VCARD\r\n";
//!
//! let cards = parse::parse(input).unwrap();
//! assert_eq!(cards[0].formatted_name(), Some("John Doe"));
//! ```
//!
//! ## Features
//!
//! - Supports vCard 2.1, 3.0 and 4.0
//! - Handles line folding and quoted-printable soft line breaks
//! - Parses property groups (item1.TEL)
//! - Parses structured values (N, ADR, ORG)
//! - Parses partial/truncated dates
//! - RFC 6868 caret encoding for parameters

mod error;
mod lexer;
mod parser;
mod values;


pub use error::{ParseError, ParseErrorKind, ParseResult};
pub use lexer::{ContentLine, join_soft_line_breaks, parse_content_line, split_lines, unfold};
pub use parser::{parse, parse_single};
pub use values::{
    parse_address, parse_date, parse_date_and_or_time, parse_organization,
    parse_structured_name, split_component, split_structured, unescape_text,
};
