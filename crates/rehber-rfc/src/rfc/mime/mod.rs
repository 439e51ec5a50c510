//! MIME content-transfer encodings (RFC 2045) used inside vCard values.
//!
//! vCard 2.1 exports (most Android phones, older Outlook) mark non-ASCII
//! values with `ENCODING=QUOTED-PRINTABLE` and a `CHARSET` parameter.
//! Only decoding is supported; nothing here writes vCards.

mod quoted_printable;

pub use quoted_printable::{QuotedPrintableError, decode_quoted_printable, is_quoted_printable};
