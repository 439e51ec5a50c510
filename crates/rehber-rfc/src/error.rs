use thiserror::Error;

use crate::rfc::mime::QuotedPrintableError;
use crate::rfc::vcard::ParseError;

/// RFC parsing and decoding errors
#[derive(Error, Debug)]
pub enum RfcError {
    #[error("vCard parse error: {0}")]
    VCardParse(#[from] ParseError),

    #[error("Quoted-printable error: {0}")]
    QuotedPrintable(#[from] QuotedPrintableError),
}

pub type RfcResult<T> = std::result::Result<T, RfcError>;
