//! Wire-format support for rehber: the vCard grammar (RFC 2426 / RFC 6350,
//! with the vCard 2.1 leniencies phones still emit) and the MIME
//! quoted-printable codec.

pub mod error;
pub mod rfc;
