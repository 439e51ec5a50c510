pub mod mime;
pub mod vcard;
