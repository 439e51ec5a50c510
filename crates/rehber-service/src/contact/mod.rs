//! vCard contact import.
//!
//! ```text
//! bytes ─► decode ─► VCardContactParser ─► records ─► external ids ─► ContactStore
//!                    │ split blocks
//!                    │ structured grammar ─► extract
//!                    └ grammar error ─────► extract_manual
//! ```

pub mod external_id;
pub mod extract;
pub mod import;
pub mod parser;
pub mod phone;
pub mod record;
pub mod splitter;
pub mod store;
pub mod text;

pub use external_id::generate_external_id;
pub use extract::{EmbeddedPhoto, embedded_photo, extract, extract_manual};
pub use import::{ContactImporter, ImportReport, NO_VALID_CONTACTS};
pub use parser::{ParsedDocument, VCardContactParser};
pub use phone::normalize_phone;
pub use record::{AddressEntry, EmailEntry, NormalizedContactRecord, PhoneEntry};
pub use splitter::{count_begin_markers, split_blocks};
pub use store::{ContactStore, InMemoryContactStore, StoredContact};
