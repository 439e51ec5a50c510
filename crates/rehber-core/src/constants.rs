/// Route component constants shared across crates
pub const API_ROUTE_COMPONENT: &str = "api";
pub const API_ROUTE_PREFIX: &str = const_str::concat!("/", API_ROUTE_COMPONENT);

pub const CONTACTS_ROUTE_COMPONENT: &str = "contacts";
pub const CONTACTS_ROUTE_PREFIX: &str =
    const_str::concat!(API_ROUTE_PREFIX, "/", CONTACTS_ROUTE_COMPONENT);

pub const IMPORT_ROUTE_COMPONENT: &str = "import";
pub const IMPORT_ROUTE_PREFIX: &str =
    const_str::concat!(CONTACTS_ROUTE_PREFIX, "/", IMPORT_ROUTE_COMPONENT);

/// Import source tag written on every record produced by the vCard pipeline.
pub const VCARD_SOURCE: &str = "vcard";

/// Separator between the source tag and the digest in an external id.
pub const EXTERNAL_ID_INFIX: &str = "_sf_";

/// Upload ceiling applied by the HTTP layer when nothing is configured (5 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Rows per insert batch in the contact store.
pub const DEFAULT_BATCH_SIZE: usize = 500;

/// File extensions accepted for vCard uploads.
pub const VCARD_EXTENSIONS: [&str; 2] = [".vcf", ".vcard"];
