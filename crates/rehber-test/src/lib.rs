//! Integration test support: workspace re-exports and shared vCard fixtures.

pub mod component {
    pub use rehber_core::{constants, types};
    pub use rehber_service::contact;

    pub mod error {
        pub use rehber_core::error::*;
        pub use rehber_service::error::*;
    }

    pub mod config {
        pub use rehber_app::config::ConfigHandler;
        pub use rehber_core::config::*;
    }

    pub mod store {
        pub use rehber_app::store_handler::ContactStoreHandler;
        pub use rehber_service::contact::{ContactStore, InMemoryContactStore, StoredContact};
    }
}

pub mod app {
    pub use rehber_app::app::api;
    pub use rehber_app::{config, middleware, store_handler};
}

pub use rehber_rfc as rfc;

/// Phone exports seen in the wild.
pub mod fixtures {
    /// Three importable contacts with the three phone spellings the
    /// normalizer rewrites.
    pub const THREE_CONTACTS: &str = "BEGIN:VCARD\r\n\
        VERSION:3.0\r\n\
        N:Doe;John;;;\r\n\
        FN:John Doe\r\n\
        TEL;TYPE=CELL:+905321234567\r\n\
        EMAIL;TYPE=INTERNET:john.doe@example.com\r\n\
        END:VCARD\r\n\
        BEGIN:VCARD\r\n\
        VERSION:3.0\r\n\
        N:Smith;Jane;;;\r\n\
        FN:Jane Smith\r\n\
        TEL;TYPE=HOME:05329876543\r\n\
        END:VCARD\r\n\
        BEGIN:VCARD\r\n\
        VERSION:3.0\r\n\
        FN:Ali Veli\r\n\
        TEL:532 111 22 33\r\n\
        END:VCARD\r\n";

    /// A card with a name and nothing to reach it by.
    pub const EMPTY_CONTACT: &str = "BEGIN:VCARD\r\n\
        VERSION:3.0\r\n\
        FN:Empty Contact Test\r\n\
        END:VCARD\r\n";

    /// One good card followed by one that never ends.
    pub const MISSING_END: &str = "BEGIN:VCARD\r\n\
        VERSION:3.0\r\n\
        FN:Good Contact\r\n\
        EMAIL:good@example.com\r\n\
        END:VCARD\r\n\
        BEGIN:VCARD\r\n\
        VERSION:3.0\r\n\
        FN:Cut Off\r\n\
        EMAIL:cut@example.com\r\n";

    /// An Android-style 2.1 export with quoted-printable Turkish names.
    pub const ANDROID_QP: &str = "BEGIN:VCARD\r\n\
        VERSION:2.1\r\n\
        N;CHARSET=UTF-8;ENCODING=QUOTED-PRINTABLE:=C3=96zt=C3=BCrk;Bu=C4=9Fra;;;\r\n\
        FN;CHARSET=UTF-8;ENCODING=QUOTED-PRINTABLE:Bu=C4=9Fra =C3=96zt=C3=BCrk\r\n\
        TEL;CELL;PREF:0532 123 45 67\r\n\
        TEL;HOME:0212 555 44 33\r\n\
        END:VCARD\r\n";

    /// A card the grammar refuses (unknown version) that the line scanner
    /// still reads.
    pub const UNKNOWN_VERSION: &str = "BEGIN:VCARD\r\n\
        VERSION:5.0\r\n\
        FN:Future Person\r\n\
        EMAIL:Future@Example.com\r\n\
        END:VCARD\r\n";
}
