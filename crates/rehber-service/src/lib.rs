//! Contact import pipeline.
//!
//! Raw vCard bytes go in, an [`ImportReport`](contact::ImportReport) comes
//! out. Persistence is delegated to a [`ContactStore`](contact::ContactStore).

pub mod contact;
pub mod error;
