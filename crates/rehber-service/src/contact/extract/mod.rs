//! Turning one vCard block into a [`NormalizedContactRecord`].
//!
//! [`extract`] reads a card that passed the grammar. [`extract_manual`] scans
//! the raw lines of a block that did not. Both apply the same validity gate.

mod manual;
mod photo;
mod structured;

pub use manual::extract_manual;
pub use photo::{EmbeddedPhoto, embedded_photo};
pub use structured::extract;

use super::record::NormalizedContactRecord;

/// Applies the full-name split and the validity gate.
fn finish(mut record: NormalizedContactRecord) -> Option<NormalizedContactRecord> {
    record.fill_names_from_full_name();
    if record.is_importable() {
        Some(record)
    } else {
        tracing::debug!(
            has_name = record.has_name(),
            has_channel = record.has_contact_channel(),
            "Record rejected"
        );
        None
    }
}
