//! Turning a whole vCard document into normalized records.

use rehber_rfc::rfc::vcard::parse_single;

use super::extract::{extract, extract_manual};
use super::record::NormalizedContactRecord;
use super::splitter::{count_begin_markers, split_blocks};

/// Outcome of parsing one document.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ParsedDocument {
    /// Records that passed the validity gate, in source order.
    pub records: Vec<NormalizedContactRecord>,
    /// Number of `BEGIN:VCARD` markers, terminated or not.
    pub begin_markers: usize,
    /// Complete blocks that produced no record.
    pub rejected: usize,
    /// Blocks the grammar refused that went through the line scanner.
    pub fallbacks: usize,
}

/// Stateless vCard document parser.
///
/// Each block is parsed on its own: a malformed block never affects its
/// neighbours.
#[derive(Debug, Default, Clone, Copy)]
pub struct VCardContactParser;

impl VCardContactParser {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Returns the records of `content` that passed the validity gate.
    #[must_use]
    pub fn parse(&self, content: &str) -> Vec<NormalizedContactRecord> {
        self.parse_document(content).records
    }

    /// ## Summary
    /// Parses every block of `content` and keeps the accounting.
    ///
    /// A block that fails the vCard grammar is handed to the line scanner.
    /// Blocks without `END:VCARD` are not parsed but still count in
    /// `begin_markers`.
    #[tracing::instrument(level = "debug", skip_all, fields(bytes = content.len()))]
    #[must_use]
    pub fn parse_document(&self, content: &str) -> ParsedDocument {
        let blocks = split_blocks(content);
        let mut document = ParsedDocument {
            records: Vec::with_capacity(blocks.len()),
            begin_markers: count_begin_markers(content),
            ..ParsedDocument::default()
        };

        for (index, block) in blocks.iter().enumerate() {
            let record = match parse_single(block) {
                Ok(card) => extract(&card),
                Err(error) => {
                    tracing::warn!(block = index, %error, "vCard grammar failed, scanning lines");
                    document.fallbacks += 1;
                    extract_manual(block)
                }
            };

            match record {
                Some(record) => document.records.push(record),
                None => {
                    tracing::trace!(block = index, "Block produced no record");
                    document.rejected += 1;
                }
            }
        }

        tracing::debug!(
            blocks = blocks.len(),
            records = document.records.len(),
            rejected = document.rejected,
            fallbacks = document.fallbacks,
            "Document parsed"
        );

        document
    }
}
