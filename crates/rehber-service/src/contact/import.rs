//! End-to-end import of a vCard upload into a [`ContactStore`].

use std::io::Read;

use encoding_rs::Encoding;
use serde::{Deserialize, Serialize};

use rehber_core::config::{ImportConfig, default_fallback_encodings};
use rehber_core::types::{ImportSource, OwnerRef};

use crate::error::{ServiceError, ServiceResult};

use super::external_id::generate_external_id;
use super::parser::VCardContactParser;
use super::store::ContactStore;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Error entry used when a document yields no importable record.
pub const NO_VALID_CONTACTS: &str = "No valid contacts found";

/// Counters returned to the caller of an import.
///
/// `imported_count + failed_count == total_processed` always holds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportReport {
    pub imported_count: usize,
    pub failed_count: usize,
    pub total_processed: usize,
    pub errors: Vec<String>,
}

impl ImportReport {
    fn new(total_processed: usize, imported_count: usize) -> Self {
        Self {
            imported_count,
            failed_count: total_processed.saturating_sub(imported_count),
            total_processed: total_processed.max(imported_count),
            errors: Vec::new(),
        }
    }

    fn failed(total_processed: usize, error: String) -> Self {
        Self {
            errors: vec![error],
            ..Self::new(total_processed, 0)
        }
    }

    /// Human readable one-liner, e.g. `Imported 2 of 3 contacts`.
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Imported {} of {} contacts",
            self.imported_count, self.total_processed
        )
    }
}

/// Runs decode, parse, stamping and persistence for one upload at a time.
#[derive(Debug)]
pub struct ContactImporter<S> {
    store: S,
    parser: VCardContactParser,
    fallback_encodings: Vec<String>,
}

impl<S: ContactStore> ContactImporter<S> {
    #[must_use]
    pub fn new(store: S) -> Self {
        Self {
            store,
            parser: VCardContactParser::new(),
            fallback_encodings: default_fallback_encodings(),
        }
    }

    /// Creates an importer using the configured fallback charsets.
    #[must_use]
    pub fn from_config(store: S, config: &ImportConfig) -> Self {
        Self::new(store).with_fallback_encodings(config.fallback_encodings.clone())
    }

    /// Replaces the charset labels tried after UTF-8.
    #[must_use]
    pub fn with_fallback_encodings(mut self, labels: Vec<String>) -> Self {
        self.fallback_encodings = labels;
        self
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// ## Summary
    /// Imports every contact of a vCard document for `owner`.
    ///
    /// Never fails: decode and storage errors are reported in
    /// `ImportReport::errors` with `imported_count == 0`.
    #[tracing::instrument(skip(self, bytes, owner), fields(owner = %owner, bytes = bytes.len()))]
    pub fn import_bytes(&self, bytes: &[u8], owner: &OwnerRef) -> ImportReport {
        let content = match self.decode(bytes) {
            Ok(content) => content,
            Err(error) => {
                tracing::warn!(%error, "Upload could not be decoded");
                return ImportReport::failed(0, error.to_string());
            }
        };

        let document = self.parser.parse_document(&content);
        let total = document.begin_markers;

        if document.records.is_empty() {
            tracing::info!(total, "No importable contacts in upload");
            return ImportReport::failed(total, NO_VALID_CONTACTS.to_string());
        }

        let records = document
            .records
            .into_iter()
            .enumerate()
            .map(|(index, mut record)| {
                record.import_source = ImportSource::Vcard;
                record.owner_ref = Some(owner.clone());
                record.external_id =
                    generate_external_id(&record, owner, ImportSource::Vcard, Some(index));
                record
            })
            .collect();

        match self.store.bulk_create(records, true) {
            Ok(created) => {
                let report = ImportReport::new(total, created.len());
                tracing::info!(
                    imported = report.imported_count,
                    failed = report.failed_count,
                    total = report.total_processed,
                    "Import finished"
                );
                report
            }
            Err(error) => {
                tracing::error!(%error, "Failed to persist imported contacts");
                ImportReport::failed(total, error.to_string())
            }
        }
    }

    /// ## Summary
    /// Reads `reader` to the end and imports it like [`Self::import_bytes`].
    ///
    /// A read error is reported in the returned report.
    pub fn import_reader(&self, mut reader: impl Read, owner: &OwnerRef) -> ImportReport {
        let mut bytes = Vec::new();
        if let Err(error) = reader.read_to_end(&mut bytes) {
            tracing::warn!(%error, "Upload could not be read");
            let error = ServiceError::DecodeError(error.to_string());
            return ImportReport::failed(0, error.to_string());
        }
        self.import_bytes(&bytes, owner)
    }

    /// ## Summary
    /// Decodes an upload: UTF-8 first (BOM stripped), then each fallback label.
    ///
    /// ## Errors
    /// Returns `ServiceError::DecodeError` when no charset accepts the bytes.
    fn decode(&self, bytes: &[u8]) -> ServiceResult<String> {
        let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);

        if let Ok(text) = std::str::from_utf8(bytes) {
            return Ok(text.to_string());
        }

        for label in &self.fallback_encodings {
            let Some(encoding) = Encoding::for_label(label.trim().as_bytes()) else {
                tracing::debug!(label, "Unknown fallback charset label");
                continue;
            };
            if let Some(text) = encoding.decode_without_bom_handling_and_without_replacement(bytes)
            {
                tracing::warn!(
                    charset = encoding.name(),
                    "Upload is not UTF-8, decoded with fallback"
                );
                return Ok(text.into_owned());
            }
        }

        Err(ServiceError::DecodeError(
            "upload is not valid text in any supported charset".into(),
        ))
    }
}
