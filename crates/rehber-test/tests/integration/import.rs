//! Import pipeline scenarios run directly against the service crate.

use std::sync::Arc;

use rehber_test::component::contact::{
    ContactImporter, InMemoryContactStore, NO_VALID_CONTACTS, VCardContactParser,
};

use super::helpers::{ContactStore, OwnerRef, fixtures};

fn owner(name: &str) -> OwnerRef {
    OwnerRef::new(name).unwrap()
}

fn importer() -> ContactImporter<Arc<InMemoryContactStore>> {
    ContactImporter::new(Arc::new(InMemoryContactStore::default()))
}

#[test_log::test]
fn three_contact_fixture_imports_fully() {
    let importer = importer();
    let report = importer.import_bytes(fixtures::THREE_CONTACTS.as_bytes(), &owner("alice"));

    assert_eq!(report.imported_count, 3);
    assert_eq!(report.failed_count, 0);
    assert_eq!(report.total_processed, 3);

    let stored = importer.store().list(&owner("alice")).unwrap();
    let phones: Vec<_> = stored.iter().map(|c| c.record.mobile_phone.as_str()).collect();
    assert_eq!(phones, ["+905321234567", "+905329876543", "+905321112233"]);
    assert!(stored.iter().all(|c| {
        c.record.external_id.starts_with("vcard_sf_") && c.record.external_id.len() == 41
    }));
}

#[test_log::test]
fn reimport_is_idempotent() {
    let importer = importer();
    let bytes = fixtures::THREE_CONTACTS.as_bytes();
    importer.import_bytes(bytes, &owner("alice"));

    let again = importer.import_bytes(bytes, &owner("alice"));
    assert_eq!(again.imported_count, 0);
    assert_eq!(again.failed_count, again.total_processed);
    assert_eq!(importer.store().len().unwrap(), 3);
}

#[test_log::test]
fn empty_contact_is_not_imported() {
    let report = importer().import_bytes(fixtures::EMPTY_CONTACT.as_bytes(), &owner("alice"));
    assert_eq!(report.imported_count, 0);
    assert_eq!(report.failed_count, 1);
    assert_eq!(report.errors, [NO_VALID_CONTACTS]);
}

#[test_log::test]
fn missing_end_marker_keeps_the_good_card() {
    let records = VCardContactParser::new().parse(fixtures::MISSING_END);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].full_name, "Good Contact");

    let report = importer().import_bytes(fixtures::MISSING_END.as_bytes(), &owner("alice"));
    assert_eq!(report.imported_count, 1);
    assert_eq!(report.total_processed, 2);
    assert_eq!(report.failed_count, 1);
}

#[test_log::test]
fn android_quoted_printable_export() {
    let records = VCardContactParser::new().parse(fixtures::ANDROID_QP);
    assert_eq!(records.len(), 1);

    let record = &records[0];
    assert_eq!(record.first_name, "Buğra");
    assert_eq!(record.last_name, "Öztürk");
    assert_eq!(record.full_name, "Buğra Öztürk");
    assert_eq!(record.mobile_phone, "+905321234567");
    assert_eq!(record.home_phone, "+902125554433");
}

#[test_log::test]
fn unknown_version_goes_through_line_scan() {
    let document = VCardContactParser::new().parse_document(fixtures::UNKNOWN_VERSION);
    assert_eq!(document.fallbacks, 1);
    assert_eq!(document.records.len(), 1);
    assert_eq!(document.records[0].primary_email, "future@example.com");
}

#[test_log::test]
fn external_ids_differ_per_owner() {
    let importer = importer();
    importer.import_bytes(fixtures::THREE_CONTACTS.as_bytes(), &owner("alice"));
    importer.import_bytes(fixtures::THREE_CONTACTS.as_bytes(), &owner("bob"));

    let alice = importer.store().list(&owner("alice")).unwrap();
    let bob = importer.store().list(&owner("bob")).unwrap();
    assert_eq!(alice.len(), 3);
    assert_eq!(bob.len(), 3);
    assert_ne!(alice[0].record.external_id, bob[0].record.external_id);
}
