//! Deterministic external ids for imported contacts.

use md5::{Digest, Md5};

use rehber_core::constants::EXTERNAL_ID_INFIX;
use rehber_core::types::{ImportSource, OwnerRef};

use super::record::NormalizedContactRecord;

/// ## Summary
/// Derives the external id `<source>_sf_<md5 hex>` of a record.
///
/// The digest covers the mobile phone, primary email, full, first and last
/// names, the optional salt and the owner, skipping empty components. The
/// joined text is lower-cased before hashing, so the id is insensitive to
/// case changes in those fields.
#[must_use]
pub fn generate_external_id(
    record: &NormalizedContactRecord,
    owner: &OwnerRef,
    source: ImportSource,
    salt: Option<usize>,
) -> String {
    let salt = salt.map(|salt| salt.to_string());
    let components = [
        Some(record.mobile_phone.as_str()),
        Some(record.primary_email.as_str()),
        Some(record.full_name.as_str()),
        Some(record.first_name.as_str()),
        Some(record.last_name.as_str()),
        salt.as_deref(),
        Some(owner.as_str()),
    ];

    let key = components
        .into_iter()
        .flatten()
        .filter(|component| !component.is_empty())
        .collect::<Vec<_>>()
        .join("-")
        .to_lowercase();

    let digest = Md5::digest(key.trim().as_bytes());
    format!("{source}{EXTERNAL_ID_INFIX}{}", hex::encode(digest))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> NormalizedContactRecord {
        NormalizedContactRecord {
            first_name: "John".into(),
            last_name: "Doe".into(),
            full_name: "John Doe".into(),
            mobile_phone: "+905321234567".into(),
            primary_email: "john.doe@example.com".into(),
            ..NormalizedContactRecord::default()
        }
    }

    fn owner() -> OwnerRef {
        OwnerRef::new("alice").unwrap()
    }

    #[test]
    fn shape() {
        let id = generate_external_id(&record(), &owner(), ImportSource::Vcard, Some(0));
        assert!(id.starts_with("vcard_sf_"));
        assert_eq!(id.len(), 41);
        assert!(id["vcard_sf_".len()..].chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn deterministic() {
        let a = generate_external_id(&record(), &owner(), ImportSource::Vcard, Some(3));
        let b = generate_external_id(&record(), &owner(), ImportSource::Vcard, Some(3));
        assert_eq!(a, b);
    }

    #[test]
    fn salt_and_owner_change_the_id() {
        let base = generate_external_id(&record(), &owner(), ImportSource::Vcard, None);
        let salted = generate_external_id(&record(), &owner(), ImportSource::Vcard, Some(1));
        let other_owner = OwnerRef::new("bob").unwrap();
        let other = generate_external_id(&record(), &other_owner, ImportSource::Vcard, None);
        assert_ne!(base, salted);
        assert_ne!(base, other);
    }

    #[test]
    fn case_insensitive() {
        let mut shouting = record();
        shouting.full_name = "JOHN DOE".into();
        shouting.first_name = "JOHN".into();
        shouting.last_name = "DOE".into();
        assert_eq!(
            generate_external_id(&record(), &owner(), ImportSource::Vcard, Some(0)),
            generate_external_id(&shouting, &owner(), ImportSource::Vcard, Some(0)),
        );
    }

    #[test]
    fn known_digest() {
        let record = NormalizedContactRecord::default();
        let owner = OwnerRef::new("local").unwrap();
        // md5("local")
        assert_eq!(
            generate_external_id(&record, &owner, ImportSource::Vcard, None),
            "vcard_sf_f5ddaf0ca7929578b408c909429f68f2"
        );
    }
}
