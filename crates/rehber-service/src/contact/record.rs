//! The normalized contact record produced by the parser.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use rehber_core::types::{ImportSource, OwnerRef};

/// One email address with its upper-cased TYPE label (`INTERNET`, `HOME,PREF`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailEntry {
    pub value: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// One normalized phone number with its upper-cased TYPE labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhoneEntry {
    pub value: String,
    pub types: Vec<String>,
}

/// One postal address.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressEntry {
    pub street: String,
    pub city: String,
    pub region: String,
    pub postal_code: String,
    pub country: String,
    #[serde(rename = "type")]
    pub kind: String,
    /// Non-empty parts joined with `", "`.
    pub formatted: String,
}

impl AddressEntry {
    /// Builds an entry and its `formatted` line.
    #[must_use]
    pub fn new(
        street: String,
        city: String,
        region: String,
        postal_code: String,
        country: String,
        kind: String,
    ) -> Self {
        let formatted = [&street, &city, &region, &postal_code, &country]
            .into_iter()
            .filter(|part| !part.is_empty())
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ");

        Self {
            street,
            city,
            region,
            postal_code,
            country,
            kind,
            formatted,
        }
    }

    /// Returns whether every address part is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.formatted.is_empty()
    }
}

/// A contact as extracted from one vCard block.
///
/// Text fields are empty strings when absent. `external_id` and `owner_ref`
/// are stamped by the importer, not by the parser.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedContactRecord {
    pub first_name: String,
    pub middle_name: String,
    pub last_name: String,
    pub full_name: String,
    pub nickname: String,

    pub primary_email: String,
    pub emails: Vec<EmailEntry>,
    pub mobile_phone: String,
    pub home_phone: String,
    pub work_phone: String,
    pub second_phone: String,
    pub third_phone: String,
    pub phones: Vec<PhoneEntry>,

    pub organization: String,
    pub job_title: String,
    pub department: String,

    pub birthday: Option<NaiveDate>,
    pub anniversary: Option<NaiveDate>,

    pub addresses: Vec<AddressEntry>,
    pub websites: Vec<String>,
    pub notes: String,
    pub photo_url: String,

    pub import_source: ImportSource,
    pub external_id: String,
    pub owner_ref: Option<OwnerRef>,
}

impl NormalizedContactRecord {
    /// Returns whether any of the name fields is set.
    #[must_use]
    pub fn has_name(&self) -> bool {
        [&self.first_name, &self.last_name, &self.full_name]
            .iter()
            .any(|s| !s.trim().is_empty())
    }

    /// Returns whether a primary email or any phone number is set.
    #[must_use]
    pub fn has_contact_channel(&self) -> bool {
        !self.primary_email.trim().is_empty()
            || !self.mobile_phone.trim().is_empty()
            || self.phones.iter().any(|p| !p.value.trim().is_empty())
    }

    /// Returns whether the record may be persisted: a name and a way to reach it.
    #[must_use]
    pub fn is_importable(&self) -> bool {
        self.has_name() && self.has_contact_channel()
    }

    /// Splits `full_name` into first and last name when neither is set.
    ///
    /// The first whitespace-separated token becomes the first name and the
    /// remainder the last name.
    pub fn fill_names_from_full_name(&mut self) {
        if !self.first_name.is_empty() || !self.last_name.is_empty() {
            return;
        }
        let full = self.full_name.trim();
        if full.is_empty() {
            return;
        }
        match full.split_once(char::is_whitespace) {
            Some((first, rest)) => {
                self.first_name = first.to_string();
                self.last_name = rest.trim().to_string();
            }
            None => self.first_name = full.to_string(),
        }
    }
}
