//! Field extraction from a parsed vCard.

use thiserror::Error;

use rehber_rfc::rfc::vcard::core::{names, types};
use rehber_rfc::rfc::vcard::{VCard, VCardProperty};

use crate::contact::phone::normalize_phone;
use crate::contact::record::{AddressEntry, EmailEntry, NormalizedContactRecord, PhoneEntry};
use crate::contact::text::decode_with_charset;

/// Why a single field could not be read. Never leaves this module.
#[derive(Error, Debug)]
enum FieldError {
    #[error("value has an unexpected shape")]
    UnexpectedValue,
    #[error("not a full calendar date")]
    NotAFullDate,
    #[error("{0} value(s) skipped")]
    SkippedValues(usize),
    #[error("no http(s) URL")]
    NotAUrl,
}

fn skipped(count: usize) -> Result<(), FieldError> {
    if count == 0 {
        Ok(())
    } else {
        Err(FieldError::SkippedValues(count))
    }
}

type FieldStep = fn(&VCard, &mut NormalizedContactRecord) -> Result<(), FieldError>;

/// Extraction steps, each labelled with the property it reads.
const STEPS: &[(&str, FieldStep)] = &[
    (names::N, structured_name),
    (names::FN, formatted_name),
    (names::NICKNAME, nickname),
    (names::EMAIL, emails),
    (names::TEL, phones),
    (names::ORG, organization),
    (names::TITLE, job_title),
    (names::ROLE, department),
    (names::BDAY, birthday),
    (names::ANNIVERSARY, anniversary),
    (names::ADR, addresses),
    (names::URL, websites),
    (names::NOTE, notes),
    (names::PHOTO, photo_url),
];

/// ## Summary
/// Builds a record from a card that passed the vCard grammar.
///
/// Every step runs on its own: a step that fails is logged with the property
/// name (never the value) and leaves its field empty.
///
/// Returns `None` when the record has no name or no email/phone.
#[must_use]
pub fn extract(card: &VCard) -> Option<NormalizedContactRecord> {
    let mut record = NormalizedContactRecord::default();

    for (property, step) in STEPS {
        if let Err(error) = step(card, &mut record) {
            tracing::debug!(property, %error, "Field skipped");
        }
    }

    super::finish(record)
}

/// Decoded, trimmed text of a property according to its own parameters.
fn decoded(prop: &VCardProperty, value: &str) -> String {
    decode_with_charset(value, prop.encoding(), prop.charset())
}

fn joined(prop: &VCardProperty, parts: &[String]) -> String {
    decoded(prop, &parts.join(" "))
}

fn upper_types(prop: &VCardProperty) -> Vec<String> {
    prop.type_values()
        .into_iter()
        .map(str::to_ascii_uppercase)
        .collect()
}

fn first_text(card: &VCard, name: &str) -> Result<String, FieldError> {
    let Some(prop) = card.get_property(name) else {
        return Ok(String::new());
    };
    let text = prop.value.first_text().ok_or(FieldError::UnexpectedValue)?;
    Ok(decoded(prop, text))
}

fn structured_name(card: &VCard, record: &mut NormalizedContactRecord) -> Result<(), FieldError> {
    let Some(prop) = card.get_property(names::N) else {
        return Ok(());
    };
    let name = prop
        .value
        .as_structured_name()
        .ok_or(FieldError::UnexpectedValue)?;

    record.first_name = joined(prop, &name.given);
    record.last_name = joined(prop, &name.family);
    record.middle_name = joined(prop, &name.additional);
    Ok(())
}

fn formatted_name(card: &VCard, record: &mut NormalizedContactRecord) -> Result<(), FieldError> {
    record.full_name = first_text(card, names::FN)?;
    Ok(())
}

fn nickname(card: &VCard, record: &mut NormalizedContactRecord) -> Result<(), FieldError> {
    record.nickname = first_text(card, names::NICKNAME)?;
    Ok(())
}

fn emails(card: &VCard, record: &mut NormalizedContactRecord) -> Result<(), FieldError> {
    let mut entries = Vec::new();
    let mut skip_count = 0;

    for prop in card.get_properties(names::EMAIL) {
        let Some(raw) = prop.value.as_text_or_uri() else {
            skip_count += 1;
            continue;
        };
        let value = decoded(prop, strip_mailto_scheme(raw));
        if value.is_empty() {
            continue;
        }

        let kinds = upper_types(prop);
        let kind = if kinds.is_empty() {
            types::INTERNET.to_string()
        } else {
            kinds.join(",")
        };
        entries.push(EmailEntry { value, kind });
    }

    record.primary_email = entries
        .first()
        .map(|entry| entry.value.trim().to_lowercase())
        .unwrap_or_default();
    record.emails = entries;
    skipped(skip_count)
}

fn strip_mailto_scheme(raw: &str) -> &str {
    let raw = raw.trim();
    match raw.get(..7) {
        Some(scheme) if scheme.eq_ignore_ascii_case("mailto:") => &raw[7..],
        _ => raw,
    }
}

fn strip_tel_scheme(raw: &str) -> &str {
    let raw = raw.trim();
    match raw.get(..4) {
        Some(scheme) if scheme.eq_ignore_ascii_case("tel:") => &raw[4..],
        _ => raw,
    }
}

fn is_mobile(prop: &VCardProperty) -> bool {
    prop.has_type(types::CELL) || prop.has_type(types::MOBILE)
}

fn phones(card: &VCard, record: &mut NormalizedContactRecord) -> Result<(), FieldError> {
    let mut numbers = Vec::new();
    let mut skip_count = 0;

    for prop in card.get_properties(names::TEL) {
        let Some(raw) = prop.value.as_text_or_uri() else {
            skip_count += 1;
            continue;
        };
        let value = normalize_phone(&decoded(prop, strip_tel_scheme(raw)));
        if value.is_empty() {
            continue;
        }

        let mut kinds = upper_types(prop);
        if kinds.is_empty() {
            kinds.push(types::VOICE.to_string());
        }
        numbers.push((prop, PhoneEntry { value, types: kinds }));
    }

    let mobile_index = numbers
        .iter()
        .position(|(prop, _)| is_mobile(prop))
        .or_else(|| {
            // No CELL/MOBILE label: the first number is the mobile one
            (!numbers.is_empty()).then_some(0)
        });

    let mut slots = PhoneSlots::default();
    for (index, (prop, entry)) in numbers.iter().enumerate() {
        if Some(index) == mobile_index {
            slots.mobile.clone_from(&entry.value);
        } else {
            slots.assign(prop, &entry.value);
        }
    }

    slots.apply(record);
    record.phones = numbers.into_iter().map(|(_, entry)| entry).collect();
    skipped(skip_count)
}

#[derive(Default)]
struct PhoneSlots {
    mobile: String,
    home: String,
    work: String,
    second: String,
    third: String,
}

impl PhoneSlots {
    fn assign(&mut self, prop: &VCardProperty, value: &str) {
        let slot = if prop.has_type(types::HOME) && self.home.is_empty() {
            &mut self.home
        } else if prop.has_type(types::WORK) && self.work.is_empty() {
            &mut self.work
        } else if self.second.is_empty() {
            &mut self.second
        } else if self.third.is_empty() {
            &mut self.third
        } else {
            tracing::trace!("No free phone slot");
            return;
        };
        value.clone_into(slot);
    }

    fn apply(self, record: &mut NormalizedContactRecord) {
        record.mobile_phone = self.mobile;
        record.home_phone = self.home;
        record.work_phone = self.work;
        record.second_phone = self.second;
        record.third_phone = self.third;
    }
}

fn organization(card: &VCard, record: &mut NormalizedContactRecord) -> Result<(), FieldError> {
    let Some(prop) = card.get_property(names::ORG) else {
        return Ok(());
    };
    let org = prop
        .value
        .as_organization()
        .ok_or(FieldError::UnexpectedValue)?;

    let units = org.units.iter().filter(|u| !u.trim().is_empty()).count();
    if units > 0 {
        tracing::debug!(units, "Organizational units not imported");
    }

    record.organization = decoded(prop, &org.name);
    Ok(())
}

fn job_title(card: &VCard, record: &mut NormalizedContactRecord) -> Result<(), FieldError> {
    record.job_title = first_text(card, names::TITLE)?;
    Ok(())
}

fn department(card: &VCard, record: &mut NormalizedContactRecord) -> Result<(), FieldError> {
    record.department = first_text(card, names::ROLE)?;
    Ok(())
}

fn full_date(prop: &VCardProperty) -> Result<chrono::NaiveDate, FieldError> {
    prop.value
        .as_date_and_or_time()
        .ok_or(FieldError::UnexpectedValue)?
        .full_date()
        .ok_or(FieldError::NotAFullDate)
}

fn birthday(card: &VCard, record: &mut NormalizedContactRecord) -> Result<(), FieldError> {
    if let Some(prop) = card.get_property(names::BDAY) {
        record.birthday = Some(full_date(prop)?);
    }
    Ok(())
}

fn anniversary(card: &VCard, record: &mut NormalizedContactRecord) -> Result<(), FieldError> {
    let prop = card
        .get_property(names::ANNIVERSARY)
        .or_else(|| card.get_property(names::X_ANNIVERSARY));
    if let Some(prop) = prop {
        record.anniversary = Some(full_date(prop)?);
    }
    Ok(())
}

fn addresses(card: &VCard, record: &mut NormalizedContactRecord) -> Result<(), FieldError> {
    let mut entries = Vec::new();
    let mut skip_count = 0;

    for prop in card.get_properties(names::ADR) {
        let Some(adr) = prop.value.as_address() else {
            skip_count += 1;
            continue;
        };
        let kinds = upper_types(prop);
        let kind = if kinds.is_empty() {
            types::HOME.to_string()
        } else {
            kinds.join(",")
        };

        let entry = AddressEntry::new(
            joined(prop, &adr.street),
            joined(prop, &adr.locality),
            joined(prop, &adr.region),
            joined(prop, &adr.postal_code),
            joined(prop, &adr.country),
            kind,
        );
        if !entry.is_empty() {
            entries.push(entry);
        }
    }

    record.addresses = entries;
    skipped(skip_count)
}

fn websites(card: &VCard, record: &mut NormalizedContactRecord) -> Result<(), FieldError> {
    let mut urls = Vec::new();
    let mut skip_count = 0;

    for prop in card.get_properties(names::URL) {
        match prop.value.as_text_or_uri().map(|url| decoded(prop, url)) {
            Some(url) if !url.is_empty() => urls.push(url),
            Some(_) => {}
            None => skip_count += 1,
        }
    }

    record.websites = urls;
    skipped(skip_count)
}

fn notes(card: &VCard, record: &mut NormalizedContactRecord) -> Result<(), FieldError> {
    record.notes = first_text(card, names::NOTE)?;
    Ok(())
}

fn is_http_url(value: &str) -> bool {
    let lower = value.trim().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Inline photos are exposed through [`super::embedded_photo`] instead.
fn photo_url(card: &VCard, record: &mut NormalizedContactRecord) -> Result<(), FieldError> {
    let photos = card.get_properties(names::PHOTO);
    if photos.is_empty() {
        return Ok(());
    }

    let url = photos
        .into_iter()
        .filter_map(|prop| prop.value.as_text_or_uri())
        .find(|value| is_http_url(value))
        .ok_or(FieldError::NotAUrl)?;

    record.photo_url = url.trim().to_string();
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rehber_rfc::rfc::vcard::parse_single;

    use super::*;

    fn card(body: &str) -> VCard {
        parse_single(&format!("BEGIN:VCARD\r\nVERSION:3.0\r\n{body}END:VCARD\r\n")).unwrap()
    }

    #[test_log::test]
    fn names_from_structured_name() {
        let record = extract(&card(
            "N:Doe;John;Quincy;Mr.;\r\nFN:Mr. John Q. Doe\r\nEMAIL:John.Doe@Example.com\r\n",
        ))
        .unwrap();

        assert_eq!(record.first_name, "John");
        assert_eq!(record.last_name, "Doe");
        assert_eq!(record.middle_name, "Quincy");
        assert_eq!(record.full_name, "Mr. John Q. Doe");
    }

    #[test]
    fn full_name_is_split_without_n() {
        let record = extract(&card("FN:Ali Veli\r\nTEL:5321112233\r\n")).unwrap();
        assert_eq!(record.first_name, "Ali");
        assert_eq!(record.last_name, "Veli");
    }

    #[test]
    fn emails_keep_types_and_primary_is_lowercased() {
        let record = extract(&card(
            "FN:Jane\r\nEMAIL;TYPE=home,pref:Jane@Example.COM \r\nEMAIL:jane@work.example\r\n",
        ))
        .unwrap();

        assert_eq!(record.primary_email, "jane@example.com");
        assert_eq!(record.emails.len(), 2);
        assert_eq!(record.emails[0].kind, "HOME,PREF");
        assert_eq!(record.emails[0].value, "Jane@Example.COM");
        assert_eq!(record.emails[1].kind, "INTERNET");
    }

    #[test]
    fn cell_phone_wins_mobile_slot() {
        let record = extract(&card(
            "FN:Jane\r\n\
             TEL;TYPE=HOME:0212 555 44 33\r\n\
             TEL;TYPE=CELL:0532 123 45 67\r\n\
             TEL;TYPE=WORK:0216 444 33 22\r\n\
             TEL:+44 20 7946 0018\r\n\
             TEL;TYPE=FAX:+44 20 7946 0019\r\n",
        ))
        .unwrap();

        assert_eq!(record.mobile_phone, "+905321234567");
        assert_eq!(record.home_phone, "+902125554433");
        assert_eq!(record.work_phone, "+902164443322");
        assert_eq!(record.second_phone, "+442079460018");
        assert_eq!(record.third_phone, "+442079460019");
        assert_eq!(record.phones.len(), 5);
        assert_eq!(record.phones[3].types, vec!["VOICE"]);
    }

    #[test]
    fn first_phone_is_mobile_without_cell_label() {
        let record = extract(&card(
            "FN:Jane\r\nTEL;TYPE=HOME:05329876543\r\nTEL;TYPE=HOME:02125554433\r\n",
        ))
        .unwrap();

        assert_eq!(record.mobile_phone, "+905329876543");
        assert_eq!(record.home_phone, "+902125554433");
    }

    #[test]
    fn tel_uri_scheme_is_removed() {
        let record = extract(&card("FN:Jane\r\nTEL;VALUE=uri:tel:+1-418-656-9254\r\n")).unwrap();
        assert_eq!(record.mobile_phone, "+14186569254");
    }

    #[test]
    fn phone_labels_are_case_insensitive() {
        let record = extract(&card(
            "FN:Jane\r\n\
             TEL;TYPE=work:0216 444 33 22\r\n\
             TEL;TYPE=Home:0212 555 44 33\r\n\
             TEL;TYPE=cell:0532 123 45 67\r\n",
        ))
        .unwrap();

        assert_eq!(record.mobile_phone, "+905321234567");
        assert_eq!(record.home_phone, "+902125554433");
        assert_eq!(record.work_phone, "+902164443322");
        assert_eq!(record.phones[0].types, vec!["WORK"]);
    }

    #[test]
    fn mailto_scheme_is_removed_in_any_case() {
        let record = extract(&card(
            "FN:Jane\r\nEMAIL:MAILTO:X@Y.COM\r\nEMAIL;VALUE=uri:mailto:jane@work.example\r\n",
        ))
        .unwrap();

        assert_eq!(record.primary_email, "x@y.com");
        assert_eq!(record.emails[0].value, "X@Y.COM");
        assert_eq!(record.emails[1].value, "jane@work.example");
    }

    #[test]
    fn organization_title_and_role() {
        let record = extract(&card(
            "FN:Jane\r\nEMAIL:j@example.com\r\n\
             ORG:Acme;Engineering\r\nTITLE:Engineer\r\nROLE:Platform\r\n",
        ))
        .unwrap();

        assert_eq!(record.organization, "Acme");
        assert_eq!(record.job_title, "Engineer");
        assert_eq!(record.department, "Platform");
    }

    #[test]
    fn dates_only_when_complete() {
        let record = extract(&card(
            "FN:Jane\r\nEMAIL:j@example.com\r\nBDAY:--0412\r\nX-ANNIVERSARY:20100612\r\n",
        ))
        .unwrap();

        assert_eq!(record.birthday, None);
        assert_eq!(record.anniversary, NaiveDate::from_ymd_opt(2010, 6, 12));
    }

    #[test]
    fn unparsable_date_leaves_other_fields() {
        let record = extract(&card(
            "FN:Jane\r\nEMAIL:j@example.com\r\nBDAY:not a date\r\nNOTE:still here\r\n",
        ))
        .unwrap();

        assert_eq!(record.birthday, None);
        assert_eq!(record.notes, "still here");
    }

    #[test]
    fn addresses_are_formatted() {
        let record = extract(&card(
            "FN:Jane\r\nEMAIL:j@example.com\r\n\
             ADR:;;Bağdat Cd. 5;İstanbul;;34710;Türkiye\r\n\
             ADR;TYPE=work:;;;;;;\r\n",
        ))
        .unwrap();

        assert_eq!(record.addresses.len(), 1);
        let address = &record.addresses[0];
        assert_eq!(address.kind, "HOME");
        assert_eq!(address.city, "İstanbul");
        assert_eq!(address.formatted, "Bağdat Cd. 5, İstanbul, 34710, Türkiye");
    }

    #[test]
    fn websites_notes_and_photo_url() {
        let record = extract(&card(
            "FN:Jane\r\nEMAIL:j@example.com\r\n\
             URL:https://example.com\r\nURL:https://blog.example.com\r\n\
             NOTE:Line one\\nLine two\r\n\
             PHOTO;VALUE=uri:https://example.com/jane.jpg\r\n",
        ))
        .unwrap();

        assert_eq!(
            record.websites,
            vec!["https://example.com", "https://blog.example.com"]
        );
        assert_eq!(record.notes, "Line one\nLine two");
        assert_eq!(record.photo_url, "https://example.com/jane.jpg");
    }

    #[test]
    fn inline_photo_is_not_a_url() {
        let record = extract(&card(
            "FN:Jane\r\nEMAIL:j@example.com\r\nPHOTO;ENCODING=b;TYPE=JPEG:/9j/4AA=\r\n",
        ))
        .unwrap();
        assert!(record.photo_url.is_empty());
    }

    #[test]
    fn quoted_printable_values_are_decoded() {
        let record = extract(&card(
            "N;CHARSET=UTF-8;ENCODING=QUOTED-PRINTABLE:=C3=96zt=C3=BCrk;Bu=C4=9Fra;;;\r\n\
             TEL;CELL:05321234567\r\n\
             NOTE;CHARSET=windows-1254;ENCODING=QUOTED-PRINTABLE:G=FCzel\r\n",
        ))
        .unwrap();

        assert_eq!(record.first_name, "Buğra");
        assert_eq!(record.last_name, "Öztürk");
        assert_eq!(record.notes, "Güzel");
    }

    #[test]
    fn nickname_first_value() {
        let record = extract(&card(
            "FN:Jane\r\nEMAIL:j@example.com\r\nNICKNAME:Janie,JJ\r\n",
        ))
        .unwrap();
        assert_eq!(record.nickname, "Janie");
    }

    #[test]
    fn validity_gate() {
        assert!(extract(&card("FN:Empty Contact Test\r\n")).is_none());
        assert!(extract(&card("EMAIL:nobody@example.com\r\n")).is_none());
    }
}
