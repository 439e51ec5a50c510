//! Line-scanning extraction for blocks the vCard grammar rejected.

use rehber_rfc::rfc::vcard::core::{names, types};
use rehber_rfc::rfc::vcard::parse::{
    join_soft_line_breaks, parse_date_and_or_time, split_structured, unfold,
};

use crate::contact::phone::normalize_phone;
use crate::contact::record::{EmailEntry, NormalizedContactRecord, PhoneEntry};
use crate::contact::text::decode;

/// Splits `[group.]NAME[;params]:value` into an upper-cased name and the value.
fn split_line(line: &str) -> Option<(String, &str)> {
    let (header, value) = line.split_once(':')?;
    let name = header.split(';').next().unwrap_or(header);
    let name = name.rsplit_once('.').map_or(name, |(_, name)| name);
    Some((name.trim().to_ascii_uppercase(), value))
}

/// ## Summary
/// Extracts the core fields of a block by scanning its lines.
///
/// Reads `FN`, `N`, the first `TEL`, the first `EMAIL`, `NOTE`, the first
/// `ORG` segment and `BDAY`. Parameters are ignored; values go through the
/// quoted-printable heuristic. Lines without a `:` are skipped.
///
/// Returns `None` when the record has no name or no email/phone.
#[must_use]
pub fn extract_manual(block: &str) -> Option<NormalizedContactRecord> {
    let mut record = NormalizedContactRecord::default();
    let unfolded = unfold(&join_soft_line_breaks(block));

    for line in unfolded.lines() {
        let Some((name, value)) = split_line(line) else {
            continue;
        };

        match name.as_str() {
            names::FN if record.full_name.is_empty() => record.full_name = decode(value, None),
            names::N if record.first_name.is_empty() && record.last_name.is_empty() => {
                let parts = split_structured(value);
                let part = |index: usize| {
                    parts
                        .get(index)
                        .map(|p| decode(p, None))
                        .unwrap_or_default()
                };
                record.last_name = part(0);
                record.first_name = part(1);
                record.middle_name = part(2);
            }
            names::TEL if record.mobile_phone.is_empty() => {
                let phone = normalize_phone(&decode(value, None));
                if !phone.is_empty() {
                    record.phones.push(PhoneEntry {
                        value: phone.clone(),
                        types: vec![types::VOICE.to_string()],
                    });
                    record.mobile_phone = phone;
                }
            }
            names::EMAIL if record.primary_email.is_empty() => {
                let email = decode(value, None).to_lowercase();
                if !email.is_empty() {
                    record.emails.push(EmailEntry {
                        value: email.clone(),
                        kind: types::INTERNET.to_string(),
                    });
                    record.primary_email = email;
                }
            }
            names::NOTE if record.notes.is_empty() => record.notes = decode(value, None),
            names::ORG if record.organization.is_empty() => {
                let first = split_structured(value).first().copied().unwrap_or_default();
                record.organization = decode(first, None);
            }
            names::BDAY if record.birthday.is_none() => {
                record.birthday = parse_date_and_or_time(value, None, 0)
                    .ok()
                    .and_then(|date| date.full_date());
            }
            _ => {}
        }
    }

    super::finish(record)
}
