//! vCard value parsers.

use std::str::FromStr;

use chrono::NaiveDate;

use super::error::{ParseError, ParseResult};
use crate::rfc::vcard::core::{Address, DateAndOrTime, Organization, StructuredName, VCardDate};

/// Unescapes a vCard text value.
///
/// vCard escapes: \n, \N (newline), \, (comma), \; (semicolon), \\ (backslash)
#[must_use]
pub fn unescape_text(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        match chars.peek() {
            Some('n' | 'N') => {
                chars.next();
                result.push('\n');
            }
            Some(&escaped @ (',' | ';' | '\\')) => {
                chars.next();
                result.push(escaped);
            }
            _ => result.push(c),
        }
    }

    result
}

/// Splits a structured value on unescaped semicolons.
#[must_use]
pub fn split_structured(s: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut escaped = false;

    for (i, c) in s.char_indices() {
        match c {
            '\\' => {
                escaped = !escaped;
                continue;
            }
            ';' if !escaped => {
                parts.push(&s[start..i]);
                start = i + 1;
            }
            _ => {}
        }
        escaped = false;
    }

    parts.push(&s[start..]);
    parts
}

/// Splits a component value on unescaped commas, unescaping each part.
#[must_use]
pub fn split_component(s: &str) -> Vec<String> {
    if s.is_empty() {
        return Vec::new();
    }

    let mut parts = Vec::new();
    let mut current = String::new();
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.peek() {
                Some(&escaped @ (',' | ';' | '\\')) => {
                    chars.next();
                    current.push(escaped);
                }
                Some('n' | 'N') => {
                    chars.next();
                    current.push('\n');
                }
                _ => current.push(c),
            },
            ',' => parts.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }

    parts.push(current);
    parts
}

fn component(parts: &[&str], index: usize) -> Vec<String> {
    parts
        .get(index)
        .map(|s| split_component(s))
        .unwrap_or_default()
}

/// Parses a structured name (N property).
///
/// Components: `family;given;additional;prefixes;suffixes`. Missing
/// trailing components are empty.
#[must_use]
pub fn parse_structured_name(value: &str) -> StructuredName {
    let parts = split_structured(value);

    StructuredName {
        family: component(&parts, 0),
        given: component(&parts, 1),
        additional: component(&parts, 2),
        prefixes: component(&parts, 3),
        suffixes: component(&parts, 4),
    }
}

/// Parses an address (ADR property).
///
/// Components: `PO box;extended;street;locality;region;postal code;country`.
#[must_use]
pub fn parse_address(value: &str) -> Address {
    let parts = split_structured(value);

    Address {
        po_box: component(&parts, 0),
        extended: component(&parts, 1),
        street: component(&parts, 2),
        locality: component(&parts, 3),
        region: component(&parts, 4),
        postal_code: component(&parts, 5),
        country: component(&parts, 6),
    }
}

/// Parses an organization (ORG property).
#[must_use]
pub fn parse_organization(value: &str) -> Organization {
    let parts = split_structured(value);

    let name = parts.first().map(|s| unescape_text(s)).unwrap_or_default();
    let units = parts.iter().skip(1).map(|s| unescape_text(s)).collect();

    Organization { name, units }
}

fn number<T: FromStr>(s: &str, what: &str, line_num: usize) -> ParseResult<T> {
    s.bytes()
        .all(|b| b.is_ascii_digit())
        .then(|| s.parse().ok())
        .flatten()
        .ok_or_else(|| ParseError::invalid_date(line_num, format!("invalid {what}: {s}")))
}

fn month(s: &str, line_num: usize) -> ParseResult<u32> {
    let month: u32 = number(s, "month", line_num)?;
    if (1..=12).contains(&month) {
        Ok(month)
    } else {
        Err(ParseError::invalid_date(line_num, "month out of range"))
    }
}

fn day(s: &str, line_num: usize) -> ParseResult<u32> {
    let day: u32 = number(s, "day", line_num)?;
    if (1..=31).contains(&day) {
        Ok(day)
    } else {
        Err(ParseError::invalid_date(line_num, "day out of range"))
    }
}

fn full_date(year: &str, month: &str, day: &str, line_num: usize) -> ParseResult<VCardDate> {
    let year: i32 = number(year, "year", line_num)?;
    let month: u32 = number(month, "month", line_num)?;
    let day: u32 = number(day, "day", line_num)?;

    NaiveDate::from_ymd_opt(year, month, day)
        .map(VCardDate::Full)
        .ok_or_else(|| ParseError::invalid_date(line_num, "invalid date"))
}

/// Parses a vCard date value.
///
/// Accepts the extended (`1985-04-12`) and basic (`19850412`) full forms and
/// the RFC 6350 §4.3.1 truncated forms (`1985-04`, `1985`, `--04-12`,
/// `--0412`, `--04`, `---12`).
///
/// ## Errors
/// Returns an error if the date format is invalid or unrecognized.
pub fn parse_date(value: &str, line_num: usize) -> ParseResult<VCardDate> {
    let s = value.trim();

    if let Some(rest) = s.strip_prefix("---") {
        return Ok(VCardDate::Day(day(rest, line_num)?));
    }

    if let Some(rest) = s.strip_prefix("--") {
        return match (rest.split_once('-'), rest.len()) {
            (Some((m, d)), _) => Ok(VCardDate::MonthDay {
                month: month(m, line_num)?,
                day: day(d, line_num)?,
            }),
            (None, 4) if rest.is_ascii() => Ok(VCardDate::MonthDay {
                month: month(&rest[..2], line_num)?,
                day: day(&rest[2..], line_num)?,
            }),
            (None, 2) => Ok(VCardDate::Month(month(rest, line_num)?)),
            _ => Err(ParseError::invalid_date(
                line_num,
                format!("unrecognized truncated date: {s}"),
            )),
        };
    }

    let parts: Vec<&str> = s.split('-').collect();
    match parts.as_slice() {
        [year, m, d] => full_date(year, m, d, line_num),
        [year, m] => Ok(VCardDate::YearMonth {
            year: number(year, "year", line_num)?,
            month: month(m, line_num)?,
        }),
        [basic] if basic.len() == 8 && basic.is_ascii() => {
            full_date(&basic[..4], &basic[4..6], &basic[6..], line_num)
        }
        [year] if year.len() == 4 => Ok(VCardDate::Year(number(year, "year", line_num)?)),
        _ => Err(ParseError::invalid_date(
            line_num,
            format!("unrecognized date format: {s}"),
        )),
    }
}

/// Parses a BDAY/ANNIVERSARY style value.
///
/// `VALUE=text` yields [`DateAndOrTime::Text`]. A `T` separator splits off a
/// time component, which is kept verbatim.
///
/// ## Errors
/// Returns an error if the date part is not a recognizable date.
pub fn parse_date_and_or_time(
    value: &str,
    value_type: Option<&str>,
    line_num: usize,
) -> ParseResult<DateAndOrTime> {
    if value_type.is_some_and(|vt| vt.eq_ignore_ascii_case("text")) {
        return Ok(DateAndOrTime::Text(unescape_text(value)));
    }

    let value = value.trim();
    match value.split_once('T') {
        Some(("", _)) => Err(ParseError::invalid_date(
            line_num,
            "time-only values are not supported",
        )),
        Some((date, time)) => Ok(DateAndOrTime::DateTime {
            date: parse_date(date, line_num)?,
            time: time.to_string(),
        }),
        None => Ok(DateAndOrTime::Date(parse_date(value, line_num)?)),
    }
}
