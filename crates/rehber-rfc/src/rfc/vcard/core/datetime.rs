//! vCard date types (RFC 6350 §4.3).
//!
//! vCard dates support partial/truncated forms that a plain calendar date
//! cannot hold, so only [`VCardDate::Full`] maps onto a [`NaiveDate`].

use chrono::NaiveDate;

/// A vCard date value with optional truncation (RFC 6350 §4.3.1).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VCardDate {
    /// Full date (YYYY-MM-DD or YYYYMMDD).
    Full(NaiveDate),
    /// Year and month only (YYYY-MM).
    YearMonth { year: i32, month: u32 },
    /// Year only (YYYY).
    Year(i32),
    /// Month and day, no year (--MM-DD or --MMDD).
    MonthDay { month: u32, day: u32 },
    /// Month only (--MM).
    Month(u32),
    /// Day only (---DD).
    Day(u32),
}

impl VCardDate {
    /// Returns the calendar date when all three components are known.
    #[must_use]
    pub fn as_full(&self) -> Option<NaiveDate> {
        match self {
            Self::Full(d) => Some(*d),
            _ => None,
        }
    }
}

/// Combined date and time, possibly partial (RFC 6350 §4.3.4).
///
/// This is the value type of BDAY and ANNIVERSARY. The time part of a
/// date-time is kept verbatim; nothing downstream reads it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateAndOrTime {
    /// Date only.
    Date(VCardDate),
    /// Date with a trailing time component (`19850412T101500Z`).
    DateTime { date: VCardDate, time: String },
    /// Free-form text: `VALUE=text`, or anything the date grammar rejected.
    Text(String),
}

impl DateAndOrTime {
    /// Returns the date component if available.
    #[must_use]
    pub fn as_date(&self) -> Option<&VCardDate> {
        match self {
            Self::Date(d) | Self::DateTime { date: d, .. } => Some(d),
            Self::Text(_) => None,
        }
    }

    /// Returns the full calendar date, ignoring any time component.
    #[must_use]
    pub fn full_date(&self) -> Option<NaiveDate> {
        self.as_date().and_then(VCardDate::as_full)
    }

    /// Returns whether this is a text value.
    #[must_use]
    pub fn is_text(&self) -> bool {
        matches!(self, Self::Text(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_date_from_datetime() {
        let date = NaiveDate::from_ymd_opt(1985, 4, 12).unwrap();
        let value = DateAndOrTime::DateTime {
            date: VCardDate::Full(date),
            time: "101500Z".to_string(),
        };
        assert_eq!(value.full_date(), Some(date));
    }

    #[test]
    fn truncated_dates_have_no_full_date() {
        let value = DateAndOrTime::Date(VCardDate::MonthDay { month: 2, day: 3 });
        assert_eq!(value.full_date(), None);
        assert_eq!(DateAndOrTime::Text("circa 1800".into()).full_date(), None);
    }
}
