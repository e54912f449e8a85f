//! Reservation date window

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::shared::{DomainError, DomainResult};

/// Wire format of reservation dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Inclusive `[start, end]` span of whole days with `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> DomainResult<Self> {
        if start > end {
            return Err(DomainError::BadRequest(format!(
                "start date {start} is after end date {end}"
            )));
        }
        Ok(Self { start, end })
    }

    /// Parse two `YYYY-MM-DD` strings into a window.
    pub fn parse(start: &str, end: &str) -> DomainResult<Self> {
        let start = parse_date("start_date", start)?;
        let end = parse_date("end_date", end)?;
        Self::new(start, end)
    }

    /// Window of a row that was validated when it was written.
    pub(crate) fn from_stored(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Start of the first day.
    pub fn start_at(&self) -> NaiveDateTime {
        self.start.and_time(NaiveTime::MIN)
    }

    /// Midnight of the last day.
    pub fn end_at(&self) -> NaiveDateTime {
        self.end.and_time(NaiveTime::MIN)
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start <= day && day <= self.end
    }

    /// Inclusive intersection: windows that only touch on a boundary day overlap.
    pub fn overlaps(&self, other: &DateWindow) -> bool {
        !(other.end < self.start || other.start > self.end)
    }
}

/// Parse a strict `YYYY-MM-DD` date.
///
/// chrono accepts unpadded months and days as well as signed years; those are
/// rejected here so every stored date has one spelling.
pub fn parse_date(field: &str, raw: &str) -> DomainResult<NaiveDate> {
    let bytes = raw.as_bytes();
    let well_formed = bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());

    well_formed
        .then(|| NaiveDate::parse_from_str(raw, DATE_FORMAT).ok())
        .flatten()
        .ok_or_else(|| {
            DomainError::BadRequest(format!("invalid {field} '{raw}', expected YYYY-MM-DD"))
        })
}
