//! Column allow-lists for listable entities
//!
//! Column names and the table name end up as structural SQL tokens, so the
//! only identifiers that are ever rendered are the `&'static str`s declared
//! here. User input is only used to look them up.

use std::cmp::Ordering;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;

/// Storage type of a column, used to type filter values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Integer,
    Decimal,
    Text,
    Date,
    Timestamp,
}

#[derive(Debug, Clone, Copy)]
pub struct ColumnSpec {
    pub name: &'static str,
    pub kind: ColumnKind,
    pub filterable: bool,
    pub sortable: bool,
    /// Only `eq` filters are accepted. Set on columns the API never returns.
    pub exact_only: bool,
}

impl ColumnSpec {
    pub const fn new(name: &'static str, kind: ColumnKind) -> Self {
        Self {
            name,
            kind,
            filterable: true,
            sortable: true,
            exact_only: false,
        }
    }

    /// A column that can only be matched by exact value, never ordered by.
    pub const fn filter_only(name: &'static str, kind: ColumnKind) -> Self {
        Self {
            name,
            kind,
            filterable: true,
            sortable: false,
            exact_only: true,
        }
    }
}

/// Table name, columns and default ordering of a listable entity.
#[derive(Debug)]
pub struct EntitySchema {
    pub entity: &'static str,
    pub table: &'static str,
    pub primary_key: &'static str,
    pub default_sort: &'static str,
    pub columns: &'static [ColumnSpec],
}

impl EntitySchema {
    pub fn column(&self, name: &str) -> Option<&ColumnSpec> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn filterable(&self, name: &str) -> Option<&ColumnSpec> {
        self.column(name).filter(|c| c.filterable)
    }

    pub fn sortable(&self, name: &str) -> Option<&ColumnSpec> {
        self.column(name).filter(|c| c.sortable)
    }
}

/// A typed value bound to a query parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum BindValue {
    Int(i64),
    Decimal(Decimal),
    Text(String),
    Date(NaiveDate),
    Timestamp(DateTime<Utc>),
}

impl BindValue {
    /// Parse a raw filter value as the given column kind.
    pub fn coerce(kind: ColumnKind, raw: &str) -> Result<Self, String> {
        let raw_trimmed = raw.trim();
        match kind {
            ColumnKind::Text => Ok(Self::Text(raw.to_string())),
            ColumnKind::Integer => raw_trimmed
                .parse::<i64>()
                .map(Self::Int)
                .map_err(|_| format!("expected an integer, got '{raw}'")),
            ColumnKind::Decimal => raw_trimmed
                .parse::<Decimal>()
                .map(Self::Decimal)
                .map_err(|_| format!("expected a decimal number, got '{raw}'")),
            ColumnKind::Date => NaiveDate::parse_from_str(raw_trimmed, "%Y-%m-%d")
                .map(Self::Date)
                .map_err(|_| format!("expected a YYYY-MM-DD date, got '{raw}'")),
            ColumnKind::Timestamp => DateTime::parse_from_rfc3339(raw_trimmed)
                .map(|dt| dt.with_timezone(&Utc))
                .or_else(|_| {
                    NaiveDate::parse_from_str(raw_trimmed, "%Y-%m-%d")
                        .map(|d| d.and_hms_opt(0, 0, 0).unwrap_or_default().and_utc())
                })
                .map(Self::Timestamp)
                .map_err(|_| format!("expected an RFC 3339 timestamp or a date, got '{raw}'")),
        }
    }

    /// Order two values of the same kind. Values of different kinds are incomparable.
    pub fn compare(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => Some(a.cmp(b)),
            (Self::Decimal(a), Self::Decimal(b)) => Some(a.cmp(b)),
            (Self::Text(a), Self::Text(b)) => Some(a.cmp(b)),
            (Self::Date(a), Self::Date(b)) => Some(a.cmp(b)),
            (Self::Timestamp(a), Self::Timestamp(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

/// Records that can be filtered and sorted by column name in memory.
pub trait FieldSource {
    fn field_value(&self, column: &str) -> Option<BindValue>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coerce_by_kind() {
        assert_eq!(BindValue::coerce(ColumnKind::Integer, "42"), Ok(BindValue::Int(42)));
        assert_eq!(
            BindValue::coerce(ColumnKind::Decimal, "99.50"),
            Ok(BindValue::Decimal(Decimal::new(9950, 2)))
        );
        assert_eq!(
            BindValue::coerce(ColumnKind::Date, "2025-01-04"),
            Ok(BindValue::Date(NaiveDate::from_ymd_opt(2025, 1, 4).unwrap()))
        );
        assert!(BindValue::coerce(ColumnKind::Integer, "abc").is_err());
        assert!(BindValue::coerce(ColumnKind::Date, "04/01/2025").is_err());
    }

    #[test]
    fn timestamp_accepts_plain_date() {
        let BindValue::Timestamp(ts) = BindValue::coerce(ColumnKind::Timestamp, "2025-03-01").unwrap()
        else {
            panic!("expected timestamp");
        };
        assert_eq!(ts.to_rfc3339(), "2025-03-01T00:00:00+00:00");
    }

    #[test]
    fn mixed_kinds_do_not_compare() {
        let a = BindValue::Int(1);
        let b = BindValue::Text("1".into());
        assert_eq!(a.compare(&b), None);
        assert_eq!(a.compare(&BindValue::Int(2)), Some(Ordering::Less));
    }
}
