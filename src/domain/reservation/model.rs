//! Reservation domain entity

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;

use super::window::DateWindow;
use crate::domain::query::{BindValue, ColumnKind, ColumnSpec, EntitySchema, FieldSource};

/// A resource booked by a holder for an inclusive range of days
#[derive(Debug, Clone, PartialEq)]
pub struct Reservation {
    pub id: i32,
    pub resource_id: i32,
    pub holder_id: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Cached price: billed days × the resource's daily rate at booking time
    pub total: Decimal,
    pub created_at: DateTime<Utc>,
}

impl Reservation {
    pub fn window(&self) -> DateWindow {
        DateWindow::from_stored(self.start_date, self.end_date)
    }

    /// Move the reservation to `window` at a new price.
    pub fn reschedule(&mut self, window: DateWindow, total: Decimal) {
        self.start_date = window.start();
        self.end_date = window.end();
        self.total = total;
    }
}

/// A priced reservation that has not been stored yet
#[derive(Debug, Clone, PartialEq)]
pub struct NewReservation {
    pub resource_id: i32,
    pub holder_id: i32,
    pub window: DateWindow,
    pub total: Decimal,
}

pub static RESERVATION_SCHEMA: EntitySchema = EntitySchema {
    entity: "Reservation",
    table: "reservations",
    primary_key: "id",
    default_sort: "created_at",
    columns: &[
        ColumnSpec::new("id", ColumnKind::Integer),
        ColumnSpec::new("resource_id", ColumnKind::Integer),
        ColumnSpec::new("holder_id", ColumnKind::Integer),
        ColumnSpec::new("start_date", ColumnKind::Date),
        ColumnSpec::new("end_date", ColumnKind::Date),
        ColumnSpec::new("total", ColumnKind::Decimal),
        ColumnSpec::new("created_at", ColumnKind::Timestamp),
    ],
};

impl FieldSource for Reservation {
    fn field_value(&self, column: &str) -> Option<BindValue> {
        let value = match column {
            "id" => BindValue::Int(self.id.into()),
            "resource_id" => BindValue::Int(self.resource_id.into()),
            "holder_id" => BindValue::Int(self.holder_id.into()),
            "start_date" => BindValue::Date(self.start_date),
            "end_date" => BindValue::Date(self.end_date),
            "total" => BindValue::Decimal(self.total),
            "created_at" => BindValue::Timestamp(self.created_at),
            _ => return None,
        };
        Some(value)
    }
}
