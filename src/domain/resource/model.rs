//! Rentable resource

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::domain::query::{BindValue, ColumnKind, ColumnSpec, EntitySchema, FieldSource};

/// A vehicle offered for rent by a group
#[derive(Debug, Clone, PartialEq)]
pub struct Resource {
    pub id: i32,
    pub group_id: i32,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub color: String,
    pub registration_no: String,
    /// Price of one billed day; always positive
    pub daily_rate: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub static RESOURCE_SCHEMA: EntitySchema = EntitySchema {
    entity: "Resource",
    table: "resources",
    primary_key: "id",
    default_sort: "created_at",
    columns: &[
        ColumnSpec::new("id", ColumnKind::Integer),
        ColumnSpec::new("group_id", ColumnKind::Integer),
        ColumnSpec::new("make", ColumnKind::Text),
        ColumnSpec::new("model", ColumnKind::Text),
        ColumnSpec::new("year", ColumnKind::Integer),
        ColumnSpec::new("color", ColumnKind::Text),
        ColumnSpec::filter_only("registration_no", ColumnKind::Text),
        ColumnSpec::new("daily_rate", ColumnKind::Decimal),
        ColumnSpec::new("created_at", ColumnKind::Timestamp),
        ColumnSpec::new("updated_at", ColumnKind::Timestamp),
    ],
};

impl FieldSource for Resource {
    fn field_value(&self, column: &str) -> Option<BindValue> {
        let value = match column {
            "id" => BindValue::Int(self.id.into()),
            "group_id" => BindValue::Int(self.group_id.into()),
            "make" => BindValue::Text(self.make.clone()),
            "model" => BindValue::Text(self.model.clone()),
            "year" => BindValue::Int(self.year.into()),
            "color" => BindValue::Text(self.color.clone()),
            "registration_no" => BindValue::Text(self.registration_no.clone()),
            "daily_rate" => BindValue::Decimal(self.daily_rate),
            "created_at" => BindValue::Timestamp(self.created_at),
            "updated_at" => BindValue::Timestamp(self.updated_at),
            _ => return None,
        };
        Some(value)
    }
}
