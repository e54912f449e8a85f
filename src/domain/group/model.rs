//! Resource group

use chrono::{DateTime, Utc};

use crate::domain::query::{BindValue, ColumnKind, ColumnSpec, EntitySchema, FieldSource};

/// Company owning a fleet of resources
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceGroup {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub static GROUP_SCHEMA: EntitySchema = EntitySchema {
    entity: "Group",
    table: "resource_groups",
    primary_key: "id",
    default_sort: "created_at",
    columns: &[
        ColumnSpec::new("id", ColumnKind::Integer),
        ColumnSpec::new("name", ColumnKind::Text),
        ColumnSpec::new("email", ColumnKind::Text),
        ColumnSpec::filter_only("phone", ColumnKind::Text),
        ColumnSpec::filter_only("address", ColumnKind::Text),
        ColumnSpec::new("created_at", ColumnKind::Timestamp),
        ColumnSpec::new("updated_at", ColumnKind::Timestamp),
    ],
};

impl FieldSource for ResourceGroup {
    fn field_value(&self, column: &str) -> Option<BindValue> {
        let value = match column {
            "id" => BindValue::Int(self.id.into()),
            "name" => BindValue::Text(self.name.clone()),
            "email" => BindValue::Text(self.email.clone()),
            "phone" => BindValue::Text(self.phone.clone()),
            "address" => BindValue::Text(self.address.clone()),
            "created_at" => BindValue::Timestamp(self.created_at),
            "updated_at" => BindValue::Timestamp(self.updated_at),
            _ => return None,
        };
        Some(value)
    }
}
