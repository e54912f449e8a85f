//! Resource entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "resources")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub group_id: i32,

    pub make: String,
    pub model: String,
    pub year: i32,
    pub color: String,

    #[sea_orm(unique)]
    pub registration_no: String,

    /// Price per billed day
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub daily_rate: Decimal,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::resource_group::Entity",
        from = "Column::GroupId",
        to = "super::resource_group::Column::Id"
    )]
    Group,
    #[sea_orm(has_many = "super::reservation::Entity")]
    Reservations,
}

impl Related<super::resource_group::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Group.def()
    }
}

impl Related<super::reservation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reservations.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
