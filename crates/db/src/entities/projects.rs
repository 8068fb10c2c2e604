//! `SeaORM` Entity for projects table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "projects")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub client: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub status: String,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    #[sea_orm(column_type = "Decimal(Some((14, 2)))")]
    pub budget: Decimal,
    pub contract_key: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::project_line_items::Entity")]
    ProjectLineItems,
    #[sea_orm(has_many = "super::bd_expenditures::Entity")]
    BdExpenditures,
}

impl Related<super::project_line_items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProjectLineItems.def()
    }
}

impl Related<super::bd_expenditures::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BdExpenditures.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
