//! `SeaORM` Entity for banks table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "banks")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub bank_name: String,
    pub account_no: Option<String>,
    pub ifsc_code: Option<String>,
    pub relationship_manager: Option<String>,
    pub rm_name: Option<String>,
    pub rm_email: Option<String>,
    pub rm_mobile: Option<String>,
    pub branch_name: Option<String>,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
