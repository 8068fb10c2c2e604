//! `SeaORM` Entity for sales_quarters table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "sales_quarters")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub quarter: String,
    #[sea_orm(column_type = "Decimal(Some((14, 2)))")]
    pub direct_sales: Decimal,
    #[sea_orm(column_type = "Decimal(Some((14, 2)))")]
    pub institutional_sales: Decimal,
    #[sea_orm(column_type = "Decimal(Some((14, 2)))")]
    pub channel_sales: Decimal,
    #[sea_orm(column_type = "Decimal(Some((14, 2)))")]
    pub online_sales: Decimal,
    #[sea_orm(column_type = "Decimal(Some((14, 2)))")]
    pub target: Decimal,
    #[sea_orm(column_type = "Decimal(Some((14, 2)))")]
    pub forecasted_sales: Decimal,
    #[sea_orm(column_type = "Decimal(Some((5, 2)))")]
    pub hit_percentage: Decimal,
    #[sea_orm(column_type = "Decimal(Some((5, 2)))")]
    pub achieved_percentage: Decimal,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
