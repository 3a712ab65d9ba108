use sea_orm::entity::prelude::*;

/// Stored as the lowercase tag so rows stay readable from plain SQL.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(2))")]
pub enum DbWeightUnit {
    #[sea_orm(string_value = "kg")]
    Kg,
    #[sea_orm(string_value = "lb")]
    Lb,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "user_settings")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub weekly_goal: Option<i32>,
    pub weight_unit: Option<DbWeightUnit>,
    #[sea_orm(unique)]
    pub user_id: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
