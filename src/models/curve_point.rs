use serde::{Serialize, Deserialize};
use sea_orm::entity::prelude::*;
use validator::Validate;

use crate::db::context::ReferenceEntity;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, Validate)]
#[sea_orm(table_name = "curve_point")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    #[serde(default)]
    pub id: i32,
    // Identifiant de courbe sur un octet (0-255)
    #[validate(range(min = 0, max = 255))]
    pub curve_id: Option<i16>,
    pub as_of_date: Option<DateTime>,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))", nullable)]
    #[serde(serialize_with = "crate::utils::number::decimal")]
    pub term: Option<Decimal>,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))", nullable)]
    #[serde(serialize_with = "crate::utils::number::decimal")]
    pub value: Option<Decimal>,
    pub creation_date: Option<DateTime>,
    #[serde(default)]
    pub row_version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl ReferenceEntity for Entity {
    const ROUTE: &'static str = "Curve";

    fn id_column() -> Column {
        Column::Id
    }

    fn version_column() -> Column {
        Column::RowVersion
    }

    fn key(model: &Model) -> i32 {
        model.id
    }

    fn row_version(model: &Model) -> i32 {
        model.row_version
    }

    fn decimals(model: &Model) -> Vec<(&'static str, Option<Decimal>)> {
        vec![("term", model.term), ("value", model.value)]
    }
}
