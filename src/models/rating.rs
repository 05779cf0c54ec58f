use serde::{Serialize, Deserialize};
use sea_orm::entity::prelude::*;
use validator::Validate;

use crate::db::context::ReferenceEntity;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, Validate)]
#[sea_orm(table_name = "rating")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    #[serde(default)]
    pub id: i32,
    #[validate(length(max = 125))]
    pub moodys_rating: Option<String>,
    #[validate(length(max = 125))]
    pub sand_p_rating: Option<String>,
    #[validate(length(max = 125))]
    pub fitch_rating: Option<String>,
    #[validate(range(min = 0, max = 255))]
    pub order_number: Option<i16>,
    #[serde(default)]
    pub row_version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl ReferenceEntity for Entity {
    const ROUTE: &'static str = "Rating";

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
}
