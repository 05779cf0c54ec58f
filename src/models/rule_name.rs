use serde::{Serialize, Deserialize};
use sea_orm::entity::prelude::*;
use validator::Validate;

use crate::db::context::ReferenceEntity;

// Les fragments JSON / SQL sont stockés tels quels, jamais interprétés
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, Validate)]
#[sea_orm(table_name = "rule_name")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    #[serde(default)]
    pub id: i32,
    #[validate(length(max = 125))]
    pub name: Option<String>,
    #[validate(length(max = 125))]
    pub description: Option<String>,
    #[validate(length(max = 125))]
    pub json: Option<String>,
    #[validate(length(max = 512))]
    pub template: Option<String>,
    #[validate(length(max = 125))]
    pub sql_str: Option<String>,
    #[validate(length(max = 125))]
    pub sql_part: Option<String>,
    #[serde(default)]
    pub row_version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl ReferenceEntity for Entity {
    const ROUTE: &'static str = "RuleName";

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
