use serde::{Serialize, Deserialize};
use sea_orm::entity::prelude::*;
use validator::Validate;

use crate::db::context::ReferenceEntity;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, Validate)]
#[sea_orm(table_name = "trade")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    #[serde(default)]
    pub trade_id: i32,

    #[serde(default)]
    #[validate(length(min = 1, max = 30, message = "Account is required (30 characters max)"))]
    pub account: String,
    #[serde(default, rename = "type")]
    #[sea_orm(column_name = "type")]
    #[validate(length(min = 1, max = 30, message = "Type is required (30 characters max)"))]
    pub trade_type: String,

    #[sea_orm(column_type = "Decimal(Some((10, 2)))", nullable)]

    #[serde(serialize_with = "crate::utils::number::decimal")]
    pub buy_quantity: Option<Decimal>,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))", nullable)]
    #[serde(serialize_with = "crate::utils::number::decimal")]
    pub sell_quantity: Option<Decimal>,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))", nullable)]
    #[serde(serialize_with = "crate::utils::number::decimal")]
    pub buy_price: Option<Decimal>,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))", nullable)]
    #[serde(serialize_with = "crate::utils::number::decimal")]
    pub sell_price: Option<Decimal>,

    #[validate(length(max = 125))]
    pub benchmark: Option<String>,
    pub trade_date: Option<DateTime>,
    #[validate(length(max = 125))]
    pub security: Option<String>,
    #[validate(length(max = 10))]
    pub status: Option<String>,
    #[validate(length(max = 125))]
    pub trader: Option<String>,
    #[validate(length(max = 125))]
    pub book: Option<String>,

    #[validate(length(max = 125))]
    pub creation_name: Option<String>,
    pub creation_date: Option<DateTime>,
    #[validate(length(max = 125))]
    pub revision_name: Option<String>,
    pub revision_date: Option<DateTime>,

    #[validate(length(max = 125))]
    pub deal_name: Option<String>,
    #[validate(length(max = 125))]
    pub deal_type: Option<String>,
    #[validate(length(max = 125))]
    pub source_list_id: Option<String>,
    #[validate(length(max = 10))]
    pub side: Option<String>,

    #[serde(default)]
    pub row_version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl ReferenceEntity for Entity {
    const ROUTE: &'static str = "Trade";
    const FIELD_RENAMES: &'static [(&'static str, &'static str)] = &[("tradeType", "type")];

    fn id_column() -> Column {
        Column::TradeId
    }

    fn version_column() -> Column {
        Column::RowVersion
    }

    fn key(model: &Model) -> i32 {
        model.trade_id
    }

    fn row_version(model: &Model) -> i32 {
        model.row_version
    }

    fn decimals(model: &Model) -> Vec<(&'static str, Option<Decimal>)> {
        vec![
            ("buyQuantity", model.buy_quantity),
            ("sellQuantity", model.sell_quantity),
            ("buyPrice", model.buy_price),
            ("sellPrice", model.sell_price),
        ]
    }
}
