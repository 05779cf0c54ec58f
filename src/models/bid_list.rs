use serde::{Serialize, Deserialize};
use sea_orm::entity::prelude::*;
use validator::Validate;

use crate::db::context::ReferenceEntity;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, Validate)]
#[sea_orm(table_name = "bid_list")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    #[serde(default)]
    pub bid_list_id: i32,

    #[serde(default)]
    #[validate(length(min = 1, max = 30, message = "Account is required (30 characters max)"))]
    pub account: String,
    #[serde(default)]
    #[validate(length(min = 1, max = 30, message = "BidType is required (30 characters max)"))]
    pub bid_type: String,

    #[sea_orm(column_type = "Decimal(Some((10, 2)))", nullable)]

    #[serde(serialize_with = "crate::utils::number::decimal")]
    pub bid_quantity: Option<Decimal>,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))", nullable)]
    #[serde(serialize_with = "crate::utils::number::decimal")]
    pub ask_quantity: Option<Decimal>,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))", nullable)]
    #[serde(serialize_with = "crate::utils::number::decimal")]
    pub bid: Option<Decimal>,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))", nullable)]
    #[serde(serialize_with = "crate::utils::number::decimal")]
    pub ask: Option<Decimal>,

    #[validate(length(max = 125))]
    pub benchmark: Option<String>,
    pub bid_list_date: Option<DateTime>,
    #[validate(length(max = 125))]
    pub commentary: Option<String>,
    #[validate(length(max = 125))]
    pub security: Option<String>,
    #[validate(length(max = 10))]
    pub status: Option<String>,
    #[validate(length(max = 125))]
    pub trader: Option<String>,
    #[validate(length(max = 125))]
    pub book: Option<String>,

    // Champs d'audit (création / révision)
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

    // Jeton de concurrence optimiste: 0 = remplacement inconditionnel
    #[serde(default)]
    pub row_version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl ReferenceEntity for Entity {
    const ROUTE: &'static str = "BidList";

    fn id_column() -> Column {
        Column::BidListId
    }

    fn version_column() -> Column {
        Column::RowVersion
    }

    fn key(model: &Model) -> i32 {
        model.bid_list_id
    }

    fn row_version(model: &Model) -> i32 {
        model.row_version
    }

    fn decimals(model: &Model) -> Vec<(&'static str, Option<Decimal>)> {
        vec![
            ("bidQuantity", model.bid_quantity),
            ("askQuantity", model.ask_quantity),
            ("bid", model.bid),
            ("ask", model.ask),
        ]
    }
}
