//! Contexte de persistance: un point d'accès unique par type d'entité
//! (lecture complète, lecture par clé, ajout, remplacement, suppression).
//!
//! La concurrence est optimiste: chaque table porte une colonne `row_version`
//! incrémentée à chaque remplacement. Un remplacement qui n'écrit aucune
//! ligne échoue avec [`PersistError::Concurrency`]; c'est à l'appelant de
//! vérifier si la ligne existe encore.

use std::marker::PhantomData;

use rust_decimal::Decimal;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel,
    QueryFilter, QueryOrder, TransactionTrait, Value,
};
use thiserror::Error;

use crate::models::{bid_list, curve_point, rating, rule_name, trade};

/// Entité de référence exposée par un contrôleur CRUD.
pub trait ReferenceEntity: EntityTrait {
    /// Racine de la ressource HTTP (ex: "Trade" pour /Trade/{id})
    const ROUTE: &'static str;

    /// Champs dont le nom JSON diffère du nom Rust (camelCase)
    const FIELD_RENAMES: &'static [(&'static str, &'static str)] = &[];

    fn id_column() -> Self::Column;

    fn version_column() -> Self::Column;

    fn key(model: &Self::Model) -> i32;

    fn row_version(model: &Self::Model) -> i32;

    /// Champs décimaux soumis à la contrainte decimal(10,2)
    fn decimals(_model: &Self::Model) -> Vec<(&'static str, Option<Decimal>)> {
        Vec::new()
    }
}

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("row {0} was modified or deleted since it was read")]
    Concurrency(i32),

    #[error(transparent)]
    Db(#[from] DbErr),
}

#[derive(Clone)]
pub struct DbContext {
    db: DatabaseConnection,
}

impl DbContext {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    pub fn set<E: ReferenceEntity>(&self) -> EntitySet<'_, E> {
        EntitySet {
            db: &self.db,
            entity: PhantomData,
        }
    }

    pub fn bid_lists(&self) -> EntitySet<'_, bid_list::Entity> {
        self.set()
    }

    pub fn curve_points(&self) -> EntitySet<'_, curve_point::Entity> {
        self.set()
    }

    pub fn ratings(&self) -> EntitySet<'_, rating::Entity> {
        self.set()
    }

    pub fn rule_names(&self) -> EntitySet<'_, rule_name::Entity> {
        self.set()
    }

    pub fn trades(&self) -> EntitySet<'_, trade::Entity> {
        self.set()
    }
}

pub struct EntitySet<'a, E> {
    db: &'a DatabaseConnection,
    entity: PhantomData<E>,
}

impl<E> EntitySet<'_, E>
where
    E: ReferenceEntity,
    E::Model: IntoActiveModel<E::ActiveModel> + Send + Sync,
    E::ActiveModel: Send + Sync,
{
    pub async fn all(&self) -> Result<Vec<E::Model>, DbErr> {
        E::find().order_by_asc(E::id_column()).all(self.db).await
    }

    pub async fn find(&self, id: i32) -> Result<Option<E::Model>, DbErr> {
        E::find().filter(E::id_column().eq(id)).one(self.db).await
    }

    pub async fn exists(&self, id: i32) -> Result<bool, DbErr> {
        Ok(self.find(id).await?.is_some())
    }

    /// Insère une nouvelle ligne. La clé soumise est ignorée: elle est
    /// toujours générée par la base.
    pub async fn add(&self, model: E::Model) -> Result<E::Model, DbErr> {
        let mut active = model.into_active_model().reset_all();
        active.not_set(E::id_column());
        active.set(E::version_column(), Value::from(1));

        active.insert(self.db).await
    }

    /// Remplace entièrement la ligne dont la clé est portée par `model`.
    /// Si `row_version` vaut 0 le remplacement est inconditionnel.
    pub async fn replace(&self, model: E::Model) -> Result<(), PersistError> {
        let id = E::key(&model);
        let expected = E::row_version(&model);

        let mut active = model.into_active_model().reset_all();
        active.not_set(E::id_column());
        active.not_set(E::version_column());

        let mut update = E::update_many()
            .set(active)
            .col_expr(E::version_column(), Expr::col(E::version_column()).add(1))
            .filter(E::id_column().eq(id));
        if expected > 0 {
            update = update.filter(E::version_column().eq(expected));
        }

        let result = update.exec(self.db).await?;
        if result.rows_affected == 0 {
            return Err(PersistError::Concurrency(id));
        }

        Ok(())
    }

    /// Supprime la ligne et la retourne, `None` si elle n'existait pas
    pub async fn remove(&self, id: i32) -> Result<Option<E::Model>, DbErr> {
        let txn = self.db.begin().await?;

        let found = E::find().filter(E::id_column().eq(id)).one(&txn).await?;
        if found.is_some() {
            E::delete_many()
                .filter(E::id_column().eq(id))
                .exec(&txn)
                .await?;
        }

        txn.commit().await?;
        Ok(found)
    }
}
