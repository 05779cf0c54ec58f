// connexion BD + création du schéma

pub mod context;

use sea_orm::{
    ActiveModelTrait, ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr,
    EntityTrait, Schema, Set,
};
use tracing::info;

use crate::config::AppConfig;
use crate::models::{bid_list, curve_point, rating, roles, rule_name, trade, user_roles, users};

pub async fn establish_connection(config: &AppConfig) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(config.database_url.clone());
    options.sqlx_logging(false);

    Database::connect(options).await
}

/// Crée les tables manquantes puis insère les rôles Admin / User
pub async fn ensure_schema(db: &DatabaseConnection) -> Result<(), DbErr> {
    let schema = Schema::new(db.get_database_backend());

    create_table(db, &schema, bid_list::Entity).await?;
    create_table(db, &schema, curve_point::Entity).await?;
    create_table(db, &schema, rating::Entity).await?;
    create_table(db, &schema, rule_name::Entity).await?;
    create_table(db, &schema, trade::Entity).await?;
    create_table(db, &schema, users::Entity).await?;
    create_table(db, &schema, roles::Entity).await?;
    create_table(db, &schema, user_roles::Entity).await?;

    for name in [roles::ADMIN, roles::USER] {
        if roles::Entity::find_by_id(name.to_string()).one(db).await?.is_none() {
            roles::ActiveModel { name: Set(name.to_string()) }.insert(db).await?;
            info!(role = name, "role seeded");
        }
    }

    Ok(())
}

async fn create_table<E: EntityTrait>(
    db: &DatabaseConnection,
    schema: &Schema,
    entity: E,
) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let mut statement = schema.create_table_from_entity(entity);
    statement.if_not_exists();

    db.execute(backend.build(&statement)).await?;
    Ok(())
}
