use std::sync::Arc;

use actix_web::middleware::from_fn;
use actix_web::{App, HttpServer, web};
use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use poseidon_backend::config::AppConfig;
use poseidon_backend::db::{self, context::DbContext};
use poseidon_backend::middleware::usage_log::usage_log;
use poseidon_backend::routes;
use poseidon_backend::services::identity::{SeaOrmUserStore, UserStore};
use poseidon_backend::services::identity_service::IdentityService;
use poseidon_backend::utils::jwt::JwtService;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env()?;

    info!("Connecting to database...");
    let connection = db::establish_connection(&config)
        .await
        .context("Failed to connect to database")?;
    db::ensure_schema(&connection)
        .await
        .context("Failed to create database schema")?;
    info!("Database connected");

    let store: Arc<dyn UserStore> = Arc::new(SeaOrmUserStore::new(connection.clone()));
    if let Some(seed) = &config.admin {
        IdentityService::seed_admin(store.as_ref(), seed)
            .await
            .context("Failed to seed admin account")?;
    }

    let context = web::Data::new(DbContext::new(connection));
    let jwt = web::Data::new(JwtService::new(&config.jwt_secret, config.jwt_ttl));
    let store = web::Data::from(store);

    info!("Starting server on http://{}:{}", config.host, config.port);

    HttpServer::new(move || {
        App::new()
            .app_data(context.clone())
            .app_data(jwt.clone())
            .app_data(store.clone())
            .wrap(from_fn(usage_log))
            .configure(routes::configure_routes)
    })
        .bind((config.host.as_str(), config.port))?
        .run()
        .await?;

    Ok(())
}
