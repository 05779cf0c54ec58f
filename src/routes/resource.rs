//! Contrôleur CRUD partagé par les cinq ressources de référence
//! (BidList, Curve, Rating, RuleName, Trade).

use actix_web::http::header;
use actix_web::{web, HttpResponse};
use sea_orm::IntoActiveModel;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info};
use validator::Validate;

use crate::db::context::{DbContext, PersistError, ReferenceEntity};
use crate::error::ApiError;
use crate::utils::binding::JsonBody;
use crate::utils::validation::validate_entity;

/// GET /{Resource} - Toutes les lignes
pub async fn list<E>(ctx: web::Data<DbContext>) -> Result<HttpResponse, ApiError>
where
    E: ReferenceEntity,
    E::Model: IntoActiveModel<E::ActiveModel> + Serialize + Send + Sync,
    E::ActiveModel: Send + Sync,
{
    let rows = ctx.set::<E>().all().await?;
    Ok(HttpResponse::Ok().json(rows))
}

/// GET /{Resource}/{id}
pub async fn get<E>(
    ctx: web::Data<DbContext>,
    path: web::Path<i32>,
) -> Result<HttpResponse, ApiError>
where
    E: ReferenceEntity,
    E::Model: IntoActiveModel<E::ActiveModel> + Serialize + Send + Sync,
    E::ActiveModel: Send + Sync,
{
    let id = path.into_inner();

    match ctx.set::<E>().find(id).await? {
        Some(row) => Ok(HttpResponse::Ok().json(row)),
        None => Err(ApiError::NotFound),
    }
}

/// POST /{Resource} - 201 + Location
pub async fn create<E>(
    ctx: web::Data<DbContext>,
    body: JsonBody<E::Model>,
) -> Result<HttpResponse, ApiError>
where
    E: ReferenceEntity,
    E::Model: IntoActiveModel<E::ActiveModel> + Validate + Serialize + DeserializeOwned + Send + Sync + 'static,
    E::ActiveModel: Send + Sync,
{
    let model = body.into_inner();
    validate_entity::<E>(&model).map_err(ApiError::Validation)?;

    let created = ctx.set::<E>().add(model).await?;
    let id = E::key(&created);
    info!(resource = E::ROUTE, id, "created");

    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, format!("/{}/{}", E::ROUTE, id)))
        .json(created))
}

/// PUT /{Resource}/{id} - remplacement complet, 204
pub async fn replace<E>(
    ctx: web::Data<DbContext>,
    path: web::Path<i32>,
    body: JsonBody<E::Model>,
) -> Result<HttpResponse, ApiError>
where
    E: ReferenceEntity,
    E::Model: IntoActiveModel<E::ActiveModel> + Validate + Serialize + DeserializeOwned + Send + Sync + 'static,
    E::ActiveModel: Send + Sync,
{
    let id = path.into_inner();
    let model = body.into_inner();

    // 1. L'identifiant du chemin doit être celui du corps
    if E::key(&model) != id {
        return Err(ApiError::IdMismatch {
            path: id,
            body: E::key(&model),
        });
    }

    // 2. Contraintes des champs
    validate_entity::<E>(&model).map_err(ApiError::Validation)?;

    // 3. Écriture; en cas de conflit, la ligne a-t-elle disparu ?
    let set = ctx.set::<E>();
    match set.replace(model).await {
        Ok(()) => {
            info!(resource = E::ROUTE, id, "replaced");
            Ok(HttpResponse::NoContent().finish())
        }
        Err(PersistError::Concurrency(_)) => {
            if set.exists(id).await? {
                Err(ApiError::Conflict(id))
            } else {
                debug!(resource = E::ROUTE, id, "replace target no longer exists");
                Err(ApiError::NotFound)
            }
        }
        Err(e) => Err(e.into()),
    }
}

/// DELETE /{Resource}/{id} - 204
pub async fn remove<E>(
    ctx: web::Data<DbContext>,
    path: web::Path<i32>,
) -> Result<HttpResponse, ApiError>
where
    E: ReferenceEntity,
    E::Model: IntoActiveModel<E::ActiveModel> + Send + Sync,
    E::ActiveModel: Send + Sync,
{
    let id = path.into_inner();

    match ctx.set::<E>().remove(id).await? {
        Some(_) => {
            info!(resource = E::ROUTE, id, "deleted");
            Ok(HttpResponse::NoContent().finish())
        }
        None => Err(ApiError::NotFound),
    }
}

pub fn routes<E>(cfg: &mut web::ServiceConfig)
where
    E: ReferenceEntity,
    E::Model: IntoActiveModel<E::ActiveModel> + Validate + Serialize + DeserializeOwned + Send + Sync + 'static,
    E::ActiveModel: Send + Sync,
{
    cfg.route("", web::get().to(list::<E>))
        .route("", web::post().to(create::<E>))
        .route("/{id}", web::get().to(get::<E>))
        .route("/{id}", web::put().to(replace::<E>))
        .route("/{id}", web::delete().to(remove::<E>));
}
