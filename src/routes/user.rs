use actix_web::http::header;
use actix_web::{delete, get, post, put, web, HttpResponse};

use crate::error::ApiError;
use crate::models::dto::{UserDisplay, UserRegistration};
use crate::services::identity::UserStore;
use crate::services::identity_service::IdentityService;
use crate::utils::binding::JsonBody;

/// GET /User - Tous les utilisateurs, sans identifiants (ADMIN)
#[get("")]
pub async fn get_all(store: web::Data<dyn UserStore>) -> Result<HttpResponse, ApiError> {
    let users = IdentityService::list(store.get_ref()).await?;
    Ok(HttpResponse::Ok().json(users))
}

/// GET /User/{id} (ADMIN)
#[get("/{id}")]
pub async fn get_by_id(
    store: web::Data<dyn UserStore>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let user = IdentityService::get(store.get_ref(), &path).await?;
    Ok(HttpResponse::Ok().json(user))
}

/// POST /User - Inscription avec le rôle "User" (ADMIN)
#[post("")]
pub async fn register(
    store: web::Data<dyn UserStore>,
    body: JsonBody<UserRegistration>,
) -> Result<HttpResponse, ApiError> {
    let user = IdentityService::register(store.get_ref(), body.into_inner()).await?;

    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, format!("/User/{}", user.id)))
        .json(UserDisplay::from(&user)))
}

/// PUT /User/{id} - Nom d'utilisateur, nom complet, email (ADMIN)
#[put("/{id}")]
pub async fn update_user(
    store: web::Data<dyn UserStore>,
    path: web::Path<String>,
    body: JsonBody<UserRegistration>,
) -> Result<HttpResponse, ApiError> {
    IdentityService::update(store.get_ref(), &path, body.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// DELETE /User/{id} (ADMIN)
#[delete("/{id}")]
pub async fn delete_user(
    store: web::Data<dyn UserStore>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    IdentityService::delete(store.get_ref(), &path).await?;
    Ok(HttpResponse::NoContent().finish())
}
