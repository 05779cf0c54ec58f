use actix_web::{post, web, HttpResponse};

use crate::error::ApiError;
use crate::models::dto::{LoginRequest, LoginResponse};
use crate::services::identity::UserStore;
use crate::services::identity_service::IdentityService;
use crate::utils::binding::JsonBody;
use crate::utils::jwt::JwtService;

/// POST /Login - Se connecter (PUBLIC)
#[post("")]
pub async fn login(
    store: web::Data<dyn UserStore>,
    jwt: web::Data<JwtService>,
    body: JsonBody<LoginRequest>,
) -> Result<HttpResponse, ApiError> {
    let token = IdentityService::login(store.get_ref(), jwt.get_ref(), body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(LoginResponse { token }))
}
