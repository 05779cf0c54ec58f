use actix_web::body::{BoxBody, MessageBody};
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::middleware::Next;
use actix_web::{web, Error, HttpMessage, HttpRequest};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::models::roles;
use crate::utils::jwt::JwtService;

/// Structure qui contient les infos de l'utilisateur authentifié
/// (attachée aux extensions de la requête par le middleware)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUser {
    pub user_id: String,
    pub username: String,
    pub roles: Vec<String>,
}

/// Exigence d'autorisation déclarée par un scope de routes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthPolicy {
    Authenticated,
    Role(&'static str),
}

/// Scopes réservés aux utilisateurs authentifiés (/Curve, /Rating, /Trade)
pub async fn require_user(
    req: ServiceRequest,
    next: Next<impl MessageBody + 'static>,
) -> Result<ServiceResponse<BoxBody>, Error> {
    authorize(AuthPolicy::Authenticated, req, next).await
}

/// Scopes réservés au rôle Admin (/User)
pub async fn require_admin(
    req: ServiceRequest,
    next: Next<impl MessageBody + 'static>,
) -> Result<ServiceResponse<BoxBody>, Error> {
    authorize(AuthPolicy::Role(roles::ADMIN), req, next).await
}

async fn authorize<B: MessageBody + 'static>(
    policy: AuthPolicy,
    req: ServiceRequest,
    next: Next<B>,
) -> Result<ServiceResponse<BoxBody>, Error> {
    // La politique est posée avant toute vérification: le journal d'usage s'en sert
    req.extensions_mut().insert(policy);

    let user = match authenticate(req.request()) {
        Ok(user) => user,
        Err(e) => return Ok(req.error_response(e)),
    };
    req.extensions_mut().insert(user.clone());

    if let AuthPolicy::Role(role) = policy {
        if !user.roles.iter().any(|r| r == role) {
            return Ok(req.error_response(ApiError::Forbidden(role)));
        }
    }

    Ok(next.call(req).await?.map_into_boxed_body())
}

/// Extrait et vérifie le jeton "Authorization: Bearer <token>"
pub fn authenticate(req: &HttpRequest) -> Result<AuthUser, ApiError> {
    // 1. Extraire le header Authorization
    let auth_str = req
        .headers()
        .get("Authorization")
        .ok_or_else(|| ApiError::Unauthorized("Missing Authorization header".to_string()))?
        .to_str()
        .map_err(|_| ApiError::Unauthorized("Invalid Authorization header".to_string()))?;

    // 2. Extraire le token (format: "Bearer <token>")
    let token = auth_str.strip_prefix("Bearer ").ok_or_else(|| {
        ApiError::Unauthorized("Invalid Authorization format (expected: Bearer <token>)".to_string())
    })?;

    // 3. Vérifier le token JWT
    let jwt = req
        .app_data::<web::Data<JwtService>>()
        .ok_or_else(|| ApiError::Internal("JwtService is not configured".to_string()))?;
    let claims = jwt.verify_token(token).map_err(ApiError::Unauthorized)?;

    Ok(AuthUser {
        user_id: claims.sub,
        username: claims.name,
        roles: claims.roles,
    })
}
