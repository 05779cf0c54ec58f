//! Journal d'usage: une ligne par requête autorisée d'un utilisateur
//! authentifié, écrite une fois le code de statut final connu.

use actix_web::body::MessageBody;
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::middleware::Next;
use actix_web::{Error, HttpMessage, HttpRequest};
use tracing::info;

use crate::middleware::auth::{AuthPolicy, AuthUser};

#[derive(Debug, Clone, PartialEq)]
pub struct UsageEntry {
    pub method: String,
    pub path: String,
    pub user: String,
    pub roles: String,
    pub status: u16,
}

impl UsageEntry {
    /// `None` si la route n'exige pas d'autorisation ou si l'appelant
    /// n'est pas authentifié
    pub fn capture(req: &HttpRequest, status: StatusCode) -> Option<Self> {
        let extensions = req.extensions();
        extensions.get::<AuthPolicy>()?;
        let user = extensions.get::<AuthUser>()?;

        let name = if !user.username.is_empty() {
            user.username.clone()
        } else if !user.user_id.is_empty() {
            user.user_id.clone()
        } else {
            "unknown".to_string()
        };

        Some(Self {
            method: req.method().to_string(),
            path: req.path().to_string(),
            user: name,
            roles: user.roles.join(","),
            status: status.as_u16(),
        })
    }
}

pub async fn usage_log(
    req: ServiceRequest,
    next: Next<impl MessageBody>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    // Les extensions posées plus loin restent visibles via ce clone,
    // même si la suite du pipeline échoue
    let request = req.request().clone();

    // Laisser la suite du pipeline finir pour connaître le statut final
    let result = next.call(req).await;
    let status = match &result {
        Ok(res) => res.status(),
        Err(e) => e.as_response_error().status_code(),
    };

    if let Some(entry) = UsageEntry::capture(&request, status) {
        info!(
            target: "usage",
            method = %entry.method,
            path = %entry.path,
            user = %entry.user,
            roles = %entry.roles,
            status = entry.status,
            "Authorized action: {} {} by {} roles=[{}] => {}",
            entry.method, entry.path, entry.user, entry.roles, entry.status
        );
    }

    result
}
