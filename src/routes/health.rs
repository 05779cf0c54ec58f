use actix_web::{get, web, HttpResponse};
use chrono::Utc;
use tracing::warn;

use crate::db::context::DbContext;
use crate::models::dto::HealthResponse;

/// GET /health - PUBLIC, 503 si la base ne répond pas
#[get("/health")]
pub async fn health_check(ctx: web::Data<DbContext>) -> HttpResponse {
    let status = match ctx.connection().ping().await {
        Ok(()) => "ok",
        Err(e) => {
            warn!(error = %e, "database ping failed");
            "degraded"
        }
    };

    let response = HealthResponse {
        status: status.to_string(),
        time: Utc::now(),
    };

    if status == "ok" {
        HttpResponse::Ok().json(response)
    } else {
        HttpResponse::ServiceUnavailable().json(response)
    }
}
