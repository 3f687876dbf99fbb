use actix_web::{web, HttpResponse};
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
struct HealthStatus {
    status: &'static str,
    version: &'static str,
    database: ServiceStatus,
}

#[derive(Serialize)]
struct ServiceStatus {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

/*
    GET /health
*/
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let database = match state.store.ping().await {
        Ok(()) => ServiceStatus {
            status: "ok",
            details: None,
        },
        Err(e) => {
            log::error!("Database health check failed: {}", e);
            ServiceStatus {
                status: "error",
                details: Some("Database unreachable".to_string()),
            }
        }
    };

    let degraded = database.status != "ok";
    let health = HealthStatus {
        status: if degraded { "degraded" } else { "ok" },
        version: env!("CARGO_PKG_VERSION"),
        database,
    };

    if degraded {
        HttpResponse::ServiceUnavailable().json(health)
    } else {
        HttpResponse::Ok().json(health)
    }
}
