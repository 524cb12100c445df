//! Health check endpoint.

use actix_web::{HttpResponse, web};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub storage: &'static str,
    pub version: &'static str,
    pub timestamp: String,
}

/// GET /health - reports whether the post store answers.
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let storage_ok = state.content.list_posts().await.is_ok();

    let response = HealthResponse {
        status: if storage_ok { "ok" } else { "degraded" },
        storage: if storage_ok { "ok" } else { "unavailable" },
        version: env!("CARGO_PKG_VERSION"),
        timestamp: chrono::Utc::now().to_rfc3339(),
    };

    if storage_ok {
        HttpResponse::Ok().json(response)
    } else {
        HttpResponse::ServiceUnavailable().json(response)
    }
}
